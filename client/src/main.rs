mod cli;
mod human;
mod play;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use common::ConfigLoader;
use dotenv::dotenv;
use env_logger::Env;
use human::HumanController;
use log::info;
use minimax::{BotController, BotOptions, Difficulty};
use play::{describe, run_game, Seat};
use quoridor::{Color, Engine, EngineOptions, Game, GameOptions, GameState};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Play(play_args) => {
            let config = load_config(&play_args.config)?;
            let difficulty = play_args.difficulty.parse::<Difficulty>()?;
            let (engine, mut game) = new_game(&config)?;

            let (human_color, bot_color) = if play_args.human_first {
                (Color::A, Color::B)
            } else {
                (Color::B, Color::A)
            };

            let human: Seat = Box::new(HumanController::new(human_color, std::io::stdin().lock()));
            let bot: Seat = Box::new(BotController::new(
                engine,
                bot_color,
                bot_options(&config, difficulty)?,
            ));
            let mut seats = if play_args.human_first {
                [human, bot]
            } else {
                [bot, human]
            };

            info!("Human plays {}, the {} bot plays {}", human_color, difficulty, bot_color);

            let outcome = run_game(&mut game, &mut seats, None, true)?;
            println!("{}", describe(outcome));
        }
        Commands::Watch(watch_args) => {
            let config = load_config(&watch_args.config)?;
            let difficulty_a = watch_args.a.parse::<Difficulty>()?;
            let difficulty_b = watch_args.b.parse::<Difficulty>()?;
            let (engine, mut game) = new_game(&config)?;

            let mut seats: [Seat; 2] = [
                Box::new(BotController::new(
                    engine.clone(),
                    Color::A,
                    bot_options(&config, difficulty_a)?,
                )),
                Box::new(BotController::new(
                    engine,
                    Color::B,
                    bot_options(&config, difficulty_b)?,
                )),
            ];

            info!("Watching {} (A) against {} (B)", difficulty_a, difficulty_b);

            let outcome = run_game(&mut game, &mut seats, Some(watch_args.max_turns), true)?;
            println!("{}", describe(outcome));
        }
    }

    Ok(())
}

/// Loads the config file, or an empty config so every option takes its default when the file is absent.
fn load_config(path: &str) -> Result<ConfigLoader> {
    if Path::new(path).is_file() {
        ConfigLoader::new(path, "game".to_string())
    } else {
        info!("No config found at {}, using defaults", path);
        ConfigLoader::empty("game".to_string())
    }
}

fn new_game(config: &ConfigLoader) -> Result<(Arc<Engine>, Game)> {
    let engine_options = config.scoped("engine").load::<EngineOptions>()?;
    let game_options = config.scoped("game").load::<GameOptions>()?;

    let engine = Arc::new(Engine::new(&engine_options));
    let game_state = GameState::from_options(&game_options, &engine)?;

    Ok((engine.clone(), Game::new(engine, game_state)))
}

/// Bot options from the `bot` scope with the difficulty chosen on the command line.
fn bot_options(config: &ConfigLoader, difficulty: Difficulty) -> Result<BotOptions> {
    Ok(BotOptions {
        difficulty,
        ..config.scoped("bot").load::<BotOptions>()?
    })
}
