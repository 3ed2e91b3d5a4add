use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Quoridor Client")]
#[clap(about = "Plays the wall race game in the terminal against the minimax bot", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Play(PlayCommand),
    Watch(WatchCommand),
}

#[derive(Args)]
#[clap(about = "Play against the bot. Enter moves as r,c or a direction, walls as r,ch or r,cv.", long_about = None)]
pub struct PlayCommand {
    #[clap(short, long, default_value_t = String::from("medium"))]
    pub difficulty: String,

    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,

    /// Take the first move as player A.
    #[clap(long)]
    pub human_first: bool,
}

#[derive(Args)]
#[clap(about = "Watch two bots play each other.", long_about = None)]
pub struct WatchCommand {
    #[clap(short, long, default_value_t = String::from("medium"))]
    pub a: String,

    #[clap(short, long, default_value_t = String::from("medium"))]
    pub b: String,

    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,

    #[clap(short, long, default_value_t = 200)]
    pub max_turns: usize,
}
