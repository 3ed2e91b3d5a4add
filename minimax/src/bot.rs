use crossbeam::channel::{bounded, Receiver};
use engine::{Controller, GameEngine};
use itertools::Itertools;
use log::{debug, info, warn};
use parking_lot::Mutex;
use quoridor::{Action, Color, Engine, GameState, Position};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use super::{moves_by_difficulty, BotOptions, Search, LOSS_PENALTY};

/// Why the bot played something other than the best scored candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// Nothing scored above negative infinity, or the bot is out of walls and every line loses.
    NoImprovement,
    /// There was nothing to search at all.
    NoCandidates,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChosenAction {
    pub action: Action,
    pub score: f32,
    pub nodes: usize,
    /// Expected continuation after `action`.
    pub line: Vec<Action>,
    pub fallback: Option<Fallback>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BotOutcome {
    Chosen(ChosenAction),
    Cancelled,
}

/// The decision making half of a bot seat. Cheap to clone; clones share the oscillation history.
#[derive(Clone)]
pub struct Bot {
    engine: Arc<Engine>,
    color: Color,
    options: BotOptions,
    pub(crate) history: Arc<Mutex<VecDeque<Position>>>,
}

impl Bot {
    pub fn new(engine: Arc<Engine>, color: Color, options: BotOptions) -> Self {
        Self {
            engine,
            color,
            options,
            history: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn options(&self) -> &BotOptions {
        &self.options
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Searches every root candidate and picks the best one.
    ///
    /// `cancel` is polled before each root candidate. Once it is set the search stops and nothing is chosen.
    pub fn choose_action(&self, game_state: &GameState, cancel: &AtomicBool) -> BotOutcome {
        let start = Instant::now();
        let engine = &*self.engine;
        let color = self.color;
        let mut search = Search::new(engine, &self.options);
        let depth = search.root_depth();
        let origin = game_state.player(color).position;

        let mut candidates = moves_by_difficulty(
            engine,
            game_state,
            color,
            0,
            self.options.difficulty,
            &self.options,
        );
        if candidates.is_empty() {
            candidates = game_state
                .valid_moves(color)
                .into_values()
                .map(Action::Move)
                .collect();
        }

        let recently_left = self.history.lock().iter().copied().collect_vec();

        let mut alpha = f32::NEG_INFINITY;
        let beta = f32::INFINITY;
        let mut best_score = f32::NEG_INFINITY;
        let mut best: Option<(Action, Vec<Action>)> = None;

        for action in &candidates {
            if cancel.load(Ordering::Acquire) {
                info!("{} search cancelled after {} nodes", color, search.nodes());
                return BotOutcome::Cancelled;
            }

            let child = engine.take_action(game_state, action, color);
            let (mut score, line) = search.minimax(
                &child,
                depth.saturating_sub(1),
                alpha,
                beta,
                color,
                color.opponent(),
            );

            if let Action::Move(destination) = action {
                if recently_left.contains(destination) {
                    debug!(
                        "Penalizing {} for stepping back to {} ({:.2} - {:.2})",
                        color, destination, score, self.options.oscillation_penalty
                    );
                    score -= self.options.oscillation_penalty;
                }
            }

            if score > best_score {
                best_score = score;
                best = Some((*action, line));
                alpha = alpha.max(score);
            }
        }

        let out_of_walls = game_state.player(color).remaining_walls == 0;
        let (action, line, fallback) = match best {
            Some((action, line)) if !(out_of_walls && best_score <= -LOSS_PENALTY) => {
                (action, line, None)
            }
            _ => match candidates.first() {
                Some(first) => {
                    warn!(
                        "{} found no improving line (best {:.2}), falling back to {}",
                        color, best_score, first
                    );
                    (*first, Vec::new(), Some(Fallback::NoImprovement))
                }
                None => {
                    warn!("{} has no candidate actions, skipping", color);
                    (Action::Skip, Vec::new(), Some(Fallback::NoCandidates))
                }
            },
        };

        self.remember(origin);

        info!(
            "{} plays {} (score {:.2}, {} nodes, {:.2}s) line: {}",
            color,
            action,
            best_score,
            search.nodes(),
            start.elapsed().as_secs_f32(),
            line.iter().join(" ")
        );

        BotOutcome::Chosen(ChosenAction {
            action,
            score: best_score,
            nodes: search.nodes(),
            line,
            fallback,
        })
    }

    fn remember(&self, origin: Position) {
        let mut history = self.history.lock();
        history.push_back(origin);
        while history.len() > self.options.oscillation_memory {
            history.pop_front();
        }
    }
}

/// A seat played by the bot. Each turn's search runs on its own worker thread.
pub struct BotController {
    bot: Bot,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl BotController {
    pub fn new(engine: Arc<Engine>, color: Color, options: BotOptions) -> Self {
        Self {
            bot: Bot::new(engine, color, options),
            cancel: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Cancels any search in flight, waits for its worker and forgets the oscillation history.
    pub fn stop(&mut self) {
        self.cancel.store(true, Ordering::Release);
        self.join_worker();
        self.bot.clear_history();
    }

    fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("{} bot worker panicked", self.bot.color());
            }
        }
    }
}

impl Controller for BotController {
    type Action = Action;
    type State = GameState;

    fn on_turn(&mut self, game_state: &GameState) -> Receiver<Action> {
        self.join_worker();

        let cancel = Arc::new(AtomicBool::new(false));
        self.cancel = cancel.clone();

        let (sender, receiver) = bounded(1);
        let bot = self.bot.clone();
        let game_state = game_state.clone();

        self.worker = Some(thread::spawn(move || {
            if let BotOutcome::Chosen(chosen) = bot.choose_action(&game_state, &cancel) {
                if sender.send(chosen.action).is_err() {
                    debug!("{} turn was abandoned before the bot replied", bot.color());
                }
            }
        }));

        receiver
    }

    fn on_end_turn(&mut self) {
        self.join_worker();
    }
}

impl Drop for BotController {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Release);
        self.join_worker();
    }
}
