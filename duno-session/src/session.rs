use std::time::Duration;

use rand::thread_rng;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use duno::bot::{self, BotDecision};
use duno::card::Color;
use duno::error::GameError;
use duno::event::GameEvent;
use duno::game::{GameMode, GameState, Phase};
use duno::player::Player;
use duno::snapshot::{PersistenceGateway, Snapshot};

use crate::notice::Notice;

/// How long the bot pretends to think before moving.
pub const BOT_TURN_DELAY: Duration = Duration::from_millis(1500);

/// How long a player has to declare UNO after dropping to one card.
pub const UNO_PENALTY_WINDOW: Duration = Duration::from_secs(2);

#[derive(Debug)]
enum Command {
    StartNewGame { mode: GameMode },
    Play { hand_index: usize },
    ResolveWildColor { color: Color },
    Draw,
    DeclareUno,
    BotTurn { generation: u64 },
    UnoPenalty { generation: u64, player: Player },
    Query(oneshot::Sender<Option<Snapshot>>),
    Shutdown,
}

/// Everything the session reports outward. Delivery is in commit order;
/// turn-handoff and win events fire exactly once per transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Notice(Notice),
    NextTurn { player: Player },
    ColorChoiceRequired { player: Player },
    DrawEffect { target: Player, amount: usize },
    Win { winner: Player, points: u32 },
}

/// Cheap cloneable front for the session task.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    pub fn start_new_game(&self, mode: GameMode) {
        let _ = self.commands.send(Command::StartNewGame { mode });
    }

    pub fn play(&self, hand_index: usize) {
        let _ = self.commands.send(Command::Play { hand_index });
    }

    pub fn resolve_wild_color(&self, color: Color) {
        let _ = self.commands.send(Command::ResolveWildColor { color });
    }

    pub fn draw(&self) {
        let _ = self.commands.send(Command::Draw);
    }

    pub fn declare_uno(&self) {
        let _ = self.commands.send(Command::DeclareUno);
    }

    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    /// Snapshot of the live table, `None` when no game is active.
    pub async fn state(&self) -> Option<Snapshot> {
        let (reply, response) = oneshot::channel();
        self.commands.send(Command::Query(reply)).ok()?;
        response.await.ok().flatten()
    }
}

/// The single owner of the game state. All mutation funnels through the
/// command queue and is applied one command at a time; timers send commands
/// back into the queue instead of touching state directly, and a generation
/// counter invalidates whatever was scheduled against a superseded game.
pub struct GameSession {
    state: Option<GameState>,
    gateway: Box<dyn PersistenceGateway + Send>,
    events: mpsc::UnboundedSender<SessionEvent>,
    commands: mpsc::UnboundedSender<Command>,
    generation: u64,
    bot_turn_pending: bool,
}

impl GameSession {
    pub fn spawn(
        gateway: Box<dyn PersistenceGateway + Send>,
    ) -> (SessionHandle, mpsc::UnboundedReceiver<SessionEvent>) {
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut session = GameSession {
            state: None,
            gateway,
            events: event_tx,
            commands: command_tx.clone(),
            generation: 0,
            bot_turn_pending: false,
        };

        tokio::spawn(async move {
            session.resume_saved_game();
            while let Some(command) = command_rx.recv().await {
                if matches!(command, Command::Shutdown) {
                    break;
                }
                session.handle(command);
            }
            info!("session closed");
        });

        (SessionHandle { commands: command_tx }, event_rx)
    }

    fn handle(&mut self, command: Command) {
        debug!(?command, "processing command");
        match command {
            Command::StartNewGame { mode } => self.start_new_game(mode),
            Command::Play { hand_index } => self.play(hand_index),
            Command::ResolveWildColor { color } => self.resolve_wild_color(color),
            Command::Draw => self.draw(),
            Command::DeclareUno => self.declare_uno(),
            Command::BotTurn { generation } => {
                if generation != self.generation {
                    debug!("stale bot turn dropped");
                    return;
                }
                self.bot_turn_pending = false;
                self.run_bot_turn();
            }
            Command::UnoPenalty { generation, player } => {
                if generation != self.generation {
                    debug!("stale uno penalty dropped");
                    return;
                }
                self.apply_uno_penalty(player);
            }
            Command::Query(reply) => {
                let _ = reply.send(self.state.as_ref().map(Snapshot::capture));
            }
            Command::Shutdown => {}
        }
    }

    fn resume_saved_game(&mut self) {
        match self.gateway.load() {
            Ok(Some(snapshot)) => match snapshot.restore() {
                Ok(state) => {
                    info!("resumed saved game");
                    self.state = Some(state);
                    self.maybe_schedule_bot_turn();
                }
                Err(error) => warn!(%error, "saved game rejected"),
            },
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to load saved game"),
        }
    }

    fn start_new_game(&mut self, mode: GameMode) {
        // A bumped generation orphans every timer of the previous game.
        self.generation = self.generation.wrapping_add(1);
        self.bot_turn_pending = false;
        self.state = Some(GameState::new(mode, &mut thread_rng()));
        info!(?mode, "new game started");
        self.persist();
        self.emit(SessionEvent::NextTurn { player: Player::One });
    }

    fn play(&mut self, hand_index: usize) {
        let mut rng = thread_rng();
        let Some(state) = &mut self.state else {
            self.notice(Notice::error("No Game", "Start a new game first."));
            return;
        };

        match state.attempt_play(hand_index, &mut rng) {
            Ok(events) => self.after_commit(events),
            Err(GameError::IllegalMove(_)) => {
                let detail = match state.top_card() {
                    Some(top) => {
                        format!("Card must match {} or {}.", state.active_color(), top)
                    }
                    None => "That card cannot be played now.".to_string(),
                };
                self.notice(Notice::error("Invalid Move", detail));
            }
            Err(error) => warn!(%error, "play rejected"),
        }
    }

    fn resolve_wild_color(&mut self, color: Color) {
        let mut rng = thread_rng();
        let Some(state) = &mut self.state else {
            return;
        };

        match state.resolve_wild_color(color, &mut rng) {
            Ok(events) => self.after_commit(events),
            Err(error) => self.notice(Notice::error("Invalid Move", error.to_string())),
        }
    }

    fn draw(&mut self) {
        let mut rng = thread_rng();
        let Some(state) = &mut self.state else {
            self.notice(Notice::error("No Game", "Start a new game first."));
            return;
        };

        let player = state.current_player();
        match state.attempt_draw(&mut rng) {
            Ok(events) => {
                self.notice(Notice::success("Card Drawn", format!("{player} drew a card!")));
                self.after_commit(events);
            }
            Err(GameError::DeckExhausted) => {
                self.notice(Notice::error("Empty Deck", "No cards left to draw!"));
            }
            Err(error) => self.notice(Notice::error("Invalid Move", error.to_string())),
        }
    }

    fn declare_uno(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };
        let events = state.declare_uno();
        self.after_commit(events);
    }

    fn apply_uno_penalty(&mut self, player: Player) {
        let mut rng = thread_rng();
        let Some(state) = &mut self.state else {
            return;
        };
        let events = state.apply_uno_penalty(player, &mut rng);
        self.after_commit(events);
    }

    fn run_bot_turn(&mut self) {
        let mut rng = thread_rng();
        let Some(state) = &mut self.state else {
            return;
        };
        if state.mode() != GameMode::Solo
            || state.current_player() != Player::Two
            || state.phase() != Phase::AwaitingMove
        {
            return;
        }

        let decision = bot::decide(
            state.hand(Player::Two),
            state.top_card(),
            Some(state.active_color()),
            &mut rng,
        );

        let mut notices = Vec::new();
        let mut committed = Vec::new();

        match decision {
            BotDecision::Play {
                hand_index,
                color_choice,
                declare_uno,
            } => {
                if declare_uno {
                    state.declare_uno();
                    notices.push(Notice::info("Bot says UNO!", ""));
                }
                match state.attempt_play(hand_index, &mut rng) {
                    Ok(mut events) => {
                        let suspended = events
                            .iter()
                            .any(|event| matches!(event, GameEvent::AwaitingColorChoice { .. }));
                        if suspended {
                            let color =
                                color_choice.expect("the bot always picks a color for its wild");
                            notices.push(Notice::info(
                                "Bot Chose Color",
                                format!("Color set to {color}!"),
                            ));
                            match state.resolve_wild_color(color, &mut rng) {
                                Ok(resolved) => {
                                    events.retain(|event| {
                                        !matches!(event, GameEvent::AwaitingColorChoice { .. })
                                    });
                                    events.extend(resolved);
                                }
                                Err(error) => warn!(%error, "bot color resolution rejected"),
                            }
                        }
                        committed.extend(events);
                    }
                    Err(error) => warn!(%error, "bot submitted a rejected move"),
                }
            }
            BotDecision::Draw => match state.attempt_draw(&mut rng) {
                Ok(events) => {
                    notices.push(Notice::info("Bot Drew Card", "Bot drew a card and passed turn!"));
                    committed.extend(events);
                }
                Err(GameError::DeckExhausted) => {
                    notices.push(Notice::error("No Cards", "Bot cannot draw or play!"));
                }
                Err(error) => warn!(%error, "bot draw rejected"),
            },
        }

        for notice in notices {
            self.notice(notice);
        }
        self.after_commit(committed);
    }

    /// Publishes what a committed operation did, persists the result, and
    /// schedules whatever deferred work the events call for.
    fn after_commit(&mut self, events: Vec<GameEvent>) {
        let mut game_over = false;
        let mut penalty_windows = Vec::new();

        for event in &events {
            match event {
                GameEvent::CardPlayed { .. } | GameEvent::ColorChosen { .. } => {}
                GameEvent::AwaitingColorChoice { player } => {
                    self.emit(SessionEvent::ColorChoiceRequired { player: *player });
                }
                GameEvent::TurnChanged { to } => {
                    self.emit(SessionEvent::NextTurn { player: *to });
                }
                GameEvent::OpponentSkipped { by, skipped } => {
                    self.notice(Notice::info(
                        "Skip",
                        format!("{skipped} is skipped! {by} plays again!"),
                    ));
                }
                GameEvent::DrawEffect {
                    target,
                    requested,
                    drawn,
                } => {
                    let title = if *requested == 4 { "Wild Draw 4" } else { "Draw 2" };
                    self.notice(Notice::info(
                        title,
                        format!("{target} draws {drawn} cards and loses their turn!"),
                    ));
                    self.emit(SessionEvent::DrawEffect {
                        target: *target,
                        amount: *drawn,
                    });
                }
                GameEvent::CardsDrawn { .. } => {}
                GameEvent::DeckReshuffled => {
                    self.notice(Notice::info("Deck Reshuffled", "Discard pile shuffled into deck!"));
                }
                GameEvent::UnoWindowOpened { player } => penalty_windows.push(*player),
                GameEvent::UnoDeclared { .. } => {
                    self.notice(Notice::success("UNO!", ""));
                }
                GameEvent::UnoPenalty { player, .. } => {
                    self.notice(Notice::error(
                        "UNO Penalty",
                        format!("{player} forgot to say UNO!"),
                    ));
                }
                GameEvent::GameOver { winner, points } => {
                    game_over = true;
                    self.emit(SessionEvent::Win {
                        winner: *winner,
                        points: *points,
                    });
                }
            }
        }

        if game_over {
            self.state = None;
        }
        self.persist();

        for player in penalty_windows {
            self.schedule_uno_penalty(player);
        }
        self.maybe_schedule_bot_turn();
    }

    fn maybe_schedule_bot_turn(&mut self) {
        let Some(state) = &self.state else {
            return;
        };
        if state.mode() != GameMode::Solo
            || state.current_player() != Player::Two
            || state.phase() != Phase::AwaitingMove
            || self.bot_turn_pending
        {
            return;
        }

        self.bot_turn_pending = true;
        self.notice(Notice::info("Bot Thinking", ""));

        let commands = self.commands.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            tokio::time::sleep(BOT_TURN_DELAY).await;
            let _ = commands.send(Command::BotTurn { generation });
        });
    }

    fn schedule_uno_penalty(&self, player: Player) {
        let commands = self.commands.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            tokio::time::sleep(UNO_PENALTY_WINDOW).await;
            let _ = commands.send(Command::UnoPenalty { generation, player });
        });
    }

    fn persist(&mut self) {
        let snapshot = self.state.as_ref().map(Snapshot::capture);
        if let Err(error) = self.gateway.save(snapshot.as_ref()) {
            warn!(%error, "failed to persist game state");
        }
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    fn notice(&self, notice: Notice) {
        self.emit(SessionEvent::Notice(notice));
    }
}
