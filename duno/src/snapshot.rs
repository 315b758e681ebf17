use serde::{Deserialize, Serialize};

use crate::card::{Card, Color, Rank};
use crate::constants::TOTAL_CARDS_IN_DECK;
use crate::deck::{Deck, DiscardPile};
use crate::error::{PersistenceError, SnapshotError};
use crate::game::{Direction, GameMode, GameState};
use crate::player::{Player, Scores};

/// Flat, JSON-serializable image of a running game. A play suspended on a
/// color choice is not committed state and is not captured; a restored game
/// always resumes awaiting a move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub deck: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub player1_hand: Vec<Card>,
    pub player2_hand: Vec<Card>,
    pub active_color: Color,
    pub current_player: Player,
    pub uno_declared: bool,
    pub direction: Direction,
    pub last_action: Option<Rank>,
    pub scores: Scores,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            mode: state.mode(),
            deck: state.deck().cards().to_vec(),
            discard_pile: state.discard().cards().to_vec(),
            player1_hand: state.hand(Player::One).to_vec(),
            player2_hand: state.hand(Player::Two).to_vec(),
            active_color: state.active_color(),
            current_player: state.current_player(),
            uno_declared: state.uno_declared(),
            direction: state.direction(),
            last_action: state.last_action(),
            scores: state.scores(),
        }
    }

    /// Rebuilds a game, refusing snapshots that lost or invented cards.
    pub fn restore(self) -> Result<GameState, SnapshotError> {
        let total = self.deck.len()
            + self.discard_pile.len()
            + self.player1_hand.len()
            + self.player2_hand.len();
        if total != TOTAL_CARDS_IN_DECK as usize {
            return Err(SnapshotError::CardCountMismatch(total));
        }

        let top_card = self
            .discard_pile
            .first()
            .ok_or(SnapshotError::EmptyDiscardPile)?;
        if top_card.color.is_none() {
            return Err(SnapshotError::ColorlessTopCard);
        }

        Ok(GameState::from_parts(
            self.mode,
            Deck::from_cards(self.deck),
            DiscardPile::from_cards(self.discard_pile),
            self.player1_hand,
            self.player2_hand,
            self.active_color,
            self.current_player,
            self.uno_declared,
            self.direction,
            self.last_action,
            self.scores,
        ))
    }
}

/// External persistence collaborator. Failures are reported, never thrown:
/// callers log and carry on from the in-memory state.
pub trait PersistenceGateway {
    /// Stores the snapshot; `None` clears it (no active game).
    fn save(&mut self, snapshot: Option<&Snapshot>) -> Result<(), PersistenceError>;

    fn load(&mut self) -> Result<Option<Snapshot>, PersistenceError>;
}
