use crate::card::{Card, Color};
use crate::player::Player;

/// What a committed operation did, for the caller to render, announce, and
/// schedule follow-up work from. Replaces in-engine callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CardPlayed {
        player: Player,
        card: Card,
    },
    /// A colorless wild was offered; the play is suspended until
    /// `resolve_wild_color` supplies one of the four colors.
    AwaitingColorChoice {
        player: Player,
    },
    ColorChosen {
        player: Player,
        color: Color,
    },
    TurnChanged {
        to: Player,
    },
    OpponentSkipped {
        by: Player,
        skipped: Player,
    },
    /// A Draw 2 / Wild Draw 4 resolution. `drawn` may fall short of
    /// `requested` when the deck and discard pile are jointly exhausted.
    DrawEffect {
        target: Player,
        requested: usize,
        drawn: usize,
    },
    /// A voluntary draw by the player whose turn it is.
    CardsDrawn {
        player: Player,
        count: usize,
    },
    DeckReshuffled,
    /// A hand just dropped to one card without a declaration; the caller
    /// should start the penalty timer.
    UnoWindowOpened {
        player: Player,
    },
    UnoDeclared {
        player: Player,
    },
    UnoPenalty {
        player: Player,
        drawn: usize,
    },
    GameOver {
        winner: Player,
        points: u32,
    },
}
