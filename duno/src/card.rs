use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumCountMacro,
    EnumIter,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    Number,
    Action,
    Wild,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Rank {
    pub fn kind(&self) -> CardKind {
        match self {
            Rank::Number(_) => CardKind::Number,
            Rank::Skip | Rank::Reverse | Rank::DrawTwo => CardKind::Action,
            Rank::Wild | Rank::WildDrawFour => CardKind::Wild,
        }
    }

    /// Scoring value of a card left in the losing hand.
    pub fn points(&self) -> u32 {
        match self {
            Rank::Number(number) => u32::from(*number),
            Rank::Skip | Rank::Reverse | Rank::DrawTwo => 20,
            Rank::Wild | Rank::WildDrawFour => 50,
        }
    }
}

/// A single card. `order` distinguishes otherwise-identical duplicates for
/// rendering and carries no rules meaning, so comparisons ignore it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    pub color: Option<Color>,
    pub rank: Rank,
    pub order: u8,
}

impl Card {
    pub fn colored(color: Color, rank: Rank, order: u8) -> Self {
        Self {
            color: Some(color),
            rank,
            order,
        }
    }

    pub fn wild(rank: Rank, order: u8) -> Self {
        Self {
            color: None,
            rank,
            order,
        }
    }

    pub fn kind(&self) -> CardKind {
        self.rank.kind()
    }

    pub fn imprinted(self, color: Color) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(color) = self.color {
            write!(f, "{} ", color)?;
        }
        match self.rank {
            Rank::Number(number) => write!(f, "{}", number),
            Rank::Skip => write!(f, "Skip"),
            Rank::Reverse => write!(f, "Reverse"),
            Rank::DrawTwo => write!(f, "Draw 2"),
            Rank::Wild => write!(f, "Wild"),
            Rank::WildDrawFour => write!(f, "Wild Draw 4"),
        }
    }
}

pub fn hand_points(hand: &[Card]) -> u32 {
    hand.iter().map(|card| card.rank.points()).sum()
}
