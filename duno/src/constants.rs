use strum::EnumCount;

use crate::card::Color;

pub(crate) const ZERO_CARDS_PER_COLOR: u8 = 1;
pub(crate) const NONZERO_NUMBER_VALUES: &[u8] = &[1, 2, 3, 4, 5, 6, 7, 8, 9];
pub(crate) const NONZERO_COPIES_PER_COLOR: u8 = 2;
pub(crate) const SKIP_CARDS_PER_COLOR: u8 = 2;
pub(crate) const REVERSE_CARDS_PER_COLOR: u8 = 2;
pub(crate) const DRAW_TWO_CARDS_PER_COLOR: u8 = 2;

pub(crate) const WILD_CARDS_IN_DECK: u8 = 4;
pub(crate) const WILD_DRAW_FOUR_CARDS_IN_DECK: u8 = 4;

pub(crate) const CARDS_PER_COLOR: u8 = ZERO_CARDS_PER_COLOR
    + NONZERO_NUMBER_VALUES.len() as u8 * NONZERO_COPIES_PER_COLOR
    + SKIP_CARDS_PER_COLOR
    + REVERSE_CARDS_PER_COLOR
    + DRAW_TWO_CARDS_PER_COLOR;

pub const TOTAL_CARDS_IN_DECK: u8 = CARDS_PER_COLOR * Color::COUNT as u8
    + WILD_CARDS_IN_DECK
    + WILD_DRAW_FOUR_CARDS_IN_DECK;

/// Cards dealt to each hand when a game starts.
pub const STARTING_HAND_SIZE: usize = 7;

pub const UNO_PENALTY_CARDS: usize = 2;
