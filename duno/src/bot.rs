use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::card::{Card, CardKind, Color, Rank};
use crate::rules::is_playable;

/// What the bot wants to do with its turn, as data for the driver to submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotDecision {
    Play {
        hand_index: usize,
        /// Set when the chosen card is a colorless wild.
        color_choice: Option<Color>,
        /// Set when the hand holds exactly two cards, so the play leaves one:
        /// the bot declares proactively to dodge its own penalty.
        declare_uno: bool,
    },
    Draw,
}

/// Picks a card by tier: Draw 2 / Wild Draw 4 first, then Skip / Reverse,
/// then any action or wild, then anything legal; uniform random within the
/// first non-empty tier.
pub fn decide(
    hand: &[Card],
    top_card: Option<&Card>,
    active_color: Option<Color>,
    rng: &mut impl Rng,
) -> BotDecision {
    let legal: Vec<usize> = (0..hand.len())
        .filter(|index| is_playable(&hand[*index], top_card, active_color))
        .collect();

    if legal.is_empty() {
        return BotDecision::Draw;
    }

    let tier = |matches: &dyn Fn(&Card) -> bool| -> Vec<usize> {
        legal
            .iter()
            .copied()
            .filter(|index| matches(&hand[*index]))
            .collect()
    };

    let forced_draws = tier(&|card| matches!(card.rank, Rank::DrawTwo | Rank::WildDrawFour));
    let skips = tier(&|card| matches!(card.rank, Rank::Skip | Rank::Reverse));
    let non_numbers = tier(&|card| card.kind() != CardKind::Number);

    let pool = if !forced_draws.is_empty() {
        forced_draws
    } else if !skips.is_empty() {
        skips
    } else if !non_numbers.is_empty() {
        non_numbers
    } else {
        legal
    };

    let hand_index = *pool.choose(rng).expect("the chosen tier is non-empty");

    let card = hand[hand_index];
    let color_choice = if card.kind() == CardKind::Wild && card.color.is_none() {
        Some(preferred_color(hand, hand_index))
    } else {
        None
    };

    BotDecision::Play {
        hand_index,
        color_choice,
        declare_uno: hand.len() == 2,
    }
}

/// The most frequent color among the rest of the hand. Ties, and a hand with
/// no colored cards left, fall back to the first color in declaration order.
pub fn preferred_color(hand: &[Card], excluding: usize) -> Color {
    let mut best = Color::iter().next().expect("there is always a first color");
    let mut best_count = 0;

    for color in Color::iter() {
        let count = hand
            .iter()
            .enumerate()
            .filter(|(index, card)| *index != excluding && card.color == Some(color))
            .count();
        if count > best_count {
            best = color;
            best_count = count;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn table() -> (Card, Option<Color>) {
        (Card::colored(Color::Red, Rank::Number(7), 1), Some(Color::Red))
    }

    #[test]
    fn draws_when_nothing_is_playable() {
        let (top, active) = table();
        let hand = vec![
            Card::colored(Color::Blue, Rank::Number(3), 1),
            Card::colored(Color::Green, Rank::Number(4), 1),
        ];

        assert_eq!(decide(&hand, Some(&top), active, &mut rng()), BotDecision::Draw);
    }

    #[test]
    fn prefers_forced_draw_cards_over_everything() {
        let (top, active) = table();
        let hand = vec![
            Card::colored(Color::Red, Rank::Number(2), 1),
            Card::colored(Color::Red, Rank::Skip, 1),
            Card::colored(Color::Red, Rank::DrawTwo, 1),
        ];

        match decide(&hand, Some(&top), active, &mut rng()) {
            BotDecision::Play { hand_index, .. } => assert_eq!(hand_index, 2),
            BotDecision::Draw => panic!("expected a play"),
        }
    }

    #[test]
    fn prefers_skips_when_no_forced_draws_are_legal() {
        let (top, active) = table();
        let hand = vec![
            Card::colored(Color::Red, Rank::Number(2), 1),
            Card::colored(Color::Red, Rank::Reverse, 1),
            Card::colored(Color::Blue, Rank::DrawTwo, 1),
        ];

        match decide(&hand, Some(&top), active, &mut rng()) {
            BotDecision::Play { hand_index, .. } => assert_eq!(hand_index, 1),
            BotDecision::Draw => panic!("expected a play"),
        }
    }

    #[test]
    fn falls_back_to_any_legal_card() {
        let (top, active) = table();
        let hand = vec![
            Card::colored(Color::Blue, Rank::Number(3), 1),
            Card::colored(Color::Red, Rank::Number(2), 1),
        ];

        match decide(&hand, Some(&top), active, &mut rng()) {
            BotDecision::Play {
                hand_index,
                color_choice,
                declare_uno,
            } => {
                assert_eq!(hand_index, 1);
                assert_eq!(color_choice, None);
                assert!(declare_uno);
            }
            BotDecision::Draw => panic!("expected a play"),
        }
    }

    #[test]
    fn wild_play_carries_the_most_frequent_color() {
        let (top, active) = table();
        let hand = vec![
            Card::wild(Rank::Wild, 1),
            Card::colored(Color::Green, Rank::Number(3), 1),
            Card::colored(Color::Green, Rank::Number(4), 1),
            Card::colored(Color::Blue, Rank::Number(5), 1),
        ];

        match decide(&hand, Some(&top), active, &mut rng()) {
            BotDecision::Play {
                hand_index,
                color_choice,
                ..
            } => {
                assert_eq!(hand_index, 0);
                assert_eq!(color_choice, Some(Color::Green));
            }
            BotDecision::Draw => panic!("expected a play"),
        }
    }

    #[test]
    fn color_ties_fall_back_to_declaration_order() {
        let hand = vec![
            Card::wild(Rank::Wild, 1),
            Card::colored(Color::Yellow, Rank::Number(3), 1),
            Card::colored(Color::Blue, Rank::Number(4), 1),
        ];
        assert_eq!(preferred_color(&hand, 0), Color::Blue);
    }

    #[test]
    fn all_wild_hand_falls_back_to_red() {
        let hand = vec![Card::wild(Rank::Wild, 1), Card::wild(Rank::WildDrawFour, 1)];
        assert_eq!(preferred_color(&hand, 0), Color::Red);
    }

    #[test]
    fn does_not_declare_uno_with_a_larger_hand() {
        let (top, active) = table();
        let hand = vec![
            Card::colored(Color::Red, Rank::Number(2), 1),
            Card::colored(Color::Blue, Rank::Number(3), 1),
            Card::colored(Color::Green, Rank::Number(4), 1),
        ];

        match decide(&hand, Some(&top), active, &mut rng()) {
            BotDecision::Play { declare_uno, .. } => assert!(!declare_uno),
            BotDecision::Draw => panic!("expected a play"),
        }
    }
}
