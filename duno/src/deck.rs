use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::{
    card::{Card, CardKind, Color, Rank},
    constants::*,
};

#[derive(Clone, Debug)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    /// Deterministic 108-card composition, unshuffled.
    pub fn build() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

        for color in Color::iter() {
            for order in 1..=ZERO_CARDS_PER_COLOR {
                cards.push(Card::colored(color, Rank::Number(0), order));
            }

            for number in NONZERO_NUMBER_VALUES {
                for order in 1..=NONZERO_COPIES_PER_COLOR {
                    cards.push(Card::colored(color, Rank::Number(*number), order));
                }
            }

            for order in 1..=SKIP_CARDS_PER_COLOR {
                cards.push(Card::colored(color, Rank::Skip, order));
            }

            for order in 1..=REVERSE_CARDS_PER_COLOR {
                cards.push(Card::colored(color, Rank::Reverse, order));
            }

            for order in 1..=DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::colored(color, Rank::DrawTwo, order));
            }
        }

        for order in 1..=WILD_CARDS_IN_DECK {
            cards.push(Card::wild(Rank::Wild, order));
        }

        for order in 1..=WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::wild(Rank::WildDrawFour, order));
        }

        Self(cards)
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.0.shuffle(rng);
    }

    /// Removes up to `count` cards from the front.
    pub(crate) fn take(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.0.len());
        self.0.drain(0..count).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }
}

/// Played cards, most recent first. Only the top card is live for matching.
#[derive(Clone, Debug)]
pub struct DiscardPile(pub(crate) Vec<Card>);

impl DiscardPile {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn top(&self) -> Option<&Card> {
        self.0.first()
    }

    pub(crate) fn put(&mut self, card: Card) {
        self.0.insert(0, card);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }
}

#[derive(Debug)]
pub struct DrawResult {
    pub drawn: Vec<Card>,
    pub reshuffled: bool,
}

/// Draws up to `count` cards, recycling all but the top discard card into the
/// deck first when the deck alone cannot satisfy the draw. Never fabricates
/// cards; `drawn` may come up short when both piles are exhausted.
pub fn draw(
    count: usize,
    deck: &mut Deck,
    discard: &mut DiscardPile,
    rng: &mut impl Rng,
) -> DrawResult {
    let mut reshuffled = false;

    if deck.len() < count && discard.len() > 1 {
        let mut recycled = discard.0.split_off(1);
        // A recycled wild goes back to being colorless.
        for card in &mut recycled {
            if card.kind() == CardKind::Wild {
                card.color = None;
            }
        }
        recycled.shuffle(rng);
        deck.0.extend(recycled);
        reshuffled = true;
    }

    let drawn = deck.take(count);
    DrawResult { drawn, reshuffled }
}
