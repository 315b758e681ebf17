use crate::card::{Card, CardKind, Color};

/// Whether `card` may legally land on `top_card` under `active_color`.
/// Total: absent table state makes every card unplayable.
pub fn is_playable(card: &Card, top_card: Option<&Card>, active_color: Option<Color>) -> bool {
    let (top_card, active_color) = match (top_card, active_color) {
        (Some(top_card), Some(active_color)) => (top_card, active_color),
        _ => return false,
    };

    if card.kind() == CardKind::Wild {
        return true;
    }

    card.color == Some(active_color) || card.color == top_card.color || card.rank == top_card.rank
}
