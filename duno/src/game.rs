use rand::{seq::IteratorRandom, Rng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::card::{hand_points, Card, CardKind, Color, Rank};
use crate::constants::{STARTING_HAND_SIZE, UNO_PENALTY_CARDS};
use crate::deck::{draw, Deck, DiscardPile};
use crate::error::{GameError, Result};
use crate::event::GameEvent;
use crate::player::{Player, Scores};
use crate::rules::is_playable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    Solo,
    PassAndPlay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Clockwise,
    Counterclockwise,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::Counterclockwise,
            Direction::Counterclockwise => Direction::Clockwise,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove,
    AwaitingColorChoice { hand_index: usize },
    GameOver { winner: Player },
}

/// The authoritative game state. Every mutation goes through one of the
/// operations below; each either commits and reports what happened as
/// `GameEvent`s or fails with the state untouched.
#[derive(Clone, Debug)]
pub struct GameState {
    mode: GameMode,
    deck: Deck,
    discard: DiscardPile,
    player1_hand: Vec<Card>,
    player2_hand: Vec<Card>,
    active_color: Color,
    current_player: Player,
    uno_declared: bool,
    direction: Direction,
    last_action: Option<Rank>,
    phase: Phase,
    scores: Scores,
}

impl GameState {
    /// Fresh shuffled deck, 7 cards to each hand, one card flipped to the
    /// discard pile. A flipped wild gets a uniformly random color imprinted
    /// before the first move is accepted.
    pub fn new(mode: GameMode, rng: &mut impl Rng) -> Self {
        let mut deck = Deck::build();
        deck.shuffle(rng);

        let player1_hand = deck.take(STARTING_HAND_SIZE);
        let player2_hand = deck.take(STARTING_HAND_SIZE);

        let mut first_card = deck
            .take(1)
            .pop()
            .expect("a 108 card deck always covers two hands and the flip");

        if first_card.color.is_none() {
            let color = Color::iter()
                .choose(rng)
                .expect("there is always at least one color");
            first_card = first_card.imprinted(color);
        }

        let active_color = first_card
            .color
            .expect("the flipped card has a color by now");

        debug!(?mode, %first_card, "new game started");

        Self {
            mode,
            deck,
            discard: DiscardPile::from_cards(vec![first_card]),
            player1_hand,
            player2_hand,
            active_color,
            current_player: Player::One,
            uno_declared: false,
            direction: Direction::Clockwise,
            last_action: None,
            phase: Phase::AwaitingMove,
            scores: Scores::default(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        mode: GameMode,
        deck: Deck,
        discard: DiscardPile,
        player1_hand: Vec<Card>,
        player2_hand: Vec<Card>,
        active_color: Color,
        current_player: Player,
        uno_declared: bool,
        direction: Direction,
        last_action: Option<Rank>,
        scores: Scores,
    ) -> Self {
        Self {
            mode,
            deck,
            discard,
            player1_hand,
            player2_hand,
            active_color,
            current_player,
            uno_declared,
            direction,
            last_action,
            phase: Phase::AwaitingMove,
            scores,
        }
    }

    /// Plays the card at `hand_index` from the current player's hand.
    /// A colorless wild suspends in `AwaitingColorChoice` without touching
    /// hands or piles; everything else commits fully.
    pub fn attempt_play(&mut self, hand_index: usize, rng: &mut impl Rng) -> Result<Vec<GameEvent>> {
        self.require_awaiting_move()?;

        let card = *self
            .hand(self.current_player)
            .get(hand_index)
            .ok_or(GameError::IllegalMove("no card at that position"))?;

        if !is_playable(&card, self.discard.top(), Some(self.active_color)) {
            return Err(GameError::IllegalMove(
                "card matches neither the active color nor the top card",
            ));
        }

        if card.kind() == CardKind::Wild && card.color.is_none() {
            self.phase = Phase::AwaitingColorChoice { hand_index };
            return Ok(vec![GameEvent::AwaitingColorChoice {
                player: self.current_player,
            }]);
        }

        Ok(self.commit_play(hand_index, rng))
    }

    /// Supplies the color for the wild play suspended by `attempt_play`,
    /// then commits that play.
    pub fn resolve_wild_color(
        &mut self,
        color: Color,
        rng: &mut impl Rng,
    ) -> Result<Vec<GameEvent>> {
        let hand_index = match self.phase {
            Phase::AwaitingColorChoice { hand_index } => hand_index,
            _ => return Err(GameError::IllegalMove("no wild card is waiting for a color")),
        };

        let player = self.current_player;
        let card = &mut self.hand_mut(player)[hand_index];
        *card = card.imprinted(color);
        self.phase = Phase::AwaitingMove;

        let mut events = vec![GameEvent::ColorChosen { player, color }];
        events.extend(self.commit_play(hand_index, rng));
        Ok(events)
    }

    /// Draws one card for the current player; the turn passes unconditionally.
    /// When the deck and discard pile jointly cannot supply a card the state
    /// is left untouched and the turn is retained.
    pub fn attempt_draw(&mut self, rng: &mut impl Rng) -> Result<Vec<GameEvent>> {
        self.require_awaiting_move()?;

        if self.deck.is_empty() && self.discard.len() <= 1 {
            return Err(GameError::DeckExhausted);
        }

        let player = self.current_player;
        let result = draw(1, &mut self.deck, &mut self.discard, rng);
        let count = result.drawn.len();
        self.hand_mut(player).extend(result.drawn);
        self.uno_declared = false;
        self.current_player = player.opponent();

        let mut events = Vec::new();
        if result.reshuffled {
            events.push(GameEvent::DeckReshuffled);
        }
        events.push(GameEvent::CardsDrawn { player, count });
        events.push(GameEvent::TurnChanged {
            to: self.current_player,
        });
        Ok(events)
    }

    /// Asserts UNO. Only meaningful inside the penalty window; idempotent and
    /// harmless everywhere else.
    pub fn declare_uno(&mut self) -> Vec<GameEvent> {
        if matches!(self.phase, Phase::GameOver { .. }) || self.uno_declared {
            return Vec::new();
        }
        self.uno_declared = true;
        vec![GameEvent::UnoDeclared {
            player: self.current_player,
        }]
    }

    /// The deferred penalty check. Re-reads live state: a finished game, a
    /// hand that is no longer at one card, or a declaration all suppress the
    /// penalty. A declaration is consumed here so the next window starts
    /// clean.
    pub fn apply_uno_penalty(&mut self, player: Player, rng: &mut impl Rng) -> Vec<GameEvent> {
        if matches!(self.phase, Phase::GameOver { .. }) {
            return Vec::new();
        }
        if self.uno_declared {
            self.uno_declared = false;
            return Vec::new();
        }
        if self.hand(player).len() != 1 {
            return Vec::new();
        }

        let result = draw(UNO_PENALTY_CARDS, &mut self.deck, &mut self.discard, rng);
        let drawn = result.drawn.len();
        self.hand_mut(player).extend(result.drawn);

        debug!(%player, drawn, "uno penalty applied");

        let mut events = Vec::new();
        if result.reshuffled {
            events.push(GameEvent::DeckReshuffled);
        }
        if drawn > 0 {
            events.push(GameEvent::UnoPenalty { player, drawn });
        }
        events
    }

    fn commit_play(&mut self, hand_index: usize, rng: &mut impl Rng) -> Vec<GameEvent> {
        let player = self.current_player;
        let opponent = player.opponent();

        let mut card = self.hand_mut(player).remove(hand_index);
        if card.color.is_none() {
            card = card.imprinted(self.active_color);
        }
        let color = card.color.expect("a committed card always carries a color");

        self.discard.put(card);
        self.active_color = color;
        self.last_action = Some(card.rank);

        debug!(%player, %card, "card played");

        let mut events = vec![GameEvent::CardPlayed { player, card }];

        // An emptied hand ends the game before any effect resolves; the
        // opponent does not draw off a winning Draw 2 / Wild Draw 4.
        if self.hand(player).is_empty() {
            let points = hand_points(self.hand(opponent));
            self.scores.award(player, points);
            self.phase = Phase::GameOver { winner: player };
            events.push(GameEvent::GameOver {
                winner: player,
                points,
            });
            return events;
        }

        match card.rank {
            Rank::Number(_) | Rank::Wild => {
                self.current_player = opponent;
                events.push(GameEvent::TurnChanged { to: opponent });
            }
            Rank::Skip | Rank::Reverse => {
                if card.rank == Rank::Reverse {
                    self.direction = self.direction.flipped();
                }
                // Two players: the opponent sits out and the same seat moves
                // again.
                events.push(GameEvent::OpponentSkipped {
                    by: player,
                    skipped: opponent,
                });
            }
            Rank::DrawTwo => {
                events.extend(self.forced_draw(opponent, 2, rng));
            }
            Rank::WildDrawFour => {
                events.extend(self.forced_draw(opponent, 4, rng));
            }
        }

        if self.hand(player).len() == 1 {
            if !self.uno_declared {
                events.push(GameEvent::UnoWindowOpened { player });
            }
        } else {
            // A declaration only covers the window around a one-card hand;
            // anything older expires here.
            self.uno_declared = false;
        }

        events
    }

    fn forced_draw(&mut self, target: Player, requested: usize, rng: &mut impl Rng) -> Vec<GameEvent> {
        let result = draw(requested, &mut self.deck, &mut self.discard, rng);
        let drawn = result.drawn.len();
        self.hand_mut(target).extend(result.drawn);

        let mut events = Vec::new();
        if result.reshuffled {
            events.push(GameEvent::DeckReshuffled);
        }
        events.push(GameEvent::DrawEffect {
            target,
            requested,
            drawn,
        });
        events
    }

    fn require_awaiting_move(&self) -> Result<()> {
        match self.phase {
            Phase::AwaitingMove => Ok(()),
            Phase::AwaitingColorChoice { .. } => {
                Err(GameError::IllegalMove("a wild card is waiting for a color"))
            }
            Phase::GameOver { .. } => Err(GameError::IllegalMove("the game is over")),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard.top()
    }

    pub fn uno_declared(&self) -> bool {
        self.uno_declared
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn last_action(&self) -> Option<Rank> {
        self.last_action
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn discard(&self) -> &DiscardPile {
        &self.discard
    }

    pub fn hand(&self, player: Player) -> &[Card] {
        match player {
            Player::One => &self.player1_hand,
            Player::Two => &self.player2_hand,
        }
    }

    pub fn hand_mut(&mut self, player: Player) -> &mut Vec<Card> {
        match player {
            Player::One => &mut self.player1_hand,
            Player::Two => &mut self.player2_hand,
        }
    }

    /// Cards across all four containers; 108 for any reachable state.
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.discard.len() + self.player1_hand.len() + self.player2_hand.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn new_game() -> GameState {
        GameState::new(GameMode::PassAndPlay, &mut rng())
    }

    /// Replaces the current player's first card with one matching the live
    /// active color, so the play below is always legal.
    fn rig_hand(state: &mut GameState, rank: Rank) {
        let color = state.active_color();
        let player = state.current_player();
        state.hand_mut(player)[0] = Card::colored(color, rank, 1);
    }

    #[test]
    fn new_game_deals_seven_cards_each() {
        let state = new_game();
        assert_eq!(state.hand(Player::One).len(), 7);
        assert_eq!(state.hand(Player::Two).len(), 7);
        assert_eq!(state.discard().len(), 1);
        assert_eq!(state.deck().len(), 108 - 7 - 7 - 1);
        assert_eq!(state.total_cards(), 108);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.phase(), Phase::AwaitingMove);
    }

    #[test]
    fn new_game_active_color_matches_flipped_card() {
        let state = new_game();
        assert_eq!(state.top_card().and_then(|card| card.color), Some(state.active_color()));
    }

    #[test]
    fn new_game_imprints_a_random_color_on_a_flipped_wild() {
        // Hunt for a seed whose shuffle flips a wild as the 15th card, then
        // replay that seed through the real constructor.
        let wild_seed = (0..10_000)
            .find(|seed| {
                let mut rng = StdRng::seed_from_u64(*seed);
                let mut deck = Deck::build();
                deck.shuffle(&mut rng);
                deck.cards()[2 * STARTING_HAND_SIZE].kind() == CardKind::Wild
            })
            .expect("some seed flips a wild first");

        let mut rng = StdRng::seed_from_u64(wild_seed);
        let state = GameState::new(GameMode::Solo, &mut rng);

        let top = state.top_card().expect("a new game has a top card");
        assert_eq!(top.kind(), CardKind::Wild);
        assert_eq!(top.color, Some(state.active_color()));
    }

    #[test]
    fn attempt_play_rejects_an_out_of_range_index() {
        let mut state = new_game();
        let error = state.attempt_play(7, &mut rng()).unwrap_err();
        assert!(matches!(error, GameError::IllegalMove(_)));
        assert_eq!(state.hand(Player::One).len(), 7);
        assert_eq!(state.total_cards(), 108);
    }

    #[test]
    fn attempt_play_rejects_a_mismatched_card() {
        let mut state = new_game();
        // Force a card that matches neither color nor rank: pick a color
        // other than the active one and a rank other than the top card's.
        let other_color = Color::iter()
            .find(|color| *color != state.active_color())
            .expect("four colors exist");
        let top_rank = state.top_card().expect("top card exists").rank;
        let other_rank = if top_rank == Rank::Number(1) {
            Rank::Number(2)
        } else {
            Rank::Number(1)
        };
        state.hand_mut(Player::One)[0] = Card::colored(other_color, other_rank, 1);

        let error = state.attempt_play(0, &mut rng()).unwrap_err();
        assert!(matches!(error, GameError::IllegalMove(_)));
        assert_eq!(state.hand(Player::One).len(), 7);
        assert_eq!(state.current_player(), Player::One);
    }

    #[test]
    fn number_card_passes_the_turn() {
        let mut state = new_game();
        rig_hand(&mut state, Rank::Number(1));

        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.hand(Player::One).len(), 6);
        assert_eq!(state.last_action(), Some(Rank::Number(1)));
        assert!(events.contains(&GameEvent::TurnChanged { to: Player::Two }));
        assert_eq!(state.total_cards(), 108);
    }

    #[test]
    fn skip_retains_the_turn() {
        let mut state = new_game();
        rig_hand(&mut state, Rank::Skip);

        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert_eq!(state.current_player(), Player::One);
        assert!(events.contains(&GameEvent::OpponentSkipped {
            by: Player::One,
            skipped: Player::Two,
        }));
    }

    #[test]
    fn reverse_acts_as_skip_and_flips_direction() {
        let mut state = new_game();
        rig_hand(&mut state, Rank::Reverse);

        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.direction(), Direction::Counterclockwise);
        assert!(events.contains(&GameEvent::OpponentSkipped {
            by: Player::One,
            skipped: Player::Two,
        }));
    }

    #[test]
    fn draw_two_feeds_the_opponent_and_retains_the_turn() {
        let mut state = new_game();
        rig_hand(&mut state, Rank::DrawTwo);

        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.hand(Player::Two).len(), 9);
        assert!(events.contains(&GameEvent::DrawEffect {
            target: Player::Two,
            requested: 2,
            drawn: 2,
        }));
        assert_eq!(state.total_cards(), 108);
    }

    #[test]
    fn colorless_wild_suspends_until_a_color_arrives() {
        let mut state = new_game();
        state.hand_mut(Player::One)[0] = Card::wild(Rank::Wild, 1);

        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert_eq!(events, vec![GameEvent::AwaitingColorChoice { player: Player::One }]);
        assert_eq!(state.hand(Player::One).len(), 7);
        assert_eq!(state.discard().len(), 1);
        assert!(matches!(state.phase(), Phase::AwaitingColorChoice { hand_index: 0 }));

        // No other operation is accepted while the choice is pending.
        assert!(state.attempt_draw(&mut rng()).is_err());

        let events = state.resolve_wild_color(Color::Green, &mut rng()).unwrap();

        assert_eq!(state.active_color(), Color::Green);
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.hand(Player::One).len(), 6);
        assert!(events.contains(&GameEvent::ColorChosen {
            player: Player::One,
            color: Color::Green,
        }));
        assert!(events.contains(&GameEvent::TurnChanged { to: Player::Two }));
    }

    #[test]
    fn wild_draw_four_feeds_four_and_retains_the_turn() {
        let mut state = new_game();
        state.hand_mut(Player::One)[0] = Card::wild(Rank::WildDrawFour, 1);

        state.attempt_play(0, &mut rng()).unwrap();
        let events = state.resolve_wild_color(Color::Red, &mut rng()).unwrap();

        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.active_color(), Color::Red);
        assert_eq!(state.hand(Player::Two).len(), 11);
        assert!(events.contains(&GameEvent::DrawEffect {
            target: Player::Two,
            requested: 4,
            drawn: 4,
        }));
    }

    #[test]
    fn attempt_draw_passes_the_turn_and_resets_uno() {
        let mut state = new_game();
        state.declare_uno();
        assert!(state.uno_declared());

        let events = state.attempt_draw(&mut rng()).unwrap();

        assert_eq!(state.hand(Player::One).len(), 8);
        assert_eq!(state.current_player(), Player::Two);
        assert!(!state.uno_declared());
        assert!(events.contains(&GameEvent::CardsDrawn {
            player: Player::One,
            count: 1,
        }));
        assert!(events.contains(&GameEvent::TurnChanged { to: Player::Two }));
    }

    #[test]
    fn attempt_draw_reports_exhaustion_without_mutating() {
        let mut state = new_game();
        // Empty the deck into player one's hand; only the top discard is left.
        let remaining = state.deck().len();
        let cards = state.deck.take(remaining);
        state.hand_mut(Player::One).extend(cards);

        let error = state.attempt_draw(&mut rng()).unwrap_err();

        assert_eq!(error, GameError::DeckExhausted);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.total_cards(), 108);
    }

    #[test]
    fn play_to_one_card_opens_the_uno_window() {
        let mut state = new_game();
        let color = state.active_color();
        state.hand_mut(Player::One).truncate(2);
        state.hand_mut(Player::One)[0] = Card::colored(color, Rank::Number(3), 1);

        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert_eq!(state.hand(Player::One).len(), 1);
        assert!(events.contains(&GameEvent::UnoWindowOpened { player: Player::One }));
    }

    #[test]
    fn uno_window_does_not_open_after_a_declaration() {
        let mut state = new_game();
        let color = state.active_color();
        state.hand_mut(Player::One).truncate(2);
        state.hand_mut(Player::One)[0] = Card::colored(color, Rank::Number(3), 1);

        state.declare_uno();
        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert!(!events
            .iter()
            .any(|event| matches!(event, GameEvent::UnoWindowOpened { .. })));
    }

    #[test]
    fn uno_penalty_draws_two_when_undeclared() {
        let mut state = new_game();
        state.hand_mut(Player::One).truncate(1);

        let events = state.apply_uno_penalty(Player::One, &mut rng());

        assert_eq!(state.hand(Player::One).len(), 3);
        assert!(events.contains(&GameEvent::UnoPenalty {
            player: Player::One,
            drawn: 2,
        }));
    }

    #[test]
    fn uno_penalty_is_suppressed_and_consumes_the_declaration() {
        let mut state = new_game();
        state.hand_mut(Player::One).truncate(1);
        state.declare_uno();

        let events = state.apply_uno_penalty(Player::One, &mut rng());

        assert!(events.is_empty());
        assert_eq!(state.hand(Player::One).len(), 1);
        assert!(!state.uno_declared());
    }

    #[test]
    fn uno_penalty_skips_hands_no_longer_at_one_card() {
        let mut state = new_game();
        let events = state.apply_uno_penalty(Player::One, &mut rng());
        assert!(events.is_empty());
        assert_eq!(state.hand(Player::One).len(), 7);
    }

    #[test]
    fn a_stale_declaration_expires_on_the_next_play() {
        let mut state = new_game();
        state.declare_uno();
        rig_hand(&mut state, Rank::Number(1));

        state.attempt_play(0, &mut rng()).unwrap();

        assert!(!state.uno_declared());
    }

    #[test]
    fn declare_uno_is_idempotent() {
        let mut state = new_game();
        assert_eq!(state.declare_uno().len(), 1);
        assert!(state.declare_uno().is_empty());
        assert!(state.uno_declared());
    }

    #[test]
    fn emptying_the_hand_wins_immediately() {
        let mut state = new_game();
        let color = state.active_color();
        let opponent_points = hand_points(state.hand(Player::Two));
        state.hand_mut(Player::One).truncate(1);
        state.hand_mut(Player::One)[0] = Card::colored(color, Rank::Number(5), 1);

        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert_eq!(state.phase(), Phase::GameOver { winner: Player::One });
        assert!(events.contains(&GameEvent::GameOver {
            winner: Player::One,
            points: opponent_points,
        }));
        assert_eq!(state.scores().player1, opponent_points);
        assert!(state.attempt_play(0, &mut rng()).is_err());
        assert!(state.attempt_draw(&mut rng()).is_err());
    }

    #[test]
    fn winning_with_draw_two_skips_the_opponent_draw() {
        let mut state = new_game();
        let color = state.active_color();
        state.hand_mut(Player::One).truncate(1);
        state.hand_mut(Player::One)[0] = Card::colored(color, Rank::DrawTwo, 1);

        let events = state.attempt_play(0, &mut rng()).unwrap();

        assert_eq!(state.phase(), Phase::GameOver { winner: Player::One });
        assert_eq!(state.hand(Player::Two).len(), 7);
        assert!(!events
            .iter()
            .any(|event| matches!(event, GameEvent::DrawEffect { .. })));
    }

    #[test]
    fn operations_conserve_the_card_count() {
        let mut rng = rng();
        let mut state = GameState::new(GameMode::PassAndPlay, &mut rng);

        for _ in 0..40 {
            if matches!(state.phase(), Phase::GameOver { .. }) {
                break;
            }
            let player = state.current_player();
            let playable = (0..state.hand(player).len()).find(|index| {
                is_playable(
                    &state.hand(player)[*index],
                    state.top_card(),
                    Some(state.active_color()),
                )
            });
            match playable {
                Some(index) => {
                    let events = state.attempt_play(index, &mut rng).unwrap();
                    if events
                        .iter()
                        .any(|event| matches!(event, GameEvent::AwaitingColorChoice { .. }))
                    {
                        state.resolve_wild_color(Color::Blue, &mut rng).unwrap();
                    }
                }
                None => {
                    if state.attempt_draw(&mut rng).is_err() {
                        break;
                    }
                }
            }
            assert_eq!(state.total_cards(), 108);
        }
    }
}
