//! Core memory-game state machine.
//!
//! Pure state + transitions: no rendering, no timers, no I/O. The caller
//! owns the mismatch hold (the pause before two non-matching cards flip
//! back) and reports its expiry via [`Game::resolve_mismatch`].

use rand::seq::SliceRandom;
use rand::Rng;

/// One card face.
pub type Symbol = char;

/// Distinct symbols per deck; every symbol appears on exactly two cards.
pub const PAIR_COUNT: usize = 8;
pub const CARD_COUNT: usize = PAIR_COUNT * 2;

/// Default card faces (fruit, same set on both cards of a pair).
pub const EMOJI_SYMBOLS: [Symbol; PAIR_COUNT] = ['🍎', '🍉', '🍌', '🍊', '🍇', '🍓', '🍒', '🥭'];

/// Fallback faces for terminals without emoji fonts.
pub const ASCII_SYMBOLS: [Symbol; PAIR_COUNT] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No cards flipped; any unmatched card may be picked.
    Idle,
    /// One card flipped, waiting for the second pick.
    OneFlipped,
    /// Two non-matching cards are face up; picks are ignored until the
    /// caller finishes the hold with [`Game::resolve_mismatch`].
    Resolving,
    /// All pairs matched; only a reset accepts input again.
    Won,
}

/// What a call to [`Game::pick`] did, so the caller can react (status
/// line, hold timer, win popup) without poking at internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Pick was rejected: matched/flipped position, or wrong phase.
    Ignored,
    /// First card of a pair turned face up.
    Flipped,
    /// Second card matched the first; current player scored and keeps the turn.
    Matched,
    /// Second card did not match; hold starts, turn will pass.
    Mismatched,
    /// The match just completed the board.
    Won,
}

#[derive(Debug, Clone)]
pub struct Game {
    cards: Vec<Symbol>,
    flipped: Vec<usize>,
    matched: Vec<usize>,
    scores: [u32; 2],
    current: Player,
    phase: Phase,
}

impl Game {
    /// Build a fresh board: each symbol twice, order shuffled.
    pub fn new<R: Rng>(symbols: &[Symbol; PAIR_COUNT], rng: &mut R) -> Self {
        let mut cards: Vec<Symbol> = symbols.iter().chain(symbols.iter()).copied().collect();
        cards.shuffle(rng);
        Self {
            cards,
            flipped: Vec::new(),
            matched: Vec::new(),
            scores: [0, 0],
            current: Player::One,
            phase: Phase::Idle,
        }
    }

    /// Fixed card order, no shuffle. Decks must pair up (even length).
    #[cfg(test)]
    pub(crate) fn with_cards(cards: Vec<Symbol>) -> Self {
        assert!(cards.len() % 2 == 0, "deck must hold complete pairs");
        Self {
            cards,
            flipped: Vec::new(),
            matched: Vec::new(),
            scores: [0, 0],
            current: Player::One,
            phase: Phase::Idle,
        }
    }

    /// Select the card at `index`. Invalid picks are no-ops, never errors.
    pub fn pick(&mut self, index: usize) -> PickOutcome {
        if index >= self.cards.len() {
            return PickOutcome::Ignored;
        }
        if matches!(self.phase, Phase::Resolving | Phase::Won) {
            return PickOutcome::Ignored;
        }
        if self.matched.contains(&index) || self.flipped.contains(&index) {
            return PickOutcome::Ignored;
        }

        self.flipped.push(index);
        if self.flipped.len() < 2 {
            self.phase = Phase::OneFlipped;
            return PickOutcome::Flipped;
        }

        let first = self.flipped[0];
        if self.cards[first] == self.cards[index] {
            self.matched.push(first);
            self.matched.push(index);
            self.scores[self.current.index()] += 1;
            self.flipped.clear();
            if self.matched.len() == self.cards.len() {
                self.phase = Phase::Won;
                PickOutcome::Won
            } else {
                // Correct match keeps the turn.
                self.phase = Phase::Idle;
                PickOutcome::Matched
            }
        } else {
            self.phase = Phase::Resolving;
            PickOutcome::Mismatched
        }
    }

    /// End the mismatch hold: flip both cards back and pass the turn.
    /// No-op outside [`Phase::Resolving`].
    pub fn resolve_mismatch(&mut self) {
        if self.phase != Phase::Resolving {
            return;
        }
        self.flipped.clear();
        self.current = self.current.other();
        self.phase = Phase::Idle;
    }

    /// Reshuffle the same deck and zero all per-game state.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.flipped.clear();
        self.matched.clear();
        self.scores = [0, 0];
        self.current = Player::One;
        self.phase = Phase::Idle;
    }

    /// Strictly higher score wins.
    // TODO: a tied game currently announces Player Two; product call needed
    // on whether ties deserve their own announcement.
    pub fn winner(&self) -> Player {
        if self.scores[0] > self.scores[1] {
            Player::One
        } else {
            Player::Two
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn symbol_at(&self, index: usize) -> Symbol {
        self.cards[index]
    }

    /// Face up means flipped this turn or permanently matched.
    pub fn is_face_up(&self, index: usize) -> bool {
        self.flipped.contains(&index) || self.matched.contains(&index)
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.contains(&index)
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    #[cfg(test)]
    fn matched_len(&self) -> usize {
        self.matched.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_deck() -> Vec<Symbol> {
        // A B A B C D C D E F E F G H G H
        vec![
            'A', 'B', 'A', 'B', 'C', 'D', 'C', 'D', 'E', 'F', 'E', 'F', 'G', 'H', 'G', 'H',
        ]
    }

    #[test]
    fn shuffled_deck_holds_each_symbol_twice() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let game = Game::new(&EMOJI_SYMBOLS, &mut rng);
            assert_eq!(game.card_count(), CARD_COUNT);
            for symbol in EMOJI_SYMBOLS {
                let count = (0..game.card_count())
                    .filter(|&i| game.symbol_at(i) == symbol)
                    .count();
                assert_eq!(count, 2, "symbol {symbol} appears {count} times");
            }
        }
    }

    #[test]
    fn match_scores_and_keeps_turn() {
        let mut game = Game::with_cards(sample_deck());
        assert_eq!(game.pick(0), PickOutcome::Flipped);
        assert_eq!(game.pick(2), PickOutcome::Matched);

        assert!(game.is_matched(0));
        assert!(game.is_matched(2));
        assert_eq!(game.score(Player::One), 1);
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.flipped().is_empty());
    }

    #[test]
    fn mismatch_holds_then_passes_turn() {
        let mut game = Game::with_cards(sample_deck());
        assert_eq!(game.pick(0), PickOutcome::Flipped);
        assert_eq!(game.pick(1), PickOutcome::Mismatched);
        assert_eq!(game.phase(), Phase::Resolving);

        // Both cards stay face up until the hold resolves.
        assert!(game.is_face_up(0));
        assert!(game.is_face_up(1));

        game.resolve_mismatch();
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.flipped().is_empty());
        assert!(!game.is_face_up(0));
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.score(Player::One), 0);
        assert_eq!(game.score(Player::Two), 0);
    }

    #[test]
    fn picking_matched_card_is_ignored() {
        let mut game = Game::with_cards(sample_deck());
        game.pick(0);
        game.pick(2);

        assert_eq!(game.pick(0), PickOutcome::Ignored);
        assert!(game.flipped().is_empty());
    }

    #[test]
    fn picking_same_card_twice_is_ignored() {
        let mut game = Game::with_cards(sample_deck());
        game.pick(0);
        assert_eq!(game.pick(0), PickOutcome::Ignored);
        assert_eq!(game.flipped(), &[0]);
        assert_eq!(game.phase(), Phase::OneFlipped);
    }

    #[test]
    fn third_pick_during_hold_is_ignored() {
        let mut game = Game::with_cards(sample_deck());
        game.pick(0);
        game.pick(1);
        assert_eq!(game.phase(), Phase::Resolving);

        assert_eq!(game.pick(4), PickOutcome::Ignored);
        assert_eq!(game.flipped(), &[0, 1]);
    }

    #[test]
    fn out_of_range_pick_is_ignored() {
        let mut game = Game::with_cards(sample_deck());
        assert_eq!(game.pick(99), PickOutcome::Ignored);
        assert!(game.flipped().is_empty());
    }

    #[test]
    fn resolve_outside_hold_is_noop() {
        let mut game = Game::with_cards(sample_deck());
        game.pick(0);
        game.resolve_mismatch();

        // Still one card up, still Player One.
        assert_eq!(game.flipped(), &[0]);
        assert_eq!(game.current_player(), Player::One);
    }

    #[test]
    fn scores_track_matched_pairs() {
        let mut game = Game::with_cards(sample_deck());

        // Player One matches twice, then misses; Player Two matches once.
        game.pick(0);
        game.pick(2);
        game.pick(4);
        game.pick(6);
        game.pick(1);
        game.pick(5);
        game.resolve_mismatch();
        game.pick(8);
        game.pick(10);

        assert_eq!(game.score(Player::One), 2);
        assert_eq!(game.score(Player::Two), 1);
        assert_eq!(
            (game.score(Player::One) + game.score(Player::Two)) as usize,
            game.matched_len() / 2
        );
        assert_eq!(game.matched_len() % 2, 0);
    }

    #[test]
    fn final_pair_wins_the_game() {
        let mut game = Game::with_cards(sample_deck());
        let pairs = [(0, 2), (1, 3), (4, 6), (5, 7), (8, 10), (9, 11), (12, 14), (13, 15)];

        // Player One clears the whole board without missing.
        for (i, &(a, b)) in pairs.iter().enumerate() {
            assert_eq!(game.pick(a), PickOutcome::Flipped);
            let expected = if i == pairs.len() - 1 {
                PickOutcome::Won
            } else {
                PickOutcome::Matched
            };
            assert_eq!(game.pick(b), expected);
        }

        assert_eq!(game.phase(), Phase::Won);
        assert_eq!(game.score(Player::One), PAIR_COUNT as u32);
        assert_eq!(game.winner(), Player::One);
        assert_eq!(game.pick(0), PickOutcome::Ignored);
    }

    #[test]
    fn tie_goes_to_player_two() {
        let game = Game::with_cards(sample_deck());
        assert_eq!(game.winner(), Player::Two);
    }

    #[test]
    fn higher_score_wins() {
        let mut game = Game::with_cards(sample_deck());
        game.pick(0);
        game.pick(2);
        assert_eq!(game.winner(), Player::One);
    }

    #[test]
    fn reset_starts_fresh() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut game = Game::new(&ASCII_SYMBOLS, &mut rng);

        // Play a bit, then reset.
        for i in 0..game.card_count() {
            game.pick(i);
            game.resolve_mismatch();
        }
        game.reset(&mut rng);

        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.score(Player::One), 0);
        assert_eq!(game.score(Player::Two), 0);
        assert_eq!(game.matched_len(), 0);
        assert!(game.flipped().is_empty());
        for symbol in ASCII_SYMBOLS {
            let count = (0..game.card_count())
                .filter(|&i| game.symbol_at(i) == symbol)
                .count();
            assert_eq!(count, 2);
        }
    }
}
