//! Game state machine sequencing human and computer plies.

use rand::Rng;

use crate::error::Error;
use crate::heaps::{Heaps, Move};
use crate::strategy;

/// One of the two players of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Player {
    Computer,
    Human,
}

impl Player {
    /// Opposite player
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Player {
        match self {
            Player::Computer => Player::Human,
            Player::Human => Player::Computer,
        }
    }
}

/// Computer opponent variant, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Opponent {
    /// Plays the winning move whenever one exists
    Perfect,
    /// Plays like [`Opponent::Perfect`], except for one deliberate blunder
    /// per game that hands the human a winnable position
    Fallible,
}

/// One-shot trigger for the fallible opponent's blunder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MistakeTrigger {
    /// Blunder on the first computer ply with fewer stones remaining than this
    Armed(u32),
    /// Already blundered, play perfectly for the rest of the game
    Fired,
}

/// How initial heap sizes are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeapSizing {
    /// Every heap starts with the same number of stones
    Fixed(u32),
    /// Each heap size is drawn uniformly from the inclusive range
    Random {
        /// Smallest allowed heap size
        min: u32,
        /// Largest allowed heap size
        max: u32,
    },
}

/// Immutable game configuration, resolved once at session setup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Setup {
    /// Number of heaps. One heap is legal but trivial; more than three
    /// makes for a long game
    pub heap_count: usize,
    /// Initial heap sizing policy
    pub sizing: HeapSizing,
    /// Fractions `(min, max)` of the initial stone total between which the
    /// fallible opponent's blunder threshold is drawn
    pub mistake_window: (f64, f64),
}

impl Default for Setup {
    /// Three heaps of 15 to 25 stones, blunder threshold between 30% and
    /// 70% of the initial total
    fn default() -> Self {
        Self {
            heap_count: 3,
            sizing: HeapSizing::Random { min: 15, max: 25 },
            mistake_window: (0.3, 0.7),
        }
    }
}

impl Setup {
    fn validate(&self) -> Result<(), Error> {
        if self.heap_count == 0 {
            return Err(Error::NoHeaps);
        }
        match self.sizing {
            HeapSizing::Fixed(0) => return Err(Error::EmptyHeaps),
            HeapSizing::Fixed(_) => {}
            HeapSizing::Random { min, max } => {
                if min < 1 || min > max {
                    return Err(Error::HeapSizeRange { min, max });
                }
            }
        }
        let (min, max) = self.mistake_window;
        if !(min > 0.0 && min <= max && max < 1.0) {
            return Err(Error::MistakeWindow { min, max });
        }
        Ok(())
    }
}

/// A single game from setup to the last stone.
///
/// Owns the heaps and the turn order; all randomness flows through the
/// caller-supplied [`Rng`], so a seeded generator and a fixed sequence of
/// human moves replay the exact same game.
#[derive(Debug, Clone)]
pub struct GameSession {
    heaps: Heaps,
    player: Player,
    opponent: Opponent,
    trigger: MistakeTrigger,
}

impl GameSession {
    /// Start a new game from a setup.
    ///
    /// The computer moves first unless the initial nim-sum is zero: moving
    /// first from such a position loses, so the human is made to start
    /// instead, whichever opponent is playing. The blunder threshold is
    /// drawn once, uniformly within the mistake window scaled by the
    /// initial stone total.
    pub fn new(setup: &Setup, opponent: Opponent, rng: &mut impl Rng) -> Result<Self, Error> {
        setup.validate()?;
        let heaps = match setup.sizing {
            HeapSizing::Fixed(size) => Heaps::uniform(setup.heap_count, size),
            HeapSizing::Random { min, max } => Heaps::random(setup.heap_count, min..=max, rng),
        };
        let total = f64::from(heaps.total());
        let (min, max) = setup.mistake_window;
        let threshold = rng.random_range((min * total) as u32..=(max * total) as u32);
        Ok(Self::start(heaps, opponent, threshold))
    }

    /// Start a new game from explicit heaps and a fixed blunder threshold.
    ///
    /// The starting player follows the same nim-sum rule as [`Self::new`].
    pub fn with_heaps(heaps: Heaps, opponent: Opponent, threshold: u32) -> Result<Self, Error> {
        if heaps.count() == 0 {
            return Err(Error::NoHeaps);
        }
        if heaps.is_cleared() {
            return Err(Error::EmptyHeaps);
        }
        Ok(Self::start(heaps, opponent, threshold))
    }

    fn start(heaps: Heaps, opponent: Opponent, threshold: u32) -> Self {
        let player = if heaps.nim_sum().is_zero() {
            Player::Human
        } else {
            Player::Computer
        };
        Self {
            heaps,
            player,
            opponent,
            trigger: MistakeTrigger::Armed(threshold),
        }
    }

    /// Get the player to move
    pub const fn to_move(&self) -> Player {
        self.player
    }

    /// Get the current heaps
    pub const fn heaps(&self) -> &Heaps {
        &self.heaps
    }

    /// Get the opponent variant chosen at setup
    pub const fn opponent(&self) -> Opponent {
        self.opponent
    }

    /// Check if all stones are gone
    pub fn is_over(&self) -> bool {
        self.heaps.is_cleared()
    }

    /// Get the player who took the last stone, once the game is over.
    ///
    /// The turn flips after every ply, so the winner is the opposite of
    /// whoever would move next.
    pub fn winner(&self) -> Option<Player> {
        self.is_over().then(|| self.player.opposite())
    }

    /// Execute the computer's ply and report the move it made.
    ///
    /// The fallible opponent blunders on the first of its plies that finds
    /// the remaining total below the armed threshold, then disarms the
    /// trigger for good. Every other ply plays the winning move, or a
    /// random removal from the largest heap when no winning move exists.
    ///
    /// # Panics
    /// Panics if it is not the computer's turn or the game is over.
    pub fn computer_ply(&mut self, rng: &mut impl Rng) -> Move {
        assert_eq!(self.player, Player::Computer, "not the computer's turn");
        let mv = if self.should_blunder() {
            self.trigger = MistakeTrigger::Fired;
            strategy::blunder_move(&self.heaps, rng)
        } else {
            strategy::winning_move(&self.heaps)
                .unwrap_or_else(|| strategy::largest_heap_move(&self.heaps, rng))
        };
        self.heaps.apply(mv);
        self.player = self.player.opposite();
        mv
    }

    fn should_blunder(&self) -> bool {
        self.opponent == Opponent::Fallible
            && matches!(self.trigger, MistakeTrigger::Armed(threshold) if self.heaps.total() < threshold)
    }

    /// Apply the human's move.
    ///
    /// The caller is expected to validate input before calling; an illegal
    /// move is still rejected here rather than corrupting the heaps.
    ///
    /// # Panics
    /// Panics if it is not the human's turn.
    pub fn human_ply(&mut self, mv: Move) -> Result<(), Error> {
        assert_eq!(self.player, Player::Human, "not the human's turn");
        if !self.heaps.is_legal(mv) {
            return Err(Error::IllegalMove {
                heap: mv.heap,
                stones: mv.stones,
            });
        }
        self.heaps.apply(mv);
        self.player = self.player.opposite();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn computer_starts_unless_the_position_is_lost() {
        let session = GameSession::with_heaps(Heaps::new(vec![3, 4, 5]), Opponent::Perfect, 0)
            .unwrap();
        assert_eq!(session.to_move(), Player::Computer);

        // Nim-sum of [1, 2, 3] is zero, so the computer hands the human the
        // first move. The rule does not depend on the opponent variant.
        for opponent in [Opponent::Perfect, Opponent::Fallible] {
            let session =
                GameSession::with_heaps(Heaps::new(vec![1, 2, 3]), opponent, 0).unwrap();
            assert_eq!(session.to_move(), Player::Human);
        }
    }

    #[test]
    fn rejects_degenerate_heaps() {
        assert_eq!(
            GameSession::with_heaps(Heaps::new(vec![]), Opponent::Perfect, 0).unwrap_err(),
            Error::NoHeaps
        );
        assert_eq!(
            GameSession::with_heaps(Heaps::new(vec![0, 0]), Opponent::Perfect, 0).unwrap_err(),
            Error::EmptyHeaps
        );
    }

    #[test]
    fn rejects_invalid_setup() {
        let mut rng = rng();
        let bad_count = Setup {
            heap_count: 0,
            ..Setup::default()
        };
        assert_eq!(
            GameSession::new(&bad_count, Opponent::Perfect, &mut rng).unwrap_err(),
            Error::NoHeaps
        );

        let bad_range = Setup {
            sizing: HeapSizing::Random { min: 10, max: 5 },
            ..Setup::default()
        };
        assert_eq!(
            GameSession::new(&bad_range, Opponent::Perfect, &mut rng).unwrap_err(),
            Error::HeapSizeRange { min: 10, max: 5 }
        );

        let bad_window = Setup {
            mistake_window: (0.7, 0.3),
            ..Setup::default()
        };
        assert_eq!(
            GameSession::new(&bad_window, Opponent::Perfect, &mut rng).unwrap_err(),
            Error::MistakeWindow { min: 0.7, max: 0.3 }
        );
    }

    #[test]
    fn perfect_game_on_one_two_three() {
        let mut rng = rng();
        let mut session =
            GameSession::with_heaps(Heaps::new(vec![1, 2, 3]), Opponent::Perfect, 0).unwrap();
        assert_eq!(session.to_move(), Player::Human);

        // Human empties heap 3; the perfect opponent must restore a zero
        // nim-sum by taking one stone from heap 2.
        session.human_ply(Move { heap: 2, stones: 3 }).unwrap();
        assert_eq!(session.computer_ply(&mut rng), Move { heap: 1, stones: 1 });
        assert_eq!(session.heaps().stones(), &[1, 1, 0]);
        assert!(session.heaps().nim_sum().is_zero());

        session.human_ply(Move { heap: 0, stones: 1 }).unwrap();
        assert_eq!(session.computer_ply(&mut rng), Move { heap: 1, stones: 1 });

        assert!(session.is_over());
        assert_eq!(session.winner(), Some(Player::Computer));
    }

    #[test]
    fn winner_is_whoever_takes_the_last_stone() {
        // Nim-sum of a single heap is nonzero, computer starts and takes it.
        let mut session =
            GameSession::with_heaps(Heaps::new(vec![1]), Opponent::Perfect, 0).unwrap();
        assert_eq!(session.to_move(), Player::Computer);
        assert_eq!(session.winner(), None);
        session.computer_ply(&mut rng());
        assert_eq!(session.winner(), Some(Player::Computer));

        // Forced blunder on [2] leaves one stone for the human to take.
        let mut session =
            GameSession::with_heaps(Heaps::new(vec![2]), Opponent::Fallible, 3).unwrap();
        assert_eq!(session.computer_ply(&mut rng()), Move { heap: 0, stones: 1 });
        session.human_ply(Move { heap: 0, stones: 1 }).unwrap();
        assert_eq!(session.winner(), Some(Player::Human));
    }

    #[test]
    fn fallible_opponent_blunders_exactly_once() {
        // Threshold above the total, so the first computer ply blunders.
        let heaps = Heaps::new(vec![9, 11, 13]);
        let total = heaps.total();
        let mut session =
            GameSession::with_heaps(heaps, Opponent::Fallible, total + 1).unwrap();
        let mut rng = rng();

        assert_eq!(session.to_move(), Player::Computer);
        let blunder = session.computer_ply(&mut rng);
        assert!(!session.heaps().nim_sum().is_zero(), "blunder {blunder:?}");
        assert_eq!(session.trigger, MistakeTrigger::Fired);

        // Every later computer ply plays perfectly, whatever remains.
        session.human_ply(Move { heap: 0, stones: 2 }).unwrap();
        session.computer_ply(&mut rng);
        assert!(session.heaps().nim_sum().is_zero());
    }

    #[test]
    fn armed_trigger_waits_for_the_threshold() {
        let mut session =
            GameSession::with_heaps(Heaps::new(vec![9, 11, 13]), Opponent::Fallible, 10).unwrap();
        let mut rng = rng();
        session.computer_ply(&mut rng);
        // 33 stones at setup, far above the threshold of 10.
        assert!(session.heaps().nim_sum().is_zero());
        assert!(matches!(session.trigger, MistakeTrigger::Armed(10)));
    }

    #[test]
    fn perfect_opponent_never_blunders() {
        let heaps = Heaps::new(vec![9, 11, 13]);
        let total = heaps.total();
        let mut session =
            GameSession::with_heaps(heaps, Opponent::Perfect, total + 1).unwrap();
        session.computer_ply(&mut rng());
        assert!(session.heaps().nim_sum().is_zero());
    }

    #[test]
    fn illegal_human_moves_are_rejected() {
        let mut session =
            GameSession::with_heaps(Heaps::new(vec![1, 2, 3]), Opponent::Perfect, 0).unwrap();
        assert_eq!(
            session.human_ply(Move { heap: 3, stones: 1 }),
            Err(Error::IllegalMove { heap: 3, stones: 1 })
        );
        assert_eq!(
            session.human_ply(Move { heap: 1, stones: 3 }),
            Err(Error::IllegalMove { heap: 1, stones: 3 })
        );
        assert_eq!(
            session.human_ply(Move { heap: 1, stones: 0 }),
            Err(Error::IllegalMove { heap: 1, stones: 0 })
        );
        // A rejected move leaves the turn with the human.
        assert_eq!(session.to_move(), Player::Human);
        assert_eq!(session.human_ply(Move { heap: 1, stones: 2 }), Ok(()));
        assert_eq!(session.to_move(), Player::Computer);
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let play = || {
            let mut rng = StdRng::seed_from_u64(123);
            let mut session =
                GameSession::new(&Setup::default(), Opponent::Fallible, &mut rng).unwrap();
            let mut transcript = Vec::new();
            while !session.is_over() {
                match session.to_move() {
                    Player::Computer => {
                        transcript.push(session.computer_ply(&mut rng));
                    }
                    Player::Human => {
                        // Scripted human: one stone from the first nonempty heap.
                        let heap = session
                            .heaps()
                            .stones()
                            .iter()
                            .position(|&stones| stones > 0)
                            .unwrap();
                        let mv = Move { heap, stones: 1 };
                        transcript.push(mv);
                        session.human_ply(mv).unwrap();
                    }
                }
            }
            (transcript, session.winner().unwrap())
        };
        assert_eq!(play(), play());
    }
}
