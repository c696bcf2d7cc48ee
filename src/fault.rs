//! Random outcome selection for the health endpoint.
//!
//! A [`Dice`] produces a roll in `[0, SIDES)`; [`Outcome::from_roll`] maps the
//! roll to one of four canned behaviors. The dice is injected through
//! application state so tests can pin the outcome.

use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

/// Number of faces on the dice. Rolls are always in `0..SIDES`.
pub const SIDES: u8 = 10;

/// Source of rolls for the health handler.
///
/// Implementations must be safe to share across concurrent requests.
pub trait Dice: Send + Sync + 'static {
    /// Returns a value in `0..SIDES`.
    fn roll(&self) -> u8;
}

/// Production dice backed by the random bits of a v4 UUID.
///
/// Each roll draws fresh OS entropy, so there is no shared generator state
/// to contend on.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyDice;

impl Dice for EntropyDice {
    fn roll(&self) -> u8 {
        // 122 random bits; the modulo bias against 10 is negligible.
        (Uuid::new_v4().as_u128() % u128::from(SIDES)) as u8
    }
}

/// Dice that always lands on the same face.
#[derive(Debug, Clone, Copy)]
pub struct FixedDice(pub u8);

impl Dice for FixedDice {
    fn roll(&self) -> u8 {
        self.0 % SIDES
    }
}

/// Dice that replays a scripted list of rolls, wrapping at the end.
#[derive(Debug)]
pub struct SequenceDice {
    rolls: Vec<u8>,
    cursor: AtomicUsize,
}

impl SequenceDice {
    /// Create a dice from a script. An empty script always rolls 0.
    pub fn new(rolls: impl Into<Vec<u8>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl Dice for SequenceDice {
    fn roll(&self) -> u8 {
        if self.rolls.is_empty() {
            return 0;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed) % self.rolls.len();
        self.rolls[i] % SIDES
    }
}

/// What the health endpoint does for a given roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 500 with a plain-text body
    InternalError,
    /// Healthy payload after the configured delay
    SlowHealthy,
    /// 200 with `postgres` reported down
    Degraded,
    /// 200 with `postgres` reported up
    Healthy,
}

impl Outcome {
    /// Map a roll to an outcome. Evenness is checked first, so 3 and 5 are
    /// only ever reached for odd rolls.
    pub fn from_roll(n: u8) -> Self {
        if n % 2 == 0 {
            Self::InternalError
        } else if n == 3 {
            Self::SlowHealthy
        } else if n == 5 {
            Self::Degraded
        } else {
            Self::Healthy
        }
    }

    /// Short label for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InternalError => "internal_error",
            Self::SlowHealthy => "slow_healthy",
            Self::Degraded => "degraded",
            Self::Healthy => "healthy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_face_maps() {
        let expected = [
            Outcome::InternalError, // 0
            Outcome::Healthy,       // 1
            Outcome::InternalError, // 2
            Outcome::SlowHealthy,   // 3
            Outcome::InternalError, // 4
            Outcome::Degraded,      // 5
            Outcome::InternalError, // 6
            Outcome::Healthy,       // 7
            Outcome::InternalError, // 8
            Outcome::Healthy,       // 9
        ];
        for (n, outcome) in expected.iter().enumerate() {
            assert_eq!(Outcome::from_roll(n as u8), *outcome, "roll {}", n);
        }
    }

    #[test]
    fn test_face_distribution() {
        let count = |o: Outcome| (0..SIDES).filter(|&n| Outcome::from_roll(n) == o).count();
        assert_eq!(count(Outcome::InternalError), 5);
        assert_eq!(count(Outcome::SlowHealthy), 1);
        assert_eq!(count(Outcome::Degraded), 1);
        assert_eq!(count(Outcome::Healthy), 3);
    }

    #[test]
    fn test_entropy_dice_in_range() {
        let dice = EntropyDice;
        for _ in 0..1000 {
            assert!(dice.roll() < SIDES);
        }
    }

    #[test]
    fn test_entropy_dice_converges() {
        let dice = EntropyDice;
        let draws = 20_000;
        let mut errors = 0usize;
        let mut slow = 0usize;
        let mut degraded = 0usize;
        let mut healthy = 0usize;
        for _ in 0..draws {
            match Outcome::from_roll(dice.roll()) {
                Outcome::InternalError => errors += 1,
                Outcome::SlowHealthy => slow += 1,
                Outcome::Degraded => degraded += 1,
                Outcome::Healthy => healthy += 1,
            }
        }
        let share = |c: usize| c as f64 / draws as f64;
        // Wide tolerances: several standard deviations at this sample size.
        assert!((share(errors) - 0.5).abs() < 0.03);
        assert!((share(slow) - 0.1).abs() < 0.02);
        assert!((share(degraded) - 0.1).abs() < 0.02);
        assert!((share(healthy) - 0.3).abs() < 0.03);
    }

    #[test]
    fn test_fixed_dice_wraps() {
        assert_eq!(FixedDice(3).roll(), 3);
        assert_eq!(FixedDice(15).roll(), 5);
    }

    #[test]
    fn test_sequence_dice_cycles() {
        let dice = SequenceDice::new(vec![0, 3, 5]);
        let rolls: Vec<u8> = (0..7).map(|_| dice.roll()).collect();
        assert_eq!(rolls, vec![0, 3, 5, 0, 3, 5, 0]);
    }

    #[test]
    fn test_sequence_dice_empty() {
        let dice = SequenceDice::new(Vec::new());
        assert_eq!(dice.roll(), 0);
    }
}
