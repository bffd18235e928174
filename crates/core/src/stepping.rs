//! The odometer stepping policy.
//!
//! Rotors are ordered slow (0), middle (1), fast (2). Before every keystroke:
//! 1. The fast rotor advances.
//! 2. If the fast rotor wrapped to 0, the middle rotor advances.
//! 3. If the middle and fast rotors both read 0, the slow rotor advances.
//!
//! This is a plain three-digit carry with one turnover point per rotor.
//! Real machines carried at a per-rotor notch and double-stepped the middle
//! rotor; this policy does neither.

use crate::rotor::Rotor;

pub const SLOW: usize = 0;
pub const MIDDLE: usize = 1;
pub const FAST: usize = 2;

/// Which rotors moved during one step. The fast rotor always moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    pub middle_advanced: bool,
    pub slow_advanced: bool,
}

/// Advance the rotors for one keystroke.
///
/// Each rule reads the offsets already updated by the rules before it.
pub fn step(rotors: &mut [Rotor; 3]) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    let fast_wrapped = rotors[FAST].advance();
    if fast_wrapped {
        rotors[MIDDLE].advance();
        outcome.middle_advanced = true;
    }

    if rotors[MIDDLE].offset() == 0 && rotors[FAST].offset() == 0 {
        rotors[SLOW].advance();
        outcome.slow_advanced = true;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Permutation;

    fn rotors_at(offsets: [u8; 3]) -> [Rotor; 3] {
        offsets.map(|o| Rotor::with_offset(Permutation::identity(), o).unwrap())
    }

    fn offsets(rotors: &[Rotor; 3]) -> [u8; 3] {
        [rotors[0].offset(), rotors[1].offset(), rotors[2].offset()]
    }

    #[test]
    fn test_fast_rotor_always_advances() {
        let mut rotors = rotors_at([0, 0, 0]);
        let outcome = step(&mut rotors);
        assert_eq!(offsets(&rotors), [0, 0, 1]);
        assert_eq!(outcome, StepOutcome::default());
    }

    #[test]
    fn test_fast_wrap_carries_into_middle() {
        let mut rotors = rotors_at([3, 4, 25]);
        let outcome = step(&mut rotors);
        assert_eq!(offsets(&rotors), [3, 5, 0]);
        assert!(outcome.middle_advanced);
        assert!(!outcome.slow_advanced);
    }

    #[test]
    fn test_double_wrap_carries_into_slow() {
        let mut rotors = rotors_at([3, 25, 25]);
        let outcome = step(&mut rotors);
        assert_eq!(offsets(&rotors), [4, 0, 0]);
        assert!(outcome.middle_advanced);
        assert!(outcome.slow_advanced);
    }

    #[test]
    fn test_slow_rotor_wraps_too() {
        let mut rotors = rotors_at([25, 25, 25]);
        step(&mut rotors);
        assert_eq!(offsets(&rotors), [0, 0, 0]);
    }

    #[test]
    fn test_manually_zeroed_middle_carries_on_fast_wrap_only() {
        // Middle already at 0 but fast not wrapping: slow stays put
        let mut rotors = rotors_at([0, 0, 5]);
        let outcome = step(&mut rotors);
        assert_eq!(offsets(&rotors), [0, 0, 6]);
        assert!(!outcome.slow_advanced);
    }

    #[test]
    fn test_middle_does_not_double_step() {
        // Middle sitting just before its turnover moves only on a fast wrap
        let mut rotors = rotors_at([0, 25, 10]);
        step(&mut rotors);
        assert_eq!(offsets(&rotors), [0, 25, 11]);
    }
}
