//! Error types for the enigma-sim engine.
//!
//! Every failure is reported as a structured error rather than a panic.
//! Wiring problems surface when a machine is built; letter and offset
//! problems fail only the single call that caused them.

use thiserror::Error;

/// Top-level error type for all engine operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Permutation: a wiring table is not a bijection over 26 symbols
/// - Reflector: a reflector wiring is not a fixed-point-free involution
/// - Letter: input outside the 26-letter alphabet
/// - Rotor index / offset: out-of-range position arguments
/// - Config / I/O / JSON: loading a machine configuration
#[derive(Debug, Error)]
pub enum Error {
    /// Wiring table is not a permutation of the alphabet
    #[error("invalid permutation: {0}")]
    InvalidPermutation(#[from] PermutationError),

    /// Reflector wiring is not a fixed-point-free involution
    #[error("invalid reflector: {0}")]
    InvalidReflector(#[from] ReflectorError),

    /// Character outside A-Z (either case)
    #[error("invalid letter {0:?}: expected A-Z")]
    InvalidLetter(char),

    /// Rotor index outside 0..3
    #[error("invalid rotor index {0}: machine has 3 rotors (0 = slow, 2 = fast)")]
    InvalidRotorIndex(usize),

    /// Offset outside 0..26
    #[error("invalid rotor offset {0}: expected 0-25")]
    InvalidOffset(u8),

    /// Configuration error (unknown preset name, malformed position, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Machine configuration could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ways a wiring table can fail to be a bijection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermutationError {
    /// Wiring string does not have exactly 26 entries
    #[error("expected 26 entries, got {len}")]
    WrongLength { len: usize },

    /// Entry is not a symbol index
    #[error("entry {position} maps to {value}, outside 0-25")]
    OutOfRange { position: usize, value: u8 },

    /// Wiring string contains something other than a letter
    #[error("entry {position} is {ch:?}, not a letter")]
    NotALetter { position: usize, ch: char },

    /// Two entries share the same target
    #[error("entries {first} and {second} both map to {value}")]
    Duplicate { value: u8, first: usize, second: usize },
}

/// Ways a reflector wiring can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectorError {
    /// A letter reflects to itself
    #[error("letter {index} reflects to itself")]
    FixedPoint { index: u8 },

    /// Wiring is not self-inverse
    #[error("{index} maps to {maps_to}, but {maps_to} maps to {back_to}")]
    NotInvolution { index: u8, maps_to: u8, back_to: u8 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_letter() {
        let err = Error::InvalidLetter('7');
        assert_eq!(err.to_string(), "invalid letter '7': expected A-Z");
    }

    #[test]
    fn test_display_nested_permutation_error() {
        let err: Error = PermutationError::Duplicate {
            value: 4,
            first: 0,
            second: 9,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid permutation: entries 0 and 9 both map to 4"
        );
    }

    #[test]
    fn test_display_reflector_error() {
        let err: Error = ReflectorError::NotInvolution {
            index: 0,
            maps_to: 1,
            back_to: 2,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid reflector: 0 maps to 1, but 1 maps to 2"
        );
    }
}
