//! The 26-letter alphabet and permutations over it.
//!
//! Letters are handled internally as indices `0..26` (`A` = 0). Conversion
//! happens only at the edges of the engine: [`index_of`] validates incoming
//! characters and [`letter_at`] renders results.
//!
//! # Example
//! ```
//! use enigma_sim_core::alphabet::{index_of, letter_at, Permutation};
//!
//! let wiring: Permutation = "EKMFLGDQVZNTOWYHXUSPAIBRCJ".parse().unwrap();
//! assert_eq!(wiring.apply(index_of('A').unwrap()), index_of('E').unwrap());
//! assert_eq!(letter_at(wiring.inverse().apply(4)), 'A');
//! ```

use crate::error::{Error, PermutationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// The alphabet in index order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Map a letter to its index, normalizing lowercase to uppercase.
pub fn index_of(letter: char) -> Result<u8> {
    if letter.is_ascii_alphabetic() {
        Ok(letter.to_ascii_uppercase() as u8 - b'A')
    } else {
        Err(Error::InvalidLetter(letter))
    }
}

/// Map an index in `0..26` to its uppercase letter.
///
/// Indices are reduced modulo 26, so callers holding a validated index
/// always get the expected letter.
pub fn letter_at(index: u8) -> char {
    (b'A' + index % ALPHABET_SIZE as u8) as char
}

/// A bijection over the 26 symbol indices.
///
/// # Invariants
/// - Every value is in `0..26`
/// - Every value appears exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permutation {
    table: [u8; ALPHABET_SIZE],
}

impl Permutation {
    /// Validate a raw table.
    pub fn new(table: [u8; ALPHABET_SIZE]) -> Result<Self> {
        let mut seen: [Option<usize>; ALPHABET_SIZE] = [None; ALPHABET_SIZE];
        for (position, &value) in table.iter().enumerate() {
            if value as usize >= ALPHABET_SIZE {
                return Err(PermutationError::OutOfRange { position, value }.into());
            }
            if let Some(first) = seen[value as usize] {
                return Err(PermutationError::Duplicate {
                    value,
                    first,
                    second: position,
                }
                .into());
            }
            seen[value as usize] = Some(position);
        }
        Ok(Self { table })
    }

    /// Build a permutation from a wiring string at compile time.
    ///
    /// Meant for `const` items holding fixed tables, where a bad table
    /// stops the build instead of surfacing at run time. Runtime input goes
    /// through [`Permutation::new`] or `str::parse`.
    ///
    /// # Panics
    /// If `wiring` is not 26 uppercase letters with no repeats.
    pub const fn from_letters(wiring: &str) -> Self {
        let bytes = wiring.as_bytes();
        assert!(bytes.len() == ALPHABET_SIZE, "wiring must have 26 letters");
        let mut table = [0u8; ALPHABET_SIZE];
        let mut seen = [false; ALPHABET_SIZE];
        let mut i = 0;
        while i < ALPHABET_SIZE {
            let b = bytes[i];
            assert!(b.is_ascii_uppercase(), "wiring must be uppercase A-Z");
            let value = b - b'A';
            assert!(!seen[value as usize], "wiring repeats a letter");
            seen[value as usize] = true;
            table[i] = value;
            i += 1;
        }
        Self { table }
    }

    /// The permutation that maps every index to itself.
    pub fn identity() -> Self {
        let mut table = [0u8; ALPHABET_SIZE];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self { table }
    }

    /// Look up the image of `index`.
    #[inline]
    pub fn apply(&self, index: u8) -> u8 {
        self.table[index as usize]
    }

    /// Build the inverse table, so that `p.inverse().apply(p.apply(i)) == i`.
    pub fn inverse(&self) -> Self {
        let mut table = [0u8; ALPHABET_SIZE];
        for (i, &value) in self.table.iter().enumerate() {
            table[value as usize] = i as u8;
        }
        Self { table }
    }

    /// Apply `self` first, then `next`.
    pub fn compose(&self, next: &Permutation) -> Self {
        let mut table = [0u8; ALPHABET_SIZE];
        for (slot, &value) in table.iter_mut().zip(self.table.iter()) {
            *slot = next.apply(value);
        }
        Self { table }
    }

    /// True if applying the permutation twice yields the identity.
    pub fn is_involution(&self) -> bool {
        (0..ALPHABET_SIZE as u8).all(|i| self.apply(self.apply(i)) == i)
    }

    /// Indices that map to themselves.
    pub fn fixed_points(&self) -> Vec<u8> {
        (0..ALPHABET_SIZE as u8)
            .filter(|&i| self.apply(i) == i)
            .collect()
    }

    /// Raw lookup table.
    pub fn as_table(&self) -> &[u8; ALPHABET_SIZE] {
        &self.table
    }
}

impl FromStr for Permutation {
    type Err = Error;

    /// Parse a wiring string such as `"EKMFLGDQVZNTOWYHXUSPAIBRCJ"`.
    fn from_str(s: &str) -> Result<Self> {
        let len = s.chars().count();
        if len != ALPHABET_SIZE {
            return Err(PermutationError::WrongLength { len }.into());
        }
        let mut table = [0u8; ALPHABET_SIZE];
        for (position, ch) in s.chars().enumerate() {
            table[position] = index_of(ch)
                .map_err(|_| Error::from(PermutationError::NotALetter { position, ch }))?;
        }
        Self::new(table)
    }
}

impl TryFrom<String> for Permutation {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Permutation> for String {
    fn from(value: Permutation) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &value in &self.table {
            write!(f, "{}", letter_at(value))?;
        }
        Ok(())
    }
}
