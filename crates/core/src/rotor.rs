//! A single cipher rotor: fixed wiring plus a rotating offset.
//!
//! The offset turns the contact ring relative to the wiring. A signal is
//! shifted by the offset on the way in, substituted by the wiring, and
//! shifted back on the way out. Passing through in the opposite direction
//! applies the inverse wiring with the same bracketing, so
//! `backward(forward(i)) == i` for every offset.
//!
//! # Invariants
//! - `offset` is always in `0..26`
//! - `inverse` is the inverse of `wiring` (built once at construction)

use crate::alphabet::{letter_at, Permutation, ALPHABET_SIZE};
use crate::error::{Error, Result};

const N: u8 = ALPHABET_SIZE as u8;

/// A rotor with immutable wiring and a mutable rotational offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    wiring: Permutation,
    inverse: Permutation,
    offset: u8,
}

impl Rotor {
    /// Create a rotor at rest (offset 0).
    pub fn new(wiring: Permutation) -> Self {
        Self {
            inverse: wiring.inverse(),
            wiring,
            offset: 0,
        }
    }

    /// Create a rotor turned to `offset`.
    pub fn with_offset(wiring: Permutation, offset: u8) -> Result<Self> {
        let mut rotor = Self::new(wiring);
        rotor.set_offset(offset)?;
        Ok(rotor)
    }

    /// Signal entering from the entry side.
    ///
    /// `index` is reduced modulo 26, so any `u8` is accepted.
    #[inline]
    pub fn forward(&self, index: u8) -> u8 {
        unshift(self.wiring.apply(shift(index, self.offset)), self.offset)
    }

    /// Signal entering from the exit side (inverse wiring).
    #[inline]
    pub fn backward(&self, index: u8) -> u8 {
        unshift(self.inverse.apply(shift(index, self.offset)), self.offset)
    }

    /// Turn the rotor one position. Returns true if it wrapped back to 0.
    pub fn advance(&mut self) -> bool {
        self.offset = (self.offset + 1) % N;
        self.offset == 0
    }

    /// Current offset in `0..26`.
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Turn the rotor directly to `offset`.
    pub fn set_offset(&mut self, offset: u8) -> Result<()> {
        if offset >= N {
            return Err(Error::InvalidOffset(offset));
        }
        self.offset = offset;
        Ok(())
    }

    /// Turn to an offset the caller has already range-checked.
    pub(crate) fn turn_to(&mut self, offset: u8) {
        debug_assert!(offset < N, "offset {offset} out of range");
        self.offset = offset % N;
    }

    /// Letter shown in the rotor window.
    pub fn window_letter(&self) -> char {
        letter_at(self.offset)
    }

    pub fn wiring(&self) -> &Permutation {
        &self.wiring
    }
}

/// `(index + offset) mod 26`, widened so large indices cannot overflow.
#[inline]
fn shift(index: u8, offset: u8) -> u8 {
    ((u16::from(index) + u16::from(offset)) % u16::from(N)) as u8
}

/// `(value - offset) mod 26`, kept non-negative.
#[inline]
fn unshift(value: u8, offset: u8) -> u8 {
    (value + N - offset) % N
}
