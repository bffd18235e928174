//! The reflector: a fixed wiring that sends the signal back through the rotors.
//!
//! A reflector never rotates. Its wiring must pair letters off: it is its
//! own inverse and no letter maps to itself.

use crate::alphabet::{Permutation, ALPHABET_SIZE};
use crate::error::{ReflectorError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    wiring: Permutation,
}

impl Reflector {
    /// Validate and wrap a reflector wiring.
    ///
    /// Fails on the first index that is a fixed point or whose image does
    /// not map back to it.
    pub fn new(wiring: Permutation) -> Result<Self> {
        for index in 0..ALPHABET_SIZE as u8 {
            let maps_to = wiring.apply(index);
            if maps_to == index {
                return Err(ReflectorError::FixedPoint { index }.into());
            }
            let back_to = wiring.apply(maps_to);
            if back_to != index {
                return Err(ReflectorError::NotInvolution {
                    index,
                    maps_to,
                    back_to,
                }
                .into());
            }
        }
        Ok(Self { wiring })
    }

    #[inline]
    pub fn reflect(&self, index: u8) -> u8 {
        self.wiring.apply(index)
    }

    pub fn wiring(&self) -> &Permutation {
        &self.wiring
    }
}
