//! enigma-sim-core: the cipher and stepping engine of a three-rotor
//! reflecting cipher machine.
//!
//! Each keystroke advances the rotors like an odometer and then routes the
//! letter through the rotors, a fixed reflector, and back out through the
//! rotors in reverse. The same machine setting both encrypts and decrypts.
//!
//! # Architecture
//!
//! Leaf-first module boundaries:
//! - `alphabet`: letter/index conversion and validated permutations
//! - `rotor`: wiring plus rotating offset, forward and backward substitution
//! - `reflector`: fixed-point-free involution
//! - `stepping`: the odometer carry rule
//! - `machine`: configuration, stepping + signal path, position control
//! - `presets`: named historical wirings
//! - `metrics`: session counters
//!
//! # Design Principles
//!
//! - **No panics**: invalid wirings fail construction; invalid letters and
//!   positions fail only the call that supplied them
//! - **Pure state**: a `Machine` is a small value; presentation layers read
//!   offsets and render them themselves
//! - **Deterministic**: identical configuration and input give identical
//!   output and final position

pub mod alphabet;
pub mod error;
pub mod machine;
pub mod metrics;
pub mod presets;
pub mod reflector;
pub mod rotor;
pub mod stepping;

// Re-export commonly used types
pub use alphabet::Permutation;
pub use error::{Error, Result};
pub use machine::{Keystroke, Machine, MachineConfig};
