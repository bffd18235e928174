//! enigma-sim: headless front end for the rotor cipher machine.
//!
//! - `config`: command-line parsing and machine/input resolution
//! - `input_gen`: seeded sample messages and random wirings
//! - `panel`: keyboard, lamp board and rotor windows driving a `Machine`
//! - `logging`: tracing subscriber setup

pub mod config;
pub mod error;
pub mod input_gen;
pub mod logging;
pub mod panel;

pub use error::{AppError, Result};
