//! Seeded generation of sample messages and random machine wirings.
//!
//! When no message is given, a sample is generated so the tool always has
//! something to encrypt. When `--seed` is given without a configuration file,
//! the rotor and reflector wirings themselves are drawn from the seed.
//!
//! # Design
//!
//! Generated messages mix:
//! - Plain words (readable traffic)
//! - Repeated stock phrases (the kind of crib a cryptanalyst looks for)
//! - Random letter groups (noise)
//!
//! All randomness comes from a ChaCha8 RNG, so a seed reproduces the run.

use enigma_sim_core::alphabet::{Permutation, ALPHABET_SIZE};
use enigma_sim_core::{MachineConfig, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WORDS: &[&str] = &[
    "ATTACK", "DAWN", "NORTH", "SOUTH", "EAST", "WEST", "CONVOY", "WEATHER", "REPORT", "SUPPLY",
    "BRIDGE", "RIVER", "HOLD", "POSITION", "ADVANCE", "RETREAT", "ENEMY", "SIGHTED", "HARBOUR",
    "SIGNAL", "STOP", "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT",
    "NINE",
];

const PHRASES: &[&str] = &["NOTHING TO REPORT", "WEATHER REPORT", "HEIL", "KEINE BESONDEREN EREIGNISSE"];

/// Generate a sample message containing exactly `letters` letters.
///
/// Words are separated by single spaces, which do not count toward the
/// length and do not step the rotors.
pub fn generate_sample_message(seed: u64, letters: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut message = String::with_capacity(letters + letters / 4);
    let mut remaining = letters;

    while remaining > 0 {
        let piece_type: u8 = rng.gen_range(0..10);

        let piece: String = match piece_type {
            // 60% plain words
            0..=5 => WORDS[rng.gen_range(0..WORDS.len())].to_string(),

            // 20% stock phrases
            6..=7 => PHRASES[rng.gen_range(0..PHRASES.len())].to_string(),

            // 20% random five-letter groups
            _ => (0..5).map(|_| random_letter(&mut rng)).collect(),
        };

        if !message.is_empty() {
            message.push(' ');
        }
        for ch in piece.chars() {
            if remaining == 0 {
                break;
            }
            if ch.is_ascii_alphabetic() {
                remaining -= 1;
            }
            message.push(ch);
        }
    }

    message.trim_end().to_string()
}

fn random_letter(rng: &mut ChaCha8Rng) -> char {
    (b'A' + rng.gen_range(0..ALPHABET_SIZE as u8)) as char
}

/// A uniformly random rotor wiring.
pub fn random_wiring(rng: &mut ChaCha8Rng) -> Result<Permutation> {
    let mut table: [u8; ALPHABET_SIZE] = std::array::from_fn(|i| i as u8);
    table.shuffle(rng);
    Permutation::new(table)
}

/// A random fixed-point-free involution: shuffle, then pair neighbours.
pub fn random_reflector(rng: &mut ChaCha8Rng) -> Result<Permutation> {
    let mut order: [u8; ALPHABET_SIZE] = std::array::from_fn(|i| i as u8);
    order.shuffle(rng);
    let mut table = [0u8; ALPHABET_SIZE];
    for pair in order.chunks_exact(2) {
        table[pair[0] as usize] = pair[1];
        table[pair[1] as usize] = pair[0];
    }
    Permutation::new(table)
}

/// A complete random machine configuration, including starting offsets.
pub fn random_config(seed: u64) -> Result<MachineConfig> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(MachineConfig {
        rotor_wirings: [
            random_wiring(&mut rng)?,
            random_wiring(&mut rng)?,
            random_wiring(&mut rng)?,
        ],
        initial_offsets: [
            rng.gen_range(0..ALPHABET_SIZE as u8),
            rng.gen_range(0..ALPHABET_SIZE as u8),
            rng.gen_range(0..ALPHABET_SIZE as u8),
        ],
        reflector_wiring: random_reflector(&mut rng)?,
    })
}
