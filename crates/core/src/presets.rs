//! Named historical wirings.
//!
//! Rotors I-V and reflectors A-C are the commercial/military tables. The
//! classic reflector `IXUHFEZDAOMTKQJWNSRLCYPBVG` is the default used with
//! rotors I, II, III.

use crate::alphabet::Permutation;
use crate::error::{Error, Result};

pub const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";
pub const ROTOR_II: &str = "AJDKSIRUXBLHWTMVZNYEQCGFPO";
pub const ROTOR_III: &str = "BDFHJLCPRTXVZNYEIWGAKMUSQO";
pub const ROTOR_IV: &str = "ESOVPZJAYQUIRHXLNFTGKDCMWB";
pub const ROTOR_V: &str = "VZBRGITYUPSDNHLXAWMJQOFECK";

pub const REFLECTOR_A: &str = "EJMZALYXVBWFCRQUONTSPIKHGD";
pub const REFLECTOR_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";
pub const REFLECTOR_C: &str = "FVPJIAOYEDRZXWGCTKUQSBNMHL";
pub const REFLECTOR_CLASSIC: &str = "IXUHFEZDAOMTKQJWNSRLCYPBVG";

/// Default rotor order, slow to fast.
pub const DEFAULT_ROTORS: [&str; 3] = ["I", "II", "III"];
pub const DEFAULT_REFLECTOR: &str = "CLASSIC";

const ROTORS: [(&str, Permutation); 5] = [
    ("I", Permutation::from_letters(ROTOR_I)),
    ("II", Permutation::from_letters(ROTOR_II)),
    ("III", Permutation::from_letters(ROTOR_III)),
    ("IV", Permutation::from_letters(ROTOR_IV)),
    ("V", Permutation::from_letters(ROTOR_V)),
];

const REFLECTORS: [(&str, Permutation); 4] = [
    ("A", Permutation::from_letters(REFLECTOR_A)),
    ("B", Permutation::from_letters(REFLECTOR_B)),
    ("C", Permutation::from_letters(REFLECTOR_C)),
    ("CLASSIC", Permutation::from_letters(REFLECTOR_CLASSIC)),
];

/// Rotors I, II, III, slow to fast.
pub const DEFAULT_ROTOR_WIRINGS: [Permutation; 3] = [ROTORS[0].1, ROTORS[1].1, ROTORS[2].1];
pub const DEFAULT_REFLECTOR_WIRING: Permutation = REFLECTORS[3].1;

/// Look up a rotor wiring by roman numeral (case-insensitive).
pub fn rotor(name: &str) -> Result<Permutation> {
    lookup(&ROTORS, name, "rotor")
}

/// Look up a reflector wiring by name (case-insensitive).
pub fn reflector(name: &str) -> Result<Permutation> {
    lookup(&REFLECTORS, name, "reflector")
}

pub fn rotor_names() -> impl Iterator<Item = &'static str> {
    ROTORS.iter().map(|(name, _)| *name)
}

pub fn reflector_names() -> impl Iterator<Item = &'static str> {
    REFLECTORS.iter().map(|(name, _)| *name)
}

fn lookup(table: &[(&str, Permutation)], name: &str, kind: &str) -> Result<Permutation> {
    let name = name.trim();
    table
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, wiring)| *wiring)
        .ok_or_else(|| Error::Config(format!("unknown {} {:?}", kind, name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflector::Reflector;

    #[test]
    fn test_all_rotor_presets_are_permutations() {
        for name in rotor_names() {
            let wiring = rotor(name).unwrap();
            assert!(!wiring.is_involution(), "{name}");
        }
    }

    #[test]
    fn test_all_reflector_presets_are_valid() {
        for name in reflector_names() {
            Reflector::new(reflector(name).unwrap()).unwrap();
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(rotor("iii").unwrap().to_string(), ROTOR_III);
        assert_eq!(reflector(" classic ").unwrap().to_string(), REFLECTOR_CLASSIC);
    }

    #[test]
    fn test_default_wirings_match_named_presets() {
        for (wiring, name) in DEFAULT_ROTOR_WIRINGS.iter().zip(DEFAULT_ROTORS) {
            assert_eq!(*wiring, rotor(name).unwrap());
        }
        assert_eq!(DEFAULT_REFLECTOR_WIRING, reflector(DEFAULT_REFLECTOR).unwrap());
        assert_eq!(DEFAULT_REFLECTOR_WIRING.to_string(), REFLECTOR_CLASSIC);
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(rotor("VI"), Err(Error::Config(_))));
        assert!(matches!(reflector("D"), Err(Error::Config(_))));
    }
}
