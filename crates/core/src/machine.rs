//! The three-rotor machine: stepping followed by the full signal path.
//!
//! # Signal path
//!
//! ```text
//! key -> rotor 2 -> rotor 1 -> rotor 0 -> reflector
//!                                            |
//! lamp <- rotor 2 <- rotor 1 <- rotor 0 <----+
//!        (backward through each rotor)
//! ```
//!
//! Each keystroke steps the rotors first and then encodes with the new
//! offsets. Because `backward` inverts `forward` and the reflector is a
//! fixed-point-free involution, encoding at a fixed position is its own
//! inverse and never maps a letter to itself. Two machines with the same
//! configuration therefore decrypt each other's output.
//!
//! # Example
//! ```
//! use enigma_sim_core::machine::{Machine, MachineConfig};
//!
//! let mut sender = Machine::new(MachineConfig::default()).unwrap();
//! let mut receiver = Machine::new(MachineConfig::default()).unwrap();
//!
//! let cipher = sender.encrypt_text("HELLO").unwrap();
//! assert_eq!(receiver.encrypt_text(&cipher).unwrap(), "HELLO");
//! ```
//!
//! # Thread Safety
//! `Machine` is a plain value. Share it across threads behind a `Mutex`
//! so that stepping and encoding of one keystroke happen as a unit.

use crate::alphabet::{index_of, letter_at, Permutation, ALPHABET_SIZE};
use crate::error::{Error, Result};
use crate::presets;
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::stepping::{self, StepOutcome, FAST, MIDDLE, SLOW};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

/// Number of rotors in the machine.
pub const ROTOR_COUNT: usize = 3;

/// Construction-time configuration.
///
/// Rotor order is slow (index 0) to fast (index 2). Serialized as JSON with
/// camelCase field names:
///
/// ```json
/// {
///   "rotorWirings": ["EKMFLGDQVZNTOWYHXUSPAIBRCJ", "AJDKSIRUXBLHWTMVZNYEQCGFPO", "BDFHJLCPRTXVZNYEIWGAKMUSQO"],
///   "initialOffsets": [0, 0, 0],
///   "reflectorWiring": "IXUHFEZDAOMTKQJWNSRLCYPBVG"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMachineConfig")]
pub struct MachineConfig {
    pub rotor_wirings: [Permutation; ROTOR_COUNT],
    pub initial_offsets: [u8; ROTOR_COUNT],
    pub reflector_wiring: Permutation,
}

/// On-disk shape of [`MachineConfig`] before the wirings are checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawMachineConfig {
    rotor_wirings: [String; ROTOR_COUNT],
    #[serde(default)]
    initial_offsets: [u8; ROTOR_COUNT],
    reflector_wiring: String,
}

impl TryFrom<RawMachineConfig> for MachineConfig {
    type Error = Error;

    fn try_from(raw: RawMachineConfig) -> Result<Self> {
        let [slow, middle, fast] = raw.rotor_wirings;
        Ok(Self {
            rotor_wirings: [slow.parse()?, middle.parse()?, fast.parse()?],
            initial_offsets: raw.initial_offsets,
            reflector_wiring: raw.reflector_wiring.parse()?,
        })
    }
}

impl MachineConfig {
    /// Assemble a configuration from preset names, e.g. `["I", "II", "III"]`.
    pub fn from_presets(rotors: [&str; ROTOR_COUNT], reflector: &str) -> Result<Self> {
        Ok(Self {
            rotor_wirings: [
                presets::rotor(rotors[0])?,
                presets::rotor(rotors[1])?,
                presets::rotor(rotors[2])?,
            ],
            initial_offsets: [0; ROTOR_COUNT],
            reflector_wiring: presets::reflector(reflector)?,
        })
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a JSON configuration.
    ///
    /// Malformed JSON is [`Error::Json`]; a well-formed document carrying a
    /// bad wiring is [`Error::InvalidPermutation`].
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawMachineConfig = serde_json::from_str(text)?;
        raw.try_into()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the starting offsets with a window reading such as `"AAZ"`.
    pub fn with_position(mut self, position: &str) -> Result<Self> {
        self.initial_offsets = parse_position(position)?;
        Ok(self)
    }
}

impl Default for MachineConfig {
    /// Rotors I, II, III with the classic reflector, all at `A`.
    fn default() -> Self {
        Self {
            rotor_wirings: presets::DEFAULT_ROTOR_WIRINGS,
            initial_offsets: [0; ROTOR_COUNT],
            reflector_wiring: presets::DEFAULT_REFLECTOR_WIRING,
        }
    }
}

/// Result of one key press: what went in, what lit up, which rotors moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub input: char,
    pub output: char,
    pub step: StepOutcome,
}

/// A three-rotor reflecting cipher machine.
///
/// # Invariants
/// - Exactly three rotors, ordered slow, middle, fast
/// - Every offset is in `0..26`
/// - The reflector is a fixed-point-free involution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    rotors: [Rotor; ROTOR_COUNT],
    reflector: Reflector,
    initial_offsets: [u8; ROTOR_COUNT],
}

impl Machine {
    /// Build a machine, validating the reflector and the starting offsets.
    ///
    /// Wirings are already bijections by construction of [`Permutation`];
    /// deserialized configurations are checked while parsing.
    pub fn new(config: MachineConfig) -> Result<Self> {
        let reflector = Reflector::new(config.reflector_wiring)?;
        let [slow, middle, fast] = config.rotor_wirings;
        let [o_slow, o_middle, o_fast] = config.initial_offsets;
        let rotors = [
            Rotor::with_offset(slow, o_slow)?,
            Rotor::with_offset(middle, o_middle)?,
            Rotor::with_offset(fast, o_fast)?,
        ];
        debug!(
            position = %position_string(&config.initial_offsets),
            "machine constructed"
        );
        Ok(Self {
            rotors,
            reflector,
            initial_offsets: config.initial_offsets,
        })
    }

    /// Advance the rotors for one keystroke.
    pub fn step(&mut self) -> StepOutcome {
        let outcome = stepping::step(&mut self.rotors);
        if outcome.middle_advanced {
            debug!(
                middle = self.rotors[MIDDLE].offset(),
                slow = self.rotors[SLOW].offset(),
                slow_advanced = outcome.slow_advanced,
                "carry"
            );
        }
        outcome
    }

    /// Run one index through the signal path at the current offsets.
    pub fn encode(&self, index: u8) -> Result<u8> {
        if index as usize >= ALPHABET_SIZE {
            return Err(Error::InvalidLetter(char::from(b'A'.wrapping_add(index))));
        }
        Ok(self.signal_path(index))
    }

    fn signal_path(&self, index: u8) -> u8 {
        let inward = self
            .rotors
            .iter()
            .rev()
            .fold(index, |signal, rotor| rotor.forward(signal));
        let reflected = self.reflector.reflect(inward);
        self.rotors
            .iter()
            .fold(reflected, |signal, rotor| rotor.backward(signal))
    }

    /// Press a key: step, then encode.
    ///
    /// The letter is validated before the rotors move, so a rejected key
    /// leaves the machine untouched.
    pub fn key_press(&mut self, letter: char) -> Result<Keystroke> {
        let index = index_of(letter)?;
        let step = self.step();
        let output = letter_at(self.signal_path(index));
        trace!(
            input = %letter,
            output = %output,
            position = %self.position(),
            "keystroke"
        );
        Ok(Keystroke {
            input: letter.to_ascii_uppercase(),
            output,
            step,
        })
    }

    pub fn step_and_encode(&mut self, letter: char) -> Result<char> {
        self.key_press(letter).map(|k| k.output)
    }

    /// Encode at the current offsets without stepping.
    pub fn peek(&self, letter: char) -> Result<char> {
        let index = index_of(letter)?;
        Ok(letter_at(self.signal_path(index)))
    }

    /// Encrypt (or decrypt) a message.
    ///
    /// Letters are uppercased and encoded one keystroke each; anything else
    /// is copied through without moving the rotors.
    pub fn encrypt_text(&mut self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            if ch.is_ascii_alphabetic() {
                out.push(self.step_and_encode(ch)?);
            } else {
                out.push(ch);
            }
        }
        Ok(out)
    }

    pub fn offset(&self, rotor: usize) -> Result<u8> {
        self.rotors
            .get(rotor)
            .map(Rotor::offset)
            .ok_or(Error::InvalidRotorIndex(rotor))
    }

    /// Turn one rotor to `value`. Does not step or encode.
    pub fn set_offset(&mut self, rotor: usize, value: u8) -> Result<()> {
        self.rotors
            .get_mut(rotor)
            .ok_or(Error::InvalidRotorIndex(rotor))?
            .set_offset(value)
    }

    pub fn offsets(&self) -> [u8; ROTOR_COUNT] {
        [
            self.rotors[SLOW].offset(),
            self.rotors[MIDDLE].offset(),
            self.rotors[FAST].offset(),
        ]
    }

    /// Set all three offsets. Validated up front: on error nothing changes.
    pub fn set_offsets(&mut self, offsets: [u8; ROTOR_COUNT]) -> Result<()> {
        if let Some(&bad) = offsets.iter().find(|&&o| o as usize >= ALPHABET_SIZE) {
            return Err(Error::InvalidOffset(bad));
        }
        for (rotor, offset) in self.rotors.iter_mut().zip(offsets) {
            rotor.turn_to(offset);
        }
        Ok(())
    }

    /// Click a rotor window: turn that rotor one notch with no carry.
    pub fn click_rotor(&mut self, rotor: usize) -> Result<u8> {
        let rotor_ref = self
            .rotors
            .get_mut(rotor)
            .ok_or(Error::InvalidRotorIndex(rotor))?;
        rotor_ref.advance();
        Ok(rotor_ref.offset())
    }

    /// Window reading, slow to fast, e.g. `"AAB"`.
    pub fn position(&self) -> String {
        position_string(&self.offsets())
    }

    /// Set the offsets from a window reading such as `"QEV"`.
    pub fn set_position(&mut self, position: &str) -> Result<()> {
        self.set_offsets(parse_position(position)?)
    }

    /// Return to the configured starting offsets.
    pub fn reset(&mut self) {
        for (rotor, &offset) in self.rotors.iter_mut().zip(self.initial_offsets.iter()) {
            rotor.turn_to(offset);
        }
    }

    pub fn rotor(&self, rotor: usize) -> Result<&Rotor> {
        self.rotors.get(rotor).ok_or(Error::InvalidRotorIndex(rotor))
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// The configuration that rebuilds this machine at its current position.
    pub fn config(&self) -> MachineConfig {
        MachineConfig {
            rotor_wirings: [
                *self.rotors[SLOW].wiring(),
                *self.rotors[MIDDLE].wiring(),
                *self.rotors[FAST].wiring(),
            ],
            initial_offsets: self.offsets(),
            reflector_wiring: *self.reflector.wiring(),
        }
    }
}

fn position_string(offsets: &[u8; ROTOR_COUNT]) -> String {
    offsets.iter().map(|&o| letter_at(o)).collect()
}

fn parse_position(position: &str) -> Result<[u8; ROTOR_COUNT]> {
    let letters: Vec<char> = position.trim().chars().collect();
    if letters.len() != ROTOR_COUNT {
        return Err(Error::Config(format!(
            "position {:?} must be exactly {} letters",
            position, ROTOR_COUNT
        )));
    }
    Ok([
        index_of(letters[0])?,
        index_of(letters[1])?,
        index_of(letters[2])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;
    use crate::error::PermutationError;

    fn machine() -> Machine {
        Machine::new(MachineConfig::default()).unwrap()
    }

    #[test]
    fn test_default_config_builds() {
        let m = machine();
        assert_eq!(m.offsets(), [0, 0, 0]);
        assert_eq!(m.position(), "AAA");
    }

    #[test]
    fn test_known_first_keystroke() {
        // Fast rotor steps to B before encoding. Hand-traced through
        // III, II, I, the classic reflector and back.
        let mut m = machine();
        assert_eq!(m.step_and_encode('A').unwrap(), 'Z');
        assert_eq!(m.offsets(), [0, 0, 1]);
    }

    #[test]
    fn test_hello_round_trip() {
        let mut a = machine();
        let mut b = machine();
        let cipher: String = "HELLO"
            .chars()
            .map(|c| a.step_and_encode(c).unwrap())
            .collect();
        assert_ne!(cipher, "HELLO");
        let plain: String = cipher
            .chars()
            .map(|c| b.step_and_encode(c).unwrap())
            .collect();
        assert_eq!(plain, "HELLO");
    }

    #[test]
    fn test_encode_is_involution_without_stepping() {
        let mut m = machine();
        m.set_offsets([7, 19, 3]).unwrap();
        for i in 0..26u8 {
            let once = m.encode(i).unwrap();
            assert_ne!(once, i);
            assert_eq!(m.encode(once).unwrap(), i);
        }
        assert_eq!(m.offsets(), [7, 19, 3]);
    }

    #[test]
    fn test_encode_rejects_out_of_range_index() {
        let m = machine();
        assert!(matches!(m.encode(26), Err(Error::InvalidLetter(_))));
    }

    #[test]
    fn test_invalid_letter_does_not_step() {
        let mut m = machine();
        assert!(matches!(m.step_and_encode('3'), Err(Error::InvalidLetter('3'))));
        assert_eq!(m.offsets(), [0, 0, 0]);
    }

    #[test]
    fn test_lowercase_input_is_accepted() {
        let mut a = machine();
        let mut b = machine();
        assert_eq!(a.step_and_encode('q').unwrap(), b.step_and_encode('Q').unwrap());
    }

    #[test]
    fn test_peek_matches_key_press_after_step() {
        let mut m = machine();
        let pressed = m.step_and_encode('K').unwrap();
        assert_eq!(m.peek('K').unwrap(), pressed);
        assert_eq!(m.offsets(), [0, 0, 1]);
    }

    #[test]
    fn test_key_press_reports_carries() {
        let mut m = machine();
        m.set_offsets([0, 25, 25]).unwrap();
        let k = m.key_press('a').unwrap();
        assert_eq!(k.input, 'A');
        assert!(k.step.middle_advanced);
        assert!(k.step.slow_advanced);
        assert_eq!(m.offsets(), [1, 0, 0]);
    }

    #[test]
    fn test_offset_accessors() {
        let mut m = machine();
        m.set_offset(0, 12).unwrap();
        assert_eq!(m.offset(0).unwrap(), 12);
        assert!(matches!(m.offset(3), Err(Error::InvalidRotorIndex(3))));
        assert!(matches!(m.set_offset(5, 1), Err(Error::InvalidRotorIndex(5))));
        assert!(matches!(m.set_offset(1, 26), Err(Error::InvalidOffset(26))));
        assert_eq!(m.offsets(), [12, 0, 0]);
    }

    #[test]
    fn test_set_offsets_is_all_or_nothing() {
        let mut m = machine();
        assert!(m.set_offsets([1, 2, 99]).is_err());
        assert_eq!(m.offsets(), [0, 0, 0]);
    }

    #[test]
    fn test_click_rotor_has_no_carry() {
        let mut m = machine();
        m.set_offsets([0, 0, 25]).unwrap();
        assert_eq!(m.click_rotor(2).unwrap(), 0);
        assert_eq!(m.offsets(), [0, 0, 0]);
        assert!(m.click_rotor(3).is_err());
    }

    #[test]
    fn test_position_round_trip() {
        let mut m = machine();
        m.set_position("qev").unwrap();
        assert_eq!(m.position(), "QEV");
        assert_eq!(m.offsets(), [16, 4, 21]);
        assert!(m.set_position("AB").is_err());
        assert!(m.set_position("A1B").is_err());
        assert_eq!(m.position(), "QEV");
    }

    #[test]
    fn test_reset_returns_to_initial_position() {
        let config = MachineConfig::default().with_position("BCD").unwrap();
        let mut m = Machine::new(config).unwrap();
        m.encrypt_text("ATTACKATDAWN").unwrap();
        assert_ne!(m.position(), "BCD");
        m.reset();
        assert_eq!(m.position(), "BCD");
    }

    #[test]
    fn test_reset_after_manual_moves() {
        let config = MachineConfig::default().with_position("ZZY").unwrap();
        let mut m = Machine::new(config).unwrap();
        m.set_offsets([3, 4, 5]).unwrap();
        m.click_rotor(0).unwrap();
        m.step();
        assert_eq!(m.offsets(), [4, 4, 6]);
        m.reset();
        assert_eq!(m.offsets(), [25, 25, 24]);
        assert_eq!(m.position(), "ZZY");
    }

    #[test]
    fn test_encrypt_text_passes_non_letters_through() {
        let mut a = machine();
        let cipher = a.encrypt_text("Hello, World!").unwrap();
        assert_eq!(cipher.len(), "Hello, World!".len());
        assert_eq!(&cipher[5..7], ", ");
        assert!(cipher.ends_with('!'));
        // Ten letters, ten steps
        assert_eq!(a.offsets(), [0, 0, 10]);

        let mut b = machine();
        assert_eq!(b.encrypt_text(&cipher).unwrap(), "HELLO, WORLD!");
    }

    #[test]
    fn test_construction_rejects_bad_reflector() {
        let mut config = MachineConfig::default();
        config.reflector_wiring = config.rotor_wirings[0];
        assert!(matches!(Machine::new(config), Err(Error::InvalidReflector(_))));
    }

    #[test]
    fn test_construction_rejects_bad_offset() {
        let mut config = MachineConfig::default();
        config.initial_offsets = [0, 26, 0];
        assert!(matches!(Machine::new(config), Err(Error::InvalidOffset(26))));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = MachineConfig::from_presets(["IV", "V", "I"], "B")
            .unwrap()
            .with_position("XYZ")
            .unwrap();
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("rotorWirings"));
        assert!(json.contains("initialOffsets"));
        assert!(json.contains("reflectorWiring"));
        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_config_json_rejects_duplicate_wiring() {
        let json = r#"{
            "rotorWirings": ["AACDEFGHIJKLMNOPQRSTUVWXYZ", "AJDKSIRUXBLHWTMVZNYEQCGFPO", "BDFHJLCPRTXVZNYEIWGAKMUSQO"],
            "initialOffsets": [0, 0, 0],
            "reflectorWiring": "IXUHFEZDAOMTKQJWNSRLCYPBVG"
        }"#;
        assert!(matches!(
            MachineConfig::from_json(json),
            Err(Error::InvalidPermutation(PermutationError::Duplicate {
                value: 0,
                first: 0,
                second: 1
            }))
        ));
    }

    #[test]
    fn test_config_json_malformed_is_json_error() {
        assert!(matches!(
            MachineConfig::from_json(r#"{"rotorWirings": "#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_config_json_offsets_default_to_zero() {
        let json = format!(
            r#"{{"rotorWirings": ["{a}", "{b}", "{c}"], "reflectorWiring": "{r}"}}"#,
            a = presets::ROTOR_I,
            b = presets::ROTOR_II,
            c = presets::ROTOR_III,
            r = presets::REFLECTOR_CLASSIC
        );
        assert_eq!(MachineConfig::from_json(&json).unwrap(), MachineConfig::default());
    }

    #[test]
    fn test_config_json_rejects_unknown_field() {
        let json = format!(
            r#"{{"rotorWirings": ["{a}", "{a}", "{a}"], "reflectorWiring": "{r}", "plugboard": "AB"}}"#,
            a = ALPHABET,
            r = presets::REFLECTOR_CLASSIC
        );
        assert!(MachineConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_config_json_defaults_offsets() {
        let json = format!(
            r#"{{"rotorWirings": ["{a}", "{a}", "{a}"], "reflectorWiring": "{r}"}}"#,
            a = ALPHABET,
            r = presets::REFLECTOR_CLASSIC
        );
        let config = MachineConfig::from_json(&json).unwrap();
        assert_eq!(config.initial_offsets, [0, 0, 0]);
    }

    #[test]
    fn test_config_captures_current_position() {
        let mut m = machine();
        m.encrypt_text("ABCDE").unwrap();
        let mut clone = Machine::new(m.config()).unwrap();
        assert_eq!(clone.position(), "AAF");
        assert_eq!(
            clone.step_and_encode('X').unwrap(),
            m.step_and_encode('X').unwrap()
        );
    }
}
