//! Headless machine panel: keyboard, lamp board, and rotor windows.
//!
//! Every on-screen object implements [`Control`]. An input event names a
//! target; the panel routes it to that object's handler, which acts on the
//! shared [`Console`] state. Handlers a control does not need keep their
//! default no-op.
//!
//! - Pressing a key steps the machine, encodes, and lights the lamp.
//! - Releasing a key re-encodes at the current position (no step) and turns
//!   that lamp off.
//! - Clicking a rotor window turns that rotor one notch with no carry.

use crate::error::Result;
use enigma_sim_core::alphabet::{index_of, letter_at, ALPHABET_SIZE};
use enigma_sim_core::machine::ROTOR_COUNT;
use enigma_sim_core::metrics::Metrics;
use enigma_sim_core::{Keystroke, Machine};
use tracing::debug;

/// Mutable state the controls act on.
#[derive(Debug)]
pub struct Console {
    pub machine: Machine,
    pub lamps: LampBoard,
    pub metrics: Metrics,
    keys_down: [bool; ALPHABET_SIZE],
}

impl Console {
    pub fn new(machine: Machine) -> Self {
        Self {
            machine,
            lamps: LampBoard::default(),
            metrics: Metrics::new(),
            keys_down: [false; ALPHABET_SIZE],
        }
    }

    /// Step, encode, hold the key down, and light the resulting lamp.
    pub fn press_key(&mut self, letter: char) -> Result<Keystroke> {
        let keystroke = self.machine.key_press(letter)?;
        self.metrics.record_keystroke(&keystroke);
        self.keys_down[index_of(letter)? as usize] = true;
        self.lamps.light(index_of(keystroke.output)?);
        Ok(keystroke)
    }

    pub fn is_key_down(&self, letter: char) -> bool {
        index_of(letter)
            .map(|i| self.keys_down[i as usize])
            .unwrap_or(false)
    }
}

/// Which lamps are lit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LampBoard {
    lit: [bool; ALPHABET_SIZE],
}

impl LampBoard {
    pub fn light(&mut self, index: u8) {
        self.lit[index as usize] = true;
    }

    pub fn extinguish(&mut self, index: u8) {
        self.lit[index as usize] = false;
    }

    /// Letters whose lamps are on, in alphabet order.
    pub fn lit(&self) -> Vec<char> {
        self.lit
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| letter_at(i as u8))
            .collect()
    }
}

/// Capability interface for panel objects.
pub trait Control {
    fn on_press(&self, _console: &mut Console) -> Result<()> {
        Ok(())
    }

    fn on_release(&self, _console: &mut Console) -> Result<()> {
        Ok(())
    }

    fn on_click(&self, _console: &mut Console) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Key {
    letter: char,
}

impl Control for Key {
    fn on_press(&self, console: &mut Console) -> Result<()> {
        console.press_key(self.letter).map(|_| ())
    }

    fn on_release(&self, console: &mut Console) -> Result<()> {
        console.keys_down[index_of(self.letter)? as usize] = false;
        let lamp = console.machine.peek(self.letter)?;
        console.lamps.extinguish(index_of(lamp)?);
        Ok(())
    }
}

/// Lamps only display; they ignore input.
#[derive(Debug, Clone, Copy)]
pub struct Lamp;

impl Control for Lamp {}

#[derive(Debug, Clone, Copy)]
pub struct RotorWindow {
    rotor: usize,
}

impl Control for RotorWindow {
    fn on_click(&self, console: &mut Console) -> Result<()> {
        let offset = console.machine.click_rotor(self.rotor)?;
        console.metrics.rotor_clicks += 1;
        debug!(rotor = self.rotor, window = %letter_at(offset), "rotor clicked");
        Ok(())
    }
}

/// Something on the panel an event can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Key(char),
    Lamp(char),
    Rotor(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Press(Target),
    Release(Target),
    Click(Target),
}

/// How `Panel::feed` treats its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Letters are keys; everything else is copied through
    Message,
    /// Letters are keys; `1`-`3` click rotor windows; whitespace is
    /// copied; anything else is rejected
    Keyboard,
}

pub struct Panel {
    console: Console,
    keys: [Key; ALPHABET_SIZE],
    lamps: [Lamp; ALPHABET_SIZE],
    windows: [RotorWindow; ROTOR_COUNT],
}

impl Panel {
    pub fn new(machine: Machine) -> Self {
        Self {
            console: Console::new(machine),
            keys: std::array::from_fn(|i| Key {
                letter: letter_at(i as u8),
            }),
            lamps: [Lamp; ALPHABET_SIZE],
            windows: std::array::from_fn(|rotor| RotorWindow { rotor }),
        }
    }

    /// Route an event to the control under its target.
    ///
    /// Events on nothing (a non-letter key, a fourth rotor) are ignored,
    /// like a click on bare background.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        let Self {
            console,
            keys,
            lamps,
            windows,
        } = self;

        let target = match event {
            Event::Press(t) | Event::Release(t) | Event::Click(t) => t,
        };
        let control: &dyn Control = match target {
            Target::Key(letter) => match index_of(letter) {
                Ok(i) => &keys[i as usize] as &dyn Control,
                Err(_) => return Ok(()),
            },
            Target::Lamp(letter) => match index_of(letter) {
                Ok(i) => &lamps[i as usize] as &dyn Control,
                Err(_) => return Ok(()),
            },
            Target::Rotor(rotor) => match windows.get(rotor) {
                Some(window) => window as &dyn Control,
                None => return Ok(()),
            },
        };

        match event {
            Event::Press(_) => control.on_press(console),
            Event::Release(_) => control.on_release(console),
            Event::Click(_) => control.on_click(console),
        }
    }

    /// Press and release one key; returns the letter that lit up.
    ///
    /// Other keys held down keep their lamps lit, so the answer comes from
    /// the keystroke itself rather than from the lamp board.
    pub fn type_key(&mut self, letter: char) -> Result<char> {
        let keystroke = self.console.press_key(letter)?;
        self.dispatch(Event::Release(Target::Key(letter)))?;
        Ok(keystroke.output)
    }

    /// Feed a run of characters and return what the lamps showed.
    pub fn feed(&mut self, text: &str, mode: InputMode) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                c if c.is_ascii_alphabetic() => out.push(self.type_key(c)?),
                '1'..='3' if mode == InputMode::Keyboard => {
                    let rotor = ch as usize - '1' as usize;
                    self.dispatch(Event::Click(Target::Rotor(rotor)))?;
                }
                c if mode == InputMode::Message || c.is_whitespace() => {
                    self.console.metrics.passthrough_chars += 1;
                    out.push(c);
                }
                c => {
                    self.console.metrics.rejected_inputs += 1;
                    debug!(input = ?c, "ignored key");
                }
            }
        }
        Ok(out)
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn position(&self) -> String {
        self.console.machine.position()
    }
}
