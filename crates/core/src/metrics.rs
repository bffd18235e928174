//! Session metrics for a simulator run.
//!
//! Tracks what happened at the keyboard:
//! - Keystrokes encoded and characters passed through
//! - Rotor advances (fast, middle, slow) and manual rotor clicks
//! - Rejected inputs
//! - Timing
//!
//! # Thread Safety
//!
//! `Metrics` is NOT thread-safe. Keep it next to the machine it observes,
//! behind the same lock if the machine is shared.

use crate::machine::Keystroke;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the session started
    pub start_time: Instant,

    /// When the session ended (set on completion)
    pub end_time: Option<Instant>,

    // === Keyboard ===
    /// Letters encoded (one rotor step each)
    pub keystrokes: u64,

    /// Non-letter characters copied through unchanged
    pub passthrough_chars: u64,

    /// Inputs rejected by the machine
    pub rejected_inputs: u64,

    // === Rotors ===
    /// Fast rotor advances (equal to keystrokes)
    pub fast_advances: u64,

    /// Middle rotor advances from carries
    pub middle_advances: u64,

    /// Slow rotor advances from carries
    pub slow_advances: u64,

    /// Manual rotor-window clicks
    pub rotor_clicks: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            keystrokes: 0,
            passthrough_chars: 0,
            rejected_inputs: 0,
            fast_advances: 0,
            middle_advances: 0,
            slow_advances: 0,
            rotor_clicks: 0,
        }
    }

    pub fn record_keystroke(&mut self, keystroke: &Keystroke) {
        self.keystrokes += 1;
        self.fast_advances += 1;
        if keystroke.step.middle_advanced {
            self.middle_advances += 1;
        }
        if keystroke.step.slow_advanced {
            self.slow_advances += 1;
        }
    }

    /// Mark the session as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Fraction of keystrokes that carried into the middle rotor.
    pub fn carry_rate(&self) -> f64 {
        if self.keystrokes == 0 {
            0.0
        } else {
            self.middle_advances as f64 / self.keystrokes as f64
        }
    }

    /// Keystrokes per second.
    pub fn throughput(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.keystrokes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary. Goes to stderr so stdout carries
    /// only cipher text.
    pub fn print_summary(&self) {
        eprintln!("\n=== Session Summary ===");
        eprintln!("Duration: {} ms", self.duration().as_millis());
        eprintln!();
        eprintln!("=== Keyboard ===");
        eprintln!("Keystrokes: {}", self.keystrokes);
        eprintln!("Passed through: {}", self.passthrough_chars);
        eprintln!("Rejected: {}", self.rejected_inputs);
        eprintln!();
        eprintln!("=== Rotors ===");
        eprintln!("Fast advances: {}", self.fast_advances);
        eprintln!(
            "Middle advances: {} ({:.2}% of keystrokes)",
            self.middle_advances,
            self.carry_rate() * 100.0
        );
        eprintln!("Slow advances: {}", self.slow_advances);
        eprintln!("Manual clicks: {}", self.rotor_clicks);
        eprintln!();
        eprintln!("Throughput: {:.0} keystrokes/s", self.throughput());
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             keystrokes={}\n\
             passthrough_chars={}\n\
             rejected_inputs={}\n\
             fast_advances={}\n\
             middle_advances={}\n\
             slow_advances={}\n\
             rotor_clicks={}\n\
             carry_rate={:.4}\n",
            self.duration().as_millis(),
            self.keystrokes,
            self.passthrough_chars,
            self.rejected_inputs,
            self.fast_advances,
            self.middle_advances,
            self.slow_advances,
            self.rotor_clicks,
            self.carry_rate(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
