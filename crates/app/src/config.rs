//! Configuration for the enigma-sim application.
//!
//! Parses command-line arguments and resolves them into a machine
//! configuration plus an input source.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: rotors I, II, III, the classic
//! reflector, position AAA, message read from stdin. Every resolved setting
//! can be printed (`--print-config`) or dumped as JSON (`--dump-config`) so
//! runs are reproducible.
//!
//! # Machine source
//!
//! Exactly one of:
//! - `--config <PATH>`: a JSON `MachineConfig`
//! - `--seed <N>`: random wirings and offsets drawn from the seed
//! - `--rotors` / `--reflector`: named presets (the default)
//!
//! `--position` overrides the starting offsets of any of them.

use crate::error::{AppError, Result};
use crate::input_gen;
use clap::{ArgAction, Parser};
use enigma_sim_core::presets;
use enigma_sim_core::MachineConfig;
use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "enigma-sim")]
#[command(version, about = "Three-rotor reflecting cipher machine simulator")]
#[command(after_help = "EXAMPLES:
    enigma-sim HELLO                          # Encrypt with I-II-III at AAA
    echo GNSOU | enigma-sim                   # Decrypt from stdin
    enigma-sim --rotors IV,V,I --reflector B --position QEV \"ATTACK AT DAWN\"
    enigma-sim --seed 42 --sample 200         # Random wiring, generated message
    enigma-sim --interactive                  # Type keys; 1/2/3 click rotor windows")]
pub struct Cli {
    /// Message to encrypt (default: read stdin)
    #[arg(conflicts_with = "sample")]
    pub message: Vec<String>,

    /// Rotor presets, slow to fast (default: I,II,III)
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["config", "seed"])]
    pub rotors: Option<Vec<String>>,

    /// Reflector preset: A, B, C or CLASSIC (default: CLASSIC)
    #[arg(long, conflicts_with_all = ["config", "seed"])]
    pub reflector: Option<String>,

    /// Starting window letters, slow to fast (e.g. AAA)
    #[arg(long)]
    pub position: Option<String>,

    /// Machine configuration file (JSON)
    #[arg(long, conflicts_with = "seed")]
    pub config: Option<PathBuf>,

    /// Seed for random wirings (and for --sample)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Generate a sample message with this many letters
    #[arg(long, value_name = "LETTERS")]
    pub sample: Option<usize>,

    /// Read keys line by line; 1, 2, 3 click the rotor windows
    #[arg(short, long, conflicts_with_all = ["message", "sample"])]
    pub interactive: bool,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Print the machine configuration as JSON and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Don't print metrics summary
    #[arg(long)]
    pub no_metrics: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Where the machine wiring came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineSource {
    Presets { rotors: [String; 3], reflector: String },
    File(PathBuf),
    Random { seed: u64 },
}

/// Where the text to encrypt comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    Stdin,
    Sample { seed: u64, letters: usize },
    Interactive,
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Machine ===
    /// Resolved machine configuration
    pub machine: MachineConfig,

    /// Where the machine wiring came from
    pub source: MachineSource,

    // === Input ===
    pub input: InputSource,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to dump the machine config as JSON and exit
    pub dump_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,

    /// `-v` count
    pub verbosity: u8,
}

impl Config {
    /// Parse configuration from command-line arguments (including argv[0]).
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_cli(Cli::try_parse_from(args)?)
    }

    /// Resolve parsed arguments into a configuration.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let (source, machine) = if let Some(path) = cli.config {
            let machine = MachineConfig::from_json_file(&path)?;
            (MachineSource::File(path), machine)
        } else if let Some(seed) = cli.seed {
            (MachineSource::Random { seed }, input_gen::random_config(seed)?)
        } else {
            let rotors = match cli.rotors {
                Some(names) => <[String; 3]>::try_from(names).map_err(|names| {
                    AppError::Config(format!(
                        "--rotors needs exactly 3 names, got {}",
                        names.len()
                    ))
                })?,
                None => presets::DEFAULT_ROTORS.map(String::from),
            };
            let reflector = cli
                .reflector
                .unwrap_or_else(|| presets::DEFAULT_REFLECTOR.to_string());
            let machine = MachineConfig::from_presets(
                [rotors[0].as_str(), rotors[1].as_str(), rotors[2].as_str()],
                &reflector,
            )?;
            (MachineSource::Presets { rotors, reflector }, machine)
        };

        let machine = match cli.position {
            Some(position) => machine.with_position(&position)?,
            None => machine,
        };

        let input = if cli.interactive {
            InputSource::Interactive
        } else if let Some(letters) = cli.sample {
            InputSource::Sample {
                seed: cli.seed.unwrap_or_else(time_seed),
                letters,
            }
        } else if !cli.message.is_empty() {
            InputSource::Text(cli.message.join(" "))
        } else {
            InputSource::Stdin
        };

        Ok(Config {
            machine,
            source,
            input,
            print_config: cli.print_config,
            dump_config: cli.dump_config,
            print_metrics: !cli.no_metrics,
            verbosity: cli.verbose,
        })
    }

    /// Print the configuration in human-readable form (to stderr).
    pub fn print(&self) {
        eprintln!("=== Configuration ===");
        match &self.source {
            MachineSource::Presets { rotors, reflector } => {
                eprintln!("Rotors:    {} (slow to fast)", rotors.join("-"));
                eprintln!("Reflector: {}", reflector);
            }
            MachineSource::File(path) => eprintln!("Config file: {}", path.display()),
            MachineSource::Random { seed } => eprintln!("Random wiring, seed {}", seed),
        }
        for (i, wiring) in self.machine.rotor_wirings.iter().enumerate() {
            eprintln!("Rotor {}:   {}", i, wiring);
        }
        eprintln!("Reflector: {}", self.machine.reflector_wiring);
        let position: String = self
            .machine
            .initial_offsets
            .iter()
            .map(|&o| enigma_sim_core::alphabet::letter_at(o))
            .collect();
        eprintln!("Position:  {}", position);
        eprintln!();
        match &self.input {
            InputSource::Text(_) => eprintln!("Input: command line"),
            InputSource::Stdin => eprintln!("Input: stdin"),
            InputSource::Sample { seed, letters } => {
                eprintln!("Input: generated sample, {} letters, seed {}", letters, seed)
            }
            InputSource::Interactive => eprintln!("Input: interactive keyboard"),
        }
        eprintln!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
