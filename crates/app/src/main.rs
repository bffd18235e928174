//! enigma-sim: command-line front end for the rotor cipher machine.
//!
//! Reads a message (arguments, stdin, or a generated sample), types it on a
//! headless panel, and writes the lamp output to stdout. Configuration,
//! logs and metrics go to stderr.

use enigma_sim::config::{Config, InputSource};
use enigma_sim::panel::{InputMode, Panel};
use enigma_sim::{input_gen, logging, AppError, Result};
use enigma_sim_core::Machine;
use std::io::{BufRead, Read, Write};
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        // --help, --version and usage errors
        Err(AppError::Cli(err)) => err.exit(),
        Err(err) => {
            eprintln!("enigma-sim: {}", err);
            return ExitCode::FAILURE;
        }
    };
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("enigma-sim: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    logging::init_tracing(config.verbosity)?;

    if config.dump_config {
        println!("{}", config.machine.to_json_pretty()?);
        return Ok(());
    }
    if config.print_config {
        config.print();
    }

    let machine = Machine::new(config.machine.clone())?;
    info!(position = %machine.position(), "machine ready");
    let mut panel = Panel::new(machine);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &config.input {
        InputSource::Text(text) => {
            writeln!(out, "{}", panel.feed(text, InputMode::Message)?)?;
        }
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            write!(out, "{}", panel.feed(&text, InputMode::Message)?)?;
        }
        InputSource::Sample { seed, letters } => {
            let sample = input_gen::generate_sample_message(*seed, *letters);
            eprintln!("Sample (seed {}): {}", seed, sample);
            writeln!(out, "{}", panel.feed(&sample, InputMode::Message)?)?;
        }
        InputSource::Interactive => run_interactive(&mut panel, &mut out)?,
    }
    out.flush()?;

    let metrics = &mut panel.console_mut().metrics;
    metrics.complete();
    if config.print_metrics {
        metrics.print_summary();
    }
    info!(position = %panel.position(), "session finished");
    Ok(())
}

/// One line of keys at a time; echoes the lamps and the rotor windows.
fn run_interactive(panel: &mut Panel, out: &mut impl Write) -> Result<()> {
    eprintln!("Type letters; 1/2/3 click the slow/middle/fast rotor. Ctrl-D to quit.");
    eprintln!("[{}]", panel.position());
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let lamps = panel.feed(&line, InputMode::Keyboard)?;
        writeln!(out, "{}", lamps)?;
        out.flush()?;
        eprintln!("[{}]", panel.position());
    }
    Ok(())
}
