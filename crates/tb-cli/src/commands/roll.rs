use std::path::PathBuf;

use colored::Colorize;

use tb_engine::{EngineConfig, Reporter};

/// Prints results to stdout, optionally preceded by the input.
struct ConsoleReporter {
    echo: bool,
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, original: &str, result: &str) {
        if self.echo {
            println!("  {} {}", original.dimmed(), "→".dimmed());
        }
        if result.is_empty() {
            println!("  {}", "(nothing)".italic().dimmed());
        } else {
            println!("  {}", result.bold());
        }
    }
}

pub fn run(
    files: &[PathBuf],
    text: &str,
    seed: Option<u64>,
    count: u64,
    echo: bool,
) -> Result<(), String> {
    let mut config = EngineConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut session = super::load_session(files, config)?;
    session.set_reporter(ConsoleReporter { echo });

    for _ in 0..count {
        session.evaluate(text).map_err(|e| e.to_string())?;
    }

    Ok(())
}
