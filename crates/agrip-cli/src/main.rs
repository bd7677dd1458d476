use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use agrip::{EchoOracle, GenerationConfig, Summarizer, TextTokenizer};
use agrip_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let mut config = GenerationConfig {
        max_length: cli.max_length,
        min_length: cli.min_length,
        temperature: cli.temperature,
    };
    if cli.greedy {
        config = config.greedy();
    }
    config.validate()?;

    let tokenizer = TextTokenizer::from_file(&cli.tokenizer)?;
    // Placeholder scoring backend; a native model runtime plugs in behind
    // the same ScoringOracle seam.
    let oracle = EchoOracle::new(tokenizer.vocab_size());
    let mut summarizer = Summarizer::new(tokenizer, Box::new(oracle)).with_config(config);

    if !cli.quiet {
        eprintln!("Tokenizer loaded.");
        eprintln!("Enter text to summarize (or 'quit' to exit).");
        eprintln!("An empty line submits the accumulated input:");
    }

    let stdin = io::stdin();
    let mut full_text = String::new();
    prompt(cli.quiet)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line == "quit" {
            break;
        }

        if line.is_empty() {
            if full_text.is_empty() {
                prompt(cli.quiet)?;
                continue;
            }

            if !cli.quiet {
                eprintln!(
                    "Summarizing input of {} characters...",
                    full_text.len()
                );
            }

            // A failed request is reported and the session continues.
            match summarizer.summarize(&full_text) {
                Ok(summary) => println!("\nSummary: {}\n", summary),
                Err(e) => eprintln!("Error during summarization: {:#}", e),
            }

            full_text.clear();
            if !cli.quiet {
                eprintln!("Enter text to summarize (or 'quit' to exit):");
            }
            prompt(cli.quiet)?;
        } else {
            if !full_text.is_empty() {
                full_text.push('\n');
            }
            full_text.push_str(&line);
        }
    }

    Ok(())
}

fn prompt(quiet: bool) -> Result<()> {
    if !quiet {
        eprint!("> ");
        io::stderr().flush()?;
    }
    Ok(())
}
