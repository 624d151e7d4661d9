use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lemon::{LemonError, Repl};

#[derive(Parser)]
#[command(author, version, about = "Lemon runtime console")]
struct Args {
    /// Log runtime activity at debug level (overrides LEMON_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a file of console commands, one per line
    Run { script: PathBuf },
    /// Start an interactive console session
    Repl,
    /// Evaluate a single console command
    Eval {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

fn main() -> Result<(), LemonError> {
    let args = Args::parse();
    init_logging(args.verbose);
    match args.command.unwrap_or(Command::Repl) {
        Command::Run { script } => run_script(script),
        Command::Repl => {
            let mut repl = Repl::new();
            repl.run()
        }
        Command::Eval { command } => {
            let mut repl = Repl::new();
            if let Some(value) = repl.execute_line(&join_words(&command))? {
                println!("{value}");
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("LEMON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Re-quotes words the shell already split so spaces inside them survive.
fn join_words(words: &[String]) -> String {
    words
        .iter()
        .map(|word| {
            if word.chars().any(char::is_whitespace) {
                format!("\"{}\"", word.replace('\\', "\\\\").replace('"', "\\\""))
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_script(path: PathBuf) -> Result<(), LemonError> {
    let source = fs::read_to_string(&path)?;
    let mut repl = Repl::new();
    repl.execute_script(&source, |value| println!("{value}"))
}
