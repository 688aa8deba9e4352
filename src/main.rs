use anyhow::Result;

use poker_league_standings::cli::Command;
use poker_league_standings::{handle_build, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Build { data_dir, out } => handle_build(data_dir, out),
        Command::Serve { port, document } => handle_serve(port, document),
    }
}
