// Entry point: program main
// Dispatches the suggest and countdown subcommands, and runs the TUI otherwise.

use clap::Parser;
use std::io::{self, Write};
use std::process;
use starlight::config::{Cli, Command, Config};
use starlight::countdown;
use starlight::logging::{self, LogTarget};
use starlight::schedule::wall_clock_ms;
use starlight::suggest::suggest_lines;

async fn print_suggestions(config: &Config, query: &str, html: bool) -> Result<(), String> {
    let lines = suggest_lines(query, config.name_source(), html)
        .await
        .map_err(|e| e.to_string())?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

// Redraws one status line per tick until stdout goes away.
async fn watch_countdown(config: &Config) -> Result<(), String> {
    let mut stdout = io::stdout();
    countdown::watch(config.board(), config.tick, |board| {
        write!(stdout, "\r\x1b[2K{}", board.status_line())
            .and_then(|_| stdout.flush())
            .map(|_| true)
            .map_err(|e| format!("failed to write countdown: {e}"))
    })
    .await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    let log_target = match (&config.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, None) => LogTarget::Discard,
        (None, Some(_)) => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(log_target) {
        eprintln!("{e}");
        process::exit(2);
    }

    let outcome = match &cli.command {
        Some(Command::Suggest { query, html }) => print_suggestions(&config, query, *html).await,
        Some(Command::Countdown { watch: false, .. }) => {
            let mut board = config.board();
            board.tick_all(wall_clock_ms());
            println!("{}", board.status_line());
            Ok(())
        }
        Some(Command::Countdown { watch: true, .. }) => watch_countdown(&config).await,
        None => starlight::ui::run(&config).await.map(|link| {
            // Enter on a suggestion: hand its link to the caller
            if !link.is_empty() {
                println!("{link}");
            }
        }),
    };

    if let Err(e) = outcome {
        eprintln!("{e}");
        process::exit(2);
    }
}
