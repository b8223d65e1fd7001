use crate::countdown::{Container, CountdownBoard, CounterElement, TICK_INTERVAL, parse_target};
use crate::loader::{FileSource, HttpSource, NameSource};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

#[derive(Parser, Debug)]
#[command(name = "starlight", version)]
#[command(about = "Character name suggestions and event countdowns")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Countdown target for the interactive view, `SECONDS` or `LABEL=SECONDS` (repeatable)
    #[arg(long = "count-to", value_name = "TARGET")]
    pub count_to: Vec<CounterSpec>,

    /// Counter refresh period in milliseconds
    #[arg(long, env = "STARLIGHT_TICK_MS", default_value_t = 500, global = true,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Write logs to this file (the interactive view discards logs otherwise)
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Base URL serving the names document at /suggest
    #[arg(long, env = "STARLIGHT_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Read the names document from a local file instead of the endpoint
    #[arg(long, env = "STARLIGHT_NAMES_FILE", value_name = "PATH", global = true)]
    pub names_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the suggestions for QUERY
    Suggest {
        query: String,

        /// Print HTML anchors instead of plain lines
        #[arg(long)]
        html: bool,
    },
    /// Print the time left until each TARGET
    Countdown {
        #[arg(required = true, value_name = "TARGET")]
        targets: Vec<CounterSpec>,

        /// Keep refreshing on the tick interval
        #[arg(long)]
        watch: bool,
    },
}

/// A counter given on the command line: `SECONDS` or `LABEL=SECONDS`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    pub label: String,
    pub count_to: String,
}

impl FromStr for CounterSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, raw) = match s.rsplit_once('=') {
            Some((label, raw)) => (label.trim(), raw.trim()),
            None => ("", s.trim()),
        };
        parse_target(raw).map_err(|e| e.to_string())?;
        Ok(CounterSpec {
            label: label.to_string(),
            count_to: raw.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NamesConfig {
    Http { endpoint: String },
    File { path: PathBuf },
}

/// Resolved settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub names: NamesConfig,
    pub tick: Duration,
    pub counters: Vec<CounterSpec>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            names: NamesConfig::Http {
                endpoint: DEFAULT_ENDPOINT.to_string(),
            },
            tick: TICK_INTERVAL,
            counters: Vec::new(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let names = match &cli.source.names_file {
            Some(path) => NamesConfig::File { path: path.clone() },
            None => NamesConfig::Http {
                endpoint: cli.source.endpoint.clone(),
            },
        };
        let counters = match &cli.command {
            Some(Command::Countdown { targets, .. }) => targets.clone(),
            _ => cli.count_to.clone(),
        };
        Config {
            names,
            tick: Duration::from_millis(cli.tick_ms),
            counters,
            log_file: cli.log_file.clone(),
        }
    }

    pub fn name_source(&self) -> Arc<dyn NameSource> {
        let source: Arc<dyn NameSource> = match &self.names {
            NamesConfig::Http { endpoint } => Arc::new(HttpSource::new(endpoint)),
            NamesConfig::File { path } => Arc::new(FileSource::new(path)),
        };
        info!(source = %source.describe(), "names source configured");
        source
    }

    /// The countdown section: a container is present whenever counters were
    /// configured.
    pub fn board(&self) -> CountdownBoard {
        let counters: Vec<CounterElement> = self
            .counters
            .iter()
            .map(|c| CounterElement::new(&c.label, &c.count_to))
            .collect();
        let container = if counters.is_empty() {
            None
        } else {
            Some(Container::default())
        };
        CountdownBoard::new(container, counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_spec_accepts_plain_and_labelled_targets() {
        let plain: CounterSpec = "1700000000".parse().unwrap();
        assert_eq!(plain.label, "");
        assert_eq!(plain.count_to, "1700000000");
        let labelled: CounterSpec = "Live Groove = 1700000000.5".parse().unwrap();
        assert_eq!(labelled.label, "Live Groove");
        assert_eq!(labelled.count_to, "1700000000.5");
        assert!("tomorrow".parse::<CounterSpec>().is_err());
        assert!("event=".parse::<CounterSpec>().is_err());
    }

    #[test]
    fn names_file_overrides_endpoint() {
        let cli = Cli::try_parse_from(["starlight", "--names-file", "names.json", "suggest", "rin"]).unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(
            config.names,
            NamesConfig::File {
                path: PathBuf::from("names.json")
            }
        );
        assert!(matches!(cli.command, Some(Command::Suggest { ref query, html: false }) if query == "rin"));
    }

    #[test]
    fn countdown_targets_become_the_board() {
        let cli = Cli::try_parse_from(["starlight", "countdown", "a=100", "200", "--tick-ms", "250"]).unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.tick, Duration::from_millis(250));
        let board = config.board();
        assert_eq!(board.counters.len(), 2);
        assert_eq!(board.counters[0].label, "a");
        assert_eq!(board.counters[1].count_to(), "200");
        assert!(board.container.is_some());
    }

    #[test]
    fn zero_tick_is_rejected() {
        assert!(Cli::try_parse_from(["starlight", "--tick-ms", "0"]).is_err());
    }

    #[test]
    fn no_counters_means_no_container() {
        let board = Config::default().board();
        assert!(board.container.is_none());
        assert!(board.counters.is_empty());
    }
}
