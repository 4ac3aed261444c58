// src/cli.rs
use crate::filter_state::FilterState;
use crate::timeline_event::Axis;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "reeltime",
    version,
    about = "Browse podcast episodes on a timeline of film release dates"
)]
pub struct Cli {
    /// Dataset location: a JSON file path or an http(s) URL
    #[arg(short, long, global = true, default_value = "data/episodes.json")]
    pub dataset: String,

    /// Which release date places events on the timeline
    #[arg(long, global = true, value_enum, default_value_t = AxisArg::Film)]
    pub axis: AxisArg,

    /// Log file used while the terminal UI is running
    #[arg(long, default_value = "reeltime.log")]
    pub log_file: PathBuf,

    /// Log level (defaults to info for the UI, warn for `list`)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the events that match the given filters, with their timeline positions
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Keep only this director (repeatable)
    #[arg(long = "director")]
    pub directors: Vec<String>,

    /// Keep events carrying any of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Case-insensitive text to find in title, description, content or director
    #[arg(long, default_value = "")]
    pub search: String,
}

impl ListArgs {
    pub fn filter_state(&self, axis: Axis) -> FilterState {
        let mut state = FilterState::new();
        for director in &self.directors {
            state.selected_directors.insert(director.clone());
        }
        for tag in &self.tags {
            state.selected_tags.insert(tag.clone());
        }
        state.set_search(&self.search);
        state.set_axis(axis);
        state
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisArg {
    Film,
    Episode,
}

impl From<AxisArg> for Axis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::Film => Axis::Film,
            AxisArg::Episode => Axis::Episode,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["reeltime"]).unwrap();
        assert_eq!(cli.dataset, "data/episodes.json");
        assert_eq!(cli.axis, AxisArg::Film);
        assert!(cli.log_level.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_with_filters() {
        let cli = Cli::try_parse_from([
            "reeltime", "list", "--dataset", "data.json", "--axis", "episode", "--director",
            "John Carpenter", "--tag", "horror", "--tag", "sci-fi", "--search", "thing",
        ])
        .unwrap();
        assert_eq!(cli.dataset, "data.json");
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list subcommand");
        };
        let state = args.filter_state(cli.axis.into());
        assert_eq!(state.axis, Axis::Episode);
        assert_eq!(state.selected_tags.len(), 2);
        assert!(state.selected_directors.contains("John Carpenter"));
        assert_eq!(state.search_term, "thing");
    }

    #[test]
    fn test_bad_axis_is_rejected() {
        assert!(Cli::try_parse_from(["reeltime", "--axis", "sideways"]).is_err());
    }
}
