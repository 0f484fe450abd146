//! Command-line argument definitions

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::{Error, Result};

/// Extract per-station point forecasts from a MOSMIX KML bulletin.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mosmix-processor",
    version,
    about = "Extracts station forecasts with derived rolling-window statistics from MOSMIX KML bulletins",
    long_about = "Reads a DWD MOSMIX KML bulletin in one streaming pass, extracts the \
                  requested stations and enriches every forecast step with locally \
                  computed rolling-window statistics (3/12/24-hour precipitation and \
                  sunshine accumulations, 3-hour weather-code maximum and the daily \
                  temperature mean). Each station is written as a semicolon-CSV or \
                  JSON table."
)]
pub struct Args {
    /// MOSMIX KML bulletin to read. The filename must carry the model run
    /// time as its third underscore-separated token (yyyyMMddHH, UTC), e.g.
    /// MOSMIX_S_2018032907_240.kml
    #[arg(long = "kml", value_name = "FILE")]
    pub kml_file: PathBuf,

    /// Station ids to extract, comma-separated
    #[arg(long = "stations", value_name = "ID1,ID2,...")]
    pub stations: StationList,

    /// Directory for the per-station output files; stdout when omitted
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Validate arguments that clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if !self.kml_file.is_file() {
            return Err(Error::configuration(format!(
                "KML bulletin '{}' does not exist or is not a file",
                self.kml_file.display()
            )));
        }
        if let Some(dir) = &self.out_dir {
            if !dir.is_dir() {
                return Err(Error::configuration(format!(
                    "output directory '{}' does not exist",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Log level derived from the verbosity flags.
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Comma-separated list of station ids.
#[derive(Debug, Clone)]
pub struct StationList {
    pub ids: Vec<String>,
}

impl FromStr for StationList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let ids: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        if ids.is_empty() {
            return Err(Error::configuration(
                "station list must name at least one station id",
            ));
        }
        Ok(Self { ids })
    }
}

impl fmt::Display for StationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ids.join(","))
    }
}

/// Supported output table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// File extension for per-station output files.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}
