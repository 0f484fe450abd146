//! MOSMIX Processor Library
//!
//! A Rust library for extracting per-station point forecasts from DWD MOSMIX
//! KML bulletins and enriching them with derived rolling-window statistics.
//!
//! This library provides tools for:
//! - Streaming single-pass extraction of the forecast time axis and raw
//!   per-parameter value series from a MOSMIX KML document
//! - Bounded-memory rolling-window aggregation (3/12/24-hour accumulations,
//!   maxima and the daily temperature mean)
//! - Unit-of-measure aware measurements with missing-value propagation
//! - Rendering complete station series as semicolon-CSV or JSON tables

pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_writer;
        pub mod forecast_assembler;
        pub mod json_writer;
        pub mod kml_reader;
        pub mod meteo_calculator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Forecast, PointForecast};
pub use app::services::kml_reader::MosmixKmlReader;
pub use app::services::meteo_calculator::MeteoCalculator;

/// Result type alias for the MOSMIX processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for MOSMIX processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Document is not well-formed
    #[error("malformed MOSMIX document: {message}")]
    MalformedInput {
        message: String,
        #[source]
        source: Option<quick_xml::Error>,
    },

    /// A structurally required element never appeared in the document
    #[error("required element '{element}' not found ({context})")]
    MissingElement { element: String, context: String },

    /// Date/time parsing error
    #[error("date/time parsing error: {message}")]
    TimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A numeric token that is neither the missing sentinel nor a decimal float
    #[error(
        "invalid numeric token '{token}' for element {symbol} at step {step} of station {station_id}"
    )]
    InvalidNumber {
        station_id: String,
        symbol: String,
        step: usize,
        token: String,
    },

    /// A parameter's value list does not line up 1:1 with the time axis
    #[error(
        "step count mismatch for element {symbol} of station {station_id}: time axis has {expected} steps, value list has {found}"
    )]
    StepCountMismatch {
        station_id: String,
        symbol: String,
        expected: usize,
        found: usize,
    },

    /// Output serialization error
    #[error("serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a malformed-input error
    pub fn malformed_input(message: impl Into<String>, source: Option<quick_xml::Error>) -> Self {
        Self::MalformedInput {
            message: message.into(),
            source,
        }
    }

    /// Create a missing-element error
    pub fn missing_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn time_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::TimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid-number error
    pub fn invalid_number(
        station_id: impl Into<String>,
        symbol: impl Into<String>,
        step: usize,
        token: impl Into<String>,
    ) -> Self {
        Self::InvalidNumber {
            station_id: station_id.into(),
            symbol: symbol.into(),
            step,
            token: token.into(),
        }
    }

    /// Create a step-count mismatch error
    pub fn step_count_mismatch(
        station_id: impl Into<String>,
        symbol: impl Into<String>,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::StepCountMismatch {
            station_id: station_id.into(),
            symbol: symbol.into(),
            expected,
            found,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(error: quick_xml::Error) -> Self {
        Self::MalformedInput {
            message: "XML parsing failed".to_string(),
            source: Some(error),
        }
    }
}
