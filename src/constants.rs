//! Application constants for the MOSMIX processor
//!
//! This module contains the fixed MOSMIX KML schema description (element
//! names, parameter symbols and their units of measure), the missing-value
//! sentinel, and the display constants for the CSV output.

use crate::app::models::quantity::{
    AngleUnit, CloudCoverUnit, DurationUnit, LengthUnit, PressureUnit, SpeedUnit, TemperatureUnit,
};

// =============================================================================
// KML Document Structure
// =============================================================================

/// Container of the global forecast time axis
pub const XML_TIMESTEPS_ELEMENT: &str = "ForecastTimeSteps";

/// One position on the forecast time axis
pub const XML_TIMESTEP_ELEMENT: &str = "TimeStep";

/// Station id element preceding each station block
pub const XML_NAME_ELEMENT: &str = "name";

/// Per-station container of parameter blocks
pub const XML_EXTENDED_DATA_ELEMENT: &str = "ExtendedData";

/// One parameter block carrying a symbol attribute and a value list
pub const XML_FORECAST_ELEMENT: &str = "Forecast";

/// Value-list element inside a parameter block
pub const XML_VALUE_ELEMENT: &str = "value";

/// Station coordinate element (longitude, latitude, height)
pub const XML_COORDINATES_ELEMENT: &str = "coordinates";

/// Attribute on a parameter block naming its symbol
pub const ELEMENT_NAME_ATTRIBUTE: &str = "elementName";

/// Delimiter between the coordinate components
pub const COORDINATES_DELIMITER: char = ',';

/// Reserved input token denoting a missing sample
pub const NO_VALUE_TOKEN: &str = "-";

// =============================================================================
// Parameter Symbols
// =============================================================================

pub const PPPP_SYMBOL: &str = "PPPP";
pub const TX_SYMBOL: &str = "TX";
pub const TTT_SYMBOL: &str = "TTT";
pub const TD_SYMBOL: &str = "Td";
pub const TN_SYMBOL: &str = "TN";
pub const T5CM_SYMBOL: &str = "T5cm";
pub const DD_SYMBOL: &str = "DD";
pub const FF_SYMBOL: &str = "FF";
pub const FX1_SYMBOL: &str = "FX1";
pub const FX3_SYMBOL: &str = "FX3";
pub const N_SYMBOL: &str = "N";
pub const NEFF_SYMBOL: &str = "Neff";
pub const WW_SYMBOL: &str = "ww";
pub const RR1_SYMBOL: &str = "RR1c";
pub const RR3_SYMBOL: &str = "RR3c";
pub const SUND1_SYMBOL: &str = "SunD1";

/// Every parameter symbol a station block must provide, aligned 1:1 with the
/// time axis. The upstream `RR3c` accumulation is required to be present but
/// its values are never used; all accumulations are recomputed locally.
pub const REQUIRED_SYMBOLS: &[&str] = &[
    PPPP_SYMBOL,
    TX_SYMBOL,
    TTT_SYMBOL,
    TD_SYMBOL,
    TN_SYMBOL,
    T5CM_SYMBOL,
    DD_SYMBOL,
    FF_SYMBOL,
    FX1_SYMBOL,
    FX3_SYMBOL,
    N_SYMBOL,
    NEFF_SYMBOL,
    WW_SYMBOL,
    RR1_SYMBOL,
    RR3_SYMBOL,
    SUND1_SYMBOL,
];

// =============================================================================
// Parameter Units (as declared by the bulletin)
// =============================================================================

pub const PPPP_UNIT: PressureUnit = PressureUnit::Pascal;
pub const T_UNIT: TemperatureUnit = TemperatureUnit::Kelvin;
pub const DD_UNIT: AngleUnit = AngleUnit::Degree;
pub const F_UNIT: SpeedUnit = SpeedUnit::MetresPerSecond;
pub const N_UNIT: CloudCoverUnit = CloudCoverUnit::Percent;
pub const RR_UNIT: LengthUnit = LengthUnit::Millimetre;
pub const SUND_UNIT: DurationUnit = DurationUnit::Second;
pub const STATION_COORDINATES_UNIT: AngleUnit = AngleUnit::Degree;
pub const STATION_HEIGHT_UNIT: LengthUnit = LengthUnit::Metre;

// =============================================================================
// Rolling Window Capacities (hourly steps)
// =============================================================================

pub const WW3_WINDOW_STEPS: usize = 3;
pub const RR3_WINDOW_STEPS: usize = 3;
pub const RR12_WINDOW_STEPS: usize = 12;
pub const RR24_WINDOW_STEPS: usize = 24;
pub const SUND3_WINDOW_STEPS: usize = 3;
pub const SUND24_WINDOW_STEPS: usize = 24;
pub const TTT24_WINDOW_STEPS: usize = 24;

// =============================================================================
// Bulletin Filename Convention
// =============================================================================

/// Position of the model-run-time token in the `_`-separated filename,
/// e.g. `MOSMIX_S_2018032907_240.kml`
pub const RUN_TIME_TOKEN_INDEX: usize = 2;

/// Digits of the model-run-time token: `yyyyMMddHH`, UTC
pub const RUN_TIME_TOKEN_LEN: usize = 10;

// =============================================================================
// CSV Output
// =============================================================================

pub const CSV_DELIMITER: char = ';';

/// Placeholder for a missing value in the rendered table
pub const CSV_MISSING: &str = "---";

/// Row key format for one forecast step (UTC)
pub const CSV_TIME_FORMAT: &str = "%d.%m.%y;%H:%M";

/// First header row: element names
pub const CSV_HEADER_ELEMENTS: &str =
    "forecast;parameter;TT;Td;Tx;Tn;Tm;Tg;dd;ff;fx;fx3;RR1;RR3;RR12;RR24;ww;ww3;N;Nf;PPPP;SS1;SS3;SS24";

/// Second header row: units, completed with the model run hour
pub const CSV_HEADER_UNITS: &str =
    "°C;°C;°C;°C;°C;°C;°;km/h;km/h;km/h;mm;mm;mm;mm;WW Code;WW Code;1/8;1/8;hPa;h;h;h";

/// Output filename prefix, completed with the station id
pub const OUTPUT_FILE_PREFIX: &str = "mosmix_";
