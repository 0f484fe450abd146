//! Semicolon-separated table rendering of one station series.
//!
//! The layout is two header rows (element names, then the model run hour and
//! the display units), filler rows covering the hours between the run date's
//! midnight and the run hour, and one data row per forecast step. All values
//! are converted to display units here; storage stays in bulletin units.

use std::io::Write;

use chrono::{Duration, Timelike};

use crate::app::models::{Forecast, PointForecast};
use crate::app::models::quantity::{
    CloudCoverUnit, DurationUnit, PressureUnit, SpeedUnit, TemperatureUnit,
};
use crate::constants::{
    CSV_DELIMITER, CSV_HEADER_ELEMENTS, CSV_HEADER_UNITS, CSV_MISSING, CSV_TIME_FORMAT, DD_UNIT,
    RR_UNIT,
};
use crate::Result;

/// Number of value columns after the two-column time key.
const DATA_COLUMNS: usize = 22;

#[derive(Debug, Default)]
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, ptfc: &PointForecast, out: &mut W) -> Result<()> {
        let run_time = ptfc.model_run_time();
        writeln!(out, "{CSV_HEADER_ELEMENTS}")?;
        writeln!(
            out,
            "today {:02} UTC{CSV_DELIMITER}unit{CSV_DELIMITER}{CSV_HEADER_UNITS}",
            run_time.hour()
        )?;

        // Hours already past at publication time get placeholder rows so a
        // day's table always starts at midnight.
        let filler = vec![CSV_MISSING; DATA_COLUMNS].join(&CSV_DELIMITER.to_string());
        let midnight = run_time - Duration::hours(run_time.hour() as i64);
        for hour in 0..=run_time.hour() {
            let instant = midnight + Duration::hours(hour as i64);
            writeln!(
                out,
                "{}{CSV_DELIMITER}{filler}",
                instant.format(CSV_TIME_FORMAT)
            )?;
        }

        for forecast in ptfc {
            writeln!(
                out,
                "{}{CSV_DELIMITER}{}",
                forecast.forecast_time.format(CSV_TIME_FORMAT),
                data_cells(forecast).join(&CSV_DELIMITER.to_string())
            )?;
        }
        Ok(())
    }
}

/// One row of display-converted cells, ordered like the header.
fn data_cells(fc: &Forecast) -> Vec<String> {
    vec![
        cell(fc.ttt.get(TemperatureUnit::Celsius), 1),
        cell(fc.td.get(TemperatureUnit::Celsius), 1),
        cell(fc.tx.get(TemperatureUnit::Celsius), 1),
        cell(fc.tn.get(TemperatureUnit::Celsius), 1),
        cell(fc.tm.get(TemperatureUnit::Celsius), 1),
        cell(fc.t5cm.get(TemperatureUnit::Celsius), 1),
        cell(fc.dd.get(DD_UNIT), 0),
        cell(fc.ff.get(SpeedUnit::KilometresPerHour), 1),
        cell(fc.fx1.get(SpeedUnit::KilometresPerHour), 1),
        cell(fc.fx3.get(SpeedUnit::KilometresPerHour), 1),
        cell(fc.rr1.get(RR_UNIT), 1),
        cell(fc.rr3.get(RR_UNIT), 1),
        cell(fc.rr12.get(RR_UNIT), 1),
        cell(fc.rr24.get(RR_UNIT), 1),
        fc.ww.to_string(),
        fc.ww3.to_string(),
        cell(fc.n.get(CloudCoverUnit::Okta), 0),
        cell(fc.neff.get(CloudCoverUnit::Okta), 0),
        cell(fc.pppp.get(PressureUnit::Hectopascal), 1),
        cell(fc.sund1.get(DurationUnit::Hour), 1),
        cell(fc.sund3.get(DurationUnit::Hour), 1),
        cell(fc.sund24.get(DurationUnit::Hour), 1),
    ]
}

fn cell(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return CSV_MISSING.to_string();
    }
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::quantity::{AngleUnit, LengthUnit, Measurement};
    use crate::constants;
    use chrono::{DateTime, TimeZone, Utc};

    fn forecast(forecast_time: DateTime<Utc>) -> Forecast {
        Forecast {
            forecast_time,
            pppp: Measurement::new(100770.0, constants::PPPP_UNIT),
            ttt: Measurement::new(284.05, constants::T_UNIT),
            td: Measurement::new(281.05, constants::T_UNIT),
            tx: Measurement::missing(constants::T_UNIT),
            tn: Measurement::missing(constants::T_UNIT),
            tm: Measurement::missing(constants::T_UNIT),
            t5cm: Measurement::new(286.25, constants::T_UNIT),
            dd: Measurement::new(197.0, constants::DD_UNIT),
            ff: Measurement::new(2.5, constants::F_UNIT),
            fx1: Measurement::new(5.0, constants::F_UNIT),
            fx3: Measurement::new(6.0, constants::F_UNIT),
            n: Measurement::new(100.0, constants::N_UNIT),
            neff: Measurement::new(50.0, constants::N_UNIT),
            ww: 61,
            ww3: 0,
            rr1: Measurement::new(0.25, constants::RR_UNIT),
            rr3: Measurement::missing(constants::RR_UNIT),
            rr12: Measurement::missing(constants::RR_UNIT),
            rr24: Measurement::missing(constants::RR_UNIT),
            sund1: Measurement::new(1800.0, constants::SUND_UNIT),
            sund3: Measurement::missing(constants::SUND_UNIT),
            sund24: Measurement::missing(constants::SUND_UNIT),
        }
    }

    fn series(run_time: DateTime<Utc>, forecasts: Vec<Forecast>) -> PointForecast {
        PointForecast::new(
            "10637",
            Measurement::new(8.6, AngleUnit::Degree),
            Measurement::new(50.05, AngleUnit::Degree),
            Measurement::new(111.0, LengthUnit::Metre),
            run_time,
            forecasts,
        )
    }

    fn render(ptfc: &PointForecast) -> Vec<String> {
        let mut out = Vec::new();
        CsvWriter::new().write(ptfc, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_header_rows() {
        let run = Utc.with_ymd_and_hms(2018, 3, 29, 7, 0, 0).unwrap();
        let lines = render(&series(run, vec![]));

        assert!(lines[0].starts_with("forecast;parameter;TT;Td;"));
        assert!(lines[1].starts_with("today 07 UTC;unit;°C;"));
    }

    #[test]
    fn test_filler_rows_reach_back_to_midnight() {
        let run = Utc.with_ymd_and_hms(2018, 3, 29, 7, 0, 0).unwrap();
        let lines = render(&series(run, vec![]));

        // 2 header rows followed by filler for hours 00..=07
        assert_eq!(lines.len(), 2 + 8);
        assert!(lines[2].starts_with("29.03.18;00:00;---;"));
        assert!(lines[9].starts_with("29.03.18;07:00;---;"));
        assert_eq!(lines[2].matches("---").count(), 22);
    }

    #[test]
    fn test_midnight_run_gets_one_filler_row() {
        let run = Utc.with_ymd_and_hms(2018, 3, 29, 0, 0, 0).unwrap();
        let lines = render(&series(run, vec![]));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_data_row_display_conversions() {
        let run = Utc.with_ymd_and_hms(2018, 3, 29, 7, 0, 0).unwrap();
        let lines = render(&series(run, vec![forecast(run + Duration::hours(1))]));

        let row = lines.last().unwrap();
        let cells: Vec<&str> = row.split(';').collect();
        assert_eq!(cells[0], "29.03.18");
        assert_eq!(cells[1], "08:00");
        assert_eq!(cells[2], "10.9", "TT in celsius, one decimal");
        assert_eq!(cells[3], "7.9", "Td in celsius");
        assert_eq!(cells[4], "---", "missing Tx");
        assert_eq!(cells[8], "197", "dd without decimals");
        assert_eq!(cells[9], "9.0", "ff in km/h");
        assert_eq!(cells[12], "0.2", "RR1 in mm");
        assert_eq!(cells[16], "61", "ww code");
        assert_eq!(cells[17], "0", "ww3 code");
        assert_eq!(cells[18], "8", "N in oktas");
        assert_eq!(cells[19], "4", "Neff in oktas");
        assert_eq!(cells[20], "1007.7", "PPPP in hPa");
        assert_eq!(cells[21], "0.5", "SS1 in hours");
        assert_eq!(cells.len(), 24);
    }
}
