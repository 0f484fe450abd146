//! JSON rendering of one station series.
//!
//! Mirrors the CSV table's display units (celsius, km/h, mm, oktas, hPa,
//! hours) but keeps machine-friendly structure: missing values become
//! `null` instead of a placeholder string and times stay RFC 3339.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::models::{Forecast, PointForecast};
use crate::app::models::quantity::{
    CloudCoverUnit, DurationUnit, PressureUnit, SpeedUnit, TemperatureUnit,
};
use crate::constants::{DD_UNIT, RR_UNIT, STATION_COORDINATES_UNIT, STATION_HEIGHT_UNIT};
use crate::Result;

#[derive(Debug, Serialize)]
struct SeriesDocument<'a> {
    station_id: &'a str,
    model_run_time: DateTime<Utc>,
    longitude: f64,
    latitude: f64,
    height: f64,
    forecasts: Vec<ForecastRow>,
}

#[derive(Debug, Serialize)]
struct ForecastRow {
    forecast_time: DateTime<Utc>,
    tt: Option<f64>,
    td: Option<f64>,
    tx: Option<f64>,
    tn: Option<f64>,
    tm: Option<f64>,
    tg: Option<f64>,
    dd: Option<f64>,
    ff: Option<f64>,
    fx: Option<f64>,
    fx3: Option<f64>,
    rr1: Option<f64>,
    rr3: Option<f64>,
    rr12: Option<f64>,
    rr24: Option<f64>,
    ww: i32,
    ww3: i32,
    n: Option<f64>,
    nf: Option<f64>,
    pppp: Option<f64>,
    ss1: Option<f64>,
    ss3: Option<f64>,
    ss24: Option<f64>,
}

#[derive(Debug, Default)]
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, ptfc: &PointForecast, out: &mut W) -> Result<()> {
        let document = SeriesDocument {
            station_id: ptfc.station_id(),
            model_run_time: ptfc.model_run_time(),
            longitude: ptfc.longitude().get(STATION_COORDINATES_UNIT),
            latitude: ptfc.latitude().get(STATION_COORDINATES_UNIT),
            height: ptfc.height().get(STATION_HEIGHT_UNIT),
            forecasts: ptfc.iter().map(row).collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &document)?;
        writeln!(out)?;
        Ok(())
    }
}

fn row(fc: &Forecast) -> ForecastRow {
    ForecastRow {
        forecast_time: fc.forecast_time,
        tt: present(fc.ttt.get(TemperatureUnit::Celsius)),
        td: present(fc.td.get(TemperatureUnit::Celsius)),
        tx: present(fc.tx.get(TemperatureUnit::Celsius)),
        tn: present(fc.tn.get(TemperatureUnit::Celsius)),
        tm: present(fc.tm.get(TemperatureUnit::Celsius)),
        tg: present(fc.t5cm.get(TemperatureUnit::Celsius)),
        dd: present(fc.dd.get(DD_UNIT)),
        ff: present(fc.ff.get(SpeedUnit::KilometresPerHour)),
        fx: present(fc.fx1.get(SpeedUnit::KilometresPerHour)),
        fx3: present(fc.fx3.get(SpeedUnit::KilometresPerHour)),
        rr1: present(fc.rr1.get(RR_UNIT)),
        rr3: present(fc.rr3.get(RR_UNIT)),
        rr12: present(fc.rr12.get(RR_UNIT)),
        rr24: present(fc.rr24.get(RR_UNIT)),
        ww: fc.ww,
        ww3: fc.ww3,
        n: present(fc.n.get(CloudCoverUnit::Okta)),
        nf: present(fc.neff.get(CloudCoverUnit::Okta)),
        pppp: present(fc.pppp.get(PressureUnit::Hectopascal)),
        ss1: present(fc.sund1.get(DurationUnit::Hour)),
        ss3: present(fc.sund3.get(DurationUnit::Hour)),
        ss24: present(fc.sund24.get(DurationUnit::Hour)),
    }
}

// NaN has no JSON representation; a missing value serializes as null.
fn present(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::quantity::{AngleUnit, LengthUnit, Measurement};
    use crate::constants;
    use chrono::TimeZone;

    fn sample() -> PointForecast {
        let run = Utc.with_ymd_and_hms(2018, 3, 29, 7, 0, 0).unwrap();
        let forecast = Forecast {
            forecast_time: run + chrono::Duration::hours(1),
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
            rr1: Measurement::new(0.5, constants::RR_UNIT),
            rr3: Measurement::missing(constants::RR_UNIT),
            rr12: Measurement::missing(constants::RR_UNIT),
            rr24: Measurement::missing(constants::RR_UNIT),
            sund1: Measurement::new(1800.0, constants::SUND_UNIT),
            sund3: Measurement::missing(constants::SUND_UNIT),
            sund24: Measurement::missing(constants::SUND_UNIT),
        };
        PointForecast::new(
            "10637",
            Measurement::new(8.6, AngleUnit::Degree),
            Measurement::new(50.05, AngleUnit::Degree),
            Measurement::new(111.0, LengthUnit::Metre),
            run,
            vec![forecast],
        )
    }

    #[test]
    fn test_document_shape() {
        let mut out = Vec::new();
        JsonWriter::new().write(&sample(), &mut out).unwrap();
        let document: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(document["station_id"], "10637");
        assert_eq!(document["longitude"], 8.6);
        assert_eq!(document["latitude"], 50.05);
        assert_eq!(document["height"], 111.0);
        assert_eq!(document["forecasts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_values_serialize_as_null() {
        let mut out = Vec::new();
        JsonWriter::new().write(&sample(), &mut out).unwrap();
        let document: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let row = &document["forecasts"][0];
        assert!(row["tx"].is_null());
        assert!(row["rr3"].is_null());
        assert_eq!(row["ww"], 61);
        assert_eq!(row["ss1"], 0.5);
        assert_eq!(row["n"], 8.0);
        assert_eq!(row["pppp"], 1007.7);
    }
}
