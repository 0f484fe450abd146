//! Assembly of typed forecast records from one station's raw value series.
//!
//! Validates the collected series against the global time axis, interprets
//! the tokens as measurements, and threads the primary hourly values through
//! the rolling-window calculator so every record carries its derived fields.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::app::models::Forecast;
use crate::app::models::quantity::{Measurement, UnitOfMeasure};
use crate::app::services::kml_reader::ElementTable;
use crate::app::services::meteo_calculator::MeteoCalculator;
use crate::constants::{
    DD_SYMBOL, DD_UNIT, F_UNIT, FF_SYMBOL, FX1_SYMBOL, FX3_SYMBOL, N_SYMBOL, N_UNIT, NEFF_SYMBOL,
    NO_VALUE_TOKEN, PPPP_SYMBOL, PPPP_UNIT, REQUIRED_SYMBOLS, RR1_SYMBOL, RR_UNIT, SUND1_SYMBOL,
    SUND_UNIT, T5CM_SYMBOL, T_UNIT, TD_SYMBOL, TN_SYMBOL, TTT_SYMBOL, TX_SYMBOL, WW_SYMBOL,
};
use crate::{Error, Result};

/// Builds the complete, time-ordered record series for one station.
///
/// Assembly is all-or-nothing: a missing required symbol, a series that does
/// not line up 1:1 with the time axis, or an unparseable token fails the
/// whole station.
pub struct ForecastAssembler<'a> {
    station_id: &'a str,
    table: &'a ElementTable,
}

impl<'a> ForecastAssembler<'a> {
    pub fn new(station_id: &'a str, table: &'a ElementTable) -> Self {
        Self { station_id, table }
    }

    pub fn assemble(&self, forecast_times: &[DateTime<Utc>]) -> Result<Vec<Forecast>> {
        self.validate_step_counts(forecast_times.len())?;

        let mut calculator = MeteoCalculator::new();
        let mut forecasts = Vec::with_capacity(forecast_times.len());
        for (step, &forecast_time) in forecast_times.iter().enumerate() {
            let ttt = self.measurement(TTT_SYMBOL, step, T_UNIT)?;
            let rr1 = self.measurement(RR1_SYMBOL, step, RR_UNIT)?;
            let sund1 = self.measurement(SUND1_SYMBOL, step, SUND_UNIT)?;
            let ww = self.weather_code(step)?;

            // Push the primaries first so the derived reads below see the
            // window state as of this step.
            calculator.add_ttt(ttt.get(T_UNIT));
            calculator.add_rr1(rr1.get(RR_UNIT));
            calculator.add_sund1(sund1.get(SUND_UNIT));
            calculator.add_ww(ww);

            trace!(station = self.station_id, step = step + 1, "assembled step");
            forecasts.push(Forecast {
                forecast_time,
                pppp: self.measurement(PPPP_SYMBOL, step, PPPP_UNIT)?,
                ttt,
                td: self.measurement(TD_SYMBOL, step, T_UNIT)?,
                tx: self.measurement(TX_SYMBOL, step, T_UNIT)?,
                tn: self.measurement(TN_SYMBOL, step, T_UNIT)?,
                tm: Measurement::new(calculator.tm(), T_UNIT),
                t5cm: self.measurement(T5CM_SYMBOL, step, T_UNIT)?,
                dd: self.measurement(DD_SYMBOL, step, DD_UNIT)?,
                ff: self.measurement(FF_SYMBOL, step, F_UNIT)?,
                fx1: self.measurement(FX1_SYMBOL, step, F_UNIT)?,
                fx3: self.measurement(FX3_SYMBOL, step, F_UNIT)?,
                n: self.measurement(N_SYMBOL, step, N_UNIT)?,
                neff: self.measurement(NEFF_SYMBOL, step, N_UNIT)?,
                ww,
                ww3: calculator.ww3(),
                rr1,
                rr3: Measurement::new(calculator.rr3(), RR_UNIT),
                rr12: Measurement::new(calculator.rr12(), RR_UNIT),
                rr24: Measurement::new(calculator.rr24(), RR_UNIT),
                sund1,
                sund3: Measurement::new(calculator.sund3(), SUND_UNIT),
                sund24: Measurement::new(calculator.sund24(), SUND_UNIT),
            });
        }
        Ok(forecasts)
    }

    /// Every required symbol must be present with exactly one token per
    /// time-axis position. An absent series counts as length 0.
    fn validate_step_counts(&self, expected: usize) -> Result<()> {
        for &symbol in REQUIRED_SYMBOLS {
            let found = self.table.series(symbol).map_or(0, <[String]>::len);
            if found != expected {
                return Err(Error::step_count_mismatch(
                    self.station_id,
                    symbol,
                    expected,
                    found,
                ));
            }
        }
        Ok(())
    }

    fn measurement<U: UnitOfMeasure>(
        &self,
        symbol: &str,
        step: usize,
        unit: U,
    ) -> Result<Measurement<U>> {
        Ok(Measurement::new(self.numeric_value(symbol, step)?, unit))
    }

    /// A token is either the missing sentinel, mapped to NaN, or a decimal
    /// number. Anything else fails the station.
    fn numeric_value(&self, symbol: &str, step: usize) -> Result<f64> {
        let token = self.token(symbol, step);
        if token == NO_VALUE_TOKEN {
            return Ok(f64::NAN);
        }
        token
            .parse()
            .map_err(|_| Error::invalid_number(self.station_id, symbol, step + 1, token))
    }

    /// A missing weather code has no integer form; 0 is the identity of the
    /// 3-hour maximum, so the step still participates in the window.
    fn weather_code(&self, step: usize) -> Result<i32> {
        let value = self.numeric_value(WW_SYMBOL, step)?;
        if value.is_nan() {
            return Ok(0);
        }
        Ok(value as i32)
    }

    // Indexing is safe after validate_step_counts has run.
    fn token(&self, symbol: &str, step: usize) -> &str {
        self.table
            .series(symbol)
            .and_then(|series| series.get(step))
            .map_or(NO_VALUE_TOKEN, String::as_str)
    }
}
