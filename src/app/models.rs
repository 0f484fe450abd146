//! Data models for MOSMIX processing
//!
//! This module contains the core value objects: one [`Forecast`] per station
//! per time-axis position, and the [`PointForecast`] series that owns a
//! station's complete, time-ordered forecast records.

pub mod quantity;

use chrono::{DateTime, Utc};

use quantity::{
    AngleUnit, CloudCoverUnit, DurationUnit, LengthUnit, Measurement, PressureUnit, SpeedUnit,
    TemperatureUnit,
};

/// One meteorological forecast record for a single time step.
///
/// Every measurement carries the unit the bulletin declares for its symbol;
/// readers convert on access. The derived fields (`ww3`, `rr3`, `rr12`,
/// `rr24`, `sund3`, `sund24`, `tm`) are computed from the primary hourly
/// series and stay missing (or 0 for `ww3`) until their defining window has
/// filled.
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Forecast time (UTC)
    pub forecast_time: DateTime<Utc>,
    /// Air pressure at sea level
    pub pppp: Measurement<PressureUnit>,
    /// Air temperature 2 m above ground
    pub ttt: Measurement<TemperatureUnit>,
    /// Dew point
    pub td: Measurement<TemperatureUnit>,
    /// Maximum temperature over the last 12 hours
    pub tx: Measurement<TemperatureUnit>,
    /// Minimum temperature over the last 12 hours
    pub tn: Measurement<TemperatureUnit>,
    /// Daily mean air temperature over the last 24 hours (derived)
    pub tm: Measurement<TemperatureUnit>,
    /// Temperature 5 cm above ground
    pub t5cm: Measurement<TemperatureUnit>,
    /// Wind direction
    pub dd: Measurement<AngleUnit>,
    /// Wind speed
    pub ff: Measurement<SpeedUnit>,
    /// Highest wind gust within the last hour
    pub fx1: Measurement<SpeedUnit>,
    /// Highest wind gust within the last 3 hours
    pub fx3: Measurement<SpeedUnit>,
    /// Total cloud cover
    pub n: Measurement<CloudCoverUnit>,
    /// Effective cloud cover
    pub neff: Measurement<CloudCoverUnit>,
    /// Significant weather code
    pub ww: i32,
    /// Maximum significant weather code over the last 3 hours (derived)
    pub ww3: i32,
    /// Precipitation over the last hour
    pub rr1: Measurement<LengthUnit>,
    /// Precipitation over the last 3 hours (derived)
    pub rr3: Measurement<LengthUnit>,
    /// Precipitation over the last 12 hours (derived)
    pub rr12: Measurement<LengthUnit>,
    /// Precipitation over the last 24 hours (derived)
    pub rr24: Measurement<LengthUnit>,
    /// Sunshine duration within the last hour
    pub sund1: Measurement<DurationUnit>,
    /// Sunshine duration over the last 3 hours (derived)
    pub sund3: Measurement<DurationUnit>,
    /// Sunshine duration over the last 24 hours (derived)
    pub sund24: Measurement<DurationUnit>,
}

/// Complete point forecast for one station.
///
/// Owns its forecast records exclusively; records are sorted ascending by
/// forecast time and are 1:1 with the bulletin's global time axis.
#[derive(Debug, Clone)]
pub struct PointForecast {
    station_id: String,
    longitude: Measurement<AngleUnit>,
    latitude: Measurement<AngleUnit>,
    height: Measurement<LengthUnit>,
    model_run_time: DateTime<Utc>,
    forecasts: Vec<Forecast>,
}

impl PointForecast {
    /// Create a series from assembled records, restoring the ascending
    /// forecast-time order if the caller handed them over unsorted.
    pub fn new(
        station_id: impl Into<String>,
        longitude: Measurement<AngleUnit>,
        latitude: Measurement<AngleUnit>,
        height: Measurement<LengthUnit>,
        model_run_time: DateTime<Utc>,
        mut forecasts: Vec<Forecast>,
    ) -> Self {
        forecasts.sort_by_key(|fc| fc.forecast_time);
        Self {
            station_id: station_id.into(),
            longitude,
            latitude,
            height,
            model_run_time,
            forecasts,
        }
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub fn model_run_time(&self) -> DateTime<Utc> {
        self.model_run_time
    }

    pub fn longitude(&self) -> Measurement<AngleUnit> {
        self.longitude
    }

    pub fn latitude(&self) -> Measurement<AngleUnit> {
        self.latitude
    }

    pub fn height(&self) -> Measurement<LengthUnit> {
        self.height
    }

    /// All records, ascending by forecast time.
    pub fn forecasts(&self) -> &[Forecast] {
        &self.forecasts
    }

    /// The nth forecast, counting from 1 like the bulletin's step numbers.
    pub fn step(&self, step: usize) -> Option<&Forecast> {
        if step == 0 {
            return None;
        }
        self.forecasts.get(step - 1)
    }

    pub fn len(&self) -> usize {
        self.forecasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecasts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Forecast> {
        self.forecasts.iter()
    }
}

impl<'a> IntoIterator for &'a PointForecast {
    type Item = &'a Forecast;
    type IntoIter = std::slice::Iter<'a, Forecast>;

    fn into_iter(self) -> Self::IntoIter {
        self.forecasts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;
    use chrono::TimeZone;

    fn empty_forecast(forecast_time: DateTime<Utc>) -> Forecast {
        Forecast {
            forecast_time,
            pppp: Measurement::missing(constants::PPPP_UNIT),
            ttt: Measurement::missing(constants::T_UNIT),
            td: Measurement::missing(constants::T_UNIT),
            tx: Measurement::missing(constants::T_UNIT),
            tn: Measurement::missing(constants::T_UNIT),
            tm: Measurement::missing(constants::T_UNIT),
            t5cm: Measurement::missing(constants::T_UNIT),
            dd: Measurement::missing(constants::DD_UNIT),
            ff: Measurement::missing(constants::F_UNIT),
            fx1: Measurement::missing(constants::F_UNIT),
            fx3: Measurement::missing(constants::F_UNIT),
            n: Measurement::missing(constants::N_UNIT),
            neff: Measurement::missing(constants::N_UNIT),
            ww: 0,
            ww3: 0,
            rr1: Measurement::missing(constants::RR_UNIT),
            rr3: Measurement::missing(constants::RR_UNIT),
            rr12: Measurement::missing(constants::RR_UNIT),
            rr24: Measurement::missing(constants::RR_UNIT),
            sund1: Measurement::missing(constants::SUND_UNIT),
            sund3: Measurement::missing(constants::SUND_UNIT),
            sund24: Measurement::missing(constants::SUND_UNIT),
        }
    }

    #[test]
    fn test_point_forecast_sorts_ascending() {
        let run = Utc.with_ymd_and_hms(2018, 3, 29, 7, 0, 0).unwrap();
        let later = empty_forecast(run + chrono::Duration::hours(2));
        let earlier = empty_forecast(run + chrono::Duration::hours(1));

        let ptfc = PointForecast::new(
            "10637",
            Measurement::new(8.6, AngleUnit::Degree),
            Measurement::new(50.05, AngleUnit::Degree),
            Measurement::new(111.0, LengthUnit::Metre),
            run,
            vec![later, earlier],
        );

        assert_eq!(ptfc.len(), 2);
        assert_eq!(
            ptfc.step(1).unwrap().forecast_time,
            run + chrono::Duration::hours(1)
        );
        assert_eq!(
            ptfc.step(2).unwrap().forecast_time,
            run + chrono::Duration::hours(2)
        );
        assert!(ptfc.step(0).is_none());
        assert!(ptfc.step(3).is_none());
    }
}
