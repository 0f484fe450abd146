//! Unit-of-measure aware measurements.
//!
//! A [`Measurement`] is a numeric value tagged with a unit of one kind
//! (pressure, temperature, speed, ...). Conversion between units of the same
//! kind is a pure function of the two units; a missing sample is represented
//! as NaN and survives every conversion unchanged.

/// A unit of measure within one kind of quantity.
///
/// Conversions go through the kind's base unit, so implementors only describe
/// the mapping to and from that base. Affine units (°C) work the same way as
/// purely multiplicative ones.
pub trait UnitOfMeasure: Copy + PartialEq + std::fmt::Debug {
    /// Converts a value expressed in this unit to the kind's base unit.
    fn to_base(self, value: f64) -> f64;

    /// Converts a value expressed in the kind's base unit to this unit.
    fn from_base(self, value: f64) -> f64;
}

/// Pressure units. Base: pascal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureUnit {
    Pascal,
    Hectopascal,
}

impl UnitOfMeasure for PressureUnit {
    fn to_base(self, value: f64) -> f64 {
        match self {
            PressureUnit::Pascal => value,
            PressureUnit::Hectopascal => value * 100.0,
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            PressureUnit::Pascal => value,
            PressureUnit::Hectopascal => value / 100.0,
        }
    }
}

/// Temperature units. Base: kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
}

impl UnitOfMeasure for TemperatureUnit {
    fn to_base(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Kelvin => value,
            TemperatureUnit::Celsius => value + 273.15,
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Kelvin => value,
            TemperatureUnit::Celsius => value - 273.15,
        }
    }
}

/// Angle units. Base: degree of arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degree,
}

impl UnitOfMeasure for AngleUnit {
    fn to_base(self, value: f64) -> f64 {
        value
    }

    fn from_base(self, value: f64) -> f64 {
        value
    }
}

/// Speed units. Base: metre per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    MetresPerSecond,
    KilometresPerHour,
}

impl UnitOfMeasure for SpeedUnit {
    fn to_base(self, value: f64) -> f64 {
        match self {
            SpeedUnit::MetresPerSecond => value,
            SpeedUnit::KilometresPerHour => value / 3.6,
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            SpeedUnit::MetresPerSecond => value,
            SpeedUnit::KilometresPerHour => value * 3.6,
        }
    }
}

/// Length units. Base: metre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Metre,
    Millimetre,
}

impl UnitOfMeasure for LengthUnit {
    fn to_base(self, value: f64) -> f64 {
        match self {
            LengthUnit::Metre => value,
            LengthUnit::Millimetre => value / 1000.0,
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            LengthUnit::Metre => value,
            LengthUnit::Millimetre => value * 1000.0,
        }
    }
}

/// Duration units. Base: second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Second,
    Minute,
    Hour,
}

impl UnitOfMeasure for DurationUnit {
    fn to_base(self, value: f64) -> f64 {
        match self {
            DurationUnit::Second => value,
            DurationUnit::Minute => value * 60.0,
            DurationUnit::Hour => value * 3600.0,
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            DurationUnit::Second => value,
            DurationUnit::Minute => value / 60.0,
            DurationUnit::Hour => value / 3600.0,
        }
    }
}

/// Cloud cover units. Base: percent.
///
/// The okta scale maps the percentage linearly onto eighths of the sky
/// (`percent / 100 * 8`). Rounding to whole eighths happens at presentation
/// time only; a stored measurement always keeps the fractional value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudCoverUnit {
    Percent,
    Okta,
}

impl UnitOfMeasure for CloudCoverUnit {
    fn to_base(self, value: f64) -> f64 {
        match self {
            CloudCoverUnit::Percent => value,
            CloudCoverUnit::Okta => value / 8.0 * 100.0,
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            CloudCoverUnit::Percent => value,
            CloudCoverUnit::Okta => value / 100.0 * 8.0,
        }
    }
}

/// A numeric value tagged with its unit of measure.
///
/// Copied by value, never shared. NaN is the distinguished missing-value
/// marker; arithmetic on it stays NaN, so a missing sample propagates through
/// conversions and window sums without special casing.
#[derive(Debug, Clone, Copy)]
pub struct Measurement<U: UnitOfMeasure> {
    value: f64,
    unit: U,
}

impl<U: UnitOfMeasure> Measurement<U> {
    /// Create a measurement of `value` expressed in `unit`.
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }

    /// Create a missing measurement carrying `unit`.
    pub fn missing(unit: U) -> Self {
        Self::new(f64::NAN, unit)
    }

    /// True if this measurement holds the missing-value marker.
    pub fn is_missing(&self) -> bool {
        self.value.is_nan()
    }

    /// The unit this measurement was stored in.
    pub fn unit(&self) -> U {
        self.unit
    }

    /// The value expressed in `unit`.
    pub fn get(&self, unit: U) -> f64 {
        unit.from_base(self.unit.to_base(self.value))
    }
}
