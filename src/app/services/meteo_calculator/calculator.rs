//! Incremental calculation of derived meteorological values.

use crate::constants::{
    RR3_WINDOW_STEPS, RR12_WINDOW_STEPS, RR24_WINDOW_STEPS, SUND3_WINDOW_STEPS,
    SUND24_WINDOW_STEPS, TTT24_WINDOW_STEPS, WW3_WINDOW_STEPS,
};

use super::evicting_queue::EvictingQueue;

/// Derives rolling-window statistics for a single station.
///
/// Steps are fed in strict ascending order, one push per window family per
/// step. A read operation reports its aggregate only once its window has
/// received `capacity` pushes; before that it returns NaN, or 0 for the
/// integer-valued weather-code maximum. A NaN sample retained inside a
/// sum/mean window poisons that window's aggregate for as long as it stays
/// inside.
#[derive(Debug, Clone)]
pub struct MeteoCalculator {
    ww3: EvictingQueue<i32>,
    rr3: EvictingQueue<f64>,
    rr12: EvictingQueue<f64>,
    rr24: EvictingQueue<f64>,
    sund3: EvictingQueue<f64>,
    sund24: EvictingQueue<f64>,
    ttt24: EvictingQueue<f64>,
}

impl MeteoCalculator {
    pub fn new() -> Self {
        Self {
            ww3: EvictingQueue::new(WW3_WINDOW_STEPS),
            rr3: EvictingQueue::new(RR3_WINDOW_STEPS),
            rr12: EvictingQueue::new(RR12_WINDOW_STEPS),
            rr24: EvictingQueue::new(RR24_WINDOW_STEPS),
            sund3: EvictingQueue::new(SUND3_WINDOW_STEPS),
            sund24: EvictingQueue::new(SUND24_WINDOW_STEPS),
            ttt24: EvictingQueue::new(TTT24_WINDOW_STEPS),
        }
    }

    /// Push the current significant weather code.
    pub fn add_ww(&mut self, ww: i32) {
        self.ww3.push(ww);
    }

    /// Push the current 1-hour precipitation amount in millimetres.
    ///
    /// Feeds the 3-, 12- and 24-hour accumulation windows simultaneously.
    pub fn add_rr1(&mut self, rr1: f64) {
        self.rr3.push(rr1);
        self.rr12.push(rr1);
        self.rr24.push(rr1);
    }

    /// Push the current 1-hour sunshine duration in seconds.
    pub fn add_sund1(&mut self, sund1: f64) {
        self.sund3.push(sund1);
        self.sund24.push(sund1);
    }

    /// Push the current air temperature in kelvin.
    pub fn add_ttt(&mut self, ttt: f64) {
        self.ttt24.push(ttt);
    }

    /// Maximum significant weather code over the last 3 hours, or 0 while the
    /// window is not yet full.
    pub fn ww3(&self) -> i32 {
        if !self.ww3.is_full() {
            return 0;
        }
        self.ww3.iter().copied().max().unwrap_or(0)
    }

    /// 3-hour precipitation accumulation in millimetres.
    pub fn rr3(&self) -> f64 {
        Self::sum(&self.rr3)
    }

    /// 12-hour precipitation accumulation in millimetres.
    pub fn rr12(&self) -> f64 {
        Self::sum(&self.rr12)
    }

    /// 24-hour precipitation accumulation in millimetres.
    pub fn rr24(&self) -> f64 {
        Self::sum(&self.rr24)
    }

    /// 3-hour sunshine duration in seconds.
    pub fn sund3(&self) -> f64 {
        Self::sum(&self.sund3)
    }

    /// 24-hour sunshine duration in seconds.
    pub fn sund24(&self) -> f64 {
        Self::sum(&self.sund24)
    }

    /// Daily mean air temperature over the last 24 hours in kelvin, rounded
    /// to two decimals.
    pub fn tm(&self) -> f64 {
        if !self.ttt24.is_full() {
            return f64::NAN;
        }
        let mean = self.ttt24.iter().sum::<f64>() / self.ttt24.len() as f64;
        (mean * 100.0).round() / 100.0
    }

    // A NaN element makes the sum NaN, which is exactly the poisoning rule.
    fn sum(window: &EvictingQueue<f64>) -> f64 {
        if !window.is_full() {
            return f64::NAN;
        }
        window.iter().sum()
    }
}

impl Default for MeteoCalculator {
    fn default() -> Self {
        Self::new()
    }
}
