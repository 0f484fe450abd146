//! Tests for derived meteo value calculations.

use crate::app::services::meteo_calculator::MeteoCalculator;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_ww3() {
    let mut calculator = MeteoCalculator::new();
    calculator.add_ww(2);
    assert_eq!(calculator.ww3(), 0);
    calculator.add_ww(3);
    assert_eq!(calculator.ww3(), 0);
    calculator.add_ww(1);
    assert_eq!(calculator.ww3(), 3);
}

#[test]
fn test_ww3_evicts_oldest_code() {
    let mut calculator = MeteoCalculator::new();
    calculator.add_ww(95);
    calculator.add_ww(61);
    calculator.add_ww(0);
    assert_eq!(calculator.ww3(), 95);

    // 95 falls out of the window
    calculator.add_ww(2);
    assert_eq!(calculator.ww3(), 61);
}

#[test]
fn test_rr3() {
    let mut calculator = MeteoCalculator::new();
    calculator.add_rr1(10.0);
    calculator.add_rr1(20.0);
    assert!(calculator.rr3().is_nan());
    calculator.add_rr1(30.0);
    assert_close(calculator.rr3(), 60.0);

    // window now holds [20, 30, NaN]
    calculator.add_rr1(f64::NAN);
    assert!(calculator.rr3().is_nan());
}

#[test]
fn test_rr3_recovers_after_missing_leaves_window() {
    let mut calculator = MeteoCalculator::new();
    calculator.add_rr1(f64::NAN);
    calculator.add_rr1(1.0);
    calculator.add_rr1(2.0);
    assert!(calculator.rr3().is_nan());

    calculator.add_rr1(3.0);
    assert_close(calculator.rr3(), 6.0);
}

#[test]
fn test_rr12() {
    let mut calculator = MeteoCalculator::new();
    for value in 1..=11 {
        calculator.add_rr1(value as f64);
    }
    assert!(calculator.rr12().is_nan());

    calculator.add_rr1(12.0);
    assert_close(calculator.rr12(), 78.0);

    calculator.add_rr1(13.0);
    assert_close(calculator.rr12(), 90.0);
}

#[test]
fn test_rr24() {
    let mut calculator = MeteoCalculator::new();
    for value in 1..=23 {
        calculator.add_rr1(value as f64);
    }
    assert!(calculator.rr24().is_nan());

    calculator.add_rr1(24.0);
    assert_close(calculator.rr24(), 300.0);

    calculator.add_rr1(25.0);
    assert_close(calculator.rr24(), 324.0);
}

#[test]
fn test_sund3() {
    let mut calculator = MeteoCalculator::new();
    calculator.add_sund1(5.0);
    calculator.add_sund1(20.0);
    assert!(calculator.sund3().is_nan());
    calculator.add_sund1(10.0);
    assert_close(calculator.sund3(), 35.0);
    calculator.add_sund1(f64::NAN);
    assert!(calculator.sund3().is_nan());
}

#[test]
fn test_sund24() {
    let mut calculator = MeteoCalculator::new();
    for value in 1..=23 {
        calculator.add_sund1(value as f64);
    }
    assert!(calculator.sund24().is_nan());

    calculator.add_sund1(24.0);
    assert_close(calculator.sund24(), 300.0);

    calculator.add_sund1(25.0);
    assert_close(calculator.sund24(), 324.0);
}

#[test]
fn test_tm() {
    let mut calculator = MeteoCalculator::new();
    for value in 1..=23 {
        calculator.add_ttt(value as f64);
    }
    assert!(calculator.tm().is_nan());

    calculator.add_ttt(24.0);
    assert_close(calculator.tm(), 12.5);
}

#[test]
fn test_tm_rounds_to_two_decimals() {
    let mut calculator = MeteoCalculator::new();
    for _ in 0..23 {
        calculator.add_ttt(284.05);
    }
    calculator.add_ttt(284.06);
    // mean is 284.050416..., reported with two decimals
    assert_close(calculator.tm(), 284.05);
}

#[test]
fn test_tm_poisoned_by_missing_sample() {
    let mut calculator = MeteoCalculator::new();
    calculator.add_ttt(f64::NAN);
    for value in 1..=23 {
        calculator.add_ttt(value as f64);
    }
    assert!(calculator.tm().is_nan());
}

#[test]
fn test_window_families_are_independent() {
    let mut calculator = MeteoCalculator::new();
    calculator.add_ww(61);
    calculator.add_ww(61);
    calculator.add_ww(61);
    assert_eq!(calculator.ww3(), 61);

    // no precipitation pushed yet, so rr3 is still unavailable
    assert!(calculator.rr3().is_nan());
}
