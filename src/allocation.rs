// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold") - Allocation Normalizer

use crate::types::TOTAL_CAPITAL_M;

/// Turn an arbitrary raw weight vector into a non-negative distribution
/// summing to one.
///
/// Negative and non-finite entries are coerced to zero. If nothing positive
/// survives, every industry gets an even `1/N` share. Never fails.
pub fn normalize_allocation(raw: &[f64]) -> Vec<f64> {
    let clipped: Vec<f64> = raw
        .iter()
        .map(|&x| if x.is_finite() && x > 0.0 { x } else { 0.0 })
        .collect();
    let sum: f64 = clipped.iter().sum();
    if sum <= 0.0 {
        let n = clipped.len();
        return vec![1.0 / n as f64; n];
    }
    clipped.iter().map(|x| x / sum).collect()
}

/// Scale normalized fractions to revenue in $1M units.
pub fn to_revenue(fractions: &[f64], total_capital_m: f64) -> Vec<f64> {
    fractions.iter().map(|f| f * total_capital_m).collect()
}

/// Normalize a raw allocation and scale it to the notional $100M portfolio.
pub fn allocation_to_revenue(raw: &[f64]) -> Vec<f64> {
    to_revenue(&normalize_allocation(raw), TOTAL_CAPITAL_M)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sums_to_one() {
        let out = normalize_allocation(&[15.0, 25.0, 15.0, 10.0, 20.0, 5.0, 10.0]);
        let sum: f64 = out.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(out.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn test_negatives_coerced_to_zero() {
        let out = normalize_allocation(&[-5.0, 10.0, 10.0]);
        assert!(out[0].abs() < f64::EPSILON);
        assert!((out[1] - 0.5).abs() < 1e-12);
        assert!((out[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_nan_coerced_to_zero() {
        let out = normalize_allocation(&[f64::NAN, 1.0]);
        assert!(out[0].abs() < f64::EPSILON);
        assert!((out[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_yields_uniform() {
        let out = normalize_allocation(&[0.0; 4]);
        for w in out {
            assert!((w - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_revenue_scaling() {
        let rev = allocation_to_revenue(&[1.0, 1.0, 2.0]);
        assert!((rev[0] - 25.0).abs() < 1e-9);
        assert!((rev[2] - 50.0).abs() < 1e-9);
        let total: f64 = rev.iter().sum();
        assert!((total - TOTAL_CAPITAL_M).abs() < 1e-9);
    }
}
