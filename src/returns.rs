// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold") - Return Model

use crate::pressure::adjusted_intensity;
use crate::types::{
    BoundaryVec, EngineConfig, EngineError, Portfolio, BOUNDARY_COUNT, EPS, PB_THRESHOLDS,
};

/// Portfolio ROI (%) as the revenue-weighted average of per-industry returns.
///
/// With `roi_feedback` enabled and a stock vector supplied, each industry's
/// baseline return is discounted by how much the boundaries it is exposed to
/// overshoot their thresholds: the industry's adjusted-intensity row,
/// normalized by its row sum, weights the per-boundary overshoot
/// `max(0, stock/threshold - 1)`, and the penalty is scaled by `eta`.
/// Effective returns never go below zero.
pub fn compute_roi(
    portfolio: &Portfolio,
    revenue: &[f64],
    stocks: Option<&BoundaryVec>,
    config: &EngineConfig,
) -> Result<f64, EngineError> {
    portfolio.validate()?;
    portfolio.check_dimension(revenue)?;

    let total: f64 = revenue.iter().sum::<f64>().max(EPS);
    let n = portfolio.len();

    if config.roi_feedback {
        if let Some(stocks) = stocks {
            let rows = adjusted_intensity(portfolio, config.supply_chain);
            let mut roi = 0.0;
            for i in 0..n {
                let row_sum: f64 = rows[i].iter().sum();
                let denom = if row_sum.abs() < EPS { EPS } else { row_sum };
                let mut penalty = 0.0;
                for k in 0..BOUNDARY_COUNT {
                    let overshoot = (stocks[k] / PB_THRESHOLDS[k] - 1.0).max(0.0);
                    penalty += (rows[i][k] / denom) * overshoot;
                }
                let scale = (1.0 - config.eta * penalty).max(0.0);
                let effective = portfolio.baseline_return_for(i) * scale;
                roi += (revenue[i] / total) * effective;
            }
            return Ok(roi);
        }
    }

    let mut roi = 0.0;
    for i in 0..n {
        roi += (revenue[i] / total) * portfolio.baseline_return_for(i);
    }
    Ok(roi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::allocation_to_revenue;

    #[test]
    fn test_roi_without_feedback_is_weighted_average() {
        let p = Portfolio::default();
        let revenue = allocation_to_revenue(&[1.0; 7]);
        let roi = compute_roi(&p, &revenue, None, &EngineConfig::default()).unwrap();
        let expected: f64 = p.baseline_return.iter().sum::<f64>() / 7.0;
        assert!((roi - expected).abs() < 1e-9);
    }

    #[test]
    fn test_feedback_penalizes_overshoot() {
        let p = Portfolio::default();
        let revenue = allocation_to_revenue(&[1.0; 7]);
        let cfg = EngineConfig {
            roi_feedback: true,
            eta: 0.35,
            ..EngineConfig::default()
        };
        // All boundaries at double their threshold: overshoot = 1 everywhere.
        let mut stocks = [0.0; BOUNDARY_COUNT];
        for k in 0..BOUNDARY_COUNT {
            stocks[k] = 2.0 * PB_THRESHOLDS[k];
        }
        let penalized = compute_roi(&p, &revenue, Some(&stocks), &cfg).unwrap();
        let baseline = compute_roi(&p, &revenue, None, &EngineConfig::default()).unwrap();
        assert!(penalized < baseline);
        // Exposure profiles sum to 1, so penalty = 1 and each return is
        // scaled by exactly (1 - eta).
        assert!((penalized - baseline * (1.0 - 0.35)).abs() < 1e-9);
    }

    #[test]
    fn test_feedback_needs_stocks() {
        let p = Portfolio::default();
        let revenue = allocation_to_revenue(&[1.0; 7]);
        let cfg = EngineConfig {
            roi_feedback: true,
            ..EngineConfig::default()
        };
        let with_flag = compute_roi(&p, &revenue, None, &cfg).unwrap();
        let without = compute_roi(&p, &revenue, None, &EngineConfig::default()).unwrap();
        assert!((with_flag - without).abs() < 1e-12);
    }

    #[test]
    fn test_effective_return_floors_at_zero() {
        let p = Portfolio::default();
        let revenue = allocation_to_revenue(&[1.0; 7]);
        let cfg = EngineConfig {
            roi_feedback: true,
            eta: 1.0,
            ..EngineConfig::default()
        };
        // Extreme overshoot pushes every scale factor to the zero floor.
        let mut stocks = [0.0; BOUNDARY_COUNT];
        for k in 0..BOUNDARY_COUNT {
            stocks[k] = 1e6 * PB_THRESHOLDS[k];
        }
        let roi = compute_roi(&p, &revenue, Some(&stocks), &cfg).unwrap();
        assert!(roi >= 0.0);
    }
}
