// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold") - Pressure Model

use crate::types::{
    BoundaryVec, CouplingMatrix, EngineConfig, EngineError, Portfolio, PressureBreakdown,
    BOUNDARY_COUNT, EPS, PB_THRESHOLDS,
};

/// Intensity rows scaled by the per-industry supply-chain multiplier when the
/// layer is enabled, else passed through unchanged.
pub fn adjusted_intensity(portfolio: &Portfolio, use_supply_chain: bool) -> Vec<BoundaryVec> {
    portfolio
        .intensity
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mult = if use_supply_chain {
                portfolio.supply_chain_mult.get(i).copied().unwrap_or(1.0)
            } else {
                1.0
            };
            let mut out = [0.0; BOUNDARY_COUNT];
            for (k, v) in row.iter().enumerate() {
                out[k] = v * mult;
            }
            out
        })
        .collect()
}

/// Compute per-boundary pressure for a revenue vector.
///
/// Pipeline: supply-chain scaling, rebound scaling against `prev_revenue`,
/// weighted sum over industries, mitigation discount, per-$1M normalization.
/// Rebound only engages when the flag is set *and* a previous revenue vector
/// exists; out-of-range mitigation is clamped rather than rejected.
pub fn compute_pressure(
    portfolio: &Portfolio,
    revenue: &[f64],
    prev_revenue: Option<&[f64]>,
    config: &EngineConfig,
    mitigation: &BoundaryVec,
) -> Result<PressureBreakdown, EngineError> {
    portfolio.validate()?;
    portfolio.check_dimension(revenue)?;
    if let Some(prev) = prev_revenue {
        portfolio.check_dimension(prev)?;
    }

    let base = adjusted_intensity(portfolio, config.supply_chain);
    let n = portfolio.len();

    // Relative revenue change per industry, zero unless rebound is live.
    let mut shift = vec![0.0; n];
    if config.rebound {
        if let Some(prev) = prev_revenue {
            for i in 0..n {
                let p = prev[i].max(EPS);
                shift[i] = (revenue[i] - p) / p;
            }
        }
    }

    let mut adjusted = Vec::with_capacity(n);
    for i in 0..n {
        let rho = if config.rebound {
            portfolio.rebound_elasticity.get(i).copied().unwrap_or(0.0)
        } else {
            0.0
        };
        let factor = 1.0 + rho * shift[i];
        let mut row = [0.0; BOUNDARY_COUNT];
        for k in 0..BOUNDARY_COUNT {
            row[k] = base[i][k] * factor;
        }
        adjusted.push(row);
    }

    let mut totals = [0.0; BOUNDARY_COUNT];
    for i in 0..n {
        for k in 0..BOUNDARY_COUNT {
            totals[k] += adjusted[i][k] * revenue[i];
        }
    }
    for k in 0..BOUNDARY_COUNT {
        totals[k] *= 1.0 - mitigation[k].clamp(0.0, 1.0);
    }

    let total_revenue = revenue.iter().sum::<f64>().max(EPS);
    let mut per_million = [0.0; BOUNDARY_COUNT];
    for k in 0..BOUNDARY_COUNT {
        per_million[k] = totals[k] / total_revenue;
    }

    Ok(PressureBreakdown {
        totals,
        per_million,
        total_revenue,
        adjusted_intensity: adjusted,
    })
}

/// One-hop cross-boundary propagation.
///
/// Each entry is normalized by its threshold; boundary `k` then picks up
/// `Σ_{j≠k} coupling[j][k] · ratio_j` in normalized units, converted back to
/// raw per-$1M scale. Effects do not cascade transitively within a call.
pub fn apply_coupling(per_million: &BoundaryVec, coupling: &CouplingMatrix) -> BoundaryVec {
    let mut norm = [0.0; BOUNDARY_COUNT];
    for k in 0..BOUNDARY_COUNT {
        norm[k] = per_million[k] / PB_THRESHOLDS[k];
    }
    let mut eff = *per_million;
    for k in 0..BOUNDARY_COUNT {
        let mut add_norm = 0.0;
        for j in 0..BOUNDARY_COUNT {
            if j == k {
                continue;
            }
            add_norm += coupling[j][k] * norm[j];
        }
        eff[k] += add_norm * PB_THRESHOLDS[k];
    }
    eff
}

/// Per-boundary `per_million / threshold` ratios for display; `None` where
/// the threshold cannot serve as a denominator.
pub fn threshold_ratios(per_million: &BoundaryVec) -> [Option<f64>; BOUNDARY_COUNT] {
    let mut out = [None; BOUNDARY_COUNT];
    for k in 0..BOUNDARY_COUNT {
        let thr = PB_THRESHOLDS[k];
        if thr.is_finite() && thr != 0.0 {
            out[k] = Some(per_million[k] / thr);
        }
    }
    out
}
