// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold") - Scenario Driver

use serde::{Deserialize, Serialize};

use crate::allocation::allocation_to_revenue;
use crate::integrator::{step, Scheme};
use crate::pressure::compute_pressure;
use crate::types::{
    BoundaryVec, EngineConfig, EngineError, HistoryEntry, Portfolio, BOUNDARY_COUNT,
    PB_THRESHOLDS,
};

// ─── SimSession ─────────────────────────────────────────────────────────────

/// Owns the boundary stock state across scenario runs.
///
/// Callers construct one session per simulated portfolio and pass it to every
/// driver call; a later run continues from wherever the previous one left the
/// stocks. There is no internal re-entrancy protection -- calls that mutate
/// the session must be serialized by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSession {
    stocks: BoundaryVec,
    /// Total quarters simulated since construction or reset.
    pub elapsed_quarters: u32,
}

impl SimSession {
    /// Fresh session: every boundary starts at half its threshold.
    pub fn new() -> Self {
        Self {
            stocks: PB_THRESHOLDS.map(|t| 0.5 * t),
            elapsed_quarters: 0,
        }
    }

    pub fn stocks(&self) -> &BoundaryVec {
        &self.stocks
    }

    /// Restore the half-threshold initial condition.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SimSession {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Driver ─────────────────────────────────────────────────────────────────

/// Precompute one absolute flux vector per scheduled quarter.
///
/// Each timeline entry is normalized, scaled to revenue, and run through the
/// pressure model with no previous revenue; within a quarter the flux is
/// constant, so rebound never engages here even when the flag is set.
fn precompute_fluxes(
    portfolio: &Portfolio,
    timeline: &[Vec<f64>],
    config: &EngineConfig,
    mitigation: &BoundaryVec,
) -> Result<Vec<BoundaryVec>, EngineError> {
    timeline
        .iter()
        .map(|raw| {
            let revenue = allocation_to_revenue(raw);
            let out = compute_pressure(portfolio, &revenue, None, config, mitigation)?;
            Ok(out.totals)
        })
        .collect()
}

/// Advance the session by `periods` quarters under a repeating allocation
/// schedule, recording one [`HistoryEntry`] per quarter.
///
/// An empty timeline behaves as a single uniform allocation repeated for the
/// whole run. Quarter `q` uses schedule slot `q % timeline_len`. Breach flags
/// are strict: a stock sitting exactly on its threshold is not a breach.
#[allow(clippy::too_many_arguments)]
pub fn run_scenario(
    session: &mut SimSession,
    portfolio: &Portfolio,
    timeline: &[Vec<f64>],
    periods: u32,
    dt: f64,
    regen: f64,
    scheme: Scheme,
    config: &EngineConfig,
    mitigation: &BoundaryVec,
) -> Result<Vec<HistoryEntry>, EngineError> {
    portfolio.validate()?;

    let uniform = vec![vec![1.0; portfolio.len()]];
    let schedule: &[Vec<f64>] = if timeline.is_empty() { &uniform } else { timeline };
    let fluxes = precompute_fluxes(portfolio, schedule, config, mitigation)?;

    let mut history = Vec::with_capacity(periods as usize);
    let mut stocks = session.stocks;
    for q in 0..periods {
        let flux_vec = fluxes[q as usize % fluxes.len()];
        let flux = move |_t: f64, _b: &BoundaryVec| flux_vec;
        stocks = step(scheme, &stocks, q as f64, dt, &flux, regen);

        let mut breaches = [false; BOUNDARY_COUNT];
        for k in 0..BOUNDARY_COUNT {
            breaches[k] = stocks[k] > PB_THRESHOLDS[k];
        }
        history.push(HistoryEntry {
            quarter: q + 1,
            stocks,
            breaches,
        });
    }

    // Commit only after the whole run succeeds.
    session.stocks = stocks;
    session.elapsed_quarters += periods;
    Ok(history)
}
