// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold") - Sensitivity Analyzer

use crate::allocation::allocation_to_revenue;
use crate::pressure::{apply_coupling, compute_pressure};
use crate::types::{
    BoundaryVec, CouplingMatrix, EngineConfig, EngineError, Portfolio, SensitivityReport,
    BOUNDARY_COUNT, DEFAULT_SENSITIVITY_DELTA,
};

/// Estimate `∂pressure_k / ∂revenue_j` by forward finite differences.
///
/// The baseline allocation (even split when `None`) is normalized, scaled to
/// revenue, and pushed through pressure + coupling. Each industry's revenue
/// is then bumped by `delta` ($1M, absolute -- no renormalization) and the
/// coupled pressure recomputed, with the unperturbed revenue passed as the
/// previous vector so rebound reacts to the bump when enabled.
///
/// Non-positive or non-finite `delta` falls back to the 0.1 default.
pub fn compute_sensitivity(
    portfolio: &Portfolio,
    coupling: &CouplingMatrix,
    allocation: Option<&[f64]>,
    delta: f64,
    config: &EngineConfig,
    mitigation: &BoundaryVec,
) -> Result<SensitivityReport, EngineError> {
    portfolio.validate()?;
    let delta = if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        DEFAULT_SENSITIVITY_DELTA
    };

    let n = portfolio.len();
    let even = vec![1.0; n];
    let raw = allocation.unwrap_or(&even);
    let base_revenue = allocation_to_revenue(raw);
    if base_revenue.len() != n {
        return Err(EngineError::InvalidDimension { expected: n, got: base_revenue.len() });
    }

    let base = compute_pressure(portfolio, &base_revenue, None, config, mitigation)?;
    let baseline = apply_coupling(&base.per_million, coupling);

    let mut matrix = vec![vec![0.0; n]; BOUNDARY_COUNT];
    for j in 0..n {
        let mut perturbed_revenue = base_revenue.clone();
        perturbed_revenue[j] += delta;
        let perturbed = compute_pressure(
            portfolio,
            &perturbed_revenue,
            Some(&base_revenue),
            config,
            mitigation,
        )?;
        let coupled = apply_coupling(&perturbed.per_million, coupling);
        for k in 0..BOUNDARY_COUNT {
            matrix[k][j] = (coupled[k] - baseline[k]) / delta;
        }
    }

    Ok(SensitivityReport {
        matrix,
        baseline,
        base_revenue,
    })
}
