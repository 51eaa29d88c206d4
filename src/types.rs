// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold") - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Constants ──────────────────────────────────────────────────────────────

/// Number of planetary boundaries. Fixed for the lifetime of a session;
/// every boundary-indexed vector and matrix column aligns with this order.
pub const BOUNDARY_COUNT: usize = 9;

/// Notional portfolio size in $1M units.
pub const TOTAL_CAPITAL_M: f64 = 100.0;

/// Guard for every division that could see a zero denominator.
pub const EPS: f64 = 1e-9;

/// Fallback annual return when an industry has no baseline entry.
pub const DEFAULT_BASELINE_RETURN: f64 = 5.0;

/// Default ROI feedback strength.
pub const DEFAULT_ETA: f64 = 0.35;

/// Default integrator step (one quarter = 0.25 years).
pub const DEFAULT_DT: f64 = 0.25;

/// Default per-boundary regeneration fraction per unit time.
pub const DEFAULT_REGEN: f64 = 0.05;

/// Default revenue perturbation for sensitivity analysis ($1M units).
pub const DEFAULT_SENSITIVITY_DELTA: f64 = 0.1;

/// Boundary-indexed vector.
pub type BoundaryVec = [f64; BOUNDARY_COUNT];

/// Cross-boundary coupling matrix: `coupling[j][k]` is the extra normalized
/// pressure boundary `j` induces on boundary `k` per unit of its own
/// normalized pressure.
pub type CouplingMatrix = [[f64; BOUNDARY_COUNT]; BOUNDARY_COUNT];

// ─── Boundary indices ────────────────────────────────────────────────────────

pub const PB_CLIMATE: usize = 0;
pub const PB_BIODIVERSITY: usize = 1;
pub const PB_BIOGEOCHEMICAL: usize = 2;
pub const PB_CHEMICAL: usize = 3;
pub const PB_LAND: usize = 4;
pub const PB_FRESHWATER: usize = 5;
pub const PB_OCEAN_ACID: usize = 6;
pub const PB_OZONE: usize = 7;
pub const PB_AEROSOLS: usize = 8;

/// Display names, unit-annotated, in canonical boundary order.
pub const BOUNDARY_NAMES: [&str; BOUNDARY_COUNT] = [
    "Climate (tCO2 / $1M)",
    "Biodiversity (extinctions / $1M)",
    "Biogeochemical (kg N-eq / $1M)",
    "Chemical pollution (n-kg CP / $1M)",
    "Land-system (ha / $1M)",
    "Freshwater (m3 / $1M)",
    "Ocean acid (kmol H3O+ / $1M)",
    "Ozone (kg CFC-11 eq / $1M)",
    "Aerosols (n-kg AE / $1M)",
];

/// Safe-limit thresholds per boundary, in the units above.
pub const PB_THRESHOLDS: BoundaryVec = [
    188.5, 0.000_000_13, 161.0, 3000.0, 33.0, 81408.0, 0.0370, 2.48, 3000.0,
];

/// Default cross-boundary coupling: sparse, one-hop amplification only.
/// Nutrient pollution worsens biodiversity loss and chemical load; climate
/// pressure acidifies the ocean.
pub fn default_coupling() -> CouplingMatrix {
    let mut c = [[0.0; BOUNDARY_COUNT]; BOUNDARY_COUNT];
    c[PB_CLIMATE][PB_OCEAN_ACID] = 0.05;
    c[PB_BIOGEOCHEMICAL][PB_BIODIVERSITY] = 0.08;
    c[PB_BIOGEOCHEMICAL][PB_CHEMICAL] = 0.04;
    c
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Contract violations the engine refuses to paper over.
///
/// Numerical oddities (negative weights, zero sums, out-of-range mitigation)
/// are coerced silently; only structural mismatches surface as errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("vector has {got} entries but portfolio defines {expected} industries")]
    InvalidDimension { expected: usize, got: usize },
    #[error("portfolio defines no industries")]
    EmptyPortfolio,
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

// ─── Portfolio ───────────────────────────────────────────────────────────────

/// The industry universe: names, intensity rows, baseline returns, and the
/// per-industry adjustment coefficients.
///
/// Treated as an atomic value: replaced wholesale (snapshot import, data
/// load), never row-patched while a computation may be reading it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub industries: Vec<String>,
    /// N rows of K intensity coefficients: pressure per $1M of revenue.
    /// Negative entries mark restorative sectors.
    pub intensity: Vec<BoundaryVec>,
    /// Baseline annual return per industry (%). May be shorter than N;
    /// missing entries fall back to [`DEFAULT_BASELINE_RETURN`].
    pub baseline_return: Vec<f64>,
    /// Upstream (scope-3) pressure multiplier per industry.
    pub supply_chain_mult: Vec<f64>,
    /// Demand-response elasticity per industry.
    pub rebound_elasticity: Vec<f64>,
}

impl Portfolio {
    /// Number of industries (N).
    pub fn len(&self) -> usize {
        self.industries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
    }

    /// Check row alignment: intensity and per-industry coefficient vectors
    /// must match the industry list exactly.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.industries.is_empty() {
            return Err(EngineError::EmptyPortfolio);
        }
        let n = self.industries.len();
        for len in [
            self.intensity.len(),
            self.supply_chain_mult.len(),
            self.rebound_elasticity.len(),
        ] {
            if len != n {
                return Err(EngineError::InvalidDimension { expected: n, got: len });
            }
        }
        Ok(())
    }

    /// Reject industry-indexed vectors of the wrong length.
    pub fn check_dimension(&self, v: &[f64]) -> Result<(), EngineError> {
        if v.len() != self.len() {
            return Err(EngineError::InvalidDimension {
                expected: self.len(),
                got: v.len(),
            });
        }
        Ok(())
    }

    /// Baseline return for industry `i`, with the documented fallback.
    pub fn baseline_return_for(&self, i: usize) -> f64 {
        self.baseline_return
            .get(i)
            .copied()
            .unwrap_or(DEFAULT_BASELINE_RETURN)
    }
}

impl Default for Portfolio {
    /// The seven-sector default dataset.
    fn default() -> Self {
        Self {
            industries: [
                "Renewable Energy",
                "Fossil Fuels",
                "Agriculture",
                "Mining & Materials",
                "Manufacturing",
                "Waste & Env Services",
                "Reforestation & Conservation",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            intensity: vec![
                [20.0, 1e-9, 10.0, 100.0, 1.0, 500.0, 0.005, 0.01, 50.0],
                [900.0, 1e-7, 5.0, 500.0, 5.0, 1000.0, 0.02, 0.5, 400.0],
                [150.0, 1e-6, 900.0, 800.0, 20.0, 30000.0, 0.005, 0.005, 200.0],
                [300.0, 1e-6, 20.0, 700.0, 10.0, 2000.0, 0.003, 0.2, 500.0],
                [200.0, 5e-7, 50.0, 900.0, 2.0, 400.0, 0.008, 0.1, 350.0],
                [120.0, 2e-7, 10.0, 300.0, 1.0, 800.0, 0.002, 0.02, 100.0],
                [-50.0, -1e-6, -2.0, 10.0, -15.0, 50.0, -0.001, 0.0, 5.0],
            ],
            baseline_return: vec![6.0, 8.0, 5.0, 7.0, 6.5, 4.5, 3.5],
            supply_chain_mult: vec![1.15, 1.6, 1.4, 1.5, 1.3, 1.2, 1.05],
            rebound_elasticity: vec![0.02, 0.15, 0.08, 0.05, 0.03, 0.02, -0.02],
        }
    }
}

/// Default raw allocation used by the interactive facade.
pub fn default_allocation() -> Vec<f64> {
    vec![15.0, 25.0, 15.0, 10.0, 20.0, 5.0, 10.0]
}

// ─── EngineConfig ────────────────────────────────────────────────────────────

/// Toggle set for the optional model layers, passed explicitly into every
/// pressure / return computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scale intensity rows by the per-industry supply-chain multiplier.
    pub supply_chain: bool,
    /// Apply revenue-change-driven rebound elasticity.
    pub rebound: bool,
    /// Penalize returns by boundary overshoot.
    pub roi_feedback: bool,
    /// Feedback strength for the overshoot penalty.
    pub eta: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            supply_chain: false,
            rebound: false,
            roi_feedback: false,
            eta: DEFAULT_ETA,
        }
    }
}

// ─── PressureBreakdown ───────────────────────────────────────────────────────

/// Result of one pressure computation.
#[derive(Debug, Clone, Serialize)]
pub struct PressureBreakdown {
    /// Absolute mitigated pressure per boundary (flux input for the
    /// dynamics integrator).
    pub totals: BoundaryVec,
    /// Mitigated pressure per $1M of revenue.
    pub per_million: BoundaryVec,
    pub total_revenue: f64,
    /// Intensity rows after supply-chain and rebound scaling. Shared
    /// read-only artifact; the return model reuses it for exposure profiles.
    pub adjusted_intensity: Vec<BoundaryVec>,
}

// ─── HistoryEntry ────────────────────────────────────────────────────────────

/// One simulated period in a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based quarter number within the run.
    pub quarter: u32,
    pub stocks: BoundaryVec,
    /// `stocks[k] > PB_THRESHOLDS[k]`, strict.
    pub breaches: [bool; BOUNDARY_COUNT],
}

// ─── SensitivityReport ───────────────────────────────────────────────────────

/// Forward finite-difference estimate of `∂pressure_k / ∂revenue_j`.
#[derive(Debug, Clone, Serialize)]
pub struct SensitivityReport {
    /// K×N matrix: boundary rows, industry columns.
    pub matrix: Vec<Vec<f64>>,
    /// Coupled per-$1M pressure at the unperturbed allocation.
    pub baseline: BoundaryVec,
    /// Revenue vector the perturbations were applied to.
    pub base_revenue: Vec<f64>,
}

// ─── PressureReport ──────────────────────────────────────────────────────────

/// Facade-level summary for one allocation: coupled pressure, threshold
/// ratios, and portfolio return.
#[derive(Debug, Clone, Serialize)]
pub struct PressureReport {
    pub per_million: BoundaryVec,
    /// `per_million / threshold`; `None` where the threshold is unusable.
    pub ratios: [Option<f64>; BOUNDARY_COUNT],
    pub roi: f64,
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_portfolio_is_aligned() {
        let p = Portfolio::default();
        assert_eq!(p.len(), 7);
        assert!(p.validate().is_ok());
        assert_eq!(p.baseline_return.len(), 7);
    }

    #[test]
    fn test_baseline_return_fallback() {
        let mut p = Portfolio::default();
        p.baseline_return.truncate(2);
        assert!((p.baseline_return_for(1) - 8.0).abs() < f64::EPSILON);
        assert!((p.baseline_return_for(5) - DEFAULT_BASELINE_RETURN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_ragged_rows() {
        let mut p = Portfolio::default();
        p.intensity.pop();
        assert_eq!(
            p.validate(),
            Err(EngineError::InvalidDimension { expected: 7, got: 6 })
        );
    }

    #[test]
    fn test_coupling_is_sparse() {
        let c = default_coupling();
        let nonzero: usize = c
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| **v != 0.0)
            .count();
        assert_eq!(nonzero, 3);
        assert!((c[PB_BIOGEOCHEMICAL][PB_BIODIVERSITY] - 0.08).abs() < f64::EPSILON);
    }
}
