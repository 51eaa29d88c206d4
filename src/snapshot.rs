// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold") - Snapshot Import/Export

use serde::{Deserialize, Serialize};

use crate::types::{BoundaryVec, EngineError, Portfolio, BOUNDARY_COUNT};

/// Baseline returns for the default seven sectors; kept here because the
/// snapshot payload does not carry returns and imports fall back to these.
const DEFAULT_RETURNS: [f64; 7] = [6.0, 8.0, 5.0, 7.0, 6.5, 4.5, 3.5];

// ─── Snapshot payload ───────────────────────────────────────────────────────

/// The wire format shared with the presentation layer. Field names are
/// camelCase for drop-in compatibility with previously exported files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub industries: Vec<String>,
    /// N rows; columns beyond the boundary count are dropped, short rows
    /// are zero-padded.
    pub intensity: Vec<Vec<f64>>,
    #[serde(default)]
    pub mitigation_pct: Vec<f64>,
    #[serde(default)]
    pub supply_chain_mult: Vec<f64>,
    #[serde(default)]
    pub rebound_elasticity: Vec<f64>,
    #[serde(default)]
    pub scenario_quarters: Vec<Vec<f64>>,
}

impl Snapshot {
    /// Capture the current engine state for export.
    pub fn capture(
        portfolio: &Portfolio,
        mitigation: &BoundaryVec,
        timeline: &[Vec<f64>],
        timestamp: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            industries: portfolio.industries.clone(),
            intensity: portfolio.intensity.iter().map(|row| row.to_vec()).collect(),
            mitigation_pct: mitigation.to_vec(),
            supply_chain_mult: portfolio.supply_chain_mult.clone(),
            rebound_elasticity: portfolio.rebound_elasticity.clone(),
            scenario_quarters: timeline.to_vec(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))
    }

    /// Validate the payload and build the replacement state.
    ///
    /// Returns `(portfolio, mitigation, timeline)` on success; any failure
    /// leaves the caller's state untouched because nothing is swapped until
    /// the whole payload has been accepted. Per-industry coefficient vectors
    /// shorter than N are padded with neutral values; mitigation is resized
    /// to the boundary count and clamped to [0, 1].
    pub fn apply(&self) -> Result<(Portfolio, BoundaryVec, Vec<Vec<f64>>), EngineError> {
        if self.industries.is_empty() {
            return Err(EngineError::InvalidSnapshot("no industries".into()));
        }
        let n = self.industries.len();
        if self.intensity.len() != n {
            return Err(EngineError::InvalidSnapshot(format!(
                "{} industries but {} intensity rows",
                n,
                self.intensity.len()
            )));
        }

        let intensity: Vec<BoundaryVec> = self
            .intensity
            .iter()
            .map(|row| {
                let mut out = [0.0; BOUNDARY_COUNT];
                for (k, v) in row.iter().take(BOUNDARY_COUNT).enumerate() {
                    out[k] = if v.is_finite() { *v } else { 0.0 };
                }
                out
            })
            .collect();

        let mut supply_chain_mult = self.supply_chain_mult.clone();
        supply_chain_mult.resize(n, 1.0);
        let mut rebound_elasticity = self.rebound_elasticity.clone();
        rebound_elasticity.resize(n, 0.0);

        // Industries beyond the default table use the model-level fallback.
        let baseline_return: Vec<f64> = DEFAULT_RETURNS[..n.min(DEFAULT_RETURNS.len())].to_vec();

        let portfolio = Portfolio {
            industries: self.industries.clone(),
            intensity,
            baseline_return,
            supply_chain_mult,
            rebound_elasticity,
        };
        portfolio
            .validate()
            .map_err(|e| EngineError::InvalidSnapshot(e.to_string()))?;

        let mut mitigation = [0.0; BOUNDARY_COUNT];
        for (k, v) in self.mitigation_pct.iter().take(BOUNDARY_COUNT).enumerate() {
            mitigation[k] = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }

        Ok((portfolio, mitigation, self.scenario_quarters.clone()))
    }
}
