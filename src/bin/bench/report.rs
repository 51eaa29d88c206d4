// Aggregate statistics and the JSON report written by the bench runner.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl RunStats {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self { mean: 0.0, min: 0.0, max: 0.0 };
        }
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Self { mean, min, max }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub label: &'static str,
    pub runs: usize,
    /// Boundaries breached at the final quarter.
    pub final_breaches: RunStats,
    /// Worst final stock/threshold ratio across boundaries.
    pub max_threshold_ratio: RunStats,
    /// ROI of the first quarter's allocation.
    pub roi: RunStats,
}

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub runs_per_scenario: usize,
    pub periods: u32,
    pub scenarios: Vec<ScenarioReport>,
}
