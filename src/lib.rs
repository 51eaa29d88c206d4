// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold")

pub mod allocation;
pub mod integrator;
pub mod pressure;
pub mod returns;
pub mod scenario;
pub mod sensitivity;
pub mod snapshot;
pub mod types;

pub use integrator::Scheme;
pub use scenario::SimSession;
pub use snapshot::Snapshot;
pub use types::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Browser-facing facade owning one simulation session plus the portfolio,
/// config, mitigation, and scenario timeline the UI edits.
///
/// The UI drives one logical thread of control; methods that mutate session
/// state must not be re-entered while a previous call is in flight.
#[wasm_bindgen]
pub struct PortfolioSimulation {
    portfolio: Portfolio,
    config: EngineConfig,
    coupling: CouplingMatrix,
    mitigation: BoundaryVec,
    timeline: Vec<Vec<f64>>,
    session: SimSession,
    dt: f64,
    regen: f64,
    scheme: Scheme,
    /// Revenue vector from the previous interactive report; the rebound
    /// layer reacts to the change since this call.
    last_revenue: Option<Vec<f64>>,
}

#[wasm_bindgen]
impl PortfolioSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self {
            portfolio: Portfolio::default(),
            config: EngineConfig::default(),
            coupling: default_coupling(),
            mitigation: [0.0; BOUNDARY_COUNT],
            timeline: Vec::new(),
            session: SimSession::new(),
            dt: DEFAULT_DT,
            regen: DEFAULT_REGEN,
            scheme: Scheme::Rk4,
            last_revenue: None,
        }
    }

    /// Coupled pressure, threshold ratios, and ROI for a raw allocation.
    /// Remembers the revenue vector so the next call can apply rebound.
    pub fn pressure_report(&mut self, raw_allocation: Vec<f64>) -> JsValue {
        let revenue = allocation::allocation_to_revenue(&raw_allocation);
        let prev = self.last_revenue.clone();
        let result = pressure::compute_pressure(
            &self.portfolio,
            &revenue,
            prev.as_deref(),
            &self.config,
            &self.mitigation,
        )
        .and_then(|breakdown| {
            let coupled = pressure::apply_coupling(&breakdown.per_million, &self.coupling);
            let roi = returns::compute_roi(
                &self.portfolio,
                &revenue,
                Some(self.session.stocks()),
                &self.config,
            )?;
            Ok(PressureReport {
                per_million: coupled,
                ratios: pressure::threshold_ratios(&coupled),
                roi,
                total_revenue: breakdown.total_revenue,
            })
        });
        match result {
            Ok(report) => {
                self.last_revenue = Some(revenue);
                serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
            }
            Err(_) => JsValue::NULL,
        }
    }

    /// Advance the session by `periods` quarters over the stamped timeline
    /// (a single uniform allocation when none are stamped).
    pub fn run_quarters(&mut self, periods: u32) -> JsValue {
        let history = scenario::run_scenario(
            &mut self.session,
            &self.portfolio,
            &self.timeline,
            periods,
            self.dt,
            self.regen,
            self.scheme,
            &self.config,
            &self.mitigation,
        );
        match history {
            Ok(h) => serde_wasm_bindgen::to_value(&h).unwrap_or(JsValue::NULL),
            Err(_) => JsValue::NULL,
        }
    }

    /// Finite-difference pressure sensitivity at the default even split.
    pub fn sensitivity(&self, delta: f64) -> JsValue {
        let report = sensitivity::compute_sensitivity(
            &self.portfolio,
            &self.coupling,
            None,
            delta,
            &self.config,
            &self.mitigation,
        );
        match report {
            Ok(r) => serde_wasm_bindgen::to_value(&r).unwrap_or(JsValue::NULL),
            Err(_) => JsValue::NULL,
        }
    }

    // ─── Scenario timeline stamping ─────────────────────────────────────

    pub fn add_quarter(&mut self, raw_allocation: Vec<f64>) {
        self.timeline.push(raw_allocation);
    }

    pub fn remove_quarter(&mut self) {
        self.timeline.pop();
    }

    pub fn clear_quarters(&mut self) {
        self.timeline.clear();
    }

    pub fn quarter_count(&self) -> u32 {
        self.timeline.len() as u32
    }

    // ─── Configuration ──────────────────────────────────────────────────

    pub fn set_supply_chain(&mut self, enabled: bool) {
        self.config.supply_chain = enabled;
    }

    pub fn set_rebound(&mut self, enabled: bool) {
        self.config.rebound = enabled;
    }

    pub fn set_roi_feedback(&mut self, enabled: bool) {
        self.config.roi_feedback = enabled;
    }

    pub fn set_eta(&mut self, eta: f64) {
        if eta.is_finite() {
            self.config.eta = eta;
        }
    }

    pub fn set_dt(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.dt = dt;
        }
    }

    pub fn set_regen(&mut self, regen: f64) {
        if regen.is_finite() && regen >= 0.0 {
            self.regen = regen;
        }
    }

    /// Accepts "euler" or "rk4" (case-insensitive); anything else is ignored.
    pub fn set_scheme(&mut self, name: &str) -> bool {
        match Scheme::parse(name) {
            Some(s) => {
                self.scheme = s;
                true
            }
            None => false,
        }
    }

    /// Set one boundary's mitigation fraction, clamped to [0, 1].
    pub fn set_mitigation(&mut self, boundary: usize, value: f64) {
        if boundary < BOUNDARY_COUNT && value.is_finite() {
            self.mitigation[boundary] = value.clamp(0.0, 1.0);
        }
    }

    // ─── State access ───────────────────────────────────────────────────

    pub fn get_stocks(&self) -> Vec<f64> {
        self.session.stocks().to_vec()
    }

    pub fn boundary_names(&self) -> Vec<JsValue> {
        BOUNDARY_NAMES.iter().map(|n| JsValue::from_str(n)).collect()
    }

    pub fn industry_names(&self) -> Vec<JsValue> {
        self.portfolio
            .industries
            .iter()
            .map(|n| JsValue::from_str(n))
            .collect()
    }

    /// Restore the half-threshold initial stock condition.
    pub fn reset_stocks(&mut self) {
        self.session.reset();
    }

    // ─── Snapshot ───────────────────────────────────────────────────────

    pub fn export_snapshot(&self, timestamp: Option<String>) -> String {
        Snapshot::capture(&self.portfolio, &self.mitigation, &self.timeline, timestamp)
            .to_json()
            .unwrap_or_default()
    }

    /// Atomic import: on any validation failure the current portfolio,
    /// mitigation, and timeline are left untouched and `false` is returned.
    pub fn import_snapshot(&mut self, json: &str) -> bool {
        match Snapshot::from_json(json).and_then(|s| s.apply()) {
            Ok((portfolio, mitigation, timeline)) => {
                self.portfolio = portfolio;
                self.mitigation = mitigation;
                self.timeline = timeline;
                // Stale against a possibly different industry count.
                self.last_revenue = None;
                true
            }
            Err(_) => false,
        }
    }
}

impl Default for PortfolioSimulation {
    fn default() -> Self {
        Self::new()
    }
}
