// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Planetary Boundary Portfolio Simulator ("Ninefold") - Dynamics Integrator
//
// Fixed-step schemes advancing the boundary stock vector under
// dB_k/dt = flux_k(t, B) - regen * threshold_k. The flux closure must be
// pure in (t, B): RK4 evaluates it against synthetic provisional stocks
// that are never committed.

use serde::{Deserialize, Serialize};

use crate::types::{BoundaryVec, BOUNDARY_COUNT, PB_THRESHOLDS};

// ─── Scheme ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheme {
    Euler,
    Rk4,
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::Rk4
    }
}

impl Scheme {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Rk4 => "rk4",
        }
    }

    /// Parse a scheme name, case-insensitively. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "euler" => Some(Self::Euler),
            "rk4" => Some(Self::Rk4),
            _ => None,
        }
    }
}

// ─── Derivative law ─────────────────────────────────────────────────────────

/// `dB_k/dt` for a given instantaneous flux. Regeneration recovers a fixed
/// fraction of each threshold per unit time, independent of the stock level.
pub fn derivatives(flux: &BoundaryVec, regen: f64) -> BoundaryVec {
    let mut d = [0.0; BOUNDARY_COUNT];
    for k in 0..BOUNDARY_COUNT {
        d[k] = flux[k] - regen * PB_THRESHOLDS[k];
    }
    d
}

fn add_scaled(base: &BoundaryVec, delta: &BoundaryVec, scale: f64) -> BoundaryVec {
    let mut out = *base;
    for k in 0..BOUNDARY_COUNT {
        out[k] += delta[k] * scale;
    }
    out
}

// ─── Steps ──────────────────────────────────────────────────────────────────

/// Explicit Euler: one flux evaluation, `B' = B + dt * f(t, B)`.
pub fn euler_step<F>(stocks: &BoundaryVec, t: f64, dt: f64, flux: &F, regen: f64) -> BoundaryVec
where
    F: Fn(f64, &BoundaryVec) -> BoundaryVec,
{
    let d = derivatives(&flux(t, stocks), regen);
    add_scaled(stocks, &d, dt)
}

/// Classical 4th-order Runge-Kutta: four flux evaluations at t, t+dt/2
/// (twice), t+dt, combined as (k1 + 2k2 + 2k3 + k4)/6.
pub fn rk4_step<F>(stocks: &BoundaryVec, t: f64, dt: f64, flux: &F, regen: f64) -> BoundaryVec
where
    F: Fn(f64, &BoundaryVec) -> BoundaryVec,
{
    let k1 = derivatives(&flux(t, stocks), regen);
    let b2 = add_scaled(stocks, &k1, dt / 2.0);
    let k2 = derivatives(&flux(t + dt / 2.0, &b2), regen);
    let b3 = add_scaled(stocks, &k2, dt / 2.0);
    let k3 = derivatives(&flux(t + dt / 2.0, &b3), regen);
    let b4 = add_scaled(stocks, &k3, dt);
    let k4 = derivatives(&flux(t + dt, &b4), regen);

    let mut next = *stocks;
    for k in 0..BOUNDARY_COUNT {
        next[k] += dt * (k1[k] + 2.0 * k2[k] + 2.0 * k3[k] + k4[k]) / 6.0;
    }
    next
}

/// Advance one step with the chosen scheme. Resulting stocks are not floored
/// at zero; restorative flux plus heavy regeneration can drive them negative.
pub fn step<F>(
    scheme: Scheme,
    stocks: &BoundaryVec,
    t: f64,
    dt: f64,
    flux: &F,
    regen: f64,
) -> BoundaryVec
where
    F: Fn(f64, &BoundaryVec) -> BoundaryVec,
{
    match scheme {
        Scheme::Euler => euler_step(stocks, t, dt, flux, regen),
        Scheme::Rk4 => rk4_step(stocks, t, dt, flux, regen),
    }
}
