#[cfg(test)]
mod tests {
    use boundary_engine::allocation::allocation_to_revenue;
    use boundary_engine::pressure::{apply_coupling, compute_pressure};
    use boundary_engine::scenario::{run_scenario, SimSession};
    use boundary_engine::sensitivity::compute_sensitivity;
    use boundary_engine::{
        default_allocation, default_coupling, EngineConfig, Portfolio, Scheme, BOUNDARY_COUNT,
        PB_THRESHOLDS,
    };

    fn zero_mitigation() -> [f64; BOUNDARY_COUNT] {
        [0.0; BOUNDARY_COUNT]
    }

    // ========== End-to-End Regression Fixture ==========

    // Default dataset, allocation [15,25,15,10,20,5,10], dt=0.25, regen=0.05,
    // RK4, 8 periods, no mitigation, supply chain and rebound off. The flux
    // is constant within every period and the regeneration term ignores the
    // stock level, so the trajectory is exactly
    //   B_q = B_0 + q * dt * (flux - regen * thr).
    #[test]
    fn test_eight_quarter_rk4_regression() {
        let p = Portfolio::default();
        let cfg = EngineConfig::default();
        let alloc = default_allocation();
        let timeline = vec![alloc.clone()];

        let mut session = SimSession::new();
        let history = run_scenario(
            &mut session,
            &p,
            &timeline,
            8,
            0.25,
            0.05,
            Scheme::Rk4,
            &cfg,
            &zero_mitigation(),
        )
        .unwrap();
        assert_eq!(history.len(), 8);

        let revenue = allocation_to_revenue(&alloc);
        let mut flux = [0.0; BOUNDARY_COUNT];
        for k in 0..BOUNDARY_COUNT {
            flux[k] = (0..p.len()).map(|i| p.intensity[i][k] * revenue[i]).sum();
        }

        for (q, entry) in history.iter().enumerate() {
            assert_eq!(entry.quarter, q as u32 + 1);
            for k in 0..BOUNDARY_COUNT {
                let expected = 0.5 * PB_THRESHOLDS[k]
                    + (q as f64 + 1.0) * 0.25 * (flux[k] - 0.05 * PB_THRESHOLDS[k]);
                let tol = expected.abs().max(1.0) * 1e-9;
                assert!(
                    (entry.stocks[k] - expected).abs() < tol,
                    "q={} k={}: {} vs {}",
                    q,
                    k,
                    entry.stocks[k],
                    expected
                );
                assert_eq!(entry.breaches[k], entry.stocks[k] > PB_THRESHOLDS[k]);
            }
        }

        // Deterministic: a second fresh session reproduces the run exactly.
        let mut session2 = SimSession::new();
        let history2 = run_scenario(
            &mut session2,
            &p,
            &timeline,
            8,
            0.25,
            0.05,
            Scheme::Rk4,
            &cfg,
            &zero_mitigation(),
        )
        .unwrap();
        for (a, b) in history.iter().zip(history2.iter()) {
            assert_eq!(a.stocks, b.stocks);
            assert_eq!(a.breaches, b.breaches);
        }
    }

    // ========== Euler vs RK4 ==========

    #[test]
    fn test_euler_matches_rk4_on_constant_period_flux() {
        // Per-period flux is constant, so both schemes integrate the same
        // linear law exactly and the histories coincide.
        let p = Portfolio::default();
        let cfg = EngineConfig::default();
        let timeline = vec![default_allocation()];

        let mut se = SimSession::new();
        let euler = run_scenario(
            &mut se,
            &p,
            &timeline,
            8,
            0.25,
            0.05,
            Scheme::Euler,
            &cfg,
            &zero_mitigation(),
        )
        .unwrap();
        let mut sr = SimSession::new();
        let rk4 = run_scenario(
            &mut sr,
            &p,
            &timeline,
            8,
            0.25,
            0.05,
            Scheme::Rk4,
            &cfg,
            &zero_mitigation(),
        )
        .unwrap();

        for (a, b) in euler.iter().zip(rk4.iter()) {
            for k in 0..BOUNDARY_COUNT {
                let tol = a.stocks[k].abs().max(1.0) * 1e-9;
                assert!((a.stocks[k] - b.stocks[k]).abs() < tol);
            }
        }
    }

    // ========== Coupling ==========

    #[test]
    fn test_coupling_raises_biodiversity_under_agriculture_tilt() {
        let p = Portfolio::default();
        let cfg = EngineConfig::default();
        // All-in on agriculture: heavy biogeochemical load feeds the
        // biodiversity boundary through the coupling matrix.
        let revenue = allocation_to_revenue(&[0.0, 0.0, 100.0, 0.0, 0.0, 0.0, 0.0]);
        let out = compute_pressure(&p, &revenue, None, &cfg, &zero_mitigation()).unwrap();
        let coupled = apply_coupling(&out.per_million, &default_coupling());
        assert!(coupled[1] > out.per_million[1]);
        // Uncoupled boundaries pass through unchanged (nothing couples into
        // freshwater).
        assert!((coupled[5] - out.per_million[5]).abs() < 1e-12);
    }

    // ========== Sensitivity ==========

    #[test]
    fn test_sensitivity_fossil_column_dominates_climate_row() {
        let p = Portfolio::default();
        let report = compute_sensitivity(
            &p,
            &default_coupling(),
            Some(&default_allocation()),
            0.1,
            &EngineConfig::default(),
            &zero_mitigation(),
        )
        .unwrap();
        // Climate row: the fossil-fuel column must carry the largest
        // positive sensitivity, the reforestation column a negative one.
        let climate = &report.matrix[0];
        let max_j = (0..7)
            .max_by(|&a, &b| climate[a].partial_cmp(&climate[b]).unwrap())
            .unwrap();
        assert_eq!(max_j, 1, "fossil fuels should dominate climate sensitivity");
        assert!(climate[6] < 0.0, "reforestation should relieve climate pressure");
    }

    // ========== Mitigation ==========

    #[test]
    fn test_full_mitigation_zeroes_scenario_flux() {
        let p = Portfolio::default();
        let cfg = EngineConfig::default();
        let mit = [1.0; BOUNDARY_COUNT];
        let mut s = SimSession::new();
        let hist = run_scenario(
            &mut s,
            &p,
            &[],
            4,
            0.25,
            0.0,
            Scheme::Rk4,
            &cfg,
            &mit,
        )
        .unwrap();
        // Zero flux and zero regen: stocks never move.
        for entry in hist {
            for k in 0..BOUNDARY_COUNT {
                assert!((entry.stocks[k] - 0.5 * PB_THRESHOLDS[k]).abs() < 1e-9);
            }
        }
    }

    // ========== Breach dynamics ==========

    #[test]
    fn test_fossil_heavy_allocation_breaches_climate() {
        let p = Portfolio::default();
        let cfg = EngineConfig::default();
        let fossil = vec![vec![0.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0]];
        let mut s = SimSession::new();
        let hist = run_scenario(
            &mut s,
            &p,
            &fossil,
            24,
            0.25,
            0.05,
            Scheme::Rk4,
            &cfg,
            &zero_mitigation(),
        )
        .unwrap();
        let last = hist.last().unwrap();
        assert!(
            last.breaches[0],
            "24 fossil-only quarters must push climate stock past threshold, got {}",
            last.stocks[0]
        );
        // Breaches only appear after the stock actually crosses.
        for entry in &hist {
            for k in 0..BOUNDARY_COUNT {
                assert_eq!(entry.breaches[k], entry.stocks[k] > PB_THRESHOLDS[k]);
            }
        }
    }
}
