// Allocation regimes swept by the benchmark runner.

use boundary_engine::default_allocation;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// How each quarter's raw allocation is produced for a run.
pub enum Allocation {
    /// One fixed allocation repeated every quarter.
    Fixed(Vec<f64>),
    /// Independent random weights per quarter, drawn from the run's PRNG.
    Random,
}

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub allocation: Allocation,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "DEFAULT_MIX",
            label: "Default mixed portfolio",
            allocation: Allocation::Fixed(default_allocation()),
        },
        Scenario {
            name: "FOSSIL_TILT",
            label: "Fossil-heavy portfolio",
            allocation: Allocation::Fixed(vec![5.0, 60.0, 10.0, 10.0, 10.0, 2.5, 2.5]),
        },
        Scenario {
            name: "GREEN_TILT",
            label: "Restorative-heavy portfolio",
            allocation: Allocation::Fixed(vec![35.0, 0.0, 10.0, 5.0, 10.0, 10.0, 30.0]),
        },
        Scenario {
            name: "EVEN_SPLIT",
            label: "Even split across sectors",
            allocation: Allocation::Fixed(vec![1.0; 7]),
        },
        Scenario {
            name: "RANDOM_WALK",
            label: "Random quarterly reallocation",
            allocation: Allocation::Random,
        },
    ]
}

/// Build the quarterly timeline for one run.
pub fn build_timeline(
    scenario: &Scenario,
    periods: u32,
    industries: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec<f64>> {
    match &scenario.allocation {
        Allocation::Fixed(alloc) => vec![alloc.clone()],
        Allocation::Random => (0..periods)
            .map(|_| (0..industries).map(|_| rng.gen::<f64>()).collect())
            .collect(),
    }
}
