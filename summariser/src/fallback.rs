use load_history_model::{RunSummary, ScenarioName, ScenarioSummary};
use serde::{Deserialize, Serialize};

/// A scenario shown in the report that may be stood in for by the full load scenario
///
/// Dedicated stress and spike runs are not always executed, so when one has no requests the full
/// load scenario represents it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualScenario {
    Stress,
    Spike,
}

impl VirtualScenario {
    /// The scenario that is preferred when it has data
    pub fn dedicated(self) -> ScenarioName {
        match self {
            VirtualScenario::Stress => ScenarioName::Stress,
            VirtualScenario::Spike => ScenarioName::Spike,
        }
    }

    /// Pick the summary that represents this scenario for a run
    ///
    /// The dedicated scenario if it recorded requests, otherwise the full load scenario if it is
    /// present, even with zero requests. [None] means the run has no data for this scenario.
    pub fn resolve(self, run: &RunSummary) -> Option<&ScenarioSummary> {
        run.scenario(self.dedicated())
            .measured()
            .or_else(|| run.scenario(ScenarioName::FullLoad).present())
    }
}

pub fn effective_stress(run: &RunSummary) -> Option<&ScenarioSummary> {
    VirtualScenario::Stress.resolve(run)
}

pub fn effective_spike(run: &RunSummary) -> Option<&ScenarioSummary> {
    VirtualScenario::Spike.resolve(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn summary(requests: u64, avg_duration_ms: f64) -> ScenarioSummary {
        ScenarioSummary {
            requests,
            avg_duration_ms,
            ..Default::default()
        }
    }

    fn run(scenarios: &[(ScenarioName, ScenarioSummary)]) -> RunSummary {
        RunSummary {
            run_id: "run".to_string(),
            date: "today".to_string(),
            scenarios: scenarios.iter().cloned().collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn dedicated_scenario_wins_when_measured() {
        let run = run(&[
            (ScenarioName::Stress, summary(1000, 100.0)),
            (ScenarioName::FullLoad, summary(5000, 80.0)),
        ]);

        assert_eq!(effective_stress(&run), Some(&summary(1000, 100.0)));
    }

    #[test]
    fn idle_dedicated_scenario_falls_back_to_full_load() {
        let run = run(&[
            (ScenarioName::Spike, summary(0, 0.0)),
            (ScenarioName::FullLoad, summary(5000, 80.0)),
        ]);

        assert_eq!(effective_spike(&run), Some(&summary(5000, 80.0)));
    }

    #[test]
    fn absent_dedicated_scenario_falls_back_to_full_load() {
        let run = run(&[(ScenarioName::FullLoad, summary(500, 90.0))]);

        assert_eq!(effective_stress(&run), Some(&summary(500, 90.0)));
        assert_eq!(effective_spike(&run), Some(&summary(500, 90.0)));
    }

    #[test]
    fn idle_full_load_is_still_used() {
        let run = run(&[
            (ScenarioName::Stress, summary(0, 0.0)),
            (ScenarioName::FullLoad, summary(0, 0.0)),
        ]);

        assert_eq!(effective_stress(&run), Some(&summary(0, 0.0)));
    }

    #[test]
    fn nothing_to_fall_back_to_is_absent() {
        let run = run(&[
            (ScenarioName::Smoke, summary(60, 50.0)),
            (ScenarioName::Stress, summary(0, 0.0)),
        ]);

        assert_eq!(effective_stress(&run), None);
        assert_eq!(effective_spike(&run), None);
    }

    #[test]
    fn each_virtual_scenario_uses_its_own_dedicated_scenario() {
        let run = run(&[
            (ScenarioName::Stress, summary(10, 1.0)),
            (ScenarioName::Spike, summary(20, 2.0)),
        ]);

        assert_eq!(effective_stress(&run), Some(&summary(10, 1.0)));
        assert_eq!(effective_spike(&run), Some(&summary(20, 2.0)));
    }
}
