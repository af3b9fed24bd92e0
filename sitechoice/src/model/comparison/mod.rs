mod scenario_comparison;

pub use scenario_comparison::{compare_scenario, ScenarioComparison, SiteVisitDelta};
