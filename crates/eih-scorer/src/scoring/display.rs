use super::result::{round_to, ComponentKind, ScoreResult};
use serde::Serialize;

/// Number of leading components plotted on the radar chart.
pub const RADAR_AXES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDisplay {
    pub component: ComponentKind,
    pub label: &'static str,
    pub value_pct: f64,
}

/// Percent-scaled view of a [`ScoreResult`] for dashboards and terminal output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDisplay {
    /// Total score as a percentage, one decimal.
    pub headline_pct: f64,
    pub tract_id: String,
    /// All six components as percentages, two decimals.
    pub breakdown: Vec<ComponentDisplay>,
    /// The top-level categories as unrounded percentages.
    pub radar: Vec<ComponentDisplay>,
}

impl ScoreResult {
    pub fn display(&self) -> ScoreDisplay {
        let entries = self.component_scores.entries();
        let breakdown = entries
            .iter()
            .map(|&(component, value)| ComponentDisplay {
                component,
                label: component.label(),
                value_pct: round_to(value * 100.0, 2),
            })
            .collect();
        let radar = entries
            .iter()
            .take(RADAR_AXES)
            .map(|&(component, value)| ComponentDisplay {
                component,
                label: component.label(),
                value_pct: value * 100.0,
            })
            .collect();

        ScoreDisplay {
            headline_pct: round_to(self.total_score * 100.0, 1),
            tract_id: self.tract_id.clone(),
            breakdown,
            radar,
        }
    }
}
