//! BuildResult - everything a build calculation returns

use super::{BuildTotals, BuildWarning, PowerStats};
use serde::Serialize;

/// Per-power stats, build totals and validation warnings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildResult {
    pub archetype_id: String,
    pub level: u32,
    pub powers: Vec<PowerStats>,
    pub totals: BuildTotals,
    pub warnings: Vec<BuildWarning>,
}

impl BuildResult {
    /// Stats of the first power with `power_id`
    pub fn power(&self, power_id: &str) -> Option<&PowerStats> {
        self.powers.iter().find(|p| p.power_id == power_id)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("{} level {}", self.archetype_id, self.level)];
        lines.push(self.totals.summary());
        lines.extend(self.powers.iter().map(|p| p.summary()));
        lines.extend(self.warnings.iter().map(|w| format!("warning: {}", w)));
        lines.join("\n")
    }
}
