//! BuildRequest - what the caller asks the engine to calculate

use crate::config::CalcSettings;
use crate::data::EffectRecord;
use serde::{Deserialize, Serialize};

/// One power picked by the build, with its enhancement slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlottedPower {
    pub power_id: String,
    /// Enhancement ids, one per slot
    #[serde(default)]
    pub enhancements: Vec<String>,
    /// Whether the power's self effects count toward the build totals.
    /// Defaults to on for toggles and autos, off for clicks.
    #[serde(default)]
    pub active: Option<bool>,
}

impl SlottedPower {
    pub fn new(power_id: impl Into<String>) -> Self {
        SlottedPower {
            power_id: power_id.into(),
            enhancements: Vec::new(),
            active: None,
        }
    }

    pub fn with_enhancement(mut self, enhancement_id: impl Into<String>) -> Self {
        self.enhancements.push(enhancement_id.into());
        self
    }

    /// Slot `count` copies of the same enhancement
    pub fn with_enhancements(mut self, enhancement_id: &str, count: usize) -> Self {
        self.enhancements
            .extend(std::iter::repeat(enhancement_id.to_string()).take(count));
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Build-wide buff supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalBuff {
    pub id: String,
    #[serde(default)]
    pub effects: Vec<EffectRecord>,
}

/// A complete build to calculate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRequest {
    pub archetype_id: String,
    pub level: u32,
    #[serde(default)]
    pub powers: Vec<SlottedPower>,
    #[serde(default)]
    pub global_buffs: Vec<GlobalBuff>,
    #[serde(default)]
    pub settings: CalcSettings,
}

impl BuildRequest {
    pub fn new(archetype_id: impl Into<String>, level: u32) -> Self {
        BuildRequest {
            archetype_id: archetype_id.into(),
            level,
            powers: Vec::new(),
            global_buffs: Vec::new(),
            settings: CalcSettings::default(),
        }
    }

    pub fn with_power(mut self, power: SlottedPower) -> Self {
        self.powers.push(power);
        self
    }

    pub fn with_global_buff(mut self, buff: GlobalBuff) -> Self {
        self.global_buffs.push(buff);
        self
    }

    pub fn with_settings(mut self, settings: CalcSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let request: BuildRequest = serde_json::from_str(
            r#"{
                "archetype_id": "tanker",
                "level": 50,
                "powers": [
                    {"power_id": "hasten", "enhancements": ["recharge_so", "recharge_so"]},
                    {"power_id": "tough", "active": true}
                ],
                "settings": {"proc_mode": "minimum"}
            }"#,
        )
        .unwrap();
        assert_eq!(request.powers.len(), 2);
        assert_eq!(request.powers[0].enhancements.len(), 2);
        assert_eq!(request.powers[1].active, Some(true));
        assert!(request.global_buffs.is_empty());
    }

    #[test]
    fn test_builder() {
        let request = BuildRequest::new("blaster", 50)
            .with_power(SlottedPower::new("fire_blast").with_enhancements("damage_so", 3));
        assert_eq!(request.powers[0].enhancements, vec!["damage_so"; 3]);
        assert!(request.powers[0].active.is_none());
    }
}
