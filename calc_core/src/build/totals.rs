//! BuildTotals - build-wide attributes after every source is aggregated

use super::power::{push_warning, PowerContext};
use super::{BuildWarning, MovementTotals};
use crate::archetype::CappedValue;
use crate::buffs::aggregate_buffs;
use crate::defense::{calculate_ehp, DefenseValues, ResistanceValues};
use crate::effect::{Effect, EffectTotals};
use crate::endurance::{calculate_endurance, EnduranceResult};
use crate::error::CalcError;
use crate::healing::{calculate_absorb, calculate_regeneration, AbsorbResult, AbsorbSource, RegenerationResult};
use crate::types::{DamageType, EffectType, MezType, ToWho};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics of a whole build
///
/// Defense, resistance, hit points, regeneration, recovery and perception
/// are capped. Stealth, threat, accuracy and tohit are reported uncapped;
/// only per-attack hit chances are clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildTotals {
    pub hit_points: CappedValue,
    pub regeneration: RegenerationResult,
    pub endurance: EnduranceResult,
    pub absorb: AbsorbResult,
    pub movement: MovementTotals,
    /// Perception radius in feet
    pub perception: CappedValue,
    pub stealth: f64,
    pub threat: f64,
    pub accuracy: f64,
    pub tohit: f64,
    /// Untyped damage buff
    pub damage_buff: f64,
    /// Global recharge bonus
    pub recharge: f64,
    pub endurance_discount: f64,
    pub defense: BTreeMap<DamageType, CappedValue>,
    pub defense_debuff_resistance: f64,
    pub resistance: BTreeMap<DamageType, CappedValue>,
    pub mez_protection: BTreeMap<MezType, f64>,
    pub mez_resistance: BTreeMap<MezType, f64>,
}

impl BuildTotals {
    /// Aggregate the build
    ///
    /// `effects` are the collected self effects, `totals` their grouped
    /// form. `toggle_drain` is the endurance per second of running toggles.
    pub fn calculate(
        ctx: &PowerContext<'_>,
        effects: &[Effect],
        totals: &EffectTotals,
        absorb_sources: &[AbsorbSource],
        toggle_drain: f64,
        warnings: &mut Vec<BuildWarning>,
    ) -> BuildTotals {
        let PowerContext {
            data,
            archetype,
            level,
            settings,
            constants,
        } = *ctx;
        let caps = &archetype.caps;

        let base_hp = archetype.base_hit_points(&data.modifiers, level);
        let hit_points = caps.apply_hp_cap(base_hp * (1.0 + totals.self_total(EffectType::HitPoints)));
        check_clamp(warnings, "hit points", &hit_points);

        let regeneration = calculate_regeneration(
            archetype,
            totals.self_total(EffectType::Regeneration),
            &constants.recovery,
        );
        check_clamp(warnings, "regeneration", &regeneration.regen_mult);

        let endurance = calculate_endurance(
            archetype,
            totals.self_total(EffectType::Recovery),
            totals.self_total(EffectType::MaxEndurance),
            toggle_drain,
            &constants.recovery,
        );
        check_clamp(warnings, "recovery", &endurance.recovery_mult);

        let absorb = calculate_absorb(absorb_sources, hit_points.capped);

        let perception_buff: f64 = aggregate_buffs(effects)
            .iter()
            .filter(|b| {
                b.key.effect_type == EffectType::Perception
                    && b.key.to_who == ToWho::SelfTarget
                    && b.key.pv_mode.active_in(settings.pv_mode)
            })
            .map(|b| b.net)
            .sum();
        let perception = CappedValue::clamp(
            constants.perception.base * (1.0 + perception_buff),
            constants.perception.cap,
        );
        check_clamp(warnings, "perception", &perception);

        let ddr = totals.self_total(EffectType::DefenseDebuffResistance);
        let defense = DefenseValues::from_effects(effects, settings.pv_mode, ddr).capped(caps);
        for (damage_type, value) in &defense {
            check_clamp(warnings, &format!("defense ({:?})", damage_type).to_lowercase(), value);
        }

        let resistance = ResistanceValues::from_totals(totals).capped(caps);
        for (damage_type, value) in &resistance {
            check_clamp(warnings, &format!("resistance ({:?})", damage_type).to_lowercase(), value);
        }

        let per_mez = |effect_type: EffectType| -> BTreeMap<MezType, f64> {
            MezType::all()
                .iter()
                .map(|m| (*m, totals.self_mez(effect_type, *m)))
                .filter(|(_, value)| *value != 0.0)
                .collect()
        };

        let build = BuildTotals {
            hit_points,
            regeneration,
            endurance,
            absorb,
            movement: MovementTotals::from_totals(totals, &constants.movement),
            perception,
            stealth: totals.self_total(EffectType::Stealth),
            threat: archetype.base_threat + totals.self_total(EffectType::Threat),
            accuracy: totals.self_total(EffectType::Accuracy),
            tohit: totals.self_total(EffectType::ToHit),
            damage_buff: totals.self_total(EffectType::DamageBuff),
            recharge: totals.self_total(EffectType::Recharge),
            endurance_discount: totals.self_total(EffectType::EnduranceDiscount),
            defense,
            defense_debuff_resistance: ddr,
            resistance,
            mez_protection: per_mez(EffectType::MezProtection),
            mez_resistance: per_mez(EffectType::MezResistance),
        };

        tracing::debug!(
            hit_points = build.hit_points.capped,
            recovery = build.endurance.recovery_per_second,
            regeneration = build.regeneration.per_second,
            "build totals aggregated"
        );
        build
    }

    /// Capped defense for one category, zero when absent
    pub fn defense(&self, damage_type: DamageType) -> f64 {
        self.defense.get(&damage_type).map(|v| v.capped).unwrap_or(0.0)
    }

    /// Capped resistance for one damage type, zero when absent
    pub fn resistance(&self, damage_type: DamageType) -> f64 {
        self.resistance.get(&damage_type).map(|v| v.capped).unwrap_or(0.0)
    }

    /// Defense against an attack of `typed` damage at `position`
    pub fn defense_against(&self, typed: DamageType, position: DamageType) -> f64 {
        self.defense(typed).max(self.defense(position))
    }

    /// Effective hit points against one attack category
    ///
    /// Negative resistance counts as none.
    pub fn ehp_against(&self, typed: DamageType, position: DamageType, enemy_tohit: f64) -> Result<f64, CalcError> {
        calculate_ehp(
            self.hit_points.capped,
            self.defense_against(typed, position),
            self.resistance(typed).max(0.0),
            enemy_tohit,
        )
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("HP: {:.1}, regen {:.2}/s", self.hit_points.capped, self.regeneration.per_second),
            format!("Endurance: {}", self.endurance.summary()),
            format!(
                "Run {:.2} ft/s, jump {:.2} ft/s, fly {:.2} ft/s",
                self.movement.run.displayed, self.movement.jump.displayed, self.movement.fly.displayed
            ),
            format!("Perception: {:.0} ft", self.perception.capped),
        ];
        if !self.defense.is_empty() {
            let parts: Vec<String> = self
                .defense
                .iter()
                .map(|(t, v)| format!("{:?} {:.2}%", t, v.capped * 100.0))
                .collect();
            lines.push(format!("Defense: {}", parts.join(", ")));
        }
        if !self.resistance.is_empty() {
            let parts: Vec<String> = self
                .resistance
                .iter()
                .map(|(t, v)| format!("{:?} {:.2}%", t, v.capped * 100.0))
                .collect();
            lines.push(format!("Resistance: {}", parts.join(", ")));
        }
        if self.absorb.shield.capped > 0.0 {
            lines.push(format!("Absorb: {:.1}", self.absorb.shield.capped));
        }
        lines.join("\n")
    }
}

fn check_clamp(warnings: &mut Vec<BuildWarning>, attribute: &str, value: &CappedValue) {
    if value.was_clamped() {
        push_warning(warnings, BuildWarning::clamped(attribute, value.uncapped, value.capped));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::ArchetypeRecord;
    use crate::config::{default_archetypes, CalcSettings, GameConstants};
    use crate::data::GameData;
    use crate::types::PvMode;

    fn tanker() -> ArchetypeRecord {
        default_archetypes().unwrap().get("tanker").cloned().unwrap()
    }

    fn aggregate(effects: &[Effect], warnings: &mut Vec<BuildWarning>) -> BuildTotals {
        let data = GameData::new();
        let archetype = tanker();
        let settings = CalcSettings::default();
        let constants = GameConstants::default();
        let ctx = PowerContext {
            data: &data,
            archetype: &archetype,
            level: 50,
            settings: &settings,
            constants: &constants,
        };
        let totals = EffectTotals::from_effects(effects, PvMode::Pve);
        BuildTotals::calculate(&ctx, effects, &totals, &[], 0.0, warnings)
    }

    #[test]
    fn test_unbuffed_tanker() {
        let mut warnings = Vec::new();
        let totals = aggregate(&[], &mut warnings);
        assert!((totals.hit_points.capped - 1606.0).abs() < f64::EPSILON);
        assert!((totals.regeneration.per_second - 1.666667).abs() < 1e-6);
        assert!((totals.endurance.recovery_per_second - 2.78).abs() < 0.01);
        assert!((totals.movement.run.displayed - 21.0).abs() < f64::EPSILON);
        assert!((totals.perception.capped - 500.0).abs() < f64::EPSILON);
        assert!((totals.threat - 4.0).abs() < f64::EPSILON);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_resistance_clamped_with_warning() {
        let effects = vec![Effect::builder(EffectType::Resistance, 1.2)
            .damage_type(DamageType::Fire)
            .build()
            .unwrap()];
        let mut warnings = Vec::new();
        let totals = aggregate(&effects, &mut warnings);
        assert!((totals.resistance(DamageType::Fire) - 0.9).abs() < f64::EPSILON);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().starts_with("resistance (fire) exceeds hard cap"));
    }

    #[test]
    fn test_perception_multiplicative() {
        let effects = vec![
            Effect::builder(EffectType::Perception, 0.5).build().unwrap(),
            Effect::builder(EffectType::Perception, 0.2).build().unwrap(),
        ];
        let totals = aggregate(&effects, &mut Vec::new());
        assert!((totals.perception.capped - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_ehp_oracle() {
        let effects = vec![
            Effect::builder(EffectType::Defense, 0.45)
                .damage_type(DamageType::Melee)
                .build()
                .unwrap(),
            Effect::builder(EffectType::Resistance, 0.75)
                .damage_type(DamageType::Smashing)
                .build()
                .unwrap(),
        ];
        let mut totals = aggregate(&effects, &mut Vec::new());
        totals.hit_points = CappedValue::uncapped(2000.0);
        let ehp = totals.ehp_against(DamageType::Smashing, DamageType::Melee, 0.5).unwrap();
        assert!((ehp - 160_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_defense_debuff_resisted_before_cap() {
        let melee = |magnitude: f64| {
            Effect::builder(EffectType::Defense, magnitude)
                .damage_type(DamageType::Melee)
                .build()
                .unwrap()
        };
        let effects = vec![
            melee(0.30),
            melee(-0.20),
            Effect::builder(EffectType::DefenseDebuffResistance, 0.5).build().unwrap(),
        ];
        let totals = aggregate(&effects, &mut Vec::new());
        assert!((totals.defense(DamageType::Melee) - 0.20).abs() < 1e-12);
        assert!((totals.defense_debuff_resistance - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mez_protection_collected() {
        let effects = vec![Effect::builder(EffectType::MezProtection, 10.0)
            .mez_type(MezType::Held)
            .build()
            .unwrap()];
        let totals = aggregate(&effects, &mut Vec::new());
        assert_eq!(totals.mez_protection.get(&MezType::Held), Some(&10.0));
        assert!(!totals.mez_protection.contains_key(&MezType::Stunned));
    }
}
