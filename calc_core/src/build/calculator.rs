//! BuildCalculator - the entry point that turns a BuildRequest into a BuildResult
//!
//! Calculation runs in four passes:
//! 1. resolve every slotted power and apply its local enhancement
//! 2. grant set bonuses under the rule of five
//! 3. collect the self effects of active powers, set bonuses and global
//!    buffs and group them into build-wide totals
//! 4. evaluate each power against those totals and aggregate the build

use super::power::{push_warning, PowerContext, PowerStats, PreparedPower};
use super::{BuildRequest, BuildResult, BuildTotals, BuildWarning};
use crate::archetype::{MAX_LEVEL, MIN_LEVEL};
use crate::config::GameConstants;
use crate::data::GameData;
use crate::effect::{Effect, EffectTotals};
use crate::error::CalcError;
use crate::healing::{AbsorbAmount, AbsorbSource};
use crate::source::{collect_effects, EffectSource, GlobalBuffSource, PowerSource, SetBonusSource};
use crate::types::{Aspect, EffectType, PvMode, ToWho};
use std::collections::{BTreeMap, HashSet};

/// Calculates builds against one set of game data
///
/// Holds only shared references, so one calculator can serve any number of
/// requests, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct BuildCalculator<'a> {
    data: &'a GameData,
    constants: &'a GameConstants,
}

impl<'a> BuildCalculator<'a> {
    pub fn new(data: &'a GameData, constants: &'a GameConstants) -> Self {
        BuildCalculator { data, constants }
    }

    pub fn calculate(&self, request: &BuildRequest) -> Result<BuildResult, CalcError> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&request.level) {
            return Err(CalcError::InvalidLevel(request.level));
        }
        let archetype = self.data.archetype(&request.archetype_id)?;
        let ctx = PowerContext {
            data: self.data,
            archetype,
            level: request.level,
            settings: &request.settings,
            constants: self.constants,
        };
        tracing::debug!(
            archetype = %archetype.id,
            level = request.level,
            powers = request.powers.len(),
            "calculating build"
        );

        let mut warnings = Vec::new();
        let mut seen_unique = HashSet::new();
        let prepared = request
            .powers
            .iter()
            .map(|slotted| PreparedPower::prepare(&ctx, slotted, &mut seen_unique, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;

        let set_bonuses = self.grant_set_bonuses(&ctx, &prepared, &mut warnings)?;

        let global_buffs = request
            .global_buffs
            .iter()
            .map(|buff| {
                let effects = buff
                    .effects
                    .iter()
                    .map(|r| r.to_effect(&self.data.modifiers, request.level, archetype.column))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(GlobalBuffSource::new(buff.id.clone(), effects))
            })
            .collect::<Result<Vec<_>, CalcError>>()?;

        let power_sources: Vec<PowerSource> = prepared
            .iter()
            .filter(|p| p.active)
            .map(|p| PowerSource::new(p.record.id.clone(), &p.effects))
            .collect();

        let mut sources: Vec<&dyn EffectSource> = Vec::new();
        sources.extend(power_sources.iter().map(|s| s as &dyn EffectSource));
        sources.extend(set_bonuses.iter().map(|s| s as &dyn EffectSource));
        sources.extend(global_buffs.iter().map(|s| s as &dyn EffectSource));

        let effects = collect_effects(&sources);
        let totals = EffectTotals::from_effects(&effects, request.settings.pv_mode);
        let absorb_sources = absorb_sources(&sources, request.settings.pv_mode);

        let global_discount = totals.self_total(EffectType::EnduranceDiscount);
        let toggle_drain: f64 = prepared.iter().map(|p| p.toggle_drain(global_discount)).sum();

        let build_totals = BuildTotals::calculate(
            &ctx,
            &effects,
            &totals,
            &absorb_sources,
            toggle_drain,
            &mut warnings,
        );

        let powers = prepared
            .iter()
            .map(|p| PowerStats::evaluate(p, &ctx, &totals, build_totals.hit_points.capped))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            archetype = %archetype.id,
            effects = effects.len(),
            warnings = warnings.len(),
            "build calculated"
        );

        Ok(BuildResult {
            archetype_id: archetype.id.clone(),
            level: request.level,
            powers,
            totals: build_totals,
            warnings,
        })
    }

    /// Set bonuses earned by each power's slotted set pieces
    ///
    /// The same bonus counts at most `rule_of_five` times per build; later
    /// powers lose it first.
    fn grant_set_bonuses(
        &self,
        ctx: &PowerContext<'_>,
        prepared: &[PreparedPower<'_>],
        warnings: &mut Vec<BuildWarning>,
    ) -> Result<Vec<SetBonusSource>, CalcError> {
        let limit = self.constants.set_bonuses.rule_of_five;
        let mut granted: BTreeMap<&str, u32> = BTreeMap::new();
        let mut sources = Vec::new();

        for power in prepared {
            for (set_id, pieces) in &power.set_pieces {
                for bonus in self.data.set_bonuses(set_id) {
                    if bonus.pieces_required > *pieces {
                        break;
                    }
                    let count = granted.entry(bonus.bonus_id.as_str()).or_insert(0);
                    if *count >= limit {
                        push_warning(
                            warnings,
                            BuildWarning::SetBonusSuppressed {
                                bonus_id: bonus.bonus_id.clone(),
                                set_id: set_id.clone(),
                                power_id: power.record.id.clone(),
                            },
                        );
                        continue;
                    }
                    *count += 1;

                    let effects = bonus
                        .effects
                        .iter()
                        .map(|r| r.to_effect(&ctx.data.modifiers, ctx.level, ctx.archetype.column))
                        .collect::<Result<Vec<_>, _>>()?;
                    sources.push(SetBonusSource::new(set_id.clone(), bonus.bonus_id.clone(), effects));
                }
            }
        }

        tracing::trace!(granted = sources.len(), "set bonuses granted");
        Ok(sources)
    }
}

/// One absorb candidate per self absorb effect, labelled with its source
fn absorb_sources(sources: &[&dyn EffectSource], mode: PvMode) -> Vec<AbsorbSource> {
    let mut absorbs = Vec::new();
    for source in sources {
        let mut effects: Vec<Effect> = Vec::new();
        source.collect(&mut effects);
        absorbs.extend(
            effects
                .iter()
                .filter(|e| {
                    e.effect_type() == EffectType::Absorb
                        && e.to_who() == ToWho::SelfTarget
                        && e.pv_mode().active_in(mode)
                })
                .map(|e| {
                    let amount = match e.aspect() {
                        Aspect::Absolute => AbsorbAmount::Flat(e.value()),
                        _ => AbsorbAmount::PercentOfMaxHp(e.value()),
                    };
                    AbsorbSource::new(source.id(), amount)
                }),
        );
    }
    absorbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{GlobalBuff, SlottedPower};
    use crate::config::default_archetypes;
    use crate::data::{EffectRecord, EnhancementBonus, EnhancementRecord, PowerRecord, SetBonusRecord};
    use crate::types::{DamageType, EnhanceAspect, PowerType};

    fn game_data() -> GameData {
        let mut data = GameData::new();
        for id in ["tanker", "blaster"] {
            if let Some(archetype) = default_archetypes().unwrap().get(id) {
                data = data.with_archetype(archetype.clone());
            }
        }

        let mut weave = PowerRecord::new("weave", PowerType::Toggle);
        weave.endurance_cost = 0.26;
        weave.activate_period = 0.5;
        weave.effects = vec![EffectRecord {
            damage_type: Some(DamageType::Melee),
            magnitude: 0.05,
            ..EffectRecord::new(EffectType::Defense)
        }];

        let mut power_boost = PowerRecord::new("power_boost", PowerType::Click);
        power_boost.recharge_time = 60.0;

        data.with_power(weave)
            .with_power(power_boost)
            .with_enhancement(EnhancementRecord {
                id: "kinetic_combat".to_string(),
                name: "Kinetic Combat".to_string(),
                bonuses: vec![EnhancementBonus {
                    aspect: EnhanceAspect::Defense,
                    magnitude: 0.2,
                }],
                min_level: 10,
                max_level: 50,
                unique: false,
                proc_effects: Vec::new(),
                set_id: Some("kinetic_combat".to_string()),
            })
            .with_set_bonus(SetBonusRecord {
                set_id: "kinetic_combat".to_string(),
                pieces_required: 2,
                bonus_id: "kc_melee".to_string(),
                effects: vec![EffectRecord {
                    damage_type: Some(DamageType::Melee),
                    magnitude: 0.01,
                    ..EffectRecord::new(EffectType::Defense)
                }],
            })
    }

    #[test]
    fn test_invalid_level() {
        let data = game_data();
        let constants = GameConstants::default();
        let calculator = BuildCalculator::new(&data, &constants);
        let result = calculator.calculate(&BuildRequest::new("tanker", 0));
        assert_eq!(result.err(), Some(CalcError::InvalidLevel(0)));
        let result = calculator.calculate(&BuildRequest::new("tanker", 56));
        assert_eq!(result.err(), Some(CalcError::InvalidLevel(56)));
    }

    #[test]
    fn test_unknown_archetype() {
        let data = game_data();
        let constants = GameConstants::default();
        let result = BuildCalculator::new(&data, &constants).calculate(&BuildRequest::new("kheldian", 50));
        assert_eq!(result.err(), Some(CalcError::UnknownArchetype("kheldian".to_string())));
    }

    #[test]
    fn test_toggle_defense_with_set_bonus() {
        let data = game_data();
        let constants = GameConstants::default();
        let request = BuildRequest::new("tanker", 50)
            .with_power(SlottedPower::new("weave").with_enhancements("kinetic_combat", 2));
        let result = BuildCalculator::new(&data, &constants).calculate(&request).unwrap();

        // 0.05 x (1 + 0.4) from the toggle plus 0.01 from the set bonus
        assert!((result.totals.defense(DamageType::Melee) - 0.08).abs() < 1e-12);
        assert!((result.totals.endurance.toggle_drain - 0.52).abs() < 1e-12);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_rule_of_five() {
        let data = game_data();
        let constants = GameConstants::default();
        let mut request = BuildRequest::new("tanker", 50);
        for _ in 0..6 {
            request = request.with_power(SlottedPower::new("weave").with_enhancements("kinetic_combat", 2));
        }
        let result = BuildCalculator::new(&data, &constants).calculate(&request).unwrap();

        let suppressed = result
            .warnings
            .iter()
            .filter(|w| matches!(w, BuildWarning::SetBonusSuppressed { .. }))
            .count();
        assert_eq!(suppressed, 1);
        // six toggles at 0.07 each plus five bonuses
        assert!((result.totals.defense(DamageType::Melee) - (6.0 * 0.07 + 5.0 * 0.01)).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_power_contributes_nothing() {
        let data = game_data();
        let constants = GameConstants::default();
        let request = BuildRequest::new("tanker", 50).with_power(SlottedPower::new("weave").with_active(false));
        let result = BuildCalculator::new(&data, &constants).calculate(&request).unwrap();
        assert!(result.totals.defense.is_empty());
        assert!(result.totals.endurance.toggle_drain.abs() < f64::EPSILON);
    }

    #[test]
    fn test_global_buff_recharge() {
        let data = game_data();
        let constants = GameConstants::default();
        let request = BuildRequest::new("tanker", 50)
            .with_power(SlottedPower::new("power_boost"))
            .with_global_buff(GlobalBuff {
                id: "hasten".to_string(),
                effects: vec![EffectRecord {
                    magnitude: 0.7,
                    ..EffectRecord::new(EffectType::Recharge)
                }],
            });
        let result = BuildCalculator::new(&data, &constants).calculate(&request).unwrap();
        let power = result.power("power_boost").unwrap();
        assert!((power.recharge.actual_recharge - 60.0 / 1.7).abs() < 1e-9);
        assert!(power.accuracy.is_none());
    }

    #[test]
    fn test_absorb_takes_best_source() {
        let data = game_data();
        let constants = GameConstants::default();
        let request = BuildRequest::new("tanker", 50)
            .with_global_buff(GlobalBuff {
                id: "barrier".to_string(),
                effects: vec![EffectRecord {
                    magnitude: 0.1,
                    ..EffectRecord::new(EffectType::Absorb)
                }],
            })
            .with_global_buff(GlobalBuff {
                id: "shield_charge".to_string(),
                effects: vec![EffectRecord {
                    magnitude: 100.0,
                    aspect: Aspect::Absolute,
                    ..EffectRecord::new(EffectType::Absorb)
                }],
            });
        let result = BuildCalculator::new(&data, &constants).calculate(&request).unwrap();
        assert_eq!(result.totals.absorb.source_id.as_deref(), Some("barrier"));
        assert!((result.totals.absorb.shield.capped - 160.6).abs() < 1e-9);
    }
}
