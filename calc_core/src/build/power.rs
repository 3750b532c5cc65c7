//! Per-power statistics
//!
//! A power is evaluated in two steps. [`PreparedPower`] resolves its slots
//! and applies local enhancement; [`PowerStats::evaluate`] then adds the
//! build-wide buffs, which are only known once every power is prepared.

use super::{BuildWarning, SlottedPower};
use crate::accuracy::{calculate_accuracy, AccuracyInput, AccuracyResult};
use crate::archetype::ArchetypeRecord;
use crate::buffs::{classify, BuffKind};
use crate::config::{CalcSettings, GameConstants};
use crate::control::{resolve_knockback, KnockbackOutcome, MezEffect, MezOutcome};
use crate::damage::{calculate_damage, chance_weighted, damage_multiplier, DamageSummary, PowerTiming};
use crate::data::{EnhancementRecord, GameData, PowerRecord};
use crate::effect::{Effect, EffectTotals};
use crate::endurance::endurance_cost;
use crate::enhancement::{AspectBonus, EnhancementTotals};
use crate::error::CalcError;
use crate::pets::{calculate_pet_power, CasterBuffs, PetPowerResult};
use crate::purple_patch::mez_scale;
use crate::recharge::{calculate_recharge, RechargeResult};
use crate::types::{DamageType, EffectType, EnhanceAspect, MezType, PowerType, Stacking, ToWho};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Everything a power needs from the build around it
#[derive(Debug, Clone, Copy)]
pub struct PowerContext<'a> {
    pub data: &'a GameData,
    pub archetype: &'a ArchetypeRecord,
    pub level: u32,
    pub settings: &'a CalcSettings,
    pub constants: &'a GameConstants,
}

/// A power with its slots resolved and local enhancement applied
#[derive(Debug, Clone)]
pub struct PreparedPower<'a> {
    pub record: &'a PowerRecord,
    pub active: bool,
    pub enhancements: EnhancementTotals,
    /// Power effects; everything but damage carries its enhanced magnitude
    pub effects: Vec<Effect>,
    /// Effects granted by slotted proc enhancements
    pub proc_effects: Vec<Effect>,
    /// Slotted pieces per enhancement set
    pub set_pieces: BTreeMap<String, u32>,
}

impl<'a> PreparedPower<'a> {
    /// Resolve `slotted` against the game data
    ///
    /// Enhancements outside their level range and repeated unique
    /// enhancements are skipped with a warning. `seen_unique` carries the
    /// unique enhancements already slotted elsewhere in the build.
    pub fn prepare(
        ctx: &PowerContext<'a>,
        slotted: &SlottedPower,
        seen_unique: &mut HashSet<String>,
        warnings: &mut Vec<BuildWarning>,
    ) -> Result<Self, CalcError> {
        let PowerContext {
            data,
            archetype,
            level,
            ..
        } = *ctx;
        let record = data.power(&slotted.power_id)?;

        let mut usable: Vec<&EnhancementRecord> = Vec::new();
        for enhancement_id in &slotted.enhancements {
            let enhancement = data.enhancement(enhancement_id)?;
            if !enhancement.allows_level(level) {
                push_warning(
                    warnings,
                    BuildWarning::OutOfLevelRange {
                        enhancement_id: enhancement.id.clone(),
                        power_id: record.id.clone(),
                        level,
                    },
                );
                continue;
            }
            if enhancement.unique && !seen_unique.insert(enhancement.id.clone()) {
                push_warning(
                    warnings,
                    BuildWarning::DuplicateUnique {
                        enhancement_id: enhancement.id.clone(),
                        power_id: record.id.clone(),
                    },
                );
                continue;
            }
            usable.push(enhancement);
        }

        let enhancements = EnhancementTotals::from_slotted(usable.iter().copied());

        let mut set_pieces: BTreeMap<String, u32> = BTreeMap::new();
        for enhancement in &usable {
            if let Some(set_id) = &enhancement.set_id {
                *set_pieces.entry(set_id.clone()).or_insert(0) += 1;
            }
        }

        let effects = record
            .effects
            .iter()
            .map(|r| {
                r.to_effect(&data.modifiers, level, archetype.column)
                    .map(|e| enhance_effect(&e, &enhancements))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let proc_effects = usable
            .iter()
            .flat_map(|e| e.proc_effects.iter())
            .map(|r| r.to_effect(&data.modifiers, level, archetype.column))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(
            power = %record.id,
            slotted = slotted.enhancements.len(),
            usable = usable.len(),
            "power prepared"
        );

        Ok(PreparedPower {
            record,
            active: slotted.active.unwrap_or_else(|| record.is_persistent()),
            enhancements,
            effects,
            proc_effects,
            set_pieces,
        })
    }

    /// Activation timings with slotted interrupt reduction applied
    ///
    /// Recharge stays at its base value; the build-wide pass replaces it
    /// once global recharge is known.
    pub fn timing(&self) -> PowerTiming {
        let interrupt = self.enhancements.effective(EnhanceAspect::Interrupt);
        PowerTiming {
            recharge_time: self.record.recharge_time,
            cast_time: self.record.cast_time,
            interrupt_time: self.record.interrupt_time / (1.0 + interrupt),
            activate_period: self.record.activate_period,
        }
    }

    /// Range in feet after slotted range enhancement
    pub fn range(&self) -> f64 {
        self.record.range * (1.0 + self.enhancements.effective(EnhanceAspect::Range))
    }

    /// Endurance per activation (clicks) or per second (toggles)
    pub fn endurance_cost(&self, global_discount: f64) -> f64 {
        let discount = self.enhancements.effective(EnhanceAspect::EnduranceDiscount) + global_discount;
        endurance_cost(
            self.record.power_type,
            self.record.endurance_cost,
            self.record.activate_period,
            discount,
        )
    }

    /// Running toggles drain endurance every second
    pub fn toggle_drain(&self, global_discount: f64) -> f64 {
        if self.active && self.record.power_type == PowerType::Toggle {
            self.endurance_cost(global_discount)
        } else {
            0.0
        }
    }
}

/// Boost an effect by the slotted enhancement matching its type
///
/// Damage is left for the build-wide pass. Enhancement only strengthens
/// buffs; debuffs keep their base magnitude.
pub fn enhance_effect(effect: &Effect, enhancements: &EnhancementTotals) -> Effect {
    if effect.effect_type() == EffectType::Damage || classify(effect) == BuffKind::Debuff {
        return effect.clone();
    }
    match effect.effect_type().enhanced_by() {
        Some(aspect) => {
            effect.with_buffed_magnitude(effect.magnitude() * (1.0 + enhancements.effective(aspect)))
        }
        None => effect.clone(),
    }
}

/// Global damage buff for one damage type: untyped plus typed buffs
pub fn damage_buff_for(totals: &EffectTotals, damage_type: DamageType) -> f64 {
    totals.self_total(EffectType::DamageBuff) + totals.self_typed(EffectType::DamageBuff, damage_type)
}

/// What the caster hands down to its pets
pub fn caster_buffs(totals: &EffectTotals) -> CasterBuffs {
    CasterBuffs {
        accuracy: totals.self_total(EffectType::Accuracy),
        damage: DamageType::typed()
            .iter()
            .map(|t| (*t, damage_buff_for(totals, *t)))
            .filter(|(_, buff)| *buff != 0.0)
            .collect(),
    }
}

/// Final numbers for one power of the build
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerStats {
    pub power_id: String,
    pub name: String,
    pub power_type: PowerType,
    pub active: bool,
    /// Slotted enhancement per aspect, before and after ED
    pub enhancements: Vec<AspectBonus>,
    /// Present for powers that affect a target
    pub accuracy: Option<AccuracyResult>,
    pub hit_chance: Option<f64>,
    /// Tohit half of the roll, before accuracy
    pub tohit_chance: Option<f64>,
    pub damage: DamageSummary,
    pub recharge: RechargeResult,
    /// Timings after enhancement, recharge included
    pub timing: PowerTiming,
    /// Range in feet
    pub range: f64,
    /// Per activation for clicks, per second for toggles
    pub endurance_cost: f64,
    pub mez: Vec<MezOutcome>,
    pub knockback: Vec<KnockbackOutcome>,
    /// Hit points healed per activation
    pub heal: f64,
    pub pets: Vec<PetPowerResult>,
    /// Every effect with its final magnitude
    pub effects: Vec<Effect>,
}

impl PowerStats {
    /// Apply build-wide buffs to a prepared power
    ///
    /// `max_hp` is the capped hit point total heals are measured against.
    pub fn evaluate(
        prepared: &PreparedPower<'_>,
        ctx: &PowerContext<'_>,
        totals: &EffectTotals,
        max_hp: f64,
    ) -> Result<Self, CalcError> {
        let PowerContext {
            archetype,
            settings,
            constants,
            ..
        } = *ctx;
        let record = prepared.record;
        let enhancements = &prepared.enhancements;
        let damage_enhancement = enhancements.effective(EnhanceAspect::Damage);

        let mut effects: Vec<Effect> = prepared
            .effects
            .iter()
            .map(|effect| match (effect.effect_type(), effect.damage_type()) {
                (EffectType::Damage, damage_type) => {
                    let buff = damage_type.map(|t| damage_buff_for(totals, t)).unwrap_or(0.0);
                    let mult = damage_multiplier(damage_enhancement, buff, &archetype.caps);
                    effect.with_buffed_magnitude(effect.magnitude() * mult.capped)
                }
                _ => effect.clone(),
            })
            .collect();
        effects.extend(prepared.proc_effects.iter().cloned());

        let recharge = calculate_recharge(
            record.recharge_time,
            enhancements.raw(EnhanceAspect::Recharge),
            totals.self_total(EffectType::Recharge),
            archetype.caps.recharge_cap,
        );
        let timing = PowerTiming {
            recharge_time: recharge.actual_recharge,
            ..prepared.timing()
        };
        let damage = calculate_damage(&effects, &timing, settings, &constants.timing);

        let targets_enemy = effects.iter().any(|e| e.to_who() == ToWho::Target);
        let accuracy = targets_enemy.then(|| {
            calculate_accuracy(&AccuracyInput {
                base_accuracy: record.accuracy,
                enhancement: enhancements.effective(EnhanceAspect::Accuracy),
                global_accuracy_buff: totals.self_total(EffectType::Accuracy),
                global_tohit_buff: totals.self_total(EffectType::ToHit),
                level_diff: settings.enemy_level_offset,
                auto_hit: record.auto_hit,
                ignore_accuracy_buffs: record.ignore_accuracy_buffs,
                ignore_tohit_buffs: record.ignore_tohit_buffs,
            })
        });
        let hit_chance = accuracy
            .as_ref()
            .map(|a| a.hit_chance(settings.enemy_defense, &constants.hit_chance));
        let tohit_chance = accuracy
            .as_ref()
            .map(|a| a.tohit_chance(settings.enemy_defense, &constants.hit_chance));

        let global_discount = totals.self_total(EffectType::EnduranceDiscount);
        let endurance_cost = prepared.endurance_cost(global_discount);

        let (mez, knockback) = control_outcomes(&effects, archetype, enhancements, settings)?;

        let heal: f64 = effects
            .iter()
            .filter(|e| e.effect_type() == EffectType::Heal && e.probability() > 0.0)
            .map(|e| {
                let per_activation = e.value() * e.ticks() as f64;
                chance_weighted(per_activation, e.probability(), settings.proc_mode) * max_hp
            })
            .sum();

        let pets = if record.power_type == PowerType::Summon {
            pet_results(prepared, ctx, totals)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            power = %record.id,
            damage = damage.value,
            recharge = recharge.actual_recharge,
            endurance = endurance_cost,
            "power evaluated"
        );

        Ok(PowerStats {
            power_id: record.id.clone(),
            name: record.name.clone(),
            power_type: record.power_type,
            active: prepared.active,
            enhancements: enhancements.breakdown(),
            accuracy,
            hit_chance,
            tohit_chance,
            damage,
            recharge,
            timing,
            range: prepared.range(),
            endurance_cost,
            mez,
            knockback,
            heal,
            pets,
            effects,
        })
    }

    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{:.2}s recharge", self.recharge.actual_recharge)];
        if self.endurance_cost > 0.0 {
            let unit = if self.power_type == PowerType::Toggle { "/s" } else { "" };
            parts.push(format!("{:.2}{} end", self.endurance_cost, unit));
        }
        if !self.damage.is_empty() {
            parts.push(self.damage.summary());
        }
        if let Some(hit_chance) = self.hit_chance {
            parts.push(format!("{:.1}% to hit", hit_chance * 100.0));
        }
        if self.heal > 0.0 {
            parts.push(format!("{:.1} healed", self.heal));
        }
        format!("{}: {}", self.name, parts.join(", "))
    }
}

fn control_outcomes(
    effects: &[Effect],
    archetype: &ArchetypeRecord,
    enhancements: &EnhancementTotals,
    settings: &CalcSettings,
) -> Result<(Vec<MezOutcome>, Vec<KnockbackOutcome>), CalcError> {
    let mut mez = Vec::new();
    let mut knockback = Vec::new();

    for effect in effects {
        let (EffectType::Mez, Some(mez_type)) = (effect.effect_type(), effect.mez_type()) else {
            continue;
        };
        if effect.to_who() != ToWho::Target || effect.probability() <= 0.0 {
            continue;
        }

        let control = MezEffect::new(mez_type, effect.value(), effect.duration())?
            .with_at_scale(archetype.mez_scale)?
            .with_stacks(effect.stacking() == Stacking::Yes);

        if mez_type.is_knock() {
            let magnitude = control.effective_magnitude() * mez_scale(settings.enemy_level_offset);
            knockback.push(resolve_knockback(magnitude, settings.target_knockback_protection));
        } else {
            mez.push(control.resolve(
                settings.enemy_level_offset,
                settings.target_mez_protection,
                mez_duration_enhancement(enhancements, mez_type),
                settings.target_mez_resistance,
            )?);
        }
    }
    Ok((mez, knockback))
}

fn mez_duration_enhancement(enhancements: &EnhancementTotals, mez_type: MezType) -> f64 {
    enhancements.effective(EnhanceAspect::MezDuration(mez_type))
}

fn pet_results(
    prepared: &PreparedPower<'_>,
    ctx: &PowerContext<'_>,
    totals: &EffectTotals,
) -> Result<Vec<PetPowerResult>, CalcError> {
    let PowerContext {
        data,
        archetype,
        level,
        settings,
        constants,
    } = *ctx;
    let caster = caster_buffs(totals);
    let pet_damage = prepared.enhancements.effective(EnhanceAspect::Damage);
    let pet_accuracy = prepared.enhancements.effective(EnhanceAspect::Accuracy);

    prepared
        .record
        .pet_powers
        .iter()
        .map(|pet_power_id| {
            let pet_power = data.power(pet_power_id)?;
            let effects = pet_power
                .effects
                .iter()
                .map(|r| r.to_effect(&data.modifiers, level, archetype.column))
                .collect::<Result<Vec<_>, _>>()?;
            let timing = PowerTiming {
                recharge_time: pet_power.recharge_time,
                cast_time: pet_power.cast_time,
                interrupt_time: pet_power.interrupt_time,
                activate_period: pet_power.activate_period,
            };
            let base = calculate_damage(&effects, &timing, settings, &constants.timing);
            Ok(calculate_pet_power(
                &pet_power.id,
                &base,
                pet_power.accuracy,
                pet_damage,
                pet_accuracy,
                &caster,
            ))
        })
        .collect()
}

pub(crate) fn push_warning(warnings: &mut Vec<BuildWarning>, warning: BuildWarning) {
    tracing::warn!(%warning, "build warning");
    warnings.push(warning);
}
