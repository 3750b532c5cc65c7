//! Power and effect records as delivered by the data layer

use crate::archetype::ModifierTables;
use crate::effect::Effect;
use crate::error::CalcError;
use crate::types::{Aspect, DamageType, EffectType, MezType, PowerType, PvMode, Stacking, ToWho};
use serde::{Deserialize, Serialize};

/// One effect of a power before archetype scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub effect_type: EffectType,
    /// Unscaled magnitude (multiplied by `scale` and the table value)
    #[serde(default = "default_one")]
    pub magnitude: f64,
    #[serde(default = "default_one")]
    pub scale: f64,
    /// Modifier table providing the archetype/level multiplier
    #[serde(default)]
    pub modifier_table: Option<String>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub mez_type: Option<MezType>,
    #[serde(default)]
    pub aspect: Aspect,
    #[serde(default)]
    pub duration: f64,
    #[serde(default = "default_one")]
    pub probability: f64,
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    #[serde(default = "default_to_who")]
    pub to_who: ToWho,
    #[serde(default)]
    pub pv_mode: PvMode,
    #[serde(default)]
    pub stacking: Stacking,
    #[serde(default)]
    pub cancel_on_miss: bool,
    #[serde(default)]
    pub enhancement_tick: bool,
}

fn default_one() -> f64 {
    1.0
}

fn default_ticks() -> u32 {
    1
}

fn default_to_who() -> ToWho {
    ToWho::SelfTarget
}

impl EffectRecord {
    pub fn new(effect_type: EffectType) -> Self {
        EffectRecord {
            effect_type,
            magnitude: 1.0,
            scale: 1.0,
            modifier_table: None,
            damage_type: None,
            mez_type: None,
            aspect: Aspect::Current,
            duration: 0.0,
            probability: 1.0,
            ticks: 1,
            to_who: ToWho::SelfTarget,
            pv_mode: PvMode::Any,
            stacking: Stacking::Yes,
            cancel_on_miss: false,
            enhancement_tick: false,
        }
    }

    /// Archetype/level multiplier for this record, `1.0` without a table
    pub fn table_scale(&self, tables: &ModifierTables, level: u32, column: usize) -> f64 {
        match &self.modifier_table {
            Some(name) => tables.get(name, level, column),
            None => 1.0,
        }
    }

    /// Build the validated effect for an archetype column at `level`
    ///
    /// `magnitude = magnitude × scale × table(level, column)`
    pub fn to_effect(
        &self,
        tables: &ModifierTables,
        level: u32,
        column: usize,
    ) -> Result<Effect, CalcError> {
        let magnitude = self.magnitude * self.scale * self.table_scale(tables, level, column);

        let mut builder = Effect::builder(self.effect_type, magnitude)
            .scale(self.scale)
            .aspect(self.aspect)
            .duration(self.duration)
            .probability(self.probability)
            .ticks(self.ticks)
            .to_who(self.to_who)
            .pv_mode(self.pv_mode)
            .stacking(self.stacking)
            .cancel_on_miss(self.cancel_on_miss)
            .enhancement_tick(self.enhancement_tick);
        if let Some(damage_type) = self.damage_type {
            builder = builder.damage_type(damage_type);
        }
        if let Some(mez_type) = self.mez_type {
            builder = builder.mez_type(mez_type);
        }
        builder.build()
    }
}

/// One power as delivered by the data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub power_type: PowerType,
    #[serde(default = "default_one")]
    pub accuracy: f64,
    /// Base recharge time in seconds
    #[serde(default)]
    pub recharge_time: f64,
    /// Endurance per activation (per activate period for toggles)
    #[serde(default)]
    pub endurance_cost: f64,
    #[serde(default)]
    pub cast_time: f64,
    /// Seconds between toggle/auto pulses
    #[serde(default)]
    pub activate_period: f64,
    #[serde(default)]
    pub interrupt_time: f64,
    #[serde(default)]
    pub range: f64,
    #[serde(default)]
    pub auto_hit: bool,
    #[serde(default)]
    pub ignore_accuracy_buffs: bool,
    #[serde(default)]
    pub ignore_tohit_buffs: bool,
    #[serde(default)]
    pub effects: Vec<EffectRecord>,
    /// Powers the summoned pets use
    #[serde(default)]
    pub pet_powers: Vec<String>,
}

impl PowerRecord {
    pub fn new(id: impl Into<String>, power_type: PowerType) -> Self {
        let id = id.into();
        PowerRecord {
            name: id.clone(),
            id,
            power_type,
            accuracy: 1.0,
            recharge_time: 0.0,
            endurance_cost: 0.0,
            cast_time: 0.0,
            activate_period: 0.0,
            interrupt_time: 0.0,
            range: 0.0,
            auto_hit: false,
            ignore_accuracy_buffs: false,
            ignore_tohit_buffs: false,
            effects: Vec::new(),
            pet_powers: Vec::new(),
        }
    }

    /// Toggles and autos grant their self effects for as long as they run
    pub fn is_persistent(&self) -> bool {
        matches!(self.power_type, PowerType::Toggle | PowerType::Auto)
    }

    pub fn has_damage(&self) -> bool {
        self.effects.iter().any(|e| e.effect_type == EffectType::Damage)
    }
}
