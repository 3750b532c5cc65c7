//! Effect - the atomic unit of game behaviour

use crate::error::CalcError;
use crate::types::{Aspect, DamageType, EffectType, MezType, PvMode, Stacking, ToWho};
use serde::{Deserialize, Serialize};

/// A single validated game effect
///
/// Built through [`EffectBuilder`], which rejects out-of-domain values.
/// Once built an effect is never mutated; [`Effect::with_buffed_magnitude`]
/// returns a copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Effect {
    effect_type: EffectType,
    magnitude: f64,
    scale: f64,
    damage_type: Option<DamageType>,
    mez_type: Option<MezType>,
    aspect: Aspect,
    duration: f64,
    probability: f64,
    ticks: u32,
    to_who: ToWho,
    pv_mode: PvMode,
    stacking: Stacking,
    buffed_magnitude: Option<f64>,
    cancel_on_miss: bool,
    enhancement_tick: bool,
}

impl Effect {
    /// Start building an effect of `effect_type` with the given magnitude
    pub fn builder(effect_type: EffectType, magnitude: f64) -> EffectBuilder {
        EffectBuilder::new(effect_type, magnitude)
    }

    pub fn effect_type(&self) -> EffectType {
        self.effect_type
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn damage_type(&self) -> Option<DamageType> {
        self.damage_type
    }

    pub fn mez_type(&self) -> Option<MezType> {
        self.mez_type
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn to_who(&self) -> ToWho {
        self.to_who
    }

    pub fn pv_mode(&self) -> PvMode {
        self.pv_mode
    }

    pub fn stacking(&self) -> Stacking {
        self.stacking
    }

    pub fn buffed_magnitude(&self) -> Option<f64> {
        self.buffed_magnitude
    }

    /// Damage-over-time that stops on the first missed tick
    pub fn cancel_on_miss(&self) -> bool {
        self.cancel_on_miss
    }

    /// Toggle effect that ticks on the fixed enhancement interval
    pub fn enhancement_tick(&self) -> bool {
        self.enhancement_tick
    }

    /// Post-enhancement magnitude when known, base magnitude otherwise
    pub fn value(&self) -> f64 {
        self.buffed_magnitude.unwrap_or(self.magnitude)
    }

    /// Effects with probability below one are procs
    pub fn is_proc(&self) -> bool {
        self.probability < 1.0
    }

    /// Self-targeted special damage, only used to display heals
    pub fn is_display_only_damage(&self) -> bool {
        self.effect_type == EffectType::Damage
            && self.to_who == ToWho::SelfTarget
            && self.damage_type == Some(DamageType::Special)
    }

    /// Copy of this effect carrying a post-enhancement magnitude
    pub fn with_buffed_magnitude(&self, buffed: f64) -> Effect {
        Effect {
            buffed_magnitude: Some(buffed),
            ..self.clone()
        }
    }
}

/// Builder for [`Effect`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectBuilder {
    effect_type: EffectType,
    magnitude: f64,
    #[serde(default = "default_one")]
    scale: f64,
    #[serde(default)]
    damage_type: Option<DamageType>,
    #[serde(default)]
    mez_type: Option<MezType>,
    #[serde(default)]
    aspect: Aspect,
    #[serde(default)]
    duration: f64,
    #[serde(default = "default_one")]
    probability: f64,
    #[serde(default = "default_ticks")]
    ticks: u32,
    #[serde(default = "default_to_who")]
    to_who: ToWho,
    #[serde(default)]
    pv_mode: PvMode,
    #[serde(default)]
    stacking: Stacking,
    #[serde(default)]
    buffed_magnitude: Option<f64>,
    #[serde(default)]
    cancel_on_miss: bool,
    #[serde(default)]
    enhancement_tick: bool,
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

impl EffectBuilder {
    pub fn new(effect_type: EffectType, magnitude: f64) -> Self {
        EffectBuilder {
            effect_type,
            magnitude,
            scale: 1.0,
            damage_type: None,
            mez_type: None,
            aspect: Aspect::Current,
            duration: 0.0,
            probability: 1.0,
            ticks: 1,
            to_who: ToWho::SelfTarget,
            pv_mode: PvMode::Any,
            stacking: Stacking::Yes,
            buffed_magnitude: None,
            cancel_on_miss: false,
            enhancement_tick: false,
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn mez_type(mut self, mez_type: MezType) -> Self {
        self.mez_type = Some(mez_type);
        self
    }

    pub fn aspect(mut self, aspect: Aspect) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn to_who(mut self, to_who: ToWho) -> Self {
        self.to_who = to_who;
        self
    }

    pub fn targeting(self) -> Self {
        self.to_who(ToWho::Target)
    }

    pub fn pv_mode(mut self, pv_mode: PvMode) -> Self {
        self.pv_mode = pv_mode;
        self
    }

    pub fn stacking(mut self, stacking: Stacking) -> Self {
        self.stacking = stacking;
        self
    }

    pub fn buffed_magnitude(mut self, buffed: f64) -> Self {
        self.buffed_magnitude = Some(buffed);
        self
    }

    pub fn cancel_on_miss(mut self, cancel_on_miss: bool) -> Self {
        self.cancel_on_miss = cancel_on_miss;
        self
    }

    pub fn enhancement_tick(mut self, enhancement_tick: bool) -> Self {
        self.enhancement_tick = enhancement_tick;
        self
    }

    /// Validate and freeze the effect
    pub fn build(self) -> Result<Effect, CalcError> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(CalcError::InvalidProbability(self.probability));
        }
        if self.duration < 0.0 || self.duration.is_nan() {
            return Err(CalcError::NegativeDuration(self.duration));
        }
        if self.scale <= 0.0 || self.scale.is_nan() {
            return Err(CalcError::NonPositiveScale(self.scale));
        }

        Ok(Effect {
            effect_type: self.effect_type,
            magnitude: self.magnitude,
            scale: self.scale,
            damage_type: self.damage_type,
            mez_type: self.mez_type,
            aspect: self.aspect,
            duration: self.duration,
            probability: self.probability,
            ticks: self.ticks,
            to_who: self.to_who,
            pv_mode: self.pv_mode,
            stacking: self.stacking,
            buffed_magnitude: self.buffed_magnitude,
            cancel_on_miss: self.cancel_on_miss,
            enhancement_tick: self.enhancement_tick,
        })
    }
}

impl TryFrom<EffectBuilder> for Effect {
    type Error = CalcError;

    fn try_from(builder: EffectBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
