//! Generic buff/debuff aggregation
//!
//! Effects are grouped by (type, aspect, to_who, pv_mode) and combined with
//! the stacking rule of their effect type: additive, multiplicative
//! (`Π(1 + mᵢ) − 1`) or best single value.

use crate::effect::Effect;
use crate::types::{Aspect, BuffStacking, EffectType, PvMode, ToWho};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuffKey {
    pub effect_type: EffectType,
    pub aspect: Aspect,
    pub to_who: ToWho,
    pub pv_mode: PvMode,
}

impl BuffKey {
    pub fn of(effect: &Effect) -> Self {
        BuffKey {
            effect_type: effect.effect_type(),
            aspect: effect.aspect(),
            to_who: effect.to_who(),
            pv_mode: effect.pv_mode(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffKind {
    Buff,
    Debuff,
}

/// Buff or debuff, from who the effect lands on and its sign
///
/// On self a non-negative magnitude is a buff; on a target only a positive
/// magnitude is.
pub fn classify(effect: &Effect) -> BuffKind {
    let magnitude = effect.value();
    match effect.to_who() {
        ToWho::SelfTarget if magnitude >= 0.0 => BuffKind::Buff,
        ToWho::Target if magnitude > 0.0 => BuffKind::Buff,
        _ => BuffKind::Debuff,
    }
}

/// Combine magnitudes under one stacking rule
pub fn combine(stacking: BuffStacking, magnitudes: &[f64]) -> f64 {
    match stacking {
        BuffStacking::Additive => magnitudes.iter().sum(),
        BuffStacking::Multiplicative => {
            if magnitudes.is_empty() {
                return 0.0;
            }
            magnitudes.iter().map(|m| 1.0 + m).product::<f64>() - 1.0
        }
        BuffStacking::Best => magnitudes
            .iter()
            .copied()
            .fold(0.0, |best: f64, m| if m.abs() > best.abs() { m } else { best }),
    }
}

/// One aggregated buff category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffTotal {
    pub key: BuffKey,
    pub stacking: BuffStacking,
    /// Combined buffs only
    pub buff: f64,
    /// Combined debuffs only
    pub debuff: f64,
    /// Everything combined
    pub net: f64,
    pub sources: usize,
}

impl BuffTotal {
    pub fn kind(&self) -> BuffKind {
        match self.key.to_who {
            ToWho::SelfTarget if self.net >= 0.0 => BuffKind::Buff,
            ToWho::Target if self.net > 0.0 => BuffKind::Buff,
            _ => BuffKind::Debuff,
        }
    }
}

/// Aggregate `effects` into one total per key, sorted by key
pub fn aggregate_buffs(effects: &[Effect]) -> Vec<BuffTotal> {
    let mut grouped: BTreeMap<BuffKey, Vec<&Effect>> = BTreeMap::new();
    for effect in effects {
        grouped.entry(BuffKey::of(effect)).or_default().push(effect);
    }

    grouped
        .into_iter()
        .map(|(key, members)| {
            let stacking = key.effect_type.buff_stacking();
            let all: Vec<f64> = members.iter().map(|e| e.value()).collect();
            let (buffs, debuffs): (Vec<&Effect>, Vec<&Effect>) = members
                .iter()
                .copied()
                .partition(|e| classify(e) == BuffKind::Buff);
            let buff: Vec<f64> = buffs.iter().map(|e| e.value()).collect();
            let debuff: Vec<f64> = debuffs.iter().map(|e| e.value()).collect();

            BuffTotal {
                key,
                stacking,
                buff: combine(stacking, &buff),
                debuff: combine(stacking, &debuff),
                net: combine(stacking, &all),
                sources: members.len(),
            }
        })
        .collect()
}
