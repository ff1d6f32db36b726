//! Source attacks → adversary attacks.

use tracing::{debug, warn};

use crate::adversary::{Archetype, Attack, DamageExpr, DamageKind, RangeBand, Tier};
use crate::monster::{AttackKind, DamageRoll, DamageType, Monster, MonsterAction, SourceAttack};
use crate::tables::TierReference;
use crate::text;

const DEFAULT_REACH: u32 = 5;
const DEFAULT_RANGE: u32 = 30;

/// `floor(to_hit / 2) + tier`.
pub fn attack_modifier(to_hit: i32, tier: Tier) -> i32 {
    to_hit.div_euclid(2) + tier.as_i32()
}

pub fn damage_kind(damage_type: DamageType) -> DamageKind {
    if damage_type.is_physical() {
        DamageKind::Physical
    } else {
        DamageKind::Magic
    }
}

/// Dice for an average-damage figure, per the reference breakpoints.
pub fn damage_for_average(average: f64, kind: DamageKind, refs: &TierReference) -> DamageExpr {
    let step = refs.dice_for_average(average);
    DamageExpr::new(step.count, step.die, 0, kind)
}

/// Re-tier a source damage roll. The flat modifier is re-derived by the
/// caller, so the breakpoint lookup keys on the dice average alone.
pub fn tier_damage(roll: &DamageRoll, refs: &TierReference) -> DamageExpr {
    damage_for_average(roll.dice_average(), damage_kind(roll.damage_type), refs)
}

pub fn range_band(attack: &SourceAttack) -> RangeBand {
    let melee = |reach: Option<u32>| {
        if reach.unwrap_or(DEFAULT_REACH) < 10 {
            RangeBand::VeryClose
        } else {
            RangeBand::Close
        }
    };
    let ranged = |normal: u32| {
        if normal < 80 {
            RangeBand::Close
        } else {
            RangeBand::Far
        }
    };
    match attack.kind {
        AttackKind::MeleeWeapon | AttackKind::MeleeSpell => melee(attack.reach),
        AttackKind::RangedWeapon | AttackKind::RangedSpell => {
            ranged(attack.range.map(|r| r.normal).unwrap_or(DEFAULT_RANGE))
        }
        AttackKind::MeleeOrRanged => match attack.range {
            Some(r) if r.normal >= 30 => ranged(r.normal),
            _ => melee(attack.reach),
        },
    }
}

/// Flat damage bonus a Solo earns on every damage roll it makes.
pub(crate) fn solo_damage_bonus(archetype: Archetype, tier: Tier) -> i32 {
    if archetype == Archetype::Solo {
        tier.as_i32()
    } else {
        0
    }
}

pub fn convert_attack(
    action: &MonsterAction,
    attack: &SourceAttack,
    tier: Tier,
    archetype: Archetype,
    refs: &TierReference,
) -> Attack {
    let primary_roll = attack
        .damage
        .clone()
        .or_else(|| text::first_damage_roll(&action.description));
    let mut damage = match &primary_roll {
        Some(roll) => tier_damage(roll, refs),
        None => refs.default_damage(tier),
    };
    damage.modifier = solo_damage_bonus(archetype, tier);

    let mut effects = Vec::new();
    for extra in &attack.extra_damage {
        let converted = tier_damage(extra, refs);
        effects.push(format!(
            "Also deals {} ({}).",
            converted,
            extra.damage_type.as_str()
        ));
    }
    if let Some(rider) = attack.effects.as_deref().map(str::trim) {
        if !rider.is_empty() {
            effects.push(rider.to_string());
        }
    }

    Attack {
        name: text::strip_parenthetical(&action.name),
        modifier: attack_modifier(attack.to_hit, tier),
        range: range_band(attack),
        damage,
        effects,
    }
}

/// Generic attack used when the source offers nothing to convert.
pub fn default_strike(tier: Tier, archetype: Archetype, refs: &TierReference) -> Attack {
    let mut damage = refs.default_damage(tier);
    damage.modifier = solo_damage_bonus(archetype, tier);
    Attack {
        name: "Strike".to_string(),
        modifier: refs.row(tier).attack_modifier,
        range: RangeBand::VeryClose,
        damage,
        effects: Vec::new(),
    }
}

/// Convert every source attack in order. The multiattack text rides along on
/// the first attack; a monster without attacks gets a generic Strike.
pub fn convert_attacks(
    monster: &Monster,
    tier: Tier,
    archetype: Archetype,
    refs: &TierReference,
) -> Vec<Attack> {
    let mut attacks: Vec<Attack> = monster
        .attacks()
        .map(|(action, atk)| convert_attack(action, atk, tier, archetype, refs))
        .collect();

    if attacks.is_empty() {
        warn!("{} has no attacks; substituting a generic Strike", monster.name);
        attacks.push(default_strike(tier, archetype, refs));
    }

    if let (Some(multi), Some(first)) = (monster.multiattack.as_deref(), attacks.first_mut()) {
        first.effects.push(format!("Multiattack: {}", multi.trim()));
    }

    debug!(count = attacks.len(), "converted attacks for {}", monster.name);
    attacks
}
