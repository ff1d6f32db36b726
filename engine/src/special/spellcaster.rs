//! Spellcasting monsters.
//!
//! Known spells are matched by name against two small tables: damage
//! spells with a typical average damage, and control spells with the
//! conditions they inflict. Everything else is folded into the
//! Spellcasting summary.

use crate::adversary::{Cost, DamageKind, Feature};
use crate::attacks::damage_for_average;
use crate::monster::{Ability, Monster};

use super::{Specialization, SpecializationContext, SpecializationOutput};

const MAX_DAMAGE_SPELLS: usize = 3;
const MAX_CONTROL_SPELLS: usize = 2;

struct DamageSpell {
    name: &'static str,
    average: f64,
    area: bool,
}

const DAMAGE_SPELLS: &[DamageSpell] = &[
    DamageSpell { name: "fire bolt", average: 5.5, area: false },
    DamageSpell { name: "ray of frost", average: 4.5, area: false },
    DamageSpell { name: "sacred flame", average: 4.5, area: false },
    DamageSpell { name: "eldritch blast", average: 5.5, area: false },
    DamageSpell { name: "magic missile", average: 10.5, area: false },
    DamageSpell { name: "burning hands", average: 10.5, area: true },
    DamageSpell { name: "thunderwave", average: 9.0, area: true },
    DamageSpell { name: "scorching ray", average: 21.0, area: false },
    DamageSpell { name: "shatter", average: 13.5, area: true },
    DamageSpell { name: "fireball", average: 28.0, area: true },
    DamageSpell { name: "lightning bolt", average: 28.0, area: true },
    DamageSpell { name: "ice storm", average: 23.0, area: true },
    DamageSpell { name: "blight", average: 36.0, area: false },
    DamageSpell { name: "cone of cold", average: 36.0, area: true },
    DamageSpell { name: "flame strike", average: 28.0, area: true },
    DamageSpell { name: "chain lightning", average: 45.0, area: false },
    DamageSpell { name: "disintegrate", average: 75.0, area: false },
    DamageSpell { name: "finger of death", average: 61.5, area: false },
    DamageSpell { name: "meteor swarm", average: 140.0, area: true },
];

struct ControlSpell {
    name: &'static str,
    conditions: &'static [&'static str],
    effect: &'static str,
}

const CONTROL_SPELLS: &[ControlSpell] = &[
    ControlSpell {
        name: "hold person",
        conditions: &["Restrained"],
        effect: "A target within Far range is Restrained until they break free.",
    },
    ControlSpell {
        name: "hold monster",
        conditions: &["Restrained"],
        effect: "A target within Far range is Restrained until they break free.",
    },
    ControlSpell {
        name: "web",
        conditions: &["Restrained"],
        effect: "Targets within a Close area are Restrained by sticky webbing.",
    },
    ControlSpell {
        name: "entangle",
        conditions: &["Restrained"],
        effect: "Targets within a Close area are Restrained by grasping plants.",
    },
    ControlSpell {
        name: "slow",
        conditions: &["Vulnerable"],
        effect: "Up to three targets within Far range become Vulnerable.",
    },
    ControlSpell {
        name: "fear",
        conditions: &["Vulnerable"],
        effect: "Targets in front of this adversary become Vulnerable and must move away.",
    },
    ControlSpell {
        name: "blindness/deafness",
        conditions: &["Vulnerable"],
        effect: "A target within Far range becomes Vulnerable until the end of the scene.",
    },
    ControlSpell {
        name: "sleep",
        conditions: &["Vulnerable"],
        effect: "Targets within a Close area fall asleep and are Vulnerable until woken.",
    },
    ControlSpell {
        name: "invisibility",
        conditions: &["Hidden"],
        effect: "This adversary or an ally becomes Hidden until it attacks.",
    },
    ControlSpell {
        name: "greater invisibility",
        conditions: &["Hidden"],
        effect: "This adversary becomes Hidden, even while attacking.",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Spellcaster;

impl Spellcaster {
    /// `ceil(total slots / 3)`.
    pub fn bonus_stress(monster: &Monster) -> u32 {
        monster
            .spellcasting
            .as_ref()
            .map(|s| s.total_slots().div_ceil(3))
            .unwrap_or(0)
    }

    fn summary(monster: &Monster) -> Feature {
        let mut parts = Vec::new();
        if let Some(sc) = &monster.spellcasting {
            if let Some(ability) = sc.ability {
                parts.push(format!("Casts using {}", ability_name(ability)));
            }
            if let Some(dc) = sc.save_dc {
                parts.push(format!("spell Difficulty {}", dc));
            }
            if let Some(bonus) = sc.attack_bonus {
                parts.push(format!("spell attack +{}", bonus.div_euclid(2)));
            }
            let total = sc.total_slots();
            if total > 0 {
                parts.push(format!("{} slots folded into Stress", total));
            }
        }
        let lead = if parts.is_empty() {
            "Wields magic drawn from study, faith or innate power.".to_string()
        } else {
            format!("{}.", parts.join(", "))
        };
        Feature::passive(
            "Spellcasting",
            format!(
                "{} Spells without a dedicated feature can be narrated through \
                 this adversary's attacks and actions.",
                lead
            ),
        )
    }

    fn known_spells(monster: &Monster) -> Vec<(u8, String)> {
        let mut out: Vec<(u8, String)> = Vec::new();
        if let Some(sc) = &monster.spellcasting {
            out.extend(sc.all_spells().into_iter().map(|(l, n)| (l, n.to_lowercase())));
        }
        // Spellcasting given only as a trait: scan its text for spell names.
        if out.is_empty() {
            if let Some(t) = monster.find_trait("spellcasting") {
                let lower = t.description.to_lowercase();
                for spell in DAMAGE_SPELLS.iter().map(|s| s.name) {
                    if lower.contains(spell) {
                        out.push((1, spell.to_string()));
                    }
                }
                for spell in CONTROL_SPELLS.iter().map(|s| s.name) {
                    if lower.contains(spell) {
                        out.push((1, spell.to_string()));
                    }
                }
            }
        }
        out
    }

    fn damage_features(spells: &[(u8, String)], ctx: &SpecializationContext<'_>) -> Vec<Feature> {
        spells
            .iter()
            .filter_map(|(level, name)| {
                DAMAGE_SPELLS
                    .iter()
                    .find(|s| s.name == name)
                    .map(|s| (*level, s))
            })
            .take(MAX_DAMAGE_SPELLS)
            .map(|(level, spell)| {
                let damage = damage_for_average(spell.average, DamageKind::Magic, ctx.refs);
                let target = if spell.area {
                    "each target within a Close area"
                } else {
                    "a target within Far range"
                };
                let mut feature = Feature::action(
                    title_case(spell.name),
                    format!("Make a spell attack against {}. On a success, deal {}.", target, damage),
                )
                .with_damage(damage);
                if level >= 3 {
                    feature = feature.with_cost(Cost::Stress(1));
                }
                feature
            })
            .collect()
    }

    fn control_features(spells: &[(u8, String)]) -> Vec<Feature> {
        spells
            .iter()
            .filter_map(|(_, name)| CONTROL_SPELLS.iter().find(|s| s.name == name))
            .take(MAX_CONTROL_SPELLS)
            .map(|spell| {
                Feature::action(title_case(spell.name), spell.effect)
                    .with_cost(Cost::Stress(1))
                    .with_conditions(spell.conditions.iter().map(|c| c.to_string()).collect())
            })
            .collect()
    }

    fn defensive_features(spells: &[(u8, String)]) -> Vec<Feature> {
        let knows = |name: &str| spells.iter().any(|(_, s)| s == name);
        let mut out = Vec::new();
        if knows("shield") {
            out.push(
                Feature::reaction(
                    "Shield",
                    "Mark a Stress to gain +5 Evasion against the triggering attack.",
                )
                .with_trigger("When this adversary is hit by an attack")
                .with_cost(Cost::Stress(1)),
            );
        }
        if knows("counterspell") {
            out.push(
                Feature::reaction(
                    "Counterspell",
                    "Mark a Stress to interrupt the spell; it fails and has no effect.",
                )
                .with_trigger("When a creature within Far range casts a spell")
                .with_cost(Cost::Stress(1)),
            );
        }
        if knows("misty step") {
            out.push(Feature::action(
                "Misty Step",
                "Teleport to a point within Close range that this adversary can see.",
            ));
        }
        out
    }
}

fn ability_name(ability: Ability) -> &'static str {
    match ability {
        Ability::Str => "Strength",
        Ability::Dex => "Dexterity",
        Ability::Con => "Constitution",
        Ability::Int => "Intelligence",
        Ability::Wis => "Wisdom",
        Ability::Cha => "Charisma",
    }
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Specialization for Spellcaster {
    fn name(&self) -> &'static str {
        "spellcaster"
    }

    fn detect(&self, monster: &Monster) -> bool {
        monster.spellcasting.is_some()
            || monster.has_trait("spellcasting")
            || monster.attacks().any(|(_, atk)| atk.kind.is_spell())
    }

    fn convert(&self, ctx: &SpecializationContext<'_>) -> SpecializationOutput {
        let spells = Self::known_spells(ctx.monster);

        let mut features = vec![Self::summary(ctx.monster)];
        features.extend(Self::damage_features(&spells, ctx));
        features.extend(Self::control_features(&spells));
        features.extend(Self::defensive_features(&spells));

        SpecializationOutput {
            features,
            bonus_stress: Self::bonus_stress(ctx.monster),
            attacks: None,
        }
    }
}
