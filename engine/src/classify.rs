//! Archetype classification.
//!
//! Rules are plain data evaluated top to bottom; the first rule whose
//! predicate reports any evidence decides the archetype. The evidence count
//! only feeds the informational confidence score.

use tracing::debug;

use crate::adversary::{Archetype, Classification, CombatRole, Tier};
use crate::monster::{Ability, AttackKind, Monster};
use crate::text::count_matches;

const HEAL_WORDS: &[&str] = &[
    "heal",
    "regain hit points",
    "restores",
    "bless",
    "aid ",
    "cure wounds",
    "bolster",
    "inspire",
];
const COMMAND_WORDS: &[&str] = &[
    "command",
    "rally",
    "leadership",
    "allies within",
    "ally within",
    "orders",
    "warlord",
];
const STEALTH_WORDS: &[&str] = &[
    "stealth",
    "hide",
    "invisible",
    "nimble escape",
    "cunning action",
    "teleport",
    "shadow",
    "ambush",
];
const CONTROL_WORDS: &[&str] = &[
    "restrained",
    "grapple",
    "stunned",
    "paralyzed",
    "frightened",
    "charmed",
    "knocked prone",
    "pushed",
    "slowed",
];
const PACK_WORDS: &[&str] = &["pack tactics", "group tactics", "swarm tactics", "horde"];

/// Facts about a source monster the rules inspect, gathered once.
#[derive(Debug, Clone)]
pub struct Signals {
    pub name: String,
    pub subtype: String,
    pub cr: f64,
    pub tier: Tier,
    pub hp: i32,
    pub str_mod: i32,
    pub dex_mod: i32,
    pub legendary_actions: bool,
    pub mythic_actions: bool,
    pub legendary_resistance: bool,
    pub lair_actions: bool,
    pub multiattack: bool,
    pub melee_attacks: usize,
    pub ranged_attacks: usize,
    pub best_damage: f64,
    pub stealth_skill: bool,
    pub fast: bool,
    heal_hits: usize,
    command_hits: usize,
    stealth_hits: usize,
    control_hits: usize,
    pack_hits: usize,
}

impl Signals {
    pub fn gather(monster: &Monster, tier: Tier) -> Self {
        let text = monster.text_haystack();
        let trait_text = monster
            .traits
            .iter()
            .map(|t| format!("{} {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();

        let mut melee = 0;
        let mut ranged = 0;
        let mut best_damage: f64 = 0.0;
        for (_, atk) in monster.attacks() {
            match atk.kind {
                AttackKind::MeleeWeapon | AttackKind::MeleeSpell => melee += 1,
                AttackKind::RangedWeapon | AttackKind::RangedSpell => ranged += 1,
                AttackKind::MeleeOrRanged => {
                    let normal = atk.range.map(|r| r.normal).unwrap_or(0);
                    if normal >= 30 {
                        ranged += 1;
                    } else {
                        melee += 1;
                    }
                }
            }
            let total = atk.damage.as_ref().map(|d| d.average()).unwrap_or(0.0)
                + atk.extra_damage.iter().map(|d| d.average()).sum::<f64>();
            best_damage = best_damage.max(total);
        }

        Self {
            name: monster.name.to_lowercase(),
            subtype: monster.subtype.clone().unwrap_or_default().to_lowercase(),
            cr: monster.cr(),
            tier,
            hp: monster.hit_points.average,
            str_mod: monster.abilities.mod_of(Ability::Str),
            dex_mod: monster.abilities.mod_of(Ability::Dex),
            legendary_actions: !monster.legendary_actions.is_empty(),
            mythic_actions: !monster.mythic_actions.is_empty(),
            legendary_resistance: monster.has_legendary_resistance(),
            lair_actions: !monster.lair_actions.is_empty(),
            multiattack: monster.multiattack.is_some(),
            melee_attacks: melee,
            ranged_attacks: ranged,
            best_damage,
            stealth_skill: monster
                .skills
                .keys()
                .any(|k| k.eq_ignore_ascii_case("stealth")),
            fast: monster.speed.walk >= 40 || monster.speed.fly >= 60,
            heal_hits: count_matches(&text, HEAL_WORDS),
            command_hits: count_matches(&text, COMMAND_WORDS),
            stealth_hits: count_matches(&trait_text, STEALTH_WORDS),
            control_hits: count_matches(&text, CONTROL_WORDS),
            pack_hits: count_matches(&trait_text, PACK_WORDS),
        }
    }

    /// Typical hit points for a CR, after the 5e monster-building table.
    pub fn expected_hp(&self) -> f64 {
        if self.cr < 1.0 {
            (self.cr * 70.0).max(7.0)
        } else {
            15.0 * self.cr + 63.0
        }
    }
}

/// Evidence returned by a rule predicate: `0` means "does not apply".
pub type Predicate = fn(&Signals) -> u32;

#[derive(Debug, Clone)]
pub struct ClassifierRule {
    pub name: &'static str,
    pub archetype: Archetype,
    pub role: Option<CombatRole>,
    pub predicate: Predicate,
}

impl ClassifierRule {
    pub const fn new(
        name: &'static str,
        archetype: Archetype,
        role: Option<CombatRole>,
        predicate: Predicate,
    ) -> Self {
        Self {
            name,
            archetype,
            role,
            predicate,
        }
    }
}

fn bool_count(flags: &[bool]) -> u32 {
    flags.iter().filter(|f| **f).count() as u32
}

fn swarm(s: &Signals) -> u32 {
    bool_count(&[s.name.contains("swarm"), s.subtype.contains("swarm")])
}

fn solo(s: &Signals) -> u32 {
    bool_count(&[
        s.legendary_actions,
        s.mythic_actions,
        s.legendary_resistance,
        s.lair_actions,
        s.cr >= 10.0,
    ])
}

fn minion(s: &Signals) -> u32 {
    let low_hp = (s.hp as f64) < s.expected_hp() * 0.25;
    let weak_cr = s.cr <= 0.25;
    if weak_cr || low_hp {
        bool_count(&[s.cr == 0.0, weak_cr, low_hp])
    } else {
        0
    }
}

fn horde(s: &Signals) -> u32 {
    if s.pack_hits > 0 && s.cr <= 2.0 {
        s.pack_hits as u32 + 1
    } else {
        0
    }
}

fn support(s: &Signals) -> u32 {
    s.heal_hits as u32
}

fn leader(s: &Signals) -> u32 {
    s.command_hits as u32
}

fn bruiser(s: &Signals) -> u32 {
    if s.str_mod >= 3 && s.multiattack && s.melee_attacks > 0 && s.best_damage >= 10.0 {
        bool_count(&[true, s.str_mod >= 4, s.best_damage >= 15.0])
    } else {
        0
    }
}

fn ranged(s: &Signals) -> u32 {
    if s.ranged_attacks > s.melee_attacks {
        (s.ranged_attacks - s.melee_attacks) as u32
    } else {
        0
    }
}

fn skulk(s: &Signals) -> u32 {
    if s.dex_mod >= 2 && (s.stealth_skill || s.stealth_hits > 0) {
        bool_count(&[true, s.stealth_skill, s.stealth_hits > 0, s.fast])
    } else {
        0
    }
}

fn controller(s: &Signals) -> u32 {
    s.control_hits as u32
}

fn always(_: &Signals) -> u32 {
    1
}

/// The built-in rule order.
pub fn default_rules() -> Vec<ClassifierRule> {
    use Archetype as A;
    use CombatRole as R;
    vec![
        ClassifierRule::new("swarm", A::Swarm, None, swarm),
        ClassifierRule::new("solo", A::Solo, None, solo),
        ClassifierRule::new("minion", A::Minion, None, minion),
        ClassifierRule::new("horde", A::Horde, None, horde),
        ClassifierRule::new("support", A::Support, Some(R::Support), support),
        ClassifierRule::new("leader", A::Leader, Some(R::Leader), leader),
        ClassifierRule::new("bruiser", A::Bruiser, Some(R::Bruiser), bruiser),
        ClassifierRule::new("ranged", A::Ranged, Some(R::Artillery), ranged),
        ClassifierRule::new("skulk", A::Skulk, Some(R::Skirmisher), skulk),
        ClassifierRule::new("controller", A::Standard, Some(R::Controller), controller),
        ClassifierRule::new("standard", A::Standard, None, always),
    ]
}

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassifierRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl Classifier {
    pub fn with_rules(rules: Vec<ClassifierRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    /// Insert `rule` ahead of the rule named `before`, or at the end when no
    /// rule has that name.
    pub fn insert_before(&mut self, before: &str, rule: ClassifierRule) {
        match self.rules.iter().position(|r| r.name == before) {
            Some(idx) => self.rules.insert(idx, rule),
            None => self.rules.push(rule),
        }
    }

    pub fn classify(&self, monster: &Monster, tier: Tier) -> Classification {
        self.classify_signals(&Signals::gather(monster, tier))
    }

    pub fn classify_signals(&self, signals: &Signals) -> Classification {
        for rule in &self.rules {
            let evidence = (rule.predicate)(signals);
            if evidence > 0 {
                let confidence = (0.4 + 0.15 * evidence as f32).min(1.0);
                debug!(
                    rule = rule.name,
                    archetype = %rule.archetype,
                    evidence,
                    "classified {}",
                    signals.name
                );
                return Classification {
                    archetype: rule.archetype,
                    role: rule.role,
                    confidence,
                    rule: rule.name.to_string(),
                };
            }
        }
        Classification {
            archetype: Archetype::Standard,
            role: None,
            confidence: 0.4,
            rule: "fallback".to_string(),
        }
    }
}

/// Classify with the built-in rules.
pub fn classify(monster: &Monster, tier: Tier) -> Classification {
    Classifier::default().classify(monster, tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_hp_tracks_cr() {
        let mut s = Signals {
            name: String::new(),
            subtype: String::new(),
            cr: 5.0,
            tier: Tier::TWO,
            hp: 100,
            str_mod: 0,
            dex_mod: 0,
            legendary_actions: false,
            mythic_actions: false,
            legendary_resistance: false,
            lair_actions: false,
            multiattack: false,
            melee_attacks: 0,
            ranged_attacks: 0,
            best_damage: 0.0,
            stealth_skill: false,
            fast: false,
            heal_hits: 0,
            command_hits: 0,
            stealth_hits: 0,
            control_hits: 0,
            pack_hits: 0,
        };
        assert_eq!(s.expected_hp(), 138.0);
        s.cr = 0.5;
        assert_eq!(s.expected_hp(), 35.0);
    }
}
