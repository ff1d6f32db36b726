//! Source-side record: a D&D 5e stat block that an upstream parser has
//! already broken into fields.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, ConvertResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    #[serde(alias = "strength")]
    Str,
    #[serde(alias = "dexterity")]
    Dex,
    #[serde(alias = "constitution")]
    Con,
    #[serde(alias = "intelligence")]
    Int,
    #[serde(alias = "wisdom")]
    Wis,
    #[serde(alias = "charisma")]
    Cha,
}

impl Ability {
    /// Daggerheart trait used for reaction rolls against an effect that
    /// called for a save of this ability.
    pub fn reaction_trait(self) -> &'static str {
        match self {
            Ability::Str | Ability::Con => "Strength",
            Ability::Dex => "Agility",
            Ability::Int => "Knowledge",
            Ability::Wis => "Instinct",
            Ability::Cha => "Presence",
        }
    }

    pub fn parse(s: &str) -> Option<Ability> {
        match s.trim().to_lowercase().as_str() {
            "str" | "strength" => Some(Ability::Str),
            "dex" | "dexterity" => Some(Ability::Dex),
            "con" | "constitution" => Some(Ability::Con),
            "int" | "intelligence" => Some(Ability::Int),
            "wis" | "wisdom" => Some(Ability::Wis),
            "cha" | "charisma" => Some(Ability::Cha),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(rename = "str")]
    pub str_: i32,
    pub dex: i32,
    pub con: i32,
    #[serde(rename = "int")]
    pub int_: i32,
    pub wis: i32,
    pub cha: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            str_: 10,
            dex: 10,
            con: 10,
            int_: 10,
            wis: 10,
            cha: 10,
        }
    }
}

impl AbilityScores {
    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str_,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int_,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    pub fn mod_of(&self, ability: Ability) -> i32 {
        crate::ability_mod(self.score(ability))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Size::Tiny => "Tiny",
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
            Size::Huge => "Huge",
            Size::Gargantuan => "Gargantuan",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    Aberration,
    Beast,
    Celestial,
    Construct,
    Dragon,
    Elemental,
    Fey,
    Fiend,
    Giant,
    Humanoid,
    Monstrosity,
    Ooze,
    Plant,
    Undead,
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CreatureType::Aberration => "aberration",
            CreatureType::Beast => "beast",
            CreatureType::Celestial => "celestial",
            CreatureType::Construct => "construct",
            CreatureType::Dragon => "dragon",
            CreatureType::Elemental => "elemental",
            CreatureType::Fey => "fey",
            CreatureType::Fiend => "fiend",
            CreatureType::Giant => "giant",
            CreatureType::Humanoid => "humanoid",
            CreatureType::Monstrosity => "monstrosity",
            CreatureType::Ooze => "ooze",
            CreatureType::Plant => "plant",
            CreatureType::Undead => "undead",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Acid,
    Cold,
    Fire,
    Force,
    Lightning,
    Necrotic,
    Poison,
    Psychic,
    Radiant,
    Thunder,
}

impl DamageType {
    pub fn is_physical(self) -> bool {
        matches!(
            self,
            DamageType::Slashing | DamageType::Piercing | DamageType::Bludgeoning
        )
    }

    pub fn parse(s: &str) -> Option<DamageType> {
        use DamageType::*;
        match s.trim().to_lowercase().as_str() {
            "slashing" => Some(Slashing),
            "piercing" => Some(Piercing),
            "bludgeoning" => Some(Bludgeoning),
            "acid" => Some(Acid),
            "cold" => Some(Cold),
            "fire" => Some(Fire),
            "force" => Some(Force),
            "lightning" => Some(Lightning),
            "necrotic" => Some(Necrotic),
            "poison" => Some(Poison),
            "psychic" => Some(Psychic),
            "radiant" => Some(Radiant),
            "thunder" => Some(Thunder),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        use DamageType::*;
        match self {
            Slashing => "slashing",
            Piercing => "piercing",
            Bludgeoning => "bludgeoning",
            Acid => "acid",
            Cold => "cold",
            Fire => "fire",
            Force => "force",
            Lightning => "lightning",
            Necrotic => "necrotic",
            Poison => "poison",
            Psychic => "psychic",
            Radiant => "radiant",
            Thunder => "thunder",
        }
    }
}

/// Challenge rating, stored as a decimal. Accepts `0.25`, `"1/4"` or `"2"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "CrRepr", into = "String")]
pub struct ChallengeRating(f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum CrRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<CrRepr> for ChallengeRating {
    type Error = ConvertError;

    fn try_from(raw: CrRepr) -> Result<Self, Self::Error> {
        match raw {
            CrRepr::Number(v) => ChallengeRating::new(v),
            CrRepr::Text(s) => ChallengeRating::parse(&s),
        }
    }
}

impl From<ChallengeRating> for String {
    fn from(cr: ChallengeRating) -> String {
        cr.to_string()
    }
}

const XP_BY_CR: &[(f64, u32)] = &[
    (0.0, 10),
    (0.125, 25),
    (0.25, 50),
    (0.5, 100),
    (1.0, 200),
    (2.0, 450),
    (3.0, 700),
    (4.0, 1_100),
    (5.0, 1_800),
    (6.0, 2_300),
    (7.0, 2_900),
    (8.0, 3_900),
    (9.0, 5_000),
    (10.0, 5_900),
    (11.0, 7_200),
    (12.0, 8_400),
    (13.0, 10_000),
    (14.0, 11_500),
    (15.0, 13_000),
    (16.0, 15_000),
    (17.0, 18_000),
    (18.0, 20_000),
    (19.0, 22_000),
    (20.0, 25_000),
    (21.0, 33_000),
    (22.0, 41_000),
    (23.0, 50_000),
    (24.0, 62_000),
    (25.0, 75_000),
    (26.0, 90_000),
    (27.0, 105_000),
    (28.0, 120_000),
    (29.0, 135_000),
    (30.0, 155_000),
];

impl ChallengeRating {
    pub fn new(value: f64) -> ConvertResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConvertError::domain(format!(
                "challenge rating must be a non-negative number, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Parse `"1/8"`, `"1/2"`, `"17"` or `"0.25"`.
    pub fn parse(s: &str) -> ConvertResult<Self> {
        let trimmed = s.trim();
        let value = if let Some((num, den)) = trimmed.split_once('/') {
            let num: f64 = num
                .trim()
                .parse()
                .map_err(|_| ConvertError::domain(format!("invalid challenge rating '{}'", s)))?;
            let den: f64 = den
                .trim()
                .parse()
                .map_err(|_| ConvertError::domain(format!("invalid challenge rating '{}'", s)))?;
            if den == 0.0 {
                return Err(ConvertError::domain(format!(
                    "challenge rating '{}' divides by zero",
                    s
                )));
            }
            num / den
        } else {
            trimmed
                .parse()
                .map_err(|_| ConvertError::domain(format!("invalid challenge rating '{}'", s)))?
        };
        Self::new(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Experience points awarded for this CR (nearest listed CR at or below).
    pub fn xp(self) -> u32 {
        XP_BY_CR
            .iter()
            .rev()
            .find(|(cr, _)| *cr <= self.0)
            .map(|(_, xp)| *xp)
            .unwrap_or(10)
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            v if v == 0.125 => f.write_str("1/8"),
            v if v == 0.25 => f.write_str("1/4"),
            v if v == 0.5 => f.write_str("1/2"),
            v if v.fract() == 0.0 => write!(f, "{}", v as i64),
            v => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub average: i32,
    #[serde(default)]
    pub formula: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Speed {
    pub walk: u32,
    pub fly: u32,
    pub swim: u32,
    pub climb: u32,
    pub burrow: u32,
    pub hover: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    pub count: u32,
    pub sides: u32,
    #[serde(default)]
    pub modifier: i32,
    pub damage_type: DamageType,
}

impl DamageRoll {
    pub fn new(count: u32, sides: u32, modifier: i32, damage_type: DamageType) -> Self {
        Self {
            count,
            sides,
            modifier,
            damage_type,
        }
    }

    /// Average of the dice alone, `count × (sides + 1) / 2`.
    pub fn dice_average(&self) -> f64 {
        self.count as f64 * (self.sides as f64 + 1.0) / 2.0
    }

    /// Average including the flat modifier.
    pub fn average(&self) -> f64 {
        self.dice_average() + self.modifier as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    MeleeWeapon,
    RangedWeapon,
    MeleeOrRanged,
    MeleeSpell,
    RangedSpell,
}

impl AttackKind {
    pub fn is_spell(self) -> bool {
        matches!(self, AttackKind::MeleeSpell | AttackKind::RangedSpell)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFt {
    pub normal: u32,
    #[serde(default)]
    pub long: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAttack {
    pub kind: AttackKind,
    pub to_hit: i32,
    /// Melee reach in feet (defaults to 5 when absent).
    #[serde(default)]
    pub reach: Option<u32>,
    #[serde(default)]
    pub range: Option<RangeFt>,
    #[serde(default)]
    pub damage: Option<DamageRoll>,
    /// "plus 2d6 fire damage" components.
    #[serde(default)]
    pub extra_damage: Vec<DamageRoll>,
    /// Rider text that follows the damage ("the target is grappled...").
    #[serde(default)]
    pub effects: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTrait {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl MonsterTrait {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterAction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attack: Option<SourceAttack>,
}

fn one() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendaryAction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Legendary actions this option consumes ("Costs 2 Actions").
    #[serde(default = "one")]
    pub cost: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spellcasting {
    pub ability: Option<Ability>,
    pub save_dc: Option<i32>,
    pub attack_bonus: Option<i32>,
    pub caster_level: Option<u8>,
    /// Spell slots by spell level.
    pub slots: IndexMap<u8, u8>,
    /// Spells known by spell level (0 = cantrips).
    pub spells: IndexMap<u8, Vec<String>>,
    pub at_will: Vec<String>,
    /// Innate spells keyed by frequency ("1/day", "3/day each").
    pub per_day: IndexMap<String, Vec<String>>,
    pub description: String,
}

impl Spellcasting {
    pub fn total_slots(&self) -> u32 {
        self.slots.values().map(|n| *n as u32).sum()
    }

    /// Every named spell with the level it is known at (innate spells count
    /// as level 0 when at-will and level 1 otherwise).
    pub fn all_spells(&self) -> Vec<(u8, &str)> {
        let mut out = Vec::new();
        for (level, names) in &self.spells {
            out.extend(names.iter().map(|n| (*level, n.as_str())));
        }
        out.extend(self.at_will.iter().map(|n| (0, n.as_str())));
        for names in self.per_day.values() {
            out.extend(names.iter().map(|n| (1, n.as_str())));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub size: Size,
    pub creature_type: CreatureType,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub alignment: String,
    pub armor_class: i32,
    pub hit_points: HitPoints,
    #[serde(default)]
    pub speed: Speed,
    #[serde(default)]
    pub abilities: AbilityScores,
    #[serde(default)]
    pub saves: IndexMap<Ability, i32>,
    #[serde(default)]
    pub skills: IndexMap<String, i32>,
    #[serde(default)]
    pub damage_resistances: Vec<String>,
    #[serde(default)]
    pub damage_immunities: Vec<String>,
    #[serde(default)]
    pub damage_vulnerabilities: Vec<String>,
    #[serde(default)]
    pub condition_immunities: Vec<String>,
    #[serde(default)]
    pub senses: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub challenge_rating: ChallengeRating,
    #[serde(default)]
    pub traits: Vec<MonsterTrait>,
    #[serde(default)]
    pub actions: Vec<MonsterAction>,
    #[serde(default)]
    pub reactions: Vec<MonsterTrait>,
    #[serde(default)]
    pub legendary_actions: Vec<LegendaryAction>,
    #[serde(default)]
    pub mythic_actions: Vec<MonsterTrait>,
    #[serde(default)]
    pub lair_actions: Vec<MonsterTrait>,
    /// Text of the Multiattack action, when the stat block has one.
    #[serde(default)]
    pub multiattack: Option<String>,
    #[serde(default)]
    pub spellcasting: Option<Spellcasting>,
}

impl Monster {
    pub fn cr(&self) -> f64 {
        self.challenge_rating.value()
    }

    /// Check the fields every stage relies on.
    pub fn validate(&self) -> ConvertResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConvertError::precondition("source monster has no name"));
        }
        if self.armor_class <= 0 {
            return Err(ConvertError::precondition(format!(
                "{}: armor class must be positive, got {}",
                self.name, self.armor_class
            )));
        }
        if self.hit_points.average <= 0 {
            return Err(ConvertError::precondition(format!(
                "{}: hit points must be positive, got {}",
                self.name, self.hit_points.average
            )));
        }
        let a = &self.abilities;
        if [a.str_, a.dex, a.con, a.int_, a.wis, a.cha]
            .iter()
            .any(|s| *s <= 0)
        {
            return Err(ConvertError::precondition(format!(
                "{}: ability scores must be positive",
                self.name
            )));
        }
        Ok(())
    }

    pub fn attacks(&self) -> impl Iterator<Item = (&MonsterAction, &SourceAttack)> {
        self.actions
            .iter()
            .filter_map(|a| a.attack.as_ref().map(|atk| (a, atk)))
    }

    pub fn has_trait(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.traits
            .iter()
            .any(|t| t.name.to_lowercase().contains(&needle))
    }

    pub fn find_trait(&self, needle: &str) -> Option<&MonsterTrait> {
        let needle = needle.to_lowercase();
        self.traits
            .iter()
            .find(|t| t.name.to_lowercase().contains(&needle))
    }

    pub fn has_legendary_resistance(&self) -> bool {
        self.has_trait("legendary resistance")
    }

    pub fn is_legendary(&self) -> bool {
        !self.legendary_actions.is_empty()
            || !self.mythic_actions.is_empty()
            || !self.lair_actions.is_empty()
            || self.has_legendary_resistance()
    }

    /// Name/description pairs across every ability block, in stat-block order.
    pub fn ability_texts(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = Vec::new();
        out.extend(
            self.traits
                .iter()
                .map(|t| (t.name.as_str(), t.description.as_str())),
        );
        out.extend(
            self.actions
                .iter()
                .map(|a| (a.name.as_str(), a.description.as_str())),
        );
        out.extend(
            self.reactions
                .iter()
                .map(|r| (r.name.as_str(), r.description.as_str())),
        );
        out.extend(
            self.legendary_actions
                .iter()
                .map(|l| (l.name.as_str(), l.description.as_str())),
        );
        if let Some(multi) = &self.multiattack {
            out.push(("Multiattack", multi.as_str()));
        }
        out
    }

    /// All ability text lowercased into one haystack for keyword scans.
    pub fn text_haystack(&self) -> String {
        self.ability_texts()
            .iter()
            .map(|(n, d)| format!("{} {}", n, d))
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase()
    }
}
