//! Target-side record: a Daggerheart adversary and the value types it is
//! built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, ConvertResult};

/// Power band 1–4, the anchor every derived number is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const ONE: Tier = Tier(1);
    pub const TWO: Tier = Tier(2);
    pub const THREE: Tier = Tier(3);
    pub const FOUR: Tier = Tier(4);
    pub const ALL: [Tier; 4] = [Tier::ONE, Tier::TWO, Tier::THREE, Tier::FOUR];

    pub fn new(value: u8) -> ConvertResult<Tier> {
        if (1..=4).contains(&value) {
            Ok(Tier(value))
        } else {
            Err(ConvertError::domain(format!(
                "tier must be between 1 and 4, got {}",
                value
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_i32(self) -> i32 {
        self.0 as i32
    }

    pub(crate) fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Tier {
    type Error = ConvertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tier::new(value)
    }
}

impl From<Tier> for u8 {
    fn from(t: Tier) -> u8 {
        t.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Minion,
    Standard,
    Bruiser,
    Ranged,
    Skulk,
    Support,
    Leader,
    Horde,
    Solo,
    Social,
    Swarm,
}

impl Archetype {
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Minion => "Minion",
            Archetype::Standard => "Standard",
            Archetype::Bruiser => "Bruiser",
            Archetype::Ranged => "Ranged",
            Archetype::Skulk => "Skulk",
            Archetype::Support => "Support",
            Archetype::Leader => "Leader",
            Archetype::Horde => "Horde",
            Archetype::Solo => "Solo",
            Archetype::Social => "Social",
            Archetype::Swarm => "Swarm",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatRole {
    Artillery,
    Bruiser,
    Skirmisher,
    Controller,
    Support,
    Leader,
}

impl CombatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            CombatRole::Artillery => "Artillery",
            CombatRole::Bruiser => "Bruiser",
            CombatRole::Skirmisher => "Skirmisher",
            CombatRole::Controller => "Controller",
            CombatRole::Support => "Support",
            CombatRole::Leader => "Leader",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub archetype: Archetype,
    pub role: Option<CombatRole>,
    /// Informational only, in `[0, 1]`.
    pub confidence: f32,
    /// Name of the classifier rule that produced this result.
    pub rule: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Minor,
    Major,
    Severe,
}

impl Difficulty {
    pub fn parse(s: &str) -> ConvertResult<Difficulty> {
        match s.trim().to_lowercase().as_str() {
            "minor" => Ok(Difficulty::Minor),
            "major" => Ok(Difficulty::Major),
            "severe" => Ok(Difficulty::Severe),
            other => Err(ConvertError::domain(format!(
                "unknown difficulty '{}' (expected minor, major or severe)",
                other
            ))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Minor => "Minor",
            Difficulty::Major => "Major",
            Difficulty::Severe => "Severe",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub minor: i32,
    pub major: i32,
    pub severe: i32,
}

impl Thresholds {
    pub fn new(minor: i32, major: i32, severe: i32) -> Self {
        Self {
            minor,
            major,
            severe,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.minor < self.major && self.major < self.severe
    }
}

impl fmt::Display for Thresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.minor, self.major, self.severe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageKind {
    Physical,
    Magic,
}

impl DamageKind {
    pub fn abbrev(self) -> &'static str {
        match self {
            DamageKind::Physical => "phy",
            DamageKind::Magic => "mag",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DieSize {
    D4,
    D6,
    D8,
    D10,
    D12,
}

impl DieSize {
    pub fn sides(self) -> u32 {
        match self {
            DieSize::D4 => 4,
            DieSize::D6 => 6,
            DieSize::D8 => 8,
            DieSize::D10 => 10,
            DieSize::D12 => 12,
        }
    }

    pub fn from_sides(sides: u32) -> ConvertResult<DieSize> {
        match sides {
            4 => Ok(DieSize::D4),
            6 => Ok(DieSize::D6),
            8 => Ok(DieSize::D8),
            10 => Ok(DieSize::D10),
            12 => Ok(DieSize::D12),
            other => Err(ConvertError::domain(format!(
                "unsupported die size d{} (expected d4, d6, d8, d10 or d12)",
                other
            ))),
        }
    }
}

impl TryFrom<u32> for DieSize {
    type Error = ConvertError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        DieSize::from_sides(value)
    }
}

impl From<DieSize> for u32 {
    fn from(d: DieSize) -> u32 {
        d.sides()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageExpr {
    pub count: u32,
    pub die: DieSize,
    #[serde(default)]
    pub modifier: i32,
    pub kind: DamageKind,
    /// Direct damage cannot be reduced by armor.
    #[serde(default)]
    pub direct: bool,
}

impl DamageExpr {
    pub fn new(count: u32, die: DieSize, modifier: i32, kind: DamageKind) -> Self {
        Self {
            count,
            die,
            modifier,
            kind,
            direct: false,
        }
    }

    pub fn with_direct(mut self, direct: bool) -> Self {
        self.direct = direct;
        self
    }

    pub fn average(&self) -> f64 {
        self.count as f64 * (self.die.sides() as f64 + 1.0) / 2.0 + self.modifier as f64
    }

    /// Same expression with `delta` dice, never dropping below one die.
    pub fn adjust_count(mut self, delta: i32) -> Self {
        self.count = (self.count as i64 + delta as i64).max(1) as u32;
        self
    }

    pub fn dice_notation(&self) -> String {
        match self.modifier {
            0 => format!("{}d{}", self.count, self.die.sides()),
            m if m > 0 => format!("{}d{}+{}", self.count, self.die.sides(), m),
            m => format!("{}d{}{}", self.count, self.die.sides(), m),
        }
    }
}

impl fmt::Display for DamageExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direct {
            write!(f, "{} direct {}", self.dice_notation(), self.kind.abbrev())
        } else {
            write!(f, "{} {}", self.dice_notation(), self.kind.abbrev())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RangeBand {
    Melee,
    VeryClose,
    Close,
    Far,
    VeryFar,
}

impl fmt::Display for RangeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RangeBand::Melee => "Melee",
            RangeBand::VeryClose => "Very Close",
            RangeBand::Close => "Close",
            RangeBand::Far => "Far",
            RangeBand::VeryFar => "Very Far",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    pub modifier: i32,
    pub range: RangeBand,
    pub damage: DamageExpr,
    /// Free-text riders, one per line.
    #[serde(default)]
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    Passive,
    Action,
    Reaction,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeatureKind::Passive => "Passive",
            FeatureKind::Action => "Action",
            FeatureKind::Reaction => "Reaction",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cost {
    Stress(u8),
    Fear(u8),
}

impl Cost {
    pub fn is_stress(self) -> bool {
        matches!(self, Cost::Stress(_))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Stress(1) => f.write_str("Mark a Stress"),
            Cost::Stress(n) => write!(f, "Mark {} Stress", n),
            Cost::Fear(1) => f.write_str("Spend a Fear"),
            Cost::Fear(n) => write!(f, "Spend {} Fear", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Identity key for merge/dedup (case-sensitive).
    pub name: String,
    pub kind: FeatureKind,
    pub description: String,
    #[serde(default)]
    pub cost: Option<Cost>,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub damage: Option<DamageExpr>,
}

impl Feature {
    pub fn new(name: impl Into<String>, kind: FeatureKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            cost: None,
            trigger: None,
            conditions: Vec::new(),
            damage: None,
        }
    }

    pub fn passive(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FeatureKind::Passive, description)
    }

    pub fn action(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FeatureKind::Action, description)
    }

    pub fn reaction(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, FeatureKind::Reaction, description)
    }

    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<String>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_damage(mut self, damage: DamageExpr) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn costs_stress(&self) -> bool {
        self.cost.is_some_and(Cost::is_stress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Movement {
    pub flying: bool,
    pub swimming: bool,
    pub climbing: bool,
    pub burrowing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HordeInfo {
    /// Creatures represented by each HP box.
    pub per_hp: u32,
    pub starting: DamageExpr,
    /// Damage once half or more of its HP is marked.
    pub reduced: DamageExpr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub name: String,
    pub bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Narrative {
    pub description: String,
    pub motives_tactics: Vec<String>,
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub design_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub source_system: String,
    pub source_cr: String,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub name: String,
    pub tier: Tier,
    pub archetype: Archetype,
    #[serde(default)]
    pub role: Option<CombatRole>,
    pub difficulty: Difficulty,
    pub evasion: i32,
    pub thresholds: Thresholds,
    pub hp: u32,
    pub stress: u32,
    pub attack: Attack,
    #[serde(default)]
    pub additional_attacks: Vec<Attack>,
    #[serde(default)]
    pub movement: Movement,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Spotlights per GM turn for Solo adversaries.
    #[serde(default)]
    pub relentless: Option<u8>,
    #[serde(default)]
    pub horde: Option<HordeInfo>,
    #[serde(default)]
    pub narrative: Narrative,
    #[serde(default)]
    pub tags: Vec<String>,
    pub provenance: Provenance,
}

impl Adversary {
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    pub fn has_feature_prefix(&self, prefix: &str) -> bool {
        self.features.iter().any(|f| f.name.starts_with(prefix))
    }

    pub fn attacks(&self) -> impl Iterator<Item = &Attack> {
        std::iter::once(&self.attack).chain(self.additional_attacks.iter())
    }
}
