//! The conversion pipeline.
//!
//! Each stage is a value that owns everything the next stage needs, so a
//! stage cannot be reached without the output of the one before it:
//!
//! ```text
//! Monster -> Classified -> Derived -> Converted -> Specialized -> Adversary
//! ```

use tracing::debug;

use crate::adversary::{
    Adversary, Archetype, Attack, Classification, Cost, Feature, HordeInfo, Movement,
    Provenance, Tier,
};
use crate::attacks::{convert_attacks, default_strike};
use crate::classify::Classifier;
use crate::config::ConvertOptions;
use crate::error::ConvertResult;
use crate::features::{base_features, merge_features};
use crate::monster::Monster;
use crate::narrative;
use crate::special::{self, Applied, Specialization, SpecializationContext};
use crate::stats::{self, CoreStats};
use crate::tables::TierReference;
use crate::tier::tier_for_cr;

pub const SOURCE_SYSTEM: &str = "D&D 5e";

/// Source monster with its tier and archetype settled.
#[derive(Debug, Clone)]
pub struct Classified<'a> {
    pub monster: &'a Monster,
    pub tier: Tier,
    pub classification: Classification,
}

#[derive(Debug, Clone)]
pub struct Derived<'a> {
    pub classified: Classified<'a>,
    pub stats: CoreStats,
}

#[derive(Debug, Clone)]
pub struct Converted<'a> {
    pub derived: Derived<'a>,
    /// Never empty; a generic Strike stands in for a monster without attacks.
    pub attacks: Vec<Attack>,
    pub base_features: Vec<Feature>,
    pub substituted_strike: bool,
}

#[derive(Debug, Clone)]
pub struct Specialized<'a> {
    pub converted: Converted<'a>,
    pub applied: Vec<Applied>,
}

impl<'a> Classified<'a> {
    /// Validate the source, map its CR to a tier and classify it.
    pub fn new(monster: &'a Monster, classifier: &Classifier) -> ConvertResult<Self> {
        monster.validate()?;
        let tier = tier_for_cr(monster.cr())?;
        let classification = classifier.classify(monster, tier);
        Ok(Self {
            monster,
            tier,
            classification,
        })
    }

    pub fn derive(self, refs: &TierReference) -> Derived<'a> {
        let stats = stats::derive(self.monster, self.tier, &self.classification, refs);
        Derived {
            classified: self,
            stats,
        }
    }
}

impl<'a> Derived<'a> {
    pub fn convert(self, refs: &TierReference) -> Converted<'a> {
        let c = &self.classified;
        let substituted_strike = c.monster.attacks().next().is_none();
        let attacks = convert_attacks(c.monster, c.tier, c.classification.archetype, refs);
        let base_features = base_features(c.monster, refs);
        Converted {
            derived: self,
            attacks,
            base_features,
            substituted_strike,
        }
    }
}

impl<'a> Converted<'a> {
    pub fn specialize(
        self,
        converters: &[Box<dyn Specialization>],
        refs: &TierReference,
    ) -> Specialized<'a> {
        let c = &self.derived.classified;
        let ctx = SpecializationContext {
            monster: c.monster,
            tier: c.tier,
            classification: &c.classification,
            attacks: &self.attacks,
            refs,
        };
        let applied = special::apply_all(converters, &ctx);
        Specialized {
            converted: self,
            applied,
        }
    }
}

/// Spotlights per GM turn for a Solo at `tier`.
pub fn relentless_count(tier: Tier) -> u8 {
    if tier.get() <= 2 { 2 } else { 3 }
}

/// Minion damage step: one extra Minion falls per this much damage.
pub fn minion_step(tier: Tier) -> u32 {
    2 + 2 * tier.get() as u32
}

/// Creatures per HP for a Horde; smaller creatures pack more bodies into
/// each box.
pub fn horde_per_hp(source_hp: i32) -> u32 {
    (30 / source_hp.max(1) as u32).clamp(2, 5)
}

pub(crate) fn relentless_feature(count: u8) -> Feature {
    Feature::passive(
        format!("Relentless ({})", count),
        format!(
            "This adversary can be spotlighted up to {} times per GM turn. \
             Spend Fear as usual to spotlight it.",
            count
        ),
    )
}

pub(crate) fn horde_feature(info: &HordeInfo) -> Feature {
    Feature::passive(
        format!("Horde ({}/HP)", info.per_hp),
        format!(
            "Each HP represents {} creatures. When half or more of its HP are marked, \
             its standard attack deals {} instead.",
            info.per_hp, info.reduced
        ),
    )
}

pub(crate) fn minion_features(name: &str, step: u32, attack: &Attack) -> Vec<Feature> {
    vec![
        Feature::passive(
            format!("Minion ({})", step),
            format!(
                "Defeated when it takes any damage. For every {} damage a PC deals to this \
                 adversary, defeat an additional Minion within range the attack would succeed \
                 against.",
                step
            ),
        ),
        Feature::action(
            "Group Attack",
            format!(
                "Spend a Fear to choose a target and spotlight every {} within Close range \
                 of them. Those Minions move into Melee range of the target and make one shared \
                 attack roll. On a success, they deal {} each. Combine this damage.",
                name, attack.damage
            ),
        )
        .with_cost(Cost::Fear(1)),
    ]
}

fn movement(monster: &Monster) -> Movement {
    Movement {
        flying: monster.speed.fly > 0,
        swimming: monster.speed.swim > 0,
        climbing: monster.speed.climb > 0,
        burrowing: monster.speed.burrow > 0,
    }
}

fn push_tag(tags: &mut Vec<String>, tag: impl Into<String>) {
    let tag = tag.into();
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

impl Specialized<'_> {
    pub fn assemble(self, options: &ConvertOptions, refs: &TierReference) -> Adversary {
        let Specialized { converted, applied } = self;
        let Converted {
            derived,
            attacks: base_attacks,
            base_features,
            substituted_strike,
        } = converted;
        let Derived { classified, stats } = derived;
        let Classified {
            monster,
            tier,
            classification,
        } = classified;
        let archetype = classification.archetype;

        let bonus: u32 = applied.iter().map(|a| a.output.bonus_stress).sum();
        let stress = stats::total_stress(archetype, stats.stress, bonus);

        let attacks = applied
            .iter()
            .find_map(|a| a.output.attacks.clone())
            .unwrap_or(base_attacks);
        let mut attacks = attacks.into_iter();
        let attack = attacks
            .next()
            .unwrap_or_else(|| default_strike(tier, archetype, refs));
        let additional_attacks: Vec<Attack> = attacks.collect();

        let mut relentless = None;
        let mut horde = None;
        let mut mechanics = Vec::new();
        match archetype {
            Archetype::Solo => {
                let count = relentless_count(tier);
                relentless = Some(count);
                mechanics.push(relentless_feature(count));
            }
            Archetype::Horde => {
                let info = HordeInfo {
                    per_hp: horde_per_hp(monster.hit_points.average),
                    starting: attack.damage,
                    reduced: attack.damage.adjust_count(-1),
                };
                mechanics.push(horde_feature(&info));
                horde = Some(info);
            }
            Archetype::Minion => {
                mechanics.extend(minion_features(&monster.name, minion_step(tier), &attack));
            }
            _ => {}
        }

        let mut lists = vec![base_features];
        lists.extend(applied.iter().map(|a| a.output.features.clone()));
        lists.push(mechanics);
        let features = merge_features(lists);

        let mut tags = Vec::new();
        push_tag(&mut tags, monster.creature_type.to_string());
        push_tag(&mut tags, monster.size.to_string().to_lowercase());
        for a in &applied {
            push_tag(&mut tags, a.name);
        }
        if let Some(role) = classification.role {
            push_tag(&mut tags, role.as_str().to_lowercase());
        }
        push_tag(&mut tags, archetype.as_str().to_lowercase());

        let mut notes = vec![format!(
            "Classified as {} by the '{}' rule (confidence {:.2}).",
            archetype, classification.rule, classification.confidence
        )];
        if !applied.is_empty() {
            let names: Vec<&str> = applied.iter().map(|a| a.name).collect();
            notes.push(format!("Specializations applied: {}.", names.join(", ")));
        }
        if bonus > 0 && archetype != Archetype::Minion {
            notes.push(format!("Stress includes +{} from specializations.", bonus));
        }
        if substituted_strike {
            notes.push("Source had no attacks; a generic Strike was substituted.".to_string());
        }

        let seed = options
            .seed
            .unwrap_or_else(|| narrative::seed_from_name(&monster.name));
        let mut narrative = narrative::generate(monster, &classification, tier, seed);
        if options.include_design_notes {
            narrative.design_notes = Some(format!(
                "Converted from CR {} ({} HP, AC {}). Tier {} {} at {} difficulty.",
                monster.challenge_rating,
                monster.hit_points.average,
                monster.armor_class,
                tier,
                archetype,
                stats.difficulty
            ));
        }

        debug!(
            features = features.len(),
            attacks = additional_attacks.len() + 1,
            stress,
            "assembled {}",
            monster.name
        );

        Adversary {
            name: monster.name.clone(),
            tier,
            archetype,
            role: classification.role,
            difficulty: stats.difficulty,
            evasion: stats.evasion,
            thresholds: stats.thresholds,
            hp: stats.hp,
            stress,
            attack,
            additional_attacks,
            movement: movement(monster),
            features,
            relentless,
            horde,
            narrative,
            tags,
            provenance: Provenance {
                source_system: SOURCE_SYSTEM.to_string(),
                source_cr: monster.challenge_rating.to_string(),
                notes,
            },
        }
    }
}

/// Reference tables, classifier rules and specialization converters,
/// configured once and reused across conversions.
pub struct Pipeline {
    pub refs: TierReference,
    pub classifier: Classifier,
    pub specializations: Vec<Box<dyn Specialization>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            refs: TierReference::standard(),
            classifier: Classifier::default(),
            specializations: special::builtin(),
        }
    }
}

impl Pipeline {
    pub fn run(&self, monster: &Monster, options: &ConvertOptions) -> ConvertResult<Adversary> {
        let adversary = Classified::new(monster, &self.classifier)?
            .derive(&self.refs)
            .convert(&self.refs)
            .specialize(&self.specializations, &self.refs)
            .assemble(options, &self.refs);
        Ok(adversary)
    }
}

/// Convert with the built-in classifier rules and specializations.
pub fn convert(
    monster: &Monster,
    options: &ConvertOptions,
    refs: &TierReference,
) -> ConvertResult<Adversary> {
    let classifier = Classifier::default();
    let specializations = special::builtin();
    let adversary = Classified::new(monster, &classifier)?
        .derive(refs)
        .convert(refs)
        .specialize(&specializations, refs)
        .assemble(options, refs);
    Ok(adversary)
}
