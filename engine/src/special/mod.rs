//! Specialization converters.
//!
//! Each converter is gated by its own detector and sees only the source
//! monster plus the outputs of the stages before it, never another
//! converter's output. Several may apply to one monster.

pub mod construct;
pub mod dragon;
pub mod legendary;
pub mod spellcaster;
pub mod undead;

use tracing::debug;

use crate::adversary::{Attack, Classification, Feature, Tier};
use crate::monster::Monster;
use crate::tables::TierReference;

pub use construct::ConstructOoze;
pub use dragon::Dragon;
pub use legendary::MultiattackLegendary;
pub use spellcaster::Spellcaster;
pub use undead::Undead;

/// Everything a converter may read.
#[derive(Debug, Clone, Copy)]
pub struct SpecializationContext<'a> {
    pub monster: &'a Monster,
    pub tier: Tier,
    pub classification: &'a Classification,
    /// Attacks from the base attack conversion.
    pub attacks: &'a [Attack],
    pub refs: &'a TierReference,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecializationOutput {
    pub features: Vec<Feature>,
    pub bonus_stress: u32,
    /// Replacement attack list, when the converter improves on the base one.
    pub attacks: Option<Vec<Attack>>,
}

pub trait Specialization: Send + Sync {
    /// Stable identifier, also used as a tag on the adversary.
    fn name(&self) -> &'static str;

    fn detect(&self, monster: &Monster) -> bool;

    fn convert(&self, ctx: &SpecializationContext<'_>) -> SpecializationOutput;
}

/// A converter that fired, with its output.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub name: &'static str,
    pub output: SpecializationOutput,
}

/// Built-in converters in application order.
pub fn builtin() -> Vec<Box<dyn Specialization>> {
    vec![
        Box::new(MultiattackLegendary),
        Box::new(Spellcaster),
        Box::new(Undead),
        Box::new(ConstructOoze),
        Box::new(Dragon),
    ]
}

/// Run every converter whose detector fires.
pub fn apply_all(
    converters: &[Box<dyn Specialization>],
    ctx: &SpecializationContext<'_>,
) -> Vec<Applied> {
    converters
        .iter()
        .filter(|c| c.detect(ctx.monster))
        .map(|c| {
            let output = c.convert(ctx);
            debug!(
                specialization = c.name(),
                features = output.features.len(),
                bonus_stress = output.bonus_stress,
                "applied specialization to {}",
                ctx.monster.name
            );
            Applied {
                name: c.name(),
                output,
            }
        })
        .collect()
}
