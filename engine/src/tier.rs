//! Challenge rating → tier.

use crate::adversary::Tier;
use crate::error::{ConvertError, ConvertResult};

/// Map a decimal challenge rating onto a tier.
///
/// Upper bounds are inclusive on the lower tier: CR 2 is Tier 1, CR 3 is
/// Tier 2, CR 6 is Tier 2, CR 13 is Tier 3 and CR 14 is Tier 4.
pub fn tier_for_cr(cr: f64) -> ConvertResult<Tier> {
    if !cr.is_finite() || cr < 0.0 {
        return Err(ConvertError::domain(format!(
            "challenge rating must be a non-negative number, got {}",
            cr
        )));
    }
    let tier = if cr <= 2.0 {
        Tier::ONE
    } else if cr <= 6.0 {
        Tier::TWO
    } else if cr <= 13.0 {
        Tier::THREE
    } else {
        Tier::FOUR
    };
    Ok(tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_crs_are_tier_one() {
        for cr in [0.0, 0.125, 0.25, 0.5] {
            assert_eq!(tier_for_cr(cr).unwrap(), Tier::ONE);
        }
    }

    #[test]
    fn nan_is_rejected() {
        assert!(tier_for_cr(f64::NAN).is_err());
    }
}
