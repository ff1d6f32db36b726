use dh_engine::{tier_for_cr, ChallengeRating, ConvertError, Tier};

#[test]
fn documented_boundaries() {
    let cases = [
        (2.0, 1),
        (3.0, 2),
        (6.0, 2),
        (7.0, 3),
        (13.0, 3),
        (14.0, 4),
        (30.0, 4),
    ];
    for (cr, tier) in cases {
        assert_eq!(tier_for_cr(cr).unwrap().get(), tier, "cr {}", cr);
    }
}

#[test]
fn fractional_strings_parse_to_tier_one() {
    for text in ["1/8", "1/4", "1/2"] {
        let cr = ChallengeRating::parse(text).unwrap();
        assert_eq!(tier_for_cr(cr.value()).unwrap(), Tier::ONE);
    }
    assert_eq!(ChallengeRating::parse("1/4").unwrap().value(), 0.25);
}

#[test]
fn negative_cr_is_a_domain_error() {
    let err = tier_for_cr(-1.0).unwrap_err();
    assert!(matches!(err, ConvertError::Domain(_)));
    assert!(ChallengeRating::new(-0.5).is_err());
}

#[test]
fn tier_outside_range_is_rejected() {
    assert!(Tier::new(0).is_err());
    assert!(Tier::new(5).is_err());
    assert_eq!(Tier::new(3).unwrap(), Tier::THREE);
}

#[test]
fn cr_displays_and_reports_xp() {
    let cr = ChallengeRating::parse("1/4").unwrap();
    assert_eq!(cr.to_string(), "1/4");
    assert_eq!(cr.xp(), 50);
    assert_eq!(ChallengeRating::new(17.0).unwrap().xp(), 18_000);
}
