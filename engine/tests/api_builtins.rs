use dh_engine::api::{self, ConvertRequest};
use dh_engine::balance::has_errors;
use dh_engine::content::{builtin_monsters, builtin_names};
use dh_engine::ConvertOptions;
use std::path::Path;

#[test]
fn every_builtin_converts_without_balance_errors() {
    for id in builtin_names() {
        let req = ConvertRequest {
            monster_id: Some(id.to_string()),
            ..Default::default()
        };
        let adv = api::convert(&req).unwrap();
        let findings = api::check(&adv);
        assert!(!has_errors(&findings), "{}: {:?}", id, findings);
    }
}

#[test]
fn builtin_ids_accept_spaces_and_dashes() {
    assert_eq!(api::builtin_monster("Adult Red Dragon").unwrap().name, "Adult Red Dragon");
    assert_eq!(api::builtin_monster("dire-wolf").unwrap().name, "Dire Wolf");
}

#[test]
fn unknown_builtin_lists_what_exists() {
    let err = api::builtin_monster("tarrasque").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("tarrasque"));
    assert!(msg.contains("goblin"));
}

#[test]
fn request_needs_a_monster() {
    assert!(api::convert(&ConvertRequest::default()).is_err());
}

#[test]
fn string_entry_points_validate_their_input() {
    let adv = api::convert_monster(
        &api::builtin_monster("ogre").unwrap(),
        &ConvertOptions::default(),
    )
    .unwrap();
    assert!(api::rescale_tier(&adv, 5).is_err());
    assert!(api::rescale_difficulty(&adv, "legendary").is_err());
    assert!(api::quick_adjust(&adv, "sturdier").is_err());
    assert_eq!(api::rescale_difficulty(&adv, "major").unwrap().difficulty.to_string(), "Major");
    assert_eq!(api::quick_adjust(&adv, "Tougher").unwrap().hp, 7);
}

#[test]
fn request_parses_from_json() {
    let req: ConvertRequest = serde_json::from_str(
        r#"{ "monster_id": "wolf", "options": { "seed": 3, "include_design_notes": false } }"#,
    )
    .unwrap();
    let adv = api::convert(&req).unwrap();
    assert!(adv.narrative.design_notes.is_none());
}

#[test]
fn request_loads_a_monster_file() {
    let dir = std::env::temp_dir().join("dh_engine_api_request");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("goblin.json");
    std::fs::write(&path, builtin_monsters()["goblin"]).unwrap();

    let req = ConvertRequest {
        monster_path: Some(path.display().to_string()),
        ..Default::default()
    };
    assert_eq!(api::convert(&req).unwrap().name, "Goblin");

    let missing = ConvertRequest {
        monster_path: Some(dir.join("nope.json").display().to_string()),
        ..Default::default()
    };
    let err = api::convert(&missing).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read monster"));
}

#[test]
fn file_text_syntax_follows_the_extension() {
    let yaml: ConvertOptions =
        api::parse_file_text("seed: 9\nformats: [compact]\n", Path::new("opts.yml"), "options")
            .unwrap();
    assert_eq!(yaml.seed, Some(9));

    let err = api::parse_file_text::<ConvertOptions>("seed: 9", Path::new("opts.json"), "options")
        .unwrap_err();
    assert!(err.to_string().contains("failed to parse options: opts.json"));
}
