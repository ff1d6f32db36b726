#![allow(dead_code)]

use dh_engine::api::builtin_monster;
use dh_engine::{Adversary, ConvertOptions, Monster, Pipeline};
use serde_json::json;

pub fn builtin(id: &str) -> Monster {
    builtin_monster(id).unwrap()
}

pub fn convert_builtin(id: &str) -> Adversary {
    let options = ConvertOptions::default().with_seed(7);
    Pipeline::default().run(&builtin(id), &options).unwrap()
}

/// A plain medium humanoid with a single sword attack.
pub fn bare_monster(name: &str, cr: f64, hp: i32) -> Monster {
    serde_json::from_value(json!({
        "name": name,
        "size": "medium",
        "creature_type": "humanoid",
        "armor_class": 14,
        "hit_points": { "average": hp },
        "abilities": { "str": 12, "dex": 12, "con": 12, "int": 10, "wis": 10, "cha": 10 },
        "challenge_rating": cr,
        "actions": [
            {
                "name": "Longsword",
                "description": "Melee Weapon Attack: +4 to hit, reach 5 ft., one target.",
                "attack": {
                    "kind": "melee_weapon",
                    "to_hit": 4,
                    "damage": { "count": 1, "sides": 8, "modifier": 2, "damage_type": "slashing" }
                }
            }
        ]
    }))
    .unwrap()
}
