use std::collections::HashMap;

pub fn builtin_monsters() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("goblin", include_str!("../content/monsters/goblin.json")),
        ("wolf", include_str!("../content/monsters/wolf.json")),
        ("dire_wolf", include_str!("../content/monsters/dire_wolf.json")),
        ("ogre", include_str!("../content/monsters/ogre.json")),
        ("zombie", include_str!("../content/monsters/zombie.json")),
        ("mage", include_str!("../content/monsters/mage.json")),
        (
            "black_pudding",
            include_str!("../content/monsters/black_pudding.json"),
        ),
        (
            "young_white_dragon",
            include_str!("../content/monsters/young_white_dragon.json"),
        ),
        (
            "adult_red_dragon",
            include_str!("../content/monsters/adult_red_dragon.json"),
        ),
        (
            "iron_golem",
            include_str!("../content/monsters/iron_golem.json"),
        ),
    ])
}

/// Built-in monster keys in sorted order.
pub fn builtin_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = builtin_monsters().into_keys().collect();
    names.sort_unstable();
    names
}
