//! Built-in game data the index treats as always present.

/// Non-namespaced vanilla entity identifiers (as of 1.16)
pub const VANILLA_ENTITIES: &[&str] = &[
    "agent",
    "area_effect_cloud",
    "armor_stand",
    "arrow",
    "balloon",
    "bat",
    "bee",
    "blaze",
    "boat",
    "cat",
    "cave_spider",
    "chalkboard",
    "chest_minecart",
    "chicken",
    "cod",
    "command_block_minecart",
    "cow",
    "creeper",
    "dolphin",
    "donkey",
    "dragon_fireball",
    "drowned",
    "egg",
    "elder_guardian",
    "elder_guardian_ghost",
    "ender_crystal",
    "ender_dragon",
    "ender_pearl",
    "enderman",
    "endermite",
    "evocation_fang",
    "evocation_illager",
    "eye_of_ender_signal",
    "falling_block",
    "fireball",
    "fireworks_rocket",
    "fishing_hook",
    "fox",
    "ghast",
    "guardian",
    "hoglin",
    "hopper_minecart",
    "horse",
    "husk",
    "ice_bomb",
    "iron_golem",
    "item",
    "leash_knot",
    "lightning_bolt",
    "lingering_potion",
    "llama",
    "llama_spit",
    "magma_cube",
    "minecart",
    "mooshroom",
    "moving_block",
    "mule",
    "npc",
    "ocelot",
    "painting",
    "panda",
    "parrot",
    "phantom",
    "pig",
    "piglin",
    "piglin_brute",
    "pillager",
    "player",
    "polar_bear",
    "pufferfish",
    "rabbit",
    "ravager",
    "salmon",
    "sheep",
    "shield",
    "shulker",
    "shulker_bullet",
    "silverfish",
    "skeleton",
    "skeleton_horse",
    "slime",
    "small_fireball",
    "snow_golem",
    "snowball",
    "spider",
    "splash_potion",
    "squid",
    "stray",
    "strider",
    "thrown_trident",
    "tnt",
    "tnt_minecart",
    "tripod_camera",
    "tropicalfish",
    "turtle",
    "vex",
    "villager",
    "villager_v2",
    "vindicator",
    "wandering_trader",
    "witch",
    "wither",
    "wither_skeleton",
    "wither_skull",
    "wither_skull_dangerous",
    "wolf",
    "xp_bottle",
    "xp_orb",
    "zoglin",
    "zombie",
    "zombie_horse",
    "zombie_pigman",
    "zombie_villager",
    "zombie_villager_v2",
];

/// Whether `id` names a vanilla entity, with or without the `minecraft:` namespace
pub fn is_vanilla_entity(id: &str) -> bool {
    let id = id.strip_prefix("minecraft:").unwrap_or(id);
    VANILLA_ENTITIES.contains(&id)
}
