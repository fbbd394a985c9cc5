//! Definitions from the System Reference Document.
//!
//! Copyable definitions are constants; anything owning strings or vectors
//! is built by a function on each call.

use std::sync::Arc;

use rules_core::{
    Condition, Die, Modifier, ModifierTotal, ModifierType, Progression, Reference, RulesConfig,
    Value,
};
use strum::IntoEnumIterator;

use crate::concepts::{
    Ability, AbilityKind, AbilityType, Class, ClassFeature, Feat, Race, Size, Skill, SkillFlags,
    Synergy,
};

// ===== dice =====
pub const D3: Die = Die::new(3);
pub const D4: Die = Die::new(4);
pub const D6: Die = Die::new(6);
pub const D8: Die = Die::new(8);
pub const D10: Die = Die::new(10);
pub const D12: Die = Die::new(12);
pub const D20: Die = Die::new(20);

// ===== modifier types =====
pub const UNTYPED: ModifierType = ModifierType::UNTYPED;
pub const ABILITY: ModifierType = ModifierType::from_static("ability", false);
pub const ALCHEMICAL: ModifierType = ModifierType::from_static("alchemical", false);
pub const ARMOR: ModifierType = ModifierType::from_static("armor", false);
pub const CIRCUMSTANCE: ModifierType = ModifierType::from_static("circumstance", false);
pub const COMPETENCE: ModifierType = ModifierType::from_static("competence", false);
pub const DEFLECTION: ModifierType = ModifierType::from_static("deflection", false);
pub const DODGE: ModifierType = ModifierType::from_static("dodge", true);
pub const ENHANCEMENT: ModifierType = ModifierType::from_static("enhancement", false);
pub const INSIGHT: ModifierType = ModifierType::from_static("insight", false);
pub const LUCK: ModifierType = ModifierType::from_static("luck", false);
pub const MORALE: ModifierType = ModifierType::from_static("morale", false);
pub const NATURAL_ARMOR: ModifierType = ModifierType::from_static("natural armor", false);
pub const PROFANE: ModifierType = ModifierType::from_static("profane", false);
pub const RACIAL: ModifierType = ModifierType::from_static("racial", false);
pub const RESISTANCE: ModifierType = ModifierType::from_static("resistance", false);
pub const SACRED: ModifierType = ModifierType::from_static("sacred", false);
pub const SHIELD: ModifierType = ModifierType::from_static("shield", false);
pub const SIZE: ModifierType = Size::MODIFIER_TYPE;
/// Stacks so that base saves from several classes add up.
pub const BASE_SAVE: ModifierType = ModifierType::from_static("base save", true);
/// Stacks so that base attack bonuses from several classes add up.
pub const BASE_ATTACK: ModifierType = ModifierType::from_static("base attack", true);

/// Every SRD modifier type, untyped first.
pub fn modifier_types() -> Vec<ModifierType> {
    vec![
        UNTYPED,
        ABILITY,
        ALCHEMICAL,
        ARMOR,
        CIRCUMSTANCE,
        COMPETENCE,
        DEFLECTION,
        DODGE,
        ENHANCEMENT,
        INSIGHT,
        LUCK,
        MORALE,
        NATURAL_ARMOR,
        PROFANE,
        RACIAL,
        RESISTANCE,
        SACRED,
        SHIELD,
        SIZE,
        BASE_SAVE,
        BASE_ATTACK,
    ]
}

// ===== progressions =====
pub fn good_base_save() -> Progression {
    Progression::new(
        BASE_SAVE,
        [2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12],
    )
}

pub fn poor_base_save() -> Progression {
    Progression::new(
        BASE_SAVE,
        [0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6],
    )
}

pub fn good_base_attack() -> Progression {
    Progression::new(BASE_ATTACK, 1..=20)
}

pub fn average_base_attack() -> Progression {
    Progression::new(
        BASE_ATTACK,
        [0, 1, 2, 3, 3, 4, 5, 6, 6, 7, 8, 9, 9, 10, 11, 12, 12, 13, 14, 15],
    )
}

pub fn poor_base_attack() -> Progression {
    Progression::new(
        BASE_ATTACK,
        [0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10],
    )
}

// ===== sizes =====
pub const FINE: Size = Size::from_static("Fine", -8);
pub const DIMINUTIVE: Size = Size::from_static("Diminutive", -4);
pub const TINY: Size = Size::from_static("Tiny", -2);
pub const SMALL: Size = Size::from_static("Small", -1);
pub const MEDIUM: Size = Size::from_static("Medium", 0);
pub const LARGE: Size = Size::from_static("Large", 1);
pub const HUGE: Size = Size::from_static("Huge", 2);
pub const GARGANTUAN: Size = Size::from_static("Gargantuan", 4);
pub const COLOSSAL: Size = Size::from_static("Colossal", 8);

/// The nine size categories, smallest first.
pub const SIZES: [Size; 9] = [
    FINE, DIMINUTIVE, TINY, SMALL, MEDIUM, LARGE, HUGE, GARGANTUAN, COLOSSAL,
];

// ===== ability references =====
/// References to the six ability modifiers, in STR ... CHA order.
pub fn ability_references(config: &RulesConfig) -> Vec<Reference> {
    AbilityKind::iter().map(|kind| kind.reference(config)).collect()
}

// ===== abilities =====
pub fn darkvision() -> Ability {
    Ability::new("Darkvision", Some(AbilityType::EXTRAORDINARY))
        .with_feature("darkvision", 60)
}

pub fn low_light_vision() -> Ability {
    Ability::new("Low-Light Vision", Some(AbilityType::EXTRAORDINARY))
}

pub fn stonecunning() -> Ability {
    Ability::new("Stonecunning", Some(AbilityType::EXTRAORDINARY)).with_feature(
        "search",
        Modifier::new(2, RACIAL).with_condition("to notice unusual stonework"),
    )
}

pub fn stability() -> Ability {
    Ability::new("Stability", Some(AbilityType::EXTRAORDINARY)).with_feature(
        "STR",
        Modifier::new(4, UNTYPED)
            .with_condition("to resist being bull rushed or tripped when standing on the ground"),
    )
}

pub fn fast_movement() -> Ability {
    Ability::new("Fast Movement", Some(AbilityType::EXTRAORDINARY)).with_feature("speed", 10)
}

pub fn illiteracy() -> Ability {
    Ability::new("Illiteracy", None)
}

/// Rage usable `per_day` times.
pub fn rage(per_day: i32) -> Ability {
    Ability::new("Rage", Some(AbilityType::EXTRAORDINARY)).with_feature("rages_per_day", per_day)
}

// ===== skills =====
pub fn appraise() -> Skill {
    Skill::new("Appraise", AbilityKind::Int)
}

pub fn balance() -> Skill {
    Skill::new("Balance", AbilityKind::Dex).with_flags(SkillFlags::ARMOR_CHECK_PENALTY)
}

pub fn bluff() -> Skill {
    Skill::new("Bluff", AbilityKind::Cha)
        .with_synergy(Synergy::new("diplomacy"))
        .with_synergy(Synergy::new("intimidate"))
        .with_synergy(Synergy::new("sleight_of_hand"))
}

pub fn climb() -> Skill {
    Skill::new("Climb", AbilityKind::Str).with_flags(SkillFlags::ARMOR_CHECK_PENALTY)
}

pub fn concentration() -> Skill {
    Skill::new("Concentration", AbilityKind::Con)
}

pub fn craft_alchemy() -> Skill {
    Skill::new("Craft (alchemy)", AbilityKind::Int)
        .with_synergy(Synergy::new("appraise").with_condition("on checks related to alchemy"))
}

pub fn diplomacy() -> Skill {
    Skill::new("Diplomacy", AbilityKind::Cha)
}

pub fn intimidate() -> Skill {
    Skill::new("Intimidate", AbilityKind::Cha)
}

pub fn knowledge_arcana() -> Skill {
    Skill::new("Knowledge (arcana)", AbilityKind::Int)
        .with_flags(SkillFlags::TRAINED_ONLY)
        .with_synergy(Synergy::new("spellcraft"))
}

pub fn listen() -> Skill {
    Skill::new("Listen", AbilityKind::Wis)
}

pub fn search() -> Skill {
    Skill::new("Search", AbilityKind::Int)
}

pub fn sleight_of_hand() -> Skill {
    Skill::new("Sleight of Hand", AbilityKind::Dex)
        .with_flags(SkillFlags::TRAINED_ONLY | SkillFlags::ARMOR_CHECK_PENALTY)
}

pub fn spellcraft() -> Skill {
    Skill::new("Spellcraft", AbilityKind::Int).with_flags(SkillFlags::TRAINED_ONLY)
}

pub fn spot() -> Skill {
    Skill::new("Spot", AbilityKind::Wis)
}

// ===== feats =====
pub fn alertness() -> Feat {
    Feat::new("Alertness")
}

// ===== races =====
pub fn human() -> Race {
    Race::new("Human", MEDIUM, 30).with_languages(["Common"])
}

pub fn dwarf() -> Race {
    let racial = |value, condition: &str| Modifier::new(value, RACIAL).with_condition(condition);

    Race::new("Dwarf", MEDIUM, 20)
        .with_adjustment(AbilityKind::Con, 2)
        .with_adjustment(AbilityKind::Cha, -2)
        .with_trait("darkvision", Value::node(darkvision()))
        .with_trait("stonecunning", Value::node(stonecunning()))
        .with_trait("stability", Value::node(stability()))
        .with_trait(
            "saving_throws",
            ModifierTotal::from_modifiers([
                racial(2, "against poison"),
                racial(2, "against spells and spell-like effects"),
            ]),
        )
        .with_trait(
            "attack",
            ModifierTotal::from(racial(1, "against orcs and goblinoids")),
        )
        .with_trait(
            "armor_class",
            ModifierTotal::from(
                Modifier::new(4, DODGE).with_condition("against monsters of the giant type"),
            ),
        )
        .with_trait("appraise", racial(2, "related to stone or metal items"))
        .with_trait("craft", racial(2, "related to stone or metal"))
        .with_languages(["Common", "Dwarven"])
        .with_bonus_languages(["Giant", "Gnome", "Goblin", "Orc", "Terran", "Undercommon"])
        .with_favored_class("Fighter")
}

pub fn elf() -> Race {
    let enchantment = Condition::new("against enchantment spells or effects");
    let save = Modifier::new(2, RACIAL).with_condition(enchantment);

    Race::new("Elf", MEDIUM, 30)
        .with_adjustment(AbilityKind::Dex, 2)
        .with_adjustment(AbilityKind::Con, -2)
        .with_trait("low_light_vision", Value::node(low_light_vision()))
        .with_trait("fortitude", save.clone())
        .with_trait("reflex", save.clone())
        .with_trait("will", save)
        .with_trait("listen", Modifier::new(2, RACIAL))
        .with_trait("search", Modifier::new(2, RACIAL))
        .with_trait("spot", Modifier::new(2, RACIAL))
        .with_languages(["Common", "Elven"])
        .with_bonus_languages(["Draconic", "Gnoll", "Gnome", "Goblin", "Orc", "Sylvan"])
        .with_favored_class("Wizard")
}

// ===== classes =====
pub fn barbarian() -> Class {
    let rage_feature = [(1, 1), (4, 2), (8, 3), (12, 4), (16, 5), (20, 6)]
        .into_iter()
        .fold(
            ClassFeature::new("Rage")
                .with_description("Temporary bonus to Strength, Constitution and Will saves"),
            |feature, (level, per_day)| feature.with_level(level, rage(per_day)),
        );

    Class {
        name: "Barbarian".into(),
        hit_die: D12,
        skill_points_per_level: 4,
        class_skills: [
            "climb",
            "craft",
            "handle_animal",
            "intimidate",
            "jump",
            "listen",
            "ride",
            "survival",
            "swim",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        base_attack_bonus: good_base_attack(),
        fort_save: good_base_save(),
        ref_save: poor_base_save(),
        will_save: poor_base_save(),
        features: vec![
            ClassFeature::new("Fast Movement").with_level(1, fast_movement()),
            ClassFeature::new("Illiteracy").with_level(1, illiteracy()),
            rage_feature,
        ],
    }
}

/// Shared handle for adding barbarian levels to characters.
pub fn barbarian_class() -> Arc<Class> {
    Arc::new(barbarian())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules_core::{Composable, Value};

    #[test]
    fn progressions_cover_twenty_levels() {
        for progression in [
            good_base_save(),
            poor_base_save(),
            good_base_attack(),
            average_base_attack(),
            poor_base_attack(),
        ] {
            assert_eq!(progression.len(), 20);
        }
        assert_eq!(good_base_save().at_level(1), Some(Modifier::new(2, BASE_SAVE)));
        assert_eq!(average_base_attack().at_level(20), Some(Modifier::new(15, BASE_ATTACK)));
        assert_eq!(good_base_attack().at_level(21), None);
    }

    #[test]
    fn only_untyped_dodge_and_base_types_stack() {
        let stacking: Vec<String> = modifier_types()
            .into_iter()
            .filter(ModifierType::stacks)
            .map(|t| t.name().to_owned())
            .collect();
        assert_eq!(stacking, ["untyped", "dodge", "base save", "base attack"]);
        assert_eq!(modifier_types().len(), 21);
    }

    #[test]
    fn sizes_are_ordered_smallest_first() {
        assert!(SIZES.windows(2).all(|pair| pair[0].value() < pair[1].value()));
        assert_eq!(SMALL.armor_class(), Modifier::new(1, SIZE));
        assert_eq!(LARGE.grapple(), Modifier::new(4, SIZE));
    }

    #[test]
    fn ability_references_target_the_character() {
        let references = ability_references(&RulesConfig::default());
        assert_eq!(references[0].name(), "STR");
        assert_eq!(references[5].to_string(), "CHA of Character");
    }

    #[test]
    fn dwarf_traits() {
        let dwarf = dwarf();
        assert_eq!(dwarf.get("speed").unwrap(), 20);
        assert_eq!(dwarf.get("constitution").unwrap(), 2);
        assert_eq!(dwarf.favored_class(), "Fighter");
        assert_eq!(dwarf.bonus_languages().len(), 6);

        let Value::Total(poison) = dwarf.get("fortitude").unwrap() else {
            panic!("expected a total");
        };
        assert_eq!(poison.value(&[]), 0);
        assert_eq!(poison.value(&[Condition::new("against poison")]), 2);

        let Value::Total(armor_class) = dwarf.get("armor_class").unwrap() else {
            panic!("expected a total");
        };
        assert_eq!(armor_class.len(), 2);
        assert_eq!(armor_class.value_with_all_conditions(), 4);
    }

    #[test]
    fn elf_saves_are_conditional() {
        let elf = elf();
        let Value::Modifier(will) = elf.get("will").unwrap() else {
            panic!("expected a modifier");
        };
        assert_eq!(will.value(), 2);
        assert!(will.condition().is_some());
        assert_eq!(elf.get("search").unwrap(), 2);
        assert_eq!(elf.languages(), ["Common", "Elven"]);
    }

    #[test]
    fn barbarian_rages_more_often_with_levels() {
        let barbarian = barbarian();
        assert_eq!(barbarian.hit_die, D12);
        assert!(barbarian.is_class_skill("intimidate"));

        let rage = barbarian.features.iter().find(|f| f.name() == "Rage").unwrap();
        assert_eq!(rage.at_level(3).unwrap().feature("rages_per_day"), Some(&Value::from(1)));
        assert_eq!(rage.at_level(11).unwrap().feature("rages_per_day"), Some(&Value::from(3)));
        assert_eq!(rage.at_level(20).unwrap().feature("rages_per_day"), Some(&Value::from(6)));
    }

    #[test]
    fn skills_carry_synergies_and_flags() {
        assert_eq!(bluff().synergies().len(), 3);
        assert!(knowledge_arcana().trained_only());
        assert!(climb().armor_check_penalty());
        assert_eq!(craft_alchemy().key(), "craft_alchemy");
        assert_eq!(alertness().name, "Alertness");
    }
}
