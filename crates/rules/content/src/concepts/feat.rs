//! Feats.

/// Category of a feat.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "title_case")]
pub enum FeatType {
    #[default]
    General,
    ItemCreation,
    Metamagic,
}

/// A feat a character can select.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Feat {
    pub name: String,
    pub feat_type: FeatType,
    /// Selectable as a fighter bonus feat.
    pub fighter_feat: bool,
}

impl Feat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feat_type: FeatType::General,
            fighter_feat: false,
        }
    }

    #[must_use]
    pub fn of_type(mut self, feat_type: FeatType) -> Self {
        self.feat_type = feat_type;
        self
    }

    #[must_use]
    pub fn fighter_bonus(mut self) -> Self {
        self.fighter_feat = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feats_default_to_general() {
        let alertness = Feat::new("Alertness");
        assert_eq!(alertness.feat_type, FeatType::General);
        assert!(!alertness.fighter_feat);

        let power_attack = Feat::new("Power Attack").fighter_bonus();
        assert!(power_attack.fighter_feat);
    }

    #[test]
    fn feat_types_render_in_title_case() {
        assert_eq!(FeatType::ItemCreation.to_string(), "Item Creation");
        assert_eq!("Metamagic".parse::<FeatType>(), Ok(FeatType::Metamagic));
    }
}
