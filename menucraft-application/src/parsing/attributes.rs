// Icon attribute schema
// Every key an icon section may carry, as a closed set checked exhaustively
// at parse time. A key outside this set is a collected error, not a silent
// no-op.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeName {
    PositionX,
    PositionY,
    Material,
    Amount,
    Durability,
    Data,
    Name,
    Lore,
    Enchantments,
    Color,
    SkullOwner,
    BannerColor,
    BannerPatterns,
    Placeholders,
    Blank,
    Actions,
}

impl AttributeName {
    pub fn from_key(key: &str) -> Option<Self> {
        let attribute = match key {
            "position-x" => AttributeName::PositionX,
            "position-y" => AttributeName::PositionY,
            "material" => AttributeName::Material,
            "amount" => AttributeName::Amount,
            "durability" => AttributeName::Durability,
            "data" => AttributeName::Data,
            "name" => AttributeName::Name,
            "lore" => AttributeName::Lore,
            "enchantments" => AttributeName::Enchantments,
            "color" => AttributeName::Color,
            "skull-owner" => AttributeName::SkullOwner,
            "banner-color" => AttributeName::BannerColor,
            "banner-patterns" => AttributeName::BannerPatterns,
            "placeholders" => AttributeName::Placeholders,
            "blank" => AttributeName::Blank,
            "actions" => AttributeName::Actions,
            _ => return None,
        };
        Some(attribute)
    }

    pub const fn key(self) -> &'static str {
        match self {
            AttributeName::PositionX => "position-x",
            AttributeName::PositionY => "position-y",
            AttributeName::Material => "material",
            AttributeName::Amount => "amount",
            AttributeName::Durability => "durability",
            AttributeName::Data => "data",
            AttributeName::Name => "name",
            AttributeName::Lore => "lore",
            AttributeName::Enchantments => "enchantments",
            AttributeName::Color => "color",
            AttributeName::SkullOwner => "skull-owner",
            AttributeName::BannerColor => "banner-color",
            AttributeName::BannerPatterns => "banner-patterns",
            AttributeName::Placeholders => "placeholders",
            AttributeName::Blank => "blank",
            AttributeName::Actions => "actions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_attribute_round_trips_through_its_key() {
        for attribute in [
            AttributeName::PositionX,
            AttributeName::PositionY,
            AttributeName::Material,
            AttributeName::Amount,
            AttributeName::Durability,
            AttributeName::Data,
            AttributeName::Name,
            AttributeName::Lore,
            AttributeName::Enchantments,
            AttributeName::Color,
            AttributeName::SkullOwner,
            AttributeName::BannerColor,
            AttributeName::BannerPatterns,
            AttributeName::Placeholders,
            AttributeName::Blank,
            AttributeName::Actions,
        ] {
            assert_eq!(AttributeName::from_key(attribute.key()), Some(attribute));
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(AttributeName::from_key("sparkles"), None);
        assert_eq!(AttributeName::from_key("NAME"), None);
    }
}
