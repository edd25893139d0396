//! Maps free text onto one of the storefront's product categories.
//!
//! Rules are checked in declaration order and the first hit wins, so
//! "hair and skin" resolves to Hair Care.

/// Category buttons offered at the start of every session.
pub const QUICK_OPTIONS: [&str; 3] = ["Hair Care", "Skin Care", "Oral Care"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub name: &'static str,
    /// Lower-case substrings that point at this category.
    pub keywords: &'static [&'static str],
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "Hair Care",
        keywords: &["hair", "shampoo", "oil", "mask", "keratin", "minoxidil", "booster"],
    },
    CategoryRule {
        name: "Skin Care",
        keywords: &[
            "skin",
            "face",
            "ubtan",
            "serum",
            "acne",
            "anti-aging",
            "anti aging",
            "gift pack",
            "noor jahan",
        ],
    },
    CategoryRule {
        name: "Oral Care",
        keywords: &["oral", "mouth", "teeth", "immune", "wow immune"],
    },
];

impl CategoryRule {
    fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|keyword| lower.contains(keyword))
            || lower.contains(&self.name.to_lowercase())
    }
}

pub fn resolve_category(free_text: &str) -> Option<&'static str> {
    let lower = free_text.to_lowercase();

    if let Some(rule) = CATEGORY_RULES.iter().find(|rule| rule.matches(&lower)) {
        return Some(rule.name);
    }

    QUICK_OPTIONS
        .iter()
        .copied()
        .find(|option| lower.contains(&option.to_lowercase()))
}

pub fn is_quick_option(label: &str) -> bool {
    QUICK_OPTIONS.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_options_resolve_to_themselves() {
        for option in QUICK_OPTIONS {
            assert_eq!(resolve_category(option), Some(option));
        }
    }

    #[test]
    fn hair_keywords_resolve_to_hair_care() {
        assert_eq!(resolve_category("my HAIR is thinning"), Some("Hair Care"));
        assert_eq!(resolve_category("need a good shampoo"), Some("Hair Care"));
        assert_eq!(resolve_category("minoxidil"), Some("Hair Care"));
    }

    #[test]
    fn first_declared_category_wins_on_overlap() {
        assert_eq!(resolve_category("hair and skin"), Some("Hair Care"));
        assert_eq!(resolve_category("face serum and hair oil"), Some("Hair Care"));
        assert_eq!(resolve_category("skin and teeth"), Some("Skin Care"));
    }

    #[test]
    fn skin_and_oral_keywords() {
        assert_eq!(resolve_category("something for acne"), Some("Skin Care"));
        assert_eq!(resolve_category("Noor Jahan pack"), Some("Skin Care"));
        assert_eq!(resolve_category("teeth whitening"), Some("Oral Care"));
        assert_eq!(resolve_category("bad breath, mouth wash?"), Some("Oral Care"));
    }

    #[test]
    fn unrelated_text_has_no_category() {
        assert_eq!(resolve_category("where is my order"), None);
        assert_eq!(resolve_category(""), None);
    }

    #[test]
    fn quick_option_check_is_exact() {
        assert!(is_quick_option("Skin Care"));
        assert!(!is_quick_option("skin care"));
        assert!(!is_quick_option("Skin"));
    }
}
