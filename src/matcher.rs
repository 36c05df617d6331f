//! Name matching used everywhere two ingredient names are compared.
//!
//! The relation is deliberately crude: lower-case both sides and test
//! substring containment in either direction. "pea" matches "peanut" and
//! that is part of the contract, since pantry combination and recipe
//! feasibility both depend on it. The relation is symmetric and reflexive
//! but NOT transitive ("egg" ~ "eggplant" ~ "plant", yet "egg" does not
//! match "plant"), so callers must not chain it.

/// Ingredient names commonly typed into the add form, used for
/// entry suggestions.
pub const COMMON_INGREDIENTS: &[&str] = &[
    "milk", "pasta", "rice", "flour", "sugar", "salt", "pepper", "butter",
    "eggs", "cheese", "bread", "chicken", "beef", "pork", "fish",
    "vegetables", "fruits", "oil", "vinegar", "honey", "yogurt", "cream",
    "sauce", "spices", "herbs",
];

/// Bidirectional case-insensitive substring containment.
pub fn matches(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Suggest vocabulary entries related to a partially typed name.
///
/// Inputs shorter than two characters produce no suggestions; the entry
/// form calls this on every keystroke and one letter matches everything.
pub fn suggest<'a>(partial: &str, vocabulary: &[&'a str]) -> Vec<&'a str> {
    if partial.chars().count() < 2 {
        return Vec::new();
    }
    vocabulary
        .iter()
        .filter(|candidate| matches(candidate, partial))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_symmetric() {
        let pairs = [
            ("egg", "eggplant"),
            ("Milk", "milk"),
            ("pea", "peanut"),
            ("milk", "chocolate"),
            ("", "anything"),
        ];
        for (a, b) in pairs {
            assert_eq!(matches(a, b), matches(b, a), "asymmetry for {a:?}/{b:?}");
        }
    }

    #[test]
    fn test_matches_is_reflexive() {
        for name in ["egg", "Chicken Breast", "", "1% milk"] {
            assert!(matches(name, name));
        }
    }

    #[test]
    fn test_matches_containment_cases() {
        assert!(matches("egg", "eggplant"));
        assert!(matches("eggplant", "egg"));
        assert!(matches("MILK", "milk"));
        assert!(!matches("milk", "chocolate"));
    }

    #[test]
    fn test_matches_is_not_transitive() {
        assert!(matches("egg", "eggplant"));
        assert!(matches("eggplant", "plant"));
        assert!(!matches("egg", "plant"));
    }

    #[test]
    fn test_suggest_requires_two_characters() {
        assert!(suggest("m", COMMON_INGREDIENTS).is_empty());
        assert!(suggest("", COMMON_INGREDIENTS).is_empty());
        assert!(suggest("mi", COMMON_INGREDIENTS).contains(&"milk"));
    }

    #[test]
    fn test_suggest_matches_both_directions() {
        // "buttermilk" is longer than the vocabulary entries it relates to.
        let hits = suggest("buttermilk", COMMON_INGREDIENTS);
        assert!(hits.contains(&"butter"));
        assert!(hits.contains(&"milk"));
        assert!(!hits.contains(&"rice"));
    }
}
