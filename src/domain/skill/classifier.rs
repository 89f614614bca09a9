//! Maps a GitHub language and its repository count to a skill.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::{SkillCategory, SkillDraft, SkillLevel};

static BACKEND_LANGUAGES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Python", "Java", "C++", "C#", "Go", "Rust", "PHP", "Ruby", "Scala", "Kotlin",
    ]
    .into_iter()
    .collect()
});

static FRONTEND_LANGUAGES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "JavaScript", "TypeScript", "HTML", "CSS", "Sass", "Less", "Vue", "React",
    ]
    .into_iter()
    .collect()
});

static MOBILE_LANGUAGES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["Swift", "Kotlin", "Dart", "Objective-C"].into_iter().collect());

/// Category for a language. Sets are checked backend, frontend, mobile in
/// that order, so Kotlin (backend and mobile) lands in backend.
pub fn category_for(language: &str) -> SkillCategory {
    if BACKEND_LANGUAGES.contains(language) {
        SkillCategory::Backend
    } else if FRONTEND_LANGUAGES.contains(language) {
        SkillCategory::Frontend
    } else if MOBILE_LANGUAGES.contains(language) {
        SkillCategory::Mobile
    } else {
        SkillCategory::Tools
    }
}

/// Level derived from how many repositories use the language.
pub fn level_for(count: u64) -> SkillLevel {
    let value = match count {
        c if c >= 5 => 5,
        c if c >= 3 => 4,
        2 => 3,
        _ => 2,
    };
    // 2..=5 is always in range.
    SkillLevel::new(value).unwrap_or_default()
}

/// `100 - count`; more frequent languages sort first.
pub fn display_order(count: u64) -> i32 {
    let count = i32::try_from(count).unwrap_or(i32::MAX - 100);
    100 - count
}

/// `(category, level)` for a language seen in `count` repositories.
pub fn classify(language: &str, count: u64) -> (SkillCategory, SkillLevel) {
    (category_for(language), level_for(count))
}

/// Full upsert payload for a language.
pub fn draft_for_language(language: &str, count: u64) -> SkillDraft {
    let (category, level) = classify(language, count);
    SkillDraft {
        name: language.to_string(),
        category,
        level,
        order: display_order(count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kotlin_resolves_to_backend() {
        let (category, level) = classify("Kotlin", 4);
        assert_eq!(category, SkillCategory::Backend);
        assert_eq!(level.value(), 4);
    }

    #[test]
    fn dart_is_mobile_with_floor_level() {
        let (category, level) = classify("Dart", 1);
        assert_eq!(category, SkillCategory::Mobile);
        assert_eq!(level.value(), 2);
    }

    #[test]
    fn frontend_and_unknown_languages() {
        assert_eq!(category_for("TypeScript"), SkillCategory::Frontend);
        assert_eq!(category_for("Vue"), SkillCategory::Frontend);
        assert_eq!(category_for("Shell"), SkillCategory::Tools);
        assert_eq!(category_for("Dockerfile"), SkillCategory::Tools);
    }

    #[test]
    fn membership_is_case_sensitive() {
        assert_eq!(category_for("python"), SkillCategory::Tools);
    }

    #[test]
    fn level_thresholds() {
        let levels: Vec<i32> = [0, 1, 2, 3, 4, 5, 12]
            .into_iter()
            .map(|c| level_for(c).value())
            .collect();
        assert_eq!(levels, vec![2, 2, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn display_order_is_hundred_minus_count() {
        assert_eq!(display_order(1), 99);
        assert_eq!(display_order(7), 93);
        assert_eq!(display_order(150), -50);
    }

    #[test]
    fn draft_carries_classification() {
        let draft = draft_for_language("Rust", 3);
        assert_eq!(draft.name, "Rust");
        assert_eq!(draft.category, SkillCategory::Backend);
        assert_eq!(draft.level.value(), 4);
        assert_eq!(draft.order, 97);
    }
}
