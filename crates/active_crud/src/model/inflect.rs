//! English inflection for table names and error labels.
//!
//! # Invariants
//! - `table_name_for(name) == pluralize(&name.to_lowercase())`.
//! - Uncountable words are returned unchanged by `pluralize`.
//! - Rules are tried in order; the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

static PLURAL_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)(quiz)$", "${1}zes"),
        (r"(?i)^(oxen)$", "${1}"),
        (r"(?i)^(ox)$", "${1}en"),
        (r"(?i)^(m|l)ice$", "${1}ice"),
        (r"(?i)^(m|l)ouse$", "${1}ice"),
        (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(?i)sis$", "ses"),
        (r"(?i)([ti])a$", "${1}a"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)(buffal|tomat)o$", "${1}oes"),
        (r"(?i)(bu)s$", "${1}ses"),
        (r"(?i)(alias|status)$", "${1}es"),
        (r"(?i)(octop|vir)i$", "${1}i"),
        (r"(?i)(octop|vir)us$", "${1}i"),
        (r"(?i)^(ax|test)is$", "${1}es"),
        (r"(?i)s$", "s"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid plural rule"), replacement))
    .collect()
});

/// Table name for a model name: `Article` -> `articles`, `Person` -> `people`.
pub fn table_name_for(model_name: &str) -> String {
    pluralize(&model_name.to_lowercase())
}

/// Returns the plural form of `word`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return word.to_string();
    }

    if let Some(plural) = apply_irregular(word) {
        return plural;
    }

    for (rule, replacement) in PLURAL_RULES.iter() {
        if rule.is_match(word) {
            return rule.replace(word, *replacement).into_owned();
        }
    }

    format!("{word}s")
}

/// `first_name` -> `First name`, `author_id` -> `Author`.
pub fn humanize(attribute: &str) -> String {
    let trimmed = attribute.strip_suffix("_id").unwrap_or(attribute);
    let spaced = trimmed.replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_uncountable(word: &str) -> bool {
    let lowered = word.to_lowercase();
    UNCOUNTABLE.iter().any(|uncountable| {
        lowered
            .strip_suffix(uncountable)
            .is_some_and(|prefix| prefix.is_empty() || !prefix.ends_with(char::is_alphanumeric))
    })
}

fn apply_irregular(word: &str) -> Option<String> {
    let lowered = word.to_lowercase();
    for (singular, plural) in IRREGULAR {
        let Some(prefix) = lowered.strip_suffix(singular) else {
            continue;
        };
        // Whole words only for short irregulars so `human` stays `humans`.
        if singular.len() <= 3 && !prefix.is_empty() {
            continue;
        }
        let head = word.get(..prefix.len())?;
        let first = word.get(prefix.len()..)?.chars().next()?;
        let mut rest = plural.chars();
        rest.next();
        return Some(format!("{head}{first}{}", rest.as_str()));
    }
    None
}
