//! Cleanup and validation of model-produced text.

/// Seasonings a creative name may only mention when the user picked them.
pub const DISALLOWED_SEASONINGS: &[&str] = &[
    "star anise",
    "sichuan pepper",
    "chili",
    "ginger slices",
    "scallion sections",
    "garlic",
];

/// Shortest and longest acceptable name, in name units.
pub const NAME_UNITS_MIN: usize = 2;
pub const NAME_UNITS_MAX: usize = 12;

const LABEL_PREFIXES: &[&str] = &["creative name:", "dish name:", "name:", "story:"];

const WRAPPING: &[char] = &[
    '"', '\'', '“', '”', '‘', '’', '「', '」', '《', '》', '*', '`', '.', '。', '!', '！',
];

fn is_cjk(c: char) -> bool {
    matches!(c as u32, 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF)
}

/// Length of a name: one unit per CJK character plus one per other word.
pub fn name_units(name: &str) -> usize {
    let cjk = name.chars().filter(|c| is_cjk(*c)).count();
    let words = name
        .split(|c: char| c.is_whitespace() || is_cjk(c))
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .count();
    cjk + words
}

/// First meaningful line of a reply, without label prefix or wrapping quotes.
pub fn clean_candidate(raw: &str) -> String {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");

    let mut text = line;
    let lower = text.to_lowercase();
    for prefix in LABEL_PREFIXES {
        if lower.starts_with(prefix) {
            text = text.get(prefix.len()..).unwrap_or(text);
            break;
        }
    }

    text.trim().trim_matches(|c| WRAPPING.contains(&c)).trim().to_string()
}

fn contains_soup_keyword(name: &str) -> bool {
    name.to_lowercase().contains("soup") || name.contains('汤')
}

/// Accept a model-proposed name or fall back to the canonical one.
pub fn validate_creative_name(candidate: &str, canonical: &str, selected: &[String]) -> String {
    let name = clean_candidate(candidate);
    if name.is_empty() {
        return canonical.to_string();
    }

    let lower_name = name.to_lowercase();
    let lower_canonical = canonical.to_lowercase();

    if contains_soup_keyword(canonical) && !contains_soup_keyword(&name) {
        tracing::warn!(candidate = %name, "Creative name lost the soup keyword, keeping original");
        return canonical.to_string();
    }

    let unselected_seasoning = DISALLOWED_SEASONINGS.iter().find(|seasoning| {
        lower_name.contains(*seasoning)
            && !selected
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(seasoning))
    });
    if let Some(seasoning) = unselected_seasoning {
        tracing::warn!(candidate = %name, seasoning, "Creative name adds an unselected seasoning");
        return canonical.to_string();
    }

    let units = name_units(&name);
    if !(NAME_UNITS_MIN..=NAME_UNITS_MAX).contains(&units) {
        tracing::warn!(candidate = %name, units, "Creative name length out of range");
        return canonical.to_string();
    }

    let connected = selected
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .take(3)
        .any(|s| lower_canonical.contains(&s) || lower_name.contains(&s));
    if !connected && units < 3 {
        tracing::warn!(candidate = %name, "Creative name unrelated to the dish");
        return canonical.to_string();
    }

    name
}

/// Trim a story reply down to its text.
pub fn clean_story(raw: &str) -> String {
    let text = raw.trim();
    let lower = text.to_lowercase();
    let text = LABEL_PREFIXES
        .iter()
        .find(|p| lower.starts_with(*p))
        .and_then(|p| text.get(p.len()..))
        .unwrap_or(text);

    text.trim()
        .trim_matches(|c| matches!(c, '"' | '“' | '”'))
        .trim()
        .to_string()
}
