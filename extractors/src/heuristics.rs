//! Text heuristics shared by every document format.

use once_cell::sync::Lazy;
use regex::Regex;
use shared_types::FieldType;

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]*\S[^()]*\)").unwrap());

static KEYWORD_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Data|Nome|Valor|Quantidade|Observação|Responsável)$").unwrap()
});

/// Keywords that select a field type when found anywhere in a label
#[derive(Debug)]
pub struct TypeRule {
    pub field_type: FieldType,
    pub keywords: &'static [&'static str],
}

/// Evaluated top to bottom, first match wins
pub const FIELD_TYPE_RULES: [TypeRule; 4] = [
    TypeRule {
        field_type: FieldType::Date,
        keywords: &["data"],
    },
    TypeRule {
        field_type: FieldType::Number,
        keywords: &["valor", "quantidade"],
    },
    TypeRule {
        field_type: FieldType::Textarea,
        keywords: &["observação", "descrição"],
    },
    TypeRule {
        field_type: FieldType::Boolean,
        keywords: &["sim/não", "aprovado"],
    },
];

/// Interactive PDF field names also carry checkbox hints
pub const FORM_FIELD_TYPE_RULES: [TypeRule; 5] = [
    TypeRule {
        field_type: FieldType::Date,
        keywords: &["data"],
    },
    TypeRule {
        field_type: FieldType::Number,
        keywords: &["valor", "quantidade"],
    },
    TypeRule {
        field_type: FieldType::Textarea,
        keywords: &["observação", "descrição"],
    },
    TypeRule {
        field_type: FieldType::Boolean,
        keywords: &["sim/não", "aprovado"],
    },
    TypeRule {
        field_type: FieldType::Checkbox,
        keywords: &["check", "sim_nao"],
    },
];

/// Does `text` look like the label of a form field?
pub fn is_label_candidate(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    text.ends_with(':')
        || text.ends_with('?')
        || PARENTHESIZED.is_match(text)
        || KEYWORD_SUFFIX.is_match(text)
}

/// First rule whose keyword occurs in `label`, if any
pub fn match_type_rule(rules: &[TypeRule], label: &str) -> Option<FieldType> {
    let label = label.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| label.contains(k)))
        .map(|rule| rule.field_type)
}

pub fn infer_field_type(label: &str) -> FieldType {
    match_type_rule(&FIELD_TYPE_RULES, label).unwrap_or(FieldType::Text)
}

/// Split `text` at its first colon into a trimmed (label, value) pair
pub fn split_label_value(text: &str) -> Option<(&str, &str)> {
    let (label, value) = text.split_once(':')?;
    Some((label.trim(), value.trim()))
}
