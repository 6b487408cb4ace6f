use std::{borrow::Cow, fmt, sync::LazyLock};

use regex::Regex;

/// The kind of value a form field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any finite floating point number.
    Number,
    /// A positive whole number.
    Integer,
    /// A calendar date written as `YYYY-MM-DD`.
    Date,
    /// One of a fixed list of lowercase option names.
    Choice(&'static [&'static str]),
}

impl fmt::Display for FieldKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Integer => write!(f, "integer"),
            Self::Date => write!(f, "date (YYYY-MM-DD)"),
            Self::Choice(options) => write!(f, "one of: {}", options.join(", ")),
        }
    }
}

/// Static description of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key used in the form state and, for most pages, in the request body.
    pub name: &'static str,
    /// Display label. When `None` the label is derived from `name`.
    pub label: Option<&'static str>,
    pub kind: FieldKind,
    /// Initial value when the form is created or reset.
    pub default: Option<&'static str>,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn number(
        name: &'static str,
        label: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            label: Some(label),
            kind: FieldKind::Number,
            default: None,
            description,
        }
    }

    /// A numeric field whose label is derived from its camelCase key.
    pub const fn unlabeled_number(
        name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            label: None,
            kind: FieldKind::Number,
            default: None,
            description,
        }
    }

    pub const fn with_kind(
        mut self,
        kind: FieldKind,
    ) -> Self {
        self.kind = kind;
        self
    }

    pub const fn with_default(
        mut self,
        default: &'static str,
    ) -> Self {
        self.default = Some(default);
        self
    }

    /// Label shown next to the input.
    pub fn label(&self) -> Cow<'static, str> {
        match self.label {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(humanize_key(self.name)),
        }
    }
}

/// The fixed, ordered set of fields for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    pub fields: &'static [FieldSpec],
}

impl FormSchema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    pub fn field(
        &self,
        name: &str,
    ) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.field(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z0-9])([A-Z])").expect("static pattern is valid"));

/// Turns a field key into a display label.
///
/// `windSpeed` becomes `Wind Speed` and `soil_moisture` becomes
/// `Soil Moisture`.
pub fn humanize_key(key: &str) -> String {
    let spaced = WORD_BOUNDARY.replace_all(key, "$1 $2").replace('_', " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::number("pressure", "Pressure (PSI)", "Line pressure."),
        FieldSpec::unlabeled_number("roofArea", "Catchment area."),
        FieldSpec::number("crop", "Crop", "Crop grown.")
            .with_kind(FieldKind::Choice(&["wheat", "rice"]))
            .with_default("wheat"),
    ];

    const SCHEMA: FormSchema = FormSchema::new(FIELDS);

    #[test]
    fn humanize_key_splits_camel_case() {
        assert_eq!(humanize_key("windSpeed"), "Wind Speed");
        assert_eq!(humanize_key("maxCapacity"), "Max Capacity");
        assert_eq!(humanize_key("rainfall"), "Rainfall");
    }

    #[test]
    fn humanize_key_replaces_underscores() {
        assert_eq!(humanize_key("soil_moisture"), "Soil Moisture");
        assert_eq!(humanize_key("Water_Conservation_Efficiency"), "Water Conservation Efficiency");
    }

    #[test]
    fn humanize_key_handles_empty_input() {
        assert_eq!(humanize_key(""), "");
    }

    #[test]
    fn explicit_label_wins_over_derived_one() {
        assert_eq!(SCHEMA.fields[0].label(), "Pressure (PSI)");
        assert_eq!(SCHEMA.fields[1].label(), "Roof Area");
    }

    #[test]
    fn schema_lookup_by_name() {
        assert!(SCHEMA.contains("roofArea"));
        assert!(!SCHEMA.contains("roof_area"));
        assert_eq!(SCHEMA.field("crop").and_then(|f| f.default), Some("wheat"));
        assert_eq!(
            SCHEMA.names().collect::<Vec<_>>(),
            vec!["pressure", "roofArea", "crop"]
        );
    }

    #[test]
    fn choice_kind_lists_options() {
        assert_eq!(
            FieldKind::Choice(&["clay", "loam"]).to_string(),
            "one of: clay, loam"
        );
    }
}
