use std::{str::FromStr, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;

use super::{FieldError, FieldKind, FieldSpec, FormError, FormSchema};

/// Raw, unvalidated text for every field of one page.
///
/// The key set is fixed by the schema the state was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: FormSchema,
    values: Vec<String>,
}

impl FormState {
    /// Creates a state holding each field's default, or empty text.
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            values: defaults(schema),
        }
    }

    pub fn schema(&self) -> FormSchema {
        self.schema
    }

    /// Overwrites one field. The value itself is not checked here.
    pub fn update_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let index = self.index_of(name)?;
        self.values[index] = value.into();
        Ok(())
    }

    pub fn value(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.index_of(name).ok().map(|i| self.values[i].as_str())
    }

    /// Field specs paired with their current text, in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static FieldSpec, &str)> + '_ {
        self.schema
            .fields
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Puts every field back to its default.
    pub fn reset(&mut self) {
        self.values = defaults(self.schema);
    }

    /// Checks every field and collects all problems, not just the first.
    pub fn validate(&self) -> Result<ValidForm, FormError> {
        let mut errors = Vec::new();
        let mut values = Vec::with_capacity(self.values.len());

        for (spec, raw) in self.entries() {
            match validate_field(spec, raw) {
                Ok(value) => values.push(value),
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(ValidForm {
                schema: self.schema,
                values,
            })
        } else {
            Err(FormError::Invalid(errors))
        }
    }

    fn index_of(
        &self,
        name: &str,
    ) -> Result<usize, FormError> {
        self.schema
            .fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }
}

fn defaults(schema: FormSchema) -> Vec<String> {
    schema
        .fields
        .iter()
        .map(|f| f.default.unwrap_or_default().to_string())
        .collect()
}

static GROUPED_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("static pattern is valid")
});

/// Trims whitespace and drops thousands separators. Commas anywhere but
/// between well-formed groups of three make the text invalid.
fn normalize_number(s: &str) -> Option<String> {
    let s = s.trim();
    if !s.contains(',') {
        return Some(s.to_string());
    }
    GROUPED_NUMBER.is_match(s).then(|| s.replace(',', ""))
}

fn validate_field(
    spec: &'static FieldSpec,
    raw: &str,
) -> Result<ValidValue, FieldError> {
    let field = spec.name;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Missing { field });
    }

    let value = match spec.kind {
        FieldKind::Number => {
            let parsed = normalize_number(trimmed).map(|text| {
                let n = text.parse::<f64>();
                (text, n)
            });
            match parsed {
                Some((text, Ok(n))) if n.is_finite() => ValidValue {
                    text,
                    parsed: Parsed::Number(n),
                },
                _ => {
                    return Err(FieldError::NotANumber {
                        field,
                        value: raw.to_string(),
                    });
                }
            }
        }
        FieldKind::Integer => {
            let parsed = normalize_number(trimmed).map(|text| {
                let n = text.parse::<u32>();
                (text, n)
            });
            match parsed {
                Some((text, Ok(n))) if n > 0 => ValidValue {
                    text,
                    parsed: Parsed::Integer(n),
                },
                _ => {
                    return Err(FieldError::NotAnInteger {
                        field,
                        value: raw.to_string(),
                    });
                }
            }
        }
        FieldKind::Date => match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => ValidValue {
                text: trimmed.to_string(),
                parsed: Parsed::Date(date),
            },
            Err(_) => {
                return Err(FieldError::NotADate {
                    field,
                    value: raw.to_string(),
                });
            }
        },
        FieldKind::Choice(options) => {
            let lowered = trimmed.to_ascii_lowercase();
            match options.iter().find(|o| **o == lowered) {
                Some(option) => ValidValue {
                    text: lowered,
                    parsed: Parsed::Choice(*option),
                },
                None => {
                    return Err(FieldError::NotAnOption {
                        field,
                        value: raw.to_string(),
                        options,
                    });
                }
            }
        }
    };

    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
enum Parsed {
    Number(f64),
    Integer(u32),
    Date(NaiveDate),
    Choice(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
struct ValidValue {
    /// Normalized text as it goes on the wire.
    text: String,
    parsed: Parsed,
}

/// A form whose every field passed validation.
///
/// Accessors fail only when asked for a field the schema doesn't have, or
/// with the wrong kind, which is a page definition bug.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidForm {
    schema: FormSchema,
    values: Vec<ValidValue>,
}

impl ValidForm {
    fn get(
        &self,
        name: &str,
    ) -> Result<&ValidValue, FormError> {
        self.schema
            .fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| &self.values[i])
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Normalized text of a field.
    pub fn text(
        &self,
        name: &str,
    ) -> Result<String, FormError> {
        self.get(name).map(|v| v.text.clone())
    }

    pub fn number(
        &self,
        name: &str,
    ) -> Result<f64, FormError> {
        match self.get(name)?.parsed {
            Parsed::Number(n) => Ok(n),
            _ => Err(FormError::UnknownField(name.to_string())),
        }
    }

    pub fn integer(
        &self,
        name: &str,
    ) -> Result<u32, FormError> {
        match self.get(name)?.parsed {
            Parsed::Integer(n) => Ok(n),
            _ => Err(FormError::UnknownField(name.to_string())),
        }
    }

    pub fn date(
        &self,
        name: &str,
    ) -> Result<NaiveDate, FormError> {
        match self.get(name)?.parsed {
            Parsed::Date(d) => Ok(d),
            _ => Err(FormError::UnknownField(name.to_string())),
        }
    }

    /// Parses a choice field into the page's option type.
    pub fn choice<T: FromStr>(
        &self,
        name: &str,
    ) -> Result<T, FormError> {
        let value = self.get(name)?;
        let Parsed::Choice(option) = value.parsed else {
            return Err(FormError::UnknownField(name.to_string()));
        };
        option.parse().map_err(|_| {
            let spec = self.schema.field(name);
            FormError::Invalid(vec![FieldError::NotAnOption {
                field: spec.map(|s| s.name).unwrap_or("unknown"),
                value: option.to_string(),
                options: match spec.map(|s| s.kind) {
                    Some(FieldKind::Choice(options)) => options,
                    _ => &[],
                },
            }])
        })
    }
}
