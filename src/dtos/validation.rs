use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::{CommandCreateDto, CommandUpdateDto};

pub const MAX_FIELD_LEN: usize = 250;

/// Per-field error messages, keyed by the JSON field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn check_text(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("The {} field is required.", field));
    } else if value.chars().count() > MAX_FIELD_LEN {
        errors.add(
            field,
            format!(
                "The field {} must be a string with a maximum length of {}.",
                field, MAX_FIELD_LEN
            ),
        );
    }
}

fn check_command_fields(name: &str, how_to: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_text(&mut errors, "name", name);
    check_text(&mut errors, "howTo", how_to);
    errors.into_result()
}

impl Validate for CommandCreateDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        check_command_fields(&self.name, &self.how_to)
    }
}

impl Validate for CommandUpdateDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        check_command_fields(&self.name, &self.how_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str, how_to: &str) -> CommandUpdateDto {
        CommandUpdateDto {
            name: name.to_string(),
            how_to: how_to.to_string(),
        }
    }

    #[test]
    fn accepts_filled_fields() {
        assert!(update("git log", "shows history").validate().is_ok());
    }

    #[test]
    fn blank_fields_are_required() {
        let errors = update("   ", "").validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&["The name field is required.".to_string()][..])
        );
        assert!(errors.get("howTo").is_some());
    }

    #[test]
    fn rejects_overlong_text() {
        let long = "x".repeat(MAX_FIELD_LEN + 1);
        let errors = update(&long, "ok").validate().unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("howTo").is_none());

        let exact = "x".repeat(MAX_FIELD_LEN);
        assert!(update(&exact, "ok").validate().is_ok());
    }

    #[test]
    fn display_joins_messages() {
        let mut errors = ValidationErrors::single("name", "bad");
        errors.add("howTo", "worse");
        assert_eq!(errors.to_string(), "howTo: worse; name: bad");
    }
}
