//! Request and response shapes for the commands API.
//!
//! Input shapes ignore fields they do not carry, so a read body with its `id`
//! can be sent back as an update. Missing text fields default to empty so that
//! they surface as required-field violations from [`Validate`] instead of as
//! parse failures.

pub mod mapping;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use validation::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandCreateDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub how_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReadDto {
    pub id: i64,
    pub name: String,
    pub how_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandUpdateDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub how_to: String,
}
