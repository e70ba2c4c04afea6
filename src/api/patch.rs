use anyhow::Context;
use json_patch::Patch;
use serde::Deserialize;

use super::error::{ApiError, ApiResult};
use crate::dtos::{CommandUpdateDto, Validate, ValidationErrors};

/// The fields a patch may leave behind. Anything else, `id` included, is
/// outside the patch vocabulary.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PatchedCommand {
    #[serde(default)]
    name: String,
    #[serde(default)]
    how_to: String,
}

impl From<PatchedCommand> for CommandUpdateDto {
    fn from(patched: PatchedCommand) -> Self {
        CommandUpdateDto {
            name: patched.name,
            how_to: patched.how_to,
        }
    }
}

/// Applies an RFC 6902 patch to the update shape of a command and validates
/// the result.
///
/// The patch only ever sees the fields `CommandUpdateDto` exposes. A patch
/// that cannot be applied, or that leaves a document which no longer fits the
/// update shape, is reported under the `patch` key.
pub fn patch_update_dto(dto: &CommandUpdateDto, patch: &Patch) -> ApiResult<CommandUpdateDto> {
    let mut doc = serde_json::to_value(dto).context("failed to serialize command for patching")?;

    json_patch::patch(&mut doc, &patch.0)
        .map_err(|err| ValidationErrors::single("patch", err.to_string()))?;

    let patched: CommandUpdateDto = serde_json::from_value::<PatchedCommand>(doc)
        .map_err(|err| {
            ValidationErrors::single("patch", format!("patched command is invalid: {}", err))
        })?
        .into();

    patched.validate().map_err(ApiError::Validation)?;
    Ok(patched)
}
