use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use json_patch::Patch;
use tracing::{debug, info};

use super::error::{ApiError, ApiResult};
use super::patch::patch_update_dto;
use super::{command_location, AppState};
use crate::db::Command;
use crate::dtos::{CommandCreateDto, CommandReadDto, CommandUpdateDto, Validate};

// POST /api/commands
pub async fn create_command(
    State(state): State<AppState>,
    Json(dto): Json<CommandCreateDto>,
) -> ApiResult<(StatusCode, [(HeaderName, String); 1], Json<CommandReadDto>)> {
    dto.validate()?;

    let mut repo = state.repos.open().await?;
    repo.create_command(Command::from(dto)).await?;
    let mut summary = repo.save_changes().await?;

    let created = summary
        .inserted
        .pop()
        .ok_or_else(|| anyhow::anyhow!("store did not report the created command"))?;
    let read = CommandReadDto::try_from(created)?;
    info!(id = read.id, name = %read.name, "command created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, command_location(read.id))],
        Json(read),
    ))
}

// GET /api/commands
pub async fn get_all_commands(State(state): State<AppState>) -> ApiResult<Json<Vec<CommandReadDto>>> {
    let mut repo = state.repos.open().await?;
    let commands = repo
        .get_all_commands()
        .await?
        .into_iter()
        .map(CommandReadDto::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;

    debug!(count = commands.len(), "listed commands");
    Ok(Json(commands))
}

// GET /api/commands/{id}
pub async fn get_command_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CommandReadDto>> {
    let mut repo = state.repos.open().await?;
    let command = repo
        .get_command_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(CommandReadDto::try_from(command)?))
}

// PUT /api/commands/{id}
pub async fn update_command(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<CommandUpdateDto>,
) -> ApiResult<StatusCode> {
    let mut repo = state.repos.open().await?;
    let mut command = repo
        .get_command_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    dto.validate()?;
    dto.apply_to(&mut command);

    repo.update_command(command).await?;
    repo.save_changes().await?;
    info!(id, "command updated");

    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/commands/{id}
pub async fn partial_command_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<Patch>,
) -> ApiResult<StatusCode> {
    let mut repo = state.repos.open().await?;
    let mut command = repo
        .get_command_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let patched = patch_update_dto(&CommandUpdateDto::from(&command), &patch)?;
    patched.apply_to(&mut command);

    repo.update_command(command).await?;
    repo.save_changes().await?;
    info!(id, operations = patch.0.len(), "command patched");

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/commands/{id}
pub async fn delete_command(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut repo = state.repos.open().await?;
    let command = repo
        .get_command_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    repo.delete_command(&command).await?;
    repo.save_changes().await?;
    info!(id, "command deleted");

    Ok(StatusCode::NO_CONTENT)
}
