use anyhow::{anyhow, Error};

use super::{CommandCreateDto, CommandReadDto, CommandUpdateDto};
use crate::db::Command;

impl From<CommandCreateDto> for Command {
    fn from(dto: CommandCreateDto) -> Self {
        Command {
            id: None,
            name: dto.name,
            how_to: dto.how_to,
        }
    }
}

impl TryFrom<Command> for CommandReadDto {
    type Error = Error;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        let id = command
            .id
            .ok_or_else(|| anyhow!("command '{}' has not been saved", command.name))?;
        Ok(CommandReadDto {
            id,
            name: command.name,
            how_to: command.how_to,
        })
    }
}

impl From<&Command> for CommandUpdateDto {
    fn from(command: &Command) -> Self {
        CommandUpdateDto {
            name: command.name.clone(),
            how_to: command.how_to.clone(),
        }
    }
}

impl CommandUpdateDto {
    /// Overwrites every field the update shape carries. The id is left alone.
    pub fn apply_to(self, command: &mut Command) {
        command.name = self.name;
        command.how_to = self.how_to;
    }
}
