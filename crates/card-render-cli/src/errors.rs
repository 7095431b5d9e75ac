use std::path::PathBuf;

use card_renderer::RenderError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("card file failed ({}): {}", .0.display(), .1)]
    CardFile(PathBuf, #[source] anyhow::Error),
    #[error("host config failed ({}): {}", .0.display(), .1)]
    HostConfig(PathBuf, #[source] anyhow::Error),
    #[error("card rejected: {0}")]
    Card(#[source] RenderError),
    #[error("card produced {count} warning(s)")]
    Warnings { count: usize },
    #[error("failed to write output: {0}")]
    Output(#[source] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::CardFile(_, _) => 1,
            CliError::HostConfig(_, _) => 1,
            CliError::Card(_) => 3,
            CliError::Warnings { .. } => 4,
            CliError::Output(_) => 5,
        }
    }
}
