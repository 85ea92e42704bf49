use kanban_core::{AppConfig, IdGenerator, KanbanResult, UuidIdGenerator};
use kanban_domain::commands::Command;
use kanban_domain::BoardState;
use kanban_persistence::{BoardRepository, JsonFileStore, RepositoryOptions};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a command handler needs: the user's repository over the data
/// directory, plus the effective configuration.
pub struct CliContext {
    pub repo: BoardRepository<JsonFileStore>,
    config: AppConfig,
}

impl CliContext {
    /// Flags win over the config file, the config file over built-in defaults.
    pub fn new(config: AppConfig, data_dir: Option<PathBuf>, user: Option<String>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| config.effective_data_dir());
        let user = user.unwrap_or_else(|| config.effective_user().to_string());
        tracing::debug!("Using data dir {} for user {}", data_dir.display(), user);

        let repo = BoardRepository::with_options(
            JsonFileStore::new(&data_dir),
            user,
            Arc::new(UuidIdGenerator),
            RepositoryOptions {
                seed_defaults: config.effective_seed_defaults(),
            },
        );
        Self { repo, config }
    }

    pub fn ids(&self) -> &dyn IdGenerator {
        self.repo.ids()
    }

    pub fn max_attachment_bytes(&self) -> u64 {
        self.config.effective_max_attachment_bytes()
    }

    /// Current state of an existing board; a board never saved is empty.
    pub async fn board_state(&self, board_id: &str) -> KanbanResult<BoardState> {
        Ok(self
            .repo
            .get_board_state(board_id)
            .await?
            .unwrap_or_default())
    }

    /// Apply one command to a board and persist the result.
    pub async fn execute(&self, board_id: &str, command: &dyn Command) -> KanbanResult<BoardState> {
        tracing::debug!("{} on board {}", command.description(), board_id);
        self.repo
            .update_board_state(board_id, |state| state.apply(command))
            .await
    }
}
