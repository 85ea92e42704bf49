use crate::adapter::{load_board_state, load_boards, store_board_state, store_boards};
use crate::traits::KeyValueStore;
use kanban_core::{IdGenerator, KanbanError, KanbanResult, UuidIdGenerator};
use kanban_domain::defaults::{default_boards, demo_board_state, DEMO_BOARD_ID};
use kanban_domain::{Board, BoardFields, BoardId, BoardState, BoardUpdate};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryOptions {
    /// Write the starter boards for a user who has none yet.
    pub seed_defaults: bool,
}

/// Boards and board states of a single user, on top of a [`KeyValueStore`].
///
/// Writes to one board are serialized by a per-board lock; writes to the
/// board index by a separate lock. A board lock is always taken before the
/// index lock.
pub struct BoardRepository<S: KeyValueStore> {
    store: S,
    user_id: String,
    ids: Arc<dyn IdGenerator>,
    options: RepositoryOptions,
    index_lock: Mutex<()>,
    board_locks: Mutex<HashMap<BoardId, Arc<Mutex<()>>>>,
}

impl<S: KeyValueStore> BoardRepository<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        Self::with_options(
            store,
            user_id,
            Arc::new(UuidIdGenerator),
            RepositoryOptions::default(),
        )
    }

    pub fn with_options(
        store: S,
        user_id: impl Into<String>,
        ids: Arc<dyn IdGenerator>,
        options: RepositoryOptions,
    ) -> Self {
        Self {
            store,
            user_id: user_id.into(),
            ids,
            options,
            index_lock: Mutex::new(()),
            board_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Id source for new boards, lists, cards and attachments.
    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    /// All boards of the user, seeding the starter boards first if enabled
    /// and the user has none.
    pub async fn list_boards(&self) -> KanbanResult<Vec<Board>> {
        let _index = self.index_lock.lock().await;
        self.read_boards().await
    }

    pub async fn create_board(&self, fields: BoardFields) -> KanbanResult<Board> {
        let board = Board::new(self.ids.as_ref(), fields)?;

        let _index = self.index_lock.lock().await;
        let mut boards = self.read_boards().await?;
        boards.push(board.clone());
        store_boards(&self.store, &self.user_id, &boards).await?;

        tracing::info!("Created board {} for user {}", board.id, self.user_id);
        Ok(board)
    }

    pub async fn get_board(&self, board_id: &str) -> KanbanResult<Board> {
        self.list_boards()
            .await?
            .into_iter()
            .find(|board| board.id == board_id)
            .ok_or_else(|| KanbanError::not_found("Board", board_id))
    }

    /// Edit board settings. Touches `updated_at`.
    pub async fn update_board(&self, board_id: &str, updates: BoardUpdate) -> KanbanResult<Board> {
        let _index = self.index_lock.lock().await;
        let mut boards = self.read_boards().await?;
        let board = boards
            .iter_mut()
            .find(|board| board.id == board_id)
            .ok_or_else(|| KanbanError::not_found("Board", board_id))?;
        board.update(updates)?;
        let updated = board.clone();
        store_boards(&self.store, &self.user_id, &boards).await?;
        Ok(updated)
    }

    /// The stored state of one of the user's boards, or `None` if it was
    /// never saved. `NotFound` if the board is not in the user's index.
    pub async fn get_board_state(&self, board_id: &str) -> KanbanResult<Option<BoardState>> {
        self.get_board(board_id).await?;
        load_board_state(&self.store, &self.user_id, board_id).await
    }

    /// Persist a board's state and stamp the board's `updated_at`.
    ///
    /// The index is written before the state. The two writes are not
    /// atomic: if the state write fails, the error is returned and the
    /// index already carries the new `updated_at`.
    pub async fn save_board_state(&self, board_id: &str, state: &BoardState) -> KanbanResult<()> {
        let lock = self.board_lock(board_id).await;
        let _guard = lock.lock().await;
        self.save_locked(board_id, state).await
    }

    /// Load, transform and save a board's state as one step. Concurrent
    /// calls for the same board run one after another. A board that was
    /// never saved starts from an empty state.
    ///
    /// Nothing is written if `f` fails.
    pub async fn update_board_state<F>(&self, board_id: &str, f: F) -> KanbanResult<BoardState>
    where
        F: FnOnce(&BoardState) -> KanbanResult<BoardState> + Send,
    {
        let lock = self.board_lock(board_id).await;
        let _guard = lock.lock().await;

        let current = self
            .get_board_state(board_id)
            .await?
            .unwrap_or_default();
        let next = f(&current)?;
        if next != current {
            self.save_locked(board_id, &next).await?;
        }
        Ok(next)
    }

    async fn save_locked(&self, board_id: &str, state: &BoardState) -> KanbanResult<()> {
        state.validate()?;

        let _index = self.index_lock.lock().await;
        let mut boards = self.read_boards().await?;
        let board = boards
            .iter_mut()
            .find(|board| board.id == board_id)
            .ok_or_else(|| KanbanError::not_found("Board", board_id))?;

        board.touch();
        store_boards(&self.store, &self.user_id, &boards).await?;
        store_board_state(&self.store, &self.user_id, board_id, state).await
    }

    /// Caller must hold `index_lock`.
    async fn read_boards(&self) -> KanbanResult<Vec<Board>> {
        if let Some(boards) = load_boards(&self.store, &self.user_id).await? {
            return Ok(boards);
        }
        if !self.options.seed_defaults {
            return Ok(Vec::new());
        }

        let boards = default_boards();
        store_board_state(&self.store, &self.user_id, DEMO_BOARD_ID, &demo_board_state()).await?;
        store_boards(&self.store, &self.user_id, &boards).await?;
        tracing::info!("Seeded {} boards for user {}", boards.len(), self.user_id);
        Ok(boards)
    }

    async fn board_lock(&self, board_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.board_locks.lock().await;
        locks
            .entry(board_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
