//! Storage keys and typed load/store of board documents.

use crate::traits::KeyValueStore;
use kanban_core::KanbanResult;
use kanban_domain::{Board, BoardState};

/// Key of a user's board index.
pub fn boards_key(user_id: &str) -> String {
    format!("kanban-boards-{}", user_id)
}

/// Key of one board's lists and cards.
///
/// `-` and `%` in the user id are percent-escaped, so the first `-` after
/// the prefix always ends the user id and no two (user, board) pairs share
/// a key.
pub fn board_state_key(user_id: &str, board_id: &str) -> String {
    format!("kanban-board-data-{}-{}", escape_user_id(user_id), board_id)
}

fn escape_user_id(user_id: &str) -> String {
    user_id.replace('%', "%25").replace('-', "%2D")
}

/// Load a board's state. `None` if the board has never been saved.
///
/// A stored document that does not satisfy the board invariant is
/// rejected rather than handed to the engine.
pub async fn load_board_state<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: &str,
    board_id: &str,
) -> KanbanResult<Option<BoardState>> {
    let key = board_state_key(user_id, board_id);
    let Some(value) = store.get(&key).await? else {
        return Ok(None);
    };
    let state: BoardState = serde_json::from_value(value)?;
    state.validate()?;
    tracing::info!(
        "Loaded board {}: {} lists, {} cards",
        board_id,
        state.lists.len(),
        state.cards.len()
    );
    Ok(Some(state))
}

pub async fn store_board_state<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: &str,
    board_id: &str,
    state: &BoardState,
) -> KanbanResult<()> {
    let value = serde_json::to_value(state)?;
    store.set(&board_state_key(user_id, board_id), value).await?;
    tracing::info!(
        "Stored board {}: {} lists, {} cards",
        board_id,
        state.lists.len(),
        state.cards.len()
    );
    Ok(())
}

/// Load a user's board index. `None` if the user has none yet.
pub async fn load_boards<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: &str,
) -> KanbanResult<Option<Vec<Board>>> {
    match store.get(&boards_key(user_id)).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn store_boards<S: KeyValueStore + ?Sized>(
    store: &S,
    user_id: &str,
    boards: &[Board],
) -> KanbanResult<()> {
    store
        .set(&boards_key(user_id), serde_json::to_value(boards)?)
        .await?;
    tracing::info!("Stored {} boards for user {}", boards.len(), user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use kanban_core::KanbanError;
    use kanban_domain::defaults::demo_board_state;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_keys() {
        assert_eq!(boards_key("alex"), "kanban-boards-alex");
        assert_eq!(board_state_key("alex", "b1"), "kanban-board-data-alex-b1");
        assert_eq!(
            board_state_key("alex-board", "x"),
            "kanban-board-data-alex%2Dboard-x"
        );
        assert_ne!(
            board_state_key("alex", "board-x"),
            board_state_key("alex-board", "x")
        );
        assert_ne!(board_state_key("a%2Db", "x"), board_state_key("a-b", "x"));
    }

    #[tokio::test]
    async fn test_hyphenated_user_ids_do_not_collide() {
        let store = MemoryStore::new();
        store_board_state(&store, "alex", "board-x", &demo_board_state())
            .await
            .unwrap();

        assert_eq!(load_board_state(&store, "alex-board", "x").await.unwrap(), None);
        assert!(load_board_state(&store, "alex", "board-x")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_round_trip_through_files() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let state = demo_board_state();

        store_board_state(&store, "alex", "b1", &state).await.unwrap();
        let loaded = load_board_state(&store, "alex", "b1").await.unwrap();
        assert_eq!(loaded, Some(state));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = MemoryStore::new();
        store_board_state(&store, "alex", "b1", &demo_board_state())
            .await
            .unwrap();
        assert_eq!(load_board_state(&store, "sam", "b1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_rejects_inconsistent_state() {
        let store = MemoryStore::new();
        let broken = json!({
            "lists": { "l1": { "id": "l1", "title": "To Do", "cardIds": ["ghost"] } },
            "cards": {},
            "listOrder": ["l1"]
        });
        store.set(&board_state_key("u", "b"), broken).await.unwrap();

        let err = load_board_state(&store, "u", "b").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_load_rejects_wrong_shape() {
        let store = MemoryStore::new();
        store
            .set(&board_state_key("u", "b"), json!({ "lists": 3 }))
            .await
            .unwrap();
        assert!(matches!(
            load_board_state(&store, "u", "b").await.unwrap_err(),
            KanbanError::Serialization(_)
        ));
    }
}
