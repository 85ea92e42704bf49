//! Starter content for a fresh user: three boards and a populated demo
//! board.

use chrono::{Duration, NaiveDate, Utc};

use crate::{Board, BoardColor, BoardState, Card, List};

pub const DEMO_BOARD_ID: &str = "board-demo";

pub fn default_boards() -> Vec<Board> {
    let now = Utc::now();
    vec![
        Board {
            id: DEMO_BOARD_ID.to_string(),
            title: "Product Development".to_string(),
            description: "Track product features and bugs".to_string(),
            color: BoardColor::Purple,
            updated_at: now - Duration::days(2),
        },
        Board {
            id: "board-marketing".to_string(),
            title: "Marketing Campaign".to_string(),
            description: "Q3 marketing initiatives".to_string(),
            color: BoardColor::Blue,
            updated_at: now - Duration::hours(5),
        },
        Board {
            id: "board-personal".to_string(),
            title: "Personal Tasks".to_string(),
            description: "Daily to-dos and reminders".to_string(),
            color: BoardColor::Green,
            updated_at: now - Duration::weeks(1),
        },
    ]
}

pub fn demo_board_state() -> BoardState {
    let lists = [
        ("list-1", "To Do", &["card-1", "card-2", "card-3"][..]),
        ("list-2", "In Progress", &["card-4", "card-5"][..]),
        ("list-3", "Done", &["card-6"][..]),
    ];
    let cards = [
        (
            "card-1",
            "Research user needs",
            "Conduct user interviews and analyze feedback",
            ["research", "high"],
            (2023, 7, 15),
            "Alex Johnson",
        ),
        (
            "card-2",
            "Create wireframes",
            "Design initial wireframes for the new feature",
            ["design", "medium"],
            (2023, 7, 20),
            "Sam Taylor",
        ),
        (
            "card-3",
            "Technical specification",
            "Write technical documentation for implementation",
            ["documentation", "medium"],
            (2023, 7, 18),
            "Jordan Lee",
        ),
        (
            "card-4",
            "Implement API endpoints",
            "Create backend API endpoints for the feature",
            ["backend", "high"],
            (2023, 7, 25),
            "Morgan Chen",
        ),
        (
            "card-5",
            "Frontend development",
            "Build UI components for the new feature",
            ["frontend", "high"],
            (2023, 7, 28),
            "Taylor Swift",
        ),
        (
            "card-6",
            "Write unit tests",
            "Create comprehensive test suite for the feature",
            ["testing", "medium"],
            (2023, 7, 10),
            "Jamie Rodriguez",
        ),
    ];

    let mut state = BoardState::new();
    for (id, title, card_ids) in lists {
        let mut list = List::new(id.to_string(), title.to_string());
        list.card_ids = card_ids.iter().map(|c| c.to_string()).collect();
        state.lists.insert(id.to_string(), list);
        state.list_order.push(id.to_string());
    }
    for (id, title, description, labels, (y, m, d), assignee) in cards {
        state.cards.insert(
            id.to_string(),
            Card {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                labels: labels.iter().map(|l| l.to_string()).collect(),
                due_date: NaiveDate::from_ymd_opt(y, m, d),
                assignee: Some(assignee.to_string()),
                attachments: Vec::new(),
            },
        );
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boards() {
        let boards = default_boards();
        assert_eq!(boards.len(), 3);
        assert_eq!(boards[0].id, DEMO_BOARD_ID);
        assert!(boards.iter().all(|b| b.updated_at < Utc::now()));
    }

    #[test]
    fn test_demo_state_is_consistent() {
        let state = demo_board_state();
        state.validate().unwrap();
        assert_eq!(state.list_order, vec!["list-1", "list-2", "list-3"]);
        assert_eq!(state.cards.len(), 6);
        assert!(state.cards.values().all(|c| c.due_date.is_some()));
    }
}
