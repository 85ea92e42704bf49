//! Card sorting.
//!
//! All sorts are stable: cards that compare equal keep their previous
//! relative order.

use crate::Card;
use kanban_core::KanbanError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Case-insensitive, ascending.
    Title,
    /// Earliest first; cards without a due date go last.
    DueDate,
    /// Case-insensitive, ascending; no assignee sorts as an empty name.
    Assignee,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DueDate => "dueDate",
            Self::Assignee => "assignee",
        }
    }

    pub fn compare(&self, a: &Card, b: &Card) -> Ordering {
        match self {
            Self::Title => compare_text(&a.title, &b.title),
            Self::DueDate => match (a.due_date, b.due_date) {
                (Some(ad), Some(bd)) => ad.cmp(&bd),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Assignee => compare_text(
                a.assignee.as_deref().unwrap_or(""),
                b.assignee.as_deref().unwrap_or(""),
            ),
        }
    }

    /// Stable sort of a slice of cards. Works with both `&Card` and `Card`
    /// elements.
    pub fn sort_cards<T: Borrow<Card>>(&self, cards: &mut [T]) {
        cards.sort_by(|a, b| self.compare(a.borrow(), b.borrow()));
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "title" => Ok(Self::Title),
            "duedate" => Ok(Self::DueDate),
            "assignee" => Ok(Self::Assignee),
            _ => Err(KanbanError::Validation(format!(
                "Unknown sort key '{}' (expected title, dueDate or assignee)",
                s
            ))),
        }
    }
}

/// Case-insensitive comparison, falling back to the exact text so the order
/// is total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
