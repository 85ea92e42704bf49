use chrono::{DateTime, Utc};
use kanban_core::{IdGenerator, IdKind, KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::field_update::FieldUpdate;

pub type BoardId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardColor {
    #[default]
    Purple,
    Blue,
    Green,
    Amber,
    Rose,
}

impl BoardColor {
    pub const ALL: [BoardColor; 5] = [
        BoardColor::Purple,
        BoardColor::Blue,
        BoardColor::Green,
        BoardColor::Amber,
        BoardColor::Rose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Rose => "rose",
        }
    }
}

impl fmt::Display for BoardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardColor {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == wanted)
            .ok_or_else(|| KanbanError::Validation(format!("Unknown board color: '{}'", s)))
    }
}

/// Board metadata. The lists and cards of a board live in a separate
/// [`BoardState`](crate::BoardState) document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: BoardColor,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied fields for a new board.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardFields {
    pub title: String,
    pub description: String,
    pub color: BoardColor,
}

/// Board-settings edit. Unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct BoardUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub color: Option<BoardColor>,
}

impl Board {
    pub fn new(ids: &dyn IdGenerator, fields: BoardFields) -> KanbanResult<Self> {
        let title = fields.title.trim();
        if title.is_empty() {
            return Err(KanbanError::Validation(
                "Board title cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id: ids.next_id(IdKind::Board),
            title: title.to_string(),
            description: fields.description.trim().to_string(),
            color: fields.color,
            updated_at: Utc::now(),
        })
    }

    pub fn update(&mut self, updates: BoardUpdate) -> KanbanResult<()> {
        if let Some(title) = updates.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(KanbanError::Validation(
                    "Board title cannot be empty".to_string(),
                ));
            }
            self.title = title.to_string();
        }
        let mut description = Some(std::mem::take(&mut self.description));
        updates.description.apply_to(&mut description);
        self.description = description.unwrap_or_default();
        if let Some(color) = updates.color {
            self.color = color;
        }
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
