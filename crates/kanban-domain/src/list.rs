use serde::{Deserialize, Serialize};

use crate::card::CardId;

pub type ListId = String;

/// An ordered column of cards. `card_ids` is the authoritative display
/// order of the list's cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub card_ids: Vec<CardId>,
}

impl List {
    pub fn new(id: ListId, title: String) -> Self {
        Self {
            id,
            title,
            card_ids: Vec::new(),
        }
    }

    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.card_ids.iter().position(|id| id == card_id)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.position_of(card_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.card_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.card_ids.is_empty()
    }
}
