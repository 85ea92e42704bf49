//! The full content of one board: lists, cards and their ordering.
//!
//! `BoardState` is plain data. Every mutation goes through a
//! [`Command`](crate::commands::Command) applied with [`BoardState::apply`],
//! which works on a copy and only hands back a new state when the command
//! succeeded.

use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::card::{Card, CardId};
use crate::commands::Command;
use crate::list::{List, ListId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    /// Lists by id. Display order lives in `list_order`.
    #[serde(default)]
    pub lists: BTreeMap<ListId, List>,

    #[serde(default)]
    pub cards: BTreeMap<CardId, Card>,

    /// Left-to-right list order; a permutation of the `lists` keys.
    #[serde(default)]
    pub list_order: Vec<ListId>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty() && self.cards.is_empty()
    }

    pub fn list(&self, list_id: &str) -> KanbanResult<&List> {
        self.lists
            .get(list_id)
            .ok_or_else(|| KanbanError::not_found("List", list_id))
    }

    pub fn list_mut(&mut self, list_id: &str) -> KanbanResult<&mut List> {
        self.lists
            .get_mut(list_id)
            .ok_or_else(|| KanbanError::not_found("List", list_id))
    }

    pub fn card(&self, card_id: &str) -> KanbanResult<&Card> {
        self.cards
            .get(card_id)
            .ok_or_else(|| KanbanError::not_found("Card", card_id))
    }

    pub fn card_mut(&mut self, card_id: &str) -> KanbanResult<&mut Card> {
        self.cards
            .get_mut(card_id)
            .ok_or_else(|| KanbanError::not_found("Card", card_id))
    }

    /// The list whose `card_ids` holds `card_id`, if any.
    pub fn list_of_card(&self, card_id: &str) -> Option<&ListId> {
        self.lists
            .values()
            .find(|list| list.contains(card_id))
            .map(|list| &list.id)
    }

    /// Lists in display order. Ids in `list_order` without a list are
    /// skipped.
    pub fn ordered_lists(&self) -> impl Iterator<Item = &List> {
        self.list_order.iter().filter_map(|id| self.lists.get(id))
    }

    /// Cards of a list in display order.
    pub fn cards_for_list(&self, list_id: &str) -> KanbanResult<Vec<&Card>> {
        let list = self.list(list_id)?;
        Ok(list
            .card_ids
            .iter()
            .filter_map(|id| self.cards.get(id))
            .collect())
    }

    /// Run `command` against a copy of this state.
    ///
    /// On success the copy is returned; on failure the error is returned and
    /// no state is produced, so a half-applied command is never observable.
    pub fn apply(&self, command: &dyn Command) -> KanbanResult<BoardState> {
        let mut next = self.clone();
        command.execute(&mut next)?;
        debug_assert!(
            self.validate().is_err() || next.validate().is_ok(),
            "{} broke the board invariant: {:?}",
            command.description(),
            next.validate()
        );
        tracing::debug!(command = %command.description(), "Applied board command");
        Ok(next)
    }

    /// Check the structural invariants of a board:
    ///
    /// - every map entry is stored under its own id,
    /// - `list_order` is a permutation of the `lists` keys,
    /// - walking `list_order` and each list's `card_ids` visits every card in
    ///   `cards` exactly once and nothing else.
    pub fn validate(&self) -> KanbanResult<()> {
        for (key, list) in &self.lists {
            if key != &list.id {
                return Err(invalid(format!("list key '{}' holds list '{}'", key, list.id)));
            }
        }
        for (key, card) in &self.cards {
            if key != &card.id {
                return Err(invalid(format!("card key '{}' holds card '{}'", key, card.id)));
            }
        }

        let mut ordered: HashSet<&str> = HashSet::with_capacity(self.list_order.len());
        for list_id in &self.list_order {
            if !self.lists.contains_key(list_id) {
                return Err(invalid(format!("list order names unknown list '{}'", list_id)));
            }
            if !ordered.insert(list_id) {
                return Err(invalid(format!("list '{}' appears twice in list order", list_id)));
            }
        }
        if ordered.len() != self.lists.len() {
            let missing = self
                .lists
                .keys()
                .find(|id| !ordered.contains(id.as_str()))
                .cloned()
                .unwrap_or_default();
            return Err(invalid(format!("list '{}' is missing from list order", missing)));
        }

        let mut placed: HashSet<&str> = HashSet::with_capacity(self.cards.len());
        for list in self.ordered_lists() {
            for card_id in &list.card_ids {
                if !self.cards.contains_key(card_id) {
                    return Err(invalid(format!(
                        "list '{}' references unknown card '{}'",
                        list.id, card_id
                    )));
                }
                if !placed.insert(card_id) {
                    return Err(invalid(format!("card '{}' is placed more than once", card_id)));
                }
            }
        }
        if placed.len() != self.cards.len() {
            let orphan = self
                .cards
                .keys()
                .find(|id| !placed.contains(id.as_str()))
                .cloned()
                .unwrap_or_default();
            return Err(invalid(format!("card '{}' does not belong to any list", orphan)));
        }
        Ok(())
    }
}

fn invalid(message: String) -> KanbanError {
    KanbanError::Validation(format!("Inconsistent board state: {}", message))
}
