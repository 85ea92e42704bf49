//! Identifier generation for boards, lists, cards and attachments.
//!
//! Ids are plain strings of the form `<prefix>-<suffix>`. The default
//! generator uses random v4 UUIDs so ids created within the same
//! millisecond never collide.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// The kind of entity an id is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Board,
    List,
    Card,
    Attachment,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::List => "list",
            Self::Card => "card",
            Self::Attachment => "attachment",
        }
    }
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self, kind: IdKind) -> String;
}

/// Random, collision-resistant ids (`card-9f1c...`).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, kind: IdKind) -> String {
        format!("{}-{}", kind.prefix(), Uuid::new_v4().simple())
    }
}

/// Deterministic ids (`list-1`, `card-2`, ...) sharing one counter.
///
/// Useful for tests and fixtures where readable ids matter more than
/// global uniqueness.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, kind: IdKind) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", kind.prefix(), n)
    }
}
