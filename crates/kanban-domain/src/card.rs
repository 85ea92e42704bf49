use chrono::{DateTime, NaiveDate, Utc};
use kanban_core::{IdGenerator, IdKind, KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};

use crate::field_update::FieldUpdate;

pub type CardId = String;
pub type AttachmentId = String;

/// File metadata attached to a card. `url` is an opaque reference to the
/// content; nothing here reads or stores the bytes themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    pub fn new(
        ids: &dyn IdGenerator,
        name: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: ids.next_id(IdKind::Attachment),
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            url: url.into(),
            uploaded_at: Utc::now(),
        }
    }

    pub fn human_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// Format a byte count the way upload dialogs show it: `0 Bytes`,
/// `512 Bytes`, `1.5 KB`, `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// User-supplied content for a new card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFields {
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub assignee: Option<String>,
}

impl CardFields {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Field-by-field edit used to build a replacement card from an existing
/// one.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
    pub due_date: FieldUpdate<NaiveDate>,
    pub assignee: FieldUpdate<String>,
}

impl Card {
    pub fn from_fields(id: CardId, fields: CardFields) -> KanbanResult<Self> {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            labels: fields.labels,
            due_date: fields.due_date,
            assignee: fields.assignee,
            attachments: Vec::new(),
        }
        .normalized()
    }

    /// Trim text fields, drop blank and repeated labels, and turn a blank
    /// assignee into no assignee. Fails if the title is blank, or if an
    /// attachment has a blank name or shares its id with another.
    pub fn normalized(mut self) -> KanbanResult<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(KanbanError::Validation(
                "Card title cannot be empty".to_string(),
            ));
        }
        for (i, attachment) in self.attachments.iter().enumerate() {
            if attachment.name.trim().is_empty() {
                return Err(KanbanError::Validation(
                    "Attachment name cannot be empty".to_string(),
                ));
            }
            if self.attachments[..i].iter().any(|a| a.id == attachment.id) {
                return Err(KanbanError::Validation(format!(
                    "Attachment id '{}' is already in use",
                    attachment.id
                )));
            }
        }
        self.title = title.to_string();
        self.description = self.description.trim().to_string();
        self.labels = normalize_labels(self.labels);
        self.assignee = self
            .assignee
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Ok(self)
    }

    /// A copy of this card with `updates` applied. The result still goes
    /// through validation when it is handed to the engine.
    pub fn with_update(&self, updates: CardUpdate) -> Card {
        let mut card = self.clone();
        if let Some(title) = updates.title {
            card.title = title;
        }
        if let Some(description) = updates.description {
            card.description = description;
        }
        if let Some(labels) = updates.labels {
            card.labels = labels;
        }
        updates.due_date.apply_to(&mut card.due_date);
        updates.assignee.apply_to(&mut card.assignee);
        card
    }

    pub fn attachment(&self, attachment_id: &str) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.id == attachment_id)
    }
}

fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !seen.iter().any(|l| l == label) {
            seen.push(label.to_string());
        }
    }
    seen
}
