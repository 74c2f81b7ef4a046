//! Board columns and their ordering payload.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column identifier that task states conventionally reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a validated column identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyColumnId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates an identifier from a known non-empty literal.
    #[must_use]
    pub fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the generated identifier for a column created at `order`.
    #[must_use]
    pub fn generated(order: i32) -> Self {
        Self(format!("column-{order}"))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    order: i32,
}

impl Column {
    /// Creates a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] when the title is
    /// blank.
    pub fn new(
        id: ColumnId,
        raw_title: impl Into<String>,
        order: i32,
    ) -> Result<Self, BoardDomainError> {
        let title = normalise_title(raw_title.into())?;
        Ok(Self { id, title, order })
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the sort position.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Applies a rename/reorder.
    pub fn apply(&mut self, update: &ColumnUpdate) {
        self.title.clone_from(&update.title);
        self.order = update.order;
    }
}

/// New title and position for an existing column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnUpdate {
    /// Column to update.
    pub id: ColumnId,
    /// New title.
    pub title: String,
    /// New sort position.
    pub order: i32,
}

impl ColumnUpdate {
    /// Creates a validated column update.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the id or title is blank.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        order: i32,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id: ColumnId::new(id)?,
            title: normalise_title(title.into())?,
            order,
        })
    }
}

fn normalise_title(raw: String) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyColumnTitle);
    }
    Ok(trimmed.to_owned())
}

/// Serialises a column order as the persisted JSON list of ids.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialisation fails.
pub fn encode_column_order(order: &[ColumnId]) -> Result<String, serde_json::Error> {
    serde_json::to_string(order)
}

/// Parses the persisted JSON list of column ids.
///
/// # Errors
///
/// Returns [`BoardDomainError::MalformedColumnOrder`] when the payload is
/// not a JSON array of non-empty strings.
pub fn decode_column_order(payload: &str) -> Result<Vec<ColumnId>, BoardDomainError> {
    let raw: Vec<String> = serde_json::from_str(payload)
        .map_err(|err| BoardDomainError::MalformedColumnOrder(err.to_string()))?;
    raw.into_iter()
        .map(|id| {
            ColumnId::new(id)
                .map_err(|err| BoardDomainError::MalformedColumnOrder(err.to_string()))
        })
        .collect()
}
