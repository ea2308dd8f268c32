//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog record exposed by the bookstore API.
//!
//! # Invariants
//! - `id` is `None` until the repository stores the book.
//! - Two books are equal only when every field, including `id`, is equal.
//! - `price` compares by numeric value, so `1` equals `1.00`.

use crate::model::entity::{Entity, EntityId};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Catalog record for a single book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Repository-assigned id. Omitted on the wire for unsaved books.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub category: String,
    pub author: String,
    pub title: String,
    /// Serialized as a decimal string to avoid float rounding.
    pub price: BigDecimal,
}

impl Book {
    /// Creates an unsaved book. The repository assigns its id on insert.
    pub fn new(
        category: impl Into<String>,
        author: impl Into<String>,
        title: impl Into<String>,
        price: BigDecimal,
    ) -> Self {
        Self {
            id: None,
            category: category.into(),
            author: author.into(),
            title: title.into(),
            price,
        }
    }

    /// Creates a book with a known id, as returned by the repository.
    pub fn with_id(
        id: EntityId,
        category: impl Into<String>,
        author: impl Into<String>,
        title: impl Into<String>,
        price: BigDecimal,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(category, author, title, price)
        }
    }
}

impl Entity for Book {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }
}
