//! Book-specific criteria matching for the in-memory repository.
//!
//! # Responsibility
//! - Interpret bookstore criteria strings as predicates over `Book`.
//! - Wire the generic in-memory store to that interpretation.
//!
//! # Invariants
//! - Numeric criteria match on price by value and never on text fields.
//! - Text criteria match author, category or title by exact equality.

use crate::model::book::Book;
use crate::repo::in_memory::{InMemoryRepository, Predicate};
use bigdecimal::BigDecimal;
use std::cmp::Ordering;

/// In-memory repository of books.
pub type InMemoryBookRepository = InMemoryRepository<Book>;

/// Builds the bookstore predicate for `criteria`.
///
/// A criteria that parses as an integer selects books with that exact price.
/// Anything else selects books whose author, category or title equals it.
pub fn book_criteria_matcher(criteria: &str) -> Predicate<Book> {
    match criteria.parse::<i64>() {
        Ok(price) => {
            let price = BigDecimal::from(price);
            Box::new(move |book: &Book| book.price.cmp(&price) == Ordering::Equal)
        }
        Err(_) => {
            let criteria = criteria.to_string();
            Box::new(move |book: &Book| {
                book.author == criteria || book.category == criteria || book.title == criteria
            })
        }
    }
}

impl InMemoryRepository<Book> {
    /// Creates an empty book repository using [`book_criteria_matcher`].
    pub fn with_book_matcher() -> Self {
        Self::new(book_criteria_matcher)
    }
}
