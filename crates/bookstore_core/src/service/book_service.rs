//! Book use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points consumed by transport adapters.
//! - Translate request parameters into repository criteria queries.
//!
//! # Invariants
//! - The service owns exactly one repository, injected at construction.
//! - "Not found" stays `Ok(None)`; only invalid input becomes an error.

use crate::model::book::Book;
use crate::model::entity::EntityId;
use crate::repo::entity_repo::{effective_limit, EntityRepository, RepoError, UNBOUNDED_LIMIT};
use log::debug;
use std::collections::HashMap;
use thiserror::Error;

/// Request parameter holding the criteria string.
pub const CRITERIA_PARAM: &str = "criteria";
/// Request parameter holding the maximum number of results.
pub const LIMIT_PARAM: &str = "limit";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for book use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// `limit` parameter is not a non-negative integer.
    #[error("limit must be a non-negative integer, got `{0}`")]
    InvalidLimit(String),
    /// Repository rejected the request.
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ServiceError {
    /// Returns whether the error was caused by malformed caller input.
    ///
    /// Every current variant is a caller error; transport layers use this to
    /// pick a "bad request" outcome, distinct from the `None` "not found" result.
    pub fn is_bad_request(&self) -> bool {
        match self {
            Self::InvalidLimit(_) => true,
            Self::Repo(RepoError::InvalidId(_)) => true,
        }
    }
}

/// Use-case service wrapper for book CRUD operations.
#[derive(Debug)]
pub struct BookService<R: EntityRepository<Book>> {
    repo: R,
}

impl<R: EntityRepository<Book>> BookService<R> {
    /// Creates a service owning the provided repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read access to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn get_all_entities(&self) -> Vec<Book> {
        self.repo.get_all_entities()
    }

    /// Queries books from request parameters.
    ///
    /// # Contract
    /// - `criteria` is passed to the repository matcher unchanged.
    /// - Missing `criteria` returns the first `limit` books of a full scan.
    /// - Missing `limit` means unbounded.
    pub fn get_entities_by_criteria(
        &self,
        params: &HashMap<String, String>,
    ) -> ServiceResult<Vec<Book>> {
        let limit = parse_limit(params.get(LIMIT_PARAM).map(String::as_str))?;

        let books = match params.get(CRITERIA_PARAM) {
            Some(criteria) => self.repo.get_entities_by_criteria(criteria, limit),
            None => {
                debug!("event=book_query module=service status=no_criteria limit={limit}");
                self.repo
                    .get_all_entities()
                    .into_iter()
                    .take(effective_limit(limit))
                    .collect()
            }
        };
        Ok(books)
    }

    pub fn get_entity_by_id(&self, id: EntityId) -> ServiceResult<Option<Book>> {
        Ok(self.repo.get_entity_by_id(id)?)
    }

    /// Stores a new book. Any id carried by `book` is replaced.
    pub fn add_entity(&mut self, book: Book) -> Book {
        self.repo.add_entity(book)
    }

    /// Replaces the fields of the book stored under `id`.
    pub fn edit_entity_by_id(&mut self, id: EntityId, book: Book) -> ServiceResult<Option<Book>> {
        Ok(self.repo.edit_entity(id, book)?)
    }

    pub fn delete_entity_by_id(&mut self, id: EntityId) -> ServiceResult<Option<Book>> {
        Ok(self.repo.delete_entity_by_id(id)?)
    }
}

fn parse_limit(raw: Option<&str>) -> ServiceResult<u64> {
    let Some(raw) = raw else {
        return Ok(UNBOUNDED_LIMIT);
    };
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ServiceError::InvalidLimit(raw.to_string()))
}
