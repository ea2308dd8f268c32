//! Core domain logic for the bookstore test stand.
//!
//! Provides the `Book` model, a generic in-memory entity repository with
//! injected criteria matching, and the use-case service built on top of it.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LogSettings, LOG_DIR_ENV,
    LOG_LEVEL_ENV,
};
pub use model::book::Book;
pub use model::entity::{Entity, EntityId};
pub use repo::book_repo::{book_criteria_matcher, InMemoryBookRepository};
pub use repo::entity_repo::{validate_id, EntityRepository, RepoError, RepoResult, UNBOUNDED_LIMIT};
pub use repo::in_memory::{InMemoryRepository, MatcherFactory, Predicate};
pub use service::book_service::{
    BookService, ServiceError, ServiceResult, CRITERIA_PARAM, LIMIT_PARAM,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
