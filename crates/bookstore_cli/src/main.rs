//! Bookstore test-stand CLI.
//!
//! # Responsibility
//! - Seed an in-memory catalog and run one repository use-case per invocation.
//! - Print results as JSON so runs can be diffed and scripted.
//!
//! # Invariants
//! - Absent results print `null`, never an error.
//! - Invalid ids or limits exit with status 2; other failures exit with 1.

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use bookstore_core::{
    core_version, default_log_level, flush_logging, init_logging, Book, BookService, EntityId,
    EntityRepository, InMemoryBookRepository, LogSettings, ServiceError, CRITERIA_PARAM,
    LIMIT_PARAM, LOG_DIR_ENV, LOG_LEVEL_ENV,
};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use std::collections::HashMap;
use std::process;

const EXIT_FAILURE: i32 = 1;
const EXIT_BAD_REQUEST: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about = "In-memory bookstore test stand")]
struct Cli {
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true, env = LOG_LEVEL_ENV)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = LOG_DIR_ENV)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the number of stored books.
    Count,
    /// Print every book in insertion order.
    List,
    /// Print one book by id.
    Get {
        #[arg(allow_negative_numbers = true)]
        id: EntityId,
    },
    /// Print books matching a criteria (author, category, title or integer price).
    Search {
        criteria: Option<String>,
        /// Maximum number of results; unbounded when omitted.
        #[arg(long)]
        limit: Option<String>,
    },
    /// Add a book and print it with its assigned id.
    Add {
        #[command(flatten)]
        fields: BookFields,
    },
    /// Replace the fields of a stored book.
    Edit {
        #[arg(allow_negative_numbers = true)]
        id: EntityId,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Delete a book by id and print the removed book.
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: EntityId,
    },
}

#[derive(Debug, Args)]
struct BookFields {
    #[arg(long)]
    category: String,
    #[arg(long)]
    author: String,
    #[arg(long)]
    title: String,
    #[arg(long)]
    price: BigDecimal,
}

impl From<BookFields> for Book {
    fn from(fields: BookFields) -> Self {
        Book::new(fields.category, fields.author, fields.title, fields.price)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        // The stand stays usable without file logs.
        if let Err(err) = init_logging(&LogSettings::new(level, log_dir)) {
            eprintln!("warning: logging disabled: {err}");
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let mut service = BookService::new(seed_catalog());
    match run(cli.command, &mut service) {
        Ok(output) => {
            println!("{output}");
            flush_logging();
        }
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err:#}");
            eprintln!("Error: {err:#}");
            flush_logging();
            process::exit(exit_code(&err));
        }
    }
}

/// Maps a failed command to the process exit status.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ServiceError>() {
        Some(service_err) if service_err.is_bad_request() => EXIT_BAD_REQUEST,
        _ => EXIT_FAILURE,
    }
}

fn run(command: Command, service: &mut BookService<InMemoryBookRepository>) -> Result<String> {
    match command {
        Command::Count => to_json(&service.repository().count_of_entities()),
        Command::List => to_json(&service.get_all_entities()),
        Command::Get { id } => to_json(&service.get_entity_by_id(id)?),
        Command::Search { criteria, limit } => {
            let mut params = HashMap::new();
            if let Some(criteria) = criteria {
                params.insert(CRITERIA_PARAM.to_string(), criteria);
            }
            if let Some(limit) = limit {
                params.insert(LIMIT_PARAM.to_string(), limit);
            }
            to_json(&service.get_entities_by_criteria(&params)?)
        }
        Command::Add { fields } => to_json(&service.add_entity(fields.into())),
        Command::Edit { id, fields } => to_json(&service.edit_entity_by_id(id, fields.into())?),
        Command::Delete { id } => to_json(&service.delete_entity_by_id(id)?),
    }
}

/// Renders straight from the value so fields keep their declaration order.
fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize result")
}

/// Sample catalog the stand starts with on every run.
fn seed_catalog() -> InMemoryBookRepository {
    let mut repo = InMemoryBookRepository::with_book_matcher();
    let books = [
        ("category1", "author1", "title1"),
        ("repetitionCategory", "author2", "title2"),
        ("repetitionCategory", "author3", "title3"),
        ("category3", "author4", "title4"),
        ("category4", "author5", "title5"),
        ("category5", "repetitiveAuthor", "title6"),
        ("category6", "repetitiveAuthor", "title7"),
        ("category7", "repetitiveAuthor", "title8"),
    ];
    for (category, author, title) in books {
        repo.add_entity(Book::new(category, author, title, BigDecimal::from(1)));
    }
    repo
}

#[cfg(test)]
mod tests {
    use super::{exit_code, run, seed_catalog, BookFields, Cli, Command};
    use super::{EXIT_BAD_REQUEST, EXIT_FAILURE};
    use bigdecimal::BigDecimal;
    use bookstore_core::{BookService, InMemoryBookRepository, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use clap::CommandFactory;
    use std::ffi::OsStr;

    fn seeded_service() -> BookService<InMemoryBookRepository> {
        BookService::new(seed_catalog())
    }

    fn search(criteria: Option<&str>, limit: Option<&str>) -> Command {
        Command::Search {
            criteria: criteria.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn count_reports_the_seeded_catalog() {
        let output = run(Command::Count, &mut seeded_service()).unwrap();
        assert_eq!(output, "8");
    }

    #[test]
    fn get_of_absent_id_prints_null() {
        let output = run(Command::Get { id: 9 }, &mut seeded_service()).unwrap();
        assert_eq!(output, "null");
    }

    #[test]
    fn invalid_id_exits_with_bad_request_status() {
        let err = run(Command::Get { id: -1 }, &mut seeded_service()).unwrap_err();
        assert_eq!(exit_code(&err), EXIT_BAD_REQUEST);
        assert_eq!(err.to_string(), "Id must be greater than 0. Your id = -1");
    }

    #[test]
    fn invalid_limit_exits_with_bad_request_status() {
        let err = run(
            search(Some("repetitiveAuthor"), Some("x")),
            &mut seeded_service(),
        )
        .unwrap_err();
        assert_eq!(exit_code(&err), EXIT_BAD_REQUEST);
    }

    #[test]
    fn other_failures_exit_with_generic_status() {
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code(&err), EXIT_FAILURE);
    }

    #[test]
    fn search_prints_books_with_fields_in_declaration_order() {
        let output = run(
            search(Some("repetitiveAuthor"), Some("2")),
            &mut seeded_service(),
        )
        .unwrap();

        let books: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0]["id"], 6);
        assert_eq!(books[1]["id"], 7);

        let positions: Vec<usize> = ["id", "category", "author", "title", "price"]
            .iter()
            .map(|key| output.find(&format!("\"{key}\"")).unwrap())
            .collect();
        assert!(
            positions.windows(2).all(|pair| pair[0] < pair[1]),
            "unexpected field order: {output}"
        );
    }

    #[test]
    fn add_then_count_reflects_the_new_book() {
        let mut service = seeded_service();
        let fields = BookFields {
            category: "newCategory".to_string(),
            author: "newAuthor".to_string(),
            title: "newTitle".to_string(),
            price: BigDecimal::from(3),
        };

        let added = run(Command::Add { fields }, &mut service).unwrap();
        let added: serde_json::Value = serde_json::from_str(&added).unwrap();
        assert_eq!(added["id"], 9);
        assert_eq!(run(Command::Count, &mut service).unwrap(), "9");
    }

    #[test]
    fn delete_of_absent_id_prints_null_and_keeps_count() {
        let mut service = seeded_service();
        assert_eq!(run(Command::Delete { id: 42 }, &mut service).unwrap(), "null");
        assert_eq!(run(Command::Count, &mut service).unwrap(), "8");
    }

    #[test]
    fn log_flags_fall_back_to_environment_variables() {
        let command = Cli::command();
        let env_of = |name: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == name)
                .and_then(|arg| arg.get_env())
                .map(OsStr::to_os_string)
        };

        assert_eq!(env_of("log_level").as_deref(), Some(OsStr::new(LOG_LEVEL_ENV)));
        assert_eq!(env_of("log_dir").as_deref(), Some(OsStr::new(LOG_DIR_ENV)));
    }

    #[test]
    fn negative_ids_parse_so_the_guard_can_reject_them() {
        let cli = <Cli as clap::Parser>::try_parse_from(["bookstore", "delete", "-4"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { id: -4 }));
    }
}
