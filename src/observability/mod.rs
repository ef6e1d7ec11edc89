//! Observability for the Hundred backend
//!
//! Structured JSON-lines logging. Observability is read-only and never
//! changes the outcome of a request.
//!
//! ```ignore
//! use hundred::observability::Logger;
//!
//! Logger::info("PERSON_CREATED", &[("id", "5f0c...")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};

/// Truncate a message to at most `max_chars` characters.
///
/// Used wherever store errors are surfaced to clients.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    match message.char_indices().nth(max_chars) {
        Some((idx, _)) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
