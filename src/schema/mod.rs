//! Person schema
//!
//! Defines the shape and defaults of a Person and rejects malformed input
//! before it reaches storage. Validation never normalizes values.

mod errors;
mod person;
mod types;

pub use errors::{FieldError, SchemaResult, ValidationError};
pub use person::{Person, PERSON_COLLECTION};
pub use types::{json_type_name, Tier};
