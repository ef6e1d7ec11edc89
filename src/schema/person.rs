//! The Person record
//!
//! A Person is built only through [`Person::from_json`],
//! so every value of this type has already passed validation:
//!
//! - `name` is present and non-empty
//! - `tier` is one of 1-4 (default 3)
//! - `avatar_url`, if present, is an absolute http(s) URL
//! - `tags` defaults to empty, `favorite` to false
//!
//! Values are never normalized. Unknown fields are dropped.

use serde_json::{Map, Value};
use url::Url;

use super::errors::{FieldError, SchemaResult, ValidationError};
use super::types::{json_type_name, Tier};

/// Collection holding Person documents
pub const PERSON_COLLECTION: &str = "person";

/// A validated person in a user's Hundred network
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// Full name
    pub name: String,
    /// Initials fallback if no avatar
    pub initials: Option<String>,
    /// URL to circular avatar image, kept exactly as supplied
    pub avatar_url: Option<String>,
    /// Hex color identity for the node (unvalidated)
    pub color: Option<String>,
    /// Short micro-bio
    pub bio: Option<String>,
    /// Closeness ring
    pub tier: Tier,
    /// Clusters such as Family, Friends, Work
    pub tags: Vec<String>,
    /// Starred person
    pub favorite: bool,
    /// Optional polar angle (degrees) for placement
    pub angle: Option<f64>,
}

impl Person {
    /// Validate an untrusted JSON payload and build a Person.
    ///
    /// All violations are collected before returning, so the error lists
    /// every bad field rather than only the first.
    pub fn from_json(payload: &Value) -> SchemaResult<Self> {
        let obj = payload.as_object().ok_or_else(|| {
            ValidationError::single(FieldError::type_mismatch(
                "$body",
                "object",
                json_type_name(payload),
            ))
        })?;

        let mut errors = Vec::new();

        let name = required_name(obj, &mut errors);
        let initials = optional_string(obj, "initials", &mut errors);
        let avatar_url = optional_avatar_url(obj, &mut errors);
        let color = optional_string(obj, "color", &mut errors);
        let bio = optional_string(obj, "bio", &mut errors);
        let tier = tier_or_default(obj, &mut errors);
        let tags = tags_or_default(obj, &mut errors);
        let favorite = favorite_or_default(obj, &mut errors);
        let angle = optional_angle(obj, &mut errors);

        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        Ok(Self {
            // Only None when an error was recorded above
            name: name.unwrap_or_default(),
            initials,
            avatar_url,
            color,
            bio,
            tier,
            tags,
            favorite,
            angle,
        })
    }

    /// Document handed to the store: every field present, absent optionals as null.
    pub fn to_document(&self) -> Map<String, Value> {
        let mut doc = Map::new();
        doc.insert("name".into(), Value::from(self.name.clone()));
        doc.insert("initials".into(), Value::from(self.initials.clone()));
        doc.insert("avatar_url".into(), Value::from(self.avatar_url.clone()));
        doc.insert("color".into(), Value::from(self.color.clone()));
        doc.insert("bio".into(), Value::from(self.bio.clone()));
        doc.insert("tier".into(), Value::from(self.tier.value()));
        doc.insert("tags".into(), Value::from(self.tags.clone()));
        doc.insert("favorite".into(), Value::from(self.favorite));
        doc.insert("angle".into(), Value::from(self.angle));
        doc
    }
}

fn required_name(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    match obj.get("name") {
        None => {
            errors.push(FieldError::missing_field("name"));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(FieldError::new("name", "must not be empty"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::type_mismatch("name", "string", json_type_name(other)));
            None
        }
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::type_mismatch(field, "string", json_type_name(other)));
            None
        }
    }
}

fn optional_avatar_url(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<String> {
    let raw = optional_string(obj, "avatar_url", errors)?;
    match check_http_url(&raw) {
        Ok(()) => Some(raw),
        Err(reason) => {
            errors.push(FieldError::new("avatar_url", reason));
            None
        }
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("URL scheme must be http or https, got '{}'", other)),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("URL must include a host".to_string());
    }
    Ok(())
}

fn tier_or_default(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Tier {
    match obj.get("tier") {
        None => Tier::default(),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => {
            match n.as_i64().and_then(Tier::from_value) {
                Some(tier) => tier,
                None => {
                    errors.push(FieldError::new(
                        "tier",
                        format!("must be one of 1, 2, 3, 4, got {}", n),
                    ));
                    Tier::default()
                }
            }
        }
        Some(other) => {
            errors.push(FieldError::type_mismatch("tier", "int", json_type_name(other)));
            Tier::default()
        }
    }
}

fn tags_or_default(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Vec<String> {
    let items = match obj.get("tags") {
        None => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            errors.push(FieldError::type_mismatch("tags", "array", json_type_name(other)));
            return Vec::new();
        }
    };

    let mut tags = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => tags.push(s.clone()),
            other => errors.push(FieldError::type_mismatch(
                format!("tags[{}]", i),
                "string",
                json_type_name(other),
            )),
        }
    }
    tags
}

fn favorite_or_default(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> bool {
    match obj.get("favorite") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            errors.push(FieldError::type_mismatch("favorite", "bool", json_type_name(other)));
            false
        }
    }
}

fn optional_angle(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<f64> {
    match obj.get("angle") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(other) => {
            errors.push(FieldError::type_mismatch("angle", "float", json_type_name(other)));
            None
        }
    }
}
