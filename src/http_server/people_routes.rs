//! People HTTP Routes
//!
//! - `POST /api/people` validates a Person and inserts it
//! - `GET /api/people?limit=&tier=` lists people, optionally by tier

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use super::state::AppState;
use crate::observability::Logger;
use crate::schema::{FieldError, Person, Tier, ValidationError, PERSON_COLLECTION};
use crate::store::EqualityFilter;

/// Listing size when `limit` is not given
pub const DEFAULT_LIST_LIMIT: usize = 100;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct CreatePersonResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ListPeopleResponse {
    pub people: Vec<Map<String, Value>>,
}

/// Parsed listing parameters.
///
/// Only `tier` may become a filter; every other query key is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPeopleParams {
    pub limit: usize,
    pub tier: Option<Tier>,
}

impl Default for ListPeopleParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            tier: None,
        }
    }
}

impl ListPeopleParams {
    /// Parse raw query values.
    ///
    /// Non-integer values are rejected. An integer `tier` outside 1-4 is
    /// dropped, so the listing falls back to unfiltered. Empty values count
    /// as absent.
    pub fn from_query(query: &HashMap<String, String>) -> ApiResult<Self> {
        let mut params = Self::default();

        if let Some(raw) = non_empty(query, "limit") {
            let limit: i64 = raw
                .parse()
                .map_err(|_| ApiError::InvalidQueryParam(format!("limit must be an integer, got {:?}", raw)))?;
            params.limit = usize::try_from(limit)
                .map_err(|_| ApiError::InvalidQueryParam(format!("limit must not be negative, got {}", limit)))?;
        }

        if let Some(raw) = non_empty(query, "tier") {
            let tier: i64 = raw
                .parse()
                .map_err(|_| ApiError::InvalidQueryParam(format!("tier must be an integer, got {:?}", raw)))?;
            params.tier = Tier::from_value(tier);
        }

        Ok(params)
    }

    /// Equality filter for the store; empty when no valid tier was given
    pub fn filter(&self) -> EqualityFilter {
        match self.tier {
            Some(tier) => EqualityFilter::new().and_eq("tier", tier.value()),
            None => EqualityFilter::new(),
        }
    }
}

fn non_empty<'a>(query: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    query.get(key).map(String::as_str).filter(|s| !s.is_empty())
}

// ==================
// People Routes
// ==================

/// Create people routes
pub fn people_routes(state: AppState) -> Router {
    Router::new()
        .route("/people", get(list_people_handler).post(create_person_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_person_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<CreatePersonResponse>> {
    let Json(payload) = body.map_err(|rejection| {
        ValidationError::single(FieldError::new("$body", rejection.body_text()))
    })?;

    let person = Person::from_json(&payload).map_err(|e| {
        Logger::warn("PERSON_REJECTED", &[("reason", &e.to_string())]);
        e
    })?;
    let tier = person.tier.to_string();
    let document = person.to_document();

    let id = state
        .with_store(move |store| store.insert(PERSON_COLLECTION, document))
        .await?
        .to_string();

    Logger::info("PERSON_CREATED", &[("id", &id), ("tier", &tier)]);
    Ok(Json(CreatePersonResponse { id }))
}

async fn list_people_handler(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListPeopleResponse>> {
    let params = ListPeopleParams::from_query(&query)?;
    let filter = params.filter();
    let limit = params.limit;

    let documents = state
        .with_store(move |store| store.query(PERSON_COLLECTION, &filter, limit))
        .await?;

    let people = documents.into_iter().map(|doc| doc.into_public()).collect();
    Ok(Json(ListPeopleResponse { people }))
}
