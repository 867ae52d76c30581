use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::{Catalog, Item};

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    All,
    Any,
    /// The whole text as one keyword prefix, spaces included.
    Keyword,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    #[serde(default)]
    pub mode: MatchMode,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ItemsResponse {
    pub count: usize,
    pub items: Vec<Item>,
}

pub async fn search(
    State(catalog): State<Arc<Catalog>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ItemsResponse>, (StatusCode, String)> {
    let query = params
        .query
        .ok_or((StatusCode::BAD_REQUEST, "missing query parameter".to_string()))?;
    info!("query: {:?} ({:?})", query, params.mode);

    let started = Instant::now();
    let items = match params.mode {
        MatchMode::All => catalog.query_all(&query),
        MatchMode::Any => catalog.query_any(&query),
        MatchMode::Keyword => catalog.query_keyword(&query),
    };
    info!(
        "{} matches in {} ms",
        items.len(),
        started.elapsed().as_millis()
    );

    Ok(Json(ItemsResponse {
        count: items.len(),
        items,
    }))
}
