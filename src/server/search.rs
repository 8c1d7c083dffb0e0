//! Search API routes

use crate::catalog_store::{CatalogStore, GalleryItem};

use anyhow::Result;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::str::FromStr;

use super::responses::{internal_error, GalleryResponse};
use super::state::{GuardedCatalogStore, ServerState};

/// Which entity a search looks into, named after the `table` query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTable {
    Artists,
    Albums,
    Tracks,
}

impl FromStr for SearchTable {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Artists" => Ok(SearchTable::Artists),
            "Albums" => Ok(SearchTable::Albums),
            "Tracks" => Ok(SearchTable::Tracks),
            _ => Err(()),
        }
    }
}

impl SearchTable {
    pub fn search(self, catalog_store: &dyn CatalogStore, query: &str) -> Result<Vec<GalleryItem>> {
        match self {
            SearchTable::Artists => catalog_store.search_artists(query),
            SearchTable::Albums => catalog_store.search_albums(query),
            SearchTable::Tracks => catalog_store.search_tracks(query),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct SearchParams {
    query: String,
    table: String,
}

/// The table name minus its last character, "Tracks" -> "Track".
fn singular_prefix(table: &str) -> &str {
    let mut chars = table.chars();
    chars.next_back();
    chars.as_str()
}

async fn search(
    State(catalog_store): State<GuardedCatalogStore>,
    Query(params): Query<SearchParams>,
) -> Response {
    let results = match params.table.parse::<SearchTable>() {
        Ok(table) => table.search(catalog_store.as_ref(), &params.query),
        Err(_) => Ok(vec![]),
    };

    match results {
        Ok(results) => {
            Json(GalleryResponse::new(singular_prefix(&params.table), results)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub fn make_search_routes(state: ServerState) -> Router {
    Router::new()
        .route("/search", get(search))
        .with_state(state)
}
