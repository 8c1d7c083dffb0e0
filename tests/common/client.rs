//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per catalog-server endpoint.
//! When API routes change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap_or_else(|err| panic!("GET {} failed: {}", path, err))
    }

    // ========================================================================
    // Page Shell & Assets
    // ========================================================================

    /// GET /
    pub async fn get_shell(&self) -> Response {
        self.get("/").await
    }

    /// GET /assets/{path}
    pub async fn get_asset(&self, path: &str) -> Response {
        self.get(&format!("/assets/{}", path)).await
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// GET /search?table={table}&query={query}
    pub async fn search(&self, table: &str, query: &str) -> Response {
        self.client
            .get(format!("{}/search", self.base_url))
            .query(&[("table", table), ("query", query)])
            .send()
            .await
            .expect("Search request failed")
    }

    // ========================================================================
    // Browse
    // ========================================================================

    /// GET /artist/
    pub async fn get_artists(&self) -> Response {
        self.get("/artist/").await
    }

    /// GET /artist/{id}
    pub async fn get_artist(&self, id: &str) -> Response {
        self.get(&format!("/artist/{}", id)).await
    }

    /// GET /album/
    pub async fn get_albums(&self) -> Response {
        self.get("/album/").await
    }

    /// GET /album/{id}
    pub async fn get_album(&self, id: &str) -> Response {
        self.get(&format!("/album/{}", id)).await
    }

    /// GET /track/
    pub async fn get_tracks(&self) -> Response {
        self.get("/track/").await
    }

    /// GET /track/{id}
    pub async fn get_track(&self, id: &str) -> Response {
        self.get(&format!("/track/{}", id)).await
    }

    /// GET /song/{id}
    pub async fn get_song(&self, id: &str) -> Response {
        self.get(&format!("/song/{}", id)).await
    }

    /// GET with an arbitrary path, for route variants
    pub async fn get_path(&self, path: &str) -> Response {
        self.get(path).await
    }
}
