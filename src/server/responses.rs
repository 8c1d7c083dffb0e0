//! JSON envelopes the browser client renders.

use crate::catalog_store::{AlbumTrack, GalleryItem, SongInfo, TrackDetail};
use axum::{http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;
use tracing::error;

pub const RENDER_GALLERY: &str = "gallery";
pub const RENDER_ALBUM: &str = "album";
pub const RENDER_TRACK: &str = "track";

/// `{render: "gallery", prefix, results: [[id, name, image], ...]}`
#[derive(Serialize, Debug)]
pub struct GalleryResponse<'a> {
    pub render: &'static str,
    pub prefix: &'a str,
    pub results: Vec<GalleryItem>,
}

impl<'a> GalleryResponse<'a> {
    pub fn new(prefix: &'a str, results: Vec<GalleryItem>) -> Self {
        GalleryResponse {
            render: RENDER_GALLERY,
            prefix,
            results,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct AlbumResponse {
    pub render: &'static str,
    pub results: Vec<AlbumTrack>,
}

impl AlbumResponse {
    pub fn new(results: Vec<AlbumTrack>) -> Self {
        AlbumResponse {
            render: RENDER_ALBUM,
            results,
        }
    }
}

/// `results` is `null` for an unknown track.
#[derive(Serialize, Debug)]
pub struct TrackResponse {
    pub render: &'static str,
    pub results: Option<TrackDetail>,
}

impl TrackResponse {
    pub fn new(results: Option<TrackDetail>) -> Self {
        TrackResponse {
            render: RENDER_TRACK,
            results,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct SongResponse {
    pub song: Option<SongInfo>,
}

pub fn internal_error(err: anyhow::Error) -> Response {
    error!("Catalog query failed: {:#}", err);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
