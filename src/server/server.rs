use anyhow::{Context, Result};
use tracing::{error, info};

use axum::{
    extract::{Path, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::services::{ServeDir, ServeFile};

use super::responses::{
    internal_error, AlbumResponse, GalleryResponse, SongResponse, TrackResponse,
};
use super::{log_requests, make_search_routes, state::*, ServerConfig};

const PREFIX_ARTIST: &str = "Artist";
const PREFIX_ALBUM: &str = "Album";
const PREFIX_TRACK: &str = "Track";

/// Ids come straight from the path, anything that is not an integer is
/// treated as an id that matches nothing.
fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

async fn get_all_artists(State(catalog_store): State<GuardedCatalogStore>) -> Response {
    match catalog_store.search_artists("") {
        Ok(artists) => Json(GalleryResponse::new(PREFIX_ARTIST, artists)).into_response(),
        Err(err) => internal_error(err),
    }
}

/// Drilling into an artist lists its albums, hence the album prefix.
async fn get_artist_albums(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    let albums = match parse_id(&id) {
        Some(artist_id) => catalog_store.get_artist_albums(artist_id),
        None => Ok(vec![]),
    };
    match albums {
        Ok(albums) => Json(GalleryResponse::new(PREFIX_ALBUM, albums)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_all_albums(State(catalog_store): State<GuardedCatalogStore>) -> Response {
    match catalog_store.search_albums("") {
        Ok(albums) => Json(GalleryResponse::new(PREFIX_ALBUM, albums)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_album(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    let tracks = match parse_id(&id) {
        Some(album_id) => catalog_store.get_album_tracks(album_id),
        None => Ok(vec![]),
    };
    match tracks {
        Ok(tracks) => Json(AlbumResponse::new(tracks)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_all_tracks(State(catalog_store): State<GuardedCatalogStore>) -> Response {
    match catalog_store.search_tracks("") {
        Ok(tracks) => Json(GalleryResponse::new(PREFIX_TRACK, tracks)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_track(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    let detail = match parse_id(&id) {
        Some(track_id) => catalog_store.get_track_detail(track_id),
        None => Ok(None),
    };
    match detail {
        Ok(detail) => Json(TrackResponse::new(detail)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_song(
    State(catalog_store): State<GuardedCatalogStore>,
    Path(id): Path<String>,
) -> Response {
    let song = match parse_id(&id) {
        Some(track_id) => catalog_store.get_song_info(track_id),
        None => Ok(None),
    };
    match song {
        Ok(song) => Json(SongResponse { song }).into_response(),
        Err(err) => internal_error(err),
    }
}

pub fn make_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Router {
    let state = ServerState::new(config.clone(), catalog_store);

    let content_routes: Router = Router::new()
        .route("/artist", get(get_all_artists))
        .route("/artist/", get(get_all_artists))
        .route("/artist/{id}", get(get_artist_albums))
        .route("/album", get(get_all_albums))
        .route("/album/", get(get_all_albums))
        .route("/album/{id}", get(get_album))
        .route("/track", get(get_all_tracks))
        .route("/track/", get(get_all_tracks))
        .route("/track/{id}", get(get_track))
        .route("/song/{id}", get(get_song))
        .with_state(state.clone());

    Router::new()
        .route_service("/", ServeFile::new(config.shell_page_path()))
        .nest_service("/assets", ServeDir::new(&config.assets_dir))
        .merge(content_routes)
        .merge(make_search_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, log_requests))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Could not listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}

pub async fn run_server(catalog_store: GuardedCatalogStore, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog_store);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Could not bind port {}", port))?;
    info!("Ready to serve at port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
