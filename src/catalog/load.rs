use super::source::{parse_source_document, SourceArtist};
use crate::catalog_store::{AlbumRow, ArtistRow, CatalogRows, SqliteCatalogStore, TrackRow};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read catalog source {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog source {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Catalog source {path:?} has no artists")]
    Empty { path: PathBuf },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
}

pub fn read_source_document(path: &Path) -> Result<Vec<SourceArtist>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let artists = parse_source_document(&text).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })?;
    if artists.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_owned(),
        });
    }
    Ok(artists)
}

/// Flattens the document into rows.
///
/// Artist, album and track ids are independent counters starting at 1,
/// assigned depth-first in document order. Track numbers restart at 1 for
/// every album.
pub fn assign_ids(artists: &[SourceArtist]) -> CatalogRows {
    let mut rows = CatalogRows::default();
    let mut album_id = 1;
    let mut track_id = 1;

    for (artist_id, artist) in (1..).zip(artists) {
        rows.artists.push(ArtistRow {
            id: artist_id,
            name: artist.name.clone(),
            image: artist.image.clone(),
        });

        for album in &artist.albums {
            rows.albums.push(AlbumRow {
                id: album_id,
                artist_id,
                name: album.name.clone(),
                image: album.image.clone(),
            });

            for (number, track_name) in (1..).zip(&album.tracks) {
                rows.tracks.push(TrackRow {
                    id: track_id,
                    album_id,
                    number,
                    name: track_name.clone(),
                });
                track_id += 1;
            }
            album_id += 1;
        }
    }
    rows
}

/// Reads the source document and upserts its content into the store.
///
/// Nothing is committed when any row fails, so a failed load leaves the
/// store as it was.
pub fn load_catalog<P: AsRef<Path>>(
    store: &SqliteCatalogStore,
    source_path: P,
) -> Result<LoadSummary, LoadError> {
    let source_path = source_path.as_ref();
    info!("Loading catalog from {:?}...", source_path);

    let artists = read_source_document(source_path)?;
    let rows = assign_ids(&artists);
    store.upsert_rows(&rows)?;

    let summary = LoadSummary {
        artists: rows.artists.len(),
        albums: rows.albums.len(),
        tracks: rows.tracks.len(),
    };
    info!(
        "Catalog loaded: {} artists, {} albums, {} tracks",
        summary.artists, summary.albums, summary.tracks
    );
    Ok(summary)
}

/// Loads the source document unless `reload` is off and the store already
/// has data. Returns `None` when the import was skipped.
pub fn prepare_catalog<P: AsRef<Path>>(
    store: &SqliteCatalogStore,
    source_path: P,
    reload: bool,
) -> Result<Option<LoadSummary>, LoadError> {
    if !reload && !store.is_empty()? {
        info!("Catalog already populated, skipping import");
        return Ok(None);
    }
    load_catalog(store, source_path).map(Some)
}
