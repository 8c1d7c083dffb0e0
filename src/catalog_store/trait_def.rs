//! CatalogStore trait definition.
//!
//! The web layer only talks to the catalog through this trait, the concrete
//! store is injected into the router state at startup.

use super::models::{AlbumTrack, GalleryItem, SongInfo, TrackDetail};
use anyhow::Result;

/// Read-only queries over the loaded catalog.
///
/// Name searches match the query anywhere in the name and order results by
/// name. An empty query matches everything. Unknown ids produce empty lists
/// or `None`, never an error.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Galleries
    // =========================================================================

    /// Artists whose name contains `query`, as (id, name, image).
    fn search_artists(&self, query: &str) -> Result<Vec<GalleryItem>>;

    /// Albums of the given artist, as (id, name, image), ordered by name.
    fn get_artist_albums(&self, artist_id: i64) -> Result<Vec<GalleryItem>>;

    /// Albums whose name contains `query`, as (id, name, image).
    fn search_albums(&self, query: &str) -> Result<Vec<GalleryItem>>;

    /// Tracks whose name contains `query`, as (id, name, album image).
    fn search_tracks(&self, query: &str) -> Result<Vec<GalleryItem>>;

    // =========================================================================
    // Details
    // =========================================================================

    /// Tracks of the given album ordered by track number.
    fn get_album_tracks(&self, album_id: i64) -> Result<Vec<AlbumTrack>>;

    /// A track joined with its album and artist.
    fn get_track_detail(&self, track_id: i64) -> Result<Option<TrackDetail>>;

    /// Playback-oriented view of [`CatalogStore::get_track_detail`].
    fn get_song_info(&self, track_id: i64) -> Result<Option<SongInfo>> {
        Ok(self.get_track_detail(track_id)?.map(SongInfo::from))
    }

    // =========================================================================
    // Counts
    // =========================================================================

    fn get_artists_count(&self) -> usize;

    fn get_albums_count(&self) -> usize;

    fn get_tracks_count(&self) -> usize;
}
