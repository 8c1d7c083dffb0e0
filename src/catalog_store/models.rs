//! Row records returned by the catalog queries.
//!
//! The browser client reads rows positionally, so every row record serializes
//! as a JSON array with its columns in declaration order. Only [`SongInfo`]
//! is a named object.

use serde::ser::{Serialize, SerializeTuple, Serializer};

pub const SONG_URL_PREFIX: &str = "/assets/mp3/";
pub const SONG_URL_EXTENSION: &str = "mp3";

/// Location of the playable file of a track, e.g. `/assets/mp3/0007.mp3`.
pub fn song_url(track_id: i64) -> String {
    format!("{}{:04}.{}", SONG_URL_PREFIX, track_id, SONG_URL_EXTENSION)
}

/// A thumbnail entry: artist, album, or track with its album's image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: i64,
    pub name: String,
    pub image: String,
}

/// One entry of an album's track listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumTrack {
    pub id: i64,
    pub number: i64,
    pub name: String,
}

/// A track joined with its album and artist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackDetail {
    pub track_id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub album_id: i64,
    pub album_name: String,
    pub track_number: i64,
    pub track_name: String,
    pub album_image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfo {
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    pub album_image: String,
    pub track_number: i64,
    #[serde(rename = "songURL")]
    pub song_url: String,
}

impl From<TrackDetail> for SongInfo {
    fn from(detail: TrackDetail) -> Self {
        SongInfo {
            song_url: song_url(detail.track_id),
            track_name: detail.track_name,
            artist_name: detail.artist_name,
            album_name: detail.album_name,
            album_image: detail.album_image,
            track_number: detail.track_number,
        }
    }
}

// =============================================================================
// Rows written at load time
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistRow {
    pub id: i64,
    pub name: String,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumRow {
    pub id: i64,
    pub artist_id: i64,
    pub name: String,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackRow {
    pub id: i64,
    pub album_id: i64,
    pub number: i64,
    pub name: String,
}

/// The whole catalog, parents before children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogRows {
    pub artists: Vec<ArtistRow>,
    pub albums: Vec<AlbumRow>,
    pub tracks: Vec<TrackRow>,
}

impl Serialize for GalleryItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_tuple(3)?;
        row.serialize_element(&self.id)?;
        row.serialize_element(&self.name)?;
        row.serialize_element(&self.image)?;
        row.end()
    }
}

impl Serialize for AlbumTrack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_tuple(3)?;
        row.serialize_element(&self.id)?;
        row.serialize_element(&self.number)?;
        row.serialize_element(&self.name)?;
        row.end()
    }
}

impl Serialize for TrackDetail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_tuple(8)?;
        row.serialize_element(&self.track_id)?;
        row.serialize_element(&self.artist_id)?;
        row.serialize_element(&self.artist_name)?;
        row.serialize_element(&self.album_id)?;
        row.serialize_element(&self.album_name)?;
        row.serialize_element(&self.track_number)?;
        row.serialize_element(&self.track_name)?;
        row.serialize_element(&self.album_image)?;
        row.end()
    }
}
