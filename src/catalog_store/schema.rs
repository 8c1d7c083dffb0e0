//! SQLite schema definitions for the catalog database.
//!
//! Primary keys are the integer ids assigned at load time, so they double as
//! the public ids used in URLs and song file names.

use crate::sqlite_column;
use crate::sqlite_persistence::{ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema};

pub const TABLE_ARTISTS: &str = "artists";
pub const TABLE_ALBUMS: &str = "albums";
pub const TABLE_TRACKS: &str = "tracks";

const ARTISTS_TABLE: Table = Table {
    name: TABLE_ARTISTS,
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("image", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_artists_name", "name")],
};

const ALBUMS_TABLE: Table = Table {
    name: TABLE_ALBUMS,
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: TABLE_ARTISTS,
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::NoAction,
            })
        ),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("image", &SqlType::Text, non_null = true),
    ],
    indices: &[
        ("idx_albums_artist", "artist_id"),
        ("idx_albums_name", "name"),
    ],
};

const TRACKS_TABLE: Table = Table {
    name: TABLE_TRACKS,
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: TABLE_ALBUMS,
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::NoAction,
            })
        ),
        sqlite_column!("number", &SqlType::Integer, non_null = true), // 1-based position in album
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    indices: &[
        ("idx_tracks_album", "album_id"),
        ("idx_tracks_name", "name"),
    ],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[ARTISTS_TABLE, ALBUMS_TABLE, TRACKS_TABLE],
}];
