//! SQLite-backed catalog store.
//!
//! The catalog is written once at startup by the loader and only read
//! afterwards. Writes go through a single connection, reads are spread over a
//! small pool of read-only connections.

use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

pub const DEFAULT_READ_POOL_SIZE: usize = 4;

const SEARCH_ARTISTS_SQL: &str = "SELECT id, name, image FROM artists
     WHERE name LIKE ?1 ESCAPE '\\'
     ORDER BY name, id";

const ARTIST_ALBUMS_SQL: &str = "SELECT id, name, image FROM albums
     WHERE artist_id = ?1
     ORDER BY name, id";

const SEARCH_ALBUMS_SQL: &str = "SELECT id, name, image FROM albums
     WHERE name LIKE ?1 ESCAPE '\\'
     ORDER BY name, id";

const SEARCH_TRACKS_SQL: &str = "SELECT tracks.id, tracks.name, albums.image
     FROM tracks
     JOIN albums ON tracks.album_id = albums.id
     WHERE tracks.name LIKE ?1 ESCAPE '\\'
     ORDER BY tracks.name, tracks.id";

const ALBUM_TRACKS_SQL: &str = "SELECT id, number, name FROM tracks
     WHERE album_id = ?1
     ORDER BY number";

const TRACK_DETAIL_SQL: &str = "SELECT tracks.id, artists.id, artists.name, albums.id, albums.name,
            tracks.number, tracks.name, albums.image
     FROM tracks
     JOIN albums ON albums.id = tracks.album_id
     JOIN artists ON artists.id = albums.artist_id
     WHERE tracks.id = ?1";

const UPSERT_ARTIST_SQL: &str = "INSERT INTO artists (id, name, image) VALUES (?1, ?2, ?3)
     ON CONFLICT(id) DO UPDATE SET name = excluded.name, image = excluded.image";

const UPSERT_ALBUM_SQL: &str = "INSERT INTO albums (id, artist_id, name, image) VALUES (?1, ?2, ?3, ?4)
     ON CONFLICT(id) DO UPDATE SET artist_id = excluded.artist_id, name = excluded.name, image = excluded.image";

const UPSERT_TRACK_SQL: &str = "INSERT INTO tracks (id, album_id, number, name) VALUES (?1, ?2, ?3, ?4)
     ON CONFLICT(id) DO UPDATE SET album_id = excluded.album_id, number = excluded.number, name = excluded.name";

const PRUNE_TRACKS_SQL: &str = "DELETE FROM tracks WHERE id > ?1";
const PRUNE_ALBUMS_SQL: &str = "DELETE FROM albums WHERE id > ?1";
const PRUNE_ARTISTS_SQL: &str = "DELETE FROM artists WHERE id > ?1";

/// Turns a user query into a LIKE pattern matching it literally anywhere in
/// the value.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct SqliteCatalogStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

impl SqliteCatalogStore {
    /// Opens (or creates) the catalog database at `db_path`.
    ///
    /// A fresh database gets the latest schema, an existing one must match it.
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();

        let write_conn = Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database {:?}", db_path))?;

        CATALOG_VERSIONED_SCHEMAS[CATALOG_VERSIONED_SCHEMAS.len() - 1]
            .create_or_validate(&write_conn)
            .with_context(|| format!("Invalid catalog database {:?}", db_path))?;

        write_conn.pragma_update(None, "foreign_keys", true)?;
        write_conn.pragma_update(None, "journal_mode", "WAL")?;

        let mut read_pool = Vec::with_capacity(read_pool_size.max(1));
        for _ in 0..read_pool_size.max(1) {
            let read_conn = Connection::open_with_flags(
                db_path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        let store = SqliteCatalogStore {
            read_pool,
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_index: Arc::new(AtomicUsize::new(0)),
        };

        info!(
            "Opened catalog {:?}: {} artists, {} albums, {} tracks",
            db_path,
            store.get_artists_count(),
            store.get_albums_count(),
            store.get_tracks_count()
        );

        Ok(store)
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn count(&self, table: &str) -> usize {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get::<_, i64>(0)
        })
        .unwrap_or(0) as usize
    }

    pub fn is_empty(&self) -> Result<bool> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let artists: i64 = conn
            .query_row("SELECT COUNT(*) FROM artists", [], |r| r.get(0))
            .context("Failed to count artists")?;
        Ok(artists == 0)
    }

    fn parse_gallery_row(row: &Row) -> rusqlite::Result<GalleryItem> {
        Ok(GalleryItem {
            id: row.get(0)?,
            name: row.get(1)?,
            image: row.get(2)?,
        })
    }

    fn parse_track_detail_row(row: &Row) -> rusqlite::Result<TrackDetail> {
        Ok(TrackDetail {
            track_id: row.get(0)?,
            artist_id: row.get(1)?,
            artist_name: row.get(2)?,
            album_id: row.get(3)?,
            album_name: row.get(4)?,
            track_number: row.get(5)?,
            track_name: row.get(6)?,
            album_image: row.get(7)?,
        })
    }

    fn query_gallery(&self, sql: &str, param: &dyn rusqlite::ToSql) -> Result<Vec<GalleryItem>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(sql)?;
        let items = stmt
            .query_map(params![param], Self::parse_gallery_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Upserts all rows by primary key in a single transaction, then deletes
    /// rows whose id lies past the highest one given, so the store ends up
    /// holding exactly `rows`.
    ///
    /// Rows must be ordered parents first, as produced by the loader.
    pub fn upsert_rows(&self, rows: &CatalogRows) -> Result<()> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(UPSERT_ARTIST_SQL)?;
            for artist in &rows.artists {
                stmt.execute(params![artist.id, artist.name, artist.image])
                    .with_context(|| format!("Failed to upsert artist {}", artist.id))?;
                debug!("Added Artist: id={}, name={}", artist.id, artist.name);
            }

            let mut stmt = tx.prepare_cached(UPSERT_ALBUM_SQL)?;
            for album in &rows.albums {
                stmt.execute(params![album.id, album.artist_id, album.name, album.image])
                    .with_context(|| format!("Failed to upsert album {}", album.id))?;
                debug!("Added Album: id={}, name={}", album.id, album.name);
            }

            let mut stmt = tx.prepare_cached(UPSERT_TRACK_SQL)?;
            for track in &rows.tracks {
                stmt.execute(params![track.id, track.album_id, track.number, track.name])
                    .with_context(|| format!("Failed to upsert track {}", track.id))?;
                debug!("Added Track: id={}, name={}", track.id, track.name);
            }

            let last_track_id = rows.tracks.iter().map(|t| t.id).max().unwrap_or(0);
            let last_album_id = rows.albums.iter().map(|a| a.id).max().unwrap_or(0);
            let last_artist_id = rows.artists.iter().map(|a| a.id).max().unwrap_or(0);
            let pruned = tx.execute(PRUNE_TRACKS_SQL, params![last_track_id])?
                + tx.execute(PRUNE_ALBUMS_SQL, params![last_album_id])?
                + tx.execute(PRUNE_ARTISTS_SQL, params![last_artist_id])?;
            if pruned > 0 {
                info!("Removed {} stale catalog rows", pruned);
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn search_artists(&self, query: &str) -> Result<Vec<GalleryItem>> {
        self.query_gallery(SEARCH_ARTISTS_SQL, &like_pattern(query))
    }

    fn get_artist_albums(&self, artist_id: i64) -> Result<Vec<GalleryItem>> {
        self.query_gallery(ARTIST_ALBUMS_SQL, &artist_id)
    }

    fn search_albums(&self, query: &str) -> Result<Vec<GalleryItem>> {
        self.query_gallery(SEARCH_ALBUMS_SQL, &like_pattern(query))
    }

    fn search_tracks(&self, query: &str) -> Result<Vec<GalleryItem>> {
        self.query_gallery(SEARCH_TRACKS_SQL, &like_pattern(query))
    }

    fn get_album_tracks(&self, album_id: i64) -> Result<Vec<AlbumTrack>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(ALBUM_TRACKS_SQL)?;
        let tracks = stmt
            .query_map(params![album_id], |row| {
                Ok(AlbumTrack {
                    id: row.get(0)?,
                    number: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tracks)
    }

    fn get_track_detail(&self, track_id: i64) -> Result<Option<TrackDetail>> {
        let read_conn = self.get_read_conn();
        let conn = read_conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(TRACK_DETAIL_SQL)?;
        match stmt.query_row(params![track_id], Self::parse_track_detail_row) {
            Ok(detail) => Ok(Some(detail)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_artists_count(&self) -> usize {
        self.count("artists")
    }

    fn get_albums_count(&self) -> usize {
        self.count("albums")
    }

    fn get_tracks_count(&self) -> usize {
        self.count("tracks")
    }
}
