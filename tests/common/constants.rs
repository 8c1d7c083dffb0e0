//! Shared constants for end-to-end tests
//!
//! When the fixture document changes, update only this file.

// ============================================================================
// Test Catalog IDs
// ============================================================================

/// "The Test Band", first in the document
pub const ARTIST_1_ID: &str = "1";

/// "Jazz Ensemble"
pub const ARTIST_2_ID: &str = "2";

/// "First Album" by The Test Band, 3 tracks
pub const ALBUM_1_ID: &str = "1";

/// "Jazz Collection" by Jazz Ensemble, 2 tracks
pub const ALBUM_2_ID: &str = "2";

/// "Opening Track", track 1 of First Album
pub const TRACK_1_ID: &str = "1";

/// "Smooth Jazz", track 1 of Jazz Collection
pub const TRACK_4_ID: &str = "4";

/// Not present in the fixture document
pub const UNKNOWN_ID: &str = "999";

// ============================================================================
// Test Catalog Names
// ============================================================================

pub const ARTIST_1_NAME: &str = "The Test Band";
pub const ARTIST_2_NAME: &str = "Jazz Ensemble";

pub const ALBUM_1_TITLE: &str = "First Album";
pub const ALBUM_2_TITLE: &str = "Jazz Collection";

pub const TRACK_1_TITLE: &str = "Opening Track";
pub const TRACK_2_TITLE: &str = "Middle Track";
pub const TRACK_3_TITLE: &str = "Closing Track";
pub const TRACK_4_TITLE: &str = "Smooth Jazz";
pub const TRACK_5_TITLE: &str = "Upbeat Jazz";

pub const ARTIST_1_IMAGE: &str = "assets/img/test_band.jpg";
pub const ARTIST_2_IMAGE: &str = "assets/img/jazz_ensemble.jpg";
pub const ALBUM_1_IMAGE: &str = "assets/img/first_album.jpg";
pub const ALBUM_2_IMAGE: &str = "assets/img/jazz_collection.jpg";

// ============================================================================
// Served Files
// ============================================================================

pub const SHELL_PAGE_HTML: &str = "<!DOCTYPE html><html><body>PlayIt test shell</body></html>";

/// Relative to the assets dir
pub const TEST_SONG_PATH: &str = "mp3/0001.mp3";

pub const TEST_SONG_BYTES: &[u8] = b"ID3\x03\x00\x00\x00\x00\x00\x00fake mp3 payload";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval while waiting for the server
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
