//! Test fixture creation for the catalog document and served assets

use super::constants::*;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 2 artists, 2 albums, 5 tracks.
fn test_catalog_document() -> String {
    format!(
        r#"
- name: {ARTIST_1_NAME}
  image: {ARTIST_1_IMAGE}
  albums:
    - name: {ALBUM_1_TITLE}
      image: {ALBUM_1_IMAGE}
      tracks:
        - {TRACK_1_TITLE}
        - {TRACK_2_TITLE}
        - {TRACK_3_TITLE}
- name: {ARTIST_2_NAME}
  image: {ARTIST_2_IMAGE}
  albums:
    - name: {ALBUM_2_TITLE}
      image: {ALBUM_2_IMAGE}
      tracks:
        - {TRACK_4_TITLE}
        - {TRACK_5_TITLE}
"#
    )
}

/// Paths inside the temporary test catalog directory.
pub struct TestCatalogPaths {
    pub db_path: PathBuf,
    pub source_path: PathBuf,
    pub assets_dir: PathBuf,
}

/// Creates a temporary directory with the YAML document, the page shell and
/// one song file. The database file does not exist yet.
pub fn create_test_catalog() -> Result<(TempDir, TestCatalogPaths)> {
    let dir = TempDir::new()?;

    let assets_dir = dir.path().join("assets");
    fs::create_dir_all(assets_dir.join("html"))?;
    fs::create_dir_all(assets_dir.join("mp3"))?;
    fs::create_dir_all(assets_dir.join("yaml"))?;

    fs::write(assets_dir.join("html").join("playit.html"), SHELL_PAGE_HTML)?;
    fs::write(assets_dir.join(TEST_SONG_PATH), TEST_SONG_BYTES)?;

    let source_path = assets_dir.join("yaml").join("playit.yaml");
    fs::write(&source_path, test_catalog_document())?;

    let paths = TestCatalogPaths {
        db_path: dir.path().join("playit.db"),
        source_path,
        assets_dir,
    };
    Ok((dir, paths))
}
