use serde::Deserialize;

/// An artist entry of the YAML source document.
///
/// ```yaml
/// - name: Nina Simone
///   image: assets/img/nina.jpg
///   albums:
///     - name: Pastel Blues
///       image: assets/img/pastel_blues.jpg
///       tracks:
///         - Be My Husband
///         - Sinnerman
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SourceArtist {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub albums: Vec<SourceAlbum>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SourceAlbum {
    pub name: String,
    pub image: String,
    /// Track names in album order.
    #[serde(default)]
    pub tracks: Vec<String>,
}

pub fn parse_source_document(text: &str) -> Result<Vec<SourceArtist>, serde_yaml::Error> {
    serde_yaml::from_str(text)
}
