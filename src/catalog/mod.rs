mod load;
mod source;

pub use load::{
    assign_ids, load_catalog, prepare_catalog, read_source_document, LoadError, LoadSummary,
};
pub use source::{parse_source_document, SourceAlbum, SourceArtist};
