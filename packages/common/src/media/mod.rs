mod error;
mod ingest;
mod probe;

pub use error::ImageError;
pub use ingest::{
    ALLOWED_EXTENSIONS, DEFAULT_MAX_IMAGE_BYTES, ImageIngestor, MAX_FILENAME_BYTES, ResolvedImage,
    generate_filename,
};
pub use probe::{ImageInfo, probe};
