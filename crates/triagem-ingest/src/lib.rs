//! Triagem Ingest — turns an uploaded file or typed text into normalized text.

pub mod extract;
pub mod file;
pub mod normalize;

pub use extract::{extract_text, ExtractionError};
pub use file::{EmailInput, FileType, UploadedFile};
pub use normalize::{normalize, Preprocessor};
