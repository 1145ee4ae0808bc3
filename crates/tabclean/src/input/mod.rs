//! Input parsing and data source handling.

mod format;
mod header;
mod loader;
mod raw;
mod source;

pub use format::FileFormat;
pub use header::{HeaderMode, looks_like_header};
pub use loader::{Loader, LoaderConfig};
pub use source::SourceMetadata;
