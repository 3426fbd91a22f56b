//! Image export: PNG snapshots, data URLs, and file saving.

pub mod data_url;
pub mod file;
pub mod types;

pub use data_url::PNG_DATA_URL_PREFIX;
pub use file::FileSaveConfig;
pub use types::{ExportError, ExportedImage, SavedImage, decode_png};
