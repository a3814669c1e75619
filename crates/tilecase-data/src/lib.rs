//! Case files and validator configuration on disk.
//!
//! Cases and configs are RON, JSON, or TOML, chosen by file extension.
//! [`load_case`] turns a case file into the [`tilecase_core::CaseOptions`]
//! the validation rules consume.

pub mod config;
pub mod loader;
pub mod schema;

pub use config::{ValidationConfig, load_config};
pub use loader::{DataLoadError, Format, detect_format, find_case_files, load_case};
pub use schema::{CaseFile, TileData};
