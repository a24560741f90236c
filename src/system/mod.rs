// System Layer
pub mod filesystem;
pub mod merge;
pub mod spreadsheet;

pub use filesystem::FileSystem;
pub use merge::{generate_output_filename, spawn_merge_worker};
