// Utility modules
pub mod error;
pub mod formatter;
pub mod logger;
pub mod path_display;
