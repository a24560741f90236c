// UI Components
pub mod command_bar;
pub mod dialog;
pub mod panel;
pub mod queue_panel;
pub mod status_bar;
pub mod title_bar;
pub mod warning;

// Re-export components for convenience
pub use command_bar::CommandBar;
pub use dialog::{Dialog, DialogKind};
pub use panel::{Panel, PanelStatus};
pub use queue_panel::QueuePanel;
pub use status_bar::{ProgressBar, StatusBar, StatusKind};
pub use title_bar::TitleBar;
pub use warning::WarningScreen;
