// Data Models
pub mod file_entry;
pub mod merge_queue;
pub mod operation;
pub mod picker_state;
pub mod table;

pub use merge_queue::MergeQueue;
pub use picker_state::PickerState;
