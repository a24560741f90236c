pub(super) mod dialog_controller;
pub(super) mod operation_controller;
