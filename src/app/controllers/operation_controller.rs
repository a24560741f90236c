use super::super::*;
use crate::models::merge_queue::MoveDirection;

pub(in crate::app) fn execute(app: &mut App, action: Action) {
    match action {
        Action::AddFiles => app.add_chosen_files(),
        Action::MoveItemUp => app.move_queue_item(MoveDirection::Up),
        Action::MoveItemDown => app.move_queue_item(MoveDirection::Down),
        Action::DeleteItem => app.delete_queue_item(),
        Action::ClearQueue => app.clear_queue(),
        Action::CycleMode => app.cycle_mode(),
        Action::Merge => app.start_merge(),
        _ => unreachable!("non-operation action: {:?}", action),
    }
}
