use ticker::{EventTx, RefreshDriver};
use tracing::debug;

use crate::app::App;

use super::action_queue::Action;

pub(super) fn run_action(action: Action, app: &mut App, refresh: &RefreshDriver, events: &EventTx) {
    debug!(?action, "Running action");
    match action {
        Action::SubmitForm => app.submit_form(),
        Action::DeleteSelected => app.delete_selected(),
        Action::ToggleSelected => app.toggle_selected(),
        Action::RefreshNow => {
            refresh.refresh_now(events.clone());
            app.set_status("Refreshing…".to_string());
        }
    }
}
