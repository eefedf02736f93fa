use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(true),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(false),
        KeyCode::Char('n') => app.open_create_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => enqueue_action(action_tx, Action::DeleteSelected),
        KeyCode::Char(' ') => enqueue_action(action_tx, Action::ToggleSelected),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::RefreshNow),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::app::View;
    use ticker::{SyncEvent, Timer, TimerId};

    use super::super::super::action_queue::channel;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn space_queues_a_toggle() {
        let (mut app, _events) = test_app();
        let (tx, mut rx) = channel();

        handle_list_key(key(KeyCode::Char(' ')), &mut app, &tx);

        assert_eq!(rx.try_recv().ok(), Some(Action::ToggleSelected));
    }

    #[tokio::test]
    async fn edit_needs_a_selected_timer() {
        let (mut app, _events) = test_app();
        let (tx, _rx) = channel();

        handle_list_key(key(KeyCode::Char('e')), &mut app, &tx);
        assert_eq!(app.current_view, View::List);

        app.apply_sync_event(SyncEvent::Refreshed(vec![Timer::new(
            TimerId::from("a"),
            "A",
            "P",
        )]));
        handle_list_key(key(KeyCode::Char('e')), &mut app, &tx);
        assert_eq!(app.current_view, View::Form);
        assert_eq!(app.form.as_ref().unwrap().submit_label(), "Update");
    }

    #[tokio::test]
    async fn q_quits() {
        let (mut app, _events) = test_app();
        let (tx, _rx) = channel();

        handle_list_key(key(KeyCode::Char('q')), &mut app, &tx);

        assert!(!app.running);
    }
}
