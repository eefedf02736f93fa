use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.form.as_mut() else {
        app.close_form();
        return;
    };

    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitForm),
        KeyCode::Tab | KeyCode::BackTab => form.focus_next(),
        KeyCode::Backspace => form.focused_input().backspace(),
        KeyCode::Left => form.focused_input().move_left(),
        KeyCode::Right => form.focused_input().move_right(),
        KeyCode::Home => form.focused_input().home(),
        KeyCode::End => form.focused_input().end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.focused_input().insert(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::app::{FormField, View};

    use super::super::super::action_queue::channel;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn typing_goes_to_the_focused_field() {
        let (mut app, _events) = test_app();
        let (tx, _rx) = channel();
        app.open_create_form();

        handle_form_key(key(KeyCode::Char('a')), &mut app, &tx);
        handle_form_key(key(KeyCode::Tab), &mut app, &tx);
        handle_form_key(key(KeyCode::Char('b')), &mut app, &tx);

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.title.value, "a");
        assert_eq!(form.project.value, "b");
        assert_eq!(form.focused, FormField::Project);
    }

    #[tokio::test]
    async fn enter_queues_submit_and_esc_cancels() {
        let (mut app, _events) = test_app();
        let (tx, mut rx) = channel();
        app.open_create_form();

        handle_form_key(key(KeyCode::Enter), &mut app, &tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::SubmitForm));

        handle_form_key(key(KeyCode::Esc), &mut app, &tx);
        assert_eq!(app.current_view, View::List);
        assert!(app.form.is_none());
        assert!(app.snapshot.is_empty());
    }
}
