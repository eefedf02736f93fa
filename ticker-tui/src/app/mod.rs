mod state;

pub use state::*;

use time::OffsetDateTime;
use ticker::{Coordinator, Snapshot, SyncEvent, Timer};

pub struct App {
    coordinator: Coordinator,
    pub snapshot: Snapshot,
    pub selected: usize,
    pub current_view: View,
    pub form: Option<TimerForm>,
    pub status_message: Option<String>,
    pub running: bool,
}

impl App {
    pub fn new(coordinator: Coordinator) -> Self {
        let snapshot = coordinator.snapshot();
        Self {
            coordinator,
            snapshot,
            selected: 0,
            current_view: View::List,
            form: None,
            status_message: None,
            running: true,
        }
    }

    pub fn now(&self) -> OffsetDateTime {
        self.coordinator.clock().now()
    }

    pub fn selected_timer(&self) -> Option<&Timer> {
        self.snapshot[..].get(self.selected)
    }

    pub fn move_selection(&mut self, down: bool) {
        if self.snapshot.is_empty() {
            return;
        }
        let last = self.snapshot.len() - 1;
        self.selected = if down {
            (self.selected + 1).min(last)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(TimerForm::create());
        self.current_view = View::Form;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(timer) = self.selected_timer() {
            self.form = Some(TimerForm::edit(timer));
            self.current_view = View::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.current_view = View::List;
    }

    pub fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };
        self.current_view = View::List;

        match form.into_submission() {
            FormSubmission::Create(draft) => {
                let snapshot = self.coordinator.create(draft);
                let created = snapshot.len() > self.snapshot.len();
                self.set_snapshot(snapshot);
                if created {
                    self.selected = self.snapshot.len() - 1;
                }
            }
            FormSubmission::Update(patch) => {
                let snapshot = self.coordinator.update(patch);
                self.set_snapshot(snapshot);
            }
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_timer().map(|t| t.id.clone()) {
            let snapshot = self.coordinator.delete(&id);
            self.set_snapshot(snapshot);
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_timer().map(|t| t.id.clone()) {
            let snapshot = self.coordinator.toggle(&id);
            self.set_snapshot(snapshot);
        }
    }

    /// Apply a background event. Returns whether the screen needs a redraw.
    pub fn apply_sync_event(&mut self, event: SyncEvent) -> bool {
        match event {
            SyncEvent::Refreshed(timers) => {
                let snapshot = self.coordinator.refresh(timers);
                self.set_snapshot(snapshot);
                self.status_message = None;
                true
            }
            SyncEvent::RefreshFailed(error) => {
                self.set_status(format!("Failed to refresh: {error}"));
                true
            }
            SyncEvent::Tick(id) => self.snapshot.get(&id).is_some_and(Timer::is_running),
            SyncEvent::Remote(outcome) if outcome.is_success() => {
                self.status_message.take().is_some()
            }
            SyncEvent::Remote(outcome) => {
                self.set_status(outcome.to_string());
                true
            }
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        if self.selected >= self.snapshot.len() {
            self.selected = self.snapshot.len().saturating_sub(1);
        }
    }
}
