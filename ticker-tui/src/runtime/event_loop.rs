use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use ticker::{EventRx, EventTx, RefreshDriver, TickDriver};
use tracing::info;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::handle_view_key;

const INPUT_POLL: Duration = Duration::from_millis(10);

/// Background drivers and the channel they report on.
pub struct Drivers {
    pub refresh: RefreshDriver,
    pub tick_interval: Duration,
    pub events_tx: EventTx,
    pub events_rx: EventRx,
}

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    drivers: Drivers,
) -> Result<()> {
    let Drivers {
        refresh,
        tick_interval,
        events_tx,
        mut events_rx,
    } = drivers;

    let refresh_task = refresh.clone().spawn(events_tx.clone());
    let mut ticks = TickDriver::new(tick_interval, events_tx.clone());
    ticks.reconcile(&app.snapshot);
    let mut ticked_snapshot = app.snapshot.clone();

    let (action_tx, mut action_rx) = channel();
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|f| ui::render(f, app))?;
            dirty = false;
        }

        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_view_key(key, app, &action_tx);
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, &refresh, &events_tx);
            dirty = true;
        }

        while let Ok(event) = events_rx.try_recv() {
            dirty |= app.apply_sync_event(event);
        }

        if !ticked_snapshot.ptr_eq(&app.snapshot) {
            ticks.reconcile(&app.snapshot);
            ticked_snapshot = app.snapshot.clone();
        }

        if !app.running {
            break;
        }
    }

    refresh_task.abort();
    info!("Event loop stopped");
    Ok(())
}
