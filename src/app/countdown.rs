use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::app::ports::Clock;
use crate::domain::Event;

/// Periodically recomputes the countdown text of the currently loaded event.
///
/// The event is read from the watch channel on every tick, so an event
/// loaded after the ticker was spawned is picked up. Dropping the ticker
/// stops the background task.
pub struct CountdownTicker {
    display: watch::Receiver<String>,
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    pub fn spawn(
        mut current: watch::Receiver<Option<Event>>,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> Self {
        let initial = render(current.borrow_and_update().as_ref(), clock.as_ref());
        let (tx, display) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = current.changed() => {
                        if changed.is_err() {
                            debug!("Event source closed, stopping countdown");
                            break;
                        }
                    }
                }

                let text = render(current.borrow_and_update().as_ref(), clock.as_ref());
                tx.send_replace(text);
            }
        });

        Self { display, handle }
    }

    /// Latest countdown text
    pub fn display(&self) -> String {
        self.display.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn render(event: Option<&Event>, clock: &dyn Clock) -> String {
    event
        .map(|event| event.time_display_at(clock.now()))
        .unwrap_or_default()
}
