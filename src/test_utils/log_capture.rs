//! Counts WARN and ERROR events emitted while a test holds the guard.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tracing::{Event, Level, Subscriber, subscriber::DefaultGuard};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    registry,
};

#[derive(Clone, Default)]
pub struct AlertCounter(Arc<AtomicUsize>);

impl AlertCounter {
    /// Install as the thread's default subscriber until the guard drops.
    ///
    /// Only events on the current thread are seen, so use it from
    /// `#[tokio::test]` (current-thread runtime).
    pub fn install() -> (Self, DefaultGuard) {
        let counter = Self::default();
        let guard = tracing::subscriber::set_default(registry().with(counter.clone()));
        (counter, guard)
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for AlertCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() <= Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
