//! Listener table backing the serenity event handler.
//!
//! Serenity delivers events through trait callbacks rather than named listener
//! subscription, so the table provides the two subscription primitives the
//! binder relies on: persistent listeners (`on`) and one-shot listeners
//! (`once`). Listeners for one event run in subscription order.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::event::{DiscordEvent, EventName};
use crate::marker::{BoundHandler, Listener};

struct Subscription {
    listener: Listener,
    once: bool,
}

/// Event listeners keyed by event name.
#[derive(Default)]
pub struct ListenerTable {
    subscriptions: Mutex<HashMap<EventName, Vec<Subscription>>>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener that runs on every occurrence of the event.
    pub async fn on(&self, event: EventName, listener: Listener) {
        self.subscribe(event, listener, false).await;
    }

    /// Appends a listener that runs on the next occurrence of the event only.
    pub async fn once(&self, event: EventName, listener: Listener) {
        self.subscribe(event, listener, true).await;
    }

    /// Subscribes a bound handler with the primitive its descriptor asks for.
    pub async fn add_handler(&self, handler: BoundHandler) {
        let BoundHandler {
            descriptor,
            listener,
        } = handler;

        tracing::debug!(
            "Subscribing {} to {} (once: {})",
            descriptor.method,
            descriptor.event,
            descriptor.once
        );

        self.subscribe(descriptor.event, listener, descriptor.once)
            .await;
    }

    async fn subscribe(&self, event: EventName, listener: Listener, once: bool) {
        self.subscriptions
            .lock()
            .await
            .entry(event)
            .or_default()
            .push(Subscription { listener, once });
    }

    /// Invokes every listener subscribed to the event's name.
    ///
    /// One-shot listeners are removed before any listener runs, so an event
    /// emitted concurrently never reaches them a second time. Listeners are
    /// awaited one after another in subscription order; a panicking listener is
    /// not caught.
    ///
    /// # Returns
    /// - Number of listeners invoked
    pub async fn emit(&self, event: DiscordEvent) -> usize {
        let name = event.name();

        let listeners: Vec<Listener> = {
            let mut subscriptions = self.subscriptions.lock().await;
            let Some(subscribed) = subscriptions.get_mut(&name) else {
                return 0;
            };

            let listeners = subscribed
                .iter()
                .map(|subscription| subscription.listener.clone())
                .collect();
            subscribed.retain(|subscription| !subscription.once);

            listeners
        };

        tracing::debug!("Dispatching {} to {} listeners", name, listeners.len());

        for listener in &listeners {
            listener(event.clone()).await;
        }

        listeners.len()
    }

    /// Number of listeners currently subscribed to the event.
    pub async fn listener_count(&self, event: EventName) -> usize {
        self.subscriptions
            .lock()
            .await
            .get(&event)
            .map_or(0, Vec::len)
    }

    /// Removes every listener.
    pub async fn clear(&self) {
        self.subscriptions.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};

    use serenity::all::GuildId;
    use test_utils::serenity::create_test_message;

    use super::*;
    use crate::marker::HandlerFuture;

    fn counting(counter: &Arc<AtomicUsize>) -> Listener {
        let counter = counter.clone();
        Arc::new(move |_event: DiscordEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async {}) as HandlerFuture
        })
    }

    fn recording(log: &Arc<StdMutex<Vec<String>>>, tag: &'static str) -> Listener {
        let log = log.clone();
        Arc::new(move |event: DiscordEvent| {
            let entry = match event {
                DiscordEvent::MessageCreate(message) => format!("{}:{}", tag, message.content),
                other => format!("{}:{}", tag, other.name()),
            };
            log.lock().unwrap().push(entry);
            Box::pin(async {}) as HandlerFuture
        })
    }

    fn cache_ready() -> DiscordEvent {
        DiscordEvent::CacheReady(vec![GuildId::new(1)])
    }

    #[tokio::test]
    async fn once_listener_runs_a_single_time() {
        let table = ListenerTable::new();
        let counter = Arc::new(AtomicUsize::new(0));
        table.once(EventName::CacheReady, counting(&counter)).await;

        assert_eq!(table.emit(cache_ready()).await, 1);
        assert_eq!(table.emit(cache_ready()).await, 0);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(table.listener_count(EventName::CacheReady).await, 0);
    }

    #[tokio::test]
    async fn on_listener_runs_for_every_event_in_order() {
        let table = ListenerTable::new();
        let log = Arc::new(StdMutex::new(Vec::new()));
        table
            .on(EventName::MessageCreate, recording(&log, "on"))
            .await;

        for content in ["first", "second", "third"] {
            table
                .emit(DiscordEvent::MessageCreate(create_test_message(1, 2, content)))
                .await;
        }

        assert_eq!(
            *log.lock().unwrap(),
            vec!["on:first", "on:second", "on:third"]
        );
        assert_eq!(table.listener_count(EventName::MessageCreate).await, 1);
    }

    #[tokio::test]
    async fn listeners_run_in_subscription_order() {
        let table = ListenerTable::new();
        let log = Arc::new(StdMutex::new(Vec::new()));
        table.on(EventName::CacheReady, recording(&log, "a")).await;
        table.once(EventName::CacheReady, recording(&log, "b")).await;
        table.on(EventName::CacheReady, recording(&log, "c")).await;

        table.emit(cache_ready()).await;
        table.emit(cache_ready()).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "a:cacheReady",
                "b:cacheReady",
                "c:cacheReady",
                "a:cacheReady",
                "c:cacheReady"
            ]
        );
    }

    #[tokio::test]
    async fn events_only_reach_their_own_listeners() {
        let table = ListenerTable::new();
        let counter = Arc::new(AtomicUsize::new(0));
        table.on(EventName::Ready, counting(&counter)).await;

        assert_eq!(table.emit(cache_ready()).await, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_emits_fire_once_listener_once() {
        let table = Arc::new(ListenerTable::new());
        let counter = Arc::new(AtomicUsize::new(0));
        table.once(EventName::CacheReady, counting(&counter)).await;

        let (first, second) = tokio::join!(table.emit(cache_ready()), table.emit(cache_ready()));

        assert_eq!(first + second, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clear_removes_all_listeners() {
        let table = ListenerTable::new();
        let counter = Arc::new(AtomicUsize::new(0));
        table.on(EventName::Ready, counting(&counter)).await;
        table.once(EventName::CacheReady, counting(&counter)).await;

        table.clear().await;

        assert_eq!(table.listener_count(EventName::Ready).await, 0);
        assert_eq!(table.emit(cache_ready()).await, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
