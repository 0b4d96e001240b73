use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::registry::RegistryError;
use crate::event::{DiscordEvent, EventName};
use crate::marker::{Gateway, ListenerOptions, MarkerRegistry, Markers};
use test_utils::serenity::create_test_message;


/// Gateway with one once-handler and one on-handler.
#[derive(Default)]
struct CounterGateway {
    ready: AtomicUsize,
    messages: Mutex<Vec<String>>,
}

impl CounterGateway {
    async fn on_ready(self: Arc<Self>, _event: DiscordEvent) {
        self.ready.fetch_add(1, Ordering::SeqCst);
    }

    async fn on_message(self: Arc<Self>, event: DiscordEvent) {
        if let DiscordEvent::MessageCreate(message) = event {
            self.messages.lock().unwrap().push(message.content);
        }
    }
}

impl Gateway for CounterGateway {
    fn markers(markers: &mut Markers<Self>) {
        markers
            .once(EventName::Ready, Self::on_ready)
            .on(EventName::MessageCreate, Self::on_message);
    }
}

/// Gateway that marks the same method with both markers.
struct DoubleMarkedGateway;

impl DoubleMarkedGateway {
    async fn on_ready(self: Arc<Self>, _event: DiscordEvent) {}
}

impl Gateway for DoubleMarkedGateway {
    fn markers(markers: &mut Markers<Self>) {
        markers
            .once(EventName::Ready, Self::on_ready)
            .on(EventName::Ready, Self::on_ready);
    }
}

/// Gateway declaring its events by name.
struct NamedGateway;

impl NamedGateway {
    async fn on_message(self: Arc<Self>, _event: DiscordEvent) {}
}

impl Gateway for NamedGateway {
    fn markers(markers: &mut Markers<Self>) {
        let options = ListenerOptions::parse("message").unwrap_or(ListenerOptions {
            event: EventName::MessageCreate,
        });
        markers.on(options, Self::on_message);
    }
}

/// Gateway whose handlers are closures rather than methods.
#[derive(Default)]
struct ClosureGateway {
    ready: AtomicUsize,
    messages: AtomicUsize,
}

impl Gateway for ClosureGateway {
    fn markers(markers: &mut Markers<Self>) {
        markers
            .once(EventName::Ready, |gateway: Arc<Self>, _event: DiscordEvent| async move {
                gateway.ready.fetch_add(1, Ordering::SeqCst);
            })
            .on(
                EventName::MessageCreate,
                |gateway: Arc<Self>, _event: DiscordEvent| async move {
                    gateway.messages.fetch_add(1, Ordering::SeqCst);
                },
            );
    }
}
