//! Handler markers and the marker registry.
//!
//! An application component implements [`Gateway`] and declares which of its
//! methods handle which events, either once or on every occurrence:
//!
//! ```rust,ignore
//! impl Gateway for CommandBotGateway {
//!     fn markers(markers: &mut Markers<Self>) {
//!         markers
//!             .once(EventName::Ready, Self::on_ready)
//!             .on(EventName::MessageCreate, Self::on_message);
//!     }
//! }
//! ```
//!
//! The declarations are recorded as [`HandlerDescriptor`]s in a
//! [`MarkerRegistry`], keyed by the method's identity. Binding a component
//! instance turns each descriptor into a listener that calls the method with
//! that instance as receiver.

use std::any::{type_name, TypeId};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::registry::RegistryError;
use crate::event::{DiscordEvent, EventName};

/// Future returned by a type-erased handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A type-erased listener, bound to its component instance.
pub type Listener = Arc<dyn Fn(DiscordEvent) -> HandlerFuture + Send + Sync>;

type Method<C> = Arc<dyn Fn(Arc<C>, DiscordEvent) -> HandlerFuture + Send + Sync>;

/// An application component whose methods handle Discord events.
pub trait Gateway: Send + Sync + Sized + 'static {
    /// Declares the component's handler methods.
    ///
    /// Called once per bootstrap while markers are bound. Each method may be
    /// marked at most once.
    fn markers(markers: &mut Markers<Self>);
}

/// Options accepted by the once-marker and on-marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Event the marked method handles.
    pub event: EventName,
}

impl ListenerOptions {
    /// Builds options from an event name string such as `"ready"`.
    pub fn parse(event: &str) -> Result<Self, RegistryError> {
        Ok(Self {
            event: event.parse()?,
        })
    }
}

impl From<EventName> for ListenerOptions {
    fn from(event: EventName) -> Self {
        Self { event }
    }
}

/// Metadata recorded for a marked handler method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerDescriptor {
    /// Type name of the component declaring the method.
    pub owner: &'static str,
    /// Fully-qualified name of the method.
    pub method: &'static str,
    /// Event the method handles.
    pub event: EventName,
    /// Whether the method runs for the first occurrence only.
    pub once: bool,
}

/// A handler ready to be subscribed: its descriptor plus the bound listener.
pub struct BoundHandler {
    pub descriptor: HandlerDescriptor,
    pub listener: Listener,
}

struct Marked<C> {
    descriptor: HandlerDescriptor,
    key: TypeId,
    method: Method<C>,
}

/// Collects the markers a [`Gateway`] declares.
pub struct Markers<C> {
    marked: Vec<Marked<C>>,
}

impl<C: Gateway> Markers<C> {
    fn new() -> Self {
        Self { marked: Vec::new() }
    }

    /// Marks a method to run on the first occurrence of an event only.
    pub fn once<F, Fut>(&mut self, options: impl Into<ListenerOptions>, method: F) -> &mut Self
    where
        F: Fn(Arc<C>, DiscordEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.mark(options.into(), true, method)
    }

    /// Marks a method to run on every occurrence of an event.
    pub fn on<F, Fut>(&mut self, options: impl Into<ListenerOptions>, method: F) -> &mut Self
    where
        F: Fn(Arc<C>, DiscordEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.mark(options.into(), false, method)
    }

    fn mark<F, Fut>(&mut self, options: ListenerOptions, once: bool, method: F) -> &mut Self
    where
        F: Fn(Arc<C>, DiscordEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let descriptor = HandlerDescriptor {
            owner: type_name::<C>(),
            method: type_name::<F>(),
            event: options.event,
            once,
        };
        let method: Method<C> = Arc::new(move |instance: Arc<C>, event: DiscordEvent| {
            Box::pin(method(instance, event)) as HandlerFuture
        });

        // Closures share a type name, but every fn item and closure has its own type
        self.marked.push(Marked {
            descriptor,
            key: TypeId::of::<F>(),
            method,
        });
        self
    }
}

/// Registry of every handler descriptor declared by the bound gateways.
///
/// Holds no two descriptors for the same method of the same component.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    descriptors: Vec<HandlerDescriptor>,
    keys: Vec<TypeId>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All registered descriptors in registration order.
    pub fn descriptors(&self) -> &[HandlerDescriptor] {
        &self.descriptors
    }

    /// Descriptors subscribed to the given event.
    pub fn for_event(&self, event: EventName) -> impl Iterator<Item = &HandlerDescriptor> {
        self.descriptors.iter().filter(move |d| d.event == event)
    }

    fn contains(&self, key: TypeId) -> bool {
        self.keys.contains(&key)
    }

    /// Records a gateway's markers and binds them to the given instance.
    ///
    /// Either every marker of the gateway is registered or none is.
    ///
    /// # Arguments
    /// - `instance` - Component instance the handlers are called on
    ///
    /// # Returns
    /// - `Ok(Vec<BoundHandler>)` - Handlers in declaration order
    /// - `Err(RegistryError::DuplicateHandler)` - A method was marked twice, or
    ///   the gateway type was already bound
    pub fn bind<C: Gateway>(
        &mut self,
        instance: &Arc<C>,
    ) -> Result<Vec<BoundHandler>, RegistryError> {
        let mut markers = Markers::<C>::new();
        C::markers(&mut markers);

        for (index, marked) in markers.marked.iter().enumerate() {
            let marked_earlier = markers.marked[..index]
                .iter()
                .any(|earlier| earlier.key == marked.key);

            if marked_earlier || self.contains(marked.key) {
                return Err(RegistryError::DuplicateHandler {
                    owner: marked.descriptor.owner,
                    method: marked.descriptor.method,
                });
            }
        }

        let bound = markers
            .marked
            .into_iter()
            .map(|Marked { descriptor, key, method }| {
                self.descriptors.push(descriptor.clone());
                self.keys.push(key);

                let instance = Arc::clone(instance);
                let listener: Listener =
                    Arc::new(move |event: DiscordEvent| method(Arc::clone(&instance), event));

                BoundHandler {
                    descriptor,
                    listener,
                }
            })
            .collect();

        Ok(bound)
    }
}

/// A gateway instance with its concrete type erased.
pub(crate) trait GatewayInstance: Send + Sync {
    fn bind(&self, registry: &mut MarkerRegistry) -> Result<Vec<BoundHandler>, RegistryError>;
}

impl<C: Gateway> GatewayInstance for Arc<C> {
    fn bind(&self, registry: &mut MarkerRegistry) -> Result<Vec<BoundHandler>, RegistryError> {
        registry.bind(self)
    }
}

#[cfg(test)]
mod test;
