//! In-process event bus for window and application lifecycle events.
//!
//! Producers (the compositor listener, the applications registry) emit
//! [`ShellEvent`]s; panel items subscribe and receive a [`Subscription`]
//! handle. Dropping the handle detaches the handler, so a widget that is
//! torn down never receives callbacks again.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::trace;

use crate::compositor::{WindowId, WindowInfo};

/// Lifecycle events published on the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// An application launch was requested by name.
    LaunchRequested(String),
    /// A previously requested launch finished spawning.
    Launched(String),
    /// A window appeared.
    WindowCreated(WindowInfo),
    /// A window went away.
    WindowDestroyed(WindowId),
    /// A window's observable state (title, focus) changed.
    WindowChanged(WindowInfo),
}

/// Discriminant used to subscribe to a single event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    LaunchRequested,
    Launched,
    WindowCreated,
    WindowDestroyed,
    WindowChanged,
}

impl ShellEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ShellEvent::LaunchRequested(_) => EventKind::LaunchRequested,
            ShellEvent::Launched(_) => EventKind::Launched,
            ShellEvent::WindowCreated(_) => EventKind::WindowCreated,
            ShellEvent::WindowDestroyed(_) => EventKind::WindowDestroyed,
            ShellEvent::WindowChanged(_) => EventKind::WindowChanged,
        }
    }
}

type Handler = Arc<dyn Fn(&ShellEvent) + Send + Sync>;

struct Entry {
    id: u64,
    kind: Option<EventKind>,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Cloneable handle to a shared event bus.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one kind of event.
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&ShellEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.insert(Some(kind), Arc::new(handler))
    }

    /// Subscribe to every event.
    pub fn subscribe_all(
        &self,
        handler: impl Fn(&ShellEvent) + Send + Sync + 'static,
    ) -> Subscription {
        self.insert(None, Arc::new(handler))
    }

    /// Deliver an event to all matching handlers, in subscription order.
    ///
    /// Handlers are invoked outside the registry lock, so they may emit or
    /// subscribe themselves.
    pub fn emit(&self, event: ShellEvent) {
        let kind = event.kind();
        let handlers: Vec<Handler> = {
            let registry = self.lock();
            registry
                .entries
                .iter()
                .filter(|e| e.kind.is_none_or(|k| k == kind))
                .map(|e| e.handler.clone())
                .collect()
        };

        trace!("Emitting {:?} to {} handlers", kind, handlers.len());
        for handler in handlers {
            handler(&event);
        }
    }

    /// Number of live subscriptions.
    pub fn handler_count(&self) -> usize {
        self.lock().entries.len()
    }

    fn insert(&self, kind: Option<EventKind>, handler: Handler) -> Subscription {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry { id, kind, handler });

        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped subscription; the handler is removed when this is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.entries.retain(|e| e.id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(bus: &EventBus, kind: EventKind) -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let sub = bus.subscribe(kind, {
            let count = count.clone();
            move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });
        (count, sub)
    }

    #[test]
    fn test_delivers_only_matching_kind() {
        let bus = EventBus::new();
        let (launches, _a) = counter(&bus, EventKind::LaunchRequested);
        let (launched, _b) = counter(&bus, EventKind::Launched);

        bus.emit(ShellEvent::LaunchRequested("calc".into()));
        bus.emit(ShellEvent::LaunchRequested("calc".into()));
        bus.emit(ShellEvent::Launched("calc".into()));

        assert_eq!(launches.load(Ordering::SeqCst), 2);
        assert_eq!(launched.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        let (count, sub) = counter(&bus, EventKind::Launched);
        assert_eq!(bus.handler_count(), 1);

        drop(sub);
        bus.emit(ShellEvent::Launched("calc".into()));

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(bus.handler_count(), 0);
    }

    #[test]
    fn test_subscribe_all_sees_everything() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = bus.subscribe_all({
            let seen = seen.clone();
            move |event| seen.lock().unwrap().push(event.kind())
        });

        bus.emit(ShellEvent::LaunchRequested("a".into()));
        bus.emit(ShellEvent::WindowDestroyed(WindowId::from("0x1")));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventKind::LaunchRequested, EventKind::WindowDestroyed]
        );
    }

    #[test]
    fn test_handler_may_emit_reentrantly() {
        let bus = EventBus::new();
        let (launched, _counter) = counter(&bus, EventKind::Launched);
        let _relay = bus.subscribe(EventKind::LaunchRequested, {
            let bus = bus.clone();
            move |event| {
                if let ShellEvent::LaunchRequested(name) = event {
                    bus.emit(ShellEvent::Launched(name.clone()));
                }
            }
        });

        bus.emit(ShellEvent::LaunchRequested("term".into()));
        assert_eq!(launched.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = EventBus::new();
        let (_count, sub) = counter(&bus, EventKind::Launched);
        drop(bus);
        drop(sub);
    }
}
