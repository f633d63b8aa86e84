//! Capabilities every synthesized type carries.
//!
//! Rather than inheriting from a common parent, each generated instance
//! embeds a [`BaseContract`]: a [`ChangeNotifier`] for property-change
//! broadcasts and an [`ErrorState`] stub for per-property error reporting.
//! The stub never reports errors, so its errors-changed subscribers are
//! accepted but never invoked.
//! The [`NotifyPropertyChanged`] and [`DataErrorInfo`] traits are the public
//! face of those capabilities.

use std::fmt;

/// Capability names advertised by every generated type.
pub const CHANGE_NOTIFICATION: &str = "ChangeNotification";
pub const ERROR_STATE: &str = "ErrorState";
pub const BASE_CONTRACT: [&str; 2] = [CHANGE_NOTIFICATION, ERROR_STATE];

/// Payload delivered to change subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChanged {
    pub property_name: String,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler<S> = Box<dyn Fn(&S, &PropertyChanged) + Send + Sync>;

/// Ordered subscriber list for change notifications raised by a source `S`.
pub struct ChangeNotifier<S> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler<S>)>,
}

impl<S> ChangeNotifier<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&S, &PropertyChanged) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns false when `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Invoke every subscriber in registration order.
    pub fn notify(&self, source: &S, property_name: &str) {
        if self.handlers.is_empty() {
            return;
        }
        let event = PropertyChanged {
            property_name: property_name.to_string(),
        };
        for (_, handler) in &self.handlers {
            handler(source, &event);
        }
    }
}

impl<S> Default for ChangeNotifier<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for ChangeNotifier<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

/// Error-reporting stub: never reports errors.
///
/// `get_errors` returns an empty list for every property name, the same
/// answer `has_errors` gives in aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorState;

impl ErrorState {
    pub fn has_errors(&self) -> bool {
        false
    }

    pub fn get_errors(&self, _property_name: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Both capabilities, composed into each generated instance.
pub struct BaseContract<S> {
    pub changes: ChangeNotifier<S>,
    pub errors: ErrorState,
    /// Errors-changed subscribers. Nothing raises this while `errors` is the stub.
    pub errors_changed: ChangeNotifier<S>,
}

impl<S> BaseContract<S> {
    pub fn new() -> Self {
        Self {
            changes: ChangeNotifier::new(),
            errors: ErrorState,
            errors_changed: ChangeNotifier::new(),
        }
    }
}

impl<S> Default for BaseContract<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for BaseContract<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseContract")
            .field("changes", &self.changes)
            .field("errors", &self.errors)
            .field("errors_changed", &self.errors_changed)
            .finish()
    }
}

/// Broadcast of property writes.
pub trait NotifyPropertyChanged: Sized {
    fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&Self, &PropertyChanged) + Send + Sync + 'static;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Tell every current subscriber that `property_name` changed.
    fn notify(&self, property_name: &str);
}

/// Per-property validation error reporting.
pub trait DataErrorInfo: Sized {
    fn has_errors(&self) -> bool;

    fn get_errors(&self, property_name: &str) -> Vec<String>;

    /// Register for notice that a property's error list changed. The event
    /// carries the affected property name.
    fn subscribe_errors_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&Self, &PropertyChanged) + Send + Sync + 'static;

    fn unsubscribe_errors_changed(&mut self, id: SubscriptionId) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Source(&'static str);

    #[test]
    fn test_notify_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = ChangeNotifier::<Source>::new();

        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            notifier.subscribe(move |source: &Source, event: &PropertyChanged| {
                log.lock()
                    .unwrap()
                    .push(format!("{}:{}:{}", tag, source.0, event.property_name));
            });
        }

        notifier.notify(&Source("src"), "Name");

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:src:Name", "second:src:Name", "third:src:Name"]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Arc::new(Mutex::new(0usize));
        let mut notifier = ChangeNotifier::<Source>::new();

        let counter = Arc::clone(&hits);
        let id = notifier.subscribe(move |_: &Source, _: &PropertyChanged| {
            *counter.lock().unwrap() += 1;
        });

        notifier.notify(&Source("a"), "x");
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(&Source("a"), "x");

        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_ids_are_not_reused() {
        let mut notifier = ChangeNotifier::<Source>::new();
        let a = notifier.subscribe(|_: &Source, _: &PropertyChanged| {});
        notifier.unsubscribe(a);
        let b = notifier.subscribe(|_: &Source, _: &PropertyChanged| {});
        assert_ne!(a, b);
    }

    #[test]
    fn test_error_state_stub() {
        let errors = ErrorState;
        assert!(!errors.has_errors());
        assert!(errors.get_errors("Name").is_empty());
        assert!(errors.get_errors("").is_empty());
    }

    #[test]
    fn test_base_contract_keeps_channels_apart() {
        let mut contract = BaseContract::<Source>::new();
        let id = contract
            .errors_changed
            .subscribe(|_: &Source, _: &PropertyChanged| {});

        assert_eq!(contract.errors_changed.subscriber_count(), 1);
        assert_eq!(contract.changes.subscriber_count(), 0);
        assert!(contract.errors_changed.unsubscribe(id));
    }
}
