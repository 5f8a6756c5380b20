//! Change notification for model mutations.
//!
//! Models report what happened *after* mutating, through a plain list of
//! callbacks: no reactive graph, no implicit dependencies. Hosts that render,
//! sonify, or record the models subscribe here and read the model state back
//! on their own schedule.
//!
//! # Example
//!
//! ```ignore
//! let mut model = LevelOutModel::new();
//! model.events().subscribe(|event| {
//!     if let LevelOutEvent::WaterLevelChanged { index, new, .. } = event {
//!         println!("cup {index} is now at {new:.2}");
//!     }
//! });
//! ```

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// A list of event callbacks invoked in registration order.
///
/// Callbacks receive a shared reference to the event and must not try to
/// reach back into the emitting model (it is mutably borrowed while
/// emitting); read model state after the mutating call returns instead.
pub struct Notifier<E> {
    listeners: Vec<(SubscriptionId, Box<dyn Fn(&E) + Send + Sync>)>,
    next_id: u64,
}

impl<E> Notifier<E> {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a callback. Returns an id that can be passed to
    /// [`Notifier::unsubscribe`].
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a previously registered callback.
    ///
    /// Returns `true` if the id was found.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Invoke every callback with the given event.
    pub fn emit(&self, event: &E) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
