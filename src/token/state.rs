//! Enable/disable gate for email token login.
//!
//! The gate is built once at bootstrap and shared by the issuer, the verifier
//! and the HTTP layer. Reads are a single atomic load. Transitions are
//! serialized so listeners see register/deregister calls in the same order as
//! the flag changes, and only on an actual edge.

use std::fmt;
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};
use tracing::info;

/// Stable identifier of this login mechanism in service registries.
pub const SERVICE_ID: &str = "emailToken";

/// Human-readable label shown next to the login option.
pub const SERVICE_LABEL: &str = "an Email + Token";

/// Observer for enable/disable edges.
pub trait ServiceListener: Send + Sync {
    fn registered(&self, id: &str, label: &str);
    fn deregistered(&self, id: &str);
}

#[derive(Default)]
pub struct ServiceState {
    enabled: AtomicBool,
    listeners: Mutex<Vec<Arc<dyn ServiceListener>>>,
}

impl ServiceState {
    /// New gate, disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. A listener attached while enabled is registered
    /// immediately so it never misses the current state.
    pub fn subscribe(&self, listener: Arc<dyn ServiceListener>) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        if self.enabled.load(Ordering::SeqCst) {
            listener.registered(SERVICE_ID, SERVICE_LABEL);
        }
        listeners.push(listener);
    }

    pub fn enable(&self) {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.enabled.swap(true, Ordering::SeqCst) {
            info!(service = SERVICE_ID, "email token login enabled");
            for listener in listeners.iter() {
                listener.registered(SERVICE_ID, SERVICE_LABEL);
            }
        }
    }

    pub fn disable(&self) {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        if self.enabled.swap(false, Ordering::SeqCst) {
            info!(service = SERVICE_ID, "email token login disabled");
            for listener in listeners.iter() {
                listener.deregistered(SERVICE_ID);
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceState")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingListener {
        registered: AtomicUsize,
        deregistered: AtomicUsize,
    }

    impl ServiceListener for CountingListener {
        fn registered(&self, id: &str, label: &str) {
            assert_eq!(id, SERVICE_ID);
            assert_eq!(label, SERVICE_LABEL);
            self.registered.fetch_add(1, Ordering::SeqCst);
        }

        fn deregistered(&self, id: &str) {
            assert_eq!(id, SERVICE_ID);
            self.deregistered.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn starts_disabled() {
        let state = ServiceState::new();
        assert!(!state.is_enabled());
    }

    #[test]
    fn enable_and_disable_toggle() {
        let state = ServiceState::new();
        state.enable();
        assert!(state.is_enabled());
        state.disable();
        assert!(!state.is_enabled());
    }

    #[test]
    fn listeners_fire_on_edges_only() {
        let state = ServiceState::new();
        let listener = Arc::new(CountingListener::default());
        state.subscribe(listener.clone());

        state.enable();
        state.enable();
        state.disable();
        state.disable();

        assert!(!state.is_enabled());
        assert_eq!(listener.registered.load(Ordering::SeqCst), 1);
        assert_eq!(listener.deregistered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disable_without_enable_is_silent() {
        let state = ServiceState::new();
        let listener = Arc::new(CountingListener::default());
        state.subscribe(listener.clone());

        state.disable();

        assert_eq!(listener.deregistered.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn late_subscriber_sees_enabled_state() {
        let state = ServiceState::new();
        state.enable();

        let listener = Arc::new(CountingListener::default());
        state.subscribe(listener.clone());

        assert_eq!(listener.registered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_toggles_stay_balanced() {
        let state = Arc::new(ServiceState::new());
        let listener = Arc::new(CountingListener::default());
        state.subscribe(listener.clone());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let state = state.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            state.enable();
                        } else {
                            state.disable();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().is_ok());
        }
        state.disable();

        assert_eq!(
            listener.registered.load(Ordering::SeqCst),
            listener.deregistered.load(Ordering::SeqCst)
        );
    }
}
