//! Shared mutable stores.
//!
//! The sidebar reads and writes process-wide values (session, mode, language,
//! color mode) through [`Store`] handles so tests and hosts can supply their
//! own.

use std::rc::Rc;

use tokio::sync::{oneshot, watch};
use tracing::{debug, info};

/// A single observable value with atomic replace.
pub trait Store<T> {
    /// Current value.
    fn get(&self) -> T;

    /// Replace the value and notify subscribers.
    fn set(&self, value: T);

    /// Receiver that observes every later `set`.
    fn subscribe(&self) -> watch::Receiver<T>;
}

/// How collaborators are injected.
pub type StoreHandle<T> = Rc<dyn Store<T>>;

/// In-memory [`Store`] backed by a `watch` channel.
///
/// Clones share the same value. Needs no async runtime.
#[derive(Debug)]
pub struct Atom<T> {
    tx: Rc<watch::Sender<T>>,
}

impl<T> Clone for Atom<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Rc::clone(&self.tx),
        }
    }
}

impl<T: Clone + 'static> Atom<T> {
    pub fn new(initial: T) -> Self {
        Self {
            tx: Rc::new(watch::Sender::new(initial)),
        }
    }

    /// Modify the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Type-erased handle sharing this atom's value.
    pub fn handle(&self) -> StoreHandle<T> {
        Rc::new(self.clone())
    }
}

impl<T: Clone> Store<T> for Atom<T> {
    fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

/// Pass every new value seen by `rx` to `on_change`.
///
/// Returns as soon as `stop` fires or its sender is dropped, without waiting
/// for another notification. Also returns once the store is gone.
pub async fn forward_changes<T, F>(
    mut rx: watch::Receiver<T>,
    mut stop: oneshot::Receiver<()>,
    on_change: F,
) where
    T: Clone,
    F: Fn(T),
{
    loop {
        tokio::select! {
            biased;
            _ = &mut stop => {
                debug!("Store listener detached");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let value = rx.borrow_and_update().clone();
                on_change(value);
            }
        }
    }
}

/// Stored connection credentials for the dae endpoint.
#[derive(Clone)]
pub struct Session {
    token: StoreHandle<String>,
    endpoint_url: StoreHandle<String>,
}

impl Session {
    pub fn new(token: StoreHandle<String>, endpoint_url: StoreHandle<String>) -> Self {
        Self { token, endpoint_url }
    }

    /// Session over fresh in-memory atoms with no token.
    pub fn in_memory(endpoint_url: impl Into<String>) -> Self {
        Self::new(
            Atom::new(String::new()).handle(),
            Atom::new(endpoint_url.into()).handle(),
        )
    }

    pub fn token(&self) -> String {
        self.token.get()
    }

    pub fn endpoint_url(&self) -> String {
        self.endpoint_url.get()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.token.set(token.into());
    }

    pub fn set_endpoint_url(&self, url: impl Into<String>) {
        self.endpoint_url.set(url.into());
    }

    pub fn subscribe_endpoint_url(&self) -> watch::Receiver<String> {
        self.endpoint_url.subscribe()
    }

    /// Returns true if an endpoint URL is stored.
    pub fn is_configured(&self) -> bool {
        !self.endpoint_url().is_empty()
    }

    /// Forget the token and endpoint URL.
    ///
    /// Screens that read the session treat empty values as unconfigured.
    pub fn reset(&self) {
        info!("Clearing stored token and endpoint URL");
        self.token.set(String::new());
        self.endpoint_url.set(String::new());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    async fn wait_for(seen: &RefCell<Vec<i32>>, value: i32) {
        while seen.borrow().last() != Some(&value) {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_atom_get_set() {
        let atom = Atom::new(1);
        assert_eq!(atom.get(), 1);

        atom.set(2);
        assert_eq!(atom.get(), 2);

        atom.update(|v| *v += 40);
        assert_eq!(atom.get(), 42);
    }

    #[test]
    fn test_atom_clones_share_value() {
        let atom = Atom::new("a".to_string());
        let handle = atom.handle();

        handle.set("b".to_string());
        assert_eq!(atom.get(), "b");
    }

    #[test]
    fn test_subscriber_sees_changes() {
        let atom = Atom::new(false);
        let mut rx = atom.subscribe();
        assert!(!rx.has_changed().unwrap());

        atom.set(true);
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());
    }

    #[test]
    fn test_session_reset_clears_both_values() {
        let session = Session::in_memory("http://127.0.0.1:2023/graphql");
        session.set_token("secret");
        assert!(session.is_configured());

        session.reset();
        assert_eq!(session.token(), "");
        assert_eq!(session.endpoint_url(), "");
        assert!(!session.is_configured());

        // Already empty values stay empty.
        session.reset();
        assert_eq!(session.token(), "");
        assert_eq!(session.endpoint_url(), "");
    }

    #[test]
    fn test_session_over_shared_atoms() {
        let token = Atom::new("t".to_string());
        let endpoint = Atom::new("http://localhost".to_string());
        let session = Session::new(token.handle(), endpoint.handle());

        session.reset();
        assert_eq!(token.get(), "");
        assert_eq!(endpoint.get(), "");
    }

    #[tokio::test]
    async fn test_forward_changes_until_stopped() {
        let atom = Atom::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (stop_tx, stop_rx) = oneshot::channel();

        let sink = Rc::clone(&seen);
        let listener = forward_changes(atom.subscribe(), stop_rx, move |v| {
            sink.borrow_mut().push(v);
        });
        let driver = async {
            atom.set(1);
            wait_for(&seen, 1).await;
            atom.set(2);
            wait_for(&seen, 2).await;
            stop_tx.send(()).unwrap();
        };
        tokio::join!(listener, driver);

        atom.set(3);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_stop_detaches_without_a_notification() {
        let atom = Atom::new("en".to_string());
        let (stop_tx, stop_rx) = oneshot::channel();
        stop_tx.send(()).unwrap();

        // Nothing ever changes the value; the listener must still return.
        forward_changes(atom.subscribe(), stop_rx, |v: String| {
            panic!("unexpected change to {v}");
        })
        .await;
        assert_eq!(atom.get(), "en");
    }

    #[tokio::test]
    async fn test_dropped_stop_sender_detaches() {
        let atom = Atom::new(false);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        drop(stop_tx);

        forward_changes(atom.subscribe(), stop_rx, |_| panic!("unexpected change")).await;
    }

    #[tokio::test]
    async fn test_dropped_store_ends_listener() {
        let atom = Atom::new(1);
        let rx = atom.subscribe();
        let (_stop_tx, stop_rx) = oneshot::channel();
        drop(atom);

        forward_changes(rx, stop_rx, |_: i32| panic!("unexpected change")).await;
    }
}
