//! Cached remote values.
//!
//! A [`Query`] keeps the last fetched value visible while a refresh is in
//! flight and after a refresh fails. Fetches are numbered as they start, and a
//! result is only applied if no later-started fetch has already landed.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::store::{Atom, Store};

/// Cache key of dae's running status.
pub const QUERY_KEY_RUNNING: &str = "running";

/// Snapshot of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// Last successfully fetched value.
    pub data: Option<T>,
    /// Error of the last applied fetch, if it failed.
    pub error: Option<String>,
    /// Number of fetches started but not finished.
    pub in_flight: usize,
    /// Set by [`Query::invalidate`] until the next successful fetch.
    pub stale: bool,
    /// When `data` was last replaced.
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            in_flight: 0,
            stale: false,
            updated_at: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_fetching(&self) -> bool {
        self.in_flight > 0
    }
}

/// Proof that a fetch was started; hand it back to [`Query::finish`].
///
/// Dropping an unfinished ticket (a cancelled fetch) releases its `in_flight`
/// slot without touching the cached value.
#[must_use = "a started fetch must be finished"]
pub struct FetchTicket<T: Clone + 'static> {
    seq: u64,
    state: Atom<QueryState<T>>,
    settled: bool,
}

impl<T: Clone + 'static> Drop for FetchTicket<T> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        debug!(seq = self.seq, "Fetch abandoned before finishing");
        self.state.update(|s| s.in_flight = s.in_flight.saturating_sub(1));
    }
}

/// Shared handle to one cached remote value.
pub struct Query<T> {
    key: &'static str,
    state: Atom<QueryState<T>>,
    issued: Rc<Cell<u64>>,
    applied: Rc<Cell<u64>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            state: self.state.clone(),
            issued: Rc::clone(&self.issued),
            applied: Rc::clone(&self.applied),
        }
    }
}

impl<T: Clone + 'static> Query<T> {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            state: Atom::new(QueryState::default()),
            issued: Rc::new(Cell::new(0)),
            applied: Rc::new(Cell::new(0)),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn state(&self) -> QueryState<T> {
        self.state.get()
    }

    pub fn data(&self) -> Option<T> {
        self.state.get().data
    }

    pub fn is_fetching(&self) -> bool {
        self.state.get().is_fetching()
    }

    pub fn is_stale(&self) -> bool {
        self.state.get().stale
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }

    /// Mark the cached value as outdated. It stays visible until replaced.
    pub fn invalidate(&self) {
        debug!(key = self.key, "Invalidating query");
        self.state.update(|s| s.stale = true);
    }

    /// Run `fetcher` and apply its result unless a later fetch landed first.
    pub async fn fetch<F>(&self, fetcher: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        let ticket = self.begin();
        let result = fetcher.await;
        self.finish(ticket, &result);
        result
    }

    /// Record the start of a fetch.
    pub fn begin(&self) -> FetchTicket<T> {
        let seq = self.issued.get() + 1;
        self.issued.set(seq);
        self.state.update(|s| s.in_flight += 1);
        FetchTicket {
            seq,
            state: self.state.clone(),
            settled: false,
        }
    }

    /// Record the result of the fetch behind `ticket`.
    ///
    /// Returns true if the result was applied.
    pub fn finish(&self, mut ticket: FetchTicket<T>, result: &Result<T, CoreError>) -> bool {
        ticket.settled = true;
        let latest = ticket.seq > self.applied.get();
        if latest {
            self.applied.set(ticket.seq);
        } else {
            debug!(
                key = self.key,
                seq = ticket.seq,
                applied = self.applied.get(),
                "Discarding superseded query result"
            );
        }

        self.state.update(|s| {
            s.in_flight = s.in_flight.saturating_sub(1);
            if !latest {
                return;
            }
            match result {
                Ok(value) => {
                    s.data = Some(value.clone());
                    s.error = None;
                    s.stale = false;
                    s.updated_at = Some(Utc::now());
                }
                Err(e) => s.error = Some(e.to_string()),
            }
        });

        latest
    }
}

/// Keyed cache of queries. Every caller asking for a key shares one state.
#[derive(Clone, Default)]
pub struct QueryClient {
    queries: Rc<RefCell<HashMap<&'static str, Box<dyn Any>>>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared query for `key`.
    ///
    /// A key holds one value type. Asking for a different type replaces the
    /// cached entry.
    pub fn query<T: Clone + 'static>(&self, key: &'static str) -> Query<T> {
        let mut queries = self.queries.borrow_mut();

        if let Some(entry) = queries.get(key) {
            match entry.downcast_ref::<Query<T>>() {
                Some(existing) => return existing.clone(),
                None => warn!(key, "Query key reused with a different type"),
            }
        }

        let query = Query::new(key);
        queries.insert(key, Box::new(query.clone()));
        query
    }

    /// Shared running-status query.
    pub fn running(&self) -> Query<bool> {
        self.query(QUERY_KEY_RUNNING)
    }
}
