//! Runs a [`SearchState`] against real time and a real source.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use super::state::{Action, Effect, SearchState, update};
use crate::application::services::search_service::{Resolution, SearchService};
use crate::domain::debounce::Debouncer;
use crate::domain::query::CanonicalQuery;
use crate::domain::repositories::CollegeSource;

type FetchOutcome = (u64, Result<Resolution, JoinError>);

/// Owns the debounce timer and the in-flight fetches of one search form.
///
/// Actions go in through [`SearchSession::dispatch`]; timer expiries and
/// fetch answers are fed back in by [`SearchSession::tick`].
pub struct SearchSession<S: CollegeSource + ?Sized + 'static> {
    service: Arc<SearchService<S>>,
    state: SearchState,
    debouncer: Debouncer<CanonicalQuery>,
    in_flight: JoinSet<FetchOutcome>,
}

enum Event {
    Settled(CanonicalQuery),
    Fetched(Result<FetchOutcome, JoinError>),
}

impl<S: CollegeSource + ?Sized + 'static> SearchSession<S> {
    pub fn new(service: Arc<SearchService<S>>, debounce: Duration) -> Self {
        Self {
            service,
            state: SearchState::new(),
            debouncer: Debouncer::new(debounce),
            in_flight: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Applies `action` and starts whatever effects it requests.
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, action);
        self.state = state;

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleDebounce(query) => self.debouncer.push(query),
            Effect::CancelDebounce => {
                if let Some(query) = self.debouncer.cancel() {
                    debug!("Cancelled pending search {}", query);
                }
            }
            Effect::Fetch { request_id, query } => {
                debug!("Fetch #{} for {}", request_id, query);
                let service = Arc::clone(&self.service);
                // The inner task isolates a panicking fetch so its request id
                // still comes back.
                self.in_flight.spawn(async move {
                    let outcome =
                        tokio::spawn(async move { service.resolve(&query).await }).await;
                    (request_id, outcome)
                });
            }
        }
    }

    /// True when no debounce is pending and no fetch is in flight.
    pub fn is_idle(&self) -> bool {
        !self.debouncer.is_pending() && self.in_flight.is_empty()
    }

    /// Waits for the next timer expiry or fetch answer and applies it.
    ///
    /// Returns false immediately when the session is idle.
    pub async fn tick(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }

        let event = tokio::select! {
            Some(query) = self.debouncer.settled() => Event::Settled(query),
            Some(joined) = self.in_flight.join_next() => Event::Fetched(joined),
            else => return false,
        };

        match event {
            Event::Settled(query) => self.dispatch(Action::QuerySettled(query)),
            Event::Fetched(Ok((request_id, Ok(resolution)))) => {
                self.dispatch(Action::ResultsArrived {
                    request_id,
                    resolution,
                });
            }
            Event::Fetched(Ok((request_id, Err(e)))) => {
                warn!("Fetch #{} aborted: {}", request_id, e);
                self.dispatch(Action::FetchAborted { request_id });
            }
            Event::Fetched(Err(e)) => warn!("Fetch task lost: {}", e),
        }

        true
    }

    /// Processes events until the session is idle.
    pub async fn settle(&mut self) {
        while self.tick().await {}
    }
}
