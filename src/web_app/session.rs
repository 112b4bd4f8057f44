// web_app/session.rs - Fetch bookkeeping for one page session
//
// The reducer has no notion of request identity, so the session tags
// every fetch it hands out with the generation that was current when
// the fetch started. Any filter/sort change bumps the generation; an
// outcome carrying an older generation is dropped (last-request-wins).

use crate::web_app::model::{Product, SearchRequest};
use crate::web_app::pages::search::{transition, SearchAction, SearchState};

/// Proof that a fetch was started for a given state snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub request: SearchRequest,
}

/// How a ticketed fetch ended
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    Fetched(Vec<Product>),
    /// Error or slow load
    Abandoned,
}

/// What `complete` did with an outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A later action superseded the ticket; state left untouched
    Stale,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    generation: u64,
    /// Generation of the ticket still awaiting its outcome
    issued: Option<u64>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run an action through the reducer
    pub fn dispatch(&mut self, action: SearchAction) {
        if action.requests_fetch() {
            self.generation += 1;
        }
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, action);
    }

    /// Hand out a ticket when a fetch is due and none is out for the
    /// current generation yet
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.state.fetch_pending || self.issued == Some(self.generation) {
            return None;
        }
        self.issued = Some(self.generation);
        Some(FetchTicket {
            generation: self.generation,
            request: self.state.request(),
        })
    }

    /// Report a fetch outcome back. Each ticket lands at most once.
    pub fn complete(&mut self, ticket: &FetchTicket, outcome: FetchOutcome) -> Completion {
        if ticket.generation != self.generation || self.issued != Some(ticket.generation) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale fetch outcome"
            );
            return Completion::Stale;
        }
        self.issued = None;
        let action = match outcome {
            FetchOutcome::Fetched(products) => SearchAction::ProductsFetched(products),
            FetchOutcome::Abandoned => SearchAction::FetchAbandoned,
        };
        self.dispatch(action);
        Completion::Applied
    }
}
