// web_app/pages/search.rs - Search page state machine
//
// The product search page keeps its whole UI state in one SearchState
// value. Every change goes through `transition`, which is pure: the
// page (or a session driving it) decides when to fetch by looking at
// `fetch_pending`.
//
//   Idle --SetFilter|SetSortField|ToggleSortOrder--> Fetching
//   Fetching --ProductsFetched|FetchAbandoned--> Idle
//
// Filter/sort actions arriving while Fetching still apply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::web_app::error::SearchError;
use crate::web_app::model::{Product, SearchRequest, SortField};

/// UI-visible state of one page session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub products: Vec<Product>,
    pub filter: String,
    pub sort_by: SortField,
    pub ascending: bool,
    pub fetch_pending: bool,
}

impl Default for SearchState {
    /// Fresh session state. `fetch_pending` starts true so the first
    /// render triggers a fetch.
    fn default() -> Self {
        Self {
            products: Vec::new(),
            filter: String::new(),
            sort_by: SortField::VintageYear,
            ascending: true,
            fetch_pending: true,
        }
    }
}

/// Coarse phase derived from `fetch_pending`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Fetching,
}

/// Everything that can change a SearchState
#[derive(Clone, Debug, PartialEq)]
pub enum SearchAction {
    SetFilter(String),
    SetSortField(SortField),
    ToggleSortOrder,
    ProductsFetched(Vec<Product>),
    FetchAbandoned,
}

/// Wire vocabulary of serialized actions
pub const CHANGE_FILTER: &str = "change_filter";
pub const CHANGE_SORT_FIELD: &str = "change_sort_field";
pub const TOGGLE_SORT_ORDER: &str = "toggle_sort_order";
pub const UPDATE_PRODUCTS: &str = "update_products";
pub const CANCEL_UPDATE: &str = "cancel_update";

/// Serialized `{ "type": ..., "payload": ... }` form of an action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl SearchAction {
    /// Decode a serialized action.
    ///
    /// Fails with `InvalidAction` when the type tag is unknown or the
    /// payload does not fit the tag.
    pub fn from_wire(wire: WireAction) -> Result<Self, SearchError> {
        let invalid = || SearchError::InvalidAction(wire.kind.clone());
        match wire.kind.as_str() {
            CHANGE_FILTER => match &wire.payload {
                Value::String(text) => Ok(SearchAction::SetFilter(text.clone())),
                _ => Err(invalid()),
            },
            CHANGE_SORT_FIELD => serde_json::from_value(wire.payload.clone())
                .map(SearchAction::SetSortField)
                .map_err(|_| invalid()),
            TOGGLE_SORT_ORDER => Ok(SearchAction::ToggleSortOrder),
            UPDATE_PRODUCTS => serde_json::from_value(wire.payload.clone())
                .map(SearchAction::ProductsFetched)
                .map_err(|_| invalid()),
            CANCEL_UPDATE => Ok(SearchAction::FetchAbandoned),
            _ => Err(invalid()),
        }
    }

    pub fn to_wire(&self) -> WireAction {
        let (kind, payload) = match self {
            SearchAction::SetFilter(text) => (CHANGE_FILTER, Value::String(text.clone())),
            SearchAction::SetSortField(field) => (
                CHANGE_SORT_FIELD,
                Value::String(field.upstream_field().to_string()),
            ),
            SearchAction::ToggleSortOrder => (TOGGLE_SORT_ORDER, Value::Null),
            SearchAction::ProductsFetched(products) => (
                UPDATE_PRODUCTS,
                serde_json::to_value(products).unwrap_or(Value::Null),
            ),
            SearchAction::FetchAbandoned => (CANCEL_UPDATE, Value::Null),
        };
        WireAction {
            kind: kind.to_string(),
            payload,
        }
    }

    /// Actions that change what should be fetched
    pub fn requests_fetch(&self) -> bool {
        matches!(
            self,
            SearchAction::SetFilter(_) | SearchAction::SetSortField(_) | SearchAction::ToggleSortOrder
        )
    }
}

/// Apply one action to the page state
pub fn transition(state: SearchState, action: SearchAction) -> SearchState {
    match action {
        SearchAction::SetFilter(filter) => SearchState {
            filter,
            fetch_pending: true,
            ..state
        },
        SearchAction::SetSortField(sort_by) => SearchState {
            sort_by,
            fetch_pending: true,
            ..state
        },
        SearchAction::ToggleSortOrder => SearchState {
            ascending: !state.ascending,
            fetch_pending: true,
            ..state
        },
        SearchAction::ProductsFetched(products) => SearchState {
            products,
            fetch_pending: false,
            ..state
        },
        // Keep the last good list on failure or slow load
        SearchAction::FetchAbandoned => SearchState {
            fetch_pending: false,
            ..state
        },
    }
}

impl SearchState {
    pub fn phase(&self) -> SearchPhase {
        if self.fetch_pending {
            SearchPhase::Fetching
        } else {
            SearchPhase::Idle
        }
    }

    /// Request the page sends for the current filter and sort
    pub fn request(&self) -> SearchRequest {
        SearchRequest {
            filter: Some(self.filter.clone()),
            sort_by: Some(self.sort_by),
            ascending: self.ascending,
            ..SearchRequest::default()
        }
    }

    /// Action produced by activating a column header.
    ///
    /// Headers are inert while a fetch is pending and for the ID column.
    /// Activating the current sort column flips the direction.
    pub fn header_action(&self, field: SortField) -> Option<SearchAction> {
        if self.fetch_pending || !field.is_header_sortable() {
            return None;
        }
        if field == self.sort_by {
            Some(SearchAction::ToggleSortOrder)
        } else {
            Some(SearchAction::SetSortField(field))
        }
    }

    /// Action produced by submitting the filter box
    pub fn submit_filter(&self, text: impl Into<String>) -> SearchAction {
        SearchAction::SetFilter(text.into())
    }
}
