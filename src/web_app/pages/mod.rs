// web_app/pages/mod.rs - Page-level state
//
// Each page keeps its state in a reducer-driven value; rendering lives
// elsewhere.

pub mod search;

pub use search::{transition, SearchAction, SearchPhase, SearchState};
