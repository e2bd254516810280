//! Interactive search session.
//!
//! [`state`] holds the form, results and view settings together with a pure
//! `update(state, action) -> (state, effects)` function. [`driver`] runs those
//! effects: it owns the debounce timer and the fetch tasks and feeds their
//! outcomes back as actions.

pub mod driver;
pub mod state;

pub use driver::SearchSession;
pub use state::{Action, Effect, Notice, NoticeKind, SearchState, Status, update};
