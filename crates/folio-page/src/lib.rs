//! Page controller for Folio.
//!
//! Holds the page's mutable state in an explicit [`UiState`] owned by a
//! single [`PageController`]; controller methods are the only mutators.
//! User interactions map to methods:
//!
//! | interaction                  | method                                   |
//! |------------------------------|------------------------------------------|
//! | page load                    | [`PageController::start`]                |
//! | navigation click             | [`PageController::click_nav`]            |
//! | click on a link in content   | [`PageController::click_content_link`]   |
//! | search submit                | [`PageController::search`]               |
//!
//! Loads are split into [`PageController::begin_load`] (fetch, take a
//! ticket) and [`PageController::complete_load`] (render, commit). Only the
//! most recently issued ticket commits, so an older load finishing last
//! cannot overwrite newer content.

mod controller;
mod links;
mod messages;
mod notify;
mod search;
mod state;

pub use controller::{LinkAction, LoadOutcome, PageController, PageError, PendingLoad};
pub use links::LinkPostProcessor;
pub use messages::Messages;
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use search::{
    HIGHLIGHT_CLASS, SearchError, Segment, TermMatcher, clear_highlights, highlight,
};
pub use state::{CONTENT_CONTAINER_ID, LoadTicket, NavEntry, UiState};
