//! Library entry for pagesift: a reactive search-and-pagination orchestrator.
//!
//! Raw UI intents (typed text, cancel/clear, appearance, row visibility, taps)
//! go in; one de-duplicated display list plus focus/loading/visibility signals
//! come out. See [`app::spawn_session`].

pub mod analytics;
pub mod app;
pub mod args;
pub mod logic;
pub mod settings;
pub mod sources;
pub mod state;
pub mod util;
