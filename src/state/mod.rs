//! State module: value types and the per-session component state.

pub mod session;
pub mod types;

pub use session::SessionState;
pub use types::{
    Cursor, FocusState, Intent, Item, Navigation, Page, Provenance, SearchParams, SessionOutput,
    SortOrder,
};
