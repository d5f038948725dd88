//! Pure coalescing components, free of I/O and timers.

pub mod pagination;
pub mod query;
pub mod scroll;
pub mod selection;
pub mod view;

pub use pagination::{PageEvent, PageSnapshot, PageSource, Paged, Pager};
pub use query::{Coalesced, QueryCoalescer};
pub use scroll::ScrollThreshold;
pub use selection::navigation_for_tap;
pub use view::{ViewComposer, ViewUpdate};
