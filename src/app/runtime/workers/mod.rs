/// Generic pagination worker (debounced first page, cursor continuation).
pub mod pagination;
/// Popular/trending list worker.
pub mod popular;
