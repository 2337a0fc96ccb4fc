pub mod detail;
pub mod filter;
pub mod navigation;

pub use detail::{DetailResolver, DetailState, DetailView, LOAD_ERROR_MESSAGE};
pub use filter::{filter_suggestions, MAX_SUGGESTIONS, MIN_QUERY_CHARS};
pub use navigation::{Navigator, SearchSession};
