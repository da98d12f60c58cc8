//! Data contracts behind the search screens: applied-filter chips and the
//! search navigation stack.

pub mod filters;
pub mod navigation;

pub use filters::{dismiss_chip, filter_chips, AppliedFilter, ChipValue, FilterChip, SearchFilterKey, SearchStore};
pub use navigation::{SearchRoute, SearchStack};
