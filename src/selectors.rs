//! Memoized selectors.
//!
//! Every upstream value is published as a [`Shared`] carrying a [`Stamp`]. A
//! [`Selector`] remembers the stamps of the inputs it last ran with and only
//! recomputes when one of them differs. Results are `Shared` values themselves,
//! so selectors chain without re-running unchanged stages.

mod memo;
mod shared;

pub use memo::{Inputs, Selector};
pub use shared::{Shared, Stamp};
