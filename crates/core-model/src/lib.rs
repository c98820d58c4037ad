//! Presentation model for the pager: where the window sits over the current
//! document (`Viewport`) and which document is current (`DocumentList`).
//!
//! Neither type knows about text or terminals. Callers pass the extents they
//! need (`Bounds`) on every call, which keeps both types trivially testable
//! and lets a resize take effect on the next operation without bookkeeping.

mod navigator;
mod viewport;

pub use navigator::{DocumentList, NavOutcome};
pub use viewport::{Bounds, Viewport};
