//! Path classification: raw path strings to [`PathAddress`] values and back
//! to host-addressable display forms. No I/O happens here.
//!
//! [`PathAddress`]: packres_api::PathAddress

pub mod classify;
pub mod display;

pub use classify::PathClassifier;
pub use display::{normalize_lexically, to_open_file_path};
