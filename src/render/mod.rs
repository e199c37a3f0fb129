//! Output rendering for a frozen model.

pub mod manifest;
pub mod summary;

pub use manifest::render_manifest;
pub use summary::render_summary;
