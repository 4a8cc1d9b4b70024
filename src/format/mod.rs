//! Formatting engine
//!
//! Applies a [`StyleAction`](crate::models::StyleAction) to the current
//! selection. The dispatcher decides whether the selection exactly covers an
//! existing styled container (toggle it in place) or needs a new wrapper
//! element; both paths finish with the normalization passes.
//!
//! ## Modules
//!
//! - `dispatcher`: routing and selection validation
//! - `updater`: in-place toggling on an existing container
//! - `wrapper`: extracting the range into a new styled element
//! - `normalize`: de-duplication and plain-wrapper flattening

pub mod dispatcher;
pub mod normalize;
mod updater;
mod wrapper;

pub use dispatcher::{apply_style_action, try_apply_style_action};
pub use normalize::{dedupe_token, flatten_plain_wrappers};
