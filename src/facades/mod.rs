//! Typed facades over the remote toolkits.
//!
//! Each facade is a descriptor table plus thin async methods. All validation,
//! unwrapping and error classification happens in [`ToolEngine`]; a facade only
//! names its action and the shape it expects back in `data`.
//!
//! [`ToolEngine`]: crate::engine::ToolEngine

pub mod messaging;
pub mod sheets;
pub mod web;

use crate::tools::ToolDescriptor;

pub use messaging::MessagingTools;
pub use sheets::SheetsTools;
pub use web::WebTools;

/// Descriptors for every built-in facade action.
pub fn all_descriptors() -> Vec<ToolDescriptor> {
    let mut all = web::descriptors();
    all.extend(sheets::descriptors());
    all.extend(messaging::descriptors());
    all
}
