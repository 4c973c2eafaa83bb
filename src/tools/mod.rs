//! Tool metadata - descriptors and the read-only descriptor registry.
//!
//! Descriptors own the *contract* of each remote action (what must be sent);
//! the remote executor owns the implementation.

pub mod descriptor;
pub mod registry;

pub use descriptor::ToolDescriptor;
pub use registry::DescriptorRegistry;
