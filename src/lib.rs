//! # Toolbridge Core - Remote Tool Invocation Engine
//!
//! Turns `(toolkit, action, params)` into typed result data or one
//! well-classified error:
//! - Static per-action descriptors (required params, enum constraints, defaults)
//! - Pre-flight parameter validation; invalid calls never reach the network
//! - Pluggable transport (HTTP executor out of the box)
//! - Envelope unwrapping and a single success/failure decision point
//! - Typed facades for web crawl, spreadsheet and team-messaging toolkits
//!
//! ## Architecture
//!
//! ```text
//!                    ┌──────────────────────────────────────┐
//!   facade call  →   │             ToolEngine               │
//!                    │  ┌──────────┐  ┌──────────┐          │
//!                    │  │Descriptor│→ │Validator │          │
//!                    │  │ Registry │  └────┬─────┘          │
//!                    │  └──────────┘       ↓                │
//!                    │               ┌───────────┐          │
//!                    │               │ Transport │ ←──────→ │  remote executor
//!                    │               └────┬──────┘          │
//!                    │                    ↓                 │
//!                    │  ┌──────────┐  ┌───────────┐         │
//!   data | Error  ←  │  │ Resolver │← │ Unwrapper │         │
//!                    │  └──────────┘  └───────────┘         │
//!                    └──────────────────────────────────────┘
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod engine;
pub mod envelope;
pub mod facades;
pub mod tools;
pub mod transport;
pub mod types;
pub mod validation;

// Internal utilities
pub mod observability;

pub use engine::{InvocationRequest, InvocationState, ToolEngine};
pub use envelope::{Envelope, InnerResult};
pub use tools::{DescriptorRegistry, ToolDescriptor};
pub use transport::{HttpTransport, TransportError, TransportInvoker};
pub use types::{Config, Error, ErrorKind, Result};
