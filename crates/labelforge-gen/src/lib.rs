//! Label Generation Client
//!
//! Wraps the external generation capability in a market-aware pipeline:
//!
//! ```text
//! product → registry lookup → prompt → capability (bounded) → parse → validate
//!                                           ↓ any failure
//!                                    fallback synthesis
//! ```
//!
//! The fallback path never errors, so a caller always receives a schema-valid
//! label for a known market, at degraded content quality when the capability
//! is unavailable.

pub mod capability;
pub mod client;
pub mod fallback;
pub mod parse;
pub mod prompt;
pub mod retry;

pub use capability::{CapabilityError, GenerationCapability, GenerationRequest, HttpCapability};
pub use client::GenerationClient;
pub use retry::RetryPolicy;
