//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod clock;

// Re-export main types
pub use clock::Clock;
