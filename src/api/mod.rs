//! Typed client for the school REST backend.
//!
//! [`ApiClient`] turns resource verbs into HTTP calls and checks every
//! response status; [`Transport`] is the seam between it and the network.

pub use client::*;
pub use transport::*;

mod client;
mod transport;
