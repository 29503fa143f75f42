//! Transport ports
//!
//! The SDK never talks to the network directly. Requests go through a
//! [`Fetch`](ports::Fetch) implementation so tests and embedders can swap the
//! HTTP stack.

pub mod ports;
