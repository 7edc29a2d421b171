//! # Scout Agent
//!
//! Transport to the remote agent platform. Implements
//! [`scout_core::agent::AgentInvoker`] over HTTP with `reqwest`.

pub mod client;

pub use client::AgentClient;
