//! Outbound adapters: implementations of domain ports against real
//! infrastructure.

pub mod persistence;
