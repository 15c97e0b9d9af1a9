//! Core library for the `swarm` CLI.
//!
//! `swarm attack` splits one HTTP benchmark across a fleet of remote workers,
//! waits for every worker's summary, and rebuilds a single global latency
//! distribution from the per-worker percentile lists. The modules below are
//! the building blocks the binary is assembled from: dispatch, aggregation,
//! threshold evaluation, and reporting.
pub mod aggregate;
pub mod app;
pub mod args;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod entry;
pub mod error;
mod logger;
pub mod report;
pub mod shutdown;
mod shutdown_handlers;
pub mod verdict;
pub mod worker;
