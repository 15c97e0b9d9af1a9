use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::aggregate::PercentileAlgorithm;

use super::defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_CONNECT_ATTEMPTS, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUESTS,
    DEFAULT_TIMEOUT,
};
use super::parsers::{
    parse_duration_arg, parse_header, parse_positive_u64, parse_threshold, parse_worker,
};
use super::types::WorkerSpec;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "swarm",
    version,
    about = "Coordinates a fleet of remote load-generation workers against one URL and merges their summaries into a single report."
)]
pub struct SwarmArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Split a benchmark across the fleet and report the combined result
    Attack(AttackArgs),
}

#[derive(Debug, Args, Clone)]
pub struct AttackArgs {
    /// Target URL
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Total number of requests, split evenly across workers
    #[arg(long, short = 'n', default_value_t = DEFAULT_REQUESTS, value_parser = parse_positive_u64)]
    pub requests: u64,

    /// Total concurrency, split evenly across workers
    #[arg(long, short = 'c', default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_positive_u64)]
    pub concurrency: u64,

    /// Extra request header, 'Key: Value' (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Worker address, 'host:port' or 'id=host:port' (repeatable)
    #[arg(long = "worker", short = 'w', value_parser = parse_worker)]
    pub workers: Vec<WorkerSpec>,

    /// Credential reference sent to workers that have none of their own
    #[arg(long)]
    pub credential: Option<String>,

    /// Config file (.toml or .json); defaults to ./swarm.toml or ./swarm.json
    #[arg(long)]
    pub config: Option<String>,

    /// Per-worker deadline (supports ms/s/m/h)
    #[arg(long, default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Connection attempts per worker before it counts as unreachable
    #[arg(long = "connect-attempts", default_value_t = DEFAULT_CONNECT_ATTEMPTS)]
    pub connect_attempts: u32,

    /// Limit for a single connection attempt (supports ms/s/m/h); the whole
    /// connect phase is also capped at half of --timeout
    #[arg(long = "connect-timeout", default_value = DEFAULT_CONNECT_TIMEOUT, value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Reject the attack unless mean time per request stays below this (ms)
    #[arg(long = "max-time-per-request", short = 'p', value_parser = parse_threshold)]
    pub max_time_per_request: Option<f64>,

    /// Reject the attack unless total requests per second stays above this
    #[arg(long = "min-rps", short = 'r', value_parser = parse_threshold)]
    pub min_rps: Option<f64>,

    /// Seed for percentile resampling, for reproducible reports
    #[arg(long)]
    pub seed: Option<u64>,

    /// Global percentile reconstruction
    #[arg(long, value_enum, default_value_t = PercentileAlgorithm::Resampling)]
    pub algorithm: PercentileAlgorithm,

    /// Write a per-worker percentile comparison CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Debug logging (overridden by SWARM_LOG / RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
