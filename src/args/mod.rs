//! Command-line surface of the `swarm` binary.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{AttackArgs, Command, SwarmArgs};
pub use types::WorkerSpec;

pub(crate) use parsers::{parse_duration_arg, parse_header, parse_threshold};
