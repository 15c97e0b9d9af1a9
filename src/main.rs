use std::process::ExitCode;

use swarm_attack::error::AppResult;

fn main() -> AppResult<ExitCode> {
    swarm_attack::entry::run()
}
