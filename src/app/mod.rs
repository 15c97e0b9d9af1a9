mod attack;


pub use attack::{AttackRequest, report_outcome, run_attack};
