//! Everything shown or written after an attack: the printed summary, the
//! per-worker comparison CSV and the JSON export.
mod export;
mod outcome;
mod summary;


pub use export::{export_json, write_comparison_csv};
pub use outcome::{AttackOutcome, WorkerOutcome};
pub use summary::{print_summary, summary_lines};
