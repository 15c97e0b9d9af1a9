//! Pure mappings from an [`AggregateReport`](crate::domain::AggregateReport)
//! to the accept/reject verdict and the human-readable assessment.
mod assessment;
mod threshold;

pub use assessment::{Assessment, assess};
pub use threshold::{Verdict, evaluate};
