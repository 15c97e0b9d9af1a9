use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Invalid worker '{value}'. Expected 'address' or 'id=address'.")]
    InvalidWorkerFormat { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Threshold must be a finite, positive number (got '{value}').")]
    InvalidThreshold { value: String },
    #[error("Missing URL (set --url or provide in config).")]
    MissingUrl,
    #[error("Worker entry {index} has an empty address.")]
    EmptyWorkerAddress { index: usize },
    #[error("Worker id {id:?} must not contain commas, quotes or line breaks.")]
    InvalidWorkerId { id: String },
    #[error("Duplicate worker id '{id}'.")]
    DuplicateWorkerId { id: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
