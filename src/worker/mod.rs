//! TCP transport for remote workers: one newline-delimited JSON `attack`
//! request per connection, answered by a single `report` or `error` line.
mod protocol;
mod tcp;


pub use protocol::{
    AttackMessage, ErrorMessage, MAX_MESSAGE_BYTES, RemoteErrorKind, ReportMessage, WireMessage,
    read_message, send_message,
};
pub use tcp::TcpWorkerAdapter;
