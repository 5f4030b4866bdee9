use thiserror::Error;

/// Failures reported by the transport underneath a session
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not accept an outgoing command
    #[error("Failed to send command: {reason}")]
    SendFailed { reason: String },

    /// The connection broke while reading incoming events
    #[error("Failed to receive events: {reason}")]
    ReceiveFailed { reason: String },
}
