use thiserror::Error;

use trellis_shared::TerminateReason;

use crate::transport::TransportError;

/// Conditions that end a session's event loop
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Operation needs an accepted connection
    #[error("Session is not connected")]
    NotConnected,

    /// The transport failed; the mirror has been torn down
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The server (or this client) closed the connection
    #[error("Connection terminated: {0}")]
    Terminated(TerminateReason),
}
