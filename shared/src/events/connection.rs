use std::fmt;

use crate::MirrorError;

/// Ways a user can prove their identity to the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// Asks the server to answer with the list of methods it accepts
    None,
    Password,
}

impl AuthMethod {
    pub fn code(self) -> u8 {
        match self {
            AuthMethod::None => 1,
            AuthMethod::Password => 2,
        }
    }
}

impl TryFrom<u8> for AuthMethod {
    type Error = MirrorError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(AuthMethod::None),
            2 => Ok(AuthMethod::Password),
            code => Err(MirrorError::UnknownAuthMethod { code }),
        }
    }
}

/// Why a connection ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminateReason {
    HostUnknown,
    HostDown,
    ServerDown,
    AuthFailed,
    Timeout,
    Error,
    Client,
    Server,
}

impl TerminateReason {
    pub fn code(self) -> u8 {
        match self {
            TerminateReason::HostUnknown => 1,
            TerminateReason::HostDown => 2,
            TerminateReason::ServerDown => 3,
            TerminateReason::AuthFailed => 4,
            TerminateReason::Timeout => 5,
            TerminateReason::Error => 6,
            TerminateReason::Client => 7,
            TerminateReason::Server => 8,
        }
    }
}

impl TryFrom<u8> for TerminateReason {
    type Error = MirrorError;

    fn try_from(code: u8) -> Result<Self, MirrorError> {
        match code {
            1 => Ok(TerminateReason::HostUnknown),
            2 => Ok(TerminateReason::HostDown),
            3 => Ok(TerminateReason::ServerDown),
            4 => Ok(TerminateReason::AuthFailed),
            5 => Ok(TerminateReason::Timeout),
            6 => Ok(TerminateReason::Error),
            7 => Ok(TerminateReason::Client),
            8 => Ok(TerminateReason::Server),
            code => Err(MirrorError::UnknownTerminateReason { code }),
        }
    }
}

impl fmt::Display for TerminateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TerminateReason::HostUnknown => "host could not be found",
            TerminateReason::HostDown => "host is not accessible",
            TerminateReason::ServerDown => "server is not running",
            TerminateReason::AuthFailed => "bad username or password",
            TerminateReason::Timeout => "connection timed out",
            TerminateReason::Error => "connection was broken",
            TerminateReason::Client => "connection terminated by client",
            TerminateReason::Server => "connection terminated by server",
        };
        f.write_str(text)
    }
}
