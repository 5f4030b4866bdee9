use std::{default::Default, time::Duration};

use trellis_shared::{constants::DEFAULT_PRIORITY, Priority};

/// Security used on the data exchange connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecurityMode {
    None,
    Tls,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportKind {
    Udp,
    Tcp,
    WebSocket,
}

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Host name or address of the server
    pub host: String,
    /// Service name or port number of the server
    pub service: String,
    pub security: SecurityMode,
    pub transport: TransportKind,
    /// Rate at which the caller ticks the session, also reported to the
    /// server on connect so it can pace updates
    pub fps: f32,
    /// Added to the outbound queue size the server advertises on connect
    pub out_queue_size_adjustment: i32,
    /// Priority attached to every command the client emits
    pub priority: Priority,
    pub client_name: String,
    pub client_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            service: "12345".to_string(),
            security: SecurityMode::None,
            transport: TransportKind::Udp,
            fps: 30.0,
            out_queue_size_adjustment: -576,
            priority: DEFAULT_PRIORITY,
            client_name: "Trellis Client".to_string(),
            client_version: "0.1".to_string(),
        }
    }
}

impl ClientConfig {
    /// Time between two ticks of the session loop.
    /// Falls back to one second when `fps` gives no usable interval.
    pub fn tick_interval(&self) -> Duration {
        if self.fps > 0.0 {
            if let Ok(interval) = Duration::try_from_secs_f32(1.0 / self.fps) {
                if !interval.is_zero() {
                    return interval;
                }
            }
        }
        Duration::from_secs(1)
    }

    /// Security and transport packed into the connect request flag word.
    pub fn connect_flags(&self) -> u16 {
        let security = match self.security {
            SecurityMode::None => 1,
            SecurityMode::Tls => 2,
        };
        let transport = match self.transport {
            TransportKind::Udp => 4,
            TransportKind::Tcp => 8,
            TransportKind::WebSocket => 16,
        };
        security | transport
    }

    /// Outbound queue size to request once the server advertised its own.
    pub fn adjusted_queue_size(&self, advertised: u32) -> u32 {
        advertised.saturating_add_signed(self.out_queue_size_adjustment)
    }
}
