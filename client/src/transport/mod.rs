mod error;

pub use error::TransportError;

pub use inner::{CommandSender, EventReceiver};

mod inner {

    use trellis_shared::{EntityEvent, OutgoingCommand};

    use super::TransportError;

    /// Source of decoded entity events pushed by the server.
    pub trait EventReceiver {
        /// Receives the next pending event, or `Ok(None)` once nothing more
        /// has arrived for this tick
        fn receive(&mut self) -> Result<Option<EntityEvent>, TransportError>;

        /// Outbound queue size the server advertised with its connect
        /// accept, if the transport carries one
        fn advertised_queue_size(&self) -> Option<u32> {
            None
        }
    }

    /// Sink for commands headed to the server.
    pub trait CommandSender {
        /// Queues a command for sending
        fn send(&mut self, command: OutgoingCommand) -> Result<(), TransportError>;
    }
}
