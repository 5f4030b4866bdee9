pub mod helpers;

pub use helpers::*;
pub use local_transport::{LocalCommandSink, LocalEventQueue, LOCAL_QUEUE_SIZE};
