pub mod events;

pub use events::*;
pub use test_session::{init_logger, TestSession};
