pub mod connection;
pub mod entity_event;
