//! # Trellis Shared
//! Common types shared between the trellis crates: identifiers, value cells,
//! the inbound entity events, the outbound commands, and the entity model
//! that the client mirrors.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod constants;

mod commands;
mod events;
mod types;
mod value;
mod world;

pub use commands::command::{Command, OutgoingCommand, SubscribeTarget};
pub use events::{
    connection::{AuthMethod, TerminateReason},
    entity_event::EntityEvent,
};
pub use types::{
    CustomType, ItemId, LayerId, NodeId, PermissionBits, Priority, TagGroupId, TagId, UserId,
};
pub use value::{Value, ValueType};
pub use world::{
    error::MirrorError, layer::Layer, layer_tree::LayerTree, node::Node, tag::Tag,
    tag_group::TagGroup,
};
