//! # Trellis Client
//! Keeps a local mirror of a server-authoritative node graph (nodes, their
//! tag groups and tags, and their layer trees) in step with the entity
//! events the server pushes, and produces the commands the client sends
//! back.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use trellis_shared::{
    constants, AuthMethod, Command, CustomType, EntityEvent, ItemId, Layer, LayerId, LayerTree,
    MirrorError, Node, NodeId, OutgoingCommand, PermissionBits, Priority, SubscribeTarget, Tag,
    TagGroup, TagGroupId, TagId, TerminateReason, UserId, Value, ValueType,
};

mod auth;
mod bootstrap;
mod client_config;
mod error;
mod session;
mod world;

pub mod transport;

pub use auth::{AuthReply, Authenticator, StaticCredentials};
pub use bootstrap::{BootstrapPolicy, DemoBootstrap, NoBootstrap, DEMO_TAGS};
pub use client_config::{ClientConfig, SecurityMode, TransportKind};
pub use error::SessionError;
pub use session::{MirrorSession, SessionState};
pub use world::{
    identity::SessionIdentity,
    registry::{EntityRegistry, MirrorState, SESSION_NODE_CUSTOM_TYPE},
};
