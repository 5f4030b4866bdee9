use crate::{LayerId, NodeId, PermissionBits, Priority, UserId};

// Well-known nodes
pub const ROOT_NODE_ID: NodeId = 0;
pub const AVATAR_PARENT_NODE_ID: NodeId = 1;
pub const USERS_PARENT_NODE_ID: NodeId = 2;
pub const SCENE_PARENT_NODE_ID: NodeId = 3;

// Reserved ids, never assigned to a live entity. As a parent id they
// mean "no parent".
pub const RESERVED_NODE_ID: NodeId = 0xFFFF_FFFF;
pub const RESERVED_LAYER_ID: LayerId = 0xFFFF;
/// Owner of the root node, which no user owns.
pub const RESERVED_USER_ID: UserId = 0;

pub const DEFAULT_PRIORITY: Priority = 128;

// Node permission bits
pub const PERM_NODE_READ: PermissionBits = 1;
pub const PERM_NODE_WRITE: PermissionBits = 2;

/// Longest string8 element the server will produce, in bytes.
pub const STRING8_MAX_SIZE: usize = 255;
