use thiserror::Error;

use crate::{LayerId, NodeId, TagGroupId, TagId};

/// Errors that can occur while applying entity events to the mirror
///
/// None of these are fatal. The server is authoritative and may refer to
/// entities the mirror has not heard about yet (or has already forgotten),
/// so callers log them and carry on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MirrorError {
    // Lookup Misses

    /// Node is not present in the mirror
    #[error("Node {node_id} not found in mirror")]
    NodeNotFound { node_id: NodeId },

    /// Tag group is not present on an existing node
    #[error("TagGroup {taggroup_id} not found on node {node_id}")]
    TagGroupNotFound {
        node_id: NodeId,
        taggroup_id: TagGroupId,
    },

    /// Tag is not present in an existing tag group
    #[error("Tag {tag_id} not found in taggroup {taggroup_id} of node {node_id}")]
    TagNotFound {
        node_id: NodeId,
        taggroup_id: TagGroupId,
        tag_id: TagId,
    },

    /// Layer is not present in an existing node's layer tree
    #[error("Layer {layer_id} not found on node {node_id}")]
    LayerNotFound { node_id: NodeId, layer_id: LayerId },

    // Wire Code Errors

    /// Value type code is reserved or not supported
    #[error("Unknown value type code {code}")]
    UnknownValueType { code: u8 },

    /// Authentication method code is reserved or not supported
    #[error("Unknown authentication method code {code}")]
    UnknownAuthMethod { code: u8 },

    /// Connection termination code is reserved or not supported
    #[error("Unknown connection terminate reason {code}")]
    UnknownTerminateReason { code: u8 },
}
