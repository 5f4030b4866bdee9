use crate::{
    AuthMethod, CustomType, ItemId, LayerId, NodeId, PermissionBits, TagGroupId, TagId,
    TerminateReason, UserId, Value, ValueType,
};

/// Notification pushed by the server, already decoded by the transport.
///
/// Events are applied strictly in the order they are delivered.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityEvent {
    // Session
    ConnectAccept {
        user_id: UserId,
        avatar_id: NodeId,
    },
    ConnectTerminate {
        reason: TerminateReason,
    },
    UserAuthenticateChallenge {
        username: String,
        methods: Vec<AuthMethod>,
    },

    // Nodes
    NodeCreate {
        node_id: NodeId,
        parent_id: NodeId,
        owner_id: UserId,
        custom_type: CustomType,
    },
    NodeDestroy {
        node_id: NodeId,
    },
    NodeLink {
        parent_id: NodeId,
        child_id: NodeId,
    },
    NodePerm {
        node_id: NodeId,
        user_id: UserId,
        perm: PermissionBits,
    },
    NodeOwner {
        node_id: NodeId,
        user_id: UserId,
    },
    NodeLock {
        node_id: NodeId,
        avatar_id: NodeId,
    },
    NodeUnlock {
        node_id: NodeId,
        avatar_id: NodeId,
    },

    // Tag Groups & Tags
    TagGroupCreate {
        node_id: NodeId,
        taggroup_id: TagGroupId,
        custom_type: CustomType,
    },
    TagGroupDestroy {
        node_id: NodeId,
        taggroup_id: TagGroupId,
    },
    TagCreate {
        node_id: NodeId,
        taggroup_id: TagGroupId,
        tag_id: TagId,
        data_type: ValueType,
        count: u8,
        custom_type: CustomType,
    },
    TagDestroy {
        node_id: NodeId,
        taggroup_id: TagGroupId,
        tag_id: TagId,
    },
    TagSetValues {
        node_id: NodeId,
        taggroup_id: TagGroupId,
        tag_id: TagId,
        values: Value,
    },

    // Layers
    LayerCreate {
        node_id: NodeId,
        parent_layer_id: Option<LayerId>,
        layer_id: LayerId,
        data_type: ValueType,
        count: u8,
        custom_type: CustomType,
    },
    LayerDestroy {
        node_id: NodeId,
        layer_id: LayerId,
    },
    LayerSetValue {
        node_id: NodeId,
        layer_id: LayerId,
        item_id: ItemId,
        values: Value,
    },
    LayerUnsetValue {
        node_id: NodeId,
        layer_id: LayerId,
        item_id: ItemId,
    },
}

impl EntityEvent {
    /// The node an entity event addresses, if any.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::ConnectAccept { .. }
            | Self::ConnectTerminate { .. }
            | Self::UserAuthenticateChallenge { .. } => None,
            Self::NodeCreate { node_id, .. }
            | Self::NodeDestroy { node_id }
            | Self::NodePerm { node_id, .. }
            | Self::NodeOwner { node_id, .. }
            | Self::NodeLock { node_id, .. }
            | Self::NodeUnlock { node_id, .. }
            | Self::TagGroupCreate { node_id, .. }
            | Self::TagGroupDestroy { node_id, .. }
            | Self::TagCreate { node_id, .. }
            | Self::TagDestroy { node_id, .. }
            | Self::TagSetValues { node_id, .. }
            | Self::LayerCreate { node_id, .. }
            | Self::LayerDestroy { node_id, .. }
            | Self::LayerSetValue { node_id, .. }
            | Self::LayerUnsetValue { node_id, .. } => Some(*node_id),
            Self::NodeLink { child_id, .. } => Some(*child_id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectAccept { .. } => "ConnectAccept",
            Self::ConnectTerminate { .. } => "ConnectTerminate",
            Self::UserAuthenticateChallenge { .. } => "UserAuthenticateChallenge",
            Self::NodeCreate { .. } => "NodeCreate",
            Self::NodeDestroy { .. } => "NodeDestroy",
            Self::NodeLink { .. } => "NodeLink",
            Self::NodePerm { .. } => "NodePerm",
            Self::NodeOwner { .. } => "NodeOwner",
            Self::NodeLock { .. } => "NodeLock",
            Self::NodeUnlock { .. } => "NodeUnlock",
            Self::TagGroupCreate { .. } => "TagGroupCreate",
            Self::TagGroupDestroy { .. } => "TagGroupDestroy",
            Self::TagCreate { .. } => "TagCreate",
            Self::TagDestroy { .. } => "TagDestroy",
            Self::TagSetValues { .. } => "TagSetValues",
            Self::LayerCreate { .. } => "LayerCreate",
            Self::LayerDestroy { .. } => "LayerDestroy",
            Self::LayerSetValue { .. } => "LayerSetValue",
            Self::LayerUnsetValue { .. } => "LayerUnsetValue",
        }
    }

    pub fn log(&self) -> String {
        match self.node_id() {
            Some(node_id) => format!("{} node {}", self.name(), node_id),
            None => self.name().to_string(),
        }
    }
}
