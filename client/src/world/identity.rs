use trellis_shared::{NodeId, UserId};

/// Who this client is, as assigned by the server on connect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: Option<UserId>,
    pub avatar_id: Option<NodeId>,
}

impl SessionIdentity {
    pub fn new(user_id: UserId, avatar_id: NodeId) -> Self {
        Self {
            user_id: Some(user_id),
            avatar_id: Some(avatar_id),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.user_id.is_some()
    }

    /// Whether `node_id` is this client's avatar.
    pub fn is_avatar(&self, node_id: NodeId) -> bool {
        self.avatar_id == Some(node_id)
    }
}
