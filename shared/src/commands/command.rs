use crate::{
    constants::DEFAULT_PRIORITY, AuthMethod, CustomType, LayerId, NodeId, Priority, TagGroupId,
    TagId, Value, ValueType,
};

/// Which entity a subscription asks the server to stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubscribeTarget {
    Node(NodeId),
    TagGroup(NodeId, TagGroupId),
    Layer(NodeId, LayerId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Subscribe {
        target: SubscribeTarget,
        version: u32,
        checksum: u32,
    },
    CreateNode {
        custom_type: CustomType,
    },
    CreateTagGroup {
        node_id: NodeId,
        custom_type: CustomType,
    },
    CreateTag {
        node_id: NodeId,
        taggroup_id: TagGroupId,
        data_type: ValueType,
        count: u8,
        custom_type: CustomType,
    },
    CreateLayer {
        node_id: NodeId,
        parent_layer_id: Option<LayerId>,
        data_type: ValueType,
        count: u8,
        custom_type: CustomType,
    },
    SetTagValues {
        node_id: NodeId,
        taggroup_id: TagGroupId,
        tag_id: TagId,
        values: Value,
    },
    Link {
        parent_id: NodeId,
        child_id: NodeId,
    },
    Fps {
        fps: f32,
    },
    AuthenticateReply {
        username: String,
        method: AuthMethod,
        credential: String,
    },
    TerminateConnection,
}

impl Command {
    /// Fresh subscription with no cached version to validate against.
    pub fn subscribe(target: SubscribeTarget) -> Self {
        Command::Subscribe {
            target,
            version: 0,
            checksum: 0,
        }
    }

    pub fn with_priority(self, priority: Priority) -> OutgoingCommand {
        OutgoingCommand {
            priority,
            command: self,
        }
    }
}

/// A command queued for the transport together with its send priority.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingCommand {
    pub priority: Priority,
    pub command: Command,
}

impl OutgoingCommand {
    pub fn new(command: Command) -> Self {
        command.with_priority(DEFAULT_PRIORITY)
    }

    pub fn is_subscribe_to(&self, target: &SubscribeTarget) -> bool {
        matches!(&self.command, Command::Subscribe { target: t, .. } if t == target)
    }
}

impl From<Command> for OutgoingCommand {
    fn from(command: Command) -> Self {
        OutgoingCommand::new(command)
    }
}
