use log::info;

use trellis_shared::{
    constants::ROOT_NODE_ID, Command, CustomType, Node, NodeId, Tag, TagGroup, TagGroupId, Value,
    ValueType,
};

use crate::world::identity::SessionIdentity;

/// Application hook run after the registry has applied a create event.
///
/// Returned commands are sent after the registry's own subscriptions. The
/// mirror state passed in is read-only: policies react, they never mutate.
pub trait BootstrapPolicy {
    fn on_node_created(&mut self, _identity: &SessionIdentity, _node: &Node) -> Vec<Command> {
        Vec::new()
    }

    fn on_taggroup_created(
        &mut self,
        _identity: &SessionIdentity,
        _taggroup: &TagGroup,
    ) -> Vec<Command> {
        Vec::new()
    }

    fn on_tag_created(
        &mut self,
        _identity: &SessionIdentity,
        _taggroup: &TagGroup,
        _tag: &Tag,
    ) -> Vec<Command> {
        Vec::new()
    }

    /// Forget anything remembered about the previous connection.
    fn reset(&mut self) {}
}

/// Mirrors the server and nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBootstrap;

impl BootstrapPolicy for NoBootstrap {}

// DemoBootstrap

/// Tags the demo creates in its tag group, as (type, count, custom type).
pub const DEMO_TAGS: [(ValueType, u8, CustomType); 4] = [
    (ValueType::Uint8, 3, 1),
    (ValueType::Uint8, 1, 2),
    (ValueType::Real32, 1, 3),
    (ValueType::String8, 1, 4),
];

/// Populates the first node created under the local avatar with a tag
/// group, a layer and four tags, then fills the tags in once the server
/// confirms them.
pub struct DemoBootstrap {
    link_target: NodeId,
    test_node: Option<NodeId>,
    test_taggroup: Option<(NodeId, TagGroupId)>,
}

impl Default for DemoBootstrap {
    fn default() -> Self {
        Self::new(ROOT_NODE_ID)
    }
}

impl DemoBootstrap {
    /// `link_target` is the node the demo node gets re-parented under.
    pub fn new(link_target: NodeId) -> Self {
        Self {
            link_target,
            test_node: None,
            test_taggroup: None,
        }
    }

    pub fn test_node(&self) -> Option<NodeId> {
        self.test_node
    }

    pub fn test_taggroup(&self) -> Option<(NodeId, TagGroupId)> {
        self.test_taggroup
    }

    fn demo_value(data_type: ValueType, custom_type: CustomType) -> Option<Value> {
        match (data_type, custom_type) {
            (ValueType::Uint8, 1) => Some(Value::Uint8(vec![123, 124, 125])),
            (ValueType::Uint8, 2) => Some(Value::Uint8(vec![10])),
            (ValueType::Real32, 3) => Some(Value::Real32(vec![12.345])),
            (ValueType::String8, 4) => Some(Value::String8(vec!["Ahoj".to_string()])),
            _ => None,
        }
    }
}

impl BootstrapPolicy for DemoBootstrap {
    fn on_node_created(&mut self, identity: &SessionIdentity, node: &Node) -> Vec<Command> {
        let Some(parent_id) = node.parent_id() else {
            return Vec::new();
        };
        if !identity.is_avatar(parent_id) {
            return Vec::new();
        }

        let node_id = node.id();
        info!("Demo: node {} created under my avatar, populating it", node_id);
        self.test_node = Some(node_id);

        vec![
            Command::Link {
                parent_id: self.link_target,
                child_id: node_id,
            },
            Command::CreateTagGroup {
                node_id,
                custom_type: 0,
            },
            Command::CreateLayer {
                node_id,
                parent_layer_id: None,
                data_type: ValueType::Uint8,
                count: 3,
                custom_type: 1,
            },
        ]
    }

    fn on_taggroup_created(
        &mut self,
        _identity: &SessionIdentity,
        taggroup: &TagGroup,
    ) -> Vec<Command> {
        if self.test_node != Some(taggroup.node_id()) {
            return Vec::new();
        }

        let node_id = taggroup.node_id();
        let taggroup_id = taggroup.id();
        self.test_taggroup = Some((node_id, taggroup_id));

        DEMO_TAGS
            .iter()
            .map(|(data_type, count, custom_type)| Command::CreateTag {
                node_id,
                taggroup_id,
                data_type: *data_type,
                count: *count,
                custom_type: *custom_type,
            })
            .collect()
    }

    fn on_tag_created(
        &mut self,
        _identity: &SessionIdentity,
        taggroup: &TagGroup,
        tag: &Tag,
    ) -> Vec<Command> {
        if self.test_taggroup != Some((taggroup.node_id(), taggroup.id())) {
            return Vec::new();
        }
        let Some(values) = Self::demo_value(tag.data_type(), tag.custom_type()) else {
            return Vec::new();
        };

        vec![Command::SetTagValues {
            node_id: taggroup.node_id(),
            taggroup_id: taggroup.id(),
            tag_id: tag.id(),
            values,
        }]
    }

    fn reset(&mut self) {
        self.test_node = None;
        self.test_taggroup = None;
    }
}
