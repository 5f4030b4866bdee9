use std::collections::{BTreeMap, HashSet};

use log::{debug, info, warn};

use trellis_shared::{
    constants::{
        DEFAULT_PRIORITY, RESERVED_LAYER_ID, RESERVED_NODE_ID, RESERVED_USER_ID, ROOT_NODE_ID,
    },
    Command, CustomType, EntityEvent, ItemId, Layer, LayerId, MirrorError, Node, NodeId,
    OutgoingCommand, PermissionBits, Priority, SubscribeTarget, Tag, TagGroup, TagGroupId, TagId,
    TerminateReason, UserId, Value, ValueType,
};

use crate::{
    bootstrap::{BootstrapPolicy, NoBootstrap},
    world::identity::SessionIdentity,
};

/// Custom type of the node every client asks for once connected.
pub const SESSION_NODE_CUSTOM_TYPE: CustomType = 32;

/// Everything the mirror knows, detached from any policy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MirrorState {
    pub identity: SessionIdentity,
    pub nodes: BTreeMap<NodeId, Node>,
}

/// Local replica of the server's node graph, kept current by applying
/// entity events in delivery order.
///
/// Events that name entities the mirror does not hold are not errors from
/// the session's point of view: [`EntityRegistry::handle_event`] logs them
/// and moves on. The individual `on_*` handlers report them as
/// [`MirrorError`]s for callers that want to know.
pub struct EntityRegistry {
    state: MirrorState,
    policy: Box<dyn BootstrapPolicy>,
    priority: Priority,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::with_policy(Box::new(NoBootstrap))
    }

    pub fn with_policy(policy: Box<dyn BootstrapPolicy>) -> Self {
        Self {
            state: MirrorState::default(),
            policy,
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Priority attached to every command this registry emits.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    // Queries

    pub fn state(&self) -> &MirrorState {
        &self.state
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.state.identity
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.state.identity.user_id
    }

    pub fn avatar_id(&self) -> Option<NodeId> {
        self.state.identity.avatar_id
    }

    pub fn len(&self) -> usize {
        self.state.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.nodes.is_empty()
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.state.nodes.get(node_id)
    }

    pub fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.state.nodes.get_mut(node_id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.state.nodes.values()
    }

    /// The node's parent, if announced and currently mirrored.
    pub fn parent_of(&self, node_id: &NodeId) -> Option<&Node> {
        let parent_id = self.node(node_id)?.parent_id()?;
        self.node(&parent_id)
    }

    /// Mirrored nodes that name `node_id` as their parent, in id order.
    pub fn children_of(&self, node_id: &NodeId) -> Vec<NodeId> {
        self.state
            .nodes
            .values()
            .filter(|node| node.parent_id() == Some(*node_id))
            .map(Node::id)
            .collect()
    }

    /// Resolvable parents from the node upwards, nearest first.
    pub fn ancestors(&self, node_id: &NodeId) -> Vec<NodeId> {
        let mut output = Vec::new();
        let mut visited = HashSet::from([*node_id]);
        let mut current = *node_id;
        while let Some(parent) = self.parent_of(&current) {
            if !visited.insert(parent.id()) {
                warn!("Node {}: parent chain loops at {}", node_id, parent.id());
                break;
            }
            output.push(parent.id());
            current = parent.id();
        }
        output
    }

    pub fn taggroup(&self, node_id: &NodeId, taggroup_id: &TagGroupId) -> Option<&TagGroup> {
        self.node(node_id)?.taggroup(taggroup_id)
    }

    pub fn tag(&self, node_id: &NodeId, taggroup_id: &TagGroupId, tag_id: &TagId) -> Option<&Tag> {
        self.taggroup(node_id, taggroup_id)?.tag(tag_id)
    }

    pub fn layer(&self, node_id: &NodeId, layer_id: &LayerId) -> Option<&Layer> {
        self.node(node_id)?.layers().get(layer_id)
    }

    /// Drops every mirrored entity and the session identity.
    pub fn teardown(&mut self) {
        self.state.nodes.clear();
        self.state.identity = SessionIdentity::default();
        self.policy.reset();
    }

    // Dispatch

    /// Applies one event and returns the commands it calls for.
    ///
    /// Never fails: lookup misses are logged and leave the mirror unchanged.
    pub fn handle_event(&mut self, event: EntityEvent) -> Vec<OutgoingCommand> {
        debug!("Applying {}", event.log());

        let result = match event {
            EntityEvent::ConnectAccept { user_id, avatar_id } => {
                Ok(self.on_connect_accept(user_id, avatar_id))
            }
            EntityEvent::ConnectTerminate { reason } => {
                self.on_connect_terminate(reason);
                Ok(Vec::new())
            }
            EntityEvent::UserAuthenticateChallenge { .. } => {
                // answered by the session, the graph is not involved
                Ok(Vec::new())
            }
            EntityEvent::NodeCreate {
                node_id,
                parent_id,
                owner_id,
                custom_type,
            } => Ok(self.on_node_create(node_id, parent_id, owner_id, custom_type)),
            EntityEvent::NodeDestroy { node_id } => {
                self.on_node_destroy(node_id).map(|_| Vec::new())
            }
            EntityEvent::NodeLink {
                parent_id,
                child_id,
            } => self.on_node_link(parent_id, child_id).map(|_| Vec::new()),
            EntityEvent::NodePerm {
                node_id,
                user_id,
                perm,
            } => self.on_node_perm(node_id, user_id, perm).map(|_| Vec::new()),
            EntityEvent::NodeOwner { node_id, user_id } => {
                self.on_node_owner(node_id, user_id).map(|_| Vec::new())
            }
            EntityEvent::NodeLock { node_id, avatar_id } => {
                self.on_node_lock(node_id, avatar_id).map(|_| Vec::new())
            }
            EntityEvent::NodeUnlock { node_id, avatar_id } => {
                self.on_node_unlock(node_id, avatar_id).map(|_| Vec::new())
            }
            EntityEvent::TagGroupCreate {
                node_id,
                taggroup_id,
                custom_type,
            } => self.on_taggroup_create(node_id, taggroup_id, custom_type),
            EntityEvent::TagGroupDestroy {
                node_id,
                taggroup_id,
            } => self
                .on_taggroup_destroy(node_id, taggroup_id)
                .map(|_| Vec::new()),
            EntityEvent::TagCreate {
                node_id,
                taggroup_id,
                tag_id,
                data_type,
                count,
                custom_type,
            } => self.on_tag_create(node_id, taggroup_id, tag_id, data_type, count, custom_type),
            EntityEvent::TagDestroy {
                node_id,
                taggroup_id,
                tag_id,
            } => self
                .on_tag_destroy(node_id, taggroup_id, tag_id)
                .map(|_| Vec::new()),
            EntityEvent::TagSetValues {
                node_id,
                taggroup_id,
                tag_id,
                values,
            } => self
                .on_tag_set_values(node_id, taggroup_id, tag_id, values)
                .map(|_| Vec::new()),
            EntityEvent::LayerCreate {
                node_id,
                parent_layer_id,
                layer_id,
                data_type,
                count,
                custom_type,
            } => self.on_layer_create(
                node_id,
                parent_layer_id,
                layer_id,
                data_type,
                count,
                custom_type,
            ),
            EntityEvent::LayerDestroy { node_id, layer_id } => {
                self.on_layer_destroy(node_id, layer_id).map(|_| Vec::new())
            }
            EntityEvent::LayerSetValue {
                node_id,
                layer_id,
                item_id,
                values,
            } => self
                .on_layer_set_value(node_id, layer_id, item_id, values)
                .map(|_| Vec::new()),
            EntityEvent::LayerUnsetValue {
                node_id,
                layer_id,
                item_id,
            } => self
                .on_layer_unset_value(node_id, layer_id, item_id)
                .map(|_| Vec::new()),
        };

        match result {
            Ok(commands) => commands
                .into_iter()
                .map(|command| command.with_priority(self.priority))
                .collect(),
            Err(error) => {
                warn!("Ignoring event: {}", error);
                Vec::new()
            }
        }
    }

    // Session

    pub fn on_connect_accept(&mut self, user_id: UserId, avatar_id: NodeId) -> Vec<Command> {
        if !self.is_empty() {
            warn!("Connect accepted with a populated mirror, discarding previous state");
            self.teardown();
        }
        info!(
            "Connected as user {} with avatar node {}",
            user_id, avatar_id
        );

        self.state.identity = SessionIdentity::new(user_id, avatar_id);
        self.state
            .nodes
            .insert(ROOT_NODE_ID, Node::new(ROOT_NODE_ID, None, RESERVED_USER_ID, 0));

        vec![
            Command::subscribe(SubscribeTarget::Node(ROOT_NODE_ID)),
            Command::CreateNode {
                custom_type: SESSION_NODE_CUSTOM_TYPE,
            },
        ]
    }

    pub fn on_connect_terminate(&mut self, reason: TerminateReason) {
        info!("Connection terminated: {}", reason);
        self.teardown();
    }

    // Nodes

    pub fn on_node_create(
        &mut self,
        node_id: NodeId,
        parent_id: NodeId,
        owner_id: UserId,
        custom_type: CustomType,
    ) -> Vec<Command> {
        let parent_id = announced_node_parent(parent_id);
        if let Some(parent_id) = parent_id {
            if !self.state.nodes.contains_key(&parent_id) {
                debug!(
                    "Node {}: parent {} not mirrored yet, leaving unresolved",
                    node_id, parent_id
                );
            }
        }
        let node = Node::new(node_id, parent_id, owner_id, custom_type);
        if self.state.nodes.insert(node_id, node).is_some() {
            warn!("Node {} created twice, replacing", node_id);
        }

        let mut commands = vec![Command::subscribe(SubscribeTarget::Node(node_id))];
        if let Some(node) = self.state.nodes.get(&node_id) {
            commands.extend(self.policy.on_node_created(&self.state.identity, node));
        }
        commands
    }

    /// Removes the node with its tag groups and layers. Child nodes stay
    /// mirrored; their parent no longer resolves.
    pub fn on_node_destroy(&mut self, node_id: NodeId) -> Result<Node, MirrorError> {
        self.state
            .nodes
            .remove(&node_id)
            .ok_or(MirrorError::NodeNotFound { node_id })
    }

    /// Re-parents a mirrored node. The parent does not need to be mirrored.
    pub fn on_node_link(
        &mut self,
        parent_id: NodeId,
        child_id: NodeId,
    ) -> Result<(), MirrorError> {
        self.try_node_mut(child_id)?.set_parent(announced_node_parent(parent_id));
        Ok(())
    }

    pub fn on_node_perm(
        &mut self,
        node_id: NodeId,
        user_id: UserId,
        perm: PermissionBits,
    ) -> Result<(), MirrorError> {
        self.try_node_mut(node_id)?.set_permission(user_id, perm);
        Ok(())
    }

    pub fn on_node_owner(&mut self, node_id: NodeId, user_id: UserId) -> Result<(), MirrorError> {
        self.try_node_mut(node_id)?.set_owner(user_id);
        Ok(())
    }

    pub fn on_node_lock(&mut self, node_id: NodeId, avatar_id: NodeId) -> Result<(), MirrorError> {
        self.try_node_mut(node_id)?.set_locker(Some(avatar_id));
        Ok(())
    }

    pub fn on_node_unlock(
        &mut self,
        node_id: NodeId,
        avatar_id: NodeId,
    ) -> Result<(), MirrorError> {
        let node = self.try_node_mut(node_id)?;
        if let Some(locker) = node.locker() {
            if locker != avatar_id {
                debug!(
                    "Node {}: unlocked by avatar {} while held by {}",
                    node_id, avatar_id, locker
                );
            }
        }
        node.set_locker(None);
        Ok(())
    }

    // Tag Groups

    pub fn on_taggroup_create(
        &mut self,
        node_id: NodeId,
        taggroup_id: TagGroupId,
        custom_type: CustomType,
    ) -> Result<Vec<Command>, MirrorError> {
        let node = self
            .state
            .nodes
            .get_mut(&node_id)
            .ok_or(MirrorError::NodeNotFound { node_id })?;
        node.insert_taggroup(TagGroup::new(node_id, taggroup_id, custom_type));

        let mut commands = vec![Command::subscribe(SubscribeTarget::TagGroup(
            node_id,
            taggroup_id,
        ))];
        if let Some(taggroup) = node.taggroup(&taggroup_id) {
            commands.extend(
                self.policy
                    .on_taggroup_created(&self.state.identity, taggroup),
            );
        }
        Ok(commands)
    }

    pub fn on_taggroup_destroy(
        &mut self,
        node_id: NodeId,
        taggroup_id: TagGroupId,
    ) -> Result<TagGroup, MirrorError> {
        self.try_node_mut(node_id)?
            .remove_taggroup(&taggroup_id)
            .ok_or(MirrorError::TagGroupNotFound {
                node_id,
                taggroup_id,
            })
    }

    // Tags

    pub fn on_tag_create(
        &mut self,
        node_id: NodeId,
        taggroup_id: TagGroupId,
        tag_id: TagId,
        data_type: ValueType,
        count: u8,
        custom_type: CustomType,
    ) -> Result<Vec<Command>, MirrorError> {
        let taggroup = self
            .state
            .nodes
            .get_mut(&node_id)
            .ok_or(MirrorError::NodeNotFound { node_id })?
            .taggroup_mut(&taggroup_id)
            .ok_or(MirrorError::TagGroupNotFound {
                node_id,
                taggroup_id,
            })?;
        taggroup.insert_tag(Tag::new(tag_id, data_type, count, custom_type));

        let mut commands = Vec::new();
        if let Some(tag) = taggroup.tag(&tag_id) {
            commands.extend(
                self.policy
                    .on_tag_created(&self.state.identity, taggroup, tag),
            );
        }
        Ok(commands)
    }

    pub fn on_tag_destroy(
        &mut self,
        node_id: NodeId,
        taggroup_id: TagGroupId,
        tag_id: TagId,
    ) -> Result<Tag, MirrorError> {
        self.try_taggroup_mut(node_id, taggroup_id)?
            .remove_tag(&tag_id)
            .ok_or(MirrorError::TagNotFound {
                node_id,
                taggroup_id,
                tag_id,
            })
    }

    /// Replaces the tag's whole value, whatever count it was declared with.
    pub fn on_tag_set_values(
        &mut self,
        node_id: NodeId,
        taggroup_id: TagGroupId,
        tag_id: TagId,
        values: Value,
    ) -> Result<(), MirrorError> {
        self.try_taggroup_mut(node_id, taggroup_id)?
            .tag_mut(&tag_id)
            .ok_or(MirrorError::TagNotFound {
                node_id,
                taggroup_id,
                tag_id,
            })?
            .set_value(values);
        Ok(())
    }

    // Layers

    pub fn on_layer_create(
        &mut self,
        node_id: NodeId,
        parent_layer_id: Option<LayerId>,
        layer_id: LayerId,
        data_type: ValueType,
        count: u8,
        custom_type: CustomType,
    ) -> Result<Vec<Command>, MirrorError> {
        let parent_layer_id = parent_layer_id.filter(|id| *id != RESERVED_LAYER_ID);
        let layers = self.try_node_mut(node_id)?.layers_mut();
        if let Some(parent_layer_id) = parent_layer_id {
            if !layers.contains(&parent_layer_id) {
                debug!(
                    "Node {}: layer {} parent {} not mirrored yet, leaving unresolved",
                    node_id, layer_id, parent_layer_id
                );
            }
        }
        layers.insert(Layer::new(
            layer_id,
            parent_layer_id,
            data_type,
            count,
            custom_type,
        ));

        Ok(vec![Command::subscribe(SubscribeTarget::Layer(
            node_id, layer_id,
        ))])
    }

    /// Removes the layer. Layers below it stay mirrored as top-level layers.
    pub fn on_layer_destroy(
        &mut self,
        node_id: NodeId,
        layer_id: LayerId,
    ) -> Result<Layer, MirrorError> {
        self.try_node_mut(node_id)?
            .layers_mut()
            .remove(&layer_id)
            .ok_or(MirrorError::LayerNotFound { node_id, layer_id })
    }

    pub fn on_layer_set_value(
        &mut self,
        node_id: NodeId,
        layer_id: LayerId,
        item_id: ItemId,
        values: Value,
    ) -> Result<(), MirrorError> {
        self.try_node_mut(node_id)?
            .layers_mut()
            .set_value(&layer_id, item_id, values)
    }

    /// Unsets the item in the layer and every layer beneath it. Returns how
    /// many layers held it.
    pub fn on_layer_unset_value(
        &mut self,
        node_id: NodeId,
        layer_id: LayerId,
        item_id: ItemId,
    ) -> Result<usize, MirrorError> {
        self.try_node_mut(node_id)?
            .layers_mut()
            .unset_value(&layer_id, &item_id)
    }

    // Lookups

    fn try_node_mut(&mut self, node_id: NodeId) -> Result<&mut Node, MirrorError> {
        self.state
            .nodes
            .get_mut(&node_id)
            .ok_or(MirrorError::NodeNotFound { node_id })
    }

    fn try_taggroup_mut(
        &mut self,
        node_id: NodeId,
        taggroup_id: TagGroupId,
    ) -> Result<&mut TagGroup, MirrorError> {
        self.try_node_mut(node_id)?
            .taggroup_mut(&taggroup_id)
            .ok_or(MirrorError::TagGroupNotFound {
                node_id,
                taggroup_id,
            })
    }
}

fn announced_node_parent(parent_id: NodeId) -> Option<NodeId> {
    (parent_id != RESERVED_NODE_ID).then_some(parent_id)
}
