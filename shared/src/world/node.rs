use std::collections::BTreeMap;

use log::warn;

use crate::{
    constants::{PERM_NODE_READ, PERM_NODE_WRITE},
    CustomType, LayerTree, NodeId, PermissionBits, TagGroup, TagGroupId, UserId,
};

/// Primary entity of the mirrored graph.
///
/// The parent is stored by id and resolved through the registry, so a Node
/// never keeps another Node alive.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    parent_id: Option<NodeId>,
    owner: UserId,
    custom_type: CustomType,
    taggroups: BTreeMap<TagGroupId, TagGroup>,
    layers: LayerTree,
    locker: Option<NodeId>,
    perms: BTreeMap<UserId, PermissionBits>,
}

impl Node {
    pub fn new(
        id: NodeId,
        parent_id: Option<NodeId>,
        owner: UserId,
        custom_type: CustomType,
    ) -> Self {
        Self {
            id,
            parent_id,
            owner,
            custom_type,
            taggroups: BTreeMap::new(),
            layers: LayerTree::new(id),
            locker: None,
            perms: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Parent announced by the server, which may not be mirrored (yet).
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn custom_type(&self) -> CustomType {
        self.custom_type
    }

    // Locking

    /// Avatar currently holding the advisory edit lock.
    pub fn locker(&self) -> Option<NodeId> {
        self.locker
    }

    pub fn is_locked(&self) -> bool {
        self.locker.is_some()
    }

    // Permissions

    pub fn permission(&self, user_id: &UserId) -> Option<PermissionBits> {
        self.perms.get(user_id).copied()
    }

    pub fn permissions(&self) -> impl Iterator<Item = (&UserId, &PermissionBits)> {
        self.perms.iter()
    }

    pub fn can_read(&self, user_id: &UserId) -> bool {
        self.has_permission(user_id, PERM_NODE_READ)
    }

    pub fn can_write(&self, user_id: &UserId) -> bool {
        self.has_permission(user_id, PERM_NODE_WRITE)
    }

    fn has_permission(&self, user_id: &UserId, bit: PermissionBits) -> bool {
        // the owner is not listed in `perms` unless the server says so
        self.permission(user_id)
            .is_some_and(|perm| perm & bit != 0)
    }

    // Tag Groups

    pub fn taggroup(&self, taggroup_id: &TagGroupId) -> Option<&TagGroup> {
        self.taggroups.get(taggroup_id)
    }

    pub fn taggroup_mut(&mut self, taggroup_id: &TagGroupId) -> Option<&mut TagGroup> {
        self.taggroups.get_mut(taggroup_id)
    }

    pub fn taggroups(&self) -> impl Iterator<Item = &TagGroup> {
        self.taggroups.values()
    }

    // Layers

    pub fn layers(&self) -> &LayerTree {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerTree {
        &mut self.layers
    }

    // Mutation

    pub fn set_parent(&mut self, parent_id: Option<NodeId>) {
        self.parent_id = parent_id;
    }

    pub fn set_owner(&mut self, owner: UserId) {
        self.owner = owner;
    }

    pub fn set_locker(&mut self, locker: Option<NodeId>) {
        self.locker = locker;
    }

    pub fn set_permission(&mut self, user_id: UserId, perm: PermissionBits) {
        self.perms.insert(user_id, perm);
    }

    pub fn insert_taggroup(&mut self, taggroup: TagGroup) -> Option<TagGroup> {
        let replaced = self.taggroups.insert(taggroup.id(), taggroup);
        if let Some(old) = &replaced {
            warn!(
                "Node {}: taggroup {} created twice, replacing",
                self.id,
                old.id()
            );
        }
        replaced
    }

    pub fn remove_taggroup(&mut self, taggroup_id: &TagGroupId) -> Option<TagGroup> {
        self.taggroups.remove(taggroup_id)
    }
}
