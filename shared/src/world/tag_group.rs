use std::collections::BTreeMap;

use log::warn;

use crate::{CustomType, NodeId, Tag, TagGroupId, TagId};

/// Collection of Tags attached to a Node, ordered by tag id.
#[derive(Clone, Debug, PartialEq)]
pub struct TagGroup {
    id: TagGroupId,
    custom_type: CustomType,
    // back-reference, resolved through the registry
    node_id: NodeId,
    tags: BTreeMap<TagId, Tag>,
}

impl TagGroup {
    pub fn new(node_id: NodeId, id: TagGroupId, custom_type: CustomType) -> Self {
        Self {
            id,
            custom_type,
            node_id,
            tags: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> TagGroupId {
        self.id
    }

    pub fn custom_type(&self) -> CustomType {
        self.custom_type
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn tag(&self, tag_id: &TagId) -> Option<&Tag> {
        self.tags.get(tag_id)
    }

    pub fn tag_mut(&mut self, tag_id: &TagId) -> Option<&mut Tag> {
        self.tags.get_mut(tag_id)
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Inserts a tag, replacing any tag already stored under its id.
    pub fn insert_tag(&mut self, tag: Tag) -> Option<Tag> {
        let replaced = self.tags.insert(tag.id(), tag);
        if let Some(old) = &replaced {
            warn!(
                "TagGroup {} of node {}: tag {} created twice, replacing",
                self.id,
                self.node_id,
                old.id()
            );
        }
        replaced
    }

    pub fn remove_tag(&mut self, tag_id: &TagId) -> Option<Tag> {
        self.tags.remove(tag_id)
    }
}
