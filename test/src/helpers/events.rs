use trellis_client::{
    EntityEvent, ItemId, LayerId, NodeId, TagGroupId, TagId, UserId, Value, ValueType,
};

pub const USER: UserId = 5;
pub const AVATAR: NodeId = 100;

pub fn connect_accept() -> EntityEvent {
    EntityEvent::ConnectAccept {
        user_id: USER,
        avatar_id: AVATAR,
    }
}

pub fn node_create(node_id: NodeId, parent_id: NodeId) -> EntityEvent {
    EntityEvent::NodeCreate {
        node_id,
        parent_id,
        owner_id: USER,
        custom_type: 0,
    }
}

pub fn node_destroy(node_id: NodeId) -> EntityEvent {
    EntityEvent::NodeDestroy { node_id }
}

pub fn taggroup_create(node_id: NodeId, taggroup_id: TagGroupId) -> EntityEvent {
    EntityEvent::TagGroupCreate {
        node_id,
        taggroup_id,
        custom_type: 0,
    }
}

pub fn uint8_tag_create(
    node_id: NodeId,
    taggroup_id: TagGroupId,
    tag_id: TagId,
    count: u8,
) -> EntityEvent {
    EntityEvent::TagCreate {
        node_id,
        taggroup_id,
        tag_id,
        data_type: ValueType::Uint8,
        count,
        custom_type: 0,
    }
}

pub fn tag_set(
    node_id: NodeId,
    taggroup_id: TagGroupId,
    tag_id: TagId,
    values: Vec<u8>,
) -> EntityEvent {
    EntityEvent::TagSetValues {
        node_id,
        taggroup_id,
        tag_id,
        values: Value::Uint8(values),
    }
}

pub fn layer_create(
    node_id: NodeId,
    parent_layer_id: Option<LayerId>,
    layer_id: LayerId,
) -> EntityEvent {
    EntityEvent::LayerCreate {
        node_id,
        parent_layer_id,
        layer_id,
        data_type: ValueType::Uint32,
        count: 1,
        custom_type: 0,
    }
}

pub fn layer_set(node_id: NodeId, layer_id: LayerId, item_id: ItemId, value: u32) -> EntityEvent {
    EntityEvent::LayerSetValue {
        node_id,
        layer_id,
        item_id,
        values: Value::Uint32(vec![value]),
    }
}

pub fn layer_unset(node_id: NodeId, layer_id: LayerId, item_id: ItemId) -> EntityEvent {
    EntityEvent::LayerUnsetValue {
        node_id,
        layer_id,
        item_id,
    }
}
