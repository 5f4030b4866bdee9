/// REGRESSION TESTS: out-of-order and dangling references
///
/// The server may announce a child before its parent, or destroy a parent
/// while children remain. The mirror must keep every entity it was told
/// about, resolve parents by id only, and never attach to the wrong one.

use trellis_client::{constants::ROOT_NODE_ID, EntityEvent, EntityRegistry, Node};
use trellis_test::*;

fn connected() -> EntityRegistry {
    init_logger();
    let mut registry = EntityRegistry::new();
    registry.handle_event(connect_accept());
    registry
}

#[test]
fn child_created_before_parent_resolves_later() {
    let mut registry = connected();
    registry.handle_event(node_create(65537, 65536));
    assert!(registry.parent_of(&65537).is_none());

    // an unrelated node must not be picked up as parent
    registry.handle_event(node_create(65538, ROOT_NODE_ID));
    assert!(registry.parent_of(&65537).is_none());

    registry.handle_event(node_create(65536, ROOT_NODE_ID));
    assert_eq!(registry.parent_of(&65537).map(Node::id), Some(65536));
}

#[test]
fn link_to_unknown_parent_is_kept_unresolved() {
    let mut registry = connected();
    registry.handle_event(node_create(65536, ROOT_NODE_ID));
    registry.handle_event(EntityEvent::NodeLink {
        parent_id: 70000,
        child_id: 65536,
    });

    let node = registry.node(&65536).unwrap();
    assert_eq!(node.parent_id(), Some(70000));
    assert!(registry.parent_of(&65536).is_none());
}

#[test]
fn destroying_parent_keeps_children_and_their_data() {
    let mut registry = connected();
    registry.handle_event(node_create(65536, ROOT_NODE_ID));
    registry.handle_event(node_create(65537, 65536));
    registry.handle_event(taggroup_create(65537, 1));

    registry.handle_event(node_destroy(65536));

    assert!(registry.node(&65536).is_none());
    assert!(registry.parent_of(&65537).is_none());
    assert!(registry.taggroup(&65537, &1).is_some());
}

#[test]
fn destroying_node_drops_its_taggroups_and_layers() {
    let mut registry = connected();
    registry.handle_event(node_create(65536, ROOT_NODE_ID));
    registry.handle_event(taggroup_create(65536, 1));
    registry.handle_event(layer_create(65536, None, 1));

    registry.handle_event(node_destroy(65536));
    assert!(registry.taggroup(&65536, &1).is_none());
    assert!(registry.layer(&65536, &1).is_none());

    // late events for the destroyed node are ignored
    registry.handle_event(layer_set(65536, 1, 0, 1));
    assert!(registry.node(&65536).is_none());
}

#[test]
fn nested_layer_before_parent_layer_joins_cascade() {
    let mut registry = connected();
    registry.handle_event(node_create(65536, ROOT_NODE_ID));
    registry.handle_event(layer_create(65536, Some(1), 2));
    registry.handle_event(layer_create(65536, None, 1));
    registry.handle_event(layer_set(65536, 1, 7, 1));
    registry.handle_event(layer_set(65536, 2, 7, 2));

    registry.handle_event(layer_unset(65536, 1, 7));

    assert!(registry.layer(&65536, &1).unwrap().value(&7).is_none());
    assert!(registry.layer(&65536, &2).unwrap().value(&7).is_none());
}

#[test]
fn destroyed_middle_layer_cuts_cascade() {
    let mut registry = connected();
    registry.handle_event(node_create(65536, ROOT_NODE_ID));
    registry.handle_event(layer_create(65536, None, 1));
    registry.handle_event(layer_create(65536, Some(1), 2));
    registry.handle_event(layer_create(65536, Some(2), 3));
    registry.handle_event(layer_set(65536, 3, 7, 3));

    registry.handle_event(EntityEvent::LayerDestroy {
        node_id: 65536,
        layer_id: 2,
    });
    registry.handle_event(layer_unset(65536, 1, 7));

    // layer 3 is orphaned, so it keeps its value
    let layers = registry.node(&65536).unwrap().layers();
    assert!(layers.parent(&3).is_none());
    assert!(layers.get(&3).unwrap().value(&7).is_some());
}

#[test]
fn shape_mismatch_is_stored_as_received() {
    let mut registry = connected();
    registry.handle_event(node_create(65536, ROOT_NODE_ID));
    registry.handle_event(taggroup_create(65536, 1));
    registry.handle_event(uint8_tag_create(65536, 1, 1, 3));

    registry.handle_event(tag_set(65536, 1, 1, vec![1, 2, 3, 4, 5]));

    let tag = registry.tag(&65536, &1, &1).unwrap();
    assert_eq!(tag.count(), 3);
    assert_eq!(tag.value().len(), 5);
}
