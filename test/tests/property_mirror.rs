/// PROPERTY-BASED TESTS: Mirror invariants
///
/// Uses proptest to check the mirror against random event sequences.
///
/// Key invariants:
/// 1. Destroying an entity twice, or one that was never there, is harmless
/// 2. Creating then destroying a fresh entity restores the previous state
/// 3. Unsetting an item clears it from the whole layer subtree and nowhere else
/// 4. The last value set is the one that is kept

use std::collections::BTreeSet;

use proptest::prelude::*;
use trellis_client::{constants::ROOT_NODE_ID, EntityEvent, EntityRegistry, LayerId, NodeId, Value};
use trellis_test::*;

// Strategy for generating user-range node ids
fn node_id_strategy() -> impl Strategy<Value = NodeId> {
    65536u32..70000u32
}

// Layer parents as indices into the layers created before, so every tree
// is well formed. Layer `i + 1` gets parent `p + 1` when `p < i`.
fn layer_tree_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(prop::option::of(0usize..16), 1..16)
}

fn layer_parents(raw: &[Option<usize>]) -> Vec<Option<LayerId>> {
    raw.iter()
        .enumerate()
        .map(|(index, parent)| match parent {
            Some(p) if *p < index => Some(*p as LayerId + 1),
            _ => None,
        })
        .collect()
}

fn is_below(parents: &[Option<LayerId>], layer_id: LayerId, ancestor: LayerId) -> bool {
    let mut current = Some(layer_id);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = parents[id as usize - 1];
    }
    false
}

fn populated(node_ids: &BTreeSet<NodeId>) -> EntityRegistry {
    init_logger();
    let mut registry = EntityRegistry::new();
    registry.handle_event(connect_accept());
    for node_id in node_ids {
        registry.handle_event(node_create(*node_id, ROOT_NODE_ID));
        registry.handle_event(taggroup_create(*node_id, 1));
        registry.handle_event(uint8_tag_create(*node_id, 1, 1, 1));
        registry.handle_event(layer_create(*node_id, None, 1));
    }
    registry
}

proptest! {
    /// Test that a second destroy leaves the mirror untouched
    #[test]
    fn prop_destroy_is_idempotent(
        node_ids in prop::collection::btree_set(node_id_strategy(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut registry = populated(&node_ids);
        let ids: Vec<NodeId> = node_ids.iter().copied().collect();
        let target = *pick.get(&ids);

        registry.handle_event(node_destroy(target));
        let once = registry.state().clone();
        registry.handle_event(node_destroy(target));
        prop_assert_eq!(registry.state(), &once);
        prop_assert!(registry.node(&target).is_none());
    }

    /// Test that a second destroy of a tag, tag group or layer changes nothing
    #[test]
    fn prop_member_destroy_is_idempotent(
        node_ids in prop::collection::btree_set(node_id_strategy(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut registry = populated(&node_ids);
        let ids: Vec<NodeId> = node_ids.iter().copied().collect();
        let node_id = *pick.get(&ids);

        for event in [
            EntityEvent::TagDestroy { node_id, taggroup_id: 1, tag_id: 1 },
            EntityEvent::TagGroupDestroy { node_id, taggroup_id: 1 },
            EntityEvent::LayerDestroy { node_id, layer_id: 1 },
        ] {
            registry.handle_event(event.clone());
            let once = registry.state().clone();
            registry.handle_event(event);
            prop_assert_eq!(registry.state(), &once);
        }
        prop_assert!(registry.taggroup(&node_id, &1).is_none());
        prop_assert!(registry.layer(&node_id, &1).is_none());
    }

    /// Test that destroying members the mirror never held changes nothing
    #[test]
    fn prop_destroy_unknown_member_is_noop(
        node_ids in prop::collection::btree_set(node_id_strategy(), 1..8),
        pick in any::<prop::sample::Index>(),
        missing_node in node_id_strategy(),
        taggroup_id in 2u16..100,
        tag_id in 2u16..100,
        layer_id in 2u16..100,
    ) {
        prop_assume!(!node_ids.contains(&missing_node));
        let mut registry = populated(&node_ids);
        let ids: Vec<NodeId> = node_ids.iter().copied().collect();
        let before = registry.state().clone();

        for node_id in [*pick.get(&ids), missing_node] {
            for event in [
                EntityEvent::TagGroupDestroy { node_id, taggroup_id },
                EntityEvent::TagDestroy { node_id, taggroup_id: 1, tag_id },
                EntityEvent::TagDestroy { node_id, taggroup_id, tag_id: 1 },
                EntityEvent::LayerDestroy { node_id, layer_id },
            ] {
                for _ in 0..2 {
                    prop_assert!(registry.handle_event(event.clone()).is_empty());
                    prop_assert_eq!(registry.state(), &before);
                }
            }
        }
    }

    /// Test that a fresh node disappears without a trace
    #[test]
    fn prop_node_round_trip(
        node_ids in prop::collection::btree_set(node_id_strategy(), 0..8),
        fresh in node_id_strategy(),
        parent in node_id_strategy(),
    ) {
        prop_assume!(!node_ids.contains(&fresh));
        let mut registry = populated(&node_ids);
        let before = registry.state().clone();

        registry.handle_event(node_create(fresh, parent));
        registry.handle_event(node_destroy(fresh));
        prop_assert_eq!(registry.state(), &before);
    }

    /// Test that fresh tag groups, tags and layers disappear without a trace
    #[test]
    fn prop_member_round_trip(
        node_ids in prop::collection::btree_set(node_id_strategy(), 1..8),
        pick in any::<prop::sample::Index>(),
        taggroup_id in 2u16..100,
        tag_id in 2u16..100,
        layer_id in 2u16..100,
        parent_layer in prop::option::of(0u16..100),
    ) {
        let mut registry = populated(&node_ids);
        let ids: Vec<NodeId> = node_ids.iter().copied().collect();
        let node_id = *pick.get(&ids);
        let before = registry.state().clone();

        registry.handle_event(taggroup_create(node_id, taggroup_id));
        registry.handle_event(EntityEvent::TagGroupDestroy { node_id, taggroup_id });
        prop_assert_eq!(registry.state(), &before);

        registry.handle_event(uint8_tag_create(node_id, 1, tag_id, 2));
        registry.handle_event(EntityEvent::TagDestroy { node_id, taggroup_id: 1, tag_id });
        prop_assert_eq!(registry.state(), &before);

        registry.handle_event(layer_create(node_id, parent_layer, layer_id));
        registry.handle_event(EntityEvent::LayerDestroy { node_id, layer_id });
        prop_assert_eq!(registry.state(), &before);
    }

    /// Test that unset reaches exactly the layers below the target
    #[test]
    fn prop_unset_cascades_over_subtree(
        raw in layer_tree_strategy(),
        pick in any::<prop::sample::Index>(),
        item_id in any::<u32>(),
    ) {
        let parents = layer_parents(&raw);
        let node_id = 65536;
        let mut registry = populated(&BTreeSet::new());
        registry.handle_event(node_create(node_id, ROOT_NODE_ID));

        for (index, parent) in parents.iter().enumerate() {
            let layer_id = index as LayerId + 1;
            registry.handle_event(layer_create(node_id, *parent, layer_id));
            registry.handle_event(layer_set(node_id, layer_id, item_id, layer_id as u32));
        }

        let target = pick.index(parents.len()) as LayerId + 1;
        registry.handle_event(layer_unset(node_id, target, item_id));

        for index in 0..parents.len() {
            let layer_id = index as LayerId + 1;
            let layer = registry.layer(&node_id, &layer_id).unwrap();
            if is_below(&parents, layer_id, target) {
                prop_assert!(layer.value(&item_id).is_none(), "layer {} kept its value", layer_id);
            } else {
                prop_assert_eq!(layer.value(&item_id), Some(&Value::Uint32(vec![layer_id as u32])));
            }
        }
    }

    /// Test that the most recent tag and layer values win
    #[test]
    fn prop_last_value_wins(
        values in prop::collection::vec(any::<u8>(), 1..10),
        item_id in any::<u32>(),
    ) {
        let node_id = 65536;
        let mut registry = populated(&BTreeSet::from([node_id]));

        for value in &values {
            registry.handle_event(tag_set(node_id, 1, 1, vec![*value]));
            registry.handle_event(layer_set(node_id, 1, item_id, *value as u32));
        }

        let last = *values.last().unwrap();
        prop_assert_eq!(registry.tag(&node_id, &1, &1).unwrap().value(), &Value::Uint8(vec![last]));
        prop_assert_eq!(
            registry.layer(&node_id, &1).unwrap().value(&item_id),
            Some(&Value::Uint32(vec![last as u32]))
        );
    }
}
