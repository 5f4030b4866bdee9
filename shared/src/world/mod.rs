pub mod error;
pub mod layer;
pub mod layer_tree;
pub mod node;
pub mod tag;
pub mod tag_group;
