pub type NodeId = u32;
pub type UserId = u16;
pub type TagGroupId = u16;
pub type TagId = u16;
pub type LayerId = u16;
pub type ItemId = u32;
pub type CustomType = u16;
pub type Priority = u8;

/// Bit set of node permissions granted to a single user.
pub type PermissionBits = u8;
