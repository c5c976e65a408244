//! Capability bits and the permission gate.
//!
//! A caller's role mask is the bitwise OR of the capabilities it was granted.
//! Every broken-car operation requires exactly one bit; the check is a pure
//! bitwise AND and runs before any data access.

use crate::error::CoreError;

/// A caller's combined set of granted permission bits.
pub type RoleMask = i32;

pub const PERM_LIST: RoleMask = 1;
pub const PERM_CREATE: RoleMask = 2;
pub const PERM_UPDATE: RoleMask = 4;
pub const PERM_DELETE: RoleMask = 8;

/// Every capability bit set.
pub const PERM_ALL: RoleMask = PERM_LIST | PERM_CREATE | PERM_UPDATE | PERM_DELETE;

/// A single capability guarded by the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    List,
    Create,
    Update,
    Delete,
}

impl Permission {
    /// All capabilities, in bit order.
    pub const ALL: [Permission; 4] = [
        Permission::List,
        Permission::Create,
        Permission::Update,
        Permission::Delete,
    ];

    /// The bit this capability occupies in a [`RoleMask`].
    pub const fn bit(self) -> RoleMask {
        match self {
            Permission::List => PERM_LIST,
            Permission::Create => PERM_CREATE,
            Permission::Update => PERM_UPDATE,
            Permission::Delete => PERM_DELETE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Permission::List => "list",
            Permission::Create => "create",
            Permission::Update => "update",
            Permission::Delete => "delete",
        }
    }
}

/// Returns `true` when `roles` shares at least one bit with `required_bit`.
pub const fn has_permission(roles: RoleMask, required_bit: RoleMask) -> bool {
    roles & required_bit != 0
}

/// Fail with [`CoreError::PermissionDenied`] unless `roles` grants `required`.
pub fn check_permission(roles: RoleMask, required: Permission) -> Result<(), CoreError> {
    if has_permission(roles, required.bit()) {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied {
            permission: required.name(),
        })
    }
}
