//! Actor context for role-gated operations
//!
//! Every mutating service call receives the authenticated `Actor` so the
//! domain can enforce who may do what without seeing HTTP or tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::identifiers::UserId;

/// The role a platform user holds
///
/// Users hold exactly one role. Admins may perform any role's operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    ShopOwner,
    PhoneChecker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ShopOwner => "shop-owner",
            Role::PhoneChecker => "phone-checker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct RoleParseError(String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "shop-owner" => Ok(Role::ShopOwner),
            "phone-checker" => Ok(Role::PhoneChecker),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// The authenticated principal behind a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn shop_owner(user_id: UserId) -> Self {
        Self::new(user_id, Role::ShopOwner)
    }

    pub fn phone_checker(user_id: UserId) -> Self {
        Self::new(user_id, Role::PhoneChecker)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns true if this actor may perform operations gated to the role
    pub fn can_act_as(&self, role: Role) -> bool {
        self.role == role || self.is_admin()
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.user_id, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::ShopOwner.to_string(), "shop-owner");
        assert_eq!("phone-checker".parse::<Role>().unwrap(), Role::PhoneChecker);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_admin_acts_as_any_role() {
        let admin = Actor::admin(UserId::new());
        assert!(admin.can_act_as(Role::ShopOwner));
        assert!(admin.can_act_as(Role::PhoneChecker));
    }

    #[test]
    fn test_non_admin_is_limited_to_own_role() {
        let checker = Actor::phone_checker(UserId::new());
        assert!(checker.can_act_as(Role::PhoneChecker));
        assert!(!checker.can_act_as(Role::ShopOwner));
        assert!(!checker.can_act_as(Role::Admin));
    }
}
