//! Admin capability bitmask.
//!
//! Every admin row stores a single `i32`. Each named capability owns one bit, in the
//! order of [`CAPABILITIES`]. A negative value is the superuser sentinel: it grants
//! every capability, including names this build does not know about.
//!
//! # Example
//!
//! ```
//! use campus_core::permissions::AdminPermissions;
//!
//! let mut perms = AdminPermissions::none();
//! perms.set("year", true).unwrap();
//!
//! assert!(perms.is_allowed("year"));
//! assert!(!perms.is_allowed("school"));
//! assert!(AdminPermissions::superuser().is_allowed("anything"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Capability names
// =============================================================================

/// Manage users
pub const USER: &str = "user";
/// Promote, demote and edit admins
pub const ADMIN: &str = "admin";
/// Manage schools, timeslots and lectures
pub const SCHOOL: &str = "school";
/// Manage academic years
pub const YEAR: &str = "year";
/// Manage terms and division membership
pub const TERM: &str = "term";
/// Manage courses and divisions
pub const COURSE: &str = "course";
/// Manage elective (choice based credit) offerings
pub const CBCS: &str = "cbcs";
/// Manage student records
pub const STUDENT: &str = "student";
/// Manage professor records
pub const PROFESSOR: &str = "professor";

/// Bit order of the known capabilities. Index `i` is bit `1 << i`.
pub const CAPABILITIES: [&str; 9] = [
    USER, ADMIN, SCHOOL, YEAR, TERM, COURSE, CBCS, STUDENT, PROFESSOR,
];

/// Value stored for superusers.
pub const SUPERUSER_PERMISSIONS: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The name is not one of [`CAPABILITIES`].
    UnknownCapability(String),
    /// The value is the superuser sentinel and cannot be edited bit by bit.
    Superuser,
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCapability(name) => write!(f, "Unknown permission '{}'", name),
            Self::Superuser => write!(f, "Superuser permissions cannot be modified"),
        }
    }
}

impl std::error::Error for PermissionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AdminPermissions(i32);

impl AdminPermissions {
    pub const fn new(permissions: i32) -> Self {
        Self(permissions)
    }

    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn superuser() -> Self {
        Self(SUPERUSER_PERMISSIONS)
    }

    /// Builds a mask from capability names. Unknown names are rejected.
    pub fn from_names(names: &[&str]) -> Result<Self, PermissionError> {
        let mut perms = Self::none();
        for name in names {
            perms.set(name, true)?;
        }
        Ok(perms)
    }

    pub const fn permissions(&self) -> i32 {
        self.0
    }

    pub const fn is_superuser(&self) -> bool {
        self.0 < 0
    }

    fn bit(name: &str) -> Option<i32> {
        CAPABILITIES
            .iter()
            .position(|known| *known == name)
            .map(|index| 1 << index)
    }

    /// Whether an admin holding this mask may perform `permission`.
    pub fn is_allowed(&self, permission: &str) -> bool {
        self.is_superuser() || self.get(permission)
    }

    /// Raw bit read. The superuser sentinel reads as set for every name.
    pub fn get(&self, permission: &str) -> bool {
        if self.is_superuser() {
            return true;
        }
        Self::bit(permission).is_some_and(|bit| self.0 & bit != 0)
    }

    /// Sets or clears one capability bit.
    pub fn set(&mut self, permission: &str, allowed: bool) -> Result<(), PermissionError> {
        if self.is_superuser() {
            return Err(PermissionError::Superuser);
        }

        let bit = Self::bit(permission)
            .ok_or_else(|| PermissionError::UnknownCapability(permission.to_string()))?;

        if allowed {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }

        Ok(())
    }

    /// Names of the capabilities granted by this mask.
    pub fn names(&self) -> Vec<&'static str> {
        CAPABILITIES
            .iter()
            .copied()
            .filter(|name| self.get(name))
            .collect()
    }
}

impl From<i32> for AdminPermissions {
    fn from(permissions: i32) -> Self {
        Self(permissions)
    }
}

impl From<AdminPermissions> for i32 {
    fn from(perms: AdminPermissions) -> Self {
        perms.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superuser_allows_everything() {
        let perms = AdminPermissions::superuser();
        for name in CAPABILITIES {
            assert!(perms.is_allowed(name));
        }
        assert!(perms.is_allowed("not-a-capability"));
        assert!(perms.is_allowed(""));
    }

    #[test]
    fn test_any_negative_value_is_superuser() {
        assert!(AdminPermissions::new(-42).is_allowed("course"));
        assert!(AdminPermissions::new(i32::MIN).is_allowed("whatever"));
    }

    #[test]
    fn test_zero_denies_everything() {
        let perms = AdminPermissions::none();
        for name in CAPABILITIES {
            assert!(!perms.is_allowed(name));
        }
    }

    #[test]
    fn test_bit_order() {
        assert!(AdminPermissions::new(1).is_allowed(USER));
        assert!(AdminPermissions::new(1 << 1).is_allowed(ADMIN));
        assert!(AdminPermissions::new(1 << 2).is_allowed(SCHOOL));
        assert!(AdminPermissions::new(1 << 5).is_allowed(COURSE));
        assert!(AdminPermissions::new(1 << 8).is_allowed(PROFESSOR));
        assert!(!AdminPermissions::new(1 << 8).is_allowed(STUDENT));
    }

    #[test]
    fn test_unknown_name_denied_even_with_all_bits() {
        let perms = AdminPermissions::new(i32::MAX);
        assert!(perms.is_allowed(YEAR));
        assert!(!perms.is_allowed("library"));
    }

    #[test]
    fn test_set_then_clear_round_trips() {
        for start in [0, 0b1010, 0b1_1111_1111] {
            for name in CAPABILITIES {
                let mut perms = AdminPermissions::new(start);
                let was_set = perms.get(name);
                perms.set(name, !was_set).unwrap();
                assert_ne!(perms.get(name), was_set);
                perms.set(name, was_set).unwrap();
                assert_eq!(perms.permissions(), start);
            }
        }
    }

    #[test]
    fn test_set_leaves_other_bits_alone() {
        let mut perms = AdminPermissions::from_names(&[SCHOOL, TERM]).unwrap();
        perms.set(TERM, false).unwrap();
        assert!(perms.is_allowed(SCHOOL));
        assert!(!perms.is_allowed(TERM));
    }

    #[test]
    fn test_superuser_is_protected() {
        let mut perms = AdminPermissions::superuser();
        assert_eq!(perms.set(USER, false), Err(PermissionError::Superuser));
        assert_eq!(perms.permissions(), SUPERUSER_PERMISSIONS);
    }

    #[test]
    fn test_set_unknown_name_fails() {
        let mut perms = AdminPermissions::none();
        assert_eq!(
            perms.set("library", true),
            Err(PermissionError::UnknownCapability("library".to_string()))
        );
        assert_eq!(perms.permissions(), 0);
    }

    #[test]
    fn test_names() {
        let perms = AdminPermissions::from_names(&[YEAR, USER]).unwrap();
        assert_eq!(perms.names(), vec![USER, YEAR]);
        assert_eq!(AdminPermissions::superuser().names().len(), CAPABILITIES.len());
    }
}
