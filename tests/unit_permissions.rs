use campus::campus_core::permissions::{
    ADMIN, AdminPermissions, CAPABILITIES, CBCS, COURSE, PermissionError, SCHOOL, STUDENT,
    SUPERUSER_PERMISSIONS, TERM, USER, YEAR,
};
use campus::campus_models::admins::Admin;
use campus::campus_models::ids::UserId;

#[test]
fn test_stored_value_matches_bit_order() {
    let perms = AdminPermissions::from_names(&[USER, SCHOOL, CBCS]).unwrap();
    assert_eq!(perms.permissions(), 1 | (1 << 2) | (1 << 6));
}

#[test]
fn test_admin_row_exposes_mask() {
    let admin = Admin {
        user_id: UserId::new(),
        permissions: (1 << 3) | (1 << 4),
    };

    assert!(admin.permissions().is_allowed(YEAR));
    assert!(admin.permissions().is_allowed(TERM));
    assert!(!admin.permissions().is_allowed(COURSE));
}

#[test]
fn test_superuser_row() {
    let admin = Admin {
        user_id: UserId::new(),
        permissions: SUPERUSER_PERMISSIONS,
    };

    assert!(admin.permissions().is_superuser());
    assert!(CAPABILITIES.iter().all(|name| admin.permissions().is_allowed(name)));
}

#[test]
fn test_toggle_every_capability() {
    let mut perms = AdminPermissions::none();
    for name in CAPABILITIES {
        perms.set(name, true).unwrap();
    }
    assert_eq!(perms.permissions(), (1 << CAPABILITIES.len()) - 1);

    for name in CAPABILITIES {
        perms.set(name, false).unwrap();
    }
    assert_eq!(perms, AdminPermissions::none());
}

#[test]
fn test_errors() {
    assert_eq!(
        AdminPermissions::from_names(&[ADMIN, "janitor"]),
        Err(PermissionError::UnknownCapability("janitor".to_string()))
    );

    let mut root = AdminPermissions::superuser();
    assert_eq!(root.set(STUDENT, false), Err(PermissionError::Superuser));
    assert_eq!(
        PermissionError::Superuser.to_string(),
        "Superuser permissions cannot be modified"
    );
}

#[test]
fn test_serializes_as_plain_integer() {
    let perms = AdminPermissions::from_names(&[ADMIN]).unwrap();
    assert_eq!(serde_json::to_string(&perms).unwrap(), "2");

    let parsed: AdminPermissions = serde_json::from_str("-1").unwrap();
    assert!(parsed.is_superuser());
}
