use pei::middleware::auth::AuthUser;
use pei::pei_auth::Claims;
use pei::pei_core::permissions::{Capability, Role, get_permissions};
use uuid::Uuid;

fn auth_user(role: &str, school_id: Option<Uuid>) -> AuthUser {
    AuthUser(Claims {
        sub: Uuid::new_v4().to_string(),
        email: "test@escola.br".to_string(),
        role: role.to_string(),
        school_id,
        exp: 9999999999,
        iat: 1234567890,
    })
}

#[test]
fn test_administrador_can_manage_users() {
    assert!(get_permissions("Administrador").can_manage_users);
}

#[test]
fn test_profissional_edits_classes_but_cannot_delete_students() {
    let perms = get_permissions("Profissional");
    assert!(!perms.can_manage_users);
    assert!(!perms.can_delete_students);
    assert!(perms.can_edit_classes);
}

#[test]
fn test_tutor_is_read_oriented() {
    let perms = get_permissions("Tutor");
    assert!(!perms.can_edit_students);
    assert!(!perms.can_view_management);
    assert!(perms.can_view_students);
}

#[test]
fn test_familia_cannot_manage_users() {
    assert!(!get_permissions("Família").can_manage_users);
}

#[test]
fn test_unknown_role_falls_back_to_familia() {
    assert_eq!(get_permissions("UnknownRole"), get_permissions("Família"));
}

#[test]
fn test_every_set_has_all_nine_keys() {
    for role in ["Administrador", "Profissional", "Tutor", "Família", "Visitante"] {
        let json = serde_json::to_value(get_permissions(role)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 9, "{role}");
        for capability in Capability::ALL {
            assert!(object[capability.as_str()].is_boolean(), "{role} {capability}");
        }
    }
}

#[test]
fn test_resolution_is_deterministic() {
    for role in ["Administrador", "Tutor", "", "qualquer"] {
        assert_eq!(get_permissions(role), get_permissions(role));
    }
}

#[test]
fn test_only_administrador_sees_all_schools() {
    for role in Role::RECOGNIZED {
        assert_eq!(
            role.permissions().can_view_all_schools,
            role == Role::Administrador,
            "{role}"
        );
    }
}

#[test]
fn test_require_capability() {
    assert!(auth_user("Administrador", None).require(Capability::ManageUsers).is_ok());
    assert!(auth_user("Profissional", None).require(Capability::EditClasses).is_ok());
    assert!(auth_user("Tutor", None).require(Capability::DeleteStudents).is_err());
    assert!(auth_user("Nobody", None).require(Capability::ViewManagement).is_err());
}

#[test]
fn test_school_scope() {
    let school = Uuid::new_v4();
    let other = Uuid::new_v4();

    let admin = auth_user("Administrador", None);
    assert_eq!(admin.school_scope().unwrap(), None);
    assert_eq!(admin.scoped_school(Some(other)).unwrap(), Some(other));

    let profissional = auth_user("Profissional", Some(school));
    assert_eq!(profissional.school_scope().unwrap(), Some(school));
    assert_eq!(profissional.scoped_school(Some(other)).unwrap(), Some(school));

    let unassigned = auth_user("Tutor", None);
    assert!(unassigned.school_scope().is_err());
}
