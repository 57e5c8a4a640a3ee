mod common;

use axum::http::StatusCode;
use common::{send, setup_test_app, token_for};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_health() {
    let (status, body) = send(setup_test_app(), "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (status, body) = send(setup_test_app(), "GET", "/api/students", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let (status, _) = send(
        setup_test_app(),
        "GET",
        "/api/auth/permissions",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tutor_cannot_delete_students() {
    let token = token_for("Tutor", Some(Uuid::new_v4()));
    let uri = format!("/api/students/{}", Uuid::new_v4());

    let (status, body) = send(setup_test_app(), "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "Access denied. Missing capability: canDeleteStudents"
    );
}

#[tokio::test]
async fn test_familia_cannot_view_professionals() {
    let token = token_for("Família", Some(Uuid::new_v4()));
    let (status, _) = send(
        setup_test_app(),
        "GET",
        "/api/professionals",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profissional_cannot_create_users() {
    let token = token_for("Profissional", Some(Uuid::new_v4()));
    let body = json!({
        "name": "Nova Pessoa",
        "email": "nova@escola.br",
        "password": "senha-segura",
        "role": "Tutor"
    });

    let (status, _) = send(
        setup_test_app(),
        "POST",
        "/api/users",
        Some(&token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_role_cannot_edit_students() {
    let token = token_for("Diretor", Some(Uuid::new_v4()));
    let uri = format!("/api/students/{}", Uuid::new_v4());

    let (status, _) = send(
        setup_test_app(),
        "PUT",
        &uri,
        Some(&token),
        Some(json!({"name": "Outro Nome"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_scoped_role_without_school_is_forbidden() {
    let token = token_for("Tutor", None);
    let (status, body) = send(setup_test_app(), "GET", "/api/students", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied. User is not assigned to a school");
}

#[tokio::test]
async fn test_permissions_endpoint_per_role() {
    let cases = [
        ("Administrador", true, true, true),
        ("Profissional", true, false, true),
        ("Tutor", true, false, false),
        ("Família", true, false, false),
    ];

    for (role, recognized, manage_users, edit_classes) in cases {
        let token = token_for(role, None);
        let (status, body) = send(
            setup_test_app(),
            "GET",
            "/api/auth/permissions",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{role}");
        assert_eq!(body["role"], role);
        assert_eq!(body["recognized"], recognized);
        assert_eq!(body["permissions"]["canManageUsers"], manage_users, "{role}");
        assert_eq!(body["permissions"]["canEditClasses"], edit_classes, "{role}");
    }
}

#[tokio::test]
async fn test_permissions_endpoint_unknown_role() {
    let familia = token_for("Família", None);
    let unknown = token_for("Coordenador", None);

    let (_, familia_body) = send(
        setup_test_app(),
        "GET",
        "/api/auth/permissions",
        Some(&familia),
        None,
    )
    .await;
    let (status, unknown_body) = send(
        setup_test_app(),
        "GET",
        "/api/auth/permissions",
        Some(&unknown),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown_body["recognized"], false);
    assert_eq!(unknown_body["permissions"], familia_body["permissions"]);
}

#[tokio::test]
async fn test_login_validation_runs_before_database() {
    let (status, _) = send(
        setup_test_app(),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "not-an-email", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        setup_test_app(),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email is required");
}
