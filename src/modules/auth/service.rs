use pei_auth::create_access_token;
use pei_config::JwtConfig;
use pei_core::{AppError, get_permissions, verify_password};
use pei_observability::{track_jwt_issued, track_login_failure, track_login_success};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::modules::auth::model::{LoginRequest, LoginResponse, User};
use crate::modules::users::service::UserService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Checks credentials and issues an access token.
    ///
    /// Unknown emails and wrong passwords fail with the same 401 message.
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(row) = UserService::find_by_email(db, &dto.email).await? else {
            warn!("Login attempt for unknown email");
            track_login_failure();
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &row.senha_hash) {
            warn!(user_id = %row.id, "Login attempt with wrong password");
            track_login_failure();
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let access_token =
            create_access_token(row.id, &row.email, &row.perfil, row.escola_id, jwt_config)?;
        track_login_success(&row.perfil);
        track_jwt_issued();
        info!(user_id = %row.id, role = %row.perfil, "User logged in");

        let permissions = get_permissions(&row.perfil);
        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user: User::from(row),
            permissions,
        })
    }
}
