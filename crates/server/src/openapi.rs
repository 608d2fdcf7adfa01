use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String }

#[derive(ToSchema)]
pub struct MessageBody { pub message: String }

#[derive(ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// `admin` or `artist`
    pub user_type: String,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    /// e.g. `Thursday, April 04, 2030 05:00 PM`
    pub created_at: String,
    pub last_login: Option<String>,
}

#[derive(ToSchema)]
pub struct SignupResponse { pub message: String, pub user: UserDoc }

#[derive(ToSchema)]
pub struct SigninRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct SigninResponse { pub message: String, pub token: String, pub user: UserDoc }

#[derive(ToSchema)]
pub struct ResetRequest { pub email: String }

#[derive(ToSchema)]
pub struct ResetPasswordRequest { pub token: String, pub new_password: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::signup,
        crate::routes::auth::signin,
        crate::routes::auth::request_password_reset,
        crate::routes::auth::reset_password,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            MessageBody,
            SignupRequest,
            UserDoc,
            SignupResponse,
            SigninRequest,
            SigninResponse,
            ResetRequest,
            ResetPasswordRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
