//! Account handlers: registration, login, logout and the current profile.
//!
//! ```text
//! POST /api/v1/register {"email":"ada@example.com","displayName":"Ada","password":"correct horse"}
//! POST /api/v1/login {"email":"ada@example.com","password":"correct horse"}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, AuthValidationError, Error, LoginCredentials, Registration, User,
    UserValidationError,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub display_name: String,
    #[schema(example = "correct horse battery")]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Account as returned to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            display_name: user.display_name.to_string(),
            created_at: user.created_at,
        }
    }
}

fn map_auth_validation_error(err: AuthValidationError) -> Error {
    let (field, code) = match &err {
        AuthValidationError::Email(inner) => ("email", user_error_code(inner)),
        AuthValidationError::DisplayName(inner) => ("displayName", user_error_code(inner)),
        AuthValidationError::EmptyPassword => ("password", "required"),
        AuthValidationError::PasswordTooShort { .. } => ("password", "too_short"),
        AuthValidationError::PasswordTooLong { .. } => ("password", "too_long"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn user_error_code(err: &UserValidationError) -> &'static str {
    match err {
        UserValidationError::EmptyEmail | UserValidationError::EmptyDisplayName => "required",
        UserValidationError::EmailTooLong { .. }
        | UserValidationError::DisplayNameTooLong { .. } => "too_long",
        UserValidationError::DisplayNameTooShort { .. } => "too_short",
        UserValidationError::EmptyId
        | UserValidationError::InvalidId
        | UserValidationError::InvalidEmail
        | UserValidationError::DisplayNameInvalidCharacters => "invalid",
    }
}

/// Create an account and establish a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "E-mail already registered", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        display_name,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&email, &display_name, &password)
        .map_err(map_auth_validation_error)?;
    let user = state.accounts.register(&registration).await?;
    session.persist_user(&user.id)?;
    info!(user_id = %user.id, "account registered");
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate and establish a session.
///
/// Unknown e-mails and wrong passwords produce the same 401 response.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_auth_validation_error)?;
    let user = state.accounts.authenticate(&credentials).await?;
    session.persist_user(&user.id)?;
    Ok(web::Json(user.into()))
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Profile of the logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.accounts.profile(&user_id).await?;
    Ok(web::Json(user.into()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(current_user);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Email, UserId};
    use crate::inbound::http::test_utils::{
        MockPorts, TEST_USER_ID, login_cookie, test_app, test_user,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    fn user(id: UserId) -> User {
        User {
            id,
            email: Email::new("ada@example.com").expect("valid email"),
            display_name: DisplayName::new("Ada Lovelace").expect("valid display name"),
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn register_creates_account_and_session() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_register()
            .withf(|registration| registration.email().as_ref() == "ada@example.com")
            .times(1)
            .returning(|_| Ok(user(test_user())));
        ports
            .accounts
            .expect_profile()
            .returning(|id| Ok(user(id.clone())));
        let app = actix_test::init_service(test_app(ports, configure)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_json(json!({
                    "email": " ADA@example.com ",
                    "displayName": "Ada Lovelace",
                    "password": "correct horse",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let cookie = crate::inbound::http::test_utils::session_cookie(&res);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["id"], TEST_USER_ID);
        assert_eq!(body["displayName"], "Ada Lovelace");

        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users/me").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(json!({"email": "ada", "displayName": "Ada", "password": "correct horse"}), "email", "invalid")]
    #[case(json!({"email": "ada@example.com", "displayName": "Ad", "password": "correct horse"}), "displayName", "too_short")]
    #[case(json!({"email": "ada@example.com", "displayName": "Ada", "password": "short"}), "password", "too_short")]
    #[actix_web::test]
    async fn register_rejects_invalid_input(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[actix_web::test]
    async fn duplicate_registration_is_conflict() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_register()
            .returning(|_| Err(Error::conflict("user already exists")));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_json(json!({
                    "email": "ada@example.com",
                    "displayName": "Ada",
                    "password": "correct horse",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn login_failure_is_unauthorised_without_cookie() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid email or password")));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(json!({"email": "ada@example.com", "password": "nope nope"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|cookie| cookie.name() != "session"));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "invalid email or password");
    }

    #[actix_web::test]
    async fn login_success_returns_user() {
        let mut ports = MockPorts::default();
        ports
            .accounts
            .expect_authenticate()
            .withf(|credentials| credentials.password() == "correct horse")
            .returning(|_| Ok(user(test_user())));
        let app = actix_test::init_service(test_app(ports, configure)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_json(json!({"email": "ada@example.com", "password": "correct horse"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["email"], "ada@example.com");
    }

    #[actix_web::test]
    async fn logout_clears_session() {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri("/logout").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn current_user_requires_session() {
        let app = actix_test::init_service(test_app(MockPorts::default(), configure)).await;
        let req = actix_test::TestRequest::get().uri("/users/me").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
