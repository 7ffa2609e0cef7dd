//! Account API handlers.
//!
//! ```text
//! POST /api/auth/signup {"name":"Ada","email":"ada@example.com","password":"pw"}
//! POST /api/auth/login {"email":"ada@example.com","password":"pw"}
//! GET /api/auth/profile
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, SignupDetails, SignupInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerAuth;
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credentials_error;

/// Signup request body for `POST /api/auth/signup`.
///
/// Missing fields deserialise as blank strings so they fail validation with
/// a field-specific error rather than a generic JSON error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid or duplicate signup data", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let details = SignupDetails::try_from_parts(SignupInput {
        name: &payload.name,
        email: &payload.email,
        password: &payload.password,
        role_title: payload.role_title.as_deref(),
        bio: payload.bio.as_deref(),
    })
    .map_err(credentials_error)?;

    let user = state.signup.signup(details).await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_store_header())
        .json(user))
}

/// Exchange credentials for a bearer token.
///
/// Unknown emails and wrong passwords produce the same 401 response.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Blank email or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(credentials_error)?;
    let token = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(LoginResponse {
            token: token.as_str().to_owned(),
        }))
}

/// Return the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Profile", body = UserSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "profile"
)]
#[get("/auth/profile")]
pub async fn profile(state: web::Data<HttpState>, auth: BearerAuth) -> ApiResult<HttpResponse> {
    let user = state.profile.fetch_profile(auth.user_id()).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(user))
}

#[cfg(test)]
mod tests;
