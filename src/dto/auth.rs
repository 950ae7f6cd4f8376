use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The token comes back already prefixed with the `Bearer ` scheme.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

/// JWT claims carried by a studio session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    /// User id as a string.
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
