use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of account a token was issued to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    FoodPartner,
}

impl Role {
    pub(crate) fn required_message(self) -> &'static str {
        match self {
            Role::User => "user account required",
            Role::FoodPartner => "food partner account required",
        }
    }
}

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,   // account ID
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
    pub role: Role,
}
