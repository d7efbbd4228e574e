//! Token verification gate. Tokens are issued elsewhere; this module only
//! checks them and hands the caller's identity to the handlers.

mod claims;
mod extractors;
mod jwt;

pub use claims::{Claims, Role};
pub use extractors::{AuthFoodPartner, AuthUser};
pub use jwt::JwtKeys;
