//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, IssuedToken, TokenService};
pub use password::{hash_password, verify_password, CredentialStore};
