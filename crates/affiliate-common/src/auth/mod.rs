//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, IssuedToken, JwtService, PrincipalKind};
pub use password::{
    generate_password, hash_password, verify_password, PasswordService, GENERATED_PASSWORD_LEN,
};
