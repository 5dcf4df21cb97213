//! Authentication building blocks: JWT access tokens, refresh-token
//! helpers, and argon2id password hashing.

pub mod jwt;
pub mod password;
