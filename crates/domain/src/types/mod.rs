//! Domain types

pub mod token;

pub use token::{ClientTokenPayload, InternalUserTokenPayload, TokenPayload};
