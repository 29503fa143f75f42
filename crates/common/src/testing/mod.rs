//! Testing utilities and helpers
//!
//! - **[`fixtures`]**: token fixtures produced by Node's `crypto` module,
//!   used to pin cross-runtime compatibility of the token cipher
//!
//! ## Usage
//!
//! ```rust
//! use assembly_common::crypto::decrypt_token_string;
//! use assembly_common::testing::fixtures::{CLIENT_TOKEN, TEST_API_KEY};
//!
//! let json = decrypt_token_string(TEST_API_KEY, CLIENT_TOKEN).unwrap();
//! assert!(json.contains("clientId"));
//! ```

pub mod fixtures;
