//! Local sign-up and login.
//!
//! Credentials are a single email/password pair kept verbatim in the
//! [`KvStore`](crate::store::KvStore) and compared verbatim on login. This is a
//! convenience gate in front of the library screen, not a security boundary.

mod credentials;

pub use credentials::*;
