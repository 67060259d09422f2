//! Account profile.
//!
//! Profile fields live in the key-value store next to the credentials. The
//! account screen loads them with defaults, writes them back locally and then
//! pushes them to the profile endpoint. A failed push is reported, but the
//! local values stay as written.

mod badge;
mod client;
mod model;

pub use badge::{BADGE_COLORS, ProfileBadge};
pub use client::{ProfileClient, ProfileError, SAVE_FAILED_MESSAGE, SAVED_MESSAGE, save};
pub use model::{DateOfBirth, Profile, reset_avatar};
