use serde::Serialize;

use crate::store::{KvStore, StoreError, keys};

pub const DEFAULT_GENDER: &str = "Male";
pub const DEFAULT_DOB_DAY: &str = "11";
pub const DEFAULT_DOB_MONTH: &str = "January";
pub const DEFAULT_DOB_YEAR: &str = "2000";
pub const DEFAULT_COUNTRY: &str = "Georgia";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateOfBirth {
    pub day: String,
    pub month: String,
    pub year: String,
}

/// Everything the account screen shows. Serializes to the body of the
/// profile update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub email: String,
    pub password: String,
    pub gender: String,
    pub dob: DateOfBirth,
    pub country: String,
    pub marketing: bool,
    pub avatar: Option<String>,
}

impl Profile {
    pub fn load(store: &KvStore) -> Self {
        let text = |key: &str, default: &str| store.get(key).unwrap_or(default).to_string();

        Self {
            email: text(keys::EMAIL, ""),
            password: text(keys::PASSWORD, ""),
            gender: text(keys::GENDER, DEFAULT_GENDER),
            dob: DateOfBirth {
                day: text(keys::DOB_DAY, DEFAULT_DOB_DAY),
                month: text(keys::DOB_MONTH, DEFAULT_DOB_MONTH),
                year: text(keys::DOB_YEAR, DEFAULT_DOB_YEAR),
            },
            country: text(keys::COUNTRY, DEFAULT_COUNTRY),
            marketing: store.flag(keys::MARKETING),
            avatar: store.get(keys::AVATAR).map(str::to_string),
        }
    }

    /// Write every field back. The avatar key is only touched when one is set.
    pub fn persist(&self, store: &mut KvStore) -> Result<(), StoreError> {
        let mut fields = vec![
            (keys::EMAIL, self.email.clone()),
            (keys::PASSWORD, self.password.clone()),
            (keys::GENDER, self.gender.clone()),
            (keys::DOB_DAY, self.dob.day.clone()),
            (keys::DOB_MONTH, self.dob.month.clone()),
            (keys::DOB_YEAR, self.dob.year.clone()),
            (keys::COUNTRY, self.country.clone()),
            (keys::MARKETING, self.marketing.to_string()),
        ];
        if let Some(avatar) = &self.avatar {
            fields.push((keys::AVATAR, avatar.clone()));
        }
        store.set_many(fields)
    }
}

/// Drop the avatar from both the profile and the store.
pub fn reset_avatar(profile: &mut Profile, store: &mut KvStore) -> Result<(), StoreError> {
    profile.avatar = None;
    store.remove(keys::AVATAR)
}
