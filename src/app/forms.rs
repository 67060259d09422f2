//! Text-entry state for the credential and add-track forms.

use std::path::PathBuf;

use crate::library::NewTrack;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CredentialField {
    #[default]
    Email,
    Password,
}

/// Email + password entry used by both the sign-up and login screens.
#[derive(Debug, Clone, Default)]
pub struct CredentialForm {
    pub email: String,
    pub password: String,
    pub field: CredentialField,
    pub error: Option<String>,
}

impl CredentialForm {
    pub fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            CredentialField::Email => CredentialField::Password,
            CredentialField::Password => CredentialField::Email,
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The password as it is drawn on screen.
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            CredentialField::Email => &mut self.email,
            CredentialField::Password => &mut self.password,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AddTrackField {
    #[default]
    Title,
    Artist,
    Cover,
    Audio,
}

impl AddTrackField {
    pub const ALL: [AddTrackField; 4] = [
        AddTrackField::Title,
        AddTrackField::Artist,
        AddTrackField::Cover,
        AddTrackField::Audio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AddTrackField::Title => "Title",
            AddTrackField::Artist => "Artist",
            AddTrackField::Cover => "Cover file",
            AddTrackField::Audio => "Audio file",
        }
    }

    fn next(self) -> Self {
        match self {
            AddTrackField::Title => AddTrackField::Artist,
            AddTrackField::Artist => AddTrackField::Cover,
            AddTrackField::Cover => AddTrackField::Audio,
            AddTrackField::Audio => AddTrackField::Title,
        }
    }
}

/// The "add track" modal. Cover and audio are optional local file paths.
#[derive(Debug, Clone, Default)]
pub struct AddTrackForm {
    pub title: String,
    pub artist: String,
    pub cover: String,
    pub audio: String,
    pub field: AddTrackField,
    pub error: Option<String>,
}

impl AddTrackForm {
    pub fn value(&self, field: AddTrackField) -> &str {
        match field {
            AddTrackField::Title => &self.title,
            AddTrackField::Artist => &self.artist,
            AddTrackField::Cover => &self.cover,
            AddTrackField::Audio => &self.audio,
        }
    }

    pub fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn to_new_track(&self) -> NewTrack {
        let path = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| PathBuf::from(s))
        };
        NewTrack {
            title: self.title.clone(),
            artist: self.artist.clone(),
            cover: path(&self.cover),
            audio: path(&self.audio),
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            AddTrackField::Title => &mut self.title,
            AddTrackField::Artist => &mut self.artist,
            AddTrackField::Cover => &mut self.cover,
            AddTrackField::Audio => &mut self.audio,
        }
    }
}
