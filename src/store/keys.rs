//! Names of the entries kept in the store.

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const LOGGED_IN: &str = "loggedIn";

pub const TRACKS: &str = "tracks";
pub const RECENT_TRACKS: &str = "recentTracks";
pub const FAVORITE_TRACKS: &str = "favoriteTracks";
pub const PLAYLISTS: &str = "playlists";

pub const GENDER: &str = "gender";
pub const DOB_DAY: &str = "dob_day";
pub const DOB_MONTH: &str = "dob_month";
pub const DOB_YEAR: &str = "dob_year";
pub const COUNTRY: &str = "country";
pub const MARKETING: &str = "marketing";
pub const AVATAR: &str = "avatar";
