//! Application model: which screen is up, the forms on it and the library
//! and player behind the main view.
//!
//! Every user action is a method here so the event loop only translates keys
//! and the whole flow can be driven from tests with a fake media element.

use std::fmt::Display;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, warn};

use crate::auth::{self, AuthError, LoginOutcome};
use crate::config::Settings;
use crate::library::{LibraryState, Tab, Track};
use crate::player::{MediaElement, PlaybackController};
use crate::profile::{self, Profile, ProfileBadge, ProfileClient, SAVED_MESSAGE};
use crate::store::KvStore;

use super::forms::{AddTrackForm, CredentialForm};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    SignUp,
    Login,
    Library,
    Account,
}

/// What has keyboard focus on the library screen.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Carousel,
    Recents,
    Playlists,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Carousel => Focus::Recents,
            Focus::Recents => Focus::Playlists,
            Focus::Playlists => Focus::Carousel,
        }
    }
}

/// Modal input on top of the library screen.
#[derive(Debug, Clone, Default)]
pub enum Overlay {
    #[default]
    None,
    Search,
    AddTrack(AddTrackForm),
}

/// A message that blocks input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// Knobs taken from [`Settings`] at startup.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub header_text: String,
    pub show_track_info: bool,
    pub seek_step: Duration,
    pub volume_step: f32,
    pub media_root: Option<PathBuf>,
}

impl AppOptions {
    pub fn from_settings(settings: &Settings, media_root: Option<PathBuf>) -> Self {
        Self {
            header_text: settings.ui.header_text.clone(),
            show_track_info: settings.ui.show_track_info,
            seek_step: Duration::from_secs(settings.player.seek_step_seconds),
            volume_step: settings.player.volume_step,
            media_root,
        }
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), None)
    }
}

pub struct App<M> {
    pub screen: Screen,
    pub sign_up: CredentialForm,
    pub login: CredentialForm,
    pub overlay: Overlay,
    pub focus: Focus,
    pub notice: Option<Notice>,
    pub status: Option<String>,
    pub show_track_info: bool,

    store: KvStore,
    library: LibraryState,
    player: PlaybackController<M>,
    profile: Profile,
    badge: Option<ProfileBadge>,
    profile_client: ProfileClient,
    options: AppOptions,

    search_input: String,
    cursor: usize,
    recents_cursor: usize,
    playlists_cursor: usize,
}

impl<M: MediaElement> App<M> {
    pub fn new(
        store: KvStore,
        library: LibraryState,
        player: PlaybackController<M>,
        profile_client: ProfileClient,
        options: AppOptions,
    ) -> Self {
        let screen = if auth::is_logged_in(&store) {
            Screen::Library
        } else {
            Screen::SignUp
        };
        let profile = Profile::load(&store);
        let badge = ProfileBadge::for_email(&profile.email);
        let search_input = library.query().to_string();

        Self {
            screen,
            sign_up: CredentialForm::default(),
            login: CredentialForm::default(),
            overlay: Overlay::None,
            focus: Focus::Carousel,
            notice: None,
            status: None,
            show_track_info: options.show_track_info,
            store,
            library,
            player,
            profile,
            badge,
            profile_client,
            options,
            search_input,
            cursor: 0,
            recents_cursor: 0,
            playlists_cursor: 0,
        }
    }

    pub fn library(&self) -> &LibraryState {
        &self.library
    }

    pub fn player(&self) -> &PlaybackController<M> {
        &self.player
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn badge(&self) -> Option<&ProfileBadge> {
        self.badge.as_ref()
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    pub fn media_root(&self) -> Option<&std::path::Path> {
        self.options.media_root.as_deref()
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn recents_cursor(&self) -> usize {
        self.recents_cursor
    }

    pub fn playlists_cursor(&self) -> usize {
        self.playlists_cursor
    }

    /// The slice of the filtered view the carousel shows.
    pub fn carousel_window(&self) -> &[Track] {
        self.player.carousel().window(self.library.filtered())
    }

    /// The carousel card under the cursor.
    pub fn highlighted(&self) -> Option<&Track> {
        self.carousel_window().get(self.cursor)
    }

    // auth screens

    pub fn show_login(&mut self) {
        self.sign_up.clear();
        self.screen = Screen::Login;
    }

    pub fn show_sign_up(&mut self) {
        self.login.clear();
        self.screen = Screen::SignUp;
    }

    pub fn submit_sign_up(&mut self) {
        match auth::sign_up(&mut self.store, &self.sign_up.email, &self.sign_up.password) {
            Ok(()) => {
                self.show_login();
                self.status = Some("Account created. Log in to continue.".to_string());
            }
            Err(e @ AuthError::MissingFields) => self.sign_up.error = Some(e.to_string()),
            Err(e) => {
                error!("sign-up failed: {e}");
                self.sign_up.error = Some(e.to_string());
            }
        }
    }

    pub fn submit_login(&mut self) {
        match auth::login(&mut self.store, &self.login.email, &self.login.password) {
            Ok(LoginOutcome::LoggedIn) => {
                self.login.clear();
                self.profile = Profile::load(&self.store);
                self.badge = ProfileBadge::for_email(&self.profile.email);
                self.status = None;
                self.screen = Screen::Library;
            }
            Ok(outcome @ LoginOutcome::Incorrect) => {
                self.login.error = outcome.message().map(str::to_string);
            }
            Err(e) => {
                error!("login failed: {e}");
                self.login.error = Some(e.to_string());
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(e) = auth::logout(&mut self.store) {
            self.report("logout", e);
            return;
        }
        self.player.pause();
        self.overlay = Overlay::None;
        self.notice = None;
        self.screen = Screen::Login;
    }

    // library: tabs, search, carousel

    pub fn select_tab(&mut self, tab: Tab) {
        if let Err(e) = self.library.select_tab(tab, &mut self.store) {
            self.report("tab change", e);
        }
        self.view_changed();
    }

    /// Step through the tab bar. An opened playlist counts as `Playlists`.
    pub fn cycle_tab(&mut self, forward: bool) {
        let active = self.library.tab();
        let pos = Tab::BAR
            .iter()
            .position(|t| t.highlights(active))
            .unwrap_or(0);
        let len = Tab::BAR.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.select_tab(Tab::BAR[next]);
    }

    pub fn open_search(&mut self) {
        self.overlay = Overlay::Search;
    }

    pub fn close_search(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn search_push(&mut self, c: char) {
        self.search_input.push(c);
        self.run_search();
    }

    pub fn search_pop(&mut self) {
        self.search_input.pop();
        self.run_search();
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.run_search();
        self.overlay = Overlay::None;
    }

    fn run_search(&mut self) {
        if let Err(e) = self.library.search(&self.search_input, &mut self.store) {
            self.report("search", e);
        }
        self.view_changed();
    }

    pub fn carousel_next(&mut self, now: Instant) -> bool {
        let moved = self.player.next(self.library.filtered().len(), now);
        if moved {
            self.clamp_cursor();
        }
        moved
    }

    pub fn carousel_previous(&mut self, now: Instant) -> bool {
        let moved = self.player.previous(self.library.filtered().len(), now);
        if moved {
            self.clamp_cursor();
        }
        moved
    }

    pub fn move_cursor(&mut self, forward: bool) {
        match self.focus {
            Focus::Carousel => {
                let len = self.carousel_window().len();
                self.cursor = step(self.cursor, len, forward);
            }
            Focus::Recents => {
                let len = self.library.recents().len();
                self.recents_cursor = step(self.recents_cursor, len, forward);
            }
            Focus::Playlists => {
                let len = self.library.playlists().len();
                self.playlists_cursor = step(self.playlists_cursor, len, forward);
            }
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Act on whatever the focused pane has under its cursor.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Carousel => {
                if let Some(track) = self.highlighted().cloned() {
                    self.play_track(&track);
                }
            }
            Focus::Recents => {
                if let Some(track) = self.library.recents().get(self.recents_cursor).cloned() {
                    self.play_track(&track);
                }
            }
            Focus::Playlists => {
                if let Some(id) = self.library.playlists().get(self.playlists_cursor).map(|p| p.id) {
                    self.open_playlist(id);
                }
            }
        }
    }

    pub fn open_playlist(&mut self, id: u64) {
        match self.library.select_playlist(id, &mut self.store) {
            Ok(true) => {
                self.focus = Focus::Carousel;
                self.view_changed();
            }
            Ok(false) => warn!(id, "no playlist with that id"),
            Err(e) => self.report("playlist", e),
        }
    }

    /// Make `track` the active track, record it as recently played and start it.
    pub fn play_track(&mut self, track: &Track) {
        if let Err(e) = self.library.add_recently_played(track, &mut self.store) {
            self.report("recently played", e);
        }
        self.recents_cursor = 0;
        match self.player.select(track) {
            Ok(()) => self.status = None,
            Err(e) => {
                warn!(id = track.id, "cannot play: {e}");
                self.status = Some(format!("Cannot play {}: {e}", track.title));
            }
        }
    }

    pub fn toggle_favorite_highlighted(&mut self) {
        let Some(track) = self.highlighted().cloned() else {
            return;
        };
        match self.library.toggle_favorite(&track, &mut self.store) {
            Ok(now_favorite) => {
                let verb = if now_favorite { "Added to" } else { "Removed from" };
                self.status = Some(format!("{verb} favorites: {}", track.title));
                self.clamp_cursor();
            }
            Err(e) => self.report("favorite", e),
        }
    }

    pub fn toggle_track_info(&mut self) {
        self.show_track_info = !self.show_track_info;
    }

    // playback

    pub fn toggle_play_pause(&mut self) {
        self.player.toggle_play_pause();
    }

    pub fn play(&mut self) {
        self.player.play();
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn seek_forward(&mut self) {
        self.player.seek_by(self.options.seek_step.as_secs_f64());
    }

    pub fn seek_backward(&mut self) {
        self.player.seek_by(-self.options.seek_step.as_secs_f64());
    }

    pub fn volume_up(&mut self) {
        self.player.adjust_volume(self.options.volume_step);
    }

    pub fn volume_down(&mut self) {
        self.player.adjust_volume(-self.options.volume_step);
    }

    /// Pull the latest position and end-of-track state from the media element.
    pub fn tick(&mut self) {
        self.player.refresh();
    }

    // add track

    pub fn open_add_track(&mut self) {
        self.overlay = Overlay::AddTrack(AddTrackForm::default());
    }

    pub fn add_track_form(&mut self) -> Option<&mut AddTrackForm> {
        match &mut self.overlay {
            Overlay::AddTrack(form) => Some(form),
            _ => None,
        }
    }

    pub fn submit_add_track(&mut self) {
        let Overlay::AddTrack(form) = &mut self.overlay else {
            return;
        };
        match self.library.add_user_track(form.to_new_track(), &mut self.store) {
            Ok(track) => {
                self.status = Some(format!("Added {}", track.display()));
                self.overlay = Overlay::None;
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    // account

    pub fn open_account(&mut self) {
        self.profile = Profile::load(&self.store);
        self.overlay = Overlay::None;
        self.screen = Screen::Account;
    }

    pub fn close_account(&mut self) {
        self.notice = None;
        self.screen = Screen::Library;
    }

    pub fn toggle_marketing(&mut self) {
        self.profile.marketing = !self.profile.marketing;
    }

    pub fn reset_avatar(&mut self) {
        match profile::reset_avatar(&mut self.profile, &mut self.store) {
            Ok(()) => self.status = Some("Avatar reset.".to_string()),
            Err(e) => self.report("avatar reset", e),
        }
    }

    /// Persist the profile and push it to the server; either way the outcome
    /// is shown as a notice.
    pub fn save_profile(&mut self) {
        let result = profile::save(&self.profile, &mut self.store, &self.profile_client);
        self.badge = ProfileBadge::for_email(&self.profile.email);
        self.notice = Some(match result {
            Ok(()) => Notice {
                message: SAVED_MESSAGE.to_string(),
                is_error: false,
            },
            Err(e) => Notice {
                message: e.message().to_string(),
                is_error: true,
            },
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // helpers

    fn view_changed(&mut self) {
        self.player.carousel_mut().reset();
        self.cursor = 0;
    }

    fn clamp_cursor(&mut self) {
        let len = self.library.filtered().len();
        self.player.carousel_mut().clamp(len);
        let window = self.carousel_window().len();
        if self.cursor >= window {
            self.cursor = window.saturating_sub(1);
        }
    }

    fn report(&mut self, action: &str, e: impl Display) {
        error!("{action} failed: {e}");
        self.status = Some(format!("{action} failed: {e}"));
    }
}

fn step(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1).min(len - 1)
    } else {
        current.saturating_sub(1)
    }
}
