use super::*;
use crate::carousel::Carousel;
use crate::library::{LibraryState, Playlist, Tab, Track, TrackKind};
use crate::player::{MediaElement, MediaError, MediaStatus, PlaybackController, PlaybackState};
use crate::profile::{ProfileClient, SAVE_FAILED_MESSAGE};
use crate::store::{KvStore, keys};
use std::net::TcpListener;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Default)]
struct FakeMedia {
    status: MediaStatus,
}

impl MediaElement for FakeMedia {
    fn load(&mut self, _source: &Path) -> Result<(), MediaError> {
        self.status = MediaStatus {
            bound: true,
            playing: true,
            duration: Some(Duration::from_secs(180)),
            ..MediaStatus::default()
        };
        Ok(())
    }

    fn play(&mut self) {
        self.status.playing = true;
    }

    fn pause(&mut self) {
        self.status.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        self.status.position = position;
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn unload(&mut self) {
        self.status = MediaStatus::default();
    }

    fn status(&self) -> MediaStatus {
        self.status.clone()
    }
}

fn t(id: u64, title: &str) -> Track {
    Track {
        id,
        title: title.into(),
        artist: "Artist".into(),
        cover: String::new(),
        description: String::new(),
        audio: format!("/audio/{id}.mp3"),
        kind: if id % 2 == 0 {
            TrackKind::Podcast
        } else {
            TrackKind::Music
        },
    }
}

/// An endpoint nothing listens on.
fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/update-profile", listener.local_addr().unwrap());
    drop(listener);
    url
}

fn app_with(store: KvStore, catalog: Vec<Track>) -> App<FakeMedia> {
    let library = LibraryState::restore(&store, Ok(catalog), 5);
    let player = PlaybackController::new(FakeMedia::default(), Carousel::default(), 1.0, None);
    App::new(
        store,
        library,
        player,
        ProfileClient::new(dead_endpoint()),
        AppOptions::default(),
    )
}

fn app(catalog: Vec<Track>) -> App<FakeMedia> {
    app_with(KvStore::in_memory(), catalog)
}

fn type_into(form: &mut CredentialForm, email: &str, password: &str) {
    form.field = CredentialField::Email;
    email.chars().for_each(|c| form.push(c));
    form.switch_field();
    password.chars().for_each(|c| form.push(c));
}

fn logged_in(catalog: Vec<Track>) -> App<FakeMedia> {
    let mut store = KvStore::in_memory();
    store.set(keys::EMAIL, "a@b.com").unwrap();
    store.set(keys::PASSWORD, "x").unwrap();
    store.set_flag(keys::LOGGED_IN, true).unwrap();
    app_with(store, catalog)
}

#[test]
fn fresh_start_shows_sign_up() {
    assert_eq!(app(vec![]).screen, Screen::SignUp);
}

#[test]
fn stored_session_starts_on_library() {
    assert_eq!(logged_in(vec![]).screen, Screen::Library);
}

#[test]
fn sign_up_then_login_reaches_library() {
    let mut app = app(vec![t(1, "One")]);

    type_into(&mut app.sign_up, "a@b.com", "x");
    app.submit_sign_up();
    assert_eq!(app.screen, Screen::Login);

    type_into(&mut app.login, "a@b.com", "y");
    app.submit_login();
    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.login.error.as_deref(), Some("Incorrect email or password!"));
    assert_eq!(app.store().get(keys::LOGGED_IN), None);

    app.login.clear();
    type_into(&mut app.login, "a@b.com", "x");
    app.submit_login();
    assert_eq!(app.screen, Screen::Library);
    assert_eq!(app.store().get(keys::LOGGED_IN), Some("true"));
    assert_eq!(app.badge().map(|b| b.initial), Some('A'));
}

#[test]
fn sign_up_with_empty_field_stays_put() {
    let mut app = app(vec![]);
    type_into(&mut app.sign_up, "a@b.com", "");
    app.submit_sign_up();
    assert_eq!(app.screen, Screen::SignUp);
    assert_eq!(app.sign_up.error.as_deref(), Some("Please fill all fields."));
    assert!(!app.store().contains(keys::EMAIL));
}

#[test]
fn logout_returns_to_login_and_clears_flag() {
    let mut app = logged_in(vec![t(1, "One")]);
    app.activate();
    app.logout();
    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.store().get(keys::LOGGED_IN), Some("false"));
    assert_eq!(app.player().state(), PlaybackState::Paused);
}

#[test]
fn activating_a_card_plays_it_and_records_recent() {
    let mut app = logged_in(vec![t(1, "One"), t(2, "Two")]);
    app.move_cursor(true);
    app.activate();

    assert_eq!(app.player().active().map(|t| t.id), Some(2));
    assert_eq!(app.player().state(), PlaybackState::Playing);
    assert_eq!(app.library().recents()[0].id, 2);
}

#[test]
fn search_narrows_view_and_resets_tab_and_carousel() {
    let catalog = vec![t(1, "Test"), t(3, "Other"), t(5, "Latest"), t(7, "x")];
    let mut app = logged_in(catalog);
    app.select_tab(Tab::Favorites);
    app.open_search();
    app.search_push('t');
    app.search_push('e');

    assert_eq!(app.library().tab(), Tab::All);
    let titles: Vec<&str> = app.library().filtered().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Test", "Latest"]);
    assert_eq!(app.player().carousel().index(), 0);

    app.clear_search();
    assert_eq!(app.library().filtered().len(), 4);
    assert!(matches!(app.overlay, Overlay::None));
}

#[test]
fn cycle_tab_walks_the_bar_and_treats_open_playlist_as_playlists() {
    let mut store = KvStore::in_memory();
    store
        .set_json(
            keys::PLAYLISTS,
            &vec![Playlist {
                id: 9,
                name: "Mix".into(),
                tracks: vec![t(3, "Three")],
            }],
        )
        .unwrap();
    store.set_flag(keys::LOGGED_IN, true).unwrap();
    let mut app = app_with(store, vec![t(1, "One"), t(2, "Two")]);

    app.open_playlist(9);
    assert_eq!(app.library().tab(), Tab::Playlist(9));
    assert_eq!(app.library().filtered()[0].id, 3);

    app.cycle_tab(true);
    assert_eq!(app.library().tab(), Tab::Music);
    app.cycle_tab(true);
    assert_eq!(app.library().tab(), Tab::Podcasts);
    assert_eq!(app.library().filtered()[0].id, 2);
    app.cycle_tab(true);
    assert_eq!(app.library().tab(), Tab::All);
    app.cycle_tab(false);
    assert_eq!(app.library().tab(), Tab::Podcasts);
}

#[test]
fn playlists_pane_opens_the_playlist_under_cursor() {
    let mut store = KvStore::in_memory();
    store
        .set_json(
            keys::PLAYLISTS,
            &vec![
                Playlist {
                    id: 1,
                    name: "A".into(),
                    tracks: vec![],
                },
                Playlist {
                    id: 2,
                    name: "B".into(),
                    tracks: vec![t(5, "Five")],
                },
            ],
        )
        .unwrap();
    let mut app = app_with(store, vec![]);

    app.cycle_focus();
    app.cycle_focus();
    assert_eq!(app.focus, Focus::Playlists);
    app.move_cursor(true);
    app.activate();

    assert_eq!(app.library().tab(), Tab::Playlist(2));
    assert_eq!(app.focus, Focus::Carousel);
}

#[test]
fn carousel_steps_are_locked_for_the_transition() {
    let catalog: Vec<Track> = (1..=7).map(|i| t(i, &format!("T{i}"))).collect();
    let mut app = logged_in(catalog);
    let t0 = Instant::now();

    assert!(app.carousel_next(t0));
    assert!(!app.carousel_next(t0 + Duration::from_millis(100)));
    assert_eq!(app.carousel_window()[0].id, 2);

    assert!(app.carousel_previous(t0 + Duration::from_millis(600)));
    assert!(app.carousel_previous(t0 + Duration::from_millis(1200)));
    assert_eq!(app.player().carousel().index(), 6);
    assert_eq!(app.carousel_window().len(), 1);
}

#[test]
fn cursor_follows_a_shrinking_window() {
    let catalog: Vec<Track> = (1..=7).map(|i| t(i, &format!("T{i}"))).collect();
    let mut app = logged_in(catalog);
    (0..4).for_each(|_| app.move_cursor(true));
    assert_eq!(app.cursor(), 4);

    let t0 = Instant::now();
    for step in 0..3 {
        assert!(app.carousel_next(t0 + Duration::from_millis(600 * step)));
    }
    assert_eq!(app.carousel_window().len(), 4);
    assert_eq!(app.cursor(), 3);
    assert_eq!(app.highlighted().map(|t| t.id), Some(7));
}

#[test]
fn favorite_toggle_on_highlighted_card() {
    let mut app = logged_in(vec![t(1, "One"), t(3, "Three")]);
    app.toggle_favorite_highlighted();
    assert!(app.library().is_favorite(1));

    app.select_tab(Tab::Favorites);
    assert_eq!(app.library().filtered().len(), 1);
    app.toggle_favorite_highlighted();
    assert!(app.library().filtered().is_empty());
    assert_eq!(app.highlighted(), None);
}

#[test]
fn add_track_requires_title_and_artist() {
    let mut app = logged_in(vec![t(1, "One")]);
    app.open_add_track();
    let form = app.add_track_form().unwrap();
    "Mine".chars().for_each(|c| form.push(c));
    app.submit_add_track();
    assert_eq!(
        app.add_track_form().and_then(|f| f.error.clone()).as_deref(),
        Some("artist is required")
    );

    let form = app.add_track_form().unwrap();
    form.next_field();
    "Me".chars().for_each(|c| form.push(c));
    app.submit_add_track();

    assert!(matches!(app.overlay, Overlay::None));
    let last = app.library().filtered().last().unwrap();
    assert_eq!(last.title, "Mine");
    assert_eq!(last.description, "User uploaded");
    assert_eq!(app.library().catalog().len(), 1);
}

#[test]
fn seek_and_volume_use_configured_steps() {
    let mut app = logged_in(vec![t(1, "One")]);
    app.activate();
    app.tick();

    app.seek_forward();
    assert_eq!(app.player().position(), Duration::from_secs(5));
    app.seek_backward();
    app.seek_backward();
    assert_eq!(app.player().position(), Duration::ZERO);

    app.volume_up();
    assert_eq!(app.player().volume(), 1.0);
    app.volume_down();
    assert!((app.player().volume() - 0.9).abs() < 1e-6);
}

#[test]
fn failed_profile_save_shows_blocking_error_and_keeps_local_values() {
    let mut app = logged_in(vec![]);
    app.open_account();
    assert_eq!(app.profile().country, "Georgia");

    app.toggle_marketing();
    app.save_profile();

    let notice = app.notice.clone().unwrap();
    assert!(notice.is_error);
    assert_eq!(notice.message, SAVE_FAILED_MESSAGE);
    assert_eq!(app.store().get(keys::MARKETING), Some("true"));

    app.dismiss_notice();
    assert!(app.notice.is_none());
    app.close_account();
    assert_eq!(app.screen, Screen::Library);
}

#[test]
fn reset_avatar_clears_the_stored_key() {
    let mut store = KvStore::in_memory();
    store.set(keys::AVATAR, "me.png").unwrap();
    store.set_flag(keys::LOGGED_IN, true).unwrap();
    let mut app = app_with(store, vec![]);

    app.open_account();
    assert_eq!(app.profile().avatar.as_deref(), Some("me.png"));
    app.reset_avatar();
    assert_eq!(app.profile().avatar, None);
    assert!(!app.store().contains(keys::AVATAR));
}

#[test]
fn load_failure_is_carried_into_the_view() {
    let store = KvStore::in_memory();
    let library = LibraryState::restore(
        &store,
        Err(crate::library::CatalogError::Parse(
            serde_json::from_str::<Vec<Track>>("nope").unwrap_err(),
        )),
        5,
    );
    let player = PlaybackController::new(FakeMedia::default(), Carousel::default(), 1.0, None);
    let app = App::new(
        store,
        library,
        player,
        ProfileClient::new(dead_endpoint()),
        AppOptions::default(),
    );
    assert_eq!(
        app.library().load_error(),
        Some("Failed to load tracks. Try again later.")
    );
    assert!(app.carousel_window().is_empty());
}

#[test]
fn masked_password_hides_characters() {
    let mut form = CredentialForm::default();
    type_into(&mut form, "a", "secret");
    assert_eq!(form.masked_password(), "******");
    form.pop();
    assert_eq!(form.password, "secre");
}
