use std::env;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::{App, AppOptions};
use crate::audio::AudioPlayer;
use crate::carousel::Carousel;
use crate::config;
use crate::library::{CatalogSource, LibraryState, load_catalog};
use crate::mpris::ControlCmd;
use crate::player::PlaybackController;
use crate::profile::ProfileClient;
use crate::store::KvStore;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;

pub fn run() -> anyhow::Result<()> {
    let data_dir = config::data_dir();
    match logging::init(data_dir.as_deref()) {
        Ok(Some(path)) => eprintln!("playdeck log: {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("playdeck: logging disabled: {e}"),
    }
    info!("playdeck starting");

    let settings = settings::load_settings();

    let store = match settings.storage_path() {
        Some(path) => KvStore::open_or_reset(&path)
            .with_context(|| format!("opening store at {}", path.display()))?,
        None => {
            warn!("no data directory; nothing will be persisted");
            KvStore::in_memory()
        }
    };
    if let Some(path) = store.path() {
        info!(path = %path.display(), "using store");
    }

    let source = CatalogSource::parse(
        &env::args()
            .nth(1)
            .unwrap_or_else(|| settings.catalog.source.clone()),
    );
    let media_root = settings
        .catalog
        .media_root
        .clone()
        .or_else(|| source.base_dir().map(|d| d.to_path_buf()));
    let library = LibraryState::restore(&store, load_catalog(&source), settings.player.recents_limit);

    let carousel = Carousel::new(
        settings.player.carousel_window,
        Duration::from_millis(settings.player.transition_lock_ms),
    );
    let player = PlaybackController::new(
        AudioPlayer::new(),
        carousel,
        settings.player.default_volume,
        media_root.clone(),
    );

    let mut app = App::new(
        store,
        library,
        player,
        ProfileClient::new(settings.profile.endpoint.clone()),
        AppOptions::from_settings(&settings, media_root),
    );

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new(&app);
        event_loop::run(&mut terminal, &mut app, &mpris, &control_rx, &mut state)
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.player()
        .media()
        .quit_softly(Duration::from_millis(settings.player.quit_fade_out_ms));
    info!("playdeck exiting");

    run_result
}
