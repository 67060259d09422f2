use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, CredentialForm, Overlay, Screen};
use crate::library::Tab;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::MediaElement;
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::ui;

const POLL: Duration = Duration::from_millis(50);

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// What was last published over MPRIS.
    last_mpris: MprisSnapshot,
}

impl EventLoopState {
    pub fn new<M: MediaElement>(app: &App<M>) -> Self {
        Self {
            last_mpris: MprisSnapshot::of(app),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run<M: MediaElement>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App<M>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    loop {
        app.tick();

        // Keep MPRIS in sync even when playback changes come from media keys or track end.
        let snapshot = MprisSnapshot::of(app);
        if snapshot != state.last_mpris {
            update_mpris(mpris, app);
            state.last_mpris = snapshot;
        }

        terminal.draw(|f| ui::draw(f, app, Instant::now()))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, Instant::now()) {
                return Ok(());
            }
        }

        if event::poll(POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, Instant::now()) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply a command from MPRIS. Returns `true` when the app should exit.
fn handle_control_cmd<M: MediaElement>(cmd: ControlCmd, app: &mut App<M>, now: Instant) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => app.play(),
        ControlCmd::Pause | ControlCmd::Stop => app.pause(),
        ControlCmd::PlayPause => app.toggle_play_pause(),
        ControlCmd::Next => {
            app.carousel_next(now);
        }
        ControlCmd::Prev => {
            app.carousel_previous(now);
        }
    }
    false
}

/// Route a key press to the current screen. Returns `true` on quit.
fn handle_key_event<M: MediaElement>(key: KeyEvent, app: &mut App<M>, now: Instant) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_notice();
        }
        return false;
    }

    match app.screen {
        Screen::SignUp | Screen::Login => handle_credentials_key(key, app, ctrl),
        Screen::Library => match app.overlay {
            Overlay::Search => {
                handle_search_key(key, app);
                false
            }
            Overlay::AddTrack(_) => {
                handle_add_track_key(key, app);
                false
            }
            Overlay::None => handle_library_key(key, app, now),
        },
        Screen::Account => handle_account_key(key, app),
    }
}

fn handle_credentials_key<M: MediaElement>(key: KeyEvent, app: &mut App<M>, ctrl: bool) -> bool {
    let on_sign_up = app.screen == Screen::SignUp;

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('l') if ctrl && on_sign_up => app.show_login(),
        KeyCode::Char('s') if ctrl && !on_sign_up => app.show_sign_up(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            credential_form(app).switch_field()
        }
        KeyCode::Backspace => credential_form(app).pop(),
        KeyCode::Enter => {
            if on_sign_up {
                app.submit_sign_up();
            } else {
                app.submit_login();
            }
        }
        KeyCode::Char(c) if !ctrl && !c.is_control() => credential_form(app).push(c),
        _ => {}
    }
    false
}

fn credential_form<M>(app: &mut App<M>) -> &mut CredentialForm {
    if app.screen == Screen::SignUp {
        &mut app.sign_up
    } else {
        &mut app.login
    }
}

fn handle_search_key<M: MediaElement>(key: KeyEvent, app: &mut App<M>) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.close_search(),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(c) if !c.is_control() => app.search_push(c),
        _ => {}
    }
}

fn handle_add_track_key<M: MediaElement>(key: KeyEvent, app: &mut App<M>) {
    match key.code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Enter => app.submit_add_track(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.add_track_form() {
                form.next_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.add_track_form() {
                form.pop();
            }
        }
        KeyCode::Char(c) if !c.is_control() => {
            if let Some(form) = app.add_track_form() {
                form.push(c);
            }
        }
        _ => {}
    }
}

fn handle_library_key<M: MediaElement>(key: KeyEvent, app: &mut App<M>, now: Instant) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('a') => app.open_add_track(),
        KeyCode::Char('f') => app.toggle_favorite_highlighted(),
        KeyCode::Char('i') => app.toggle_track_info(),
        KeyCode::Char(' ') => app.toggle_play_pause(),
        KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
            app.move_cursor(false)
        }
        KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
            app.move_cursor(true)
        }
        KeyCode::Char('[') => {
            app.carousel_previous(now);
        }
        KeyCode::Char(']') => {
            app.carousel_next(now);
        }
        KeyCode::Char('H') => app.seek_backward(),
        KeyCode::Char('L') => app.seek_forward(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.volume_up(),
        KeyCode::Char('-') => app.volume_down(),
        KeyCode::Char(c @ '1'..='5') => {
            let i = c as usize - '1' as usize;
            app.select_tab(Tab::BAR[i]);
        }
        KeyCode::Char('t') => app.cycle_tab(true),
        KeyCode::Char('T') => app.cycle_tab(false),
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Enter => app.activate(),
        KeyCode::Char('p') => app.open_account(),
        KeyCode::Char('o') => app.logout(),
        _ => {}
    }
    false
}

fn handle_account_key<M: MediaElement>(key: KeyEvent, app: &mut App<M>) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => app.close_account(),
        KeyCode::Char('m') => app.toggle_marketing(),
        KeyCode::Char('r') => app.reset_avatar(),
        KeyCode::Char('s') => app.save_profile(),
        KeyCode::Char('o') => app.logout(),
        _ => {}
    }
    false
}
