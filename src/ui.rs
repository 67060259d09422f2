//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`: the two
//! credential screens, the library/player view with its overlays, and the
//! account screen.

use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};

use crate::app::{AddTrackField, App, CredentialField, CredentialForm, Focus, Overlay, Screen};
use crate::library::{Tab, Track};
use crate::player::{MediaElement, PlaybackState, format_time};

const LIBRARY_CONTROLS: [(&str, &str); 12] = [
    ("h/l", "prev/next card"),
    ("[/]", "scroll carousel"),
    ("enter", "play"),
    ("space", "play/pause"),
    ("H/L", "seek"),
    ("-/+", "volume"),
    ("1-5", "tabs"),
    ("f", "favorite"),
    ("/", "search"),
    ("a", "add track"),
    ("i", "info"),
    ("tab", "focus"),
];

const ACCOUNT_CONTROLS: [(&str, &str); 4] = [
    ("m", "toggle marketing"),
    ("r", "reset avatar"),
    ("s", "save"),
    ("esc", "back"),
];

fn controls_text(pairs: &[(&str, &str)], tail: &str) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .chain(std::iter::once(tail.to_string()))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the current screen of `app` into `frame`.
pub fn draw<M: MediaElement>(frame: &mut Frame, app: &App<M>, now: Instant) {
    match app.screen {
        Screen::SignUp => draw_credentials(frame, app, &app.sign_up, " sign up ", "[enter] create account | [ctrl-l] go to login | [esc] quit"),
        Screen::Login => draw_credentials(frame, app, &app.login, " log in ", "[enter] log in | [ctrl-s] go to sign up | [esc] quit"),
        Screen::Library => draw_library(frame, app, now),
        Screen::Account => draw_account(frame, app),
    }

    if let Some(notice) = &app.notice {
        let area = centered_rect_sized(50, 5, frame.area());
        frame.render_widget(Clear, area);
        let style = if notice.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        let body = Paragraph::new(notice.message.as_str())
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" notice (enter to dismiss) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(body, area);
    }
}

fn draw_header<M: MediaElement>(frame: &mut Frame, app: &App<M>, area: Rect) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(" playdeck ")
        .title_alignment(Alignment::Center);
    if let Some(badge) = app.badge().filter(|_| app.screen == Screen::Library || app.screen == Screen::Account) {
        let (r, g, b) = badge.rgb();
        block = block.title(
            Line::from(Span::styled(
                format!(" {} ", badge.initial),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Rgb(r, g, b))
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    }
    let header = Paragraph::new(app.options().header_text.as_str())
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(header, area);
}

fn draw_credentials<M: MediaElement>(
    frame: &mut Frame,
    app: &App<M>,
    form: &CredentialForm,
    title: &str,
    hints: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    draw_header(frame, app, chunks[0]);

    let field_line = |label: &str, value: String, focused: bool| {
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{label:<9}"), style),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        field_line("Email", form.email.clone(), form.field == CredentialField::Email),
        field_line(
            "Password",
            form.masked_password(),
            form.field == CredentialField::Password,
        ),
        Line::default(),
    ];
    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))));
    } else if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Green))));
    }

    let area = centered_rect_sized(56, 9, chunks[1]);
    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(left_pad()),
    );
    frame.render_widget(body, area);

    let footer = Paragraph::new(format!("[tab] switch field | {hints}"))
        .block(Block::default().borders(Borders::ALL).title(" controls ").padding(left_pad()))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}

fn draw_library<M: MediaElement>(frame: &mut Frame, app: &App<M>, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_tab_bar(frame, app, chunks[1]);

    let columns = if app.show_track_info {
        vec![
            Constraint::Percentage(25),
            Constraint::Percentage(45),
            Constraint::Percentage(30),
        ]
    } else {
        vec![Constraint::Percentage(25), Constraint::Percentage(75)]
    };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(chunks[2]);

    draw_sidebar(frame, app, body[0]);
    draw_carousel(frame, app, body[1], now);
    if app.show_track_info {
        draw_track_info(frame, app, body[2]);
    }

    draw_now_playing(frame, app, chunks[3]);

    let footer = Paragraph::new(controls_text(&LIBRARY_CONTROLS, "[p] account | [o] logout | [q] quit"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    match &app.overlay {
        Overlay::None => {}
        Overlay::Search => draw_search(frame, app, chunks[2]),
        Overlay::AddTrack(form) => {
            let area = centered_rect_sized(60, 10, chunks[2]);
            frame.render_widget(Clear, area);
            let mut lines: Vec<Line> = AddTrackField::ALL
                .iter()
                .map(|&field| {
                    let focused = form.field == field;
                    let marker = if focused { "> " } else { "  " };
                    let required = matches!(field, AddTrackField::Title | AddTrackField::Artist);
                    let label = format!("{}{}", field.label(), if required { "*" } else { "" });
                    Line::from(vec![
                        Span::raw(marker),
                        Span::styled(format!("{label:<12}"), Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(form.value(field).to_string()),
                    ])
                })
                .collect();
            lines.push(Line::default());
            if let Some(err) = &form.error {
                lines.push(Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))));
            }
            let modal = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" add track ([tab] next field, [enter] add, [esc] cancel) ")
                    .padding(left_pad()),
            );
            frame.render_widget(modal, area);
        }
    }
}

fn draw_tab_bar<M: MediaElement>(frame: &mut Frame, app: &App<M>, area: Rect) {
    let active = app.library().tab();
    let titles: Vec<Line> = Tab::BAR
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.label())))
        .collect();
    let selected = Tab::BAR.iter().position(|t| t.highlights(active));

    let mut title = String::from(" tabs ");
    if let Tab::Playlist(id) = active {
        if let Some(p) = app.library().playlist(id) {
            title = format!(" tabs • playlist: {} ", p.name);
        }
    }
    if !app.library().query().is_empty() {
        title = format!("{title}• search: {} ", app.library().query());
    }

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(tabs, area);
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}

fn draw_sidebar<M: MediaElement>(frame: &mut Frame, app: &App<M>, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let recents: Vec<ListItem> = app
        .library()
        .recents()
        .iter()
        .map(|t| ListItem::new(t.display()))
        .collect();
    let mut recents_state = ListState::default();
    if app.focus == Focus::Recents && !recents.is_empty() {
        recents_state.select(Some(app.recents_cursor()));
    }
    let recents = List::new(recents)
        .block(pane_block(" recently played ", app.focus == Focus::Recents))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(recents, parts[0], &mut recents_state);

    let open = match app.library().tab() {
        Tab::Playlist(id) => Some(id),
        _ => None,
    };
    let playlists: Vec<ListItem> = app
        .library()
        .playlists()
        .iter()
        .map(|p| {
            let item = ListItem::new(format!("{} ({})", p.name, p.tracks.len()));
            if open == Some(p.id) {
                item.bold()
            } else {
                item
            }
        })
        .collect();
    let mut playlists_state = ListState::default();
    if app.focus == Focus::Playlists && !playlists.is_empty() {
        playlists_state.select(Some(app.playlists_cursor()));
    }
    let playlists = List::new(playlists)
        .block(pane_block(" playlists ", app.focus == Focus::Playlists))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(playlists, parts[1], &mut playlists_state);
}

fn draw_carousel<M: MediaElement>(frame: &mut Frame, app: &App<M>, area: Rect, now: Instant) {
    let library = app.library();
    let focused = app.focus == Focus::Carousel;

    if let Some(message) = library.load_error() {
        let msg = Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(pane_block(" tracks ", focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(msg, area);
        return;
    }

    let carousel = app.player().carousel();
    let total = library.filtered().len();
    let title = if total == 0 {
        " tracks ".to_string()
    } else {
        let start = carousel.index().min(total - 1);
        let shown = app.carousel_window().len();
        format!(" tracks {}-{} of {} ", start + 1, start + shown, total)
    };

    let window = app.carousel_window();
    if window.is_empty() {
        let empty = match library.tab() {
            Tab::Playlists => "Pick a playlist from the sidebar.",
            Tab::Favorites => "No favorites yet. Press [f] on a track.",
            _ => "No tracks.",
        };
        let msg = Paragraph::new(empty)
            .alignment(Alignment::Center)
            .block(pane_block(&title, focused));
        frame.render_widget(msg, area);
        return;
    }

    let active_id = app.player().active().map(|t| t.id);
    let items: Vec<ListItem> = window
        .iter()
        .map(|t| {
            let heart = if library.is_favorite(t.id) { "♥ " } else { "  " };
            let playing = if active_id == Some(t.id) { "♪ " } else { "  " };
            ListItem::new(vec![
                Line::from(format!("{heart}{playing}{}", t.title)).bold(),
                Line::from(format!("      {}", t.artist)).dim(),
            ])
        })
        .collect();

    let mut list = List::new(items)
        .block(pane_block(&title, focused))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    if carousel.is_transitioning(now) {
        list = list.style(Style::default().add_modifier(Modifier::DIM));
    }
    let mut state = ListState::default();
    if focused {
        state.select(Some(app.cursor()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn track_details(track: &Track) -> String {
    let or_dash = |s: &str| if s.trim().is_empty() { "-".to_string() } else { s.to_string() };
    format!(
        "Title: {}\nArtist: {}\nKind: {:?}\nCover: {}\nAudio: {}\n\n{}",
        track.title,
        or_dash(&track.artist),
        track.kind,
        or_dash(&track.cover),
        or_dash(&track.audio),
        track.description,
    )
}

fn draw_track_info<M: MediaElement>(frame: &mut Frame, app: &App<M>, area: Rect) {
    let text = app
        .highlighted()
        .or(app.player().active())
        .map(track_details)
        .unwrap_or_else(|| "No track selected".to_string());
    let info = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" track info (i hides) ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(info, area);
}

fn progress_ratio(position: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

fn draw_now_playing<M: MediaElement>(frame: &mut Frame, app: &App<M>, area: Rect) {
    let player = app.player();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" now playing ")
        .padding(left_pad());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let state = match player.state() {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    };
    let song = player
        .active()
        .map(Track::display)
        .unwrap_or_else(|| "Nothing selected".to_string());
    let volume = (player.volume() * 100.0).round() as u32;
    let mut parts = vec![format!("Song: {song}"), state.to_string(), format!("Vol: {volume}%")];
    if let Some(status) = &app.status {
        parts.push(status.clone());
    }
    frame.render_widget(Paragraph::new(parts.join(" • ")), rows[0]);

    let label = format!(
        "{} / {}",
        format_time(player.position()),
        format_time(player.duration())
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress_ratio(player.position(), player.duration()))
        .label(label);
    frame.render_widget(gauge, rows[1]);
}

fn draw_search<M: MediaElement>(frame: &mut Frame, app: &App<M>, within: Rect) {
    let area = Rect {
        x: within.x + 2,
        y: within.y,
        width: within.width.saturating_sub(4).min(60),
        height: 3.min(within.height),
    };
    frame.render_widget(Clear, area);
    let input = Paragraph::new(format!("{}_", app.search_input())).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" search titles ([enter] done, [esc] clear) ")
            .padding(left_pad()),
    );
    frame.render_widget(input, area);
}

fn draw_account<M: MediaElement>(frame: &mut Frame, app: &App<M>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    draw_header(frame, app, chunks[0]);

    let p = app.profile();
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<15}"), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(value),
        ])
    };
    let mut lines = vec![
        row("Email", p.email.clone()),
        row("Gender", p.gender.clone()),
        row(
            "Date of birth",
            format!("{} {} {}", p.dob.day, p.dob.month, p.dob.year),
        ),
        row("Country", p.country.clone()),
        row("Marketing", if p.marketing { "yes" } else { "no" }.to_string()),
        row("Avatar", p.avatar.clone().unwrap_or_else(|| "(none)".to_string())),
    ];
    if let Some(status) = &app.status {
        lines.push(Line::default());
        lines.push(Line::from(status.as_str()).dim());
    }

    let area = centered_rect_sized(64, 12, chunks[1]);
    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" account ")
            .padding(left_pad()),
    );
    frame.render_widget(body, area);

    let footer = Paragraph::new(controls_text(&ACCOUNT_CONTROLS, "[o] logout"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}
