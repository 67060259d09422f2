//! MPRIS service on the session bus.
//!
//! Media keys and tools like `playerctl` reach the player through here.
//! Method calls become [`ControlCmd`]s on a channel; the UI thread pushes
//! playback state and now-playing metadata into the shared state that the
//! properties read from.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use tracing::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::library::{Track, resolve_media};
use crate::player::PlaybackState;

const BUS_NAME: &str = "org.mpris.MediaPlayer2.playdeck";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    track_id: Option<OwnedObjectPath>,
    title: Option<String>,
    artist: Vec<String>,
    art_url: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Publish `track` as now playing, or clear the metadata with `None`.
    pub fn set_track_metadata(
        &self,
        track: Option<&Track>,
        media_root: Option<&Path>,
        length: Option<Duration>,
    ) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        let Some(track) = track else {
            let playback = s.playback;
            *s = SharedState {
                playback,
                ..SharedState::default()
            };
            return;
        };

        s.track_id = ObjectPath::try_from(format!("{OBJECT_PATH}/track/{}", track.id))
            .ok()
            .map(OwnedObjectPath::from);
        s.title = Some(track.title.clone());
        s.artist = vec![track.artist.clone()];
        s.art_url = media_url(&track.cover, media_root);
        s.url = media_url(&track.audio, media_root);
        s.length_micros = length.map(|d| d.as_micros() as i64);
    }
}

/// URLs pass through; anything else becomes a `file://` URL.
fn media_url(reference: &str, media_root: Option<&Path>) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Some(reference.to_string());
    }
    let path = resolve_media(reference, media_root);
    Some(format!("file://{}", path.display()))
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "playdeck"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string(), "http".to_string(), "https".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    /// Steps the carousel, not the audio.
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let mut put = |key: &str, value: Option<OwnedValue>| {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        };

        put(
            "mpris:trackid",
            s.track_id
                .clone()
                .and_then(|p| owned(Value::from(p.into_inner()))),
        );
        put(
            "xesam:title",
            owned(Value::from(s.title.clone().unwrap_or_default())),
        );
        if !s.artist.is_empty() {
            put("xesam:artist", owned(Value::from(s.artist.clone())));
        }
        put("mpris:artUrl", s.art_url.clone().and_then(|u| owned(Value::from(u))));
        put("xesam:url", s.url.clone().and_then(|u| owned(Value::from(u))));
        put("mpris:length", s.length_micros.and_then(|l| owned(Value::from(l))));
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                warn!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                warn!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!("MPRIS: failed to register player iface: {e}");
                return;
            }
            info!(name = BUS_NAME, "MPRIS service registered");

            // Keep the service alive.
            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
