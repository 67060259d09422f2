use crate::app::App;
use crate::mpris::MprisHandle;
use crate::player::{MediaElement, PlaybackState};

/// What MPRIS was last told, to skip redundant updates.
#[derive(Debug, Default, PartialEq)]
pub struct MprisSnapshot {
    track: Option<u64>,
    playback: PlaybackState,
    has_length: bool,
}

impl MprisSnapshot {
    pub fn of<M: MediaElement>(app: &App<M>) -> Self {
        let player = app.player();
        Self {
            track: player.active().map(|t| t.id),
            playback: player.state(),
            has_length: !player.duration().is_zero(),
        }
    }
}

pub fn update_mpris<M: MediaElement>(mpris: &MprisHandle, app: &App<M>) {
    let player = app.player();
    let length = Some(player.duration()).filter(|d| !d.is_zero());
    mpris.set_track_metadata(player.active(), app.media_root(), length);
    mpris.set_playback(player.state());
}
