//! Translation of keys, clicks and remote commands into controller calls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::ControlsSettings;
use crate::mpris::ControlCmd;
use crate::player::{Direction, PlaybackEngine, PlayerController};
use crate::ui::{HitAreas, PlayerView};

/// Something the user (or a remote client) asked for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Intent {
    TogglePlayPause,
    Play,
    Pause,
    Next,
    Previous,
    SelectTrack(usize),
    /// Play the track under the playlist cursor.
    SelectCursor,
    CursorDown,
    CursorUp,
    SeekFraction(f64),
    SetVolume(f64),
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleAutoplay,
    Quit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn intent_for_key(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Intent::Quit),
            _ => None,
        };
    }

    let intent = match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Intent::TogglePlayPause,
        KeyCode::Char('h') | KeyCode::Left => Intent::Previous,
        KeyCode::Char('l') | KeyCode::Right => Intent::Next,
        KeyCode::Char('j') | KeyCode::Down => Intent::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Intent::CursorUp,
        KeyCode::Enter => Intent::SelectCursor,
        KeyCode::Char(c @ '0'..='9') => {
            let tenths = c.to_digit(10).unwrap_or(0);
            Intent::SeekFraction(f64::from(tenths) / 10.0)
        }
        KeyCode::Char('-') => Intent::VolumeDown,
        KeyCode::Char('+') | KeyCode::Char('=') => Intent::VolumeUp,
        KeyCode::Char('m') => Intent::ToggleMute,
        KeyCode::Char('a') => Intent::ToggleAutoplay,
        KeyCode::Char('q') | KeyCode::Esc => Intent::Quit,
        _ => return None,
    };
    Some(intent)
}

/// Left clicks on the bars and playlist rows; the wheel moves the cursor.
pub fn intent_for_mouse(event: MouseEvent, hits: &HitAreas, playlist_len: usize) -> Option<Intent> {
    let (column, row) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(f) = hits.progress_fraction(column, row) {
                Some(Intent::SeekFraction(f))
            } else if let Some(f) = hits.volume_fraction(column, row) {
                Some(Intent::SetVolume(f))
            } else {
                hits.playlist_row(column, row, playlist_len)
                    .map(Intent::SelectTrack)
            }
        }
        MouseEventKind::ScrollDown => Some(Intent::CursorDown),
        MouseEventKind::ScrollUp => Some(Intent::CursorUp),
        _ => None,
    }
}

pub fn intent_for_control(cmd: ControlCmd) -> Intent {
    match cmd {
        ControlCmd::Quit => Intent::Quit,
        ControlCmd::Play => Intent::Play,
        ControlCmd::Pause | ControlCmd::Stop => Intent::Pause,
        ControlCmd::PlayPause => Intent::TogglePlayPause,
        ControlCmd::Next => Intent::Next,
        ControlCmd::Prev => Intent::Previous,
        ControlCmd::SetVolume(v) => Intent::SetVolume(v),
    }
}

pub fn dispatch<E: PlaybackEngine>(
    controller: &mut PlayerController<E, PlayerView>,
    intent: Intent,
    controls: &ControlsSettings,
) -> Flow {
    match intent {
        Intent::TogglePlayPause => controller.toggle_play_pause(),
        Intent::Play => {
            if !controller.state().is_playing {
                controller.toggle_play_pause();
            }
        }
        Intent::Pause => {
            if controller.state().is_playing {
                controller.toggle_play_pause();
            }
        }
        Intent::Next => controller.advance(Direction::Next),
        Intent::Previous => controller.advance(Direction::Previous),
        Intent::SelectTrack(i) => controller.select_track(i),
        Intent::SelectCursor => {
            let i = controller.display().cursor();
            controller.select_track(i);
        }
        Intent::CursorDown => {
            let len = controller.playlist().len();
            controller.display_mut().cursor_next(len);
        }
        Intent::CursorUp => {
            let len = controller.playlist().len();
            controller.display_mut().cursor_prev(len);
        }
        Intent::SeekFraction(f) => controller.seek(f),
        Intent::SetVolume(v) => controller.set_volume(v),
        Intent::VolumeUp => {
            let v = controller.state().volume + controls.volume_step;
            controller.set_volume(v);
        }
        Intent::VolumeDown => {
            let v = controller.state().volume - controls.volume_step;
            controller.set_volume(v);
        }
        Intent::ToggleMute => controller.toggle_mute(),
        Intent::ToggleAutoplay => controller.toggle_autoplay(),
        Intent::Quit => return Flow::Quit,
    }
    Flow::Continue
}
