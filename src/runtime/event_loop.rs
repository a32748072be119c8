use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::EngineEvents;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{EngineEvent, PlaybackEngine, PlayerController};
use crate::runtime::intent::{
    Flow, dispatch, intent_for_control, intent_for_key, intent_for_mouse,
};
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::ui::{self, HitAreas, PlayerView};

/// Main terminal event loop: applies engine notifications, remote commands
/// and terminal input to the controller, and redraws. Returns `Ok(())` when
/// shutdown is requested.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut PlayerController<E, PlayerView>,
    engine_events: &EngineEvents,
    mpris: &MprisHandle,
    control_rx: &Receiver<ControlCmd>,
) -> anyhow::Result<()> {
    let mut hits = HitAreas::default();
    let mut last_mpris: Option<MprisSnapshot> = None;

    loop {
        // Engine notifications first so input acts on current state.
        while let Some(ev) = engine_events.try_recv() {
            if ev != EngineEvent::TimeUpdate {
                tracing::debug!(?ev, "engine event");
            }
            controller.handle_event(ev);
        }

        while let Ok(cmd) = control_rx.try_recv() {
            tracing::debug!(?cmd, "remote command");
            if dispatch(controller, intent_for_control(cmd), &settings.controls) == Flow::Quit {
                return Ok(());
            }
        }

        // Keep MPRIS in sync even when playback changes come from media keys or auto-advance.
        update_mpris(mpris, controller, &mut last_mpris);

        terminal.draw(|f| {
            hits = ui::draw(
                f,
                controller.display(),
                controller.playlist(),
                &settings.ui,
                &settings.controls,
            );
        })?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let intent = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => intent_for_key(key),
            Event::Mouse(mouse) => intent_for_mouse(mouse, &hits, controller.playlist().len()),
            _ => None,
        };
        if let Some(intent) = intent {
            tracing::debug!(?intent, "input");
            if dispatch(controller, intent, &settings.controls) == Flow::Quit {
                return Ok(());
            }
        }
    }
}
