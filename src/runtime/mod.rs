use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioEngine;
use crate::library::{descriptors_from_path, load_playlist};
use crate::mpris::ControlCmd;
use crate::player::PlayerController;
use crate::ui::PlayerView;

mod event_loop;
mod intent;
mod mpris_sync;
mod settings;
mod startup;


pub fn run() -> anyhow::Result<()> {
    let (settings, config_problem) = settings::load_settings();
    startup::init_logging(&settings.logging)?;
    if let Some(problem) = config_problem {
        tracing::warn!("{problem}");
    }

    let source = match env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => env::current_dir().context("no path given and no current directory")?,
    };

    let descriptors = descriptors_from_path(&source, &settings.library)?;
    let playlist = load_playlist(descriptors);
    tracing::info!(source = %source.display(), tracks = playlist.len(), "playlist loaded");

    let (engine, engine_events) = RodioEngine::spawn(settings.audio.clone())?;
    let mut controller = PlayerController::new(playlist, engine, PlayerView::default());
    startup::apply_playback_defaults(&mut controller, &settings);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut controller,
        &engine_events,
        &mpris,
        &control_rx,
    );

    let restored = restore_terminal(&mut terminal);
    let engine = controller.into_engine();
    finish(run_result, restored, || {
        engine.shutdown(settings.audio.quit_fade_out_ms);
    })
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
) -> anyhow::Result<()> {
    // Attempt every step even if an earlier one fails.
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw.context("failed to leave raw mode")?;
    screen.context("failed to leave the alternate screen")?;
    cursor.context("failed to show the cursor")?;
    Ok(())
}

/// Stop audio no matter how the session ended, then report the first error:
/// the event loop's, else the terminal restore's.
fn finish(
    run_result: anyhow::Result<()>,
    restored: anyhow::Result<()>,
    shutdown: impl FnOnce(),
) -> anyhow::Result<()> {
    shutdown();
    tracing::info!("bye");
    run_result.and(restored)
}
