//! Terminal presentation.
//!
//! [`PlayerView`] is the display surface the controller writes into (plus
//! the playlist cursor). [`draw`] renders it with `ratatui` and returns the
//! [`HitAreas`] that turn mouse clicks back into seek, volume and row picks.

mod hit;
mod view;

pub use hit::HitAreas;
pub use view::PlayerView;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::config::{ControlsSettings, UiSettings};
use crate::library::{Playlist, row_text};
use crate::player::VolumeIcon;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "play selected song".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    map.insert("0-9".to_string(), "seek to 0%-90%".to_string());
    // -/+ is filled dynamically from config.
    map.insert("m".to_string(), "mute".to_string());
    map.insert("a".to_string(), "autoplay".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the volume step.
fn controls_text(volume_step: f64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "enter", "space/p", "0-9", "-/+", "m", "a", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "-/+" {
                Some(format!(
                    "[-/+] volume -/+{}%",
                    (volume_step * 100.0).round() as i64
                ))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn icon_label(icon: VolumeIcon) -> &'static str {
    match icon {
        VolumeIcon::Mute => "MUTE",
        VolumeIcon::Low => "LOW",
        VolumeIcon::High => "HIGH",
    }
}

/// Gauges panic outside `[0, 1]`.
fn gauge_ratio(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Window `[start, end)` of `total` rows that fits `height` rows and keeps
/// `selected` centered when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn now_playing_text(view: &PlayerView) -> Vec<Line<'static>> {
    let song = if view.title.is_empty() {
        "Nothing loaded".to_string()
    } else if view.artist.trim().is_empty() {
        view.title.clone()
    } else {
        format!("{} - {}", view.title, view.artist)
    };

    let state = if view.playing { "Playing" } else { "Paused" };
    let autoplay = if view.autoplay {
        "Autoplay: ON"
    } else {
        "Autoplay: OFF"
    };

    vec![
        Line::from(song).bold(),
        Line::from([state, autoplay].join(" • ")),
    ]
}

/// Render the entire UI into `frame` and report where the clickable regions
/// ended up.
pub fn draw(
    frame: &mut Frame,
    view: &PlayerView,
    playlist: &Playlist,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> HitAreas {
    let mut hits = HitAreas::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tonearm ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let now_playing = Paragraph::new(now_playing_text(view)).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" now playing "),
    );
    frame.render_widget(now_playing, chunks[1]);

    // Progress and volume
    let bars = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(chunks[2]);

    let progress_block = Block::bordered().title(" progress ");
    hits.progress = progress_block.inner(bars[0]);
    let progress = Gauge::default()
        .block(progress_block)
        .gauge_style(Style::default().add_modifier(Modifier::REVERSED))
        .ratio(gauge_ratio(view.progress))
        .label(format!("{} / {}", view.elapsed, view.duration));
    frame.render_widget(progress, bars[0]);

    let volume_block = Block::bordered().title(" volume ");
    hits.volume = volume_block.inner(bars[1]);
    let volume = Gauge::default()
        .block(volume_block)
        .gauge_style(Style::default().add_modifier(Modifier::REVERSED))
        .ratio(gauge_ratio(view.volume))
        .label(format!(
            "{} {}%",
            icon_label(view.volume_icon),
            (gauge_ratio(view.volume) * 100.0).round() as i64
        ));
    frame.render_widget(volume, bars[1]);

    // Playlist
    {
        let block = Block::default().borders(Borders::ALL).title(" tracks ");
        let inner = block.inner(chunks[3]);
        hits.playlist = inner;

        if playlist.is_empty() {
            let empty = Paragraph::new("No tracks found")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, chunks[3]);
        } else {
            // Center the cursor when possible by creating a visible window.
            // Important: only build ListItems for the visible window (avoid allocating the entire list).
            let total = playlist.len();
            let cursor = view.cursor().min(total - 1);
            let (start, end) = visible_window(total, inner.height as usize, cursor);
            hits.playlist_offset = start;

            let visible_items: Vec<ListItem> = playlist.tracks()[start..end]
                .iter()
                .enumerate()
                .map(|(offset, track)| {
                    let index = start + offset;
                    let text = row_text(track, &ui_settings.row_fields, &ui_settings.row_separator);
                    if view.active == Some(index) {
                        let marker = if view.playing { "▶ " } else { "⏸ " };
                        ListItem::new(format!("{marker}{text}")).bold()
                    } else {
                        ListItem::new(format!("  {text}"))
                    }
                })
                .collect();

            let list = List::new(visible_items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = ListState::default();
            state.select(Some(cursor - start));
            frame.render_stateful_widget(list, chunks[3], &mut state);
        }
    }

    let footer_text = controls_text(controls_settings.volume_step);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);

    hits
}
