use ratatui::layout::Rect;

/// Screen regions that react to mouse clicks, as laid out by the last draw.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct HitAreas {
    /// Inner area of the progress gauge.
    pub progress: Rect,
    /// Inner area of the volume gauge.
    pub volume: Rect,
    /// Inner area of the playlist (one row per track).
    pub playlist: Rect,
    /// Playlist index shown on the first visible row.
    pub playlist_offset: usize,
}

impl HitAreas {
    /// Horizontal click position within the progress bar, in `[0, 1]`.
    pub fn progress_fraction(&self, column: u16, row: u16) -> Option<f64> {
        fraction_in(self.progress, column, row)
    }

    /// Horizontal click position within the volume bar, in `[0, 1]`.
    pub fn volume_fraction(&self, column: u16, row: u16) -> Option<f64> {
        fraction_in(self.volume, column, row)
    }

    /// Playlist index under the click, if it lands on a track row.
    pub fn playlist_row(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        if !contains(self.playlist, column, row) {
            return None;
        }
        let index = self.playlist_offset + usize::from(row - self.playlist.y);
        (index < len).then_some(index)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn fraction_in(rect: Rect, column: u16, row: u16) -> Option<f64> {
    if !contains(rect, column, row) {
        return None;
    }
    // The leftmost cell is 0 and the rightmost is 1.
    let span = rect.width.saturating_sub(1);
    if span == 0 {
        return Some(0.0);
    }
    Some(f64::from(column - rect.x) / f64::from(span))
}
