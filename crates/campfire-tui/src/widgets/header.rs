//! Header widget, one row with the title, the watched file and its stats.

use crate::theme::Theme;
use crate::view_sync::FileStatus;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use std::path::Path;

const SIZE_UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count with SI (base 1000) units: `"512 B"`, `"1.2 kB"`,
/// `"34 MB"`. One decimal is shown below ten units.
pub fn format_size(bytes: u64) -> String {
    if bytes < 10 {
        return format!("{bytes} B");
    }
    let mut unit = 0;
    let mut scale = 1.0_f64;
    while unit + 1 < SIZE_UNITS.len() && bytes as f64 >= scale * 1000.0 {
        scale *= 1000.0;
        unit += 1;
    }
    let value = ((bytes as f64 / scale) * 10.0 + 0.5).floor() / 10.0;
    if value < 10.0 {
        format!("{value:.1} {}", SIZE_UNITS[unit])
    } else {
        format!("{value:.0} {}", SIZE_UNITS[unit])
    }
}

pub struct Header<'a> {
    path: &'a Path,
    status: FileStatus,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(path: &'a Path, status: FileStatus, theme: &'a Theme) -> Self {
        Self {
            path,
            status,
            theme,
        }
    }

    fn stats(&self) -> String {
        match self.status {
            FileStatus::Unknown => "Looking for file...".to_string(),
            FileStatus::Absent => "File not found...".to_string(),
            FileStatus::Present(meta) => match meta.modified {
                Some(ts) => format!(
                    "Size: {}  Modified: {}",
                    format_size(meta.size),
                    ts.format("%Y-%m-%d %H:%M:%S")
                ),
                None => format!("Size: {}", format_size(meta.size)),
            },
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        let line = Line::from(vec![
            Span::styled(" 🔥 campfire ", self.theme.title),
            Span::styled(format!(" {name} "), self.theme.filename),
            Span::styled(format!(" {} ", self.stats()), self.theme.stats),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        // Keybinding hints at the right edge
        let hint = " ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        if hint_x > area.x + line.width() as u16 {
            buf.set_string(hint_x, area.y, hint, self.theme.hint);
        }
    }
}
