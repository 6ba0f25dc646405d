use chrono::{DateTime, Local, Utc};
use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub primary: (u8, u8, u8),   // IDs, muted text
    pub secondary: (u8, u8, u8), // Headers, titles
    pub timestamp: (u8, u8, u8), // Timestamps
    pub archived: (u8, u8, u8),  // Archived badge
    pub warning: (u8, u8, u8),   // Non-fatal problems
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        primary: (108, 112, 134),   // Gray
        secondary: (148, 226, 213), // Teal
        timestamp: (137, 180, 250), // Blue
        archived: (203, 166, 247),  // Mauve
        warning: (249, 226, 175),   // Yellow
    };
}

/// Formatting context passed through rendering pipeline
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    fn paint(&self, text: &str, (r, g, b): (u8, u8, u8), bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let painted = Paint::rgb(text, r, g, b);
        if bold { painted.bold().to_string() } else { painted.to_string() }
    }

    pub fn format_id(&self, id: &str) -> String {
        self.paint(id, self.palette.primary, false)
    }

    pub fn format_header(&self, text: &str) -> String {
        self.paint(text, self.palette.secondary, true)
    }

    pub fn format_timestamp(&self, ts: &str) -> String {
        self.paint(ts, self.palette.timestamp, false)
    }

    pub fn format_status(&self, is_active: bool) -> String {
        if is_active {
            self.paint("active", self.palette.secondary, false)
        } else {
            self.paint("archived", self.palette.archived, true)
        }
    }

    pub fn format_warning(&self, text: &str) -> String {
        self.paint(text, self.palette.warning, false)
    }
}

/// Timestamp formatting with relative/absolute modes
pub struct TimeFormatter {
    relative_mode: bool,
    now: DateTime<Utc>,
}

impl TimeFormatter {
    pub fn new(relative_mode: bool, now: DateTime<Utc>) -> Self {
        Self { relative_mode, now }
    }

    pub fn format(&self, ts: &DateTime<Utc>) -> String {
        if self.relative_mode {
            self.format_relative(ts)
        } else {
            ts.with_timezone(&Local).format("%d%b%y %H:%M").to_string()
        }
    }

    pub fn format_relative(&self, dt: &DateTime<Utc>) -> String {
        let dur = self.now.signed_duration_since(*dt);
        let total_minutes = dur.num_minutes().max(0);
        let total_hours = dur.num_hours().max(0);
        let total_days = dur.num_days().max(0);

        if total_hours == 0 {
            if total_minutes == 0 {
                return "just now".to_string();
            }
            return format!("{}m ago", total_minutes);
        }
        if total_days < 30 {
            if total_days == 0 {
                return format!("{}h ago", total_hours);
            }
            let hours = (total_hours - total_days * 24).max(0);
            if hours > 0 {
                format!("{}d {}h ago", total_days, hours)
            } else {
                format!("{}d ago", total_days)
            }
        } else if total_days < 365 {
            let months = total_days / 30;
            let days = total_days % 30;
            if days > 0 {
                format!("{}mo {}d ago", months, days)
            } else {
                format!("{}mo ago", months)
            }
        } else {
            let years = total_days / 365;
            let months = (total_days % 365) / 30;
            if months > 0 {
                format!("{}y {}mo ago", years, months)
            } else {
                format!("{}y ago", years)
            }
        }
    }

    pub fn format_label(&self, base: &str) -> String {
        if self.relative_mode {
            base.to_string()
        } else {
            format!("{} ({})", base, Local::now().offset())
        }
    }
}
