//! Supporting helpers: colored stderr prefixes and color gating.

use owo_colors::OwoColorize;

/// Colors are on unless `NO_COLOR` is set or the caller disabled them.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, color: bool, paint: fn(&str) -> String) -> String {
    if color {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix(color: bool) -> String {
    prefix("error:", color, |s| s.red().bold().to_string())
}

pub fn note_prefix(color: bool) -> String {
    prefix("note:", color, |s| s.yellow().bold().to_string())
}

pub fn info_prefix(color: bool) -> String {
    prefix("info:", color, |s| s.blue().bold().to_string())
}
