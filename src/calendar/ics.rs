//! Minimal single-event iCalendar export.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use color_eyre::eyre::{Result, WrapErr};

pub const ICS_MIME_TYPE: &str = "text/calendar";
pub const ICS_EXTENSION: &str = "ics";

const CRLF: &str = "\r\n";
const MAX_SLUG_CHARS: usize = 50;

/// Build a one-event calendar document.
///
/// All-day blocks keep only the date part of `start`/`end`, and `end` is
/// written as given: callers pass the exclusive end (the day after the last
/// day).
pub fn build(
    title: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    details: &str,
    all_day: bool,
) -> String {
    let (dtstart, dtend) = if all_day {
        (
            format!("DTSTART;VALUE=DATE:{}", start.format("%Y%m%d")),
            format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")),
        )
    } else {
        (
            format!("DTSTART:{}", start.format("%Y%m%dT%H%M%S")),
            format!("DTEND:{}", end.format("%Y%m%dT%H%M%S")),
        )
    };

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("SUMMARY:{}", escape_text(title)),
        format!("DESCRIPTION:{}", escape_text(details)),
        dtstart,
        dtend,
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    let mut out = lines.join(CRLF);
    out.push_str(CRLF);
    out
}

/// Escape a TEXT value: backslash, semicolon, comma and line breaks.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Write `text` to `<dir>/<slug of title>.ics` and return the path.
pub fn export_to_file(dir: &Path, title: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(format!("{}.{ICS_EXTENSION}", slugify(title)));
    fs::write(&path, text).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    log::info!("Exported {}", path.display());
    Ok(path)
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars().take(MAX_SLUG_CHARS) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "event".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn all_day_block_has_date_values_and_wrappers() {
        let text = build("X", midnight(2024, 1, 1), midnight(2024, 1, 2), "", true);
        let lines: Vec<&str> = text.split("\r\n").collect();

        assert_eq!(
            lines,
            [
                "BEGIN:VCALENDAR",
                "VERSION:2.0",
                "BEGIN:VEVENT",
                "SUMMARY:X",
                "DESCRIPTION:",
                "DTSTART;VALUE=DATE:20240101",
                "DTEND;VALUE=DATE:20240102",
                "END:VEVENT",
                "END:VCALENDAR",
                "",
            ]
        );
    }

    #[test]
    fn every_line_ends_with_crlf() {
        let text = build("X", midnight(2024, 1, 1), midnight(2024, 1, 2), "a\nb", true);
        assert!(text.ends_with("\r\n"));
        assert_eq!(text.matches('\n').count(), text.matches("\r\n").count());
    }

    #[test]
    fn timed_block_uses_local_date_times() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        let text = build("Standup", start, end, "", false);
        assert!(text.contains("\r\nDTSTART:20240305T093000\r\n"));
        assert!(text.contains("\r\nDTEND:20240305T101500\r\n"));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let text = build(
            "Lunch, then; more",
            midnight(2024, 1, 1),
            midnight(2024, 1, 2),
            "line one\r\nline two\nC:\\temp",
            true,
        );
        assert!(text.contains("SUMMARY:Lunch\\, then\\; more\r\n"));
        assert!(text.contains("DESCRIPTION:line one\\nline two\\nC:\\\\temp\r\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let a = build("Trip", midnight(2024, 6, 1), midnight(2024, 6, 6), "Porto", true);
        let b = build("Trip", midnight(2024, 6, 1), midnight(2024, 6, 6), "Porto", true);
        assert_eq!(a, b);
    }

    #[test]
    fn export_writes_slugged_file() {
        let dir = tempfile::tempdir().unwrap();
        let text = build("X", midnight(2024, 1, 1), midnight(2024, 1, 2), "", true);
        let path = export_to_file(dir.path(), "Summer Trip: Porto!", &text).unwrap();

        assert_eq!(path.file_name().unwrap(), "summer-trip-porto.ics");
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn slug_falls_back_for_symbol_only_titles() {
        assert_eq!(slugify("!!!"), "event");
        assert_eq!(slugify("  Ada's 40th  "), "ada-s-40th");
    }
}
