use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{Records, Upcoming};
use crate::theme;

pub struct UpcomingView;

impl UpcomingView {
    pub fn render(frame: &mut Frame, area: Rect, upcoming: &Upcoming<'_>, today: NaiveDate) {
        let t = theme::current();
        let block = Block::default()
            .title(" Coming up ")
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let mut lines: Vec<Line> = Vec::new();
        for (date, b) in &upcoming.birthdays {
            let when = if *date == today {
                "today".to_string()
            } else {
                date.format("%b %d").to_string()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<7}", when), t.dim),
                Span::raw(b.name.clone()),
            ]));
        }
        for trip in &upcoming.trips {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<7}", trip.start.format("%b %d").to_string()), t.dim),
                Span::raw(trip.title.clone()),
            ]));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled("No upcoming items yet.", t.dim)));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Every birthday and trip, each list in date order.
pub struct RecordsList;

impl RecordsList {
    pub fn render(frame: &mut Frame, area: Rect, records: &Records) {
        let t = theme::current();
        let block = Block::default()
            .title(" All birthdays & trips ")
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let section = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let mut lines = vec![Line::from(Span::styled("Birthdays", section))];
        for b in records.birthdays_sorted() {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", b.date.format("%Y-%m-%d")), t.dim),
                Span::raw(b.name.clone()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Trips", section)));
        for trip in records.trips_sorted() {
            let mut spans = vec![
                Span::styled(
                    format!("{} \u{2192} {} ", trip.start.format("%Y-%m-%d"), trip.end.format("%Y-%m-%d")),
                    t.dim,
                ),
                Span::raw(trip.title.clone()),
            ];
            if let Some(loc) = &trip.location {
                spans.push(Span::styled(format!(" \u{2022} {}", loc), t.dim));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
