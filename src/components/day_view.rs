use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::DayEvents;
use crate::theme;

pub struct DayView;

impl DayView {
    /// Paint the details of `date`. `selected` indexes the flattened list of
    /// birthdays, then trips, then events.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        day: &DayEvents<'_>,
        selected: usize,
    ) {
        let t = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else {
            format!(" {} ", date.format("%b %d, %Y"))
        };

        let n = day.len();
        let count_str = match n {
            0 => String::new(),
            1 => " 1 item ".to_string(),
            _ => format!(" {} items ", n),
        };

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(count_str, t.dim)))
            .borders(Borders::ALL)
            .border_style(t.border);

        if day.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("Nothing planned. n:Event b:Birthday p:Trip").style(t.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let mut rows: Vec<Line> = Vec::new();

        for b in &day.birthdays {
            let age = date.year() - b.date.year();
            let mut spans = vec![
                Span::styled("Birthday ", t.marker),
                Span::raw(b.name.clone()),
            ];
            if age > 0 {
                spans.push(Span::styled(format!(" turns {}", age), t.dim));
            }
            rows.push(Line::from(spans));
        }

        for trip in &day.trips {
            let mut spans = vec![
                Span::styled("Trip ", t.marker),
                Span::raw(trip.title.clone()),
                Span::styled(
                    format!(" {} \u{2192} {}", trip.start.format("%b %d"), trip.end.format("%b %d")),
                    t.dim,
                ),
            ];
            if let Some(loc) = &trip.location {
                spans.push(Span::styled(format!(" @ {}", loc), t.dim));
            }
            rows.push(Line::from(spans));
        }

        for ev in &day.events {
            rows.push(Line::from(vec![
                Span::styled("Event ", t.marker),
                Span::raw(ev.title.clone()),
            ]));
        }

        let items: Vec<ListItem> = rows
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let item = ListItem::new(line);
                if i == selected {
                    item.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    item
                }
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
