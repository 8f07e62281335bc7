use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{CalendarCell, MonthRender};
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        month: &MonthRender,
        selected_date: NaiveDate,
        today: NaiveDate,
    ) {
        let t = theme::current();

        let block = Block::default()
            .title(format!(" {} ", month.label))
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Line::from(
            DAY_NAMES
                .iter()
                .map(|d| Span::styled(format!("{:^5}", d), t.header))
                .collect::<Vec<_>>(),
        );

        let weeks: Vec<Line> = month
            .cells
            .chunks(7)
            .map(|week| {
                Line::from(
                    week.iter()
                        .flat_map(|cell| day_spans(cell, selected_date, today))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(weeks.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

fn day_spans(cell: &CalendarCell, selected_date: NaiveDate, today: NaiveDate) -> [Span<'static>; 2] {
    let t = theme::current();
    let date = cell.date;

    let style = if date == today && date == selected_date {
        t.today.patch(t.selected).add_modifier(Modifier::BOLD)
    } else if date == selected_date {
        t.selected
    } else if date == today {
        t.today
    } else if !cell.is_current_month {
        t.dim
    } else {
        Style::default()
    };

    let (marker, marker_style) = if cell.has_event {
        ("* ", t.marker)
    } else {
        ("  ", Style::default())
    };

    [
        Span::styled(format!(" {:>2}", date.day()), style),
        Span::styled(marker, marker_style),
    ]
}
