use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::{parse_date, RecordError};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Event,
    Birthday,
    Trip,
}

impl FormKind {
    fn fields(self) -> &'static [FormField] {
        match self {
            FormKind::Event | FormKind::Birthday => &[FormField::Title, FormField::Date],
            FormKind::Trip => &[
                FormField::Title,
                FormField::Date,
                FormField::End,
                FormField::Location,
            ],
        }
    }

    fn heading(self) -> &'static str {
        match self {
            FormKind::Event => " New Event ",
            FormKind::Birthday => " New Birthday ",
            FormKind::Trip => " New Trip ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Date,
    End,
    Location,
}

/// Parsed form contents, ready to become a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Event {
        title: String,
        date: NaiveDate,
    },
    Birthday {
        name: String,
        date: NaiveDate,
    },
    Trip {
        title: String,
        start: NaiveDate,
        end: NaiveDate,
        location: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct RecordFormState {
    pub kind: FormKind,
    pub title: String,
    pub date: String,
    pub end: String,
    pub location: String,
    pub active_field: FormField,
}

impl RecordFormState {
    pub fn new(kind: FormKind, date: NaiveDate) -> Self {
        let iso = date.format("%Y-%m-%d").to_string();
        Self {
            kind,
            title: String::new(),
            date: iso.clone(),
            end: iso,
            location: String::new(),
            active_field: FormField::Title,
        }
    }

    fn step(&mut self, forward: bool) {
        let fields = self.kind.fields();
        let pos = fields
            .iter()
            .position(|f| *f == self.active_field)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.active_field = fields[next];
    }

    pub fn next_field(&mut self) {
        self.step(true);
    }

    pub fn prev_field(&mut self) {
        self.step(false);
    }

    fn active_value(&mut self) -> &mut String {
        match self.active_field {
            FormField::Title => &mut self.title,
            FormField::Date => &mut self.date,
            FormField::End => &mut self.end,
            FormField::Location => &mut self.location,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.active_value().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_value().pop();
    }

    /// Validate text fields. Record-level rules (blank titles, inverted
    /// trips) are left to the record constructors.
    pub fn parse(&self) -> Result<Submission, RecordError> {
        let date = parse_date(&self.date)?;
        Ok(match self.kind {
            FormKind::Event => Submission::Event {
                title: self.title.clone(),
                date,
            },
            FormKind::Birthday => Submission::Birthday {
                name: self.title.clone(),
                date,
            },
            FormKind::Trip => Submission::Trip {
                title: self.title.clone(),
                start: date,
                end: parse_date(&self.end)?,
                location: Some(self.location.clone()).filter(|l| !l.trim().is_empty()),
            },
        })
    }
}

pub struct RecordForm;

impl RecordForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &RecordFormState) {
        let t = theme::current();

        let form_w = area.width.clamp(30, 50).min(area.width);
        let form_h = area.height.clamp(8, 10).min(area.height);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(state.kind.heading())
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let fields = state.kind.fields();
        let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(1)).collect();
        constraints.extend([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)]);
        let rows = Layout::vertical(constraints).split(inner);

        for (i, field) in fields.iter().enumerate() {
            let (label, value) = match (field, state.kind) {
                (FormField::Title, FormKind::Birthday) => ("Name:", &state.title),
                (FormField::Title, _) => ("Title:", &state.title),
                (FormField::Date, FormKind::Trip) => ("Start:", &state.date),
                (FormField::Date, _) => ("Date:", &state.date),
                (FormField::End, _) => ("End:", &state.end),
                (FormField::Location, _) => ("Where:", &state.location),
            };
            render_field(frame, rows[i], label, value, state.active_field == *field);
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", t.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", t.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", t.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[fields.len() + 1]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<7}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
