mod app;
mod calendar;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode};
use color_eyre::Result;
use components::record_form::FormKind;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};

const UPCOMING_LIMIT: usize = 3;

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = config::Config::load();
    let _logger = logging::init_logging(config.log_level(), &config.log_dir())?;
    log::info!("Data directory: {}", config.data_dir().display());
    theme::init(&config.theme);

    let mut app = App::new(&config)?;

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    log::info!("Exiting");
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

            render_calendar(frame, layout[0], app);

            if let Some(ref form) = app.form_state {
                components::RecordForm::render(frame, area, form);
            }

            if app.show_help {
                components::Help::render(frame, area);
            }

            let mode = match app.input_mode {
                InputMode::Normal => "Calendar",
                InputMode::Form => "New record",
            };
            components::StatusBar::render(frame, layout[1], mode, app.status_message.as_deref());
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(250))? {
            app.status_message = None;

            if app.show_help {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::Form => handle_form_input(app, key.code),
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.next_item(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.prev_item(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('n'), _) => app.open_form(FormKind::Event),
        (KeyCode::Char('b'), _) => app.open_form(FormKind::Birthday),
        (KeyCode::Char('p'), _) => app.open_form(FormKind::Trip),
        (KeyCode::Char('d'), _) => app.delete_selected(),
        (KeyCode::Char('x'), _) => {
            app.export_selected();
        }
        (KeyCode::Char('a'), _) => app.show_lists = !app.show_lists,
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn render_calendar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let day = app.day_events();
    let records = app.records();

    let (left, right) = if area.width < 60 {
        let rows = Layout::vertical([Constraint::Length(9), Constraint::Min(3)]).split(area);
        (rows[0], rows[1])
    } else {
        let cols = Layout::horizontal([Constraint::Length(37), Constraint::Min(20)]).split(area);
        let left = Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).split(cols[0]);
        if left[1].height >= 3 {
            let upcoming = records.upcoming(app.today, UPCOMING_LIMIT);
            components::UpcomingView::render(frame, left[1], &upcoming, app.today);
        }
        (left[0], cols[1])
    };

    components::MonthView::render(frame, left, &app.month, app.selected_date, app.today);
    if app.show_lists {
        components::RecordsList::render(frame, right, records);
    } else {
        components::DayView::render(frame, right, app.selected_date, &day, app.selected_item);
    }
}
