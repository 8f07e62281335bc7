use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

pub struct StatusBar;

impl StatusBar {
    /// `message` replaces the key hints for one frame.
    pub fn render(frame: &mut Frame, area: Rect, mode: &str, message: Option<&str>) {
        let t = theme::current();
        let w = area.width as usize;

        let right = match message {
            Some(msg) => format!(" {} ", msg),
            None if w >= 80 => {
                " hl:Day [/]:Month t:Today jk:Item a:All n/b/p:New d:Del x:Export ?:Help q:Quit ".to_string()
            }
            None if w >= 50 => " [/]:Month n:New d:Del x:Export ?:Help q:Quit ".to_string(),
            None => " ?:Help q:Quit ".to_string(),
        };

        let left = format!(" {} ", mode);
        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, t.status),
            Span::styled(padding, t.status),
            Span::styled(right, t.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(t.status), area);
    }
}
