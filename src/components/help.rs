use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Navigation",
        &[
            ("h/l \u{2190}/\u{2192}", "Previous/next day"),
            ("[/]", "Previous/next month"),
            ("t", "Jump to today"),
            ("j/k \u{2191}/\u{2193}", "Select item of the day"),
            ("a", "Toggle all birthdays & trips"),
        ],
    ),
    (
        "Records",
        &[
            ("n", "New event on selected day"),
            ("b", "New birthday"),
            ("p", "New trip"),
            ("d", "Delete selected item"),
            ("x", "Export selected item (.ics)"),
        ],
    ),
    ("", &[("q / Esc", "Quit / close popup")]),
];

pub struct Help;

impl Help {
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_w = area.width.clamp(30, 52).min(area.width);
        let popup_h = area.height.clamp(12, 22).min(area.height);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keybindings ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut lines: Vec<Line> = Vec::new();
        for (i, (heading, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            if !heading.is_empty() {
                lines.push(Line::from(Span::styled(*heading, section_style)));
            }
            for (key, desc) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<10}", key), key_style),
                    Span::styled(*desc, theme::current().header.remove_modifier(Modifier::BOLD)),
                ]));
            }
        }

        let para = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(para, inner);
    }
}
