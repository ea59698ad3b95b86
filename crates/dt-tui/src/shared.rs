//! Layout helpers and the help popup.

use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// The middle `percent_x` by `percent_y` of `area`.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [band] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(band);
    popup
}

/// Draw the key bindings popup.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = popup_area(frame.area(), 50, 60);

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("  \u{2190} / \u{2192}       Select die kind"),
        Line::from("  \u{2191} / \u{2193}       Dice count"),
        Line::from("  + / -       Modifier"),
        Line::from("  a           Add selection as a group"),
        Line::from("  c           Clear selection and reset the tray"),
        Line::from("  Space/Enter Roll"),
        Line::from(""),
        Line::from("  ?           Toggle this help"),
        Line::from("  q / Ctrl+C  Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
