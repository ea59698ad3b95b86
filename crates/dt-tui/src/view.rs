//! Drawing the selector, tray, and history panels.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use dt_core::{DieKind, RollPhase};
use dt_engine::HistoryLedger;

use crate::app::DiceApp;

const STATUS_HINT: &str = "\u{2190}/\u{2192}:die  \u{2191}/\u{2193}:count  +/-:modifier  a:add  c:clear  Space/Enter:roll  ?:help  q:quit";

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &DiceApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled("Dicetower", Style::default().fg(Color::Yellow).bold()),
        Span::styled(
            "  may your rolls be ever in your favor",
            Style::default().fg(Color::DarkGray).italic(),
        ),
    ]));
    frame.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(columns[0]);

    draw_selector(frame, app, left[0]);
    draw_tray(frame, app, left[1]);
    draw_history(frame, app.engine().history(), columns[1]);

    let status =
        Paragraph::new(STATUS_HINT).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, rows[2]);

    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
}

fn draw_selector(frame: &mut Frame, app: &DiceApp, area: Rect) {
    let block = Block::default()
        .title(" Dice ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rolling = app.engine().phase().is_rolling();
    let die_spans: Vec<Span<'static>> = DieKind::ALL
        .iter()
        .flat_map(|kind| {
            let style = if *kind == app.selected_die() {
                Style::default().fg(Color::Black).bg(Color::Yellow).bold()
            } else if rolling {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            vec![Span::styled(format!(" {} ", kind.label()), style), Span::raw(" ")]
        })
        .collect();

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let mut lines = vec![
        Line::from(die_spans),
        Line::from(""),
        Line::from(vec![
            label("Count:    "),
            Span::styled(app.count().to_string(), Style::default().bold()),
            label("    Modifier: "),
            Span::styled(format!("{:+}", app.modifier()), Style::default().bold()),
        ]),
    ];

    let added = if app.groups().is_empty() {
        "(none, rolling the selection)".to_string()
    } else {
        app.groups()
            .iter()
            .map(|g| format!("{}{}", g.count, g.die_id))
            .collect::<Vec<_>>()
            .join(", ")
    };
    lines.push(Line::from(vec![label("Groups:   "), Span::raw(added)]));

    let next = match app.pending_request() {
        Ok(request) => Span::styled(request.expression(), Style::default().fg(Color::Yellow)),
        Err(e) => Span::styled(e, Style::default().fg(Color::Red)),
    };
    lines.push(Line::from(vec![label("Next roll: "), next]));

    if let Some(notice) = app.notice() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_tray(frame: &mut Frame, app: &DiceApp, area: Rect) {
    let engine = app.engine();
    let phase = engine.phase();
    let border = if phase.is_rolling() {
        Color::Yellow
    } else {
        Color::Green
    };
    let block = Block::default()
        .title(format!(" Tray [{phase}] "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let o = engine.orientation();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                engine.die().label().to_string(),
                Style::default().fg(Color::Yellow).bold(),
            ),
            Span::styled(
                format!("  x {:>7.3}  y {:>7.3}  z {:>7.3}", o.x, o.y, o.z),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
    ];

    match (phase, engine.displayed_outcome()) {
        (RollPhase::Settled, Some(outcome)) => {
            if let Some((die, face)) = outcome.primary_face() {
                lines.push(Line::from(Span::styled(
                    format!("{}: {}", die.label(), die.format_value(face)),
                    Style::default().fg(Color::White).bold(),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled("Total: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    outcome.total().to_string(),
                    Style::default().fg(Color::Green).bold(),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                outcome.breakdown(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        (RollPhase::Spinning | RollPhase::Settling, _) => {
            lines.push(Line::from(Span::styled(
                "Rolling...",
                Style::default().fg(Color::Yellow).italic(),
            )));
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "Press Space or Enter to roll",
                Style::default().fg(Color::Green),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn draw_history(frame: &mut Frame, history: &HistoryLedger, area: Rect) {
    let block = Block::default()
        .title(format!(" History ({}/{}) ", history.len(), history.capacity()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if history.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No rolls yet",
                Style::default().fg(Color::DarkGray),
            )),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    for entry in history.entries() {
        lines.push(Line::from(vec![
            Span::styled(entry.expression.clone(), Style::default().bold()),
            Span::raw(" = "),
            Span::styled(
                entry.outcome.total().to_string(),
                Style::default().fg(Color::Green).bold(),
            ),
            Span::styled(
                format!("  {}", entry.display_time()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for group in entry.outcome.groups() {
            lines.push(Line::from(Span::raw(format!("  {group}"))));
        }
        if entry.outcome.modifier() != 0 {
            lines.push(Line::from(Span::styled(
                format!("  Modifier: {:+}", entry.outcome.modifier()),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use dt_engine::{DiceEngine, EngineConfig};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn render(app: &DiceApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> DiceApp {
        let config = EngineConfig::default()
            .with_seed(9)
            .with_spin_duration(Duration::from_millis(100));
        DiceApp::new(DiceEngine::new(config).unwrap())
    }

    #[test]
    fn idle_screen() {
        let text = render(&app());
        assert!(text.contains("D20"));
        assert!(text.contains("Press Space or Enter to roll"));
        assert!(text.contains("No rolls yet"));
        assert!(text.contains("1d20"));
    }

    #[test]
    fn settled_screen_shows_result_and_history() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(render(&app).contains("Rolling..."));
        for _ in 0..1_000 {
            app.tick(Duration::from_millis(16));
        }
        let text = render(&app);
        assert!(text.contains("Total:"));
        assert!(text.contains("History (1/10)"));
        assert!(text.contains("1d20 = "));
    }
}
