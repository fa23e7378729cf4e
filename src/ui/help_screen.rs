// Help overlay listing the key bindings.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BINDINGS: &[(&str, &str)] = &[
    ("j / k", "select row"),
    ("h / l", "previous / next page"),
    ("g / G", "first / last page"),
    ("f", "cycle the status or role filter"),
    ("/", "search (Enter applies, Esc cancels)"),
    ("Enter", "open the selected record"),
    ("a / r", "approve / reject a rental request"),
    ("e / E", "export the filtered set as CSV / JSON"),
    ("y", "copy the selected row to the clipboard"),
    ("R", "reload data from the provider"),
    ("o", "overview"),
    ("p", "profile"),
    ("F5", "log view"),
    ("?", "this help"),
    ("q", "quit"),
];

/// Centered popup area, sized as a share of the frame
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 70, area);
    f.render_widget(Clear, popup);

    let mut lines = vec![Line::from("")];
    for (keys, what) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<8}", keys),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(*what),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  press ? or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, popup);
}
