// In-app log view over the tracing ring buffer (F5).

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::logging::LogEntry;
use crate::ui::app::App;

fn level_color(level: &str) -> Color {
    match level {
        "ERROR" => Color::Red,
        "WARN" => Color::Yellow,
        "INFO" => Color::Green,
        "DEBUG" => Color::Cyan,
        _ => Color::DarkGray,
    }
}

fn entry_line(entry: &LogEntry) -> Line<'static> {
    Line::from(Span::styled(
        entry.format_for_display(),
        Style::default().fg(level_color(&entry.level)),
    ))
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from(Span::styled(
            "No log entries yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        entries.iter().map(entry_line).collect()
    };

    let title = match &app.log_file_path {
        Some(path) => format!("Logs ({})", path.display()),
        None => "Logs".to_string(),
    };
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_bottom(" F5 close   Esc back "),
    );
    f.render_widget(panel, area);
}
