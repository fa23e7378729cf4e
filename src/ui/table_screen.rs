// Table screen: paginated records with search, filter and footer.
// Render functions depend only on App state passed in.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tui_input::Input;

use crate::data::table_view::{DashboardTable, PageItem, PAGE_SIZE};
use crate::ui::app::App;

/// Search input state; the query applies live while typing
pub struct SearchBox {
    pub input: Input,
    pub active: bool,
    /// Query to restore when the edit is cancelled
    prior: String,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            active: false,
            prior: String::new(),
        }
    }

    pub fn start(&mut self, current: &str) {
        self.prior = current.to_string();
        self.input = Input::new(current.to_string());
        self.active = true;
    }

    /// Keep the typed query
    pub fn commit(&mut self) {
        self.active = false;
    }

    /// Abandon the edit; returns the query to restore
    pub fn cancel(&mut self) -> String {
        self.active = false;
        self.input = Input::default();
        std::mem::take(&mut self.prior)
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App, search: &SearchBox) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_inputs(f, chunks[0], app, search);
    render_table(f, chunks[1], app);
    render_footer(f, chunks[2], app);
}

fn render_inputs(f: &mut Frame, area: Rect, app: &App, search: &SearchBox) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22)])
        .split(area);

    let query = if search.active {
        search.input.value().to_string()
    } else {
        app.table.search().to_string()
    };

    let search_style = if search.active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search_box = Paragraph::new(query)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title("Search (/)"));
    f.render_widget(search_box, chunks[0]);

    if search.active {
        // Put the terminal cursor inside the search box
        let cursor_x = chunks[0].x + 1 + search.input.visual_cursor() as u16;
        f.set_cursor_position((cursor_x.min(chunks[0].right() - 2), chunks[0].y + 1));
    }

    let filter = Paragraph::new(app.table.filter_label())
        .block(Block::default().borders(Borders::ALL).title("Filter (f)"));
    f.render_widget(filter, chunks[1]);
}

/// Badge color for status and role labels
fn badge_color(label: &str) -> Option<Color> {
    match label {
        "Pending" => Some(Color::Yellow),
        "Approved" => Some(Color::Green),
        "Rejected" => Some(Color::Red),
        "Admin" => Some(Color::Magenta),
        "Lender" => Some(Color::Blue),
        "Renter" => Some(Color::Cyan),
        _ => None,
    }
}

fn column_widths(table: &DashboardTable, show_row_numbers: bool) -> Vec<Constraint> {
    let mut widths: Vec<Constraint> = if show_row_numbers {
        vec![Constraint::Length(4)]
    } else {
        Vec::new()
    };

    let percentages: &[u16] = match table {
        DashboardTable::Rentals(_) => &[16, 16, 12, 9, 12, 21, 10],
        DashboardTable::Accounts(_) => &[20, 26, 14, 16, 12],
    };
    widths.extend(percentages.iter().map(|p| Constraint::Percentage(*p)));
    widths
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.table.title());

    let cells = app.table.page_cells();
    if cells.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(app.table.empty_state_text()),
            Line::from(Span::styled(
                "Data will appear here when available",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let show_row_numbers = app.config.display.show_row_numbers;

    let mut header_cells: Vec<Cell> = Vec::new();
    if show_row_numbers {
        header_cells.push(Cell::from("#"));
    }
    header_cells.extend(app.table.column_headers().iter().map(|h| Cell::from(*h)));
    let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

    let first_row_number = (app.table.current_page() - 1) * PAGE_SIZE + 1;
    let rows: Vec<Row> = cells
        .iter()
        .enumerate()
        .map(|(i, (_, columns))| {
            let mut row_cells: Vec<Cell> = Vec::new();
            if show_row_numbers {
                row_cells.push(
                    Cell::from(format!("{}", first_row_number + i))
                        .style(Style::default().fg(Color::DarkGray)),
                );
            }
            row_cells.extend(columns.iter().map(|value| {
                match badge_color(value) {
                    Some(color) => {
                        Cell::from(value.clone()).style(Style::default().fg(color))
                    }
                    None => Cell::from(value.clone()),
                }
            }));
            Row::new(row_cells)
        })
        .collect();

    let table = Table::new(rows, column_widths(&app.table, show_row_numbers))
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
}

/// Pagination footer spans, current page highlighted, gaps as ellipses
pub fn page_spans(table: &DashboardTable, use_glyphs: bool) -> Vec<Span<'static>> {
    let gap = if use_glyphs { " … " } else { " ... " };
    let current = table.current_page();

    let mut spans = Vec::new();
    for item in table.page_numbers() {
        match item {
            PageItem::Page(page) if page == current => {
                spans.push(Span::styled(
                    format!("[{}]", page),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            PageItem::Page(page) => {
                spans.push(Span::raw(format!(" {} ", page)));
            }
            PageItem::Gap => {
                spans.push(Span::styled(
                    gap.to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
    }
    spans
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let summary = Paragraph::new(app.table.entries_summary())
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(summary, chunks[0]);

    if app.table.total_pages() > 1 {
        let mut spans = vec![Span::styled(
            "h ◀ ",
            Style::default().fg(Color::DarkGray),
        )];
        spans.extend(page_spans(&app.table, app.config.display.use_glyphs));
        spans.push(Span::styled(" ▶ l", Style::default().fg(Color::DarkGray)));

        let pages = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
        f.render_widget(pages, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{RentalRecord, RentalStatus};
    use crate::data::table_view::TableView;

    fn table_with(count: usize) -> DashboardTable {
        let rentals = (1..=count)
            .map(|i| RentalRecord {
                id: format!("r{}", i),
                name: "John Doe".to_string(),
                equipment: "Tractor X200".to_string(),
                date: "Dec 1, 2025".to_string(),
                duration: "3 days".to_string(),
                location: "Manila".to_string(),
                email: "john@example.com".to_string(),
                status: RentalStatus::Pending,
            })
            .collect();
        DashboardTable::Rentals(TableView::new(rentals))
    }

    #[test]
    fn current_page_is_bracketed() {
        let table = table_with(12);
        let spans = page_spans(&table, true);
        let rendered: String = spans.iter().map(|s| s.content.clone()).collect();
        assert!(rendered.contains("[1]"));
        assert!(rendered.contains(" 2 "));
    }

    #[test]
    fn gaps_render_as_ellipses() {
        let mut table = table_with(90);
        table.set_page(5);
        let rendered: String = page_spans(&table, true)
            .iter()
            .map(|s| s.content.clone())
            .collect();
        assert!(rendered.contains("…"));

        let rendered: String = page_spans(&table, false)
            .iter()
            .map(|s| s.content.clone())
            .collect();
        assert!(rendered.contains("..."));
        assert!(!rendered.contains('…'));
    }

    #[test]
    fn cancelled_search_restores_the_prior_query() {
        let mut search = SearchBox::new();
        search.start("manila");
        search.input = Input::new("dav".to_string());
        assert_eq!(search.cancel(), "manila");
        assert!(!search.active);
    }

    #[test]
    fn badge_colors_cover_statuses_and_roles() {
        assert_eq!(badge_color("Pending"), Some(Color::Yellow));
        assert_eq!(badge_color("Renter"), Some(Color::Cyan));
        assert_eq!(badge_color("Manila"), None);
    }
}
