// Detail screen for a single record. Rentals carry the approve and
// reject workflow; accounts are view-only.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::data::records::{AccountRecord, RentalRecord, RentalStatus};
use crate::ui::app::App;

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value.to_string()),
    ])
}

fn status_line(status: RentalStatus) -> Line<'static> {
    let color = match status {
        RentalStatus::Pending => Color::Yellow,
        RentalStatus::Approved => Color::Green,
        RentalStatus::Rejected => Color::Red,
    };
    Line::from(vec![
        Span::styled("Status      ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            status.label().to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn rental_lines(rental: &RentalRecord) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        field("Renter", &rental.name),
        field("Email", &rental.email),
        field("Equipment", &rental.equipment),
        field("Date", &rental.date),
        field("Duration", &rental.duration),
        field("Location", &rental.location),
        status_line(rental.status),
        Line::from(""),
        Line::from(Span::styled(
            "a approve   r reject   Esc back",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn account_lines(account: &AccountRecord) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        field("Name", &account.name),
        field("Email", &account.email),
        field("Joined", &account.date),
        field("Location", &account.location),
        field("Role", account.role.label()),
        Line::from(""),
        Line::from(Span::styled(
            "Esc back",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let (title, lines) = if let Some(rental) = app.detail_rental() {
        ("Rental Request", rental_lines(rental))
    } else if let Some(account) = app.detail_account() {
        ("User Account", account_lines(account))
    } else {
        (
            "Detail",
            vec![
                Line::from(""),
                Line::from("Record is no longer in the current snapshot"),
                Line::from(Span::styled(
                    "Esc back",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        )
    };

    let card = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(card, area);
}
