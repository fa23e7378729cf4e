// Overview screen: rental activity chart, status breakdown, recent
// reviews and the lender's equipment summary.

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};
use tracing::debug;

use crate::data::records::{RentalRecord, RentalStatus};
use crate::ui::app::App;

/// Rentals bucketed by month, oldest first. Dates come in the display
/// form ("Dec 1, 2025") with ISO as a fallback; anything else is
/// skipped rather than failing the whole chart.
pub fn monthly_rental_counts(rentals: &[RentalRecord]) -> Vec<(String, u64)> {
    let mut buckets: Vec<((i32, u32), String, u64)> = Vec::new();
    for rental in rentals {
        let Some(date) = parse_rental_date(&rental.date) else {
            debug!("skipping unparseable rental date: {}", rental.date);
            continue;
        };
        let key = (date.year(), date.month());
        match buckets.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, count)) => *count += 1,
            None => buckets.push((key, date.format("%b").to_string(), 1)),
        }
    }
    buckets.sort_by_key(|(key, _, _)| *key);
    buckets
        .into_iter()
        .map(|(_, label, count)| (label, count))
        .collect()
}

fn parse_rental_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%b %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

pub fn status_counts(rentals: &[RentalRecord]) -> [(RentalStatus, usize); 3] {
    let mut pending = 0;
    let mut approved = 0;
    let mut rejected = 0;
    for rental in rentals {
        match rental.status {
            RentalStatus::Pending => pending += 1,
            RentalStatus::Approved => approved += 1,
            RentalStatus::Rejected => rejected += 1,
        }
    }
    [
        (RentalStatus::Pending, pending),
        (RentalStatus::Approved, approved),
        (RentalStatus::Rejected, rejected),
    ]
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(6),
        ])
        .split(area);

    render_summary(f, chunks[0], app);
    render_chart(f, chunks[1], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);
    render_reviews(f, bottom[0], app);
    render_equipment(f, bottom[1], app);
}

fn status_color(status: RentalStatus) -> Color {
    match status {
        RentalStatus::Pending => Color::Yellow,
        RentalStatus::Approved => Color::Green,
        RentalStatus::Rejected => Color::Red,
    }
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let rentals = app.overview_rentals();
    let mut spans = vec![Span::styled(
        format!("{} rentals", rentals.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for (status, count) in status_counts(rentals) {
        spans.push(Span::raw("    "));
        spans.push(Span::styled(
            format!("{} {}", count, status.label().to_lowercase()),
            Style::default().fg(status_color(status)),
        ));
    }

    let summary = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Overview"));
    f.render_widget(summary, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Rentals per Month");

    let counts = monthly_rental_counts(app.overview_rentals());
    if counts.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No rental activity yet",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let data: Vec<(&str, u64)> = counts
        .iter()
        .map(|(label, count)| (label.as_str(), *count))
        .collect();
    let chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(chart, area);
}

fn render_reviews(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    if app.reviews.is_empty() {
        lines.push(Line::from(Span::styled(
            "No reviews yet",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for review in &app.reviews {
        lines.push(Line::from(vec![
            Span::styled(
                review.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} | {}", review.location, review.date),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                review_stars(review.rating, app.config.display.use_glyphs),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!("  {}", review.comment)),
        ]));
        lines.push(Line::from(""));
    }

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recent Reviews"),
    );
    f.render_widget(card, area);
}

fn review_stars(rating: u8, use_glyphs: bool) -> String {
    let filled = rating.min(5) as usize;
    if use_glyphs {
        let mut stars = "★".repeat(filled);
        stars.push_str(&"☆".repeat(5 - filled));
        stars
    } else {
        "*".repeat(filled)
    }
}

fn render_equipment(f: &mut Frame, area: Rect, app: &App) {
    let use_glyphs = app.config.display.use_glyphs;
    let mut lines = Vec::new();
    if app.equipment.is_empty() {
        lines.push(Line::from(Span::styled(
            "No equipment listed",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for item in &app.equipment {
        lines.push(Line::from(Span::styled(
            item.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("{} | {}", item.maker, item.owner),
            Style::default().fg(Color::DarkGray),
        )));
        let star = if use_glyphs { "★" } else { "*" };
        let rate = if use_glyphs {
            format!("₱{}/day", item.daily_rate)
        } else {
            format!("PHP {}/day", item.daily_rate)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {:.1}", star, item.rating),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!("   {} rented   {}", item.rented_count, rate)),
        ]));
        lines.push(Line::from(""));
    }

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Equipment"));
    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn rental_on(date: &str) -> RentalRecord {
        RentalRecord {
            id: "r1".to_string(),
            name: "John Doe".to_string(),
            equipment: "Tractor X200".to_string(),
            date: date.to_string(),
            duration: "3 days".to_string(),
            location: "Manila".to_string(),
            email: "john.doe@example.com".to_string(),
            status: RentalStatus::Pending,
        }
    }

    #[test]
    fn buckets_rentals_by_month_in_order() {
        let rentals = vec![
            rental_on("Dec 1, 2025"),
            rental_on("2025-11-03"),
            rental_on("Dec 9, 2025"),
        ];
        let counts = monthly_rental_counts(&rentals);
        assert_eq!(
            counts,
            vec![("Nov".to_string(), 1), ("Dec".to_string(), 2)]
        );
    }

    #[test]
    fn unparseable_dates_are_skipped() {
        let rentals = vec![rental_on("soon"), rental_on("Dec 1, 2025")];
        let counts = monthly_rental_counts(&rentals);
        assert_eq!(counts, vec![("Dec".to_string(), 1)]);
    }

    #[test]
    fn months_sort_across_year_boundaries() {
        let rentals = vec![rental_on("Jan 2, 2026"), rental_on("Nov 5, 2025")];
        let counts = monthly_rental_counts(&rentals);
        assert_eq!(
            counts,
            vec![("Nov".to_string(), 1), ("Jan".to_string(), 1)]
        );
    }

    #[test]
    fn status_counts_cover_every_record() {
        let rentals = fixtures::demo_rentals();
        let counts = status_counts(&rentals);
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, rentals.len());
    }

    #[test]
    fn stars_cap_at_five() {
        assert_eq!(review_stars(7, false), "*****");
        assert_eq!(review_stars(3, true), "★★★☆☆");
    }
}
