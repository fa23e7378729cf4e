//! Classic one-shot mode: print a dashboard page to stdout without
//! entering the TUI. Useful over plain pipes and terminals where raw
//! mode is unavailable.

use std::path::Path;

use anyhow::{bail, Result};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

use crate::data::export::write_export;
use crate::data::provider::RecordProvider;
use crate::data::records::{SessionRole, UserSession};
use crate::data::table_view::{DashboardTable, PageItem, RoleFilter, StatusFilter, TableView};

#[derive(Debug, Default)]
pub struct ClassicOptions {
    pub search: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub page: Option<usize>,
    pub export: Option<String>,
}

fn parse_status_filter(raw: &str) -> Result<StatusFilter> {
    match raw.to_lowercase().as_str() {
        "all" => Ok(StatusFilter::All),
        "pending" => Ok(StatusFilter::Pending),
        "approved" => Ok(StatusFilter::Approved),
        "rejected" => Ok(StatusFilter::Rejected),
        other => bail!("unknown status filter: {}", other),
    }
}

fn parse_role_filter(raw: &str) -> Result<RoleFilter> {
    match raw.to_lowercase().as_str() {
        "all" => Ok(RoleFilter::All),
        "admin" => Ok(RoleFilter::Admin),
        "lender" => Ok(RoleFilter::Lender),
        "renter" | "farmer" => Ok(RoleFilter::Renter),
        other => bail!("unknown role filter: {}", other),
    }
}

fn build_table(
    provider: &dyn RecordProvider,
    session: &UserSession,
    options: &ClassicOptions,
) -> Result<DashboardTable> {
    let mut table = match session.role {
        SessionRole::Admin => {
            let mut view = TableView::new(provider.fetch_accounts()?);
            if let Some(raw) = &options.role {
                view.set_filter(parse_role_filter(raw)?);
            }
            DashboardTable::Accounts(view)
        }
        _ => {
            let mut view = TableView::new(provider.fetch_rentals()?);
            if let Some(raw) = &options.status {
                view.set_filter(parse_status_filter(raw)?);
            }
            DashboardTable::Rentals(view)
        }
    };

    if let Some(query) = &options.search {
        table.set_search(query.clone());
    }
    if let Some(page) = options.page {
        // out-of-range pages are ignored, same as the TUI footer
        table.set_page(page);
    }
    Ok(table)
}

fn page_line(table: &DashboardTable) -> String {
    table
        .page_numbers()
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == table.current_page() => format!("[{}]", n),
            PageItem::Page(n) => format!(" {} ", n),
            PageItem::Gap => " ... ".to_string(),
        })
        .collect()
}

fn print_table(table: &DashboardTable) {
    println!("{}", table.title().bold());
    println!(
        "Filter: {}   Search: {}",
        table.filter_label(),
        if table.search().is_empty() {
            "-"
        } else {
            table.search()
        }
    );

    if table.filtered_len() == 0 {
        println!("{}", table.empty_state_text().yellow());
        return;
    }

    let mut out = Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(
        table
            .column_headers()
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );
    for (_, cells) in table.page_cells() {
        out.add_row(cells);
    }
    println!("{out}");

    println!("{}", table.entries_summary().green());
    if table.total_pages() > 1 {
        println!("Pages: {}", page_line(table));
    }
}

fn print_profile(provider: &dyn RecordProvider, session: &UserSession) -> Result<()> {
    let profile = provider.fetch_profile(&session.user_id)?;
    println!("{}", "Personal Information".bold());
    println!("Username:   {}", profile.username);
    println!("Name:       {} {}", profile.first_name, profile.last_name);
    println!("Email:      {}", profile.email);
    println!("Location:   {}", profile.location);
    Ok(())
}

/// Print one dashboard page, then run the requested export, if any.
pub fn run(
    provider: &dyn RecordProvider,
    session: &UserSession,
    options: &ClassicOptions,
    export_dir: &Path,
) -> Result<()> {
    if session.role == SessionRole::Farmer {
        return print_profile(provider, session);
    }

    let table = build_table(provider, session, options)?;
    print_table(&table);

    if let Some(raw) = &options.export {
        let format = raw.parse()?;
        match write_export(&table, format, export_dir)? {
            Some(path) => println!("{}", format!("Exported to {}", path.display()).green()),
            None => println!("{}", format!("No {} to export", table.entity_noun()).yellow()),
        }
    }
    Ok(())
}
