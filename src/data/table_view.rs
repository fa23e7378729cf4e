use std::sync::Arc;

use tracing::trace;

use crate::data::records::{AccountRecord, AccountRole, RentalRecord, RentalStatus};

/// Fixed page size for every dashboard table
pub const PAGE_SIZE: usize = 10;

/// How many page buttons fit before the footer switches to a window
const MAX_VISIBLE_PAGES: usize = 5;

/// Categorical filter over rental rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn matches(&self, status: RentalStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == RentalStatus::Pending,
            StatusFilter::Approved => status == RentalStatus::Approved,
            StatusFilter::Rejected => status == RentalStatus::Rejected,
        }
    }

    /// Next filter in the cycle order used by the filter key
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Approved,
            StatusFilter::Approved => StatusFilter::Rejected,
            StatusFilter::Rejected => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Pending => "Pending",
            StatusFilter::Approved => "Approved",
            StatusFilter::Rejected => "Rejected",
        }
    }
}

/// Categorical filter over account rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Admin,
    Lender,
    Renter,
}

impl RoleFilter {
    pub fn matches(&self, role: AccountRole) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Admin => role == AccountRole::Admin,
            RoleFilter::Lender => role == AccountRole::Lender,
            RoleFilter::Renter => role == AccountRole::Renter,
        }
    }

    pub fn next(self) -> Self {
        match self {
            RoleFilter::All => RoleFilter::Admin,
            RoleFilter::Admin => RoleFilter::Lender,
            RoleFilter::Lender => RoleFilter::Renter,
            RoleFilter::Renter => RoleFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoleFilter::All => "All",
            RoleFilter::Admin => "Admin",
            RoleFilter::Lender => "Lender",
            RoleFilter::Renter => "Renter",
        }
    }
}

/// Row type that can sit behind a `TableView`.
///
/// The trait carries everything the view needs to filter, search,
/// display and export a record without knowing which variant it is.
pub trait Record: Clone {
    /// Categorical filter parameter for this record type
    type Filter: Copy + PartialEq + Default;

    fn id(&self) -> &str;

    /// Case-insensitive substring match against the record's searchable
    /// fields. `needle` arrives trimmed and lowercased.
    fn matches_search(&self, needle: &str) -> bool;

    fn matches_filter(&self, filter: Self::Filter) -> bool;

    /// Column headers for the on-screen table
    fn column_headers() -> &'static [&'static str];

    /// Display cells aligned with `column_headers` (labels, not wire values)
    fn column_cells(&self) -> Vec<String>;

    /// Field names for the export subset
    fn export_header() -> &'static [&'static str];

    /// Export values aligned with `export_header` (wire values)
    fn export_values(&self) -> Vec<String>;

    /// Table title, e.g. "Review" for rentals
    fn title() -> &'static str;

    /// Plural noun for messages ("rentals", "users"); doubles as the
    /// export filename subject
    fn entity_noun() -> &'static str;
}

impl Record for RentalRecord {
    type Filter = StatusFilter;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.equipment.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
    }

    fn matches_filter(&self, filter: StatusFilter) -> bool {
        filter.matches(self.status)
    }

    fn column_headers() -> &'static [&'static str] {
        &[
            "Name", "Equipment", "Date", "Duration", "Location", "Email", "Status",
        ]
    }

    fn column_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.equipment.clone(),
            self.date.clone(),
            self.duration.clone(),
            self.location.clone(),
            self.email.clone(),
            self.status.label().to_string(),
        ]
    }

    fn export_header() -> &'static [&'static str] {
        &[
            "id", "name", "equipment", "date", "duration", "location", "email", "status",
        ]
    }

    fn export_values(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.equipment.clone(),
            self.date.clone(),
            self.duration.clone(),
            self.location.clone(),
            self.email.clone(),
            self.status.as_str().to_string(),
        ]
    }

    fn title() -> &'static str {
        "Review"
    }

    fn entity_noun() -> &'static str {
        "rentals"
    }
}

impl Record for AccountRecord {
    type Filter = RoleFilter;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
    }

    fn matches_filter(&self, filter: RoleFilter) -> bool {
        filter.matches(self.role)
    }

    fn column_headers() -> &'static [&'static str] {
        &["Name", "Email", "Joined", "Location", "Role"]
    }

    fn column_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.date.clone(),
            self.location.clone(),
            self.role.label().to_string(),
        ]
    }

    fn export_header() -> &'static [&'static str] {
        &["id", "name", "email", "date", "location", "role"]
    }

    fn export_values(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.date.clone(),
            self.location.clone(),
            self.role.as_str().to_string(),
        ]
    }

    fn title() -> &'static str {
        "User Accounts"
    }

    fn entity_noun() -> &'static str {
        "users"
    }
}

/// One entry in the pagination footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    /// Rendered as an ellipsis between non-adjacent page numbers
    Gap,
}

/// Page numbers to show for `current` of `total` pages.
///
/// Five or fewer pages are shown in full. Beyond that the first and
/// last page stay visible and the window collapses around the current
/// page: `1 2 3 4 … N` near the start, `1 … N-3 N-2 N-1 N` near the
/// end, and `1 … c-1 c c+1 … N` in the middle.
pub fn page_window(current: usize, total: usize) -> Vec<PageItem> {
    let mut pages = Vec::new();

    if total <= MAX_VISIBLE_PAGES {
        for page in 1..=total {
            pages.push(PageItem::Page(page));
        }
    } else if current <= 3 {
        for page in 1..=4 {
            pages.push(PageItem::Page(page));
        }
        pages.push(PageItem::Gap);
        pages.push(PageItem::Page(total));
    } else if current >= total - 2 {
        pages.push(PageItem::Page(1));
        pages.push(PageItem::Gap);
        for page in (total - 3)..=total {
            pages.push(PageItem::Page(page));
        }
    } else {
        pages.push(PageItem::Page(1));
        pages.push(PageItem::Gap);
        for page in (current - 1)..=(current + 1) {
            pages.push(PageItem::Page(page));
        }
        pages.push(PageItem::Gap);
        pages.push(PageItem::Page(total));
    }

    pages
}

/// A filtered, searched, paginated view over an immutable snapshot.
///
/// The snapshot itself is never mutated; the view keeps the indices of
/// rows that survive the categorical filter and the search predicate,
/// and re-derives them whenever an input changes. The filtered index
/// list is the basis for both the page slice and exports, so an export
/// always covers every filtered row, not just the visible page.
#[derive(Debug, Clone)]
pub struct TableView<R: Record> {
    source: Arc<Vec<R>>,
    /// Indices into `source` that survive filter + search
    visible: Vec<usize>,
    filter: R::Filter,
    search: String,
    /// 1-based, always within `[1, total_pages()]`
    current_page: usize,
}

impl<R: Record> TableView<R> {
    pub fn new(records: Vec<R>) -> Self {
        let visible = (0..records.len()).collect();
        Self {
            source: Arc::new(records),
            visible,
            filter: R::Filter::default(),
            search: String::new(),
            current_page: 1,
        }
    }

    /// Replace the snapshot, keeping filter/search/page where possible.
    /// Used when a workflow action produced a fresh collection.
    pub fn set_source(&mut self, records: Vec<R>) {
        self.source = Arc::new(records);
        self.recompute();
    }

    pub fn source(&self) -> &[R] {
        &self.source
    }

    pub fn filter(&self) -> R::Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: R::Filter) {
        if self.filter != filter {
            self.filter = filter;
            self.recompute();
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.recompute();
    }

    /// Re-derive the visible rows and clamp the page before anything
    /// can render an out-of-range slice
    fn recompute(&mut self) {
        let needle = self.search.trim().to_lowercase();

        self.visible = self
            .source
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                record.matches_filter(self.filter)
                    && (needle.is_empty() || record.matches_search(&needle))
            })
            .map(|(idx, _)| idx)
            .collect();

        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let total = self.total_pages();
        self.current_page = self.current_page.clamp(1, total);
    }

    /// Number of rows in the filtered set (pre-pagination)
    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// The full filtered set, in source order. This is what exports see.
    pub fn filtered(&self) -> Vec<&R> {
        self.visible.iter().map(|&idx| &self.source[idx]).collect()
    }

    /// An empty result still has exactly one (empty) page
    pub fn total_pages(&self) -> usize {
        self.visible.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Jump to `page`. Out-of-range requests are ignored.
    pub fn set_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
        } else {
            trace!("ignoring out-of-range page request: {}", page);
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.set_page(self.current_page - 1);
        }
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    /// Rows for the current page, at most `PAGE_SIZE` of them
    pub fn page_rows(&self) -> Vec<&R> {
        let start = (self.current_page - 1) * PAGE_SIZE;
        self.visible
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .map(|&idx| &self.source[idx])
            .collect()
    }

    /// Footer line under the table, e.g. "Showing 11 to 12 of 12 entries"
    pub fn entries_summary(&self) -> String {
        let total = self.visible.len();
        let start = if total == 0 {
            0
        } else {
            (self.current_page - 1) * PAGE_SIZE + 1
        };
        let end = (self.current_page * PAGE_SIZE).min(total);
        format!("Showing {} to {} of {} entries", start, end, total)
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        page_window(self.current_page, self.total_pages())
    }

    /// Look up a record in the current snapshot by id
    pub fn record_by_id(&self, id: &str) -> Option<&R> {
        self.source.iter().find(|record| record.id() == id)
    }
}

/// The table screen's data: one of the two collections, selected by
/// mode. Admin sessions look at accounts, everyone else at rentals.
#[derive(Debug, Clone)]
pub enum DashboardTable {
    Rentals(TableView<RentalRecord>),
    Accounts(TableView<AccountRecord>),
}

impl DashboardTable {
    pub fn title(&self) -> &'static str {
        match self {
            DashboardTable::Rentals(_) => RentalRecord::title(),
            DashboardTable::Accounts(_) => AccountRecord::title(),
        }
    }

    /// "rentals" / "users"; also the export filename subject
    pub fn entity_noun(&self) -> &'static str {
        match self {
            DashboardTable::Rentals(_) => RentalRecord::entity_noun(),
            DashboardTable::Accounts(_) => AccountRecord::entity_noun(),
        }
    }

    pub fn empty_state_text(&self) -> String {
        format!("No {} found", self.entity_noun())
    }

    pub fn column_headers(&self) -> &'static [&'static str] {
        match self {
            DashboardTable::Rentals(_) => RentalRecord::column_headers(),
            DashboardTable::Accounts(_) => AccountRecord::column_headers(),
        }
    }

    /// Display cells for the current page, plus the id of every row so
    /// the UI can key its open-detail requests
    pub fn page_cells(&self) -> Vec<(String, Vec<String>)> {
        match self {
            DashboardTable::Rentals(view) => view
                .page_rows()
                .into_iter()
                .map(|r| (r.id.clone(), r.column_cells()))
                .collect(),
            DashboardTable::Accounts(view) => view
                .page_rows()
                .into_iter()
                .map(|r| (r.id.clone(), r.column_cells()))
                .collect(),
        }
    }

    pub fn filtered_len(&self) -> usize {
        match self {
            DashboardTable::Rentals(view) => view.filtered_len(),
            DashboardTable::Accounts(view) => view.filtered_len(),
        }
    }

    pub fn total_pages(&self) -> usize {
        match self {
            DashboardTable::Rentals(view) => view.total_pages(),
            DashboardTable::Accounts(view) => view.total_pages(),
        }
    }

    pub fn current_page(&self) -> usize {
        match self {
            DashboardTable::Rentals(view) => view.current_page(),
            DashboardTable::Accounts(view) => view.current_page(),
        }
    }

    pub fn set_page(&mut self, page: usize) {
        match self {
            DashboardTable::Rentals(view) => view.set_page(page),
            DashboardTable::Accounts(view) => view.set_page(page),
        }
    }

    pub fn next_page(&mut self) {
        match self {
            DashboardTable::Rentals(view) => view.next_page(),
            DashboardTable::Accounts(view) => view.next_page(),
        }
    }

    pub fn prev_page(&mut self) {
        match self {
            DashboardTable::Rentals(view) => view.prev_page(),
            DashboardTable::Accounts(view) => view.prev_page(),
        }
    }

    pub fn first_page(&mut self) {
        match self {
            DashboardTable::Rentals(view) => view.first_page(),
            DashboardTable::Accounts(view) => view.first_page(),
        }
    }

    pub fn last_page(&mut self) {
        match self {
            DashboardTable::Rentals(view) => view.last_page(),
            DashboardTable::Accounts(view) => view.last_page(),
        }
    }

    pub fn search(&self) -> &str {
        match self {
            DashboardTable::Rentals(view) => view.search(),
            DashboardTable::Accounts(view) => view.search(),
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        match self {
            DashboardTable::Rentals(view) => view.set_search(query),
            DashboardTable::Accounts(view) => view.set_search(query),
        }
    }

    /// Advance the categorical filter (status or role) one step
    pub fn cycle_filter(&mut self) {
        match self {
            DashboardTable::Rentals(view) => {
                let next = view.filter().next();
                view.set_filter(next);
            }
            DashboardTable::Accounts(view) => {
                let next = view.filter().next();
                view.set_filter(next);
            }
        }
    }

    pub fn filter_label(&self) -> &'static str {
        match self {
            DashboardTable::Rentals(view) => view.filter().label(),
            DashboardTable::Accounts(view) => view.filter().label(),
        }
    }

    pub fn entries_summary(&self) -> String {
        match self {
            DashboardTable::Rentals(view) => view.entries_summary(),
            DashboardTable::Accounts(view) => view.entries_summary(),
        }
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        match self {
            DashboardTable::Rentals(view) => view.page_numbers(),
            DashboardTable::Accounts(view) => view.page_numbers(),
        }
    }

    /// Export rows (header + values) for the full filtered set
    pub fn export_rows(&self) -> (&'static [&'static str], Vec<Vec<String>>) {
        match self {
            DashboardTable::Rentals(view) => (
                RentalRecord::export_header(),
                view.filtered().iter().map(|r| r.export_values()).collect(),
            ),
            DashboardTable::Accounts(view) => (
                AccountRecord::export_header(),
                view.filtered().iter().map(|r| r.export_values()).collect(),
            ),
        }
    }
}
