// Action system for UI operations
// Key presses map to one of these; the TUI dispatches on the action,
// never on the raw key, so bindings stay in one place.

use crate::data::export::ExportFormat;

/// All actions the dashboard can trigger from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Row selection within the current page
    SelectUp,
    SelectDown,

    // Pagination
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,

    // Table inputs
    CycleFilter,
    StartSearch,

    // Record workflows
    OpenDetail,
    Approve,
    Reject,

    // Export and clipboard
    Export(ExportFormat),
    YankRow,

    // Screen switching
    ShowOverview,
    ShowProfile,
    ToggleLogs,
    ToggleHelp,
    Back,

    // Data
    Refresh,

    // Application control
    Quit,
}
