pub mod date;
pub mod page;
pub mod ranking;

pub use page::{
    ALLOWED_PAGE_SIZES, DEFAULT_PAGE_SIZE, PageSize, PageWindow, TransactionRow,
    project_transaction_page,
};
pub use ranking::{UserTotalRow, project_user_ranking};

/// Shown in place of a name whose identifier has no matching record.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Shown in place of a value that could not be derived for a row.
pub const UNAVAILABLE: &str = "unavailable";
