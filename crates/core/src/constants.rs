use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Share of a budget that must be exceeded before a warning is raised.
pub const BUDGET_WARNING_THRESHOLD: Decimal = dec!(0.90);

/// Label used in messages when a category cannot be resolved.
pub const UNKNOWN_CATEGORY_LABEL: &str = "a category";

/// Label used in reports for spending whose category no longer exists.
pub const UNCATEGORIZED_LABEL: &str = "Unknown";

/// Prefix of the link stored on budget warnings, followed by the budget id.
pub const BUDGET_LINK_PREFIX: &str = "/budgets#";

/// Number of expenses shown in the dashboard's recent list
pub const RECENT_EXPENSES_LIMIT: i64 = 5;

pub const EXPENSE_DESCRIPTION_MIN_LEN: usize = 2;
pub const EXPENSE_DESCRIPTION_MAX_LEN: usize = 100;

pub const CATEGORY_NAME_MIN_LEN: usize = 2;
pub const CATEGORY_NAME_MAX_LEN: usize = 50;

/// Decimal places kept when reporting percentages
pub const PERCENT_PRECISION: u32 = 2;
