/// Currency symbol used when no explicit symbol is supplied to the formatter.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

/// Sentinel filter name meaning "every asset class".
pub const ALL_ASSET_CLASSES: &str = "All";

/// Rows shown per page in the dashboard grids.
pub const DEFAULT_PAGE_SIZE: usize = 10;
