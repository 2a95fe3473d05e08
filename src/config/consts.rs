// src/config/consts.rs

// Net config
pub const DEFAULT_BASE_URL: &str = "http://natiga.nezakr.org/";
pub const SEAT_PATH: &str = "index.php?t=num&k="; // + seat number
pub const TIMEOUT_SECS: u64 = 7;
pub const RETRIES: u32 = 4;
pub const USER_AGENT: &str = concat!("natiga/", env!("CARGO_PKG_VERSION"));

// School listing form
pub const PAGE_FIELD: &str = "page";
pub const ORDER_FIELD: &str = "order";
pub const ORDER_MARK_DESC: &str = "mark_desc";

// Page layout
pub const TOTAL_LABEL: &str = "المجموع";
pub const RANK_NATIONAL: &str = "الترتيب على الجمهورية";
pub const RANK_SECTION: &str = "الترتيب على الشعبة";
pub const RANK_GOVERNORATE: &str = "الترتيب على المحافظة";

// Export
pub const RESULTS_TABLE: &str = "results";
pub const SHEET_NAME: &str = "Sheet";

// Logging
pub const DEFAULT_LOG_FILE: &str = ".store/debug.log";
