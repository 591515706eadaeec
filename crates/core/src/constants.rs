/// chrono format for one half of a period label, e.g. "Apr 24"
pub const PERIOD_MONTH_FORMAT: &str = "%b %y";

/// Item field names that cannot double as owner keys in a snapshot row
pub const RESERVED_ITEM_KEYS: [&str; 5] = ["name", "is_managed", "is_liability", "joint", "total"];

/// Path segments the net-worth routes use next to a client group id
pub const RESERVED_CLIENT_GROUP_IDS: [&str; 2] = ["compare", "snapshot"];

/// Status given to newly created client groups and owners
pub const STATUS_ACTIVE: &str = "active";
