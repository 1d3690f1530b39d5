//! Messages printed by the command-line tool

/// Prefix for fatal errors
pub const ERR_PREFIX: &str = "Error: ";

/// Invalid delay window
pub const ERR_INVALID_WINDOW: &str = "Invalid delay window: ";

/// Could not load the i18n configuration
pub const ERR_I18N_CONFIG: &str = "Failed to load i18n config: ";

/// Could not build translations
pub const ERR_I18N: &str = "Failed to load translations: ";

/// Could not serialize JSON output
pub const ERR_JSON: &str = "Failed to serialize badge: ";

/// UTC offset outside the valid range
pub const ERR_UTC_OFFSET: &str = "UTC offset out of range (minutes): ";

/// Could not write the badge to stdout
pub const ERR_OUTPUT: &str = "Failed to write output: ";

/// Could not install the log subscriber
pub const ERR_TRACING: &str = "Failed to install log subscriber: ";

/// Label shown before the color name in text output
pub const MSG_COLOR: &str = "color: ";
