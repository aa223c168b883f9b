/// Shared constants used across the listing, detail and CLI front ends

// Remote events API
pub const DEFAULT_API_BASE_URL: &str = "https://68148b33225ff1af16292eee.mockapi.io/api/v1";
pub const EVENTS_PATH: &str = "events";

// Web server
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Display
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
pub const EXPIRED_LABEL: &str = "Expired";

/// Category value meaning "do not filter by category"
pub const ALL_CATEGORIES: &str = "all-categories";

// User-facing notifications
pub const LOAD_EVENTS_FAILED: &str = "Failed to load events";
pub const LOAD_EVENT_DETAILS_FAILED: &str = "Failed to load event details";
pub const EVENT_NOT_FOUND: &str = "Event not found";
pub const WELCOME_TITLE: &str = "Welcome to Event Hub";
pub const WELCOME_MESSAGE: &str = "Browse upcoming, ongoing and past events";

/// Notice key carried in the listing URL after a not-found redirect
pub const NOTICE_EVENT_NOT_FOUND: &str = "event-not-found";

// Environment variables
pub const ENV_CONFIG_PATH: &str = "EVENT_HUB_CONFIG";
pub const ENV_API_URL: &str = "EVENT_HUB_API_URL";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
