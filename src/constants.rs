// API Constants
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
pub const CHAT_ROUTE: &str = "/api/chat";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_RELAY_URL: &str = "http://localhost:5000";

// Wire contract literals. These are observable behavior, keep them verbatim.
pub const FALLBACK_REPLY: &str = "Some Error occurred.";
pub const UPSTREAM_FETCH_ERROR: &str = "Failed to fetch from Gemini";
pub const CLIENT_ERROR_REPLY: &str = "Error: Could not get response. Please try again.";

// UI Constants
pub const INPUT_SOFT_LIMIT: usize = 500;
pub const COPIED_MARKER_SECS: u64 = 2;
pub const ASSISTANT_NAME: &str = "Fynoraq";
