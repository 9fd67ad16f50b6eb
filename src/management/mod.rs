mod auth;
mod session;

pub use auth::EXPIRY_MARGIN_SECS;
pub use auth::TokenManager;
pub use auth::seconds_remaining;
pub use session::MemoryStore;
pub use session::PENDING_SESSION_TTL_SECS;
pub use session::SessionId;
pub use session::SessionStore;
