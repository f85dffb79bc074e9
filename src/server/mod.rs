mod app;
mod middleware;
mod state;

pub use app::create_app;
pub use middleware::{extract_bearer_token, extract_session_cookie, require_admin, AdminToken};
pub use state::AppState;
