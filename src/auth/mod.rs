mod password;
mod session;

pub use password::PasswordCheck;
pub use session::{AdminSession, AdminSessions, CLEAR_SESSION_COOKIE, SESSION_COOKIE};
