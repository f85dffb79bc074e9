//! Admin session registry.
//!
//! A successful login issues an opaque random token. Admin requests present
//! the token as a bearer header or the `admin_session` cookie and are checked
//! against this registry; tokens expire after the configured TTL.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::config::AdminConfig;
use crate::metrics::AdminMetrics;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "admin_session";

/// `Set-Cookie` value that clears the session cookie
pub const CLEAR_SESSION_COOKIE: &str = "admin_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

pub struct AdminSessions {
    sessions: DashMap<String, AdminSession>,
    ttl: Duration,
}

impl AdminSessions {
    pub fn new(config: &AdminConfig) -> Self {
        Self::with_ttl(Duration::seconds(config.session_ttl_seconds as i64))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a new session.
    pub fn issue(&self) -> AdminSession {
        let now = Utc::now();
        let session = AdminSession {
            token: Uuid::new_v4().simple().to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions.insert(session.token.clone(), session.clone());
        AdminMetrics::set_active_sessions(self.sessions.len());
        tracing::info!(expires_at = %session.expires_at, "Admin session issued");

        session
    }

    /// Whether `token` names a live session. Expired sessions are dropped.
    pub fn validate(&self, token: &str) -> bool {
        let expired = match self.sessions.get(token) {
            Some(session) => session.is_expired(),
            None => return false,
        };

        if expired {
            self.sessions.remove(token);
            AdminMetrics::set_active_sessions(self.sessions.len());
            tracing::debug!("Rejected expired admin session");
            return false;
        }

        true
    }

    /// End a session. Returns false when the token was unknown.
    pub fn revoke(&self, token: &str) -> bool {
        let removed = self.sessions.remove(token).is_some();
        if removed {
            AdminMetrics::set_active_sessions(self.sessions.len());
            tracing::info!("Admin session revoked");
        }
        removed
    }

    /// Drop every expired session. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        let purged = before.saturating_sub(self.sessions.len());

        AdminMetrics::set_active_sessions(self.sessions.len());
        if purged > 0 {
            tracing::debug!(purged = purged, "Purged expired admin sessions");
        }
        purged
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}
