//! Access Log Entity
//!
//! Append-only audit record written on every successful resolution.

use auth::models::UserId;
use chrono::Utc;
use platform::client::ClientInfo;

use crate::domain::value_object::mapping_id::AccessLogId;

#[derive(Debug, Clone)]
pub struct AccessLog {
    pub id: AccessLogId,
    pub user_id: UserId,
    pub domain: String,
    pub drive_url: String,
    /// Unix seconds
    pub timestamp: i64,
    pub ip_address: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct NewAccessLog {
    pub user_id: UserId,
    pub domain: String,
    pub drive_url: String,
    pub timestamp: i64,
    pub ip_address: String,
    pub user_agent: String,
}

impl NewAccessLog {
    pub fn now(user_id: UserId, domain: String, drive_url: String, client: ClientInfo) -> Self {
        Self {
            user_id,
            domain,
            drive_url,
            timestamp: Utc::now().timestamp(),
            ip_address: client.ip,
            user_agent: client.user_agent,
        }
    }

    pub fn into_log(self, id: AccessLogId) -> AccessLog {
        AccessLog {
            id,
            user_id: self.user_id,
            domain: self.domain,
            drive_url: self.drive_url,
            timestamp: self.timestamp,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
        }
    }
}
