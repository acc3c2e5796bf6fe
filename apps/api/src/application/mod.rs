pub mod bootstrap;
pub mod sign_file;
pub mod upload_file;

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Lifetime of every signed read URL handed out.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(180 * 60);

/// Expiry instant for a signed URL requested now.
pub fn signed_url_expiry() -> DateTime<Utc> {
    Utc::now() + chrono::Duration::seconds(SIGNED_URL_TTL.as_secs() as i64)
}
