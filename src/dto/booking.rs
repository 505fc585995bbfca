use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::validate::{check_uuid, ValidateBody, Violations};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingPayload {
    pub event_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug)]
pub struct BookingDraft {
    pub event_id: Uuid,
    pub user_id: Uuid,
}

impl ValidateBody for BookingPayload {
    type Output = BookingDraft;

    fn check(&self, prefix: &str, violations: &mut Violations) -> Option<BookingDraft> {
        let event_id = check_uuid(violations, prefix, "eventId", &self.event_id);
        let user_id = check_uuid(violations, prefix, "userId", &self.user_id);

        Some(BookingDraft {
            event_id: event_id?,
            user_id: user_id?,
        })
    }
}
