use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::validate::{
    check_datetime, check_uuid, require_string, ValidateBody, Violations,
};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventPayload {
    pub title: Option<String>,
    pub event_date: Option<String>,
    pub description: Option<String>,
    /// Id of the place hosting the event.
    pub place: Option<String>,
}

#[derive(Debug)]
pub struct EventDraft {
    pub title: String,
    pub event_date: NaiveDateTime,
    pub description: Option<String>,
    pub place_id: Uuid,
}

impl ValidateBody for EventPayload {
    type Output = EventDraft;

    fn check(&self, prefix: &str, violations: &mut Violations) -> Option<EventDraft> {
        let title = require_string(violations, prefix, "title", &self.title);
        let event_date = check_datetime(violations, prefix, "eventDate", &self.event_date);
        let place_id = check_uuid(violations, prefix, "place", &self.place);

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Some(EventDraft {
            title: title?.to_string(),
            event_date: event_date?,
            description,
            place_id: place_id?,
        })
    }
}
