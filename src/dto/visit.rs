use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::validate::{check_datetime_opt, check_uuid, ValidateBody, Violations};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VisitPayload {
    pub user_id: Option<String>,
    pub place_id: Option<String>,
    pub visit_date: Option<String>,
}

#[derive(Debug)]
pub struct VisitDraft {
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub visit_date: Option<NaiveDateTime>,
}

impl ValidateBody for VisitPayload {
    type Output = VisitDraft;

    fn check(&self, prefix: &str, violations: &mut Violations) -> Option<VisitDraft> {
        let user_id = check_uuid(violations, prefix, "userId", &self.user_id);
        let place_id = check_uuid(violations, prefix, "placeId", &self.place_id);
        let visit_date = check_datetime_opt(violations, prefix, "visitDate", &self.visit_date);

        Some(VisitDraft {
            user_id: user_id?,
            place_id: place_id?,
            visit_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::{parse_payload, validate_body};
    use serde_json::json;

    #[test]
    fn visit_date_is_optional_but_must_parse_when_present() {
        let payload: VisitPayload = parse_payload(json!({
            "userId": Uuid::new_v4().to_string(),
            "placeId": Uuid::new_v4().to_string()
        }))
        .unwrap();
        assert!(validate_body(&payload).unwrap().visit_date.is_none());

        let payload: VisitPayload = parse_payload(json!({
            "userId": Uuid::new_v4().to_string(),
            "placeId": Uuid::new_v4().to_string(),
            "visitDate": "not-a-date"
        }))
        .unwrap();
        let message = validate_body(&payload).unwrap_err().to_string();
        assert_eq!(message, "visitDate must be a valid RFC 3339 date-time");
    }
}
