use serde::{Deserialize, Serialize};

// -- Forum --

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AddPostRequest {
    pub content: String,
}

// -- Players --

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterPlayerRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterPlayerResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PlayerCountResponse {
    pub count: i64,
}

// -- Matches --

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportMatchRequest {
    pub winner_id: i64,
    pub loser_id: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportMatchResponse {
    pub id: i64,
}

// -- Errors --

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_match_rejects_unknown_fields() {
        let raw = r#"{"winner_id": 1, "loser_id": 2, "draw": true}"#;
        assert!(serde_json::from_str::<ReportMatchRequest>(raw).is_err());
    }

    #[test]
    fn register_request_parses() {
        let req: RegisterPlayerRequest = serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        assert_eq!(req.name, "Alice");
    }
}
