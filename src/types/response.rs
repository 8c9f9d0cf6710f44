use serde::{Deserialize, Serialize};

// ===== Backend Response Types =====

/// Body of `GET /api/tests/psychological/user/{id}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DiscTestsResponse {
    #[serde(default)]
    pub tests: Vec<serde_json::Value>,
}

impl DiscTestsResponse {
    pub fn has_completed_test(&self) -> bool {
        !self.tests.is_empty()
    }
}
