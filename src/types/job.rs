// src/types/job.rs
use serde::{Deserialize, Serialize};

/// Job record the interview is opened for. Unknown fields are carried along
/// so the interview page receives the record exactly as listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: serde_json::Value,
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(default, alias = "empresa", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobPosting {
    pub fn new(id: impl Into<serde_json::Value>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company: None,
            location: None,
            description: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}
