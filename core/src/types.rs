//! Request payload types.
//!
//! Responses stay as `serde_json::Value`; only the review-request payload
//! has a fixed shape worth naming.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One project/language pair a reviewer is willing to take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLanguage {
    pub project_id: u64,
    pub language: String,
}

/// Body of a new submission request: `{"projects": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSelection {
    pub projects: Vec<ProjectLanguage>,
}

impl ProjectSelection {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// JSON form suitable for `ReviewsClient::request_reviews`.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
