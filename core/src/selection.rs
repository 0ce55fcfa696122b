//! Pure helpers that pick reviewer data out of raw API responses.

use serde_json::Value;

use crate::types::{ProjectLanguage, ProjectSelection};

const CERTIFIED: &str = "certified";

/// Project ids of certification records whose `status` is `certified`,
/// in response order. Anything that is not a list yields nothing.
pub fn certified_project_ids(certifications: &Value) -> Vec<u64> {
    let Some(records) = certifications.as_array() else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|record| record.get("status").and_then(Value::as_str) == Some(CERTIFIED))
        .filter_map(|record| record.get("project_id").and_then(Value::as_u64))
        .collect()
}

/// Language codes under `application.languages` in a reviewer profile.
pub fn language_codes(profile: &Value) -> Vec<String> {
    profile
        .pointer("/application/languages")
        .and_then(Value::as_array)
        .map(|languages| {
            languages
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Every project paired with every language, project-major.
pub fn projects_with_languages(project_ids: &[u64], languages: &[String]) -> ProjectSelection {
    let projects = project_ids
        .iter()
        .flat_map(|&project_id| {
            languages.iter().map(move |language| ProjectLanguage {
                project_id,
                language: language.clone(),
            })
        })
        .collect();
    ProjectSelection { projects }
}
