use crate::error::{Result, ValidationError};
use crate::options::Options;
use crate::page::NextPage;
use crate::project::Project;
use crate::request::Validate;
use crate::rest::Client;
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// Writable fields of a section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionBase {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Validate for SectionBase {}

/// A subdivision of a project that groups tasks together: a header in list
/// view or a column in board view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub gid: String,

    #[serde(flatten)]
    pub base: SectionBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Read-only. The project which contains the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

/// Move a section relative to another one in a board view.
///
/// Exactly one of `before_section` and `after_section` must be set.
/// Sections cannot be moved between projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionInsertRequest {
    pub section: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_section: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_section: Option<String>,
}

impl Validate for SectionInsertRequest {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.section.is_empty() {
            return Err(ValidationError::new("section is required"));
        }
        match (&self.before_section, &self.after_section) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (None, None) => Err(ValidationError::new(
                "one of before_section or after_section is required",
            )),
            (Some(_), Some(_)) => Err(ValidationError::new(
                "before_section and after_section cannot both be set",
            )),
        }
    }
}

impl Client {
    /// Load the full details of a section
    pub fn fetch_section(&self, gid: &str) -> Result<Section> {
        self.trace(format_args!("Loading section details for {}", gid));
        let (section, _) = self.get(&format!("/sections/{}", gid), None::<&()>, &[])?;
        Ok(section)
    }

    /// One page of the sections in a project
    pub fn sections(
        &self,
        project: &Project,
        opts: &[&Options],
    ) -> Result<(Vec<Section>, Option<NextPage>)> {
        self.trace(format_args!("Listing sections in {:?}", project.base.name));
        self.get(&format!("/projects/{}/sections", project.gid), None::<&()>, opts)
    }

    /// Every section in a project
    pub fn all_sections(&self, project: &Project, opts: &[&Options]) -> Result<Vec<Section>> {
        self.trace(format_args!("Listing all sections in {:?}", project.base.name));
        self.get_all(&format!("/projects/{}/sections", project.gid), None::<&()>, opts)
    }

    /// Create a new section in a project
    pub fn create_section(&self, project: &Project, section: &SectionBase) -> Result<Section> {
        self.info(format_args!("Creating section {:?}", section.name));
        self.post(&format!("/projects/{}/sections", project.gid), section, None)
    }

    /// Reorder sections of a board project
    pub fn insert_section(&self, project: &Project, request: &SectionInsertRequest) -> Result<()> {
        self.info(format_args!("Moving section {}", request.section));
        let _: IgnoredAny = self.post(
            &format!("/projects/{}/sections/insert", project.gid),
            request,
            None,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(before: Option<&str>, after: Option<&str>) -> SectionInsertRequest {
        SectionInsertRequest {
            section: "321".to_string(),
            before_section: before.map(str::to_string),
            after_section: after.map(str::to_string),
        }
    }

    #[test]
    fn test_insert_needs_exactly_one_anchor() {
        assert!(insert(Some("1"), None).validate().is_ok());
        assert!(insert(None, Some("2")).validate().is_ok());
        assert!(insert(None, None).validate().is_err());
        assert!(insert(Some("1"), Some("2")).validate().is_err());
    }

    #[test]
    fn test_insert_serialization() {
        let json = serde_json::to_value(insert(None, Some("2"))).unwrap();
        assert_eq!(json, serde_json::json!({"section": "321", "after_section": "2"}));
    }

    #[test]
    fn test_section_deserialization() {
        let json = r#"{"gid": "987", "name": "Next Actions", "project": {"gid": "1331", "name": "Stuff to buy"}}"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.base.name, "Next Actions");
        assert_eq!(section.project.unwrap().gid, "1331");
    }
}
