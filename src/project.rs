use crate::date::Date;
use crate::error::{Result, ValidationError};
use crate::options::Options;
use crate::page::NextPage;
use crate::request::Validate;
use crate::rest::Client;
use crate::workspace::{Team, User, Workspace};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A description of the project's status: a color (green, yellow or red)
/// and a short text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

/// Project layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Board,
    List,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The parts of a project that can be written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectBase {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<ProjectStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_on: Option<Date>,

    /// Archived projects are hidden in the UI by default
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub public: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html_notes: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
}

/// Body of a create-project call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateProjectRequest {
    #[serde(flatten)]
    pub base: ProjectBase,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub workspace: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub team: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
}

impl Validate for CreateProjectRequest {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.workspace.is_empty() && self.team.is_empty() {
            return Err(ValidationError::new("a workspace or team is required to create a project"));
        }
        Ok(())
    }
}

/// A prioritized list of tasks, living in one workspace and shared with
/// one team in organizations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Read-only. Globally unique ID of the object
    #[serde(default)]
    pub gid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,

    #[serde(flatten)]
    pub base: ProjectBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Does not reflect changes to associations such as tasks or comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Workspace>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub followers: Vec<User>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
}

impl Client {
    /// Load the full details of a project
    pub fn fetch_project(&self, gid: &str, opts: &[&Options]) -> Result<Project> {
        self.trace(format_args!("Loading project details for {}", gid));
        let (project, _) = self.get(&format!("/projects/{}", gid), None::<&()>, opts)?;
        Ok(project)
    }

    /// One page of the projects in a workspace
    pub fn projects(
        &self,
        workspace: &Workspace,
        opts: &[&Options],
    ) -> Result<(Vec<Project>, Option<NextPage>)> {
        self.trace(format_args!("Listing projects in {:?}", workspace.name));
        self.get(&format!("/workspaces/{}/projects", workspace.gid), None::<&()>, opts)
    }

    /// Every project in a workspace, paging until the listing is exhausted
    pub fn all_projects(&self, workspace: &Workspace, opts: &[&Options]) -> Result<Vec<Project>> {
        self.trace(format_args!("Listing all projects in {:?}", workspace.name));
        self.get_all(&format!("/workspaces/{}/projects", workspace.gid), None::<&()>, opts)
    }

    /// Add a new project to a workspace or team
    pub fn create_project(&self, project: &CreateProjectRequest) -> Result<Project> {
        self.info(format_args!("Creating project {:?}", project.base.name));
        self.post("/projects", project, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_deserialization() {
        let json = r#"{
            "gid": "1331",
            "name": "Stuff to buy",
            "archived": false,
            "due_date": "2019-09-15",
            "layout": "board",
            "created_at": "2012-02-22T02:06:58.147Z",
            "owner": {"gid": "12345", "name": "Greg Sanchez"},
            "workspace": {"gid": "678", "name": "My Company Workspace"},
            "members": [{"gid": "12345"}]
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.gid, "1331");
        assert_eq!(project.base.name, "Stuff to buy");
        assert_eq!(project.base.layout, Some(Layout::Board));
        assert_eq!(project.base.due_date, Date::from_ymd(2019, 9, 15));
        assert_eq!(project.workspace.unwrap().gid, "678");
        assert_eq!(project.members.len(), 1);
    }

    #[test]
    fn test_create_request_serialization() {
        let request = CreateProjectRequest {
            base: ProjectBase {
                name: "Launch".to_string(),
                public: true,
                ..Default::default()
            },
            workspace: "678".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Launch", "public": true, "workspace": "678"})
        );
    }

    #[test]
    fn test_create_request_needs_workspace_or_team() {
        let mut request = CreateProjectRequest::default();
        assert!(request.validate().is_err());

        request.team = "42".to_string();
        assert!(request.validate().is_ok());
    }
}
