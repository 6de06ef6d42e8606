use crate::error::Result;
use crate::options::Options;
use crate::page::NextPage;
use crate::rest::Client;
use serde::{Deserialize, Serialize};

/// A workspace or organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Read-only. Globally unique ID of the object
    #[serde(default)]
    pub gid: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// True for organizations, which group users by email domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_organization: Option<bool>,
}

impl Workspace {
    /// An unexpanded workspace with only its ID set
    pub fn new(gid: impl Into<String>) -> Self {
        Workspace {
            gid: gid.into(),
            ..Default::default()
        }
    }
}

/// A user account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub gid: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A team within an organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub gid: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Client {
    /// Workspaces visible to the authenticated user
    pub fn workspaces(&self, opts: &[&Options]) -> Result<(Vec<Workspace>, Option<NextPage>)> {
        self.trace(format_args!("Listing workspaces"));
        self.get("/workspaces", None::<&()>, opts)
    }

    /// The authenticated user
    pub fn current_user(&self, opts: &[&Options]) -> Result<User> {
        self.trace(format_args!("Loading current user"));
        let (user, _) = self.get("/users/me", None::<&()>, opts)?;
        Ok(user)
    }
}
