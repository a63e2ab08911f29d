use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tabs::{AdminTab, StudentTab, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }

    /// Tab shown right after sign-in.
    pub fn landing_tab(&self) -> Tab {
        match self {
            Role::Admin => Tab::Admin(AdminTab::Overview),
            Role::Student => Tab::Student(StudentTab::Offerings),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin row returned by `POST /auth/login/admin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub username: String,
}

/// Student row returned by `POST /auth/login/student`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub reg_no: String,
}

/// The signed-in identity. Only exists in memory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Session {
    Admin {
        identity: AdminIdentity,
        signed_in_at: DateTime<Utc>,
    },
    Student {
        identity: StudentIdentity,
        signed_in_at: DateTime<Utc>,
    },
}

impl Session {
    pub fn admin(identity: AdminIdentity) -> Self {
        Session::Admin {
            identity,
            signed_in_at: Utc::now(),
        }
    }

    pub fn student(identity: StudentIdentity) -> Self {
        Session::Student {
            identity,
            signed_in_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Admin { .. } => Role::Admin,
            Session::Student { .. } => Role::Student,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Session::Admin { identity, .. } => identity.id,
            Session::Student { identity, .. } => identity.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Session::Admin { identity, .. } => &identity.name,
            Session::Student { identity, .. } => &identity.name,
        }
    }
}

/// What the window should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Login,
    AdminDashboard { admin: AdminIdentity },
    StudentPortal { student: StudentIdentity },
}

/// Pick the view for the current session. Absent session always means login.
pub fn route(session: Option<&Session>) -> View {
    match session {
        None => View::Login,
        Some(Session::Admin { identity, .. }) => View::AdminDashboard {
            admin: identity.clone(),
        },
        Some(Session::Student { identity, .. }) => View::StudentPortal {
            student: identity.clone(),
        },
    }
}
