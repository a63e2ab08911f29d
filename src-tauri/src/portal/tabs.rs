//! Dashboard tabs and the dataset each one loads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::gpa::registrations_gpa;
use super::role::{Role, Session};
use crate::api::types::{
    Announcement, Course, Department, GradeRecord, HistoryEntry, Instructor, Offering, Payment,
    Profile, Registration, Semester, Stats, TimetableEntry,
};
use crate::api::{AdminCollection, Endpoint, PortalClient};
use crate::error::PortalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    Overview,
    Academic,
    Instructors,
    Announcements,
    Grading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentTab {
    Offerings,
    My,
    History,
    Timetable,
    Announcements,
    Payments,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "tab", rename_all = "lowercase")]
pub enum Tab {
    Admin(AdminTab),
    Student(StudentTab),
}

impl Tab {
    pub fn role(&self) -> Role {
        match self {
            Tab::Admin(_) => Role::Admin,
            Tab::Student(_) => Role::Student,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Admin(tab) => write!(f, "admin/{:?}", tab),
            Tab::Student(tab) => write!(f, "student/{:?}", tab),
        }
    }
}

/// Everything one tab displays, fetched as a whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TabData {
    Overview {
        stats: Stats,
    },
    Academic {
        departments: Vec<Department>,
        courses: Vec<Course>,
        semesters: Vec<Semester>,
        offerings: Vec<Offering>,
    },
    Instructors {
        instructors: Vec<Instructor>,
        departments: Vec<Department>,
    },
    Announcements {
        announcements: Vec<Announcement>,
    },
    Grading {
        records: Vec<GradeRecord>,
    },
    Offerings {
        offerings: Vec<Offering>,
    },
    MyCourses {
        registrations: Vec<Registration>,
        gpa: Option<f64>,
    },
    History {
        entries: Vec<HistoryEntry>,
    },
    Timetable {
        entries: Vec<TimetableEntry>,
    },
    Payments {
        payments: Vec<Payment>,
    },
    Profile {
        profile: Profile,
    },
}

/// Fetch the dataset for `tab`. The tab must belong to the session's role.
///
/// Tabs made of several collections fetch them concurrently and fail as a
/// whole if any part fails.
pub async fn load_tab(
    client: &PortalClient,
    session: &Session,
    tab: Tab,
) -> Result<TabData, PortalError> {
    if tab.role() != session.role() {
        return Err(PortalError::WrongRole(format!("Tab {}", tab)));
    }
    debug!("Loading {} for #{}", tab, session.id());

    let student_id = session.id();
    let data = match tab {
        Tab::Admin(AdminTab::Overview) => TabData::Overview {
            stats: client.fetch(Endpoint::AdminStats).await?,
        },
        Tab::Admin(AdminTab::Academic) => {
            let (departments, courses, semesters, offerings) = tokio::try_join!(
                client.fetch::<Vec<Department>>(Endpoint::Admin(AdminCollection::Departments)),
                client.fetch::<Vec<Course>>(Endpoint::Admin(AdminCollection::Courses)),
                client.fetch::<Vec<Semester>>(Endpoint::Admin(AdminCollection::Semesters)),
                client.fetch::<Vec<Offering>>(Endpoint::Admin(AdminCollection::Offerings)),
            )?;
            TabData::Academic {
                departments,
                courses,
                semesters,
                offerings,
            }
        }
        Tab::Admin(AdminTab::Instructors) => {
            let (instructors, departments) = tokio::try_join!(
                client.fetch::<Vec<Instructor>>(Endpoint::Admin(AdminCollection::Instructors)),
                client.fetch::<Vec<Department>>(Endpoint::Admin(AdminCollection::Departments)),
            )?;
            TabData::Instructors {
                instructors,
                departments,
            }
        }
        Tab::Admin(AdminTab::Announcements) => TabData::Announcements {
            announcements: client
                .fetch(Endpoint::Admin(AdminCollection::Announcements))
                .await?,
        },
        Tab::Admin(AdminTab::Grading) => TabData::Grading {
            records: client.fetch(Endpoint::Admin(AdminCollection::Grades)).await?,
        },
        Tab::Student(StudentTab::Offerings) => TabData::Offerings {
            offerings: client.fetch(Endpoint::Offerings).await?,
        },
        Tab::Student(StudentTab::My) => {
            let registrations: Vec<Registration> =
                client.fetch(Endpoint::MyCourses(student_id)).await?;
            let gpa = registrations_gpa(&registrations);
            TabData::MyCourses { registrations, gpa }
        }
        Tab::Student(StudentTab::History) => TabData::History {
            entries: client.fetch(Endpoint::History(student_id)).await?,
        },
        Tab::Student(StudentTab::Timetable) => TabData::Timetable {
            entries: client.fetch(Endpoint::Timetable(student_id)).await?,
        },
        Tab::Student(StudentTab::Announcements) => TabData::Announcements {
            announcements: client.fetch(Endpoint::Announcements).await?,
        },
        Tab::Student(StudentTab::Payments) => TabData::Payments {
            payments: client.fetch(Endpoint::StudentPayments(student_id)).await?,
        },
        Tab::Student(StudentTab::Profile) => TabData::Profile {
            profile: client.fetch(Endpoint::Profile(student_id)).await?,
        },
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_wire_format() {
        let tab: Tab = serde_json::from_str(r#"{"role": "student", "tab": "my"}"#).unwrap();
        assert_eq!(tab, Tab::Student(StudentTab::My));
        assert_eq!(
            serde_json::to_value(Tab::Admin(AdminTab::Grading)).unwrap(),
            serde_json::json!({"role": "admin", "tab": "grading"})
        );
    }

    #[test]
    fn test_tab_role() {
        assert_eq!(Tab::Admin(AdminTab::Announcements).role(), Role::Admin);
        assert_eq!(Tab::Student(StudentTab::Announcements).role(), Role::Student);
    }
}
