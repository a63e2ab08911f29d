use crate::portal::Role;

/// Admin collections that share the `GET/POST /admin/{name}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCollection {
    Departments,
    Courses,
    Semesters,
    Offerings,
    Instructors,
    Announcements,
    Grades,
}

impl AdminCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminCollection::Departments => "departments",
            AdminCollection::Courses => "courses",
            AdminCollection::Semesters => "semesters",
            AdminCollection::Offerings => "offerings",
            AdminCollection::Instructors => "instructors",
            AdminCollection::Announcements => "announcements",
            AdminCollection::Grades => "grades",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login(Role),
    AdminStats,
    Admin(AdminCollection),
    Offerings,
    Register,
    Drop,
    MyCourses(i64),
    History(i64),
    Timetable(i64),
    Profile(i64),
    Payments,
    StudentPayments(i64),
    Announcements,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login(role) => format!("/auth/login/{}", role.as_str()),
            Endpoint::AdminStats => "/admin/stats".to_string(),
            Endpoint::Admin(collection) => format!("/admin/{}", collection.as_str()),
            Endpoint::Offerings => "/student/offerings".to_string(),
            Endpoint::Register => "/student/register".to_string(),
            Endpoint::Drop => "/student/drop".to_string(),
            Endpoint::MyCourses(id) => format!("/student/my-courses/{}", id),
            Endpoint::History(id) => format!("/student/history/{}", id),
            Endpoint::Timetable(id) => format!("/student/timetable/{}", id),
            Endpoint::Profile(id) => format!("/student/profile/{}", id),
            Endpoint::Payments => "/student/payments".to_string(),
            Endpoint::StudentPayments(id) => format!("/student/payments/{}", id),
            Endpoint::Announcements => "/announcements".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::Login(Role::Admin).path(), "/auth/login/admin");
        assert_eq!(Endpoint::Login(Role::Student).path(), "/auth/login/student");
        assert_eq!(
            Endpoint::Admin(AdminCollection::Grades).path(),
            "/admin/grades"
        );
        assert_eq!(Endpoint::MyCourses(12).path(), "/student/my-courses/12");
        assert_eq!(Endpoint::StudentPayments(3).path(), "/student/payments/3");
        assert_eq!(Endpoint::Payments.path(), "/student/payments");
    }
}
