//! Role-tagged write commands issued from the dashboards.

use serde::{Deserialize, Serialize};

use super::role::{Role, Session};
use crate::api::drafts::{
    Enrollment, GradeEntry, NewAnnouncement, NewCourse, NewDepartment, NewInstructor,
    NewOffering, NewSemester, PaymentDraft, PaymentRequest, ProfileUpdate, Trim, Validate,
};
use crate::api::{AdminCollection, ApiRequest, Endpoint};
use crate::error::PortalError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AdminMutation {
    CreateDepartment(NewDepartment),
    CreateCourse(NewCourse),
    CreateSemester(NewSemester),
    CreateOffering(NewOffering),
    CreateInstructor(NewInstructor),
    PostAnnouncement(NewAnnouncement),
    SubmitGrade(GradeEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StudentMutation {
    Register { offering_id: i64 },
    Drop { offering_id: i64 },
    Pay(PaymentDraft),
    UpdateProfile(ProfileUpdate),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "command", rename_all = "lowercase")]
pub enum Mutation {
    Admin(AdminMutation),
    Student(StudentMutation),
}

impl Mutation {
    pub fn role(&self) -> Role {
        match self {
            Mutation::Admin(_) => Role::Admin,
            Mutation::Student(_) => Role::Student,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mutation::Admin(AdminMutation::CreateDepartment(_)) => "create_department",
            Mutation::Admin(AdminMutation::CreateCourse(_)) => "create_course",
            Mutation::Admin(AdminMutation::CreateSemester(_)) => "create_semester",
            Mutation::Admin(AdminMutation::CreateOffering(_)) => "create_offering",
            Mutation::Admin(AdminMutation::CreateInstructor(_)) => "create_instructor",
            Mutation::Admin(AdminMutation::PostAnnouncement(_)) => "post_announcement",
            Mutation::Admin(AdminMutation::SubmitGrade(_)) => "submit_grade",
            Mutation::Student(StudentMutation::Register { .. }) => "register",
            Mutation::Student(StudentMutation::Drop { .. }) => "drop",
            Mutation::Student(StudentMutation::Pay(_)) => "pay",
            Mutation::Student(StudentMutation::UpdateProfile(_)) => "update_profile",
        }
    }

    /// Toast shown after the backend accepts the command.
    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::Admin(AdminMutation::CreateDepartment(_)) => "Department Added",
            Mutation::Admin(AdminMutation::CreateCourse(_)) => "Course Created",
            Mutation::Admin(AdminMutation::CreateSemester(_)) => "Semester Created",
            Mutation::Admin(AdminMutation::CreateOffering(_)) => "Offering Opened",
            Mutation::Admin(AdminMutation::CreateInstructor(_)) => "Instructor Added",
            Mutation::Admin(AdminMutation::PostAnnouncement(_)) => "Announcement Posted",
            Mutation::Admin(AdminMutation::SubmitGrade(_)) => "Grade Recorded",
            Mutation::Student(StudentMutation::Register { .. }) => "Registration Successful!",
            Mutation::Student(StudentMutation::Drop { .. }) => "Course Dropped",
            Mutation::Student(StudentMutation::Pay(_)) => "Payment Recorded",
            Mutation::Student(StudentMutation::UpdateProfile(_)) => "Profile Updated",
        }
    }

    /// Message used when the backend rejects the command without saying why.
    pub fn failure_fallback(&self) -> &'static str {
        match self {
            Mutation::Admin(_) => "Action failed",
            Mutation::Student(StudentMutation::Register { .. }) => "Registration failed",
            Mutation::Student(StudentMutation::Drop { .. }) => "Drop failed",
            Mutation::Student(StudentMutation::Pay(_)) => "Payment failed",
            Mutation::Student(StudentMutation::UpdateProfile(_)) => "Profile update failed",
        }
    }

    /// Validate the draft and build the request for `session`.
    ///
    /// Fails without building anything if the command is for the other role
    /// or the draft is incomplete.
    pub fn to_request(&self, session: &Session) -> Result<ApiRequest, PortalError> {
        if self.role() != session.role() {
            return Err(PortalError::WrongRole(format!("Action '{}'", self.label())));
        }
        let student_id = session.id();

        let request = match self {
            Mutation::Admin(admin) => match admin {
                AdminMutation::CreateDepartment(d) => {
                    admin_post(AdminCollection::Departments, d)?
                }
                AdminMutation::CreateCourse(c) => admin_post(AdminCollection::Courses, c)?,
                AdminMutation::CreateSemester(s) => admin_post(AdminCollection::Semesters, s)?,
                AdminMutation::CreateOffering(o) => admin_post(AdminCollection::Offerings, o)?,
                AdminMutation::CreateInstructor(i) => {
                    admin_post(AdminCollection::Instructors, i)?
                }
                AdminMutation::PostAnnouncement(a) => {
                    admin_post(AdminCollection::Announcements, a)?
                }
                AdminMutation::SubmitGrade(g) => admin_post(AdminCollection::Grades, g)?,
            },
            Mutation::Student(student) => match student {
                StudentMutation::Register { offering_id } => {
                    enrollment(Endpoint::Register, student_id, *offering_id)?
                }
                StudentMutation::Drop { offering_id } => {
                    enrollment(Endpoint::Drop, student_id, *offering_id)?
                }
                StudentMutation::Pay(draft) => {
                    draft.validate()?;
                    let body = PaymentRequest {
                        student_id,
                        amount: draft.amount,
                        purpose: draft.purpose.trim().to_string(),
                    };
                    ApiRequest::post(Endpoint::Payments.path(), serde_json::to_value(body)?)
                }
                StudentMutation::UpdateProfile(update) => {
                    update.validate()?;
                    ApiRequest::put(
                        Endpoint::Profile(student_id).path(),
                        serde_json::to_value(update.trimmed())?,
                    )
                }
            },
        };
        Ok(request)
    }
}

fn admin_post<T: Validate + Trim + Serialize>(
    collection: AdminCollection,
    draft: &T,
) -> Result<ApiRequest, PortalError> {
    draft.validate()?;
    Ok(ApiRequest::post(
        Endpoint::Admin(collection).path(),
        serde_json::to_value(draft.trimmed())?,
    ))
}

fn enrollment(
    endpoint: Endpoint,
    student_id: i64,
    offering_id: i64,
) -> Result<ApiRequest, PortalError> {
    let body = Enrollment {
        student_id,
        offering_id,
    };
    body.validate()?;
    Ok(ApiRequest::post(endpoint.path(), serde_json::to_value(body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::portal::role::{AdminIdentity, StudentIdentity};

    fn student() -> Session {
        Session::student(StudentIdentity {
            id: 7,
            name: "Asha".to_string(),
            email: None,
            reg_no: "2024CS01".to_string(),
        })
    }

    fn admin() -> Session {
        Session::admin(AdminIdentity {
            id: 1,
            name: "Registrar".to_string(),
            username: "admin".to_string(),
        })
    }

    #[test]
    fn test_register_uses_session_student_id() {
        let m = Mutation::Student(StudentMutation::Register { offering_id: 9 });
        let req = m.to_request(&student()).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/student/register");
        assert_eq!(
            req.body,
            Some(serde_json::json!({"student_id": 7, "offering_id": 9}))
        );
    }

    #[test]
    fn test_profile_update_is_put() {
        let m = Mutation::Student(StudentMutation::UpdateProfile(ProfileUpdate {
            name: "Asha R".to_string(),
            email: "asha@uni.edu".to_string(),
            phone: Some("555-0101".to_string()),
            address: None,
        }));
        let req = m.to_request(&student()).unwrap();
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.path, "/student/profile/7");
    }

    #[test]
    fn test_payment_body() {
        let m = Mutation::Student(StudentMutation::Pay(PaymentDraft {
            amount: 250.0,
            purpose: " Library fee ".to_string(),
        }));
        let req = m.to_request(&student()).unwrap();
        assert_eq!(req.path, "/student/payments");
        assert_eq!(
            req.body,
            Some(serde_json::json!({"student_id": 7, "amount": 250.0, "purpose": "Library fee"}))
        );
    }

    #[test]
    fn test_admin_payloads_are_trimmed() {
        let m = Mutation::Admin(AdminMutation::CreateDepartment(NewDepartment {
            name: "  Physics  ".to_string(),
        }));
        let req = m.to_request(&admin()).unwrap();
        assert_eq!(req.body, Some(serde_json::json!({"name": "Physics"})));

        let m = Mutation::Admin(AdminMutation::SubmitGrade(GradeEntry {
            student_id: 7,
            offering_id: 4,
            grade: " a ".to_string(),
        }));
        let req = m.to_request(&admin()).unwrap();
        assert_eq!(req.path, "/admin/grades");
        assert_eq!(
            req.body,
            Some(serde_json::json!({"student_id": 7, "offering_id": 4, "grade": "A"}))
        );
    }

    #[test]
    fn test_profile_blank_optionals_are_dropped() {
        let m = Mutation::Student(StudentMutation::UpdateProfile(ProfileUpdate {
            name: " Asha R ".to_string(),
            email: "asha@uni.edu ".to_string(),
            phone: Some("   ".to_string()),
            address: Some(" 12 Hill Rd ".to_string()),
        }));
        let req = m.to_request(&student()).unwrap();
        assert_eq!(
            req.body,
            Some(serde_json::json!({
                "name": "Asha R",
                "email": "asha@uni.edu",
                "phone": null,
                "address": "12 Hill Rd"
            }))
        );
    }

    #[test]
    fn test_wrong_role_rejected() {
        let m = Mutation::Admin(AdminMutation::CreateDepartment(NewDepartment {
            name: "Physics".to_string(),
        }));
        assert!(matches!(
            m.to_request(&student()),
            Err(PortalError::WrongRole(_))
        ));
        assert_eq!(m.to_request(&admin()).unwrap().path, "/admin/departments");
    }

    #[test]
    fn test_invalid_draft_rejected() {
        let m = Mutation::Admin(AdminMutation::CreateOffering(NewOffering {
            course_id: 3,
            semester_id: 1,
            instructor: "".to_string(),
            total_seats: 30,
        }));
        assert!(matches!(
            m.to_request(&admin()),
            Err(PortalError::Validation(_))
        ));
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"role": "student", "command": {"action": "drop", "offering_id": 4}}"#;
        let m: Mutation = serde_json::from_str(json).unwrap();
        assert_eq!(m, Mutation::Student(StudentMutation::Drop { offering_id: 4 }));
        assert_eq!(m.failure_fallback(), "Drop failed");

        let json = r#"{"role": "admin", "command": {"action": "create_department", "name": "Math"}}"#;
        let m: Mutation = serde_json::from_str(json).unwrap();
        assert_eq!(m.success_message(), "Department Added");
    }
}
