//! Form payloads sent by mutations, with their client-side checks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PortalError;
use crate::portal::gpa::grade_points;

/// Checks a draft before it is submitted. Failing drafts never reach the network.
pub trait Validate {
    fn validate(&self) -> Result<(), PortalError>;
}

/// Copy of a draft as it goes on the wire, with surrounding whitespace removed
/// from every text field.
pub trait Trim {
    fn trimmed(&self) -> Self;
}

fn trim(value: &str) -> String {
    value.trim().to_string()
}

fn trim_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(label: &str, value: &str) -> Result<(), PortalError> {
    if value.trim().is_empty() {
        return Err(PortalError::Validation(format!("{} is required", label)));
    }
    Ok(())
}

fn selected(label: &str, id: i64) -> Result<(), PortalError> {
    if id <= 0 {
        return Err(PortalError::Validation(format!("Select a {}", label)));
    }
    Ok(())
}

fn positive(label: &str, value: i64) -> Result<(), PortalError> {
    if value <= 0 {
        return Err(PortalError::Validation(format!(
            "{} must be greater than zero",
            label
        )));
    }
    Ok(())
}

fn email(value: &str) -> Result<(), PortalError> {
    let value = value.trim();
    required("Email", value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(PortalError::Validation(format!(
            "'{}' is not a valid email address",
            value
        ))),
    }
}

fn date(label: &str, value: &str) -> Result<NaiveDate, PortalError> {
    required(label, value)?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        PortalError::Validation(format!("{} must be a date (YYYY-MM-DD)", label))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
}

impl Validate for NewDepartment {
    fn validate(&self) -> Result<(), PortalError> {
        required("Department name", &self.name)
    }
}

impl Trim for NewDepartment {
    fn trimmed(&self) -> Self {
        Self {
            name: trim(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub department_id: i64,
    pub credits: i32,
}

impl Validate for NewCourse {
    fn validate(&self) -> Result<(), PortalError> {
        required("Course code", &self.code)?;
        required("Course name", &self.name)?;
        selected("department", self.department_id)?;
        positive("Credits", self.credits.into())
    }
}

impl Trim for NewCourse {
    fn trimmed(&self) -> Self {
        Self {
            code: trim(&self.code),
            name: trim(&self.name),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSemester {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

impl Validate for NewSemester {
    fn validate(&self) -> Result<(), PortalError> {
        required("Semester name", &self.name)?;
        let start = date("Start date", &self.start_date)?;
        let end = date("End date", &self.end_date)?;
        if end < start {
            return Err(PortalError::Validation(
                "End date must not be before start date".to_string(),
            ));
        }
        Ok(())
    }
}

impl Trim for NewSemester {
    fn trimmed(&self) -> Self {
        Self {
            name: trim(&self.name),
            start_date: trim(&self.start_date),
            end_date: trim(&self.end_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOffering {
    pub course_id: i64,
    pub semester_id: i64,
    pub instructor: String,
    pub total_seats: i32,
}

impl Validate for NewOffering {
    fn validate(&self) -> Result<(), PortalError> {
        selected("course", self.course_id)?;
        selected("semester", self.semester_id)?;
        required("Instructor", &self.instructor)?;
        positive("Seats", self.total_seats.into())
    }
}

impl Trim for NewOffering {
    fn trimmed(&self) -> Self {
        Self {
            instructor: trim(&self.instructor),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInstructor {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department_id: Option<i64>,
}

impl Validate for NewInstructor {
    fn validate(&self) -> Result<(), PortalError> {
        required("Instructor name", &self.name)?;
        email(&self.email)?;
        if let Some(id) = self.department_id {
            selected("department", id)?;
        }
        Ok(())
    }
}

impl Trim for NewInstructor {
    fn trimmed(&self) -> Self {
        Self {
            name: trim(&self.name),
            email: trim(&self.email),
            department_id: self.department_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub body: String,
}

impl Validate for NewAnnouncement {
    fn validate(&self) -> Result<(), PortalError> {
        required("Title", &self.title)?;
        required("Message", &self.body)
    }
}

impl Trim for NewAnnouncement {
    fn trimmed(&self) -> Self {
        Self {
            title: trim(&self.title),
            body: trim(&self.body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub student_id: i64,
    pub offering_id: i64,
    pub grade: String,
}

impl Validate for GradeEntry {
    fn validate(&self) -> Result<(), PortalError> {
        selected("student", self.student_id)?;
        selected("offering", self.offering_id)?;
        required("Grade", &self.grade)?;
        if grade_points(&self.grade).is_none() {
            return Err(PortalError::Validation(format!(
                "'{}' is not a grade (use A, B, C, D or F)",
                self.grade.trim()
            )));
        }
        Ok(())
    }
}

/// Grades go out as the upper-case letter.
impl Trim for GradeEntry {
    fn trimmed(&self) -> Self {
        Self {
            grade: self.grade.trim().to_ascii_uppercase(),
            ..self.clone()
        }
    }
}

/// Body of `POST /student/register` and `POST /student/drop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: i64,
    pub offering_id: i64,
}

impl Validate for Enrollment {
    fn validate(&self) -> Result<(), PortalError> {
        selected("offering", self.offering_id)
    }
}

/// Fee payment as entered on the payments tab. The student id comes from the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub amount: f64,
    pub purpose: String,
}

impl Validate for PaymentDraft {
    fn validate(&self) -> Result<(), PortalError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(PortalError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }
        required("Purpose", &self.purpose)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub student_id: i64,
    pub amount: f64,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<(), PortalError> {
        required("Name", &self.name)?;
        email(&self.email)
    }
}

/// Blank optional fields are sent as absent.
impl Trim for ProfileUpdate {
    fn trimmed(&self) -> Self {
        Self {
            name: trim(&self.name),
            email: trim(&self.email),
            phone: trim_optional(&self.phone),
            address: trim_optional(&self.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), PortalError>) -> String {
        match result {
            Err(PortalError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_course_requires_department_and_credits() {
        let mut course = NewCourse {
            code: "CSE101".to_string(),
            name: "Intro".to_string(),
            department_id: 0,
            credits: 3,
        };
        assert_eq!(message(course.validate()), "Select a department");
        course.department_id = 2;
        course.credits = 0;
        assert_eq!(message(course.validate()), "Credits must be greater than zero");
        course.credits = 4;
        assert!(course.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let dept = NewDepartment {
            name: "   ".to_string(),
        };
        assert_eq!(message(dept.validate()), "Department name is required");
    }

    #[test]
    fn test_semester_dates() {
        let mut sem = NewSemester {
            name: "Fall 2025".to_string(),
            start_date: "2025-08-01".to_string(),
            end_date: "2025-07-01".to_string(),
        };
        assert_eq!(
            message(sem.validate()),
            "End date must not be before start date"
        );
        sem.end_date = "Dec 2025".to_string();
        assert_eq!(
            message(sem.validate()),
            "End date must be a date (YYYY-MM-DD)"
        );
        sem.end_date = "2025-12-15".to_string();
        assert!(sem.validate().is_ok());
    }

    #[test]
    fn test_grade_letters() {
        let mut entry = GradeEntry {
            student_id: 1,
            offering_id: 2,
            grade: "b".to_string(),
        };
        assert!(entry.validate().is_ok());
        entry.grade = "E".to_string();
        assert_eq!(
            message(entry.validate()),
            "'E' is not a grade (use A, B, C, D or F)"
        );
    }

    #[test]
    fn test_email_shape() {
        let mut update = ProfileUpdate {
            name: "Asha".to_string(),
            email: "asha-at-uni".to_string(),
            phone: None,
            address: None,
        };
        assert!(update.validate().is_err());
        update.email = "asha@uni.edu".to_string();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_payment_amount() {
        let mut payment = PaymentDraft {
            amount: f64::NAN,
            purpose: "Tuition".to_string(),
        };
        assert!(payment.validate().is_err());
        payment.amount = -5.0;
        assert!(payment.validate().is_err());
        payment.amount = 1200.0;
        assert!(payment.validate().is_ok());
    }
}
