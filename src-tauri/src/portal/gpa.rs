//! Grade point average over a student's registrations.

use crate::api::types::Registration;

/// Points for a letter grade on the 4-point scale. Unknown letters have none.
pub fn grade_points(grade: &str) -> Option<f64> {
    match grade.trim().to_ascii_uppercase().as_str() {
        "A" => Some(4.0),
        "B" => Some(3.0),
        "C" => Some(2.0),
        "D" => Some(1.0),
        "F" => Some(0.0),
        _ => None,
    }
}

/// Unweighted mean over graded entries. Ungraded entries count in neither
/// the sum nor the count; with nothing graded there is no GPA.
pub fn compute_gpa<'a, I>(grades: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let (total, count) = grades
        .into_iter()
        .filter_map(|g| g.and_then(grade_points))
        .fold((0.0, 0u32), |(total, count), points| (total + points, count + 1));

    if count == 0 {
        None
    } else {
        Some(total / f64::from(count))
    }
}

pub fn registrations_gpa(registrations: &[Registration]) -> Option<f64> {
    compute_gpa(registrations.iter().map(|r| r.grade.as_deref()))
}
