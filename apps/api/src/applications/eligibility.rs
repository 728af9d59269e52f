use chrono::NaiveDate;

use crate::models::job::JobRow;

/// Server-side gate for `POST /jobs/:id/applications`. The SPA greys out
/// ineligible postings, but the API is the authority.
///
/// Returns the first failing rule as a message suitable for a 422.
pub fn check_eligibility(
    job: &JobRow,
    student_branch: &str,
    student_cgpa: f64,
    today: NaiveDate,
) -> Result<(), String> {
    if !job.is_open() {
        return Err("This posting is closed".to_string());
    }
    if today > job.deadline {
        return Err("The application deadline has passed".to_string());
    }
    if !job.eligible_branches.iter().any(|b| b == student_branch) {
        return Err(format!(
            "Branch {student_branch} is not eligible for this posting"
        ));
    }
    if student_cgpa < job.min_cgpa {
        return Err(format!(
            "CGPA {student_cgpa:.2} is below the required minimum {:.2}",
            job.min_cgpa
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn job() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Backend Intern".to_string(),
            company: "Nimbus Systems".to_string(),
            description: "Six month internship".to_string(),
            location: "Remote".to_string(),
            package: 4.2,
            eligible_branches: vec!["CSE".to_string(), "ECE".to_string()],
            min_cgpa: 6.5,
            deadline: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            status: "open".to_string(),
            posted_by: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn before_deadline() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
    }

    #[test]
    fn test_eligible_student_passes() {
        assert!(check_eligibility(&job(), "CSE", 7.1, before_deadline()).is_ok());
    }

    #[test]
    fn test_deadline_day_still_accepts() {
        let j = job();
        assert!(check_eligibility(&j, "CSE", 7.1, j.deadline).is_ok());
    }

    #[test]
    fn test_closed_job_rejects() {
        let mut j = job();
        j.status = "closed".to_string();
        let err = check_eligibility(&j, "CSE", 7.1, before_deadline()).unwrap_err();
        assert!(err.contains("closed"));
    }

    #[test]
    fn test_past_deadline_rejects() {
        let late = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let err = check_eligibility(&job(), "CSE", 7.1, late).unwrap_err();
        assert!(err.contains("deadline"));
    }

    #[test]
    fn test_wrong_branch_rejects() {
        let err = check_eligibility(&job(), "CIVIL", 9.0, before_deadline()).unwrap_err();
        assert!(err.contains("CIVIL"));
    }

    #[test]
    fn test_low_cgpa_rejects() {
        let err = check_eligibility(&job(), "ECE", 6.49, before_deadline()).unwrap_err();
        assert!(err.contains("minimum"));
    }
}
