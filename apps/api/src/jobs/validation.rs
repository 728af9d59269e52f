use chrono::NaiveDate;
use serde::Deserialize;

/// Fields shared by job create and update requests.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPayload {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    /// Annual package in lakhs per annum.
    pub package: f64,
    pub eligible_branches: Vec<String>,
    pub min_cgpa: f64,
    pub deadline: NaiveDate,
}

/// Validates a posting payload. `allow_past_deadline` applies when a posting
/// is being closed, where an already-elapsed deadline is legitimate.
pub fn validate_job_payload(
    payload: &JobPayload,
    today: NaiveDate,
    allow_past_deadline: bool,
) -> Result<(), String> {
    if payload.title.trim().is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if payload.company.trim().is_empty() {
        return Err("Company must not be empty".to_string());
    }
    if payload.description.trim().is_empty() {
        return Err("Description must not be empty".to_string());
    }
    if payload.package <= 0.0 {
        return Err("Package must be greater than zero".to_string());
    }
    if !(0.0..=10.0).contains(&payload.min_cgpa) {
        return Err("Minimum CGPA must be between 0 and 10".to_string());
    }
    if payload.eligible_branches.is_empty()
        || payload.eligible_branches.iter().any(|b| b.trim().is_empty())
    {
        return Err("At least one eligible branch is required".to_string());
    }
    if !allow_past_deadline && payload.deadline < today {
        return Err("Deadline must not be in the past".to_string());
    }
    Ok(())
}

pub fn validate_job_status(status: &str) -> Result<(), String> {
    match status {
        "open" | "closed" => Ok(()),
        other => Err(format!("Unknown job status '{other}' (expected open or closed)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> JobPayload {
        JobPayload {
            title: "Graduate Engineer Trainee".to_string(),
            company: "Cognivant".to_string(),
            description: "Campus drive for the 2026 batch".to_string(),
            location: "Pune".to_string(),
            package: 6.5,
            eligible_branches: vec!["CSE".to_string(), "IT".to_string()],
            min_cgpa: 7.0,
            deadline: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(validate_job_payload(&payload(), today(), false).is_ok());
    }

    #[test]
    fn test_rejects_blank_title() {
        let mut p = payload();
        p.title = "  ".to_string();
        assert!(validate_job_payload(&p, today(), false).is_err());
    }

    #[test]
    fn test_rejects_zero_package() {
        let mut p = payload();
        p.package = 0.0;
        assert!(validate_job_payload(&p, today(), false).is_err());
    }

    #[test]
    fn test_rejects_empty_branch_list() {
        let mut p = payload();
        p.eligible_branches.clear();
        assert!(validate_job_payload(&p, today(), false).is_err());
    }

    #[test]
    fn test_rejects_blank_branch_entry() {
        let mut p = payload();
        p.eligible_branches = vec!["CSE".to_string(), "".to_string()];
        assert!(validate_job_payload(&p, today(), false).is_err());
    }

    #[test]
    fn test_rejects_past_deadline_on_create() {
        let mut p = payload();
        p.deadline = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert!(validate_job_payload(&p, today(), false).is_err());
    }

    #[test]
    fn test_allows_past_deadline_when_closing() {
        let mut p = payload();
        p.deadline = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert!(validate_job_payload(&p, today(), true).is_ok());
    }

    #[test]
    fn test_status_values() {
        assert!(validate_job_status("open").is_ok());
        assert!(validate_job_status("closed").is_ok());
        assert!(validate_job_status("paused").is_err());
    }
}
