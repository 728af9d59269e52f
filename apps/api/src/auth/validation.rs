//! Field-level checks for registration payloads. Handlers compose these and
//! surface the first failure as a 400.

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name must not be empty".to_string());
    }
    Ok(())
}

/// Accepts `local@domain.tld` shapes without attempting full RFC parsing.
pub fn validate_email(email: &str) -> Result<(), String> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Email must contain '@'".to_string());
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("Email address is not valid".to_string());
    }
    Ok(())
}

pub fn validate_branch(branch: &str) -> Result<(), String> {
    if branch.trim().is_empty() {
        return Err("Branch must not be empty".to_string());
    }
    Ok(())
}

pub fn validate_graduation_year(year: i32) -> Result<(), String> {
    if !(2000..=2100).contains(&year) {
        return Err("Graduation year must be between 2000 and 2100".to_string());
    }
    Ok(())
}

pub fn validate_cgpa(cgpa: f64) -> Result<(), String> {
    if !(0.0..=10.0).contains(&cgpa) {
        return Err("CGPA must be between 0 and 10".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_name() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Asha Rao").is_ok());
    }

    #[test]
    fn test_email_requires_at_and_domain_dot() {
        assert!(validate_email("asha.college.edu").is_err());
        assert!(validate_email("@college.edu").is_err());
        assert!(validate_email("asha@college").is_err());
        assert!(validate_email("asha@college.edu").is_ok());
    }

    #[test]
    fn test_graduation_year_bounds() {
        assert!(validate_graduation_year(1999).is_err());
        assert!(validate_graduation_year(2101).is_err());
        assert!(validate_graduation_year(2026).is_ok());
    }

    #[test]
    fn test_cgpa_bounds() {
        assert!(validate_cgpa(-0.1).is_err());
        assert!(validate_cgpa(10.1).is_err());
        assert!(validate_cgpa(0.0).is_ok());
        assert!(validate_cgpa(8.72).is_ok());
    }

    #[test]
    fn test_branch_must_be_present() {
        assert!(validate_branch("").is_err());
        assert!(validate_branch("CSE").is_ok());
    }
}
