use anyhow::Result;

const MIN_PASSWORD_LEN: usize = 8;

/// Hashes a plaintext password with bcrypt at the default cost.
pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Compares a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, password_hash)?)
}

/// Checks a new password against the portal policy.
///
/// Rules: at least 8 characters, and not equal to the local part of the
/// account email (case-insensitive).
pub fn check_password_policy(password: &str, email: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ));
    }

    let local_part = email.split('@').next().unwrap_or_default();
    if !local_part.is_empty() && password.eq_ignore_ascii_case(local_part) {
        return Err("Password must not match the email address".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_policy_rejects_short_password() {
        assert!(check_password_policy("abc123", "a@b.edu").is_err());
    }

    #[test]
    fn test_policy_rejects_email_local_part() {
        assert!(check_password_policy("asha.rao9", "AshA.Rao9@college.edu").is_err());
    }

    #[test]
    fn test_policy_accepts_reasonable_password() {
        assert!(check_password_policy("tr0ub4dor&3", "asha@college.edu").is_ok());
    }
}
