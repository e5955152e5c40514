//! Registration form rules applied before the auth service is called.

const PASSWORD_SPECIALS: &str = "@$!%*#?&";

/// `non-space@non-space.non-space`: some `@` after the first character,
/// then a `.` with at least one character on each side. Whitespace
/// anywhere fails.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = email.char_indices().skip(1).find(|&(_, c)| c == '@').map(|(i, _)| i) else {
        return false;
    };
    let domain = &email[at + 1..];
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i >= 1 && i + 1 < domain.len())
}

/// Letters, digits and `@$!%*#?&` only; at least one of each class; six or more characters.
pub fn is_strong_password(password: &str) -> bool {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    allowed
        && password.chars().count() >= 6
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("lerato@capaciti.org.za"));
        assert!(!is_valid_email("lerato@capaciti"));
        assert!(!is_valid_email("lerato capaciti@x.io"));
        assert!(!is_valid_email("@x.io"));
        assert!(is_valid_email("a@b.c."));
        assert!(is_valid_email("a@@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn password_strength() {
        assert!(is_strong_password("abc12!"));
        assert!(!is_strong_password("abc123"));
        assert!(!is_strong_password("ab1!"));
        assert!(!is_strong_password("abc12!~"));
    }
}
