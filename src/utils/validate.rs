use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

/// 姓名最大长度（字符数）
pub const MAX_NAME_LEN: usize = 50;

/// 标题最大长度（字符数）
pub const MAX_TITLE_LEN: usize = 200;

/// 去除首尾空白后要求非空，返回规范化后的文本
pub fn required_text(value: &str, message: &'static str) -> Result<String, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(message)
    } else {
        Ok(trimmed.to_string())
    }
}

/// 可选文本：未提供时保持 None，提供时按 [`required_text`] 校验
pub fn optional_text(
    value: Option<String>,
    message: &'static str,
) -> Result<Option<String>, &'static str> {
    value.map(|v| required_text(&v, message)).transpose()
}

pub fn validate_title(title: &str) -> Result<(), &'static str> {
    if title.chars().count() > MAX_TITLE_LEN {
        return Err("Title must be at most 200 characters");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err("Name is required");
    }
    if len > MAX_NAME_LEN {
        return Err("Name must be at most 50 characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = ["password1", "qwerty123", "abcd1234", "teacher1", "student1"];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(
            required_text("  Essay  ", "Title is required"),
            Ok("Essay".to_string())
        );
        assert_eq!(
            required_text(" \n\t ", "Title is required"),
            Err("Title is required")
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None, "Title cannot be empty"), Ok(None));
        assert_eq!(
            optional_text(Some(" x ".to_string()), "Title cannot be empty"),
            Ok(Some("x".to_string()))
        );
        assert_eq!(
            optional_text(Some("   ".to_string()), "Title cannot be empty"),
            Err("Title cannot be empty")
        );
    }

    #[test]
    fn test_title_length() {
        assert!(validate_title(&"a".repeat(200)).is_ok());
        assert!(validate_title(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert_eq!(validate_name("   "), Err("Name is required"));
        assert!(validate_name(&"n".repeat(51)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_password_rules() {
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
