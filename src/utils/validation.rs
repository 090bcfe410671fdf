use crate::utils::error::{PydevError, Result};

/// 容器會自動注入的環境變數，使用者不可自行設定
pub const RESERVED_ENVIRONMENT_KEY: &str = "PYTHONPATH";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid_value(field_name: &str, value: &str, reason: &str) -> PydevError {
    PydevError::config_parse(format!("{field_name} = '{value}': {reason}"))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid_value(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// 容器內路徑必須是 POSIX 絕對路徑
pub fn validate_container_path(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    if !value.starts_with('/') {
        return Err(invalid_value(
            field_name,
            value,
            "Container paths must be absolute",
        ));
    }

    if value.contains('\0') {
        return Err(invalid_value(field_name, value, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_environment_key(key: &str) -> Result<()> {
    if key == RESERVED_ENVIRONMENT_KEY {
        return Err(PydevError::ReservedEnvironmentKey {
            key: key.to_string(),
        });
    }

    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(invalid_value(
            "docker_options.environment",
            key,
            "Environment variable names cannot be empty or contain '='",
        ));
    }

    Ok(())
}
