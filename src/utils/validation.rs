use crate::utils::error::{AlertError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> AlertError {
    AlertError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 追蹤 API 的根網址：後面會接上 /positions/... 路徑與 apiKey 查詢參數
pub fn validate_api_base_url(field_name: &str, raw: &str) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| invalid(field_name, raw, format!("Invalid URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            raw,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field_name, raw, "URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            raw,
            "Base URL must not carry a query or fragment",
        ));
    }
    Ok(())
}

pub fn validate_log_directory(field_name: &str, directory: &str) -> Result<()> {
    if directory.trim().is_empty() {
        return Err(invalid(field_name, directory, "Directory cannot be empty"));
    }
    if directory.contains('\0') {
        return Err(invalid(field_name, directory, "Path contains null bytes"));
    }
    Ok(())
}

/// 日誌檔名必須是單一檔名，不能帶目錄
pub fn validate_log_file_name(field_name: &str, name: &str) -> Result<()> {
    let bare = !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if !bare {
        return Err(invalid(
            field_name,
            name,
            "Expected a plain file name (set the directory in log.directory)",
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 也會落在這裡
    if !(value >= min && value <= max) {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_timezone(field_name: &str, name: &str) -> Result<chrono_tz::Tz> {
    name.parse::<chrono_tz::Tz>()
        .map_err(|e| invalid(field_name, name, format!("Unknown IANA timezone: {}", e)))
}
