// src/utils.rs
use anyhow::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

/// MIME type for candidate uploads; the backend parses JSON, anything else
/// goes through as opaque bytes.
pub fn upload_content_type(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// `encodeURIComponent` set: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode like `encodeURIComponent`, as UTF-8 `%XX`.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Split a configured shell-style command line into program and arguments.
/// Quoting is not supported; arguments are whitespace separated.
pub fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("candidates.json"), Some("json".to_string()));
        assert_eq!(get_file_extension("job.YAML"), Some("yaml".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("job.yaml", &["yaml", "toml"]).is_ok());
        assert!(validate_file_extension("job.txt", &["yaml", "toml"]).is_err());
        assert!(validate_file_extension("noext", &["yaml"]).is_err());
    }

    #[test]
    fn test_upload_content_type() {
        assert_eq!(upload_content_type("batch.JSON"), "application/json");
        assert_eq!(upload_content_type("resume.bin"), "application/octet-stream");
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("(it's)~ok!*"), "(it's)~ok!*");
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
        assert_eq!(encode_uri_component("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_uri_component("fs/001?x#y"), "fs%2F001%3Fx%23y");
        assert_eq!(encode_uri_component("be-002_v1.2"), "be-002_v1.2");
        assert_eq!(encode_uri_component("日本"), "%E6%97%A5%E6%9C%AC");
    }

    #[test]
    fn test_split_command() {
        assert_eq!(
            split_command("xclip -selection clipboard"),
            Some((
                "xclip".to_string(),
                vec!["-selection".to_string(), "clipboard".to_string()]
            ))
        );
        assert_eq!(split_command("   "), None);
    }
}
