use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_to_local_service() {
    let settings = resolve_settings(None, no_env).expect("settings");
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.api_base_url, "http://localhost:8000/api/v1");
}

#[test]
fn file_value_is_used_and_trailing_slash_trimmed() {
    let settings = resolve_settings(
        Some(r#"api_base_url = "https://routines.example.com/api/v1/""#),
        no_env,
    )
    .expect("settings");
    assert_eq!(settings.api_base_url, "https://routines.example.com/api/v1");
}

#[test]
fn environment_overrides_file_and_app_prefix_wins() {
    let env = |key: &str| match key {
        "API_BASE_URL" => Some("http://10.0.0.2:8000/api/v1".to_string()),
        "APP__API_BASE_URL" => Some("http://10.0.0.3:8000/api/v1".to_string()),
        _ => None,
    };
    let settings = resolve_settings(
        Some(r#"api_base_url = "http://file-host/api/v1""#),
        env,
    )
    .expect("settings");
    assert_eq!(settings.api_base_url, "http://10.0.0.3:8000/api/v1");
}

#[test]
fn unparsable_file_falls_back_to_defaults() {
    let settings = resolve_settings(Some("api_base_url = [1, 2"), no_env).expect("settings");
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn rejects_non_http_urls() {
    let err = normalize_base_url("ftp://example.com/api/v1").expect_err("must fail");
    assert!(err.to_string().contains("unsupported scheme"));
    assert!(normalize_base_url("not a url").is_err());
}
