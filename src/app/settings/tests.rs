use super::{RuntimeSettings, load_runtime_settings_from, save_runtime_settings};


#[test]
fn defaults_point_at_public_api() {
    let settings = RuntimeSettings::default();
    assert_eq!(settings.api_url, "https://api.ipma.pt");
    assert_eq!(settings.listen, "127.0.0.1:5000");
    assert_eq!(settings.timeout_secs, 10);
    assert_eq!(settings.icons_url, "/static/icons");
}

#[test]
fn timeout_is_never_zero() {
    let settings = RuntimeSettings {
        timeout_secs: 0,
        ..RuntimeSettings::default()
    };
    assert_eq!(settings.timeout(), std::time::Duration::from_secs(1));
}
