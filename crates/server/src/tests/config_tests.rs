use super::{apply_env, apply_file, load_settings, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_listen_on_all_interfaces() {
    let settings = Settings::default();
    assert_eq!(settings.bind_addr, "0.0.0.0:5005");
    assert_eq!(settings.xdotool_path, "xdotool");
    assert_eq!(settings.type_delay_ms, 10);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        "bind_addr = \"127.0.0.1:6000\"\ntype_delay_ms = 40\n",
    )
    .expect("toml");

    assert_eq!(settings.bind_addr, "127.0.0.1:6000");
    assert_eq!(settings.xdotool_path, "xdotool");
    assert_eq!(settings.type_delay_ms, 40);
}

#[test]
fn invalid_file_is_rejected_without_partial_updates() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "type_delay_ms = \"slow\"").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn environment_overrides_file() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "bind_addr = \"127.0.0.1:6000\"").expect("toml");
    apply_env(
        &mut settings,
        vars(&[
            ("APP__BIND_ADDR", "127.0.0.1:7000"),
            ("CAPTOR_XDOTOOL", "/usr/local/bin/xdotool"),
            ("CAPTOR_TYPE_DELAY_MS", "0"),
        ]),
    );

    assert_eq!(settings.bind_addr, "127.0.0.1:7000");
    assert_eq!(settings.xdotool_path, "/usr/local/bin/xdotool");
    assert_eq!(settings.type_delay_ms, 0);
}

#[test]
fn invalid_type_delay_in_environment_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, vars(&[("CAPTOR_TYPE_DELAY_MS", "fast")]));
    assert_eq!(settings.type_delay_ms, 10);
}

#[test]
fn cli_flags_win_over_everything() {
    let mut settings = Settings::default();
    apply_env(&mut settings, vars(&[("CAPTOR_BIND", "127.0.0.1:7000")]));
    settings.apply_cli(Some("127.0.0.1:8000".into()), None);

    assert_eq!(settings.bind_addr, "127.0.0.1:8000");
    assert_eq!(settings.xdotool_path, "xdotool");
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("captor_missing_{suffix}.toml"));

    let settings = load_settings(&path);

    assert_eq!(settings.type_delay_ms, Settings::default().type_delay_ms);
}

#[test]
fn reads_config_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("captor_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("captor.toml");
    fs::write(&path, "xdotool_path = \"/opt/xdotool\"\n").expect("write config");

    let settings = load_settings(&path);
    assert_eq!(settings.xdotool_path, "/opt/xdotool");

    fs::remove_dir_all(temp_root).expect("cleanup");
}
