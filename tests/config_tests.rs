use serial_test::serial;
use std::env;

use mirai::config::Config;
use mirai::errors::AppError;

const VARS: [&str; 3] = ["MIRAI_API_BASE_URL", "MIRAI_USER_ID", "MIRAI_TIMEOUT_SECS"];

// Runs `test` with the given variables set and restores the environment after.
fn with_env(vars: &[(&str, &str)], test: impl FnOnce()) {
    let originals: Vec<(&str, Option<String>)> =
        VARS.iter().map(|name| (*name, env::var(name).ok())).collect();

    for name in VARS {
        env::remove_var(name);
    }
    for (name, value) in vars {
        env::set_var(name, value);
    }

    test();

    for (name, original) in originals {
        match original {
            Some(val) => env::set_var(name, val),
            None => env::remove_var(name),
        }
    }
}

#[test]
#[serial]
fn test_config_load_with_environment_vars() {
    with_env(
        &[
            ("MIRAI_API_BASE_URL", "https://diary.example.com/"),
            ("MIRAI_USER_ID", "7"),
            ("MIRAI_TIMEOUT_SECS", "5"),
        ],
        || {
            let config = Config::load().unwrap();

            assert_eq!(config.api_base_url, "https://diary.example.com");
            assert_eq!(config.user_id, 7);
            assert_eq!(config.timeout_secs, 5);
        },
    );
}

#[test]
#[serial]
fn test_config_load_with_fallbacks() {
    with_env(&[], || {
        let config = Config::load().unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.user_id, 1);
        assert_eq!(config.timeout_secs, 30);
    });
}

#[test]
#[serial]
fn test_config_rejects_unparsable_values() {
    with_env(&[("MIRAI_USER_ID", "someone")], || {
        assert!(matches!(Config::load(), Err(AppError::Config(_))));
    });

    with_env(&[("MIRAI_TIMEOUT_SECS", "-3")], || {
        assert!(matches!(Config::load(), Err(AppError::Config(_))));
    });
}

#[test]
#[serial]
fn test_config_rejects_invalid_values() {
    with_env(&[("MIRAI_API_BASE_URL", "localhost:8000")], || {
        match Config::load() {
            Err(AppError::Config(msg)) => assert!(msg.contains("http://")),
            other => panic!("Expected config error, got {:?}", other),
        }
    });

    with_env(&[("MIRAI_USER_ID", "0")], || {
        assert!(matches!(Config::load(), Err(AppError::Config(_))));
    });

    with_env(&[("MIRAI_TIMEOUT_SECS", "0")], || {
        assert!(matches!(Config::load(), Err(AppError::Config(_))));
    });
}

#[test]
fn test_debug_output_hides_base_url() {
    let config = Config::with_base_url("https://private.example.com");
    let debug_output = format!("{:?}", config);

    assert!(!debug_output.contains("private.example.com"));
    assert!(debug_output.contains("user_id: 1"));
}
