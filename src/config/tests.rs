use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_refcheck_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("REFCHECK_OVERRIDES_PATH");
        env::remove_var("REFCHECK_WIKIDATA_API");
        env::remove_var("REFCHECK_WIKIPEDIA_API");
        env::remove_var("REFCHECK_NATIVE_LANG");
        env::remove_var("REFCHECK_FALLBACK_LANG");
        env::remove_var("REFCHECK_HTTP_TIMEOUT_SECS");
        env::remove_var("REFCHECK_USER_AGENT");
        env::remove_var("REFCHECK_THRESHOLD");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.overrides_path, PathBuf::from("faq.json"));
    assert_eq!(config.wikidata_api, "https://www.wikidata.org/w/api.php");
    assert_eq!(config.native_lang, "vi");
    assert_eq!(config.fallback_lang, "en");
    assert_eq!(config.http_timeout, Duration::from_secs(10));
    assert!(config.user_agent.starts_with("refcheck/"));
    assert!((config.hallucination_threshold - 0.7).abs() < f64::EPSILON);
}

#[test]
fn test_wikipedia_api_for_substitutes_language() {
    let config = Config::default();
    assert_eq!(
        config.wikipedia_api_for("vi"),
        "https://vi.wikipedia.org/w/api.php"
    );
    assert_eq!(
        config.wikipedia_api_for("en"),
        "https://en.wikipedia.org/w/api.php"
    );
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_refcheck_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.overrides_path, PathBuf::from("faq.json"));
    assert_eq!(config.native_lang, "vi");
}

#[test]
#[serial]
fn test_from_env_custom_values() {
    clear_refcheck_env();

    with_env_vars(
        &[
            ("REFCHECK_OVERRIDES_PATH", "/etc/refcheck/overrides.json"),
            ("REFCHECK_NATIVE_LANG", "fr"),
            ("REFCHECK_FALLBACK_LANG", "de"),
            ("REFCHECK_HTTP_TIMEOUT_SECS", "3"),
            ("REFCHECK_THRESHOLD", "0.55"),
            ("REFCHECK_USER_AGENT", "tester/1.0"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert_eq!(
                config.overrides_path,
                PathBuf::from("/etc/refcheck/overrides.json")
            );
            assert_eq!(config.native_lang, "fr");
            assert_eq!(config.fallback_lang, "de");
            assert_eq!(config.http_timeout, Duration::from_secs(3));
            assert!((config.hallucination_threshold - 0.55).abs() < f64::EPSILON);
            assert_eq!(config.user_agent, "tester/1.0");
        },
    );
}

#[test]
#[serial]
fn test_blank_overrides_path_uses_default() {
    clear_refcheck_env();

    with_env_vars(&[("REFCHECK_OVERRIDES_PATH", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.overrides_path, PathBuf::from("faq.json"));
    });
}

#[test]
#[serial]
fn test_invalid_timeout() {
    clear_refcheck_env();

    with_env_vars(&[("REFCHECK_HTTP_TIMEOUT_SECS", "soon")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::TimeoutParseError { .. }));
        assert!(err.to_string().contains("soon"));
    });
}

#[test]
#[serial]
fn test_invalid_threshold() {
    clear_refcheck_env();

    with_env_vars(&[("REFCHECK_THRESHOLD", "high")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdParseError { .. }));
    });
}

#[test]
fn test_validate_success_with_defaults() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_overrides_path_is_directory() {
    let config = Config {
        overrides_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotAFile { .. }));
}

#[test]
fn test_validate_threshold_out_of_range() {
    let config = Config {
        hallucination_threshold: 1.5,
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ThresholdOutOfRange { .. }));
}

#[test]
fn test_validate_empty_language() {
    let config = Config {
        fallback_lang: " ".to_string(),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::EmptyLanguage {
            name: "REFCHECK_FALLBACK_LANG"
        }
    ));
}

#[test]
fn test_validate_template_without_placeholder() {
    let config = Config {
        wikipedia_api: "https://en.wikipedia.org/w/api.php".to_string(),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::MissingLangPlaceholder { .. }));
    assert!(err.to_string().contains("{lang}"));
}

#[test]
fn test_validate_zero_timeout() {
    let config = Config {
        http_timeout: Duration::ZERO,
        ..Default::default()
    };

    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::ZeroTimeout
    ));
}
