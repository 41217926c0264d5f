//! Environment-driven config. Everything runs in one test because the
//! process environment is shared between test threads.

use ai_gateway::{
    config::default_config::{
        DEFAULT_API_BASE, DEFAULT_DEEP_MODEL, DEFAULT_FAST_MODEL, DEFAULT_THINKING_BUDGET,
        config_from_env,
    },
    error_handler::ConfigError,
    request::ReasoningEffort,
};

const VARS: [&str; 8] = [
    "GEMINI_API_KEY",
    "API_KEY",
    "GEMINI_API_BASE",
    "GEMINI_DEEP_MODEL",
    "GEMINI_FAST_MODEL",
    "GEMINI_THINKING_BUDGET",
    "LLM_TIMEOUT_SECS",
    "GEMINI_TEMPERATURE",
];

fn clear() {
    for v in VARS {
        // SAFETY: single-threaded within this test binary's only test.
        unsafe { std::env::remove_var(v) };
    }
}

fn set(k: &str, v: &str) {
    // SAFETY: see `clear`.
    unsafe { std::env::set_var(k, v) };
}

#[test]
fn config_from_env_end_to_end() {
    clear();
    assert!(matches!(
        config_from_env(),
        Err(ConfigError::MissingVar("GEMINI_API_KEY or API_KEY"))
    ));

    set("API_KEY", "legacy-key");
    let cfg = config_from_env().unwrap();
    assert_eq!(cfg.api_key, "legacy-key");
    assert_eq!(cfg.endpoint, DEFAULT_API_BASE);
    assert_eq!(cfg.deep.model, DEFAULT_DEEP_MODEL);
    assert_eq!(
        cfg.deep.reasoning,
        Some(ReasoningEffort::high(DEFAULT_THINKING_BUDGET))
    );
    assert_eq!(cfg.fast.model, DEFAULT_FAST_MODEL);
    assert!(cfg.fast.reasoning.is_none());
    assert_eq!(cfg.deep.temperature, None);
    assert_eq!(cfg.fast.temperature, None);

    set("GEMINI_API_KEY", "primary-key");
    set("GEMINI_API_BASE", "http://localhost:9000/v1beta/");
    set("GEMINI_FAST_MODEL", "flash");
    set("GEMINI_THINKING_BUDGET", "2048");
    set("LLM_TIMEOUT_SECS", "15");
    let cfg = config_from_env().unwrap();
    assert_eq!(cfg.api_key, "primary-key");
    assert_eq!(cfg.endpoint, "http://localhost:9000/v1beta");
    assert_eq!(cfg.fast.model, "flash");
    assert_eq!(cfg.deep.reasoning, Some(ReasoningEffort::high(2048)));
    assert_eq!(cfg.timeout_secs, 15);

    set("GEMINI_THINKING_BUDGET", "lots");
    assert!(matches!(
        config_from_env(),
        Err(ConfigError::InvalidNumber { var: "GEMINI_THINKING_BUDGET", .. })
    ));
    set("GEMINI_THINKING_BUDGET", "2048");

    set("LLM_TIMEOUT_SECS", "0");
    assert!(matches!(
        config_from_env(),
        Err(ConfigError::InvalidNumber { var: "LLM_TIMEOUT_SECS", .. })
    ));
    set("LLM_TIMEOUT_SECS", "15");

    set("GEMINI_TEMPERATURE", "0.4");
    let cfg = config_from_env().unwrap();
    assert_eq!(cfg.deep.temperature, Some(0.4));
    assert_eq!(cfg.fast.temperature, Some(0.4));

    for bad in ["warm", "2.5", "-0.1", "NaN"] {
        set("GEMINI_TEMPERATURE", bad);
        assert!(
            matches!(
                config_from_env(),
                Err(ConfigError::InvalidNumber { var: "GEMINI_TEMPERATURE", .. })
            ),
            "{bad} should be rejected"
        );
    }
    set("GEMINI_TEMPERATURE", "");

    set("GEMINI_API_BASE", "localhost:9000");
    assert!(matches!(
        config_from_env(),
        Err(ConfigError::InvalidFormat { var: "GEMINI_API_BASE", .. })
    ));

    clear();
}
