use crate::config::{Config, DEFAULT_MODEL_ID, ModelFormat};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const MODEL_VARS: [&str; 3] = ["MODEL_PATH", "MODEL_FORMAT", "MODEL_ID"];

fn clear_model_vars() {
    for var in MODEL_VARS {
        // SAFETY: serialized by ENV_LOCK
        unsafe { env::remove_var(var) };
    }
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_model_vars();

    let config = Config::from_env().unwrap();

    assert_eq!(config.model.model_path, PathBuf::from("models/diabetes_model.json"));
    assert_eq!(config.model.format, ModelFormat::Linear);
    assert_eq!(config.model.model_id, DEFAULT_MODEL_ID);
}

#[test]
fn test_config_format_inferred_from_onnx_path() {
    let _guard = get_env_lock().lock().unwrap();
    clear_model_vars();
    unsafe { env::set_var("MODEL_PATH", "/srv/models/progression.onnx") };

    let config = Config::from_env().unwrap();
    assert_eq!(config.model.format, ModelFormat::Onnx);

    clear_model_vars();
}

#[test]
fn test_config_explicit_format_wins() {
    let _guard = get_env_lock().lock().unwrap();
    clear_model_vars();
    unsafe {
        env::set_var("MODEL_PATH", "models/forest.json");
        env::set_var("MODEL_FORMAT", "random_forest");
        env::set_var("MODEL_ID", "diabetes_progression_rf");
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.model.format, ModelFormat::RandomForest);
    assert_eq!(config.model.model_id, "diabetes_progression_rf");

    clear_model_vars();
}

#[test]
fn test_config_rejects_unknown_format() {
    let _guard = get_env_lock().lock().unwrap();
    clear_model_vars();
    unsafe { env::set_var("MODEL_FORMAT", "pickle") };

    let result = Config::from_env();
    assert!(result.is_err());

    clear_model_vars();
}
