//! Config store tests against a temporary directory

use mock_interviewer::application::ports::ConfigStore;
use mock_interviewer::domain::config::{AppConfig, Provider};
use mock_interviewer::domain::error::ConfigError;
use mock_interviewer::domain::interview::FeedbackMode;
use mock_interviewer::infrastructure::XdgConfigStore;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> XdgConfigStore {
    XdgConfigStore::with_path(dir.path().join("mock-interviewer").join("config.toml"))
}

#[tokio::test]
async fn missing_file_loads_empty_config() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(!store.exists());
    assert_eq!(store.load().await.unwrap(), AppConfig::empty());
}

#[tokio::test]
async fn init_writes_defaults_and_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.init().await.unwrap();
    assert!(store.exists());

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, AppConfig::defaults());

    let err = store.init().await.unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyExists(_)));
}

#[tokio::test]
async fn save_then_load_preserves_values() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let config = AppConfig {
        provider: Some("openai".to_string()),
        openai_api_key: Some("sk-test-123".to_string()),
        max_questions: Some(3),
        feedback_mode: Some("immediate".to_string()),
        voice: Some(true),
        ..AppConfig::empty()
    };
    store.save(&config).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.provider_or_default(), Provider::OpenAi);
    assert_eq!(loaded.feedback_mode_or_default(), FeedbackMode::Immediate);
    assert_eq!(loaded.api_key_for(Provider::OpenAi), Some("sk-test-123"));
}

#[tokio::test]
async fn file_values_override_defaults_when_merged() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save(&AppConfig {
            max_questions: Some(2),
            ..AppConfig::empty()
        })
        .await
        .unwrap();

    let merged = AppConfig::defaults().merge(store.load().await.unwrap());
    assert_eq!(merged.max_questions_or_default(), 2);
    assert_eq!(merged.provider_or_default(), Provider::Gemini);
    assert_eq!(merged.min_answer_duration_or_default().as_secs(), 30);
}

#[tokio::test]
async fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "voice = \"loud\"").unwrap();

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}
