//! Integration tests for the input layer

use resume_parser::input::{InputManager, TextSource};
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("Ananya Iyer"));
    assert!(text.contains("TECHNICAL SKILLS"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Ananya Iyer"));
    assert!(text.contains("\nSkills\n"));
    assert!(text.contains("Campus Connect: a React Native app"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_can_be_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_document_without_sidecar_uses_plain_text() {
    let mut manager = InputManager::new();
    let document = manager
        .load_document(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert!(document.table_text.is_none());
    let (text, source) = document.preferred_text(true);
    assert_eq!(source, TextSource::Document);
    assert!(text.starts_with("Ananya Iyer"));
}

#[tokio::test]
async fn test_table_sidecar_takes_priority() {
    let mut manager = InputManager::new();
    let document = manager
        .load_document(Path::new("tests/fixtures/tabular_resume.txt"))
        .await
        .unwrap();

    let (text, source) = document.preferred_text(true);
    assert_eq!(source, TextSource::Tables);
    assert!(text.contains("Bachelor of Engineering"));

    let (text, source) = document.preferred_text(false);
    assert_eq!(source, TextSource::Document);
    assert!(text.contains("Degree Institute Year Score"));
}
