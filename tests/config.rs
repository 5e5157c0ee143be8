use std::path::PathBuf;
use sonarchat::config::{parse_config, resolve_credentials, validate_config, ChatMode};
use sonarchat::service::ReportService;

fn example_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sonarchat.example.yaml")
}

#[tokio::test]
async fn test_example_config_parses() {
    let config = parse_config(&example_config()).await.unwrap();
    assert_eq!(config.chat.mode, ChatMode::Llm);
    assert_eq!(config.chat.sample_rows, 5);
    assert_eq!(config.llm.model.as_deref(), Some("gemini-2.0-flash"));
    assert_eq!(config.llm.api_key.as_deref(), Some("$GEMINI_API_KEY"));
    assert_eq!(config.server.port, 5000);
}

#[tokio::test]
async fn test_example_config_in_keyword_mode_builds_service() {
    let mut config = parse_config(&example_config()).await.unwrap();
    config.chat.mode = ChatMode::Keyword;
    resolve_credentials(&mut config);
    validate_config(&config).unwrap();

    let service = ReportService::from_config(&config).unwrap();
    assert_eq!(service.store.store_name(), "gcs");
    assert_eq!(
        service.location.to_string(),
        "gs://your-processed-csvs/processed/sonarqube_report.csv"
    );
}

#[tokio::test]
async fn test_keyword_answer_from_local_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.csv");
    std::fs::write(&report, "severity,type,rule\nMAJOR,BUG,py:S100\nMINOR,CODE_SMELL,py:S101\n").unwrap();

    let mut config = sonarchat::config::AppConfig::default();
    config.chat.mode = ChatMode::Keyword;
    config.report_url = format!("file://{}", report.display());
    validate_config(&config).unwrap();

    let service = ReportService::from_config(&config).unwrap();
    let reply = service.answer("how many bugs?", &[]).await.unwrap();
    assert_eq!(reply.original_markdown, "There is **1** issue of type **BUG**.");
}
