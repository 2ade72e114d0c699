use httpmock::prelude::*;
use ip2temp::core::diagnostics::ERROR;
use ip2temp::{
    Diagnostics, GeoIpClient, HistogramEngine, HistogramError, HistogramPipeline, IpExtractor,
    Job, LocalStorage, OpenWeatherClient,
};
use reqwest::Client;
use tempfile::TempDir;

type TestPipeline = HistogramPipeline<LocalStorage, GeoIpClient, OpenWeatherClient>;

fn build_pipeline(server: &MockServer, dir: &TempDir, buckets: usize) -> TestPipeline {
    let client = Client::new();
    HistogramPipeline::new(
        LocalStorage::new(dir.path()),
        GeoIpClient::new(client.clone(), server.url("/json")),
        OpenWeatherClient::new(client, server.url("/forecast/daily"), "test-key"),
        IpExtractor::new(Some(22)).unwrap(),
        Job {
            input_path: "access.log".to_string(),
            output_path: "report.tsv".to_string(),
            buckets,
        },
    )
}

async fn mock_locale(server: &MockServer, ip: &str, latitude: f64, longitude: f64) {
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/json/{}", ip));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "ip": ip,
                    "latitude": latitude,
                    "longitude": longitude
                }));
        })
        .await;
}

async fn mock_forecast(server: &MockServer, latitude: &str, tomorrow_kelvin: f64) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/forecast/daily")
                .query_param("lat", latitude)
                .query_param("APPID", "test-key")
                .query_param("cnt", "2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "cnt": 2,
                    "list": [
                        {"temp": {"max": 250.0}},
                        {"temp": {"max": tomorrow_kelvin}}
                    ]
                }));
        })
        .await;
}

#[tokio::test]
async fn test_end_to_end_histogram_report() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("access.log"),
        "2024-01-01 GET / 8.8.8.8 200\n\
         2024-01-01 GET / 192.168.1.1 200\n\
         2024-01-01 GET /about 1.1.1.1 200\n\
         2024-01-01 GET / 8.8.8.8 304\n\
         2024-01-01 GET / 9.9.9.9 200\n\
         2024-01-01 GET / 4.4.4.4 200\n",
    )
    .unwrap();

    let server = MockServer::start_async().await;
    mock_locale(&server, "8.8.8.8", 10.0, 20.0).await;
    mock_locale(&server, "1.1.1.1", 30.0, 40.0).await;
    mock_locale(&server, "9.9.9.9", 0.0, 0.0).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/json/4.4.4.4");
            then.status(500);
        })
        .await;
    // 283.15 K = 50 °F, 293.15 K = 68 °F
    mock_forecast(&server, "10", 283.15).await;
    mock_forecast(&server, "30", 293.15).await;

    let engine = HistogramEngine::new(build_pipeline(&server, &temp_dir, 2));
    let mut diagnostics = Diagnostics::new();
    let mut summary = Vec::new();

    let report = engine
        .run_with_summary(&mut diagnostics, &mut summary)
        .await
        .unwrap();

    assert_eq!(report.addresses, 4);
    assert_eq!(report.histogram.total_count(), 2);

    let written = std::fs::read_to_string(temp_dir.path().join("report.tsv")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Minimum\tMaximum\tCount",
            "50.00\t59.00\t1",
            "59.00\t68.00\t1"
        ]
    );

    let errors = diagnostics.get_logs(ERROR);
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().any(|e| e.contains("192.168.1.1")));
    assert!(errors.iter().any(|e| e.contains("9.9.9.9")));
    assert!(errors.iter().any(|e| e.contains("4.4.4.4")));

    let summary = String::from_utf8(summary).unwrap();
    assert!(summary.contains("The following issues were found:"));
    assert!(summary.contains("9.9.9.9"));
}

#[tokio::test]
async fn test_report_is_overwritten() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("access.log"), "8.8.8.8\n")?;
    std::fs::write(temp_dir.path().join("report.tsv"), "stale\nstale\nstale\nstale\n")?;

    let server = MockServer::start_async().await;
    mock_locale(&server, "8.8.8.8", 10.0, 20.0).await;
    mock_forecast(&server, "10", 273.15).await;

    let engine = HistogramEngine::new(build_pipeline(&server, &temp_dir, 1));
    let mut summary = Vec::new();
    engine
        .run_with_summary(&mut Diagnostics::new(), &mut summary)
        .await?;

    let written = std::fs::read_to_string(temp_dir.path().join("report.tsv"))?;
    assert_eq!(written, "Minimum\tMaximum\tCount\n31.50\t32.50\t1\n");
    assert!(summary.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_forecast_failure_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("access.log"), "8.8.8.8\n").unwrap();

    let server = MockServer::start_async().await;
    mock_locale(&server, "8.8.8.8", 10.0, 20.0).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/forecast/daily");
            then.status(200).json_body(serde_json::json!({"cod": "404", "message": "city not found"}));
        })
        .await;

    let engine = HistogramEngine::new(build_pipeline(&server, &temp_dir, 3));
    let mut diagnostics = Diagnostics::new();
    let mut summary = Vec::new();

    let result = engine.run_with_summary(&mut diagnostics, &mut summary).await;

    assert!(matches!(result, Err(HistogramError::Forecast { .. })));
    assert!(!temp_dir.path().join("report.tsv").exists());
    assert_eq!(diagnostics.get_logs(ERROR).len(), 1);
    assert!(summary.is_empty());
}

#[tokio::test]
async fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let engine = HistogramEngine::new(build_pipeline(&server, &temp_dir, 3));
    let result = engine
        .run_with_summary(&mut Diagnostics::new(), &mut Vec::new())
        .await;

    assert!(matches!(result, Err(HistogramError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_zero_buckets_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("access.log"), "8.8.8.8\n").unwrap();

    let server = MockServer::start_async().await;
    mock_locale(&server, "8.8.8.8", 10.0, 20.0).await;
    mock_forecast(&server, "10", 283.15).await;

    let engine = HistogramEngine::new(build_pipeline(&server, &temp_dir, 0));
    let result = engine
        .run_with_summary(&mut Diagnostics::new(), &mut Vec::new())
        .await;

    assert!(matches!(result, Err(HistogramError::InvalidBucketCount(0))));
}

#[tokio::test]
async fn test_only_private_addresses_is_empty_input() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("access.log"),
        "127.0.0.1 local\n10.1.1.1 vpn\n172.20.0.3 docker\n",
    )
    .unwrap();
    let server = MockServer::start_async().await;

    let engine = HistogramEngine::new(build_pipeline(&server, &temp_dir, 3));
    let mut diagnostics = Diagnostics::new();
    let result = engine
        .run_with_summary(&mut diagnostics, &mut Vec::new())
        .await;

    assert!(matches!(result, Err(HistogramError::EmptyInput)));
    assert_eq!(diagnostics.get_logs(ERROR).len(), 3);
}
