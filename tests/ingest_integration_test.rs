use echo_ingest::utils::validation::Validate;
use echo_ingest::{CliConfig, EtlEngine, EtlError, LocalStorage, ProspectPipeline};
use std::io::Read;
use tempfile::TempDir;

fn cli_config(input_file: String, output_path: String, formats: &[&str], strict: bool) -> CliConfig {
    CliConfig {
        input_file,
        output_path,
        formats: formats.iter().map(|f| f.to_string()).collect(),
        strict,
        verbose: false,
        monitor: false,
    }
}

fn read_entry(archive: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>, name: &str) -> String {
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[tokio::test]
async fn test_end_to_end_ingestion_to_zip() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("prospects.csv");
    std::fs::write(
        &input_path,
        "name,email,company\nAlice,alice@x.com,Acme\n\n  \nBob,bob@x.com\nCarol,carol@x.com,Initech,extra\n",
    )
    .unwrap();
    let output_path = temp_dir.path().join("out").to_string_lossy().to_string();

    let config = cli_config(
        input_path.to_string_lossy().to_string(),
        output_path.clone(),
        &["csv", "tsv", "json"],
        false,
    );
    assert!(config.validate().is_ok());

    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new_with_monitoring(ProspectPipeline::new(storage, config), true);
    let result = engine.run().await.unwrap();
    assert_eq!(result, format!("{}/prospects.zip", output_path));

    let zip_data = std::fs::read(std::path::Path::new(&output_path).join("prospects.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    assert_eq!(archive.len(), 3);

    let csv_content = read_entry(&mut archive, "prospects.csv");
    assert_eq!(
        csv_content,
        "name,email,company,status\n\
         Alice,alice@x.com,Acme,Data fetched\n\
         Bob,bob@x.com,,Data fetched\n\
         Carol,carol@x.com,Initech,Data fetched\n"
    );

    let json_content = read_entry(&mut archive, "prospects.json");
    let records: Vec<serde_json::Value> = serde_json::from_str(&json_content).unwrap();
    assert_eq!(records.len(), 3);
    for record in &records {
        let object = record.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(record["status"], "Data fetched");
    }
}

#[tokio::test]
async fn test_strict_mode_keeps_quoted_commas() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("quoted.csv");
    std::fs::write(&input_path, "name,title\n\"Doe, Jane\",\"VP, Sales\"\n").unwrap();
    let output_path = temp_dir.path().to_string_lossy().to_string();

    let config = cli_config(
        input_path.to_string_lossy().to_string(),
        output_path.clone(),
        &["tsv"],
        true,
    );
    let engine = EtlEngine::new(ProspectPipeline::new(LocalStorage::new(output_path.clone()), config));
    engine.run().await.unwrap();

    let zip_data = std::fs::read(temp_dir.path().join("prospects.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    assert_eq!(archive.len(), 1);

    let tsv_content = read_entry(&mut archive, "prospects.tsv");
    assert_eq!(
        tsv_content,
        "name\ttitle\tstatus\nDoe, Jane\tVP, Sales\tData fetched\n"
    );
}

#[tokio::test]
async fn test_empty_input_file_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("empty.csv");
    std::fs::write(&input_path, "").unwrap();
    let output_path = temp_dir.path().join("out").to_string_lossy().to_string();

    let config = cli_config(
        input_path.to_string_lossy().to_string(),
        output_path.clone(),
        &["csv"],
        false,
    );
    let engine = EtlEngine::new(ProspectPipeline::new(LocalStorage::new(output_path.clone()), config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, EtlError::EmptyFile));
    assert_eq!(err.user_friendly_message(), "File is empty");
    assert!(!std::path::Path::new(&output_path).join("prospects.zip").exists());
}
