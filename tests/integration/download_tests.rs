use crate::html_page;
use reqwest::Client;
use site_harvest::config::DownloadConfig;
use site_harvest::download::{DownloadReport, Downloader};
use site_harvest::output::{CrawlManifest, ManifestWriter, PageRecord};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_downloader_materializes_manifest() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4 test".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/notes.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("plain notes", "text/plain"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page content comes from the manifest, never from the network
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("unused"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("scraping-results.json");

    let manifest = CrawlManifest {
        pdfs: vec![
            format!("{}/files/report.pdf", base_url),
            format!("{}/files/missing.pdf", base_url),
        ],
        texts: vec![format!("{}/notes.txt", base_url)],
        visited_pages: vec![format!("{}/about", base_url)],
        extracted_content: vec![PageRecord::new(format!("{}/about", base_url), "About us")],
    };
    ManifestWriter::new(&manifest_path)
        .write(&manifest)
        .await
        .unwrap();

    let config = DownloadConfig {
        pdf_dir: dir.path().join("pdf").display().to_string(),
        txt_dir: dir.path().join("txt").display().to_string(),
        content_dir: dir.path().join("content").display().to_string(),
    };

    let downloader = Downloader::new(config, Client::new());
    downloader.init().await.unwrap();
    let report = downloader.process_manifest(&manifest_path).await.unwrap();

    assert_eq!(
        report,
        DownloadReport {
            downloaded: 2,
            saved: 1,
            failed: 1,
        }
    );

    let pdf = std::fs::read(dir.path().join("pdf").join("report.pdf")).unwrap();
    assert_eq!(pdf, b"%PDF-1.4 test");

    let txt = std::fs::read_to_string(dir.path().join("txt").join("notes.txt")).unwrap();
    assert_eq!(txt, "plain notes");

    let content = std::fs::read_to_string(dir.path().join("content").join("about.txt")).unwrap();
    assert_eq!(content, "About us");

    assert!(!dir.path().join("pdf").join("missing.pdf").exists());
}
