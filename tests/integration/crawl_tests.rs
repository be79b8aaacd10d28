use crate::{create_test_config, html_page};
use site_harvest::crawler::{build_http_client, fetch_page, Coordinator};
use site_harvest::output::{ManifestWriter, StopReason};
use site_harvest::HarvestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_crawl_partitions_pages_and_documents() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url).unwrap().port().unwrap();

    // "localhost" is a different host than "127.0.0.1", so this link is cross-domain
    let cross_domain = format!("http://localhost:{}/other", port);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            r#"<h1>Home</h1>
            <a href="/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="{}/page3">Page 3</a>
            <a href="/files/report.pdf">Report</a>
            <a href="/notes.txt">Notes</a>
            <a href="{}">Elsewhere</a>"#,
            base_url, cross_domain
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    for page in ["/page1", "/page2", "/page3"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html_page(&format!("<p>Content of {}</p>", page)))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(html_page("never"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("scraping-results.json");
    let config = create_test_config(&manifest_path);

    let coordinator =
        Coordinator::new(&format!("{}/", base_url), &config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");
    let manifest = report.manifest;

    let mut visited = manifest.visited_pages.clone();
    visited.sort();
    assert_eq!(
        visited,
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
            format!("{}/page3", base_url),
        ]
    );
    assert_eq!(manifest.visited_pages[0], format!("{}/", base_url));

    assert_eq!(manifest.pdfs, vec![format!("{}/files/report.pdf", base_url)]);
    assert_eq!(manifest.texts, vec![format!("{}/notes.txt", base_url)]);
    assert_eq!(manifest.extracted_content.len(), 4);

    let all_urls: Vec<&String> = manifest
        .pdfs
        .iter()
        .chain(&manifest.texts)
        .chain(&manifest.visited_pages)
        .collect();
    assert!(!all_urls.iter().any(|u| u.contains("localhost")));

    let page1 = manifest
        .content_for(&format!("{}/page1", base_url))
        .expect("page1 content missing");
    assert_eq!(page1.content, "Content of /page1");

    // The file on disk holds the same state as the returned report
    let on_disk = ManifestWriter::load(&manifest_path).await.unwrap();
    assert_eq!(on_disk, manifest);

    assert_eq!(report.statistics.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.statistics.pages_failed, 0);
}

#[tokio::test]
async fn test_failed_page_is_visited_but_not_extracted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/broken">Broken</a><a href="/ok">Ok</a><a href="/data.json">Data</a>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_page(r#"<p>Fine</p><a href="/deeper">Deeper</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/deeper"))
        .respond_with(html_page("<p>Still crawling</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&dir.path().join("scraping-results.json"));

    let report = Coordinator::new(&format!("{}/", base_url), &config)
        .unwrap()
        .run()
        .await
        .expect("A single failing page must not abort the crawl");
    let manifest = report.manifest;

    let broken = format!("{}/broken", base_url);
    let data = format!("{}/data.json", base_url);
    assert!(manifest.visited_pages.contains(&broken));
    assert!(manifest.visited_pages.contains(&data));
    assert!(manifest.content_for(&broken).is_none());
    assert!(manifest.content_for(&data).is_none());

    assert!(manifest
        .content_for(&format!("{}/deeper", base_url))
        .is_some());
    assert_eq!(manifest.visited_pages.len(), 5);
    assert_eq!(manifest.extracted_content.len(), 3);
    assert_eq!(report.statistics.pages_failed, 2);
}

/// A body that fails to decode if the client ever tries to read it
fn undecodable(content_type: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-encoding", "gzip")
        .set_body_raw(b"definitely not gzip".to_vec(), content_type)
}

#[tokio::test]
async fn test_non_html_body_is_never_read() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie.mp4"))
        .respond_with(undecodable("video/mp4"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(undecodable("text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&dir.path().join("scraping-results.json"));
    let client = build_http_client(&config.crawler).unwrap();

    // Reading the HTML body fails on the bad encoding...
    let html = fetch_page(&client, &format!("{}/page", mock_server.uri())).await;
    assert!(matches!(html, Err(HarvestError::Fetch { .. })));

    // ...so a parse error here means the video body was rejected unread
    let video = fetch_page(&client, &format!("{}/movie.mp4", mock_server.uri())).await;
    match video {
        Err(HarvestError::Parse { message, .. }) => assert!(message.contains("video/mp4")),
        other => panic!("Expected a content-type rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_crawl_skips_non_html_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/movie.mp4">Movie</a><a href="/about">About</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie.mp4"))
        .respond_with(undecodable("video/mp4"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("<p>About us</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&dir.path().join("scraping-results.json"));

    let report = Coordinator::new(&format!("{}/", base_url), &config)
        .unwrap()
        .run()
        .await
        .unwrap();

    let movie = format!("{}/movie.mp4", base_url);
    assert!(report.manifest.visited_pages.contains(&movie));
    assert!(report.manifest.content_for(&movie).is_none());
    assert_eq!(report.manifest.extracted_content.len(), 2);
    assert_eq!(report.statistics.pages_failed, 1);
}

#[tokio::test]
async fn test_page_limit_bounds_visits() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: String = (0..20)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&links))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(html_page("<p>leaf</p>"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("scraping-results.json");
    let mut config = create_test_config(&manifest_path);
    config.crawler.page_limit = 5;
    config.crawler.batch_size = 2;

    let report = Coordinator::new(&format!("{}/", base_url), &config)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.manifest.visited_pages.len(), 5);
    assert_eq!(report.statistics.stop_reason, StopReason::BudgetReached);
    assert_eq!(report.statistics.batches, 2);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);

    let on_disk = ManifestWriter::load(&manifest_path).await.unwrap();
    assert_eq!(on_disk.visited_pages.len(), 5);
}

#[tokio::test]
async fn test_cyclic_links_fetch_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/">Self</a><a href="/a">A</a><a href="/b">B</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page(r#"<a href="/">Home</a><a href="/b">B</a><a href="/a">A</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page(r#"<a href="/a">A</a><a href="/">Home</a><a href="/c">C</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(html_page(r#"<a href="/b">B</a><a href="/a">A</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&dir.path().join("scraping-results.json"));

    let report = Coordinator::new(&format!("{}/", base_url), &config)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.manifest.visited_pages.len(), 4);
    assert_eq!(report.manifest.extracted_content.len(), 4);
    assert_eq!(report.statistics.stop_reason, StopReason::FrontierExhausted);

    // Wiremock verifies the expect(1) counts when the server drops
}

#[tokio::test]
async fn test_seed_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("scraping-results.json");
    let config = create_test_config(&manifest_path);

    let result = Coordinator::new(&format!("{}/", mock_server.uri()), &config)
        .unwrap()
        .run()
        .await;

    match result {
        Err(HarvestError::SeedFetch { source, .. }) => {
            assert!(matches!(*source, HarvestError::HttpStatus { status: 404, .. }));
        }
        other => panic!("Expected SeedFetch error, got {:?}", other.map(|r| r.statistics)),
    }
    assert!(!manifest_path.exists());
}

#[tokio::test]
async fn test_skip_header_excludes_header_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "<header><nav>Site Navigation</nav></header>\n<main>\n  <p>Body   text</p>\n</main>",
        ))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&dir.path().join("scraping-results.json"));
    config.crawler.exclude_header = true;

    let report = Coordinator::new(&format!("{}/", mock_server.uri()), &config)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.manifest.extracted_content.len(), 1);
    assert_eq!(report.manifest.extracted_content[0].content, "Body text");
}

#[tokio::test]
async fn test_header_included_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "<header>Site Navigation</header>\n<p>Body text</p>",
        ))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&dir.path().join("scraping-results.json"));

    let report = Coordinator::new(&format!("{}/", mock_server.uri()), &config)
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(
        report.manifest.extracted_content[0].content,
        "Site Navigation Body text"
    );
}

#[tokio::test]
async fn test_manifest_write_failure_does_not_abort() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/next">Next</a>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(html_page("<p>Next page</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&dir.path().join("missing-dir").join("results.json"));

    let report = Coordinator::new(&format!("{}/", base_url), &config)
        .unwrap()
        .run()
        .await
        .expect("Persistence failures must not abort the crawl");

    assert_eq!(report.manifest.visited_pages.len(), 2);
    assert_eq!(report.manifest.extracted_content.len(), 2);
    assert_eq!(report.statistics.write_failures, 2);
}

#[tokio::test]
async fn test_second_crawl_replaces_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("scraping-results.json");
    let config = create_test_config(&manifest_path);

    let first_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>First</p><a href="/first.pdf">pdf</a><a href="/first-page">p</a>"#,
        ))
        .mount(&first_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/first-page"))
        .respond_with(html_page("<p>First page</p>"))
        .mount(&first_server)
        .await;

    Coordinator::new(&format!("{}/", first_server.uri()), &config)
        .unwrap()
        .run()
        .await
        .unwrap();

    let second_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("<p>Second</p>"))
        .mount(&second_server)
        .await;

    Coordinator::new(&format!("{}/", second_server.uri()), &config)
        .unwrap()
        .run()
        .await
        .unwrap();

    let manifest = ManifestWriter::load(&manifest_path).await.unwrap();
    assert!(manifest.pdfs.is_empty());
    assert_eq!(manifest.visited_pages, vec![format!("{}/", second_server.uri())]);
    assert_eq!(manifest.extracted_content.len(), 1);
    assert_eq!(manifest.extracted_content[0].content, "Second");
}
