use page2pdf::config::SessionConfig;
use page2pdf::input::PdfRequest;
use page2pdf::pipeline::export_page_to;
use page2pdf::{Error, PdfBrowser};

fn request(url: &str, filename: &str) -> PdfRequest {
    PdfRequest {
        url: url.to_string(),
        filename: filename.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a local Chromium install and network access"]
async fn export_writes_single_pdf() {
    let dir = tempfile::tempdir().expect("tempdir");

    let path = export_page_to(
        &request("https://example.com", "page"),
        SessionConfig::default(),
        dir.path(),
    )
    .await
    .expect("export should succeed");

    assert_eq!(path, dir.path().join("page.pdf"));
    let bytes = std::fs::read(&path).expect("read pdf");
    assert_eq!(&bytes[0..4], b"%PDF");

    let entries = std::fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(entries, 1, "exactly one file should be produced");
}

#[tokio::test]
#[ignore = "requires a local Chromium install"]
async fn navigation_failure_leaves_no_file() {
    let dir = tempfile::tempdir().expect("tempdir");

    let result = export_page_to(
        &request("http://127.0.0.1:1/does-not-exist", "page"),
        SessionConfig::default(),
        dir.path(),
    )
    .await;

    assert!(matches!(result, Err(Error::Navigation(_))), "{result:?}");
    assert!(!dir.path().join("page.pdf").exists());
}

#[tokio::test]
#[ignore = "requires a local Chromium install and network access"]
async fn rerun_overwrites_existing_pdf() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stale = dir.path().join("page.pdf");
    std::fs::write(&stale, b"stale placeholder").expect("seed stale file");

    export_page_to(
        &request("https://example.com", "page"),
        SessionConfig::default(),
        dir.path(),
    )
    .await
    .expect("export should succeed");

    let bytes = std::fs::read(&stale).expect("read pdf");
    assert_eq!(&bytes[0..4], b"%PDF", "stale content should be replaced");

    let entries = std::fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(entries, 1, "no duplicate or numbered file");
}

#[tokio::test]
#[ignore = "requires a local Chromium install and network access"]
async fn idle_wait_tracks_the_navigated_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let browser = PdfBrowser::launch(&SessionConfig::default())
        .await
        .expect("launch browser");
    let page = browser.new_page().await.expect("open tab");

    // Give the blank tab time to emit its own networkIdle before we
    // navigate; the wait below must outlast it and key on the new document.
    tokio::time::sleep(std::time::Duration::from_millis(800)).await;

    page.goto_idle("https://example.com")
        .await
        .expect("navigation should wait out the idle of the blank tab");

    let path = dir.path().join("page.pdf");
    page.export_pdf(&path).await.expect("export pdf");
    let bytes = std::fs::read(&path).expect("read pdf");
    assert_eq!(&bytes[0..4], b"%PDF");

    browser.close().await.expect("close browser");
}

#[tokio::test]
#[ignore = "requires a local Chromium install"]
async fn browser_close_succeeds_without_navigation() {
    let browser = PdfBrowser::launch(&SessionConfig::default())
        .await
        .expect("launch browser");
    browser.close().await.expect("close browser");
}
