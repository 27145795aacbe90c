use std::collections::HashMap;
use std::time::Duration;

use dmgmonkey::config::Settings;
use dmgmonkey::detail::MatchMode;
use dmgmonkey::results::FailureStage;
use dmgmonkey::{Package, Pipeline};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_PATH: &str = "/kb/index";

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.search.endpoint = format!("{}{}", server.uri(), INDEX_PATH);
    settings.outgoing.request_timeout = 5.0;
    settings
}

/// Mount one mock per offset; offsets missing from `pages` answer with no downloads
async fn mount_index(server: &MockServer, query: &str, pages: HashMap<u32, ResponseTemplate>) {
    let mut pages = pages;
    for offset in 0..17u32 {
        let response = pages
            .remove(&offset)
            .unwrap_or_else(|| ResponseTemplate::new(200).set_body_json(json!({"downloads": []})));

        Mock::given(method("GET"))
            .and(path(INDEX_PATH))
            .and(query_param("page", "downloads_search"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("sort", "relevancy"))
            .and(query_param("facet", "all"))
            .and(query_param("category", ""))
            .and(query_param("q", query))
            .and(query_param("locale", "en_US"))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }
}

fn downloads(items: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "downloads": items }))
}

async fn mount_detail(server: &MockServer, detail_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(detail_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_security_update_end_to_end() {
    let server = MockServer::start().await;
    let detail_url = format!("{}/detail1", server.uri());

    mount_index(
        &server,
        "Security Update",
        HashMap::from([(
            0,
            downloads(json!([{"title": "Security Update 2004-01", "url": detail_url}])),
        )]),
    )
    .await;
    mount_detail(
        &server,
        "/detail1",
        r#"<html><script>var d = {"metaUrl": "http://example/file.dmg.bin"};</script></html>"#,
    )
    .await;

    let report = Pipeline::new(&settings_for(&server))
        .unwrap()
        .run("Security Update")
        .await;

    let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        json!({
            "count": 1,
            "packages": [
                {"title": "Security Update 2004-01", "url": "http://example/file.dmg.bin"}
            ]
        })
    );
}

#[tokio::test]
async fn test_issues_exactly_seventeen_search_requests() {
    let server = MockServer::start().await;
    mount_index(&server, "iTunes", HashMap::new()).await;

    Pipeline::new(&settings_for(&server))
        .unwrap()
        .run("iTunes")
        .await;

    let requests = server.received_requests().await.unwrap();
    let mut offsets: Vec<u32> = requests
        .iter()
        .filter(|r| r.url.path() == INDEX_PATH)
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "offset")
                .and_then(|(_, v)| v.parse().ok())
        })
        .collect();
    offsets.sort_unstable();

    assert_eq!(offsets, (0..17).collect::<Vec<u32>>());
}

#[tokio::test]
async fn test_zero_results() {
    let server = MockServer::start().await;
    mount_index(&server, "nothing", HashMap::new()).await;

    let report = Pipeline::new(&settings_for(&server))
        .unwrap()
        .run("nothing")
        .await;

    assert_eq!(report.to_json().unwrap(), "{\n \"count\": 0,\n \"packages\": []\n}");
}

#[tokio::test]
async fn test_count_ignores_extraction_outcome() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_index(
        &server,
        "Update",
        HashMap::from([
            (
                0,
                downloads(json!([
                    {"title": "Good", "url": format!("{}/good", uri)},
                    {"title": "No link", "url": format!("{}/nolink", uri)},
                ])),
            ),
            (
                5,
                downloads(json!([{"title": "Gone", "url": format!("{}/gone", uri)}])),
            ),
        ]),
    )
    .await;
    mount_detail(&server, "/good", r#""metaUrl": "https://example.com/good.dmg""#).await;
    mount_detail(&server, "/nolink", "<html>no download here</html>").await;
    // /gone is not mounted and answers 404

    let report = Pipeline::new(&settings_for(&server))
        .unwrap()
        .run("Update")
        .await;

    assert_eq!(report.count, 3);
    assert_eq!(
        report.packages,
        vec![
            Package::new("Good", Some("https://example.com/good.dmg".to_string())),
            Package::new("No link", None),
            Package::new("Gone", None),
        ]
    );
    let stages: Vec<_> = report.failures.iter().map(|f| f.stage).collect();
    assert_eq!(stages, vec![FailureStage::Extraction, FailureStage::Detail]);
}

#[tokio::test]
async fn test_missing_title_uses_placeholder() {
    let server = MockServer::start().await;
    let detail_url = format!("{}/untitled", server.uri());

    mount_index(
        &server,
        "Update",
        HashMap::from([(0, downloads(json!([{"url": detail_url}])))]),
    )
    .await;
    mount_detail(&server, "/untitled", r#""metaUrl": "http://example/u.dmg""#).await;

    let report = Pipeline::new(&settings_for(&server))
        .unwrap()
        .run("Update")
        .await;

    assert_eq!(report.packages[0].title, "<none>");
    assert_eq!(report.packages[0].url.as_deref(), Some("http://example/u.dmg"));
}

#[tokio::test]
async fn test_failed_page_is_skipped_and_reported() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_index(
        &server,
        "Update",
        HashMap::from([
            (
                0,
                downloads(json!([{"title": "First", "url": format!("{}/first", uri)}])),
            ),
            (2, ResponseTemplate::new(500)),
            (3, ResponseTemplate::new(200).set_body_string("<html>maintenance</html>")),
            (
                4,
                downloads(json!([{"title": "Second", "url": format!("{}/second", uri)}])),
            ),
        ]),
    )
    .await;
    mount_detail(&server, "/first", r#""metaUrl": "http://example/1.dmg""#).await;
    mount_detail(&server, "/second", r#""metaUrl": "http://example/2.dmg""#).await;

    let report = Pipeline::new(&settings_for(&server))
        .unwrap()
        .run("Update")
        .await;

    assert_eq!(report.count, 2);
    assert_eq!(report.resolved(), 2);
    let targets: Vec<_> = report
        .failures
        .iter()
        .filter(|f| f.stage == FailureStage::Search)
        .map(|f| f.target.as_str())
        .collect();
    assert_eq!(targets, vec!["offset 2", "offset 3"]);
}

#[tokio::test]
async fn test_concurrent_details_keep_search_order() {
    let server = MockServer::start().await;
    let uri = server.uri();

    let items: Vec<Value> = (0..4)
        .map(|i| json!({"title": format!("Item {}", i), "url": format!("{}/item{}", uri, i)}))
        .collect();
    mount_index(
        &server,
        "Update",
        HashMap::from([(0, downloads(Value::Array(items)))]),
    )
    .await;

    for i in 0..4u64 {
        Mock::given(method("GET"))
            .and(path(format!("/item{}", i)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#""metaUrl": "http://example/{}.dmg""#, i))
                    .set_delay(Duration::from_millis(40 * (4 - i))),
            )
            .mount(&server)
            .await;
    }

    let mut settings = settings_for(&server);
    settings.outgoing.detail_concurrency = 4;
    let report = Pipeline::new(&settings).unwrap().run("Update").await;

    let urls: Vec<_> = report
        .packages
        .iter()
        .map(|p| p.url.clone().unwrap())
        .collect();
    assert_eq!(
        urls,
        (0..4)
            .map(|i| format!("http://example/{}.dmg", i))
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_match_mode_selects_occurrence() {
    let server = MockServer::start().await;
    let detail_url = format!("{}/multi", server.uri());

    mount_index(
        &server,
        "Update",
        HashMap::from([(0, downloads(json!([{"title": "Multi", "url": detail_url}])))]),
    )
    .await;
    mount_detail(
        &server,
        "/multi",
        r#"{"a": {"metaUrl": "http://example/first.dmg"}, "b": {"metaUrl": "http://example/last.dmg"}}"#,
    )
    .await;

    let report = Pipeline::new(&settings_for(&server))
        .unwrap()
        .run("Update")
        .await;
    assert_eq!(report.packages[0].url.as_deref(), Some("http://example/last.dmg"));
}

#[tokio::test]
async fn test_first_match_mode() {
    let server = MockServer::start().await;
    let detail_url = format!("{}/multi", server.uri());

    mount_index(
        &server,
        "Update",
        HashMap::from([(0, downloads(json!([{"title": "Multi", "url": detail_url}])))]),
    )
    .await;
    mount_detail(
        &server,
        "/multi",
        r#"{"a": {"metaUrl": "http://example/first.dmg"}, "b": {"metaUrl": "http://example/last.dmg"}}"#,
    )
    .await;

    let mut settings = settings_for(&server);
    settings.extraction.match_mode = MatchMode::First;
    let report = Pipeline::new(&settings).unwrap().run("Update").await;
    assert_eq!(report.packages[0].url.as_deref(), Some("http://example/first.dmg"));
}
