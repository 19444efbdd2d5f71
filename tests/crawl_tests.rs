//! Integration tests for the crawler
//!
//! These tests point the traversal engine at wiremock servers and verify
//! the persisted rows end-to-end: discovery fan-out, version contiguity,
//! vote emission, retry policy, and the parliament stop heuristic.

use legiscrawl::config::{Config, CrawlConfig, EndpointConfig, HttpConfig, OutputConfig};
use legiscrawl::storage::{open_storage, RecordSink};
use legiscrawl::TraversalEngine;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration bounded tightly around one parliament
fn test_config(base_url: &str, db_path: &PathBuf) -> Config {
    Config {
        crawl: CrawlConfig {
            first_parliament: 44,
            max_parliament: 44,
            max_sessions: 1,
            max_versions: 10,
            stop_after_empty_parliaments: 1,
            document_types: vec!["Government".to_string()],
        },
        http: HttpConfig {
            user_agent: "legiscrawl-test/0.1".to_string(),
            timeout_secs: 5,
            max_concurrent_fetches: 4,
            retry_attempts: 2,
            retry_delay_ms: 10,
        },
        endpoints: EndpointConfig {
            base_url: base_url.to_string(),
        },
        output: OutputConfig {
            database_path: db_path.to_string_lossy().to_string(),
        },
    }
}

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("bills.db")
}

async fn run_crawl(config: Config) {
    let sink = open_storage(std::path::Path::new(&config.output.database_path))
        .expect("Failed to open test database");
    let engine = TraversalEngine::new(config, sink).expect("Failed to build engine");
    engine.run().await.expect("Crawl failed");
}

fn counts(db: &PathBuf) -> (u64, u64, u64) {
    let storage = open_storage(db).expect("Failed to reopen test database");
    storage.counts().expect("Failed to count rows")
}

const LIST_WITH_C2: &str = r#"<Bills><Bill><NumberCode>C-2</NumberCode></Bill></Bills>"#;

const ASSENTED_BILL_DATA: &str = r#"<Bill>
    <LatestCompletedBillStageName>Royal assent</LatestCompletedBillStageName>
    <LatestCompletedBillStageDateTime>2021-06-01</LatestCompletedBillStageDateTime>
    <ReceivedRoyalAssent>true</ReceivedRoyalAssent>
    <Votes>
        <Vote>
            <Description>3rd reading</Description>
            <Decision>Agreed To</Decision>
            <TotalYeas>150</TotalYeas>
            <TotalNays>100</TotalNays>
            <TotalAbstain>0</TotalAbstain>
            <VoteDate>2021-06-01</VoteDate>
        </Vote>
    </Votes>
</Bill>"#;

fn version_document(title: &str) -> String {
    format!(
        r#"<Bill>
        <Identification>
            <BillNumber>C-2</BillNumber>
            <LongTitle>{}</LongTitle>
        </Identification>
        <Body><Section>1.</Section></Body>
    </Bill>"#,
        title
    )
}

#[tokio::test]
async fn test_end_to_end_assented_bill() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    Mock::given(method("GET"))
        .and(path("/legisinfo/en/bills/xml"))
        .and(query_param("parlsession", "44-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_WITH_C2))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/LegisInfo/en/bill/44-1/C-2/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ASSENTED_BILL_DATA))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Content/Bills/441/Government/C-2/C-2_1/C-2_E.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(version_document("An Act")))
        .mount(&mock_server)
        .await;

    // Everything unmatched (version 2 onward) falls through to wiremock's
    // default 404, which classifies Terminal

    run_crawl(test_config(&mock_server.uri(), &db)).await;

    let (bills, versions, votes) = counts(&db);
    assert_eq!(bills, 1);
    assert_eq!(versions, 1);
    assert_eq!(votes, 1);

    let conn = rusqlite::Connection::open(&db).unwrap();

    let (number_code, stage): (String, String) = conn
        .query_row(
            "SELECT number_code, latest_completed_stage FROM bills",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(number_code, "C-2");
    assert_eq!(stage, "Royal assent");

    let yeas: i64 = conn
        .query_row(
            "SELECT total_yeas FROM bill_votes
             WHERE related_bill_number = 'C-2' AND parliament_number = 44
               AND session_number = 1 AND vote_date = '2021-06-01'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(yeas, 150);
}

#[tokio::test]
async fn test_version_probe_stops_at_first_terminal() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    Mock::given(method("GET"))
        .and(path("/legisinfo/en/bills/xml"))
        .and(query_param("parlsession", "44-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_WITH_C2))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/LegisInfo/en/bill/44-1/C-2/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Bill></Bill>"))
        .mount(&mock_server)
        .await;

    for index in 1..=2 {
        Mock::given(method("GET"))
            .and(path(format!(
                "/Content/Bills/441/Government/C-2/C-2_{}/C-2_E.xml",
                index
            )))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(version_document(&format!("Version {}", index))),
            )
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/Content/Bills/441/Government/C-2/C-2_3/C-2_E.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    // Index 3 classified Terminal, so index 4 must never be requested
    Mock::given(method("GET"))
        .and(path("/Content/Bills/441/Government/C-2/C-2_4/C-2_E.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(version_document("ghost")))
        .expect(0)
        .mount(&mock_server)
        .await;

    run_crawl(test_config(&mock_server.uri(), &db)).await;

    // Natural key covers the bill triple, so first-write-wins keeps only the
    // first probed version
    let conn = rusqlite::Connection::open(&db).unwrap();
    let stored_index: i64 = conn
        .query_row(
            "SELECT version_index FROM bill_versions WHERE bill_number = 'C-2'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored_index, 1);
}

#[tokio::test]
async fn test_empty_session_list_issues_no_bill_fetches() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    Mock::given(method("GET"))
        .and(path("/legisinfo/en/bills/xml"))
        .and(query_param("parlsession", "44-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Bills></Bills>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/LegisInfo/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Bill></Bill>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/Content/.*"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&mock_server)
        .await;

    run_crawl(test_config(&mock_server.uri(), &db)).await;

    assert_eq!(counts(&db), (0, 0, 0));
}

#[tokio::test]
async fn test_unassented_bill_emits_no_votes() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    Mock::given(method("GET"))
        .and(path("/legisinfo/en/bills/xml"))
        .and(query_param("parlsession", "44-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_WITH_C2))
        .mount(&mock_server)
        .await;

    // Vote-shaped elements but no assent token
    let body = r#"<Bill>
        <CurrentStageName>Second reading</CurrentStageName>
        <Votes><Vote><VoteDate>2021-05-01</VoteDate><TotalYeas>99</TotalYeas></Vote></Votes>
    </Bill>"#;
    Mock::given(method("GET"))
        .and(path("/LegisInfo/en/bill/44-1/C-2/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    run_crawl(test_config(&mock_server.uri(), &db)).await;

    let (bills, _versions, votes) = counts(&db);
    assert_eq!(bills, 1);
    assert_eq!(votes, 0);
}

#[tokio::test]
async fn test_parliament_loop_stops_after_consecutive_empty_parliaments() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let mut config = test_config(&mock_server.uri(), &db);
    config.crawl.max_parliament = 99;
    config.crawl.stop_after_empty_parliaments = 2;

    // Parliament 44 is live (an empty but successful list); 45 and 46 are
    // all-terminal, which exhausts the streak
    Mock::given(method("GET"))
        .and(path("/legisinfo/en/bills/xml"))
        .and(query_param("parlsession", "44-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Bills></Bills>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/legisinfo/en/bills/xml"))
        .and(query_param("parlsession", "47-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Bills></Bills>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    // 45-1 and 46-1 fall through to the default 404

    run_crawl(config).await;

    assert_eq!(counts(&db), (0, 0, 0));
}

#[tokio::test]
async fn test_transient_session_fetch_is_retried_then_abandoned() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    // Always 500: two attempts (retry_attempts = 2), then abandonment
    Mock::given(method("GET"))
        .and(path("/legisinfo/en/bills/xml"))
        .and(query_param("parlsession", "44-1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    run_crawl(test_config(&mock_server.uri(), &db)).await;

    // Nothing persisted, but the crawl completed rather than crashing
    assert_eq!(counts(&db), (0, 0, 0));
}

#[tokio::test]
async fn test_rediscovery_keeps_first_write() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    Mock::given(method("GET"))
        .and(path("/legisinfo/en/bills/xml"))
        .and(query_param("parlsession", "44-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LIST_WITH_C2))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/LegisInfo/en/bill/44-1/C-2/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ASSENTED_BILL_DATA))
        .mount(&mock_server)
        .await;

    // Two full runs against the same database
    run_crawl(test_config(&mock_server.uri(), &db)).await;
    run_crawl(test_config(&mock_server.uri(), &db)).await;

    let (bills, _versions, votes) = counts(&db);
    assert_eq!(bills, 1);
    assert_eq!(votes, 1);
}
