//! Unit tests for the GitHub module.

use mockall::predicate::{always, function};
use rstest::rstest;

use super::{
    IssueCoordinates, IssueLookup, IssueNumber, LookupError, MockIssueGateway, PersonalAccessToken,
    parse_api_base,
};
use crate::github::models::IssueRecord;


fn sample_record() -> IssueRecord {
    IssueRecord {
        number: 13,
        title: "Widget explodes".to_owned(),
        url: "https://api.github.com/repos/acme/widget/issues/13".to_owned(),
        html_url: "https://github.com/acme/widget/issues/13".to_owned(),
        labels: Vec::new(),
        milestone: None,
    }
}

#[rstest]
#[case::missing_organization(None, Some("widget"), IssueNumber::new(13))]
#[case::missing_repository(Some("acme"), None, IssueNumber::new(13))]
#[case::missing_number(Some("acme"), Some("widget"), None)]
#[case::blank_organization(Some(""), Some("widget"), IssueNumber::new(13))]
#[tokio::test]
async fn incomplete_coordinates_skip_the_gateway(
    #[case] organization: Option<&str>,
    #[case] repository: Option<&str>,
    #[case] number: Option<IssueNumber>,
) {
    let mut gateway = MockIssueGateway::new();
    gateway.expect_issue().never();

    let result = IssueLookup::new(&gateway)
        .fetch(organization, repository, number)
        .await;

    assert_eq!(result, Err(LookupError::MissingCoordinates));
}

#[tokio::test]
async fn complete_coordinates_reach_the_gateway_once() {
    let mut gateway = MockIssueGateway::new();
    gateway
        .expect_issue()
        .with(function(|coordinates: &IssueCoordinates| {
            coordinates.issue_path() == "/repos/acme/widget/issues/13"
        }))
        .times(1)
        .returning(|_| Ok(sample_record()));

    let record = IssueLookup::new(&gateway)
        .fetch(Some("acme"), Some("widget"), IssueNumber::new(13))
        .await
        .expect("lookup should succeed");

    assert_eq!(record, sample_record());
}

#[tokio::test]
async fn gateway_errors_propagate_unchanged() {
    let mut gateway = MockIssueGateway::new();
    gateway.expect_issue().with(always()).times(1).returning(|_| {
        Err(LookupError::Network {
            message: "connection reset".to_owned(),
        })
    });

    let result = IssueLookup::new(&gateway)
        .fetch(Some("acme"), Some("widget"), IssueNumber::new(13))
        .await;

    let error = result.expect_err("lookup should fail");
    assert!(error.is_transient(), "network failures are transient");
}

#[rstest]
fn not_found_is_not_transient() {
    let error = LookupError::NotFound {
        status: 404,
        message: "Not Found".to_owned(),
    };
    assert!(!error.is_transient());
}

#[rstest]
fn coordinates_display_and_path() {
    let coordinates =
        IssueCoordinates::from_parts(Some("acme"), Some("widget"), IssueNumber::new(13))
            .expect("coordinates should be complete");

    assert_eq!(coordinates.to_string(), "acme/widget#13");
    assert_eq!(coordinates.issue_path(), "/repos/acme/widget/issues/13");
}

#[rstest]
fn rejects_zero_issue_number() {
    assert!(IssueNumber::new(0).is_none(), "zero is not an issue number");
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   ")]
fn rejects_blank_token(#[case] token: &str) {
    assert!(PersonalAccessToken::new(token).is_none());
}

#[rstest]
fn token_debug_output_is_redacted() {
    let token = PersonalAccessToken::new(" ghp_secret ").expect("token should be accepted");
    assert_eq!(token.value(), "ghp_secret");
    assert!(!format!("{token:?}").contains("ghp_secret"));
}

#[rstest]
#[case::github("https://api.github.com")]
#[case::enterprise("https://ghe.example.com/api/v3")]
#[case::local("http://127.0.0.1:8080")]
fn accepts_http_api_bases(#[case] base: &str) {
    assert!(parse_api_base(base).is_ok(), "{base} should be accepted");
}

#[rstest]
#[case::relative("api.github.com")]
#[case::ftp("ftp://example.com")]
fn rejects_non_http_api_bases(#[case] base: &str) {
    let result = parse_api_base(base);
    assert!(
        matches!(result, Err(LookupError::Configuration { .. })),
        "expected Configuration error for {base}, got {result:?}"
    );
}
