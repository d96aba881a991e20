/// Integration tests for the application layer
mod test_utilities;

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use test_utilities::mocks::*;
use registry_detail::prelude::*;

fn tag(name: &str, image: &str, minutes_ago: i64) -> Tag {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Tag::new(
        name,
        ImageId::new(image),
        base - Duration::minutes(minutes_ago),
        Some(1024),
    )
}

fn build(id: &str, phase: &str) -> BuildRecord {
    BuildRecord::new(
        id,
        BuildPhase::new(phase),
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
    )
}

fn web() -> RepositoryName {
    RepositoryName::parse("acme/web").unwrap()
}

#[tokio::test]
async fn test_show_repository_detail_happy_path() {
    let repositories = Arc::new(
        MockRepositoryGateway::new()
            .with_description("Web frontend")
            .public()
            .with_tag(tag("v1", "sha256:aaa", 30))
            .with_tag(tag("latest", "sha256:bbb", 5))
            .with_tag(tag("v2", "sha256:bbb", 10)),
    );
    let builds = Arc::new(MockBuildHistoryGateway::new().with_build(build("b-1", "complete")));
    let security = Arc::new(
        MockTagSecurityGateway::new()
            .with_vulnerabilities("latest", 3)
            .with_vulnerabilities("v1", 0),
    );
    let tally = VulnerabilityTally::new();
    let reporter = MockProgressReporter::new();

    let controller = RepositoryDetailController::new(
        Arc::clone(&repositories),
        builds,
        Arc::clone(&security),
        tally.clone(),
    )
    .with_registry_url("registry.example.com");
    let mut use_case = ShowRepositoryDetailUseCase::new(controller, reporter.clone());

    let view = use_case
        .execute(DetailRequest::new(web(), Subscriptions::none()))
        .await
        .unwrap();

    assert_eq!(view.repository, "acme/web");
    assert_eq!(view.description.as_deref(), Some("Web frontend"));
    assert!(view.is_public);
    assert_eq!(
        view.docker_pull_command.as_deref(),
        Some("docker pull registry.example.com/acme/web")
    );

    let names: Vec<_> = view.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["latest", "v2", "v1"]);
    assert_eq!(view.pending_security_count(), 0);
    assert_eq!(view.builds.len(), 1);
    assert_eq!(view.builds[0].id, "b-1");

    // One lookup per distinct image, using the newest tag of that image
    let mut requested = security.requested_tags();
    requested.sort();
    assert_eq!(requested, vec!["latest", "v1"]);

    assert_eq!(tally.images(), 2);
    assert_eq!(tally.total(), 3);
    assert_eq!(tally.count_for(&ImageId::new("sha256:bbb")), Some(3));

    assert!(reporter.has_message_containing("Loading repository: acme/web"));
    assert!(reporter.has_message_containing("Completed: ✅ Repository detail ready"));
}

#[tokio::test]
async fn test_failed_security_lookup_leaves_tag_pending() {
    let repositories = Arc::new(
        MockRepositoryGateway::new()
            .with_tag(tag("stable", "sha256:aaa", 1))
            .with_tag(tag("edge", "sha256:ccc", 2)),
    );
    let security = Arc::new(MockTagSecurityGateway::new().failing_for("edge"));
    let reporter = MockProgressReporter::new();

    let controller = RepositoryDetailController::new(
        repositories,
        Arc::new(MockBuildHistoryGateway::new()),
        security,
        VulnerabilityTally::new(),
    );
    let mut use_case = ShowRepositoryDetailUseCase::new(controller, reporter.clone());

    let view = use_case
        .execute(DetailRequest::new(web(), Subscriptions::none()))
        .await
        .unwrap();

    assert_eq!(view.pending_security_count(), 1);
    let edge = view.tags.iter().find(|t| t.name == "edge").unwrap();
    assert!(matches!(edge.security, SecurityStatus::Pending));
    let stable = view.tags.iter().find(|t| t.name == "stable").unwrap();
    assert!(matches!(
        stable.security,
        SecurityStatus::Available {
            vulnerabilities: 0,
            ..
        }
    ));
    assert!(reporter.has_message_containing("Security data for tag 'edge' is unavailable"));
}

#[tokio::test]
async fn test_repository_failure_is_an_error() {
    let controller = RepositoryDetailController::new(
        Arc::new(MockRepositoryGateway::new().with_failure()),
        Arc::new(MockBuildHistoryGateway::new()),
        Arc::new(MockTagSecurityGateway::new()),
        VulnerabilityTally::new(),
    );
    let mut use_case = ShowRepositoryDetailUseCase::new(controller, MockProgressReporter::new());

    let err = use_case
        .execute(DetailRequest::new(web(), Subscriptions::none()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to load repository acme/web"));
    assert!(!use_case.controller().is_active());
}

#[tokio::test]
async fn test_build_history_failure_keeps_page() {
    let controller = RepositoryDetailController::new(
        Arc::new(MockRepositoryGateway::new().with_tag(tag("v1", "sha256:aaa", 1))),
        Arc::new(MockBuildHistoryGateway::new().with_failure()),
        Arc::new(MockTagSecurityGateway::new()),
        VulnerabilityTally::new(),
    );
    let reporter = MockProgressReporter::new();
    let mut use_case = ShowRepositoryDetailUseCase::new(controller, reporter.clone());

    let view = use_case
        .execute(DetailRequest::new(web(), Subscriptions::none()))
        .await
        .unwrap();

    assert_eq!(view.tags.len(), 1);
    assert!(view.builds.is_empty());
    assert!(reporter.has_message_containing("Build history is unavailable"));
}

#[tokio::test]
async fn test_update_description_saves_repository() {
    let repositories = Arc::new(MockRepositoryGateway::new().with_description("old"));
    let controller = RepositoryDetailController::new(
        Arc::clone(&repositories),
        Arc::new(MockBuildHistoryGateway::new()),
        Arc::new(MockTagSecurityGateway::new()),
        VulnerabilityTally::new(),
    );
    let mut use_case = ShowRepositoryDetailUseCase::new(controller, MockProgressReporter::new());

    use_case
        .execute(DetailRequest::new(web(), Subscriptions::none()))
        .await
        .unwrap();
    let view = use_case
        .update_description(Some("new".to_string()))
        .await
        .unwrap();

    assert_eq!(view.description.as_deref(), Some("new"));
    let updates = repositories.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].description(), Some("new"));
}

#[tokio::test]
async fn test_tag_window_is_limited_to_five_newest() {
    let mut gateway = MockRepositoryGateway::new();
    for i in 0..8 {
        gateway = gateway.with_tag(tag(&format!("t{}", i), &format!("sha256:{}", i), i));
    }
    let controller = RepositoryDetailController::new(
        Arc::new(gateway),
        Arc::new(MockBuildHistoryGateway::new()),
        Arc::new(MockTagSecurityGateway::new()),
        VulnerabilityTally::new(),
    );
    let mut use_case = ShowRepositoryDetailUseCase::new(controller, MockProgressReporter::new());

    let view = use_case
        .execute(DetailRequest::new(web(), Subscriptions::none()))
        .await
        .unwrap();

    let names: Vec<_> = view.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["t0", "t1", "t2", "t3", "t4"]);
}

#[tokio::test]
async fn test_build_notification_reloads_history_while_watching() {
    let builds = Arc::new(MockBuildHistoryGateway::new().with_build(build("b-1", "complete")));
    let controller = RepositoryDetailController::new(
        Arc::new(MockRepositoryGateway::new().with_tag(tag("v1", "sha256:aaa", 1))),
        Arc::clone(&builds),
        Arc::new(MockTagSecurityGateway::new()),
        VulnerabilityTally::new(),
    );
    let mut use_case = ShowRepositoryDetailUseCase::new(controller, MockProgressReporter::new());

    let events = BuildEventSource::new();
    let permission = PermissionBroadcast::new(false);
    let subscriptions = Subscriptions::none()
        .with_build_events(&events)
        .with_permission(&permission);
    let view = use_case
        .execute(DetailRequest::new(web(), subscriptions))
        .await
        .unwrap();
    assert_eq!(view.builds.len(), 1);
    assert!(!view.can_manage_builds);

    builds.push_front(build("b-2", "building"));
    events.notify();
    permission.publish(true);
    // Closing both sources ends the watch once the reload has landed
    drop(events);
    drop(permission);

    let mut renders = Vec::new();
    use_case
        .watch(std::future::pending::<()>(), |view| renders.push(view.clone()))
        .await
        .unwrap();

    let last = renders.last().unwrap();
    assert_eq!(last.builds.len(), 2);
    assert_eq!(last.builds[0].id, "b-2");
    assert!(renders.iter().any(|v| v.can_manage_builds));
    assert_eq!(builds.call_count(), 2);
    assert!(!use_case.controller().is_active());
}
