//! End-to-end tests for the onboarding chain against in-memory fakes.

mod support;

use std::time::Duration;

use onboarding_domain::{
    OnboardingError, OnboardingStatus, OnboardingStep, PartnerOperation,
};
use serde_json::Value;
use support::{
    Harness, InMemorySecretStore, ACCOUNT_ID_REF, API_KEY_REF, KEY_PREFIX, PARTNER_ACCOUNT_ID,
};

#[tokio::test]
async fn successful_onboarding_reports_every_identifier() {
    let harness = Harness::new();

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.status, OnboardingStatus::Success);
    assert_eq!(outcome.child_account_id(), Some("c-1"));
    assert_eq!(outcome.onboarding_id(), Some("o-c-1"));
    assert!(outcome.failed_step.is_none());

    let url = outcome.template_url().unwrap();
    assert!(url.starts_with("https://artifacts.test/templates/c-1?expires="));
    assert!(outcome.progress.template_url_expires_at.is_some());

    let (bytes, content_type) = harness.artifacts.object("templates/c-1").unwrap();
    assert_eq!(content_type, "application/json");
    let stored: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stored["Description"], "Partner access for c-1");
}

#[tokio::test]
async fn partner_calls_run_in_order_with_resolved_credentials() {
    let harness = Harness::new();

    harness.onboarding().onboard("Acme").await;

    assert_eq!(
        harness.partner.calls(),
        vec![
            PartnerOperation::CreateChildAccount,
            PartnerOperation::InitiateOnboarding,
            PartnerOperation::FetchDeploymentTemplate,
        ]
    );
    assert_eq!(harness.connector.connections(), vec![PARTNER_ACCOUNT_ID.to_string()]);
}

#[tokio::test]
async fn flat_map_omits_identifiers_that_were_never_created() {
    let harness = Harness::new();
    harness.partner.fail_with_server_error(PartnerOperation::InitiateOnboarding);

    let map = harness.onboarding().onboard("Acme").await.to_flat_map();

    assert_eq!(map.get("status").map(String::as_str), Some("FAILED"));
    assert_eq!(map.get("child_account_id").map(String::as_str), Some("c-1"));
    assert!(!map.contains_key("onboarding_id"));
    assert!(!map.contains_key("template_url"));
}

#[tokio::test]
async fn blank_account_name_fails_before_any_remote_call() {
    let harness = Harness::new();

    let outcome = harness.onboarding().onboard("   ").await;

    assert_eq!(outcome.status, OnboardingStatus::Failed);
    assert_eq!(outcome.failed_step, Some(OnboardingStep::ValidateRequest));
    assert!(harness.partner.calls().is_empty());
    assert_eq!(harness.secrets.reads(), 0);
}

#[tokio::test]
async fn missing_secret_fails_at_credential_resolution() {
    let harness =
        Harness::new().with_secrets(InMemorySecretStore::new().with_text(ACCOUNT_ID_REF, "org"));

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.status, OnboardingStatus::Failed);
    assert_eq!(outcome.failed_step, Some(OnboardingStep::ResolveCredentials));
    assert!(outcome.child_account_id().is_none());
    assert!(harness.partner.calls().is_empty());
}

#[tokio::test]
async fn denied_secret_fails_at_credential_resolution() {
    let harness = Harness::new().with_secrets(
        InMemorySecretStore::new()
            .with_text(ACCOUNT_ID_REF, "org")
            .with_text(API_KEY_REF, "key")
            .deny(API_KEY_REF),
    );

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.failed_step, Some(OnboardingStep::ResolveCredentials));
    assert!(harness.connector.connections().is_empty());
}

#[tokio::test]
async fn create_failure_reports_no_identifiers() {
    let harness = Harness::new();
    harness.partner.fail_on(
        PartnerOperation::CreateChildAccount,
        OnboardingError::PartnerApi {
            operation: PartnerOperation::CreateChildAccount,
            status: 409,
            message: "Name: already exists.".into(),
        },
    );

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.status, OnboardingStatus::Failed);
    assert_eq!(outcome.failed_step, Some(OnboardingStep::CreateChildAccount));
    assert!(outcome.child_account_id().is_none());
    assert!(outcome.onboarding_id().is_none());
    assert!(harness.artifacts.keys().is_empty());
}

#[tokio::test]
async fn initiate_failure_keeps_the_created_child_account() {
    let harness = Harness::new();
    harness.partner.fail_with_server_error(PartnerOperation::InitiateOnboarding);

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.status, OnboardingStatus::Failed);
    assert_eq!(outcome.failed_step, Some(OnboardingStep::InitiateOnboarding));
    assert_eq!(outcome.child_account_id(), Some("c-1"));
    assert!(outcome.onboarding_id().is_none());
    assert!(outcome.template_url().is_none());
}

#[tokio::test]
async fn template_fetch_failure_keeps_both_identifiers() {
    let harness = Harness::new();
    harness.partner.fail_on(
        PartnerOperation::FetchDeploymentTemplate,
        OnboardingError::PartnerApiUnreachable {
            operation: PartnerOperation::FetchDeploymentTemplate,
            message: "connection reset".into(),
        },
    );

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.status, OnboardingStatus::Failed);
    assert_eq!(outcome.failed_step, Some(OnboardingStep::FetchTemplate));
    assert_eq!(outcome.child_account_id(), Some("c-1"));
    assert_eq!(outcome.onboarding_id(), Some("o-c-1"));
    assert!(harness.artifacts.keys().is_empty());
}

#[tokio::test]
async fn storage_write_failure_fails_the_publish_step() {
    let harness = Harness::new();
    harness.artifacts.fail_writes();

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.status, OnboardingStatus::Failed);
    assert_eq!(outcome.failed_step, Some(OnboardingStep::PublishTemplate));
    assert_eq!(outcome.child_account_id(), Some("c-1"));
    assert_eq!(outcome.onboarding_id(), Some("o-c-1"));
    assert!(outcome.template_url().is_none());
}

#[tokio::test]
async fn unrepresentable_url_validity_fails_the_publish_step_with_identifiers() {
    let harness = Harness::new().with_url_ttl(Duration::from_secs(10_000_000_000_000));

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.status, OnboardingStatus::Failed);
    assert_eq!(outcome.failed_step, Some(OnboardingStep::PublishTemplate));
    assert_eq!(outcome.child_account_id(), Some("c-1"));
    assert_eq!(outcome.onboarding_id(), Some("o-c-1"));
    assert!(harness.artifacts.keys().is_empty());
}

#[tokio::test]
async fn signing_failure_needs_investigation_but_keeps_the_artifact() {
    let harness = Harness::new();
    harness.artifacts.fail_signing();

    let outcome = harness.onboarding().onboard("Acme").await;

    assert_eq!(outcome.status, OnboardingStatus::NeedsInvestigation);
    assert!(!outcome.is_success());
    assert_eq!(outcome.child_account_id(), Some("c-1"));
    assert_eq!(outcome.onboarding_id(), Some("o-c-1"));
    assert!(outcome.template_url().is_none());
    assert_eq!(harness.artifacts.keys(), vec![format!("{KEY_PREFIX}c-1")]);
}

#[tokio::test]
async fn repeating_a_request_creates_a_second_child_account() {
    let harness = Harness::new();
    let service = harness.onboarding();

    let first = service.onboard("Acme").await;
    let second = service.onboard("Acme").await;

    assert_eq!(first.child_account_id(), Some("c-1"));
    assert_eq!(second.child_account_id(), Some("c-2"));
    assert_eq!(harness.artifacts.keys(), vec!["templates/c-1", "templates/c-2"]);
}

#[tokio::test]
async fn credentials_are_read_once_per_service() {
    let harness = Harness::new();
    let service = harness.onboarding();

    service.onboard("Acme").await;
    service.onboard("Globex").await;

    assert_eq!(harness.secrets.reads(), 2);
    assert_eq!(harness.connector.connections().len(), 2);
}

#[tokio::test]
async fn suffix_is_appended_to_the_account_name() {
    let harness = Harness::new().with_suffix("c/o Ibexlabs");

    harness.onboarding().onboard("  Acme  ").await;

    assert_eq!(harness.partner.created_names(), vec!["Acme c/o Ibexlabs"]);
}

#[tokio::test]
async fn name_is_sent_unchanged_without_a_suffix() {
    let harness = Harness::new();

    harness.onboarding().onboard("Acme").await;

    assert_eq!(harness.partner.created_names(), vec!["Acme"]);
}
