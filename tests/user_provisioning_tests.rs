mod common;

use actix_rt::test;
use common::fixtures::test_user;
use common::{test_auth_config, Harness};
use relief_backend::middleware::auth::UserProvisioningService;
use relief_backend::utils::jwt::{create_access_token, validate_token, Claims};
use uuid::Uuid;

fn claims_for(sub: Uuid, email: Option<&str>, name: Option<&str>) -> Claims {
    let config = test_auth_config();
    let token = create_access_token(sub, email, name, &config).expect("token");
    validate_token(&token, &config).expect("claims")
}

#[test]
async fn first_sight_creates_the_user_from_claims() {
    let harness = Harness::new();
    let sub = Uuid::new_v4();

    let user = harness
        .user_service()
        .provision_user(&claims_for(sub, Some("new@relief.test"), Some("New Person")))
        .await
        .expect("provisioning should succeed");

    assert_eq!(user.id, sub);
    assert_eq!(user.email, "new@relief.test");
    assert_eq!(user.name.as_deref(), Some("New Person"));
    assert_eq!(harness.users.count(), 1);
}

#[test]
async fn known_subject_is_returned_without_a_new_row() {
    let harness = Harness::new();
    let existing = test_user("known@relief.test");
    harness.users.push(existing.clone());

    let user = harness
        .user_service()
        .provision_user(&claims_for(existing.id, Some("changed@relief.test"), None))
        .await
        .expect("provisioning should succeed");

    assert_eq!(user.id, existing.id);
    assert_eq!(user.email, existing.email);
    assert_eq!(harness.users.count(), 1);
}

#[test]
async fn missing_email_claim_gets_a_placeholder_address() {
    let harness = Harness::new();
    let sub = Uuid::new_v4();

    let user = harness
        .user_service()
        .provision_user(&claims_for(sub, None, None))
        .await
        .expect("provisioning should succeed");

    assert_eq!(user.email, format!("{sub}@users.invalid"));
    assert!(user.name.is_none());
}

#[test]
async fn email_taken_by_another_subject_is_a_conflict() {
    let harness = Harness::new();
    harness.users.push(test_user("taken@relief.test"));

    let result = harness
        .user_service()
        .provision_user(&claims_for(Uuid::new_v4(), Some("taken@relief.test"), None))
        .await;

    assert!(matches!(
        result,
        Err(relief_backend::error::AppError::Conflict(_))
    ));
}
