//! Tests for the verification workflow, reviews and resubmission

use healthdesk::core::models::{ProfessionalInfo, Role, VerificationStatus};
use healthdesk::core::services::{
    ProfileUpdate, ReviewDecision, StatusRoute, WorkflowError, WorkflowState, current_route,
    get_verification_status, resubmit, review_credential, review_profile,
};

use crate::common::fixtures;

#[test]
fn test_status_view_of_fresh_registration() {
    let stores = fixtures::stores();
    fixtures::register(&stores, "ada@example.com");
    let session = fixtures::sign_in(&stores, "ada@example.com");

    let view = get_verification_status(&stores, &session).unwrap();
    assert_eq!(view.state(), WorkflowState::Pending);
    assert_eq!(view.route(), StatusRoute::StatusScreen);
    assert_eq!(view.credentials.len(), 3);
    assert_eq!(view.notes(), None);
    assert!(!view.statuses_diverge());
}

#[test]
fn test_status_without_profile() {
    let stores = fixtures::stores();
    let session = fixtures::account(&stores, "nobody@example.com", Role::Doctor);

    let err = get_verification_status(&stores, &session).unwrap_err();
    assert!(matches!(err, WorkflowError::NoProfile));
    assert!(err.to_string().contains("complete your registration"));
    assert_eq!(current_route(&stores, &session).unwrap(), StatusRoute::Register);
}

#[test]
fn test_rejection_notes_reach_status_view() {
    let stores = fixtures::stores();
    let registration = fixtures::register(&stores, "ada@example.com");
    let session = fixtures::sign_in(&stores, "ada@example.com");

    review_profile(&stores, "admin-1", &registration.profile.id, &ReviewDecision::reject("Invalid license"))
        .unwrap();

    let view = get_verification_status(&stores, &session).unwrap();
    assert_eq!(view.state(), WorkflowState::Rejected);
    assert_eq!(view.notes(), Some("Invalid license"));
    assert_eq!(
        view.route(),
        StatusRoute::Resubmit {
            notes: Some("Invalid license".to_string())
        }
    );
    assert_eq!(view.profile.verified_by.as_deref(), Some("admin-1"));
    assert!(view.profile.verified_at.is_some());
}

#[test]
fn test_review_unknown_profile() {
    let stores = fixtures::stores();
    let err = review_profile(&stores, "admin", "missing", &ReviewDecision::verify()).unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(_)));
}

#[test]
fn test_review_cannot_set_pending() {
    let stores = fixtures::stores();
    let registration = fixtures::register(&stores, "ada@example.com");
    let decision = ReviewDecision {
        status: VerificationStatus::Pending,
        notes: None,
    };

    let err = review_profile(&stores, "admin", &registration.profile.id, &decision).unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));

    let credential = &registration.credentials[0];
    let err = review_credential(&stores, "admin", &credential.id, &decision).unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
}

#[test]
fn test_review_cannot_return_rejected_profile_to_pending() {
    let stores = fixtures::stores();
    let registration = fixtures::register(&stores, "ada@example.com");
    let id = &registration.profile.id;
    review_profile(&stores, "admin-1", id, &ReviewDecision::reject("bad")).unwrap();

    let decision = ReviewDecision {
        status: VerificationStatus::Pending,
        notes: None,
    };
    let err = review_profile(&stores, "admin-2", id, &decision).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::InvalidTransition {
            from: WorkflowState::Rejected,
            to: WorkflowState::Pending
        }
    ));

    let profile = stores.profiles.get(id).unwrap().unwrap();
    assert_eq!(profile.verified_status, VerificationStatus::Rejected);
    assert_eq!(profile.verified_by.as_deref(), Some("admin-1"));
    assert_eq!(profile.verifier_notes.as_deref(), Some("bad"));
}

#[test]
fn test_verified_profile_can_be_rereviewed() {
    let stores = fixtures::stores();
    let registration = fixtures::register(&stores, "ada@example.com");
    let id = &registration.profile.id;

    review_profile(&stores, "admin", id, &ReviewDecision::verify()).unwrap();
    let profile = review_profile(&stores, "admin", id, &ReviewDecision::reject("Expired")).unwrap();
    assert_eq!(profile.verified_status, VerificationStatus::Rejected);
}

#[test]
fn test_credential_and_profile_statuses_are_independent() {
    let stores = fixtures::stores();
    let registration = fixtures::register(&stores, "ada@example.com");
    let session = fixtures::sign_in(&stores, "ada@example.com");

    for credential in &registration.credentials {
        review_credential(&stores, "admin", &credential.id, &ReviewDecision::verify()).unwrap();
    }

    let view = get_verification_status(&stores, &session).unwrap();
    assert_eq!(view.state(), WorkflowState::Pending);
    assert!(view.credentials.iter().all(|c| c.verification_status.is_verified()));
    assert!(view.statuses_diverge());

    review_profile(&stores, "admin", &registration.profile.id, &ReviewDecision::verify()).unwrap();
    let view = get_verification_status(&stores, &session).unwrap();
    assert!(!view.statuses_diverge());
}

#[test]
fn test_resubmit_after_rejection() {
    let stores = fixtures::stores();
    let registration = fixtures::register(&stores, "ada@example.com");
    let session = fixtures::sign_in(&stores, "ada@example.com");
    review_profile(&stores, "admin", &registration.profile.id, &ReviewDecision::reject("Blurry ID"))
        .unwrap();

    let update = ProfileUpdate {
        professional: ProfessionalInfo {
            specializations: vec!["Cardiologist".to_string(), "Internal Medicine".to_string()],
            experience_years: 6,
            languages: vec!["English".to_string(), "French".to_string()],
            ..ProfessionalInfo::default()
        },
        ..ProfileUpdate::default()
    };
    let profile = resubmit(&stores, &session, Some(update)).unwrap();

    assert_eq!(profile.verified_status, VerificationStatus::Pending);
    assert_eq!(profile.experience_years, 6);
    assert_eq!(profile.languages.len(), 2);
    assert_eq!(current_route(&stores, &session).unwrap(), StatusRoute::StatusScreen);
}

#[test]
fn test_resubmit_only_from_rejected() {
    let stores = fixtures::stores();
    fixtures::register(&stores, "ada@example.com");
    let session = fixtures::sign_in(&stores, "ada@example.com");

    let err = resubmit(&stores, &session, None).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::InvalidTransition {
            from: WorkflowState::Pending,
            to: WorkflowState::Pending
        }
    ));
}

#[test]
fn test_resubmit_validates_update() {
    let stores = fixtures::stores();
    let registration = fixtures::register(&stores, "ada@example.com");
    let session = fixtures::sign_in(&stores, "ada@example.com");
    review_profile(&stores, "admin", &registration.profile.id, &ReviewDecision::reject("No"))
        .unwrap();

    let err = resubmit(&stores, &session, Some(ProfileUpdate::default())).unwrap_err();
    assert!(matches!(err, WorkflowError::Invalid(_)));

    let view = get_verification_status(&stores, &session).unwrap();
    assert_eq!(view.state(), WorkflowState::Rejected);
}
