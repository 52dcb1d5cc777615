//! Tests for the account service.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockUserRepository, StoredCredentials};
use crate::domain::{DisplayName, Email, ErrorCode};

#[fixture]
fn ada() -> User {
    User {
        id: UserId::random(),
        email: Email::new("ada@example.com").expect("valid email"),
        display_name: DisplayName::new("Ada").expect("valid display name"),
        created_at: Utc::now(),
    }
}

fn service(repo: MockUserRepository) -> UserAccountService<MockUserRepository> {
    UserAccountService::new(Arc::new(repo))
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("Ada@Example.com", password).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn register_stores_a_hash_not_the_password(ada: User) {
    let mut repo = MockUserRepository::new();
    let created = ada.clone();
    repo.expect_create()
        .withf(|user: &NewUser| {
            user.email.as_ref() == "ada@example.com"
                && user.password_hash.as_ref() != "correct horse"
                && user.password_hash.verify("correct horse")
        })
        .times(1)
        .return_once(move |_| Ok(created));

    let registration = Registration::try_from_parts("ada@example.com", "Ada", "correct horse")
        .expect("valid registration");
    let user = service(repo)
        .register(&registration)
        .await
        .expect("registration succeeds");
    assert_eq!(user, ada);
}

#[tokio::test]
async fn register_maps_duplicate_email_to_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(RepositoryError::already_exists("user")));

    let registration = Registration::try_from_parts("ada@example.com", "Ada", "correct horse")
        .expect("valid registration");
    let error = service(repo)
        .register(&registration)
        .await
        .expect_err("duplicate email");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn authenticate_accepts_matching_password(ada: User) {
    let hash = PasswordHash::generate("correct horse").expect("hash");
    let stored = StoredCredentials {
        user: ada.clone(),
        password_hash: hash,
    };
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials()
        .withf(|email: &Email| email.as_ref() == "ada@example.com")
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let user = service(repo)
        .authenticate(&credentials("correct horse"))
        .await
        .expect("login succeeds");
    assert_eq!(user.id, ada.id);
}

#[rstest]
#[tokio::test]
async fn wrong_password_and_unknown_email_fail_alike(ada: User) {
    let stored = StoredCredentials {
        user: ada,
        password_hash: PasswordHash::generate("correct horse").expect("hash"),
    };
    let mut known = MockUserRepository::new();
    known
        .expect_find_credentials()
        .return_once(move |_| Ok(Some(stored)));
    let mut unknown = MockUserRepository::new();
    unknown.expect_find_credentials().return_once(|_| Ok(None));

    let wrong = service(known)
        .authenticate(&credentials("battery staple"))
        .await
        .expect_err("wrong password");
    let missing = service(unknown)
        .authenticate(&credentials("correct horse"))
        .await
        .expect_err("unknown email");

    assert_eq!(wrong.code(), ErrorCode::Unauthorized);
    assert_eq!(missing.code(), ErrorCode::Unauthorized);
    assert_eq!(wrong.message(), missing.message());
}

#[tokio::test]
async fn profile_of_deleted_user_is_unauthorised() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let error = service(repo)
        .profile(&UserId::random())
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn repository_outage_is_service_unavailable() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(RepositoryError::connection("pool exhausted")));

    let error = service(repo)
        .profile(&UserId::random())
        .await
        .expect_err("outage");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
