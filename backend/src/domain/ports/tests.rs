//! Behavioural checks for the port error types and generated mocks.

use super::*;
use crate::domain::value_objects::{Identifier, Password};
use pagination::{Page, PageRequest};
use rstest::rstest;

#[rstest]
#[case(RepositoryError::connection("refused"), "repository connection failed: refused")]
#[case(RepositoryError::query("syntax"), "repository query failed: syntax")]
#[case(RepositoryError::duplicate("email"), "repository rejected duplicate: email")]
fn repository_errors_format_messages(#[case] error: RepositoryError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn password_hasher_errors_format_messages() {
    let error = PasswordHasherError::malformed_hash("no salt");
    assert_eq!(error.to_string(), "stored password hash is malformed: no salt");
}

#[tokio::test]
async fn mocked_repository_returns_configured_page() {
    let mut repo = MockNotificationRepository::new();
    repo.expect_list_for_user()
        .times(1)
        .return_once(|_, request| Ok(Page::empty(request)));

    let page = repo
        .list_for_user(&Identifier::random(), PageRequest::default())
        .await
        .expect("mock answers");
    assert!(page.items().is_empty());
    assert!(!page.pagination().has_next());
}

#[rstest]
fn mocked_hasher_is_usable_through_trait_object() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .returning(|password, hash| Ok(password.value() == hash));
    let hasher: &dyn PasswordHasher = &hasher;
    assert_eq!(hasher.verify(&Password::new("secret"), "secret"), Ok(true));
}
