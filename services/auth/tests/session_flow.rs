//! End-to-end session flow against on-disk storage

use auth::{AuthError, Credentials, GateDecision, SessionStore, decide};
use common::{LocalStorage, StorageConfig};

#[test]
fn test_sign_up_sign_out_sign_in() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorageConfig::new(
        std::env::temp_dir().join(format!("explorer-auth-{}", uuid::Uuid::new_v4())),
    );
    let store = SessionStore::restored(LocalStorage::on_disk(&config)?);
    assert_eq!(decide(&store.status()), GateDecision::RedirectToSignIn);

    store.sign_up(Credentials::new("a@x.com", "pw1"))?;
    assert_eq!(decide(&store.status()), GateDecision::Render);

    store.sign_out();
    assert_eq!(decide(&store.status()), GateDecision::RedirectToSignIn);

    let wrong = store.sign_in(Credentials::new("a@x.com", "pw2"));
    assert_eq!(wrong.unwrap_err(), AuthError::InvalidCredentials);

    store.sign_in(Credentials::new("a@x.com", "pw1"))?;

    // A second process sees the same user list and session
    let reopened = SessionStore::new(LocalStorage::on_disk(&config)?);
    assert_eq!(decide(&reopened.status()), GateDecision::Placeholder);
    reopened.restore();
    assert_eq!(
        reopened.current_user().map(|s| s.email),
        Some("a@x.com".to_string())
    );
    assert_eq!(
        reopened.sign_up(Credentials::new("a@x.com", "pw3")).unwrap_err(),
        AuthError::DuplicateEmail
    );

    std::fs::remove_dir_all(&config.dir)?;
    Ok(())
}
