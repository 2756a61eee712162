//! Session manager lifecycle: restoration, login, logout.

mod support;

use std::sync::Arc;

use reelview_core::{SessionManager, SessionPhase, SessionState};
use reelview_domain::{ReelviewError, RouteConfig};
use support::{user, MockBackend, RecordingNavigator};

type Manager = SessionManager<MockBackend, RecordingNavigator>;

fn manager(backend: MockBackend, location: &str) -> (Manager, Arc<MockBackend>, Arc<RecordingNavigator>) {
    let state = Arc::new(SessionState::new());
    let backend = Arc::new(backend);
    backend.observe(state.clone());
    let navigator = Arc::new(RecordingNavigator::at(location));
    let manager =
        SessionManager::new(state, backend.clone(), navigator.clone(), RouteConfig::default());
    (manager, backend, navigator)
}

#[tokio::test]
async fn restore_without_callback_or_cookie_ends_anonymous() {
    let (manager, backend, navigator) = manager(MockBackend::anonymous(), "http://localhost:5173/");

    let snapshot = manager.restore_session().await;

    assert_eq!(snapshot.access_token, None);
    assert_eq!(snapshot.user, None);
    assert!(!snapshot.loading);
    assert_eq!(manager.phase(), SessionPhase::Anonymous);
    assert_eq!(MockBackend::count(&backend.refresh_calls), 1);
    assert_eq!(MockBackend::count(&backend.user_calls), 0);
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn restore_from_refresh_cookie() {
    let (manager, backend, _) =
        manager(MockBackend::with_refresh("T1", user("ada@example.com")), "/");

    let snapshot = manager.restore_session().await;

    assert_eq!(snapshot.access_token.as_deref(), Some("T1"));
    assert_eq!(snapshot.user.map(|u| u.email), Some("ada@example.com".to_string()));
    assert_eq!(manager.phase(), SessionPhase::Authenticated);
    // `/me` ran with the refreshed token already in place
    assert_eq!(*backend.tokens_seen_by_me.lock().unwrap(), vec![Some("T1".to_string())]);
}

#[tokio::test]
async fn oauth_callback_takes_precedence_over_refresh() {
    let (manager, backend, navigator) = manager(
        MockBackend::with_refresh("FROM_COOKIE", user("ada@example.com")),
        "http://localhost:5173/?access=FROM_GOOGLE",
    );

    let snapshot = manager.restore_session().await;

    assert_eq!(snapshot.access_token.as_deref(), Some("FROM_GOOGLE"));
    assert!(snapshot.user.is_some());
    assert_eq!(MockBackend::count(&backend.refresh_calls), 0);
    assert_eq!(*backend.tokens_seen_by_me.lock().unwrap(), vec![Some("FROM_GOOGLE".to_string())]);
    assert_eq!(navigator.replaced(), vec!["http://localhost:5173/".to_string()]);
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn oauth_callback_with_rejected_token_ends_anonymous() {
    let backend = MockBackend::new(
        Ok("FROM_COOKIE".into()),
        Err(ReelviewError::Auth("invalid token".into())),
    );
    let (manager, backend, navigator) = manager(backend, "/?access=BROKEN");

    let snapshot = manager.restore_session().await;

    assert!(!snapshot.is_logged_in());
    assert!(!snapshot.loading);
    assert_eq!(MockBackend::count(&backend.refresh_calls), 0);
    assert_eq!(navigator.replaced(), vec!["/".to_string()]);
}

#[tokio::test]
async fn refresh_success_but_profile_failure_clears_token() {
    let backend =
        MockBackend::new(Ok("T1".into()), Err(ReelviewError::Network("timed out".into())));
    let (manager, _, _) = manager(backend, "/");

    let snapshot = manager.restore_session().await;

    assert_eq!(snapshot.access_token, None);
    assert_eq!(snapshot.user, None);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn restoration_runs_once() {
    let (manager, backend, _) =
        manager(MockBackend::with_refresh("T1", user("ada@example.com")), "/");

    let first = manager.restore_session().await;
    manager.logout().await;
    let second = manager.restore_session().await;

    assert!(first.is_logged_in());
    assert!(!second.is_logged_in());
    assert!(!second.loading);
    assert_eq!(MockBackend::count(&backend.refresh_calls), 1);
}

#[tokio::test]
async fn ready_observes_settled_state() {
    let (manager, _, _) = manager(MockBackend::with_refresh("T1", user("ada@example.com")), "/");
    let manager = Arc::new(manager);
    let mut rx = manager.subscribe();

    let waiter = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.ready().await })
    };

    assert!(manager.is_loading());
    manager.restore_session().await;

    let ready = waiter.await.unwrap();
    assert!(!ready.loading);
    assert!(ready.is_logged_in());

    // Once loading has cleared the logged-in flag no longer moves on its own.
    manager.restore_session().await;
    assert!(rx.has_changed().unwrap());
    let latest = rx.borrow_and_update().clone();
    assert_eq!(latest, ready);
}

#[tokio::test]
async fn login_adopts_token_and_user() {
    let (manager, backend, _) = manager(MockBackend::anonymous(), "/");
    manager.restore_session().await;

    manager.login("T9".into(), user("grace@example.com"));

    assert!(manager.is_logged_in());
    assert_eq!(manager.access_token().as_deref(), Some("T9"));
    assert_eq!(manager.user().map(|u| u.email), Some("grace@example.com".to_string()));
    assert_eq!(MockBackend::count(&backend.user_calls), 0);
}

#[tokio::test]
async fn logout_clears_state_even_when_backend_fails() {
    let (manager, backend, navigator) = manager(MockBackend::anonymous().failing_logout(), "/");
    manager.restore_session().await;
    manager.login("T1".into(), user("ada@example.com"));

    manager.logout().await;

    assert_eq!(MockBackend::count(&backend.logout_calls), 1);
    assert!(!manager.is_logged_in());
    assert!(manager.user().is_none());
    assert_eq!(navigator.redirects(), vec!["/login".to_string()]);
}
