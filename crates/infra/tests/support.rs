use std::sync::Arc;

use reelview_domain::{ApiConfig, ClientConfig};
use reelview_infra::{build_session, InMemoryNavigator, SessionHandle};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Session wired against `server`, starting at `location`.
pub fn session_for(server: &MockServer, location: &str) -> (SessionHandle, Arc<InMemoryNavigator>) {
    let config = ClientConfig {
        api: ApiConfig { base_url: server.uri(), ..ApiConfig::default() },
        ..ClientConfig::default()
    };
    let navigator = Arc::new(InMemoryNavigator::new(location));
    let handle = build_session(&config, navigator.clone()).expect("session should build");
    (handle, navigator)
}

pub fn user_json(email: &str) -> Value {
    json!({ "id": 1, "email": email, "name": "Ada Lovelace", "role": "member" })
}
