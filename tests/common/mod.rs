use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use uuid::Uuid;

use placement_client::api::ApiClient;
use placement_client::cache::QueryCache;
use placement_client::config::{ApiConfig, CacheConfig};
use placement_client::hooks::Hooks;
use placement_client::services::Services;
use placement_client::session::{Role, Session, SessionProvider};
use placement_client::stores::SelectionStore;

pub const TEST_TOKEN: &str = "test-token";

// Serve the fake backend on an ephemeral port
pub async fn spawn_backend(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn api_config(base_url: String) -> ApiConfig {
    ApiConfig {
        base_url,
        timeout_ms: 2_000,
        rate_limit_per_second: 100,
        user_agent: "placement-client-tests".to_string(),
    }
}

pub fn session_with_role(role: Role) -> Session {
    Session {
        user_id: Uuid::new_v4(),
        role,
        token: TEST_TOKEN.to_string(),
    }
}

pub fn candidate_session() -> Session {
    session_with_role(Role::Candidate)
}

pub fn client_for(addr: SocketAddr, session: SessionProvider) -> ApiClient {
    ApiClient::new(&api_config(format!("http://{}", addr)), session).unwrap()
}

pub fn hooks_for(addr: SocketAddr, session: Option<Session>) -> Hooks {
    let session = SessionProvider::new(session);
    Hooks::new(
        Services::new(client_for(addr, session.clone())),
        QueryCache::new(&CacheConfig::default()),
        session,
        SelectionStore::new(),
    )
}
