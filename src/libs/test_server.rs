use std::sync::{Arc, Mutex};

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

struct Canned {
    status: StatusCode,
    body: String,
    queries: Arc<Mutex<Vec<String>>>,
}

/// Answers every `GET /data` with the same status and body and remembers the
/// raw query strings it was asked for.
pub struct TestServer {
    pub base_url: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn spawn(status: StatusCode, body: &str) -> TestServer {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let canned = Arc::new(Canned {
            status,
            body: body.to_string(),
            queries: queries.clone(),
        });
        let app = Router::new()
            .route("/data", get(answer))
            .with_state(canned);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            base_url: format!("http://{}/data", addr),
            queries,
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

async fn answer(State(canned): State<Arc<Canned>>, RawQuery(query): RawQuery) -> (StatusCode, String) {
    canned
        .queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());
    (canned.status, canned.body.clone())
}
