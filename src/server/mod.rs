use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod catalog;
pub mod handlers;
pub mod index;

use catalog::Catalog;
use handlers::search;

pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/data", get(search))
        // the browser client is served from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(catalog)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::Value;
    use tokio::net::TcpListener;

    use super::catalog::Item;
    use super::handlers::ItemsResponse;
    use super::*;

    async fn serve() -> String {
        let catalog = Catalog::from_items(vec![
            Item { id: 1, name: "Red Apple".to_string() },
            Item { id: 2, name: "Green Apple".to_string() },
            Item { id: 3, name: "Red Pepper".to_string() },
        ]);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(Arc::new(catalog))).await.unwrap();
        });
        format!("http://{}/data", addr)
    }

    #[tokio::test]
    async fn answers_with_count_and_items() {
        let url = serve().await;

        let response: ItemsResponse = reqwest::get(format!("{}?query=red%20app", url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(
            response,
            ItemsResponse {
                count: 1,
                items: vec![Item { id: 1, name: "Red Apple".to_string() }],
            }
        );
    }

    #[tokio::test]
    async fn any_mode_unions_words() {
        let url = serve().await;

        let body: Value = reqwest::get(format!("{}?query=green%20pepper&mode=any", url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["count"], 2);
        assert_eq!(body["items"][0]["id"], 2);
        assert_eq!(body["items"][1]["id"], 3);
    }

    #[tokio::test]
    async fn keyword_mode_does_not_split() {
        let url = serve().await;

        let body: Value = reqwest::get(format!("{}?query=pep&mode=keyword", url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["count"], 1);

        let body: Value = reqwest::get(format!("{}?query=red%20apple&mode=keyword", url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn no_match_is_an_empty_list() {
        let url = serve().await;

        let body: Value = reqwest::get(format!("{}?query=kiwi", url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body, serde_json::json!({"count": 0, "items": []}));
    }

    #[tokio::test]
    async fn missing_query_is_rejected() {
        let url = serve().await;
        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_mode_is_rejected() {
        let url = serve().await;
        let response = reqwest::get(format!("{}?query=red&mode=some", url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
