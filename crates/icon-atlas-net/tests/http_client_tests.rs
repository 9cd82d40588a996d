//! Tests for the HTTP client and the Iconify registry client.

use std::time::Duration;

use http::header::ACCEPT;
use url::Url;

use icon_atlas_net::http::{HttpClient, HttpClientBuilder, HttpClientConfig};
use icon_atlas_net::registry::{DEFAULT_BASE_URL, IconifyClient};

#[test]
fn test_client_defaults() {
    let client = HttpClient::new();
    assert_eq!(client.config().timeout, Duration::from_secs(30));
    assert!(client.config().user_agent.starts_with("icon-atlas/"));
}

#[test]
fn test_client_builder() {
    let client = HttpClientBuilder::new()
        .timeout(Duration::from_secs(60))
        .user_agent("atlas-tests/1.0")
        .build()
        .expect("Failed to build client");

    assert_eq!(
        client.config(),
        &HttpClientConfig {
            timeout: Duration::from_secs(60),
            user_agent: "atlas-tests/1.0".to_string(),
        }
    );
}

#[test]
fn test_request_keeps_target_url() {
    let client = HttpClient::new();
    let url = Url::parse("https://api.iconify.design/collection?prefix=mdi").unwrap();

    let request = client.get(url.clone()).header(ACCEPT, "application/json");
    assert_eq!(request.url(), &url);
}

#[test]
fn test_iconify_client_default_base() {
    let client = IconifyClient::new().expect("Failed to build client");
    assert_eq!(client.base_url().as_str(), format!("{DEFAULT_BASE_URL}/"));
}

// Mocked HTTP tests use wiremock
#[cfg(feature = "integration-tests")]
mod integration_tests {
    use super::*;
    use icon_atlas_net::{
        IconRenderCache, IconRenderKey, IconRequestOptions, NetworkError, RemoteCatalogClient,
    };
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> IconifyClient {
        IconifyClient::builder(server.uri())
            .timeout(Duration::from_secs(5))
            .user_agent("atlas-tests/1.0")
            .build()
            .expect("Failed to build client")
    }

    #[tokio::test]
    async fn test_list_collections() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collections"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", "atlas-tests/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "mdi": {
                    "name": "Material Design Icons",
                    "total": 7447,
                    "version": "7.4.47",
                    "author": { "name": "Pictogrammers", "url": "https://pictogrammers.com" },
                    "license": {
                        "title": "Apache 2.0",
                        "spdx": "Apache-2.0",
                        "url": "https://www.apache.org/licenses/LICENSE-2.0"
                    },
                    "samples": ["account-check", "bell-alert-outline", "calendar-edit"],
                    "height": 24,
                    "displayHeight": 24,
                    "category": "Material",
                    "palette": false
                },
                "twemoji": {
                    "name": "Twitter Emoji",
                    "total": 3668,
                    "license": { "title": "CC BY 4.0", "spdx": "CC-BY-4.0" },
                    "height": [16, 24],
                    "palette": true
                }
            })))
            .mount(&mock_server)
            .await;

        let collections = client_for(&mock_server)
            .list_collections()
            .await
            .expect("Request failed");

        assert_eq!(collections.len(), 2);
        let mdi = &collections["mdi"];
        assert_eq!(mdi.id, "mdi");
        assert_eq!(mdi.name, "Material Design Icons");
        assert_eq!(mdi.display_height, Some(24));
        assert_eq!(mdi.category_label(), Some("Material"));
        assert!(!mdi.palette);

        let twemoji = &collections["twemoji"];
        assert_eq!(twemoji.id, "twemoji");
        assert!(twemoji.palette);
        assert!(twemoji.samples.is_empty());
        assert_eq!(twemoji.category_label(), None);
    }

    #[tokio::test]
    async fn test_collection_detail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collection"))
            .and(query_param("prefix", "mdi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "prefix": "mdi",
                "total": 3,
                "title": "Material Design Icons",
                "uncategorized": ["blank"],
                "categories": { "Account / User": ["account", "account-box"] },
                "categoryTitles": { "Account / User": "Accounts" },
                "aliases": { "user": "account" }
            })))
            .mount(&mock_server)
            .await;

        let detail = client_for(&mock_server)
            .collection_detail("mdi")
            .await
            .expect("Request failed");

        assert_eq!(detail.prefix, "mdi");
        assert_eq!(detail.total, Some(3));
        assert_eq!(detail.uncategorized, vec!["blank".to_string()]);
        assert_eq!(detail.categories["Account / User"].len(), 2);
        assert_eq!(detail.category_titles["Account / User"], "Accounts");
        assert!(detail.hidden.is_empty());
    }

    #[tokio::test]
    async fn test_icon_markup_sends_only_set_options() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mdi/home.svg"))
            .and(query_param("width", "32px"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<svg/>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let key = IconRenderKey::new(
            "mdi",
            "home",
            IconRequestOptions {
                width: Some("32px".to_string()),
                color: Some(String::new()),
                ..Default::default()
            },
        );

        let markup = client_for(&mock_server)
            .icon_markup(&key)
            .await
            .expect("Request failed");
        assert_eq!(markup, "<svg/>");

        let requests = mock_server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("width=32px"));
    }

    #[tokio::test]
    async fn test_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collection"))
            .respond_with(ResponseTemplate::new(404).set_body_string("404"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).collection_detail("nope").await;

        assert_eq!(
            result.unwrap_err(),
            NetworkError::HttpStatus {
                status: 404,
                message: Some("404".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let client = IconifyClient::builder(mock_server.uri())
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build client");

        let result = client.list_collections().await;
        assert_eq!(result.unwrap_err(), NetworkError::Timeout);
    }

    #[tokio::test]
    async fn test_render_cache_over_http_fetches_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mdi/home.svg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<svg/>")
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let cache = IconRenderCache::new(client_for(&mock_server));
        let key = IconRenderKey::new("mdi", "home", IconRequestOptions::default());

        let (a, b) = tokio::join!(cache.resolve(&key), cache.resolve(&key));
        assert_eq!(a.expect("first failed"), b.expect("second failed"));

        cache.resolve(&key).await.expect("hit failed");
    }
}
