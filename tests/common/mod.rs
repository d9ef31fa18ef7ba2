#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_test::TestServer;
use serde_json::{Value, json};

use partners_gateway::application::services::{CatalogService, LinkMode, LinkResolver};
use partners_gateway::domain::entities::Credentials;
use partners_gateway::domain::{AffiliateApi, LinkTemplate};
use partners_gateway::infrastructure::cache::{
    CacheService, CacheWriter, MemoryCache, NullCache, ResponseCache,
};
use partners_gateway::infrastructure::upstream::protocol::{DEEPLINK_PATH, SEARCH_PATH};
use partners_gateway::infrastructure::upstream::signer::{canonical_message, hmac_hex};
use partners_gateway::infrastructure::upstream::{PartnersClient, SignedDateFormat, Signer};
use partners_gateway::routes::app_router;
use partners_gateway::state::AppState;

pub const ACCESS_KEY: &str = "test-access";
pub const SECRET_KEY: &str = "test-secret";

pub fn credentials() -> Credentials {
    Credentials::new(ACCESS_KEY, SECRET_KEY)
}

/// In-process stand-in for the partner API.
///
/// Rejects calls whose signature does not verify with [`SECRET_KEY`], and
/// returns `limit` products per search.
#[derive(Clone, Default)]
pub struct MockUpstream {
    search_calls: Arc<AtomicUsize>,
    deeplink_calls: Arc<AtomicUsize>,
    search_status: Arc<AtomicU16>,
    reject_deeplinks: Arc<AtomicBool>,
    garble_deeplinks: Arc<AtomicBool>,
}

impl MockUpstream {
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn deeplink_calls(&self) -> usize {
        self.deeplink_calls.load(Ordering::SeqCst)
    }

    /// Makes every search answer with this HTTP status.
    pub fn fail_searches_with(&self, status: u16) {
        self.search_status.store(status, Ordering::SeqCst);
    }

    /// Makes deeplink calls answer 200 with a non-OK result code.
    pub fn reject_deeplinks(&self) {
        self.reject_deeplinks.store(true, Ordering::SeqCst);
    }

    /// Makes deeplink calls answer 200 with a body that is not JSON.
    pub fn garble_deeplinks(&self) {
        self.garble_deeplinks.store(true, Ordering::SeqCst);
    }

    /// Binds to an ephemeral port and returns the base URL.
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route(SEARCH_PATH, get(mock_search))
            .route(DEEPLINK_PATH, post(mock_deeplink))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }
}

pub fn product_url(id: u32) -> String {
    format!("https://www.coupang.com/vp/products/{id}")
}

fn signature_valid(headers: &HeaderMap, method: &str, path: &str, query: Option<&str>) -> bool {
    let Some(auth) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let field = |name: &str| auth.split(", ").find_map(|part| part.strip_prefix(name));

    let (Some(date), Some(signature)) = (field("signed-date="), field("signature=")) else {
        return false;
    };

    let requested_by = headers
        .get("x-requested-by")
        .and_then(|v| v.to_str().ok());

    auth.starts_with(&format!("CEA algorithm=HmacSHA256, access-key={ACCESS_KEY}, "))
        && requested_by == Some(ACCESS_KEY)
        && hmac_hex(SECRET_KEY, &canonical_message(date, method, path, query)) == signature
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

async fn mock_search(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    mock.search_calls.fetch_add(1, Ordering::SeqCst);

    if !signature_valid(&headers, "GET", SEARCH_PATH, query.as_deref()) {
        return (StatusCode::UNAUTHORIZED, "invalid signature").into_response();
    }

    let status = mock.search_status.load(Ordering::SeqCst);
    if status != 0 {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, "upstream down").into_response();
    }

    let limit: u32 = query
        .as_deref()
        .and_then(|q| query_param(q, "limit"))
        .and_then(|l| l.parse().ok())
        .unwrap_or(10);

    let products: Vec<Value> = (1..=limit)
        .map(|id| {
            json!({
                "productId": id,
                "productName": format!("Product {id}"),
                "productPrice": 10000 * id,
                "productImage": format!("https://img.example.com/{id}.jpg"),
                "productUrl": product_url(id),
                "isRocket": id % 2 == 1,
                "isFreeShipping": true,
                "rank": id
            })
        })
        .collect();

    Json(json!({ "rCode": "0", "data": [{ "productData": products }] })).into_response()
}

async fn mock_deeplink(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.deeplink_calls.fetch_add(1, Ordering::SeqCst);

    if !signature_valid(&headers, "POST", DEEPLINK_PATH, None) {
        return (StatusCode::UNAUTHORIZED, "invalid signature").into_response();
    }

    if mock.garble_deeplinks.load(Ordering::SeqCst) {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }

    if mock.reject_deeplinks.load(Ordering::SeqCst) {
        return Json(json!({ "rCode": "500", "rMessage": "conversion unavailable" })).into_response();
    }

    let data: Vec<Value> = body["coupangUrls"]
        .as_array()
        .map(|urls| {
            urls.iter()
                .enumerate()
                .map(|(i, url)| {
                    json!({ "originalUrl": url, "shortenUrl": format!("https://link.coupang.com/a/{i}") })
                })
                .collect()
        })
        .unwrap_or_default();

    Json(json!({ "rCode": "0", "data": data })).into_response()
}

/// Knobs for [`spawn_app`].
pub struct AppOptions {
    pub credentials: Option<Credentials>,
    pub link_mode: LinkMode,
    pub development: bool,
    pub cache_enabled: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            credentials: Some(credentials()),
            link_mode: LinkMode::Api,
            development: false,
            cache_enabled: true,
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub upstream: MockUpstream,
    pub cache: Arc<ResponseCache>,
}

pub fn partners_client(base_url: &str) -> PartnersClient {
    PartnersClient::new(
        base_url,
        Duration::from_secs(5),
        Signer::new(SignedDateFormat::Short),
    )
    .unwrap()
}

/// Builds the full router against a fresh [`MockUpstream`].
pub async fn spawn_app(options: AppOptions) -> TestApp {
    let upstream = MockUpstream::default();
    let base_url = upstream.start().await;

    let backend: Arc<dyn CacheService> = if options.cache_enabled {
        Arc::new(MemoryCache::new(1_000))
    } else {
        Arc::new(NullCache::new())
    };
    let (writer, _task) = CacheWriter::spawn(backend.clone(), 64);
    let cache = Arc::new(ResponseCache::new(backend, writer, Duration::from_secs(300)));

    let api: Arc<dyn AffiliateApi> = Arc::new(partners_client(&base_url));
    let resolver = Arc::new(LinkResolver::new(
        api.clone(),
        LinkTemplate::default(),
        options.link_mode,
    ));
    let catalog_service = Arc::new(CatalogService::new(api, resolver));

    let state = AppState::new(
        catalog_service,
        cache.clone(),
        options.credentials,
        options.development,
    );

    TestApp {
        server: TestServer::new(app_router(state)).unwrap(),
        upstream,
        cache,
    }
}
