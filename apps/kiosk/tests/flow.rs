//! End-to-end kiosk flows against an in-process fake store API.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use scango_client::{ApiSettings, PosApiClient, SessionStore, StorageKey};
use scango_core::TaxRate;
use scango_kiosk::error::{
    MSG_CODE_REQUIRED, MSG_EMPTY_CART, MSG_PRODUCT_NOT_FOUND, MSG_PURCHASE_FAILED, MSG_START_FAILED,
};
use scango_kiosk::ui::RecordingNotifier;
use scango_kiosk::{ErrorCode, Kiosk, Phase, Route};
use scango_scanner::{
    Camera, Frame, FrameSource, MediaStream, ScanResult, Scanner, SymbologyDecoder, Track,
};

const TEA: &str = "4901234567894";
const CANDY: &str = "96385074";

// =============================================================================
// Fake store
// =============================================================================

#[derive(Debug, Clone)]
enum TaxReply {
    Rate(Value),
    Status(u16),
}

struct FakeStore {
    revoked: AtomicBool,
    start_fails: AtomicBool,
    tax: Mutex<TaxReply>,
    purchase_failure: Mutex<Option<(u16, Value)>>,
    tax_calls: AtomicUsize,
    lookups: Mutex<Vec<String>>,
    purchases: Mutex<Vec<Value>>,
}

impl Default for FakeStore {
    fn default() -> Self {
        FakeStore {
            revoked: AtomicBool::new(false),
            start_fails: AtomicBool::new(false),
            tax: Mutex::new(TaxReply::Rate(json!(10))),
            purchase_failure: Mutex::new(None),
            tax_calls: AtomicUsize::new(0),
            lookups: Mutex::new(Vec::new()),
            purchases: Mutex::new(Vec::new()),
        }
    }
}

impl FakeStore {
    fn authorized(&self, headers: &HeaderMap) -> bool {
        !self.revoked.load(Ordering::SeqCst)
            && headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(|v| v == "Bearer shop-token")
                .unwrap_or(false)
    }

    fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    fn purchases(&self) -> Vec<Value> {
        self.purchases.lock().unwrap().clone()
    }
}

type Reply = (StatusCode, Json<Value>);

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

async fn auth_start(State(store): State<Arc<FakeStore>>) -> Reply {
    if store.start_fails.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"detail": "closed"})));
    }
    (StatusCode::OK, Json(json!({"access_token": "shop-token", "user_id": "u-77"})))
}

async fn tax(State(store): State<Arc<FakeStore>>, Path(id): Path<u32>, headers: HeaderMap) -> Reply {
    store.tax_calls.fetch_add(1, Ordering::SeqCst);
    if !store.authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "expired"})));
    }
    assert_eq!(id, 2);
    match store.tax.lock().unwrap().clone() {
        TaxReply::Rate(rate) => (StatusCode::OK, Json(json!({ "tax_rate": rate }))),
        TaxReply::Status(code) => (status(code), Json(json!({}))),
    }
}

async fn products(
    State(store): State<Arc<FakeStore>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Reply {
    if !store.authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    let code = params.get("code").cloned().unwrap_or_default();
    store.lookups.lock().unwrap().push(code.clone());
    match code.as_str() {
        TEA => (
            StatusCode::OK,
            Json(json!({"prd_id": 7, "code": TEA, "name": "Green tea", "price": 1000})),
        ),
        CANDY => (
            StatusCode::OK,
            Json(json!({"prd_id": 9, "code": CANDY, "name": "Candy", "price": 150})),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "not registered"}))),
    }
}

async fn purchase(
    State(store): State<Arc<FakeStore>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !store.authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if let Some((code, body)) = store.purchase_failure.lock().unwrap().clone() {
        return (status(code), Json(body));
    }
    store.purchases.lock().unwrap().push(body);
    (
        StatusCode::OK,
        Json(json!({"trd_id": 1201, "ttl_amt_ex_tax": 2000, "tax_amt": 200, "total_amt": 2200})),
    )
}

async fn spawn_store() -> (String, Arc<FakeStore>) {
    let store = Arc::new(FakeStore::default());
    let app = Router::new()
        .route("/auth/start", post(auth_start))
        .route("/tax/{id}", get(tax))
        .route("/products", get(products))
        .route("/purchase", post(purchase))
        .with_state(store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    (format!("http://{addr}"), store)
}

// =============================================================================
// Fake barcode reader
// =============================================================================

/// Reader fed from a shared script of raw reads.
#[derive(Clone, Default)]
struct ScriptedReader {
    reads: Arc<Mutex<VecDeque<String>>>,
    tracks: Arc<Mutex<Vec<Arc<AtomicBool>>>>,
    fail_open: Arc<AtomicBool>,
    /// Keep a read waiting on an empty queue instead of ending the stream.
    hold: Arc<AtomicBool>,
}

impl ScriptedReader {
    fn push(&self, read: &str) {
        self.reads.lock().unwrap().push_back(read.to_string());
    }

    fn live_tracks(&self) -> usize {
        self.tracks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.load(Ordering::SeqCst))
            .count()
    }

    fn opened(&self) -> usize {
        self.tracks.lock().unwrap().len()
    }
}

struct ScriptedTrack(Arc<AtomicBool>);

impl Track for ScriptedTrack {
    fn id(&self) -> &str {
        "scripted"
    }

    fn stop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct ScriptedFrames {
    reads: Arc<Mutex<VecDeque<String>>>,
    live: Arc<AtomicBool>,
    hold: Arc<AtomicBool>,
}

impl FrameSource for ScriptedFrames {
    fn next_frame(&mut self) -> ScanResult<Option<Frame>> {
        loop {
            {
                // A stopped track sees nothing queued after it stopped.
                let mut reads = self.reads.lock().unwrap();
                if !self.live.load(Ordering::SeqCst) {
                    return Ok(None);
                }
                if let Some(read) = reads.pop_front() {
                    return Ok(Some(Frame::new(read)));
                }
            }
            if !self.hold.load(Ordering::SeqCst) {
                return Ok(None);
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
    }
}

impl Camera for ScriptedReader {
    fn open(&mut self) -> ScanResult<MediaStream> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(scango_scanner::ScanError::DeviceUnavailable("unplugged".into()));
        }
        let live = Arc::new(AtomicBool::new(true));
        self.tracks.lock().unwrap().push(live.clone());
        let frames = ScriptedFrames {
            reads: self.reads.clone(),
            live: live.clone(),
            hold: self.hold.clone(),
        };
        let tracks: Vec<Box<dyn Track>> = vec![Box::new(ScriptedTrack(live))];
        Ok(MediaStream::new(tracks, Box::new(frames)))
    }

    fn describe(&self) -> String {
        "scripted reader".to_string()
    }
}

// =============================================================================
// Harness
// =============================================================================

struct Harness {
    kiosk: Kiosk,
    store: Arc<FakeStore>,
    alerts: RecordingNotifier,
    reader: ScriptedReader,
    session: SessionStore,
}

async fn harness() -> Harness {
    let (endpoint, store) = spawn_store().await;
    let client = PosApiClient::new(&ApiSettings {
        endpoint,
        ..ApiSettings::default()
    })
    .unwrap();

    let session = SessionStore::in_memory();
    let alerts = RecordingNotifier::new();
    let reader = ScriptedReader::default();
    let scanner = Scanner::new(Box::new(reader.clone()), Box::new(SymbologyDecoder::new(true)));

    let kiosk = Kiosk::new(client, session.clone(), Some(scanner), Box::new(alerts.clone()));
    Harness {
        kiosk,
        store,
        alerts,
        reader,
        session,
    }
}

/// Harness already on the home screen.
async fn shopping() -> Harness {
    let mut h = harness().await;
    h.kiosk.launch().await.unwrap();
    h.kiosk.start_shopping().await.unwrap();
    h
}

fn stored(session: &SessionStore, key: StorageKey) -> Option<String> {
    session.backend().get(key).unwrap()
}

fn assert_signed_out(h: &Harness) {
    assert_eq!(h.kiosk.route(), Route::Welcome);
    assert_eq!(stored(&h.session, StorageKey::AccessToken), None);
    assert_eq!(stored(&h.session, StorageKey::UserId), None);
}

// =============================================================================
// Navigation and session
// =============================================================================

#[tokio::test]
async fn test_index_redirects_to_welcome() {
    let mut h = harness().await;
    assert_eq!(h.kiosk.route(), Route::Index);
    assert_eq!(h.kiosk.render(), "Loading...\n");

    h.kiosk.launch().await.unwrap();
    assert_eq!(h.kiosk.route(), Route::Welcome);
    assert!(h.kiosk.render().contains("Welcome"));
}

#[tokio::test]
async fn test_start_shopping_stores_session_and_enters_home() {
    let h = shopping().await;

    assert_eq!(h.kiosk.route(), Route::Home);
    assert_eq!(stored(&h.session, StorageKey::AccessToken).as_deref(), Some("shop-token"));
    assert_eq!(stored(&h.session, StorageKey::UserId).as_deref(), Some("u-77"));
    assert_eq!(h.kiosk.home().tax_rate, Some(TaxRate::from_bps(1000)));
    assert_eq!(h.store.tax_calls.load(Ordering::SeqCst), 1);
    assert!(h.alerts.alerts().is_empty());
}

#[tokio::test]
async fn test_start_shopping_failure_alerts_and_stays() {
    let mut h = harness().await;
    h.kiosk.launch().await.unwrap();
    h.store.start_fails.store(true, Ordering::SeqCst);

    let err = h.kiosk.start_shopping().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SessionStart);
    assert_eq!(h.alerts.alerts(), vec![MSG_START_FAILED]);
    assert_signed_out(&h);
}

#[tokio::test]
async fn test_home_guard_redirects_without_session() {
    let mut h = harness().await;

    let err = h.kiosk.navigate(Route::Home).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(h.kiosk.route(), Route::Welcome);
    assert_eq!(h.store.tax_calls.load(Ordering::SeqCst), 0);
    assert!(h.alerts.alerts().is_empty());
}

#[tokio::test]
async fn test_guard_needs_both_keys() {
    let mut h = harness().await;
    h.session
        .backend()
        .set(StorageKey::AccessToken, "shop-token")
        .unwrap();

    assert!(h.kiosk.navigate(Route::Home).await.is_err());
    assert_eq!(h.kiosk.route(), Route::Welcome);
}

#[tokio::test]
async fn test_reentering_home_releases_reader() {
    let mut h = shopping().await;
    h.kiosk.set_search_code(TEA);
    h.kiosk.open_camera().unwrap();
    assert_eq!(h.reader.live_tracks(), 1);

    h.kiosk.navigate(Route::Home).await.unwrap();
    assert_eq!(h.kiosk.route(), Route::Home);
    assert_eq!(h.reader.live_tracks(), 0);
    assert!(!h.kiosk.home().camera_open);
    assert!(h.kiosk.home().search_code.is_empty());
    assert_eq!(h.store.tax_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_guard_failure_on_home_releases_reader() {
    let mut h = shopping().await;
    h.kiosk.open_camera().unwrap();
    h.session.clear().unwrap();

    let err = h.kiosk.navigate(Route::Home).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(h.kiosk.route(), Route::Welcome);
    assert_eq!(h.reader.live_tracks(), 0);
    assert!(!h.kiosk.home().camera_open);
    assert!(h.alerts.alerts().is_empty());
}

#[tokio::test]
async fn test_tax_fraction_is_accepted() {
    let mut h = harness().await;
    *h.store.tax.lock().unwrap() = TaxReply::Rate(json!("0.08"));

    h.kiosk.start_shopping().await.unwrap();
    assert_eq!(h.kiosk.home().tax_rate, Some(TaxRate::from_bps(800)));
}

#[tokio::test]
async fn test_tax_failure_uses_default_rate() {
    let mut h = harness().await;
    *h.store.tax.lock().unwrap() = TaxReply::Status(500);

    h.kiosk.start_shopping().await.unwrap();
    assert_eq!(h.kiosk.route(), Route::Home);
    assert_eq!(h.kiosk.home().tax_rate, Some(TaxRate::from_bps(1000)));
    assert!(h.alerts.alerts().is_empty());
}

#[tokio::test]
async fn test_tax_failure_uses_configured_default() {
    let mut h = harness().await;
    h.kiosk = h.kiosk.with_default_tax(TaxRate::from_bps(800));
    *h.store.tax.lock().unwrap() = TaxReply::Status(404);

    h.kiosk.start_shopping().await.unwrap();
    assert_eq!(h.kiosk.home().tax_rate, Some(TaxRate::from_bps(800)));
}

#[tokio::test]
async fn test_tax_unauthorized_expires_session() {
    let mut h = harness().await;
    h.session
        .save(&scango_core::Session {
            access_token: "stale".into(),
            user_id: "u-1".into(),
        })
        .unwrap();

    let err = h.kiosk.navigate(Route::Home).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_signed_out(&h);
    assert!(h.alerts.alerts().is_empty());
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let mut h = shopping().await;
    h.kiosk.search_product(TEA).await.unwrap();
    h.kiosk.add_to_cart();
    h.kiosk.open_camera().unwrap();

    h.kiosk.logout();
    assert_signed_out(&h);
    assert!(h.kiosk.home().purchase_list.is_empty());
    assert_eq!(h.reader.live_tracks(), 0);
}

// =============================================================================
// Products and purchase list
// =============================================================================

#[tokio::test]
async fn test_empty_code_alerts_without_request() {
    let mut h = shopping().await;

    let err = h.kiosk.search_product("  ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(h.alerts.alerts(), vec![MSG_CODE_REQUIRED]);
    assert!(h.store.lookups().is_empty());
}

#[tokio::test]
async fn test_search_shows_product() {
    let mut h = shopping().await;
    h.kiosk.set_search_code(TEA);

    let product = h.kiosk.search().await.unwrap();
    assert_eq!(product.name, "Green tea");
    assert_eq!(h.kiosk.home().product_info.as_ref(), Some(&product));
    assert_eq!(h.kiosk.home().phase(), Phase::ProductFetched);
    assert_eq!(h.store.lookups(), vec![TEA]);
}

#[tokio::test]
async fn test_unknown_product_alerts_and_clears() {
    let mut h = shopping().await;
    h.kiosk.search_product(TEA).await.unwrap();

    let err = h.kiosk.search_product("0000000").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(h.alerts.alerts(), vec![MSG_PRODUCT_NOT_FOUND]);
    assert!(h.kiosk.home().product_info.is_none());
}

#[tokio::test]
async fn test_malformed_code_alerts_validation_without_request() {
    let mut h = shopping().await;

    let too_long = "4".repeat(65);
    let err = h.kiosk.search_product(&too_long).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);

    let err = h.kiosk.search_product("49012\u{7}34567894").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);

    let alerts = h.alerts.alerts();
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a != MSG_PRODUCT_NOT_FOUND));
    assert!(alerts[0].contains("product code"));
    assert!(h.store.lookups().is_empty());
    assert!(h.kiosk.home().product_info.is_none());
}

#[tokio::test]
async fn test_product_unauthorized_expires_session() {
    let mut h = shopping().await;
    h.store.revoked.store(true, Ordering::SeqCst);

    let err = h.kiosk.search_product(TEA).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_signed_out(&h);
    assert!(h.alerts.alerts().is_empty());
}

#[tokio::test]
async fn test_add_to_cart_and_total() {
    let mut h = shopping().await;

    for _ in 0..2 {
        h.kiosk.set_search_code(TEA);
        h.kiosk.search().await.unwrap();
        assert!(h.kiosk.add_to_cart());
        assert!(h.kiosk.home().search_code.is_empty());
        assert!(h.kiosk.home().product_info.is_none());
    }

    let list = &h.kiosk.home().purchase_list;
    assert_eq!(list.len(), 2);
    assert!(list.items().iter().all(|line| line.quantity == 1));
    assert_eq!(h.kiosk.calculate_total().minor(), 2200);
    assert!(h.kiosk.render().contains("¥2,200"));

    // Nothing shown, nothing added.
    assert!(!h.kiosk.add_to_cart());
    assert_eq!(h.kiosk.home().purchase_list.len(), 2);
}

#[tokio::test]
async fn test_total_floors_each_line() {
    let mut h = shopping().await;
    *h.store.tax.lock().unwrap() = TaxReply::Rate(json!(8));
    h.kiosk.navigate(Route::Welcome).await.unwrap();
    h.kiosk.navigate(Route::Home).await.unwrap();

    for _ in 0..3 {
        h.kiosk.search_product(CANDY).await.unwrap();
        h.kiosk.add_to_cart();
    }
    // floor(150 * 1.08) = 162, three times
    assert_eq!(h.kiosk.calculate_total().minor(), 486);
}

#[tokio::test]
async fn test_remove_line() {
    let mut h = shopping().await;
    h.kiosk.search_product(TEA).await.unwrap();
    h.kiosk.add_to_cart();
    h.kiosk.search_product(CANDY).await.unwrap();
    h.kiosk.add_to_cart();

    let removed = h.kiosk.remove_line(1).unwrap();
    assert_eq!(removed.name, "Green tea");
    assert_eq!(h.kiosk.home().purchase_list.len(), 1);
    assert_eq!(h.kiosk.calculate_total().minor(), 165);

    assert!(h.kiosk.remove_line(5).is_err());
    assert_eq!(h.alerts.alerts().len(), 1);
}

// =============================================================================
// Purchase
// =============================================================================

#[tokio::test]
async fn test_empty_purchase_alerts_without_request() {
    let mut h = shopping().await;

    let err = h.kiosk.purchase().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyCart);
    assert_eq!(h.alerts.alerts(), vec![MSG_EMPTY_CART]);
    assert!(h.store.purchases().is_empty());
}

#[tokio::test]
async fn test_purchase_shows_receipt_then_resets() {
    let mut h = shopping().await;
    for _ in 0..2 {
        h.kiosk.search_product(TEA).await.unwrap();
        h.kiosk.add_to_cart();
    }

    let result = h.kiosk.purchase().await.unwrap();
    assert_eq!(result.transaction_id, 1201);
    assert!(h.kiosk.home().show_modal);
    assert_eq!(h.kiosk.home().phase(), Phase::ResultShown);

    let screen = h.kiosk.render();
    assert!(screen.contains("1201"));
    assert!(screen.contains("¥2,000"));
    assert!(screen.contains("¥200"));
    assert!(screen.contains("¥2,200"));

    let sent = h.store.purchases();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["items"].as_array().unwrap().len(), 2);
    assert_eq!(sent[0]["items"][0]["prd_id"], 7);
    assert!(sent[0]["emp_cd"].is_null());

    h.kiosk.close_modal();
    let home = h.kiosk.home();
    assert!(!home.show_modal);
    assert!(home.purchase_result.is_none());
    assert!(home.purchase_list.is_empty());
    assert!(home.search_code.is_empty());
    assert!(home.product_info.is_none());
    assert_eq!(h.kiosk.route(), Route::Home);
}

#[tokio::test]
async fn test_purchase_failure_alerts_detail() {
    let mut h = shopping().await;
    h.kiosk.search_product(TEA).await.unwrap();
    h.kiosk.add_to_cart();
    *h.store.purchase_failure.lock().unwrap() = Some((400, json!({"detail": "Out of stock"})));

    let err = h.kiosk.purchase().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PurchaseFailed);
    assert_eq!(h.alerts.alerts(), vec!["Out of stock"]);
    assert_eq!(h.kiosk.home().purchase_list.len(), 1);
    assert!(!h.kiosk.home().show_modal);
}

#[tokio::test]
async fn test_purchase_failure_without_detail() {
    let mut h = shopping().await;
    h.kiosk.search_product(TEA).await.unwrap();
    h.kiosk.add_to_cart();
    *h.store.purchase_failure.lock().unwrap() = Some((500, json!({})));

    h.kiosk.purchase().await.unwrap_err();
    assert_eq!(h.alerts.alerts(), vec![MSG_PURCHASE_FAILED]);
}

#[tokio::test]
async fn test_purchase_unauthorized_expires_session() {
    let mut h = shopping().await;
    h.kiosk.search_product(TEA).await.unwrap();
    h.kiosk.add_to_cart();
    h.store.revoked.store(true, Ordering::SeqCst);

    let err = h.kiosk.purchase().await.unwrap_err();
    assert!(err.is_session_expired());
    assert_signed_out(&h);
    assert!(h.kiosk.home().purchase_list.is_empty());
    assert!(h.alerts.alerts().is_empty());
}

// =============================================================================
// Barcode reader
// =============================================================================

#[tokio::test]
async fn test_scan_looks_up_product_and_closes_camera() {
    let mut h = shopping().await;
    h.reader.push("garbage");
    h.reader.push(&format!("]E0{TEA}\r\n"));

    h.kiosk.open_camera().unwrap();
    assert_eq!(h.kiosk.home().phase(), Phase::Scanning);
    assert_eq!(h.reader.live_tracks(), 1);

    let product = h.kiosk.scan().await.unwrap().unwrap();
    assert_eq!(product.code, TEA);

    let home = h.kiosk.home();
    assert!(!home.camera_open);
    assert!(!home.scanning);
    assert!(home.scanned_code.is_empty());
    assert_eq!(home.search_code, TEA);
    assert_eq!(h.reader.live_tracks(), 0);
    assert_eq!(h.store.lookups(), vec![TEA]);
}

#[tokio::test]
async fn test_close_camera_releases_reader_and_resets_decoder() {
    let mut h = shopping().await;
    h.reader.push(TEA);

    h.kiosk.open_camera().unwrap();
    h.kiosk.scan().await.unwrap();

    // Same code again after the camera was closed and reopened.
    h.reader.push(TEA);
    h.kiosk.open_camera().unwrap();
    let product = h.kiosk.scan().await.unwrap();
    assert_eq!(product.map(|p| p.code).as_deref(), Some(TEA));

    h.kiosk.open_camera().unwrap();
    h.kiosk.close_camera();
    assert_eq!(h.reader.opened(), 3);
    assert_eq!(h.reader.live_tracks(), 0);
    assert!(!h.kiosk.home().camera_open);
    assert_eq!(h.kiosk.home().phase(), Phase::ProductFetched);
}

#[tokio::test]
async fn test_scan_end_of_stream_closes_camera() {
    let mut h = shopping().await;
    h.kiosk.open_camera().unwrap();

    assert_eq!(h.kiosk.scan().await.unwrap(), None);
    assert!(!h.kiosk.home().camera_open);
    assert_eq!(h.reader.live_tracks(), 0);
}

#[tokio::test]
async fn test_close_during_pending_scan_releases_reader() {
    let mut h = shopping().await;
    h.reader.hold.store(true, Ordering::SeqCst);
    h.kiosk.open_camera().unwrap();

    // Nothing queued: the read stays pending until the scan is given up.
    let scanned = h.kiosk.scan_until(tokio::task::yield_now()).await.unwrap();
    assert_eq!(scanned, None);
    assert_eq!(h.reader.live_tracks(), 0);
    assert!(!h.kiosk.home().camera_open);
    assert!(!h.kiosk.home().scanning);
    assert!(h.store.lookups().is_empty());

    // The reader is usable again after reopening.
    h.reader.push(TEA);
    h.kiosk.open_camera().unwrap();
    let product = h.kiosk.scan().await.unwrap();
    assert_eq!(product.map(|p| p.code).as_deref(), Some(TEA));
    assert_eq!(h.reader.live_tracks(), 0);
}

#[tokio::test]
async fn test_rescan_restarts_scanning() {
    let mut h = shopping().await;
    h.kiosk.open_camera().unwrap();
    h.kiosk.rescan().unwrap();

    let home = h.kiosk.home();
    assert!(home.camera_open);
    assert!(home.scanning);
    assert!(home.scanned_code.is_empty());
    assert_eq!(h.reader.opened(), 1);
}

#[tokio::test]
async fn test_camera_failure_alerts() {
    let mut h = shopping().await;
    h.reader.fail_open.store(true, Ordering::SeqCst);

    let err = h.kiosk.open_camera().unwrap_err();
    assert_eq!(err.code, ErrorCode::Scanner);
    assert_eq!(h.alerts.alerts().len(), 1);
    assert!(!h.kiosk.home().camera_open);
    assert_eq!(h.kiosk.home().phase(), Phase::Idle);
}
