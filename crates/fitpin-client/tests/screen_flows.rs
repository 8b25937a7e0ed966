//! Screen flows against a scripted in-memory backend.

use async_trait::async_trait;
use fitpin_client::screens::{fit_storage_urls, withdraw};
use fitpin_client::{
    ApiConfig, ClientError, CommentBoard, CommentWriter, FitpinApi, ProductPage, SessionContext,
    TryOnPreview,
};
use fitpin_commerce::prelude::*;
use fitpin_data::{Body, FetchClient, FetchError, Method, Part, Request, Response, Transport};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const DATA: &str = "http://data.test";
const AR: &str = "http://ar.test";

/// Answers by method and exact URL; records every request.
#[derive(Default)]
struct MockBackend {
    routes: Mutex<HashMap<(Method, String), Vec<Result<Response, FetchError>>>>,
    seen: Mutex<Vec<Request>>,
}

impl MockBackend {
    fn on(&self, method: Method, path: &str, reply: Result<Response, FetchError>) {
        let url = if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{DATA}{path}")
        };
        self.routes
            .lock()
            .unwrap()
            .entry((method, url))
            .or_default()
            .push(reply);
    }

    fn json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        let bytes = serde_json::to_vec(&body).unwrap();
        self.on(method, path, Ok(Response::new(status, HashMap::new(), bytes)));
    }

    fn bytes(&self, method: Method, path: &str, content_type: &str, body: &[u8]) {
        let headers = HashMap::from([("Content-Type".to_string(), content_type.to_string())]);
        self.on(method, path, Ok(Response::new(200, headers, body.to_vec())));
    }

    fn requests_to(&self, method: Method, path: &str) -> Vec<Request> {
        let url = format!("{DATA}{path}");
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && (r.url == url || r.url == path))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for MockBackend {
    async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        self.seen.lock().unwrap().push(request.clone());
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&(request.method, request.url.clone())) {
            Some(replies) if replies.len() > 1 => replies.remove(0),
            Some(replies) if replies.len() == 1 => replies[0].clone(),
            _ => Ok(Response::new(404, HashMap::new(), b"{\"message\":\"no route\"}".to_vec())),
        }
    }
}

fn api(backend: &Arc<MockBackend>) -> FitpinApi {
    let config = ApiConfig::default().with_data_url(DATA).with_ar_url(AR);
    let client = FetchClient::new(backend.clone()).map_policies(|_, policy| {
        policy.retry.backoff = fitpin_data::Backoff::NONE;
    });
    FitpinApi::new(config, client)
}

fn session() -> SessionContext {
    SessionContext::signed_in("me@fitpin.kr")
        .with_name("핏핀")
        .with_height(172.0)
}

fn shirt_json() -> serde_json::Value {
    json!({
        "itemKey": 12,
        "itemName": "Oxford Shirt",
        "itemBrand": "FitPin",
        "itemType": "상의",
        "itemStyle": null,
        "itemPrice": 39000,
        "itemContent": "cotton",
        "itemTopInfo": [
            {"itemSize": "S", "itemHeight": 160, "itemShoulder": 40, "itemChest": 90, "itemSleeve": 55},
            {"itemSize": "M", "itemHeight": 165, "itemShoulder": 43, "itemChest": 95, "itemSleeve": 58},
            {"itemSize": "L", "itemHeight": 170, "itemShoulder": 46, "itemChest": 100, "itemSleeve": 61}
        ],
        "itemBottomInfo": null,
        "itemImgName": ["shirt.png"],
        "pitPrice": 5000
    })
}

fn body_json() -> serde_json::Value {
    json!({
        "userHeight": 172, "userWeight": 65, "armSize": 96,
        "shoulderSize": 44, "bodySize": 166, "legSize": 80
    })
}

fn comment_json(key: i64, email: &str, text: Option<&str>) -> serde_json::Value {
    json!({
        "fitStorageKey": key,
        "itemBrand": "FitPin",
        "itemName": "Oxford Shirt",
        "fitComment": text,
        "itemSize": "M",
        "fitStorageImg": format!("fit{key}.jpg"),
        "userEmail": email,
        "userName": "someone"
    })
}

#[tokio::test]
async fn test_product_page_loads_and_recommends() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Get, "/api/item-info/12", 200, shirt_json());
    backend.json(Method::Get, "/api/userbodyinfo/me@fitpin.kr", 200, body_json());

    let page = ProductPage::load(&api(&backend), &session(), ItemKey::new(12))
        .await
        .unwrap();
    assert_eq!(page.item().unwrap().name, "Oxford Shirt");
    assert_eq!(page.recommended(), Some("M"));
    assert_eq!(page.selected(), Some("M"));
}

#[tokio::test]
async fn test_product_page_without_body_profile() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Get, "/api/item-info/12", 200, shirt_json());
    backend.on(Method::Get, "/api/userbodyinfo/me@fitpin.kr", Err(FetchError::Timeout));

    let page = ProductPage::load(&api(&backend), &session(), ItemKey::new(12))
        .await
        .unwrap();
    assert_eq!(page.recommended(), None);
    assert_eq!(page.selected(), None);
}

#[tokio::test]
async fn test_product_page_missing_item() {
    let backend = Arc::new(MockBackend::default());
    let err = ProductPage::load(&api(&backend), &session(), ItemKey::new(99))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_catalog_fetch_is_retried() {
    let backend = Arc::new(MockBackend::default());
    backend.on(
        Method::Get,
        "/api/item-info/12",
        Ok(Response::new(503, HashMap::new(), Vec::new())),
    );
    backend.json(Method::Get, "/api/item-info/12", 200, shirt_json());

    let page = ProductPage::load(&api(&backend), &SessionContext::default(), ItemKey::new(12))
        .await
        .unwrap();
    assert!(page.item().is_some());
    assert_eq!(backend.requests_to(Method::Get, "/api/item-info/12").len(), 2);
}

#[tokio::test]
async fn test_add_to_cart_outcomes() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Get, "/api/item-info/12", 200, shirt_json());
    backend.json(Method::Get, "/api/userbodyinfo/me@fitpin.kr", 200, body_json());
    backend.json(
        Method::Post,
        "/api/cart/store",
        200,
        json!({"message": CART_CONFIRMATION}),
    );
    backend.json(Method::Post, "/api/cart/store", 200, json!({"message": "재고 없음"}));

    let api = api(&backend);
    let mut page = ProductPage::load(&api, &session(), ItemKey::new(12))
        .await
        .unwrap();
    page.set_tailoring(true);
    page.increment(TailoringField::Top(TopField::Sleeve)).unwrap();

    let first = page.add_to_cart(&api, &session()).await.unwrap();
    assert_eq!(first, CartOutcome::Added);
    let second = page.add_to_cart(&api, &session()).await.unwrap();
    assert_eq!(second, CartOutcome::Rejected("재고 없음".into()));

    let sent = backend.requests_to(Method::Post, "/api/cart/store");
    let body = sent[0].body.json_value().unwrap();
    assert_eq!(body["itemPrice"], 44000);
    assert_eq!(body["pitStatus"], true);
    assert_eq!(body["pitItemCart"]["itemType"], "상의");
    assert_eq!(body["pitItemCart"]["itemSleeve"], 1);
}

#[tokio::test]
async fn test_cart_without_size_sends_nothing() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Get, "/api/item-info/12", 200, shirt_json());
    let api = api(&backend);

    let page = ProductPage::load(&api, &SessionContext::signed_in("x@fitpin.kr"), ItemKey::new(12))
        .await
        .unwrap();
    let err = page.add_to_cart(&api, &session()).await.unwrap_err();
    assert_eq!(err, ClientError::Validation(ValidationError::SizeNotSelected));
    assert!(backend.requests_to(Method::Post, "/api/cart/store").is_empty());
}

#[tokio::test]
async fn test_try_on_generates_image() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Get, "/api/item-info/12", 200, shirt_json());
    backend.json(Method::Get, "/api/userForm/me@fitpin.kr", 200, json!({"fileName": "body.png"}));
    backend.bytes(Method::Get, "/api/img/imgserve/itemimg/shirt.png", "image/png", b"garment");
    backend.bytes(Method::Post, &format!("{AR}/try-on"), "image/png", b"result");

    let api = api(&backend);
    let page = ProductPage::load(&api, &session(), ItemKey::new(12)).await.unwrap();
    let preview = page.try_on(&api, &session()).await.unwrap();
    assert_eq!(preview, TryOnPreview::Generated(b"result".to_vec()));

    let sent = backend.requests_to(Method::Post, &format!("{AR}/try-on"));
    let Body::Multipart(form) = &sent[0].body else {
        panic!("try-on must be multipart");
    };
    assert_eq!(form.text_value("bodyFileName"), Some("body.png"));
    assert_eq!(form.text_value("category"), Some("상의"));
    assert!(matches!(
        form.part("clothesImg"),
        Some(Part::File { bytes, content_type, .. }) if bytes == b"garment" && content_type == "image/png"
    ));
}

#[tokio::test]
async fn test_try_on_falls_back_to_product_image() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Get, "/api/item-info/12", 200, shirt_json());
    backend.json(Method::Get, "/api/userForm/me@fitpin.kr", 200, json!({"fileName": "body.png"}));
    backend.bytes(Method::Get, "/api/img/imgserve/itemimg/shirt.png", "image/png", b"garment");
    backend.json(Method::Post, &format!("{AR}/try-on"), 500, json!({"detail": "gpu busy"}));

    let api = api(&backend);
    let page = ProductPage::load(&api, &session(), ItemKey::new(12)).await.unwrap();
    let preview = page.try_on(&api, &session()).await.unwrap();
    assert_eq!(
        preview,
        TryOnPreview::ProductImage(format!("{DATA}/api/img/imgserve/itemimg/shirt.png"))
    );
    // Not idempotent and budget is zero: exactly one attempt.
    assert_eq!(backend.requests_to(Method::Post, &format!("{AR}/try-on")).len(), 1);
}

#[tokio::test]
async fn test_try_on_needs_height() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Get, "/api/item-info/12", 200, shirt_json());
    let api = api(&backend);
    let no_height = SessionContext::signed_in("me@fitpin.kr");

    let page = ProductPage::load(&api, &no_height, ItemKey::new(12)).await.unwrap();
    let preview = page.try_on(&api, &no_height).await.unwrap();
    assert!(matches!(preview, TryOnPreview::ProductImage(_)));
    assert!(backend.requests_to(Method::Get, "/api/userForm/me@fitpin.kr").is_empty());
}

#[tokio::test]
async fn test_comment_board_keeps_own_comments_with_text() {
    let backend = Arc::new(MockBackend::default());
    backend.json(
        Method::Get,
        "/api/fit_comment/get_fitcomment",
        200,
        json!([
            comment_json(1, "me@fitpin.kr", Some("딱 좋아요")),
            comment_json(2, "other@fitpin.kr", Some("별로")),
            comment_json(3, "me@fitpin.kr", Some("  ")),
            comment_json(4, "me@fitpin.kr", None),
            comment_json(5, "me@fitpin.kr", Some("소매가 길어요")),
        ]),
    );

    let board = CommentBoard::load(&api(&backend), &session()).await.unwrap();
    let keys: Vec<i64> = board
        .entries
        .iter()
        .map(|e| e.comment.fit_storage_key.get())
        .collect();
    assert_eq!(keys, vec![1, 5]);
    assert_eq!(
        board.entries[0].image_url,
        format!("{DATA}/api/img/imgserve/fitstorageimg/fit1.jpg")
    );
}

#[tokio::test]
async fn test_fit_storage_newest_first() {
    let backend = Arc::new(MockBackend::default());
    backend.json(
        Method::Get,
        "/api/fitStorageImages/user/me@fitpin.kr",
        200,
        json!([{"fitStorageImg": "old.jpg"}, {"fitStorageImg": "new.jpg"}]),
    );

    let urls = fit_storage_urls(&api(&backend), &session()).await.unwrap();
    assert_eq!(
        urls,
        vec![
            format!("{DATA}/api/img/imgserve/fitstorageimg/new.jpg"),
            format!("{DATA}/api/img/imgserve/fitstorageimg/old.jpg"),
        ]
    );
}

fn filled_writer(image_uri: &str) -> CommentWriter {
    let mut writer = CommentWriter::with_image(image_uri);
    writer.draft.item_name = "Oxford Shirt".into();
    writer.draft.brand = "FitPin".into();
    writer.draft.size = Some("M".into());
    writer.draft.fit = Some(FitOption::JustRight);
    writer.draft.text = "어깨가 딱 맞아요".into();
    writer
}

#[tokio::test]
async fn test_comment_submit_with_existing_image() {
    let backend = Arc::new(MockBackend::default());
    backend.bytes(Method::Get, "/api/img/imgserve/fitstorageimg/fit7.jpg", "image/jpeg", b"x");
    backend.json(Method::Post, "/api/fit_comment/save_comment", 200, json!({"message": "ok"}));

    let writer = filled_writer(&format!("{DATA}/api/img/imgserve/fitstorageimg/fit7.jpg"));
    let saved = writer.submit(&api(&backend), &session()).await.unwrap();
    assert_eq!(saved.image, "fit7.jpg");
    assert!(backend
        .requests_to(Method::Post, "/api/fitStorageImages/upload")
        .is_empty());

    let sent = backend.requests_to(Method::Post, "/api/fit_comment/save_comment");
    let body = sent[0].body.json_value().unwrap();
    assert_eq!(body["fitStorageImg"], "fit7.jpg");
    assert_eq!(body["option"], "딱 맞는다");
    assert_eq!(body["itemType"], "상의");
}

#[tokio::test]
async fn test_comment_submit_uploads_missing_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mirror.png");
    std::fs::write(&path, b"png-bytes").unwrap();

    let backend = Arc::new(MockBackend::default());
    backend.json(
        Method::Post,
        "/api/fitStorageImages/upload",
        200,
        json!({"message": "업로드 성공: 20261019_mirror.png"}),
    );
    backend.json(Method::Post, "/api/fit_comment/save_comment", 200, json!({"message": "ok"}));

    let writer = filled_writer(path.to_str().unwrap());
    let saved = writer.submit(&api(&backend), &session()).await.unwrap();
    assert_eq!(saved.image, "20261019_mirror.png");

    let uploads = backend.requests_to(Method::Post, "/api/fitStorageImages/upload");
    let Body::Multipart(form) = &uploads[0].body else {
        panic!("upload must be multipart");
    };
    assert_eq!(form.text_value("userEmail"), Some("me@fitpin.kr"));
    assert!(matches!(
        form.part("image"),
        Some(Part::File { file_name, content_type, .. })
            if file_name == "mirror.png" && content_type == "image/png"
    ));
}

#[tokio::test]
async fn test_comment_upload_failure_is_rejection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.jpg");
    std::fs::write(&path, b"jpg").unwrap();

    let backend = Arc::new(MockBackend::default());
    backend.json(
        Method::Post,
        "/api/fitStorageImages/upload",
        413,
        json!({"message": "파일이 너무 큽니다"}),
    );

    let writer = filled_writer(path.to_str().unwrap());
    let err = writer.submit(&api(&backend), &session()).await.unwrap_err();
    assert_eq!(err, ClientError::rejected("파일이 너무 큽니다"));
    assert!(backend
        .requests_to(Method::Post, "/api/fit_comment/save_comment")
        .is_empty());
}

#[tokio::test]
async fn test_comment_validation_order() {
    let backend = Arc::new(MockBackend::default());
    let api = api(&backend);

    let mut writer = CommentWriter::new();
    writer.draft.text = "text".into();
    assert_eq!(
        writer.submit(&api, &session()).await.unwrap_err(),
        ClientError::Validation(ValidationError::ImageNotSelected)
    );

    writer.draft.image_uri = Some("/tmp/a.jpg".into());
    assert_eq!(
        writer.submit(&api, &session()).await.unwrap_err(),
        ClientError::Validation(ValidationError::ProductNameMissing)
    );
    assert!(backend.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_withdraw_signs_out() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Post, "/api/members/delete_id", 200, json!(true));

    let mut session = session();
    withdraw(&api(&backend), &mut session).await.unwrap();
    assert!(!session.is_signed_in());

    let sent = backend.requests_to(Method::Post, "/api/members/delete_id");
    assert_eq!(sent[0].body.json_value().unwrap(), json!({"userEmail": "me@fitpin.kr"}));
}

#[tokio::test]
async fn test_withdraw_refused_keeps_session() {
    let backend = Arc::new(MockBackend::default());
    backend.json(Method::Post, "/api/members/delete_id", 200, json!(false));

    let mut session = session();
    let err = withdraw(&api(&backend), &mut session).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { .. }));
    assert!(session.is_signed_in());
}
