//! Typed calls to the FitPin backend.

use fitpin_commerce::prelude::*;
use fitpin_data::{join_url, DependencyTag, FetchClient, FetchOutcome, MultipartForm, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::ClientError;

const FALLBACK_IMAGE_TYPE: &str = "image/jpeg";

/// A stored fit-storage image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitStorageImage {
    #[serde(rename = "fitStorageImg")]
    pub image: String,
}

/// The user's registered body-scan form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyForm {
    #[serde(rename = "fileName")]
    pub file_name: String,
}

#[derive(Serialize)]
struct MemberRequest<'a> {
    #[serde(rename = "userEmail")]
    user_email: &'a UserEmail,
}

/// Bytes of an image plus the content type the server reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBytes {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// FitPin backend client.
#[derive(Debug, Clone)]
pub struct FitpinApi {
    client: FetchClient,
    config: ApiConfig,
}

impl FitpinApi {
    /// Create an API over a prepared fetch client.
    pub fn new(config: ApiConfig, client: FetchClient) -> Self {
        Self { client, config }
    }

    /// Create an API backed by `reqwest`.
    pub fn connect(config: ApiConfig) -> Result<Self, ClientError> {
        let client = config.fetch_client()?;
        Ok(Self::new(config, client))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn data_url(&self, segments: &[&str]) -> Result<String, ClientError> {
        Ok(join_url(&self.config.data_url, segments)?)
    }

    /// URL of a product image.
    pub fn item_image_url(&self, name: &str) -> Result<String, ClientError> {
        self.data_url(&["api", "img", "imgserve", "itemimg", name])
    }

    /// URL of a fit-storage image.
    pub fn fit_storage_image_url(&self, name: &str) -> Result<String, ClientError> {
        self.data_url(&["api", "img", "imgserve", "fitstorageimg", name])
    }

    /// `GET /api/item-info/<key>`.
    pub async fn fetch_item_info(&self, key: ItemKey) -> FetchOutcome<ItemInfo> {
        let url = match join_url(&self.config.data_url, &["api", "item-info", &key.to_string()]) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::Failed(e),
        };
        let outcome = self
            .client
            .get(url, DependencyTag::Catalog)
            .fetch_outcome()
            .await;
        if let Some(e) = outcome.error() {
            warn!(item_key = %key, error = %e, "failed to load item info");
        }
        outcome
    }

    /// `GET /api/userbodyinfo/<email>`.
    pub async fn fetch_body_profile(&self, email: &UserEmail) -> FetchOutcome<UserBodyProfile> {
        let url = match join_url(&self.config.data_url, &["api", "userbodyinfo", email.as_str()]) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::Failed(e),
        };
        let outcome = self
            .client
            .get(url, DependencyTag::Profile)
            .fetch_outcome()
            .await;
        if let Some(e) = outcome.error() {
            warn!(error = %e, "failed to load body profile");
        }
        outcome
    }

    /// `POST /api/cart/store`.
    pub async fn add_to_cart(&self, request: &CartRequest) -> Result<CartOutcome, ClientError> {
        let url = self.data_url(&["api", "cart", "store"])?;
        let resp = self
            .client
            .post(url, DependencyTag::Cart)
            .json(request)?
            .send()
            .await?
            .error_for_status()?;

        let outcome = CartOutcome::from_message(&resp.message().unwrap_or_default());
        match &outcome {
            CartOutcome::Added => info!(
                item_key = %request.item_key,
                size = %request.size,
                tailoring = request.tailoring,
                "added to cart"
            ),
            CartOutcome::Rejected(message) => warn!(%message, "cart refused item"),
        }
        Ok(outcome)
    }

    /// `GET /api/fit_comment/get_fitcomment`.
    pub async fn fetch_comments(&self) -> Result<Vec<FitComment>, ClientError> {
        let url = self.data_url(&["api", "fit_comment", "get_fitcomment"])?;
        let comments = self
            .client
            .get(url, DependencyTag::Comments)
            .fetch_outcome::<Vec<FitComment>>()
            .await
            .into_result()?;
        Ok(comments.unwrap_or_default())
    }

    /// `GET /api/fitStorageImages/user/<email>`, newest first.
    pub async fn fetch_fit_storage_images(
        &self,
        email: &UserEmail,
    ) -> Result<Vec<FitStorageImage>, ClientError> {
        let url = self.data_url(&["api", "fitStorageImages", "user", email.as_str()])?;
        let mut images = self
            .client
            .get(url, DependencyTag::Images)
            .fetch_outcome::<Vec<FitStorageImage>>()
            .await
            .into_result()?
            .unwrap_or_default();
        images.reverse();
        Ok(images)
    }

    /// Whether a fit-storage image with this name is already on the server.
    pub async fn image_exists(&self, name: &str) -> Result<bool, ClientError> {
        let url = self.fit_storage_image_url(name)?;
        let resp = self.client.get(url, DependencyTag::Images).send().await?;
        if resp.status == 404 {
            return Ok(false);
        }
        resp.error_for_status()?;
        Ok(true)
    }

    /// `POST /api/fitStorageImages/upload`. Returns the stored file name.
    pub async fn upload_fit_image(
        &self,
        email: &UserEmail,
        file_name: &str,
        image: ImageBytes,
    ) -> Result<String, ClientError> {
        let url = self.data_url(&["api", "fitStorageImages", "upload"])?;
        let form = MultipartForm::new().text("userEmail", email.as_str()).file(
            "image",
            file_name,
            image.content_type,
            image.bytes,
        );
        let resp = self
            .client
            .post(url, DependencyTag::Images)
            .multipart(form)
            .send()
            .await?;

        let message = resp.message().unwrap_or_default();
        if !resp.is_success() {
            return Err(ClientError::rejected(message));
        }
        // "<text>: <stored name>"
        match message.split_once(": ").map(|(_, name)| name.trim()) {
            Some(stored) if !stored.is_empty() => {
                info!(stored, "uploaded fit image");
                Ok(stored.to_string())
            }
            _ => {
                warn!(%message, "upload reply has no file name, keeping local name");
                Ok(file_name.to_string())
            }
        }
    }

    /// `POST /api/fit_comment/save_comment`.
    pub async fn save_comment(&self, comment: &SavedComment) -> Result<(), ClientError> {
        let url = self.data_url(&["api", "fit_comment", "save_comment"])?;
        let resp = self
            .client
            .post(url, DependencyTag::Comments)
            .json(comment)?
            .send()
            .await?;
        if !resp.is_success() {
            return Err(ClientError::rejected(
                resp.message()
                    .unwrap_or_else(|| format!("HTTP {}", resp.status)),
            ));
        }
        info!(item_name = %comment.item_name, "saved fit comment");
        Ok(())
    }

    /// `POST /api/members/delete_id`. True when the server confirms.
    pub async fn delete_member(&self, email: &UserEmail) -> Result<bool, ClientError> {
        let url = self.data_url(&["api", "members", "delete_id"])?;
        let resp = self
            .client
            .post(url, DependencyTag::Members)
            .json(&MemberRequest { user_email: email })?
            .send()
            .await?
            .error_for_status()?;
        Ok(is_truthy(&resp))
    }

    /// `GET /api/userForm/<email>`.
    pub async fn fetch_body_form(&self, email: &UserEmail) -> Result<BodyForm, ClientError> {
        let url = self.data_url(&["api", "userForm", email.as_str()])?;
        self.client
            .get(url, DependencyTag::Profile)
            .fetch_outcome::<BodyForm>()
            .await
            .into_result()?
            .ok_or_else(|| ClientError::NotFound(format!("body form for {email}")))
    }

    /// Download an image by URL.
    pub async fn download_image(&self, url: &str) -> Result<ImageBytes, ClientError> {
        let resp = self
            .client
            .get(url, DependencyTag::Images)
            .send()
            .await?
            .error_for_status()?;
        let content_type = resp
            .content_type()
            .unwrap_or(FALLBACK_IMAGE_TYPE)
            .to_string();
        Ok(ImageBytes {
            content_type,
            bytes: resp.into_bytes(),
        })
    }

    /// Generate a try-on image of `garment` on the user's registered body.
    pub async fn try_on(
        &self,
        email: &UserEmail,
        category: ItemCategory,
        garment: &str,
    ) -> Result<Vec<u8>, ClientError> {
        let ar_url = self
            .config
            .ar_url
            .as_deref()
            .ok_or_else(|| ClientError::Config("ar_url is not set".into()))?;
        let url = join_url(ar_url, &["try-on"])?;

        let body = self.fetch_body_form(email).await?;
        let clothes = self.download_image(&self.item_image_url(garment)?).await?;
        debug!(garment, body = %body.file_name, %category, "requesting try-on");

        let form = MultipartForm::new()
            .file("clothesImg", garment, clothes.content_type, clothes.bytes)
            .text("bodyFileName", body.file_name)
            .text("category", category.as_str());
        let resp = self
            .client
            .post(url, DependencyTag::TryOn)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.into_bytes())
    }
}

/// JS-style truthiness of a JSON reply.
fn is_truthy(resp: &Response) -> bool {
    use serde_json::Value;
    match resp.json_opt::<Value>() {
        Ok(Some(Value::Bool(b))) => b,
        Ok(Some(Value::Number(n))) => n.as_f64().is_some_and(|n| n != 0.0),
        Ok(Some(Value::String(s))) => !s.is_empty(),
        Ok(Some(Value::Array(_))) | Ok(Some(Value::Object(_))) => true,
        Ok(Some(Value::Null)) | Ok(None) => false,
        // Plain-text replies count when non-empty.
        Err(_) => resp.text().is_ok_and(|t| !t.trim().is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn reply(body: &str) -> Response {
        Response::new(200, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&reply("true")));
        assert!(is_truthy(&reply("1")));
        assert!(is_truthy(&reply(r#"{"message":"ok"}"#)));
        assert!(is_truthy(&reply("회원탈퇴 완료")));
        assert!(!is_truthy(&reply("false")));
        assert!(!is_truthy(&reply("0")));
        assert!(!is_truthy(&reply("null")));
        assert!(!is_truthy(&reply("")));
        assert!(!is_truthy(&reply(r#""""#)));
    }

    #[test]
    fn test_image_urls_are_encoded() {
        let api = FitpinApi::new(
            ApiConfig::default(),
            FetchClient::new(std::sync::Arc::new(NoTransport)),
        );
        assert_eq!(
            api.item_image_url("셔츠.png").unwrap(),
            "http://fitpitback.kro.kr:8080/api/img/imgserve/itemimg/%EC%85%94%EC%B8%A0.png"
        );
        assert_eq!(
            api.fit_storage_image_url("a.jpg").unwrap(),
            "http://fitpitback.kro.kr:8080/api/img/imgserve/fitstorageimg/a.jpg"
        );
    }

    struct NoTransport;

    #[async_trait::async_trait]
    impl fitpin_data::Transport for NoTransport {
        async fn execute(
            &self,
            _request: fitpin_data::Request,
        ) -> Result<Response, fitpin_data::FetchError> {
            Err(fitpin_data::FetchError::Connection("offline".into()))
        }
    }
}
