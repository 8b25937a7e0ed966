//! Product page: size recommendation, size selection, tailoring and cart.

use fitpin_commerce::prelude::*;
use fitpin_data::FetchOutcome;
use tracing::{debug, warn};

use crate::api::FitpinApi;
use crate::session::SessionContext;
use crate::ClientError;

/// What the try-on pane shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryOnPreview {
    /// A generated image.
    Generated(Vec<u8>),
    /// Generation failed; show the product image instead.
    ProductImage(String),
}

/// State behind the product page.
#[derive(Debug, Clone, Default)]
pub struct ProductPage {
    item: Option<ItemInfo>,
    catalog: Option<SizeCatalog>,
    body: Option<UserBodyProfile>,
    recommended: Option<String>,
    selected: Option<String>,
    /// The user's own pick, parked while tailoring is on.
    remembered: Option<String>,
    tailoring: bool,
    offsets: TailoringOffsets,
    quantity: Quantity,
}

impl ProductPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the product and the user's body profile concurrently.
    ///
    /// A missing or failed body profile leaves the page without a
    /// recommendation. A missing product is an error.
    pub async fn load(
        api: &FitpinApi,
        session: &SessionContext,
        item_key: ItemKey,
    ) -> Result<Self, ClientError> {
        let body = async {
            match session.email.as_ref().filter(|email| !email.is_empty()) {
                Some(email) => api.fetch_body_profile(email).await,
                None => FetchOutcome::Empty,
            }
        };
        let (item, body) = tokio::join!(api.fetch_item_info(item_key), body);

        let mut page = Self::new();
        match item {
            FetchOutcome::Loaded(item) => page.apply_product(item)?,
            FetchOutcome::Empty => return Err(ClientError::NotFound(format!("item {item_key}"))),
            FetchOutcome::Failed(e) => return Err(e.into()),
        }
        match body {
            FetchOutcome::Loaded(body) => page.apply_body(body),
            FetchOutcome::Empty => debug!("no body profile, skipping recommendation"),
            FetchOutcome::Failed(e) => warn!(error = %e, "body profile unavailable"),
        }
        Ok(page)
    }

    /// Store the product. Rejects size tables with bad measurements.
    pub fn apply_product(&mut self, item: ItemInfo) -> Result<(), CommerceError> {
        let catalog = item.size_catalog();
        catalog.validate()?;
        let known = |label: &Option<String>| {
            label
                .as_deref()
                .is_some_and(|label| catalog.lookup(label).is_some())
        };
        if !known(&self.selected) {
            self.selected = None;
        }
        if !known(&self.remembered) {
            self.remembered = None;
        }
        self.recommended = None;
        self.catalog = Some(catalog);
        self.item = Some(item);
        self.refresh_recommendation();
        Ok(())
    }

    /// Store the body profile.
    pub fn apply_body(&mut self, body: UserBodyProfile) {
        self.body = Some(body);
        self.refresh_recommendation();
    }

    fn refresh_recommendation(&mut self) {
        let (Some(catalog), Some(body)) = (&self.catalog, &self.body) else {
            return;
        };
        self.recommended = recommend(catalog, body).map(|entry| entry.label().to_string());
        debug!(recommended = ?self.recommended, "recommendation updated");
        if self.selected.is_none() {
            self.selected = self.recommended.clone();
        }
    }

    pub fn item(&self) -> Option<&ItemInfo> {
        self.item.as_ref()
    }

    pub fn catalog(&self) -> Option<&SizeCatalog> {
        self.catalog.as_ref()
    }

    pub fn body(&self) -> Option<&UserBodyProfile> {
        self.body.as_ref()
    }

    pub fn recommended(&self) -> Option<&str> {
        self.recommended.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_tailoring(&self) -> bool {
        self.tailoring
    }

    pub fn offsets(&self) -> &TailoringOffsets {
        &self.offsets
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Pick a size by label.
    pub fn select_size(&mut self, label: &str) -> Result<(), CommerceError> {
        if self.tailoring {
            return Err(CommerceError::SelectionLocked);
        }
        let found = self
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.lookup(label))
            .is_some();
        if !found {
            return Err(CommerceError::SizeNotFound(label.to_string()));
        }
        self.selected = Some(label.to_string());
        Ok(())
    }

    /// Toggle tailoring.
    ///
    /// Turning it on switches to the recommended size and parks the user's
    /// pick; turning it off restores that pick. Counters reset either way.
    pub fn set_tailoring(&mut self, on: bool) {
        if on && !self.tailoring {
            self.remembered = self.selected.take();
            self.selected = self
                .recommended
                .clone()
                .or_else(|| self.remembered.clone());
        } else if !on && self.tailoring {
            if let Some(previous) = self.remembered.take() {
                self.selected = Some(previous);
            }
        }
        self.tailoring = on;
        self.offsets.reset();
    }

    /// Bump a tailoring counter.
    pub fn increment(&mut self, field: TailoringField) -> Result<(), CommerceError> {
        self.check_field(field)?;
        self.offsets.increment(field);
        Ok(())
    }

    /// Lower a tailoring counter, stopping at zero.
    pub fn decrement(&mut self, field: TailoringField) -> Result<(), CommerceError> {
        self.check_field(field)?;
        self.offsets.decrement(field);
        Ok(())
    }

    /// Bump a tailoring counter by `steps`, saturating.
    pub fn add_steps(&mut self, field: TailoringField, steps: u32) -> Result<(), CommerceError> {
        self.check_field(field)?;
        self.offsets.add(field, steps);
        Ok(())
    }

    /// Only counters of the loaded size table reach the cart and the order.
    fn check_field(&self, field: TailoringField) -> Result<(), CommerceError> {
        match &self.catalog {
            Some(catalog) if catalog.kind() != field.kind() => {
                Err(CommerceError::FieldKindMismatch {
                    field: field.as_str(),
                    kind: catalog.kind().as_str(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn increment_quantity(&mut self) {
        self.quantity.increment();
    }

    pub fn decrement_quantity(&mut self) {
        self.quantity.decrement();
    }

    pub fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Size table row for the selected label.
    pub fn selected_entry(&self) -> Option<SizeEntryRef<'_>> {
        let label = self.selected.as_deref()?;
        self.catalog.as_ref()?.lookup(label)
    }

    /// The recommended size table row.
    pub fn recommended_entry(&self) -> Option<SizeEntryRef<'_>> {
        let label = self.recommended.as_deref()?;
        self.catalog.as_ref()?.lookup(label)
    }

    fn require_item(&self) -> Result<&ItemInfo, ClientError> {
        self.item
            .as_ref()
            .ok_or_else(|| ClientError::NotFound("no product loaded".into()))
    }

    fn require_size(&self) -> Result<&str, ValidationError> {
        self.selected
            .as_deref()
            .ok_or(ValidationError::SizeNotSelected)
    }

    fn tailoring_offsets(&self) -> Option<&TailoringOffsets> {
        self.tailoring.then_some(&self.offsets)
    }

    /// Cart line for the current selection.
    pub fn cart_request(&self, session: &SessionContext) -> Result<CartRequest, ClientError> {
        let item = self.require_item()?;
        let size = self.require_size()?;
        let email = session.require_email()?;
        Ok(CartRequest::build(
            item,
            email,
            size,
            self.quantity,
            self.tailoring_offsets(),
        )?)
    }

    /// Purchase line for the order screen.
    pub fn order_draft(&self) -> Result<OrderDraft, ClientError> {
        let item = self.require_item()?;
        let size = self.require_size()?;
        Ok(OrderDraft::single(OrderLine::build(
            item,
            size,
            self.quantity,
            self.tailoring_offsets(),
        )))
    }

    /// Add the current selection to the cart.
    pub async fn add_to_cart(
        &self,
        api: &FitpinApi,
        session: &SessionContext,
    ) -> Result<CartOutcome, ClientError> {
        let request = self.cart_request(session)?;
        api.add_to_cart(&request).await
    }

    /// Generate a try-on preview, falling back to the product image.
    pub async fn try_on(
        &self,
        api: &FitpinApi,
        session: &SessionContext,
    ) -> Result<TryOnPreview, ClientError> {
        let item = self.require_item()?;
        let image = item.require_primary_image()?;
        let fallback = api.item_image_url(image)?;

        match generate(api, session, item.category, image).await {
            Ok(bytes) => Ok(TryOnPreview::Generated(bytes)),
            Err(e) => {
                warn!(error = %e, "try-on failed, showing product image");
                Ok(TryOnPreview::ProductImage(fallback))
            }
        }
    }
}

async fn generate(
    api: &FitpinApi,
    session: &SessionContext,
    category: ItemCategory,
    image: &str,
) -> Result<Vec<u8>, ClientError> {
    let email = session.require_email()?;
    session.require_height()?;
    api.try_on(email, category, image).await
}
