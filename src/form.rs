//! The shared add/edit form.
//!
//! Holds the raw text the user typed and turns it into an `add` or `update` on submit. Drafts
//! survive a failed submit so the user can correct them.

use crate::error::InventoryError;
use crate::model::Product;
use crate::notifications;
use crate::remote::RemoteStore;
use crate::store::ProductCollectionStore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(Product),
}

#[derive(Debug, Default)]
pub struct FormController {
    mode: FormMode,
    name_draft: String,
    quantity_draft: String,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    pub fn name_draft(&self) -> &str {
        &self.name_draft
    }

    pub fn quantity_draft(&self) -> &str {
        &self.quantity_draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name_draft = name.into();
    }

    pub fn set_quantity(&mut self, quantity: impl Into<String>) {
        self.quantity_draft = quantity.into();
    }

    /// Switches to editing `product` with its current values pre-filled.
    pub fn start_edit(&mut self, product: Product) {
        debug!(product_id = %product.id, "Editing product");
        self.name_draft = product.name.clone();
        self.quantity_draft = product.quantity.to_string();
        self.mode = FormMode::Editing(product);
    }

    /// Back to creating, with empty drafts.
    pub fn cancel_edit(&mut self) {
        self.mode = FormMode::Creating;
        self.clear_drafts();
    }

    /// Adds or updates through `store`, depending on the mode.
    ///
    /// On success the drafts are cleared and the form returns to [`FormMode::Creating`]. On any
    /// error the drafts and the mode are kept.
    pub async fn submit<R: RemoteStore>(
        &mut self,
        store: &ProductCollectionStore<R>,
    ) -> Result<Product, InventoryError> {
        let quantity = parse_quantity(&self.quantity_draft).map_err(|e| {
            warn!(error = %e, "Form input rejected");
            store.notifications().error(notifications::INVALID_INPUT);
            e
        })?;

        let saved = match &self.mode {
            FormMode::Creating => store.add(&self.name_draft, quantity).await?,
            FormMode::Editing(product) => {
                store.update(&product.id, &self.name_draft, quantity).await?
            }
        };

        self.mode = FormMode::Creating;
        self.clear_drafts();
        Ok(saved)
    }

    fn clear_drafts(&mut self) {
        self.name_draft.clear();
        self.quantity_draft.clear();
    }
}

fn parse_quantity(text: &str) -> Result<i64, InventoryError> {
    let text = text.trim();
    text.parse::<i64>().map_err(|_| {
        InventoryError::Validation(format!("quantity '{text}' is not a whole number"))
    })
}
