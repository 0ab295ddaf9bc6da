//! Single-owner catalog service.
//!
//! One tokio task owns the [`PageState`]. Handlers reach it through a
//! [`CatalogHandle`], which sends a [`Command`] over a bounded channel and
//! awaits the reply. Each command runs to completion before the next one is
//! taken, so every transition sees a consistent catalog.

use tokio::sync::{mpsc, oneshot};

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::page::{FormState, PageState, PageView, ProductForm};
use crate::catalog::store::{Catalog, Product};
use crate::catalog::validate::{validate_product_form, validate_product_id};
use crate::observability::metrics;

/// Default depth of the command channel.
pub const DEFAULT_CHANNEL_DEPTH: usize = 64;

/// A page transition requested by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Current page, unchanged.
    Snapshot,
    /// Show the catalog filtered by the client's search text, or unfiltered
    /// when it sent none.
    List { search_text: Option<String> },
    ShowAddForm,
    ShowEditForm { id: String },
    ShowDeleteForm { id: String },
    Search { text: String },
    Create { form: ProductForm },
    Update { id: String, form: ProductForm },
    Delete { id: String },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Snapshot => "snapshot",
            Command::List { .. } => "list",
            Command::ShowAddForm => "show_add_form",
            Command::ShowEditForm { .. } => "show_edit_form",
            Command::ShowDeleteForm { .. } => "show_delete_form",
            Command::Search { .. } => "search",
            Command::Create { .. } => "create",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
        }
    }
}

struct Message {
    command: Command,
    reply: oneshot::Sender<CatalogResult<PageView>>,
}

/// Owner of the page state. Drive it directly with [`CatalogService::apply`]
/// or move it onto a task with [`CatalogService::spawn`].
pub struct CatalogService {
    state: PageState,
}

impl CatalogService {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            state: PageState::new(catalog),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Move the service onto its own task and return a handle to it.
    pub fn spawn(mut self, channel_depth: usize) -> CatalogHandle {
        let (sender, mut receiver) = mpsc::channel::<Message>(channel_depth.max(1));
        metrics::set_product_count(self.state.catalog().len());

        tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                let result = self.apply(message.command);
                let _ = message.reply.send(result);
            }
            tracing::debug!("Catalog service stopped");
        });

        CatalogHandle { sender }
    }

    /// Apply one transition and return the resulting page snapshot.
    pub fn apply(&mut self, command: Command) -> CatalogResult<PageView> {
        let name = command.name();
        let result = match command {
            Command::Snapshot => Ok(self.state.view()),
            Command::List { search_text } => self.list(search_text),
            Command::ShowAddForm => self.show_add_form(),
            Command::ShowEditForm { id } | Command::ShowDeleteForm { id } => {
                self.show_product_form(&id)
            }
            Command::Search { text } => self.search(&text),
            Command::Create { form } => self.create(&form),
            Command::Update { id, form } => self.update(&id, &form),
            Command::Delete { id } => self.delete(&id),
        };

        if let Err(e) = &result {
            tracing::debug!(command = name, error = %e, "Catalog command rejected");
        }
        metrics::set_product_count(self.state.catalog().len());
        result
    }

    fn list(&mut self, search_text: Option<String>) -> CatalogResult<PageView> {
        self.state.set_search_text(search_text.unwrap_or_default());
        Ok(self.state.view())
    }

    fn show_add_form(&mut self) -> CatalogResult<PageView> {
        self.state.reset_form();
        Ok(self.state.view())
    }

    fn show_product_form(&mut self, id: &str) -> CatalogResult<PageView> {
        let idx = validate_product_id(id, self.state.catalog())?;
        let product = self.product_at(idx, id)?;

        self.state.reset_form();
        self.state.set_form(FormState::from_product(&product));
        self.state.set_target(Some(product.id));
        Ok(self.state.view())
    }

    fn search(&mut self, text: &str) -> CatalogResult<PageView> {
        self.state.set_search_text(text.trim_end());
        Ok(self.state.view())
    }

    fn create(&mut self, form: &ProductForm) -> CatalogResult<PageView> {
        let form = form.trimmed();
        self.state.reset_form();

        let price_cents = validate_product_form(&form, None, true, &mut self.state)
            .map_err(|_| self.validation_failed())?;

        let product = self
            .state
            .catalog_mut()
            .create(form.name, form.description, price_cents);
        tracing::info!(id = product.id, name = %product.name, price_cents, "Product created");

        self.state.reset_form();
        self.state.refresh();
        Ok(self.state.view())
    }

    fn update(&mut self, id: &str, form: &ProductForm) -> CatalogResult<PageView> {
        let idx = validate_product_id(id, self.state.catalog())?;
        let current = self.product_at(idx, id)?;
        let form = form.trimmed();

        self.state.reset_form();
        self.state.set_target(Some(current.id));

        let name_changed = form.name != current.name;
        let price_cents =
            validate_product_form(&form, Some(current.id), name_changed, &mut self.state)
                .map_err(|_| self.validation_failed())?;

        if let Some(product) = self.state.catalog_mut().get_mut(idx) {
            product.name = form.name;
            product.description = form.description;
            product.price_cents = price_cents;
            tracing::info!(id = product.id, name = %product.name, price_cents, "Product updated");
        }

        self.state.reset_form();
        self.state.refresh();
        Ok(self.state.view())
    }

    fn delete(&mut self, id: &str) -> CatalogResult<PageView> {
        let idx = validate_product_id(id, self.state.catalog())?;
        let removed = self.state.catalog_mut().remove(idx);
        tracing::info!(id = removed.id, name = %removed.name, "Product deleted");

        self.state.reset_form();
        self.state.refresh();
        Ok(self.state.view())
    }

    fn product_at(&self, idx: usize, id: &str) -> CatalogResult<Product> {
        self.state
            .catalog()
            .get(idx)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    fn validation_failed(&self) -> CatalogError {
        CatalogError::ValidationFailed(Box::new(self.state.view()))
    }
}

/// Cloneable client side of the catalog service.
#[derive(Clone)]
pub struct CatalogHandle {
    sender: mpsc::Sender<Message>,
}

impl CatalogHandle {
    /// Send a command and wait for the resulting page.
    pub async fn send(&self, command: Command) -> CatalogResult<PageView> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Message { command, reply })
            .await
            .map_err(|_| CatalogError::Unavailable)?;

        response.await.map_err(|_| CatalogError::Unavailable)?
    }

    pub async fn snapshot(&self) -> CatalogResult<PageView> {
        self.send(Command::Snapshot).await
    }

    pub async fn list(&self, search_text: Option<String>) -> CatalogResult<PageView> {
        self.send(Command::List { search_text }).await
    }

    pub async fn show_add_form(&self) -> CatalogResult<PageView> {
        self.send(Command::ShowAddForm).await
    }

    pub async fn show_edit_form(&self, id: impl Into<String>) -> CatalogResult<PageView> {
        self.send(Command::ShowEditForm { id: id.into() }).await
    }

    pub async fn show_delete_form(&self, id: impl Into<String>) -> CatalogResult<PageView> {
        self.send(Command::ShowDeleteForm { id: id.into() }).await
    }

    pub async fn search(&self, text: impl Into<String>) -> CatalogResult<PageView> {
        self.send(Command::Search { text: text.into() }).await
    }

    pub async fn create(&self, form: ProductForm) -> CatalogResult<PageView> {
        self.send(Command::Create { form }).await
    }

    pub async fn update(&self, id: impl Into<String>, form: ProductForm) -> CatalogResult<PageView> {
        self.send(Command::Update { id: id.into(), form }).await
    }

    pub async fn delete(&self, id: impl Into<String>) -> CatalogResult<PageView> {
        self.send(Command::Delete { id: id.into() }).await
    }
}
