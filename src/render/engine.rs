//! minijinja-backed renderer.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use minijinja::{default_auto_escape_callback, Environment, ErrorKind};
use thiserror::Error;

use crate::catalog::PageView;
use crate::config::RenderConfig;

/// Templates the server renders, plus the partials they pull in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Full document wrapping the product list.
    Page,
    /// `#main` content: search form and results.
    ProductList,
    /// Result rows only, swapped into `#results` by searches.
    ProductResults,
    ProductFields,
    AddProduct,
    EditProduct,
    DeleteProduct,
}

impl Template {
    pub const ALL: [Template; 7] = [
        Template::Page,
        Template::ProductList,
        Template::ProductResults,
        Template::ProductFields,
        Template::AddProduct,
        Template::EditProduct,
        Template::DeleteProduct,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Page => "page.html",
            Template::ProductList => "product_list.html",
            Template::ProductResults => "product_results.html",
            Template::ProductFields => "product_fields.html",
            Template::AddProduct => "add_product.html",
            Template::EditProduct => "edit_product.html",
            Template::DeleteProduct => "delete_product.html",
        }
    }
}

/// Errors raised while loading or rendering templates.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template '{name}' failed to load: {source}")]
    Load {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },

    #[error("template '{name}' failed to render: {source}")]
    Render {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

/// Renders [`PageView`]s through a fixed set of templates.
pub struct Renderer {
    env: Environment<'static>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    /// Renderer over the templates compiled into the binary.
    pub fn embedded() -> Result<Self, RenderError> {
        Self::from_config(&RenderConfig::default())
    }

    /// Renderer over templates read from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let mut env = base_environment();
        set_directory_loader(&mut env, dir.as_ref());
        Self::checked(env)
    }

    /// Pick the template source from configuration.
    ///
    /// Templates see `static_assets`, true when `/static` is mounted.
    pub fn from_config(config: &RenderConfig) -> Result<Self, RenderError> {
        let mut env = base_environment();
        match &config.template_dir {
            Some(dir) => {
                tracing::info!(template_dir = %dir, "Loading templates from directory");
                set_directory_loader(&mut env, Path::new(dir));
            }
            None => env.set_loader(embedded_template_loader),
        }
        env.add_global("static_assets", config.static_dir.is_some());
        Self::checked(env)
    }

    /// Load and compile every template up front so failures surface at startup.
    fn checked(env: Environment<'static>) -> Result<Self, RenderError> {
        for template in Template::ALL {
            env.get_template(template.name())
                .map_err(|source| RenderError::Load {
                    name: template.name(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, template: Template, view: &PageView) -> Result<String, RenderError> {
        let name = template.name();
        let render_err = |source| RenderError::Render { name, source };

        let tmpl = self.env.get_template(name).map_err(render_err)?;
        tmpl.render(view).map_err(render_err)
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(default_auto_escape_callback);
    env
}

fn set_directory_loader(env: &mut Environment<'static>, dir: &Path) {
    let dir = dir.to_path_buf();
    env.set_loader(move |name| directory_template_loader(&dir, name));
}

fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let source = match name {
        "page.html" => Some(include_str!("templates/page.html")),
        "product_list.html" => Some(include_str!("templates/product_list.html")),
        "product_results.html" => Some(include_str!("templates/product_results.html")),
        "product_fields.html" => Some(include_str!("templates/product_fields.html")),
        "add_product.html" => Some(include_str!("templates/add_product.html")),
        "edit_product.html" => Some(include_str!("templates/edit_product.html")),
        "delete_product.html" => Some(include_str!("templates/delete_product.html")),
        _ => None,
    };

    Ok(source.map(str::to_string))
}

fn directory_template_loader(dir: &Path, name: &str) -> Result<Option<String>, minijinja::Error> {
    // Only the fixed template names are ever requested; refuse anything path-like
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Ok(None);
    }

    let path: PathBuf = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
        Err(e) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read {}: {e}", path.display()),
        )),
    }
}
