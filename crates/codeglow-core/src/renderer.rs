//! Client for the HTML-to-image renderer service.
//!
//! The service runs in a container with a host folder mounted as its
//! output directory. It takes `{html, destPath, filename}` on
//! `POST /convert`, screenshots the `.code-container` element and writes
//! the image to `destPath/filename` below that mount.

use crate::config::{Config, RendererConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

static FILENAME: Lazy<Regex> = Lazy::new(|| compile(r"^[a-zA-Z0-9_\- ]+\.(png|jpg|jpeg)$"));

/// Errors from rendering an image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid filename '{0}': use letters, digits, spaces, _ or - with a .png/.jpg/.jpeg extension")]
    InvalidFilename(String),

    #[error("Renderer service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Failed to communicate with renderer service: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Where the service saved an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    /// Location on this machine
    pub path: PathBuf,
    /// Status message from the service
    pub message: String,
}

/// Turns an HTML document into an image file.
pub trait ImageRenderer {
    fn render(
        &self,
        html: &str,
        dest_dir: &Path,
        filename: &str,
    ) -> impl Future<Output = Result<RenderedImage, RenderError>> + Send;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertRequest<'a> {
    html: &'a str,
    dest_path: String,
    filename: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ConvertResponse {
    message: Option<String>,
    path: Option<String>,
    error: Option<String>,
    details: Option<String>,
}

/// [`ImageRenderer`] backed by the HTTP renderer service.
#[derive(Debug, Clone)]
pub struct RendererService {
    client: reqwest::Client,
    settings: RendererConfig,
    roots: Vec<PathBuf>,
}

impl RendererService {
    pub fn new(config: &Config) -> Result<Self, RenderError> {
        let client = reqwest::Client::builder()
            .timeout(config.renderer.timeout())
            .build()?;

        let roots = [
            &config.paths.blog_posts,
            &config.paths.linkedin_posts,
            &config.paths.linkedin_blog_posts,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

        Ok(Self {
            client,
            settings: config.renderer.clone(),
            roots,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/convert", self.settings.url.trim_end_matches('/'))
    }

    /// Destination as seen from inside the service container.
    ///
    /// Paths under a configured post folder are made relative to the
    /// mounted host root; anything else is passed through.
    fn service_path(&self, dest_dir: &Path) -> PathBuf {
        let Some(root) = &self.settings.host_output_root else {
            return dest_dir.to_path_buf();
        };
        if !self.roots.iter().any(|r| dest_dir.starts_with(r)) {
            return dest_dir.to_path_buf();
        }
        match dest_dir.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => dest_dir.to_path_buf(),
        }
    }

    fn local_path(&self, service_path: &Path, filename: &str, reported: Option<String>) -> PathBuf {
        match &self.settings.host_output_root {
            Some(root) if service_path.is_relative() => root.join(service_path).join(filename),
            _ => reported
                .map(PathBuf::from)
                .unwrap_or_else(|| service_path.join(filename)),
        }
    }
}

impl ImageRenderer for RendererService {
    async fn render(
        &self,
        html: &str,
        dest_dir: &Path,
        filename: &str,
    ) -> Result<RenderedImage, RenderError> {
        let filename = normalize_filename(filename);
        validate_filename(&filename)?;

        let service_path = self.service_path(dest_dir);
        let request = ConvertRequest {
            html,
            dest_path: path_to_slashes(&service_path),
            filename: &filename,
        };

        tracing::debug!(url = %self.endpoint(), dest = %request.dest_path, "sending render request");
        let response = self.client.post(self.endpoint()).json(&request).send().await?;
        let status = response.status();
        let body: ConvertResponse = response.json().await.unwrap_or_default();

        if !status.is_success() {
            let message = match (body.error, body.details) {
                (Some(error), Some(details)) => format!("{error}: {details}"),
                (Some(error), None) => error,
                _ => "Unknown error".to_string(),
            };
            return Err(RenderError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let path = self.local_path(&service_path, &filename, body.path);
        tracing::info!(path = %path.display(), "image rendered");
        Ok(RenderedImage {
            path,
            message: body.message.unwrap_or_else(|| "Image saved successfully".to_string()),
        })
    }
}

/// Appends `.png` unless the name already has an image extension.
pub fn normalize_filename(name: &str) -> String {
    let name = name.trim();
    let lower = name.to_ascii_lowercase();
    if [".png", ".jpg", ".jpeg"].iter().any(|ext| lower.ends_with(ext)) {
        name.to_string()
    } else {
        format!("{name}.png")
    }
}

/// Checks `name` against the filenames the service accepts.
pub fn validate_filename(name: &str) -> Result<(), RenderError> {
    if FILENAME.is_match(name) {
        Ok(())
    } else {
        Err(RenderError::InvalidFilename(name.to_string()))
    }
}

fn path_to_slashes(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
