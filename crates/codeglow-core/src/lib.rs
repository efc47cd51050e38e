//! # Codeglow Core
//!
//! Everything around the classifier: configuration, colour presets,
//! HTML generation, benchmark tables and the image renderer client.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Config                             │
//! │   paths · renderer service · preset (passed by reference) │
//! └───────────────┬───────────────────────────┬──────────────┘
//!                 │                           │
//!   ┌─────────────┴────────────┐   ┌──────────┴─────────────┐
//!   │      HtmlGenerator       │   │    RendererService     │
//!   │  snippet · blog · image  │──▶│  HTML → PNG over HTTP  │
//!   └─────────────┬────────────┘   └────────────────────────┘
//!                 │
//!   ┌─────────────┴────────────┐   ┌────────────────────────┐
//!   │   codeglow-syntax        │   │   benchmark tables     │
//!   │ tokenize · parse_code    │   │ parse · underline · html│
//!   └──────────────────────────┘   └────────────────────────┘
//! ```

pub mod benchmark;
pub mod config;
pub mod console;
pub mod folders;
pub mod html;
pub mod preset;
pub mod renderer;

pub use benchmark::{BenchmarkCell, BenchmarkError, BenchmarkRow, BenchmarkTable};
pub use config::Config;
pub use html::{HtmlGenerator, generate_code_snippet_html};
pub use preset::{Palette, SyntaxPreset};
pub use renderer::{ImageRenderer, RenderError, RenderedImage, RendererService};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Syntax(#[from] codeglow_syntax::SyntaxError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Benchmark error: {0}")]
    Benchmark(#[from] BenchmarkError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("No folder matching '{prefix} N' in {base}")]
    NoNumberedFolder { prefix: String, base: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
