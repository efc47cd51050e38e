//! HTML generation.
//!
//! The snippet fragment is built by re-tokenizing the code and looking
//! each token up in a [`ClassificationMap`]. Classified tokens are
//! wrapped in `<span class="...">`; everything else is copied verbatim
//! except `<` and `>`, which are escaped. No other escaping is done.

use crate::benchmark::{self, BenchmarkTable};
use crate::config::Config;
use crate::console::echo_token;
use crate::{CoreError, CoreResult};
use codeglow_syntax::{
    ClassificationMap, TokenClass, combine_tokens, parse_code, require_source, tokenize,
};
use std::io::{self, Write};
use std::path::Path;

const SNIPPET_TEMPLATE: &str = include_str!("../templates/snippet_template.html");
const BENCHMARK_TEMPLATE: &str = include_str!("../templates/benchmark_template.html");
const DEFAULT_FONT_PATH: &str = "fonts/Hack-Regular.ttf";

/// Renders `code` as a highlighted HTML fragment.
pub fn generate_code_snippet_html(code: &str, map: &ClassificationMap) -> String {
    let mut html = String::new();
    for token in &snippet_tokens(code) {
        push_token(&mut html, token, map.get(token));
    }
    html
}

/// Like [`generate_code_snippet_html`], also echoing each token to `out`
/// in its console colour.
pub fn generate_code_snippet_html_with_echo(
    code: &str,
    map: &ClassificationMap,
    out: &mut dyn Write,
) -> io::Result<String> {
    let mut html = String::new();
    for token in &snippet_tokens(code) {
        let class = map.get(token);
        push_token(&mut html, token, class);
        echo_token(out, token, class)?;
    }
    writeln!(out, "\n")?;
    Ok(html)
}

/// Combined tokens of `code` without one leading and one trailing bare newline.
fn snippet_tokens(code: &str) -> Vec<String> {
    let mut tokens = combine_tokens(&tokenize(code));
    if tokens.last().is_some_and(|t| t == "\n") {
        tokens.pop();
    }
    if tokens.first().is_some_and(|t| t == "\n") {
        tokens.remove(0);
    }
    tokens
}

fn push_token(html: &mut String, token: &str, class: Option<TokenClass>) {
    match class {
        Some(class) => {
            html.push_str("<span class=\"");
            html.push_str(class.css_class());
            html.push_str("\">");
            html.push_str(token);
            html.push_str("</span>");
        }
        None => match token {
            "<" => html.push_str("&lt;"),
            ">" => html.push_str("&gt;"),
            _ => html.push_str(token),
        },
    }
}

/// Header title for a source file: `csharp` for `.cs`, otherwise `json`.
pub fn title_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("cs") => "csharp",
        _ => "json",
    }
}

/// Builds complete documents using the configured preset and templates.
pub struct HtmlGenerator<'a> {
    config: &'a Config,
}

impl<'a> HtmlGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Classifies `code`, rejecting empty input.
    pub fn highlight(&self, code: &str) -> CoreResult<ClassificationMap> {
        let code = require_source(code)?;
        Ok(parse_code(code))
    }

    /// Snippet fragment, echoed to stdout when `show_code_snippet` is set.
    pub fn snippet_html(&self, code: &str, map: &ClassificationMap) -> CoreResult<String> {
        if self.config.style.show_code_snippet {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            Ok(generate_code_snippet_html_with_echo(code, map, &mut out)?)
        } else {
            Ok(generate_code_snippet_html(code, map))
        }
    }

    /// Blog post markup: a titled container around `<pre><code>`.
    pub fn blog_html(&self, code: &str, map: &ClassificationMap, title: &str) -> CoreResult<String> {
        let snippet = self.snippet_html(code, map)?;
        Ok(format!(
            r#"<div class="code-container">
    <div class="code-header">
    <span class="code-header-title">{title}</span>
    </div>
    <pre><code>{snippet}</code></pre>
    </div>"#
        ))
    }

    /// Standalone document for the image renderer.
    pub fn image_html(&self, code: &str, map: &ClassificationMap) -> CoreResult<String> {
        let snippet = self.snippet_html(code, map)?;
        let template = self.template("snippet_template.html", SNIPPET_TEMPLATE)?;
        let font_path = self
            .config
            .paths
            .font_path
            .as_deref()
            .map(|p| p.display().to_string().replace('\\', "/"))
            .unwrap_or_else(|| DEFAULT_FONT_PATH.to_string());

        Ok(template
            .replace("{{FONT_PATH}}", &font_path)
            .replace("{{CODE_SNIPPET}}", &snippet)
            .replace("{{CSS_CODE}}", &self.config.style.preset.css()))
    }

    /// Standalone document for a benchmark table.
    pub fn benchmark_html(&self, table: &BenchmarkTable) -> CoreResult<String> {
        let template = self.template("benchmark_template.html", BENCHMARK_TEMPLATE)?;
        Ok(benchmark::document_html(table, &template))
    }

    fn template(&self, name: &str, builtin: &'static str) -> CoreResult<String> {
        match &self.config.paths.templates_dir {
            Some(dir) => {
                let path = dir.join(name);
                if !path.exists() {
                    return Err(CoreError::TemplateNotFound(path.display().to_string()));
                }
                Ok(std::fs::read_to_string(path)?)
            }
            None => Ok(builtin.to_string()),
        }
    }
}
