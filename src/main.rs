//! # Codeglow - C# snippets to highlighted HTML
//!
//! Classifies the tokens of a C# (or JSON) snippet and renders them as
//! HTML for blog posts, as images through the renderer service, or
//! turns BenchmarkDotNet results into a styled table.
//!
//! ## Quick Start
//!
//! ```bash
//! # Blog HTML next to the source file
//! cargo run -- html Program.cs
//!
//! # Image into the newest "Blog Post N" folder
//! cargo run -- image Program.cs --name snippet
//!
//! # Benchmark table with the second row's mean underlined
//! cargo run -- benchmark results.md --underline 1:1
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codeglow_core::benchmark::parse_benchmark_table;
use codeglow_core::folders::{latest_blog_folder, latest_post_folder};
use codeglow_core::html::title_for;
use codeglow_core::{
    Config, HtmlGenerator, ImageRenderer, RenderedImage, RendererService, SyntaxPreset,
};

/// Codeglow - syntax-highlighted HTML and images from C# snippets
#[derive(Parser, Debug)]
#[command(name = "codeglow")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Echo highlighted snippets to the terminal
    #[arg(short, long, global = true)]
    show: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the classification of every token as JSON
    Classify {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write blog post HTML for a snippet
    Html {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Header title (defaults to csharp or json)
        #[arg(short, long)]
        title: Option<String>,

        /// Output file (defaults to FILE with an .html extension)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write blog post HTML for every .cs and .json file in a folder
    Batch {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Render a snippet to an image through the renderer service
    Image {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Destination folder (defaults to the newest post folder)
        #[arg(short, long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Image file name (defaults to the snippet's file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Render every .cs, .txt and .json file in a folder to an image
    Images {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Destination folder (defaults to DIR)
        #[arg(short, long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Save the colour preset to the config file
    Preset {
        /// RIDER or VISUAL_STUDIO
        #[arg(value_name = "PRESET")]
        preset: SyntaxPreset,
    },

    /// Write an HTML table from BenchmarkDotNet results
    Benchmark {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Underline the cell at ROW:COL (zero-based, repeatable)
        #[arg(short, long, value_name = "ROW:COL", value_parser = parse_cell)]
        underline: Vec<(usize, usize)>,

        /// Output file (defaults to FILE with an .html extension)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

fn parse_cell(value: &str) -> Result<(usize, usize), String> {
    let (row, column) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ROW:COL, got '{value}'"))?;
    let row = row.trim().parse().map_err(|e| format!("invalid row: {e}"))?;
    let column = column.trim().parse().map_err(|e| format!("invalid column: {e}"))?;
    Ok((row, column))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Codeglow v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Preset { preset } => {
            let path = save_preset(args.config.as_deref(), preset)?;
            println!("Syntax preset set to {} in {}", preset.name(), path.display());
        }
        command => {
            let config = load_config(args.config.as_deref(), args.show)?;
            run(&config, command).await?;
        }
    }

    Ok(())
}

async fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Classify { file } => {
            let json = classify(config, &file)?;
            println!("{json}");
        }
        Command::Html {
            file,
            title,
            output,
        } => {
            let output = write_blog_html(config, &file, title.as_deref(), output)?;
            println!("{}", output.display());
        }
        Command::Batch { dir } => {
            let written = batch(config, &dir)?;
            println!("Wrote {} file(s)", written.len());
        }
        Command::Image { file, dest, name } => {
            let renderer = RendererService::new(config)?;
            let image = render_image(config, &renderer, &file, dest, name.as_deref()).await?;
            println!("{}", image.path.display());
        }
        Command::Images { dir, dest } => {
            let renderer = RendererService::new(config)?;
            let images = render_images(config, &renderer, &dir, dest).await?;
            println!("Rendered {} image(s)", images.len());
        }
        Command::Benchmark {
            file,
            underline,
            output,
        } => {
            let output = write_benchmark_html(config, &file, &underline, output)?;
            println!("{}", output.display());
        }
        Command::Preset { preset } => {
            bail!("Preset {} is saved before any config is loaded", preset.name())
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, show: bool) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };
    let mut config = config
        .with_env_overrides()
        .context("Invalid environment override")?;
    if show {
        config.style.show_code_snippet = true;
    }
    Ok(config)
}

fn read_source(file: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn classify(config: &Config, file: &Path) -> anyhow::Result<String> {
    let code = read_source(file)?;
    let map = HtmlGenerator::new(config).highlight(&code)?;
    Ok(serde_json::to_string_pretty(&map)?)
}

fn write_blog_html(
    config: &Config,
    file: &Path,
    title: Option<&str>,
    output: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let code = read_source(file)?;
    let generator = HtmlGenerator::new(config);
    let map = generator
        .highlight(&code)
        .with_context(|| format!("Nothing to highlight in {}", file.display()))?;

    let html = generator.blog_html(&code, &map, title.unwrap_or_else(|| title_for(file)))?;
    let output = output.unwrap_or_else(|| file.with_extension("html"));
    std::fs::write(&output, html)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(input = %file.display(), output = %output.display(), "blog html written");
    Ok(output)
}

/// Files in `dir` with one of `extensions`, sorted by path.
fn source_files(dir: &Path, extensions: &[&str]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| extensions.iter().any(|wanted| *wanted == ext))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn batch(config: &Config, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let files = source_files(dir, &["cs", "json"])?;

    let mut written = Vec::with_capacity(files.len());
    for file in &files {
        match write_blog_html(config, file, None, None) {
            Ok(output) => written.push(output),
            Err(e) => tracing::warn!("Skipping {}: {:#}", file.display(), e),
        }
    }
    Ok(written)
}

/// Destination when none is given: newest blog post, then newest social
/// post, then the output folder.
fn default_image_dest(config: &Config) -> anyhow::Result<PathBuf> {
    if let Ok(dir) = latest_blog_folder(config) {
        return Ok(dir);
    }
    if let Ok(dir) = latest_post_folder(config) {
        return Ok(dir);
    }
    match &config.paths.output {
        Some(dir) => Ok(dir.clone()),
        None => bail!("No destination given and no post or output folder configured"),
    }
}

async fn render_image(
    config: &Config,
    renderer: &impl ImageRenderer,
    file: &Path,
    dest: Option<PathBuf>,
    name: Option<&str>,
) -> anyhow::Result<RenderedImage> {
    let code = read_source(file)?;
    let generator = HtmlGenerator::new(config);
    let map = generator
        .highlight(&code)
        .with_context(|| format!("Nothing to highlight in {}", file.display()))?;
    let html = generator.image_html(&code, &map)?;

    let dest = match dest {
        Some(dest) => dest,
        None => default_image_dest(config)?,
    };
    let name = match name {
        Some(name) => name.to_string(),
        None => file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("snippet")
            .to_string(),
    };

    let image = renderer
        .render(&html, &dest, &name)
        .await
        .with_context(|| format!("Failed to render {}", file.display()))?;
    Ok(image)
}

/// Renders every snippet in `dir` into `dest` (default `dir`), skipping
/// files that are empty or fail.
async fn render_images(
    config: &Config,
    renderer: &impl ImageRenderer,
    dir: &Path,
    dest: Option<PathBuf>,
) -> anyhow::Result<Vec<RenderedImage>> {
    let files = source_files(dir, &["cs", "txt", "json"])?;
    let dest = dest.unwrap_or_else(|| dir.to_path_buf());

    let mut images = Vec::with_capacity(files.len());
    for file in &files {
        match render_image(config, renderer, file, Some(dest.clone()), None).await {
            Ok(image) => images.push(image),
            Err(e) => tracing::warn!("Skipping {}: {:#}", file.display(), e),
        }
    }
    Ok(images)
}

/// Writes `preset` into the config file at `path` (default location when
/// `None`), keeping the file's other settings.
fn save_preset(path: Option<&Path>, preset: SyntaxPreset) -> anyhow::Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };

    let mut config = if path.exists() {
        Config::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        Config::default()
    };
    config.style.preset = preset;
    config
        .save_to(&path)
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    tracing::info!(preset = preset.name(), path = %path.display(), "syntax preset saved");
    Ok(path)
}

fn write_benchmark_html(
    config: &Config,
    file: &Path,
    underline: &[(usize, usize)],
    output: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let content = read_source(file)?;
    let mut table = parse_benchmark_table(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    for &(row, column) in underline {
        if table.toggle_underline(row, column).is_none() {
            tracing::warn!("No cell at {}:{}", row, column);
        }
    }

    let html = HtmlGenerator::new(config).benchmark_html(&table)?;
    let output = output.unwrap_or_else(|| file.with_extension("html"));
    std::fs::write(&output, html)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(output = %output.display(), rows = table.rows.len(), "benchmark html written");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeglow_core::RenderError;
    use std::fs;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(String, PathBuf, String)>>,
    }

    impl ImageRenderer for RecordingRenderer {
        async fn render(
            &self,
            html: &str,
            dest_dir: &Path,
            filename: &str,
        ) -> Result<RenderedImage, RenderError> {
            self.calls
                .lock()
                .unwrap()
                .push((html.to_string(), dest_dir.to_path_buf(), filename.to_string()));
            Ok(RenderedImage {
                path: dest_dir.join(filename),
                message: "ok".to_string(),
            })
        }
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["codeglow", "classify", "Program.cs"]);
        assert!(args.config.is_none());
        assert!(!args.show);
        assert_eq!(args.verbose, 0);
        assert!(matches!(args.command, Command::Classify { file } if file == Path::new("Program.cs")));
    }

    #[test]
    fn test_args_global_flags_after_subcommand() {
        let args = Args::parse_from(["codeglow", "html", "a.cs", "-vv", "--show", "-t", "C#"]);
        assert_eq!(args.verbose, 2);
        assert!(args.show);
        assert!(matches!(args.command, Command::Html { title: Some(t), .. } if t == "C#"));
    }

    #[test]
    fn test_args_benchmark_underlines() {
        let args = Args::parse_from([
            "codeglow", "benchmark", "results.md", "-u", "0:1", "--underline", "2:3",
        ]);
        match args.command {
            Command::Benchmark { underline, .. } => assert_eq!(underline, [(0, 1), (2, 3)]),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Args::try_parse_from(["codeglow", "benchmark", "r.md", "-u", "12"]).is_err());
    }

    #[test]
    fn test_args_preset() {
        let args = Args::parse_from(["codeglow", "preset", "visual_studio", "-c", "my.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert!(matches!(
            args.command,
            Command::Preset { preset: SyntaxPreset::VisualStudio }
        ));
        assert!(Args::try_parse_from(["codeglow", "preset", "monokai"]).is_err());
    }

    #[test]
    fn test_args_images() {
        let args = Args::parse_from(["codeglow", "images", "snippets", "-d", "out"]);
        assert!(matches!(
            args.command,
            Command::Images { dir, dest: Some(dest) } if dir == Path::new("snippets") && dest == Path::new("out")
        ));
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3:4"), Ok((3, 4)));
        assert_eq!(parse_cell(" 1 : 0 "), Ok((1, 0)));
        assert!(parse_cell("a:1").is_err());
    }

    #[test]
    fn test_write_blog_html_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Program.cs");
        fs::write(&file, "public class Foo { }").unwrap();

        let output = write_blog_html(&Config::default(), &file, None, None).unwrap();
        assert_eq!(output, dir.path().join("Program.html"));

        let html = fs::read_to_string(output).unwrap();
        assert!(html.contains(r#"<span class="code-header-title">csharp</span>"#));
        assert!(html.contains(r#"<span class="class-name">Foo</span>"#));
    }

    #[test]
    fn test_write_blog_html_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.cs");
        fs::write(&file, "   \n").unwrap();

        assert!(write_blog_html(&Config::default(), &file, None, None).is_err());
        assert!(!dir.path().join("empty.html").exists());
    }

    #[test]
    fn test_batch_only_converts_sources() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.cs"), "var x = 1;").unwrap();
        fs::write(dir.path().join("b.json"), r#"{ "key": 1 }"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        fs::write(dir.path().join("empty.cs"), "").unwrap();

        let written = batch(&Config::default(), dir.path()).unwrap();
        assert_eq!(written, [dir.path().join("a.html"), dir.path().join("b.html")]);

        let json = fs::read_to_string(dir.path().join("b.html")).unwrap();
        assert!(json.contains(r#"<span class="code-header-title">json</span>"#));
    }

    #[test]
    fn test_classify_outputs_json() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.cs");
        fs::write(&file, "return 42;").unwrap();

        let json = classify(&Config::default(), &file).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["return"], "keyword");
        assert_eq!(value["42"], "number");
    }

    #[test]
    fn test_write_benchmark_html() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("results.md");
        fs::write(
            &file,
            "| Method | Mean |\n|------- |-----:|\n| Fast | 1 ns |\n| Slow | 9 ns |\n",
        )
        .unwrap();

        let output = write_benchmark_html(&Config::default(), &file, &[(1, 1), (7, 7)], None).unwrap();
        let html = fs::read_to_string(output).unwrap();
        assert!(html.contains("<td><u>9 ns</u></td>"));
        assert!(html.contains("<td>1 ns</td>"));
    }

    #[tokio::test]
    async fn test_render_image_uses_newest_blog_folder() {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("blog");
        fs::create_dir_all(blog.join("Blog Post 1")).unwrap();
        fs::create_dir_all(blog.join("Blog Post 2")).unwrap();
        let file = dir.path().join("Snippet.cs");
        fs::write(&file, "int x = 1;").unwrap();

        let mut config = Config::default();
        config.paths.blog_posts = Some(blog.clone());

        let renderer = RecordingRenderer::default();
        let image = render_image(&config, &renderer, &file, None, None).await.unwrap();
        assert_eq!(image.path, blog.join("Blog Post 2").join("Snippet"));

        let calls = renderer.calls.lock().unwrap();
        let (html, _, name) = &calls[0];
        assert!(html.contains(r#"<span class="keyword">int</span>"#));
        assert_eq!(name, "Snippet");
    }

    #[tokio::test]
    async fn test_render_images_skips_empty_and_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A.cs"), "int a = 1;").unwrap();
        fs::write(dir.path().join("B.json"), r#"{ "b": 2 }"#).unwrap();
        fs::write(dir.path().join("C.txt"), "var c = 3;").unwrap();
        fs::write(dir.path().join("Empty.cs"), "  \n").unwrap();
        fs::write(dir.path().join("notes.md"), "# not code").unwrap();
        fs::create_dir(dir.path().join("Nested.cs")).unwrap();

        let renderer = RecordingRenderer::default();
        let images = render_images(&Config::default(), &renderer, dir.path(), None)
            .await
            .unwrap();
        assert_eq!(images.len(), 3);

        let calls = renderer.calls.lock().unwrap();
        let names: Vec<&str> = calls.iter().map(|(_, _, name)| name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(calls.iter().all(|(_, dest, _)| dest == dir.path()));
    }

    #[tokio::test]
    async fn test_render_images_into_destination() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Images");
        fs::write(dir.path().join("A.cs"), "int a = 1;").unwrap();

        let renderer = RecordingRenderer::default();
        let images = render_images(&Config::default(), &renderer, dir.path(), Some(out.clone()))
            .await
            .unwrap();
        assert_eq!(images[0].path, out.join("A"));
    }

    #[test]
    fn test_save_preset_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.paths.blog_posts = Some(PathBuf::from("/posts"));
        config.save_to(&path).unwrap();

        let saved = save_preset(Some(&path), SyntaxPreset::VisualStudio).unwrap();
        assert_eq!(saved, path);

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.style.preset, SyntaxPreset::VisualStudio);
        assert_eq!(loaded.paths.blog_posts, Some(PathBuf::from("/posts")));
    }

    #[test]
    fn test_save_preset_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        save_preset(Some(&path), SyntaxPreset::Rider).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("preset = \"RIDER\""));
    }

    #[tokio::test]
    async fn test_render_image_without_destination() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.cs");
        fs::write(&file, "int x;").unwrap();

        let renderer = RecordingRenderer::default();
        let result = render_image(&Config::default(), &renderer, &file, None, Some("a")).await;
        assert!(result.is_err());
        assert!(renderer.calls.lock().unwrap().is_empty());
    }
}
