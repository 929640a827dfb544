//! `md2conf render` command implementation.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use md2conf_config::{CliSettings, Config};
use md2conf_confluence::{
    ConverterOptions, Extensions, SAMPLE_DOCUMENT, storage_format_renderer,
};

use super::language_map;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to convert. Reads standard input when omitted or `-`.
    input: Option<PathBuf>,

    /// Render the built-in sample document instead of reading input.
    #[arg(long, conflicts_with = "input")]
    sample: bool,

    /// Path to configuration file (default: auto-discover md2conf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not add `id` attributes to headings.
    #[arg(long)]
    no_heading_ids: bool,

    /// Keep external links in the same tab.
    #[arg(long)]
    same_tab_links: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or output fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            heading_ids: self.no_heading_ids.then_some(false),
            external_links_new_tab: self.same_tab_links.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using configuration file");
        }
        let options = converter_options(&config)?;

        let markdown = if self.sample {
            SAMPLE_DOCUMENT.to_owned()
        } else {
            read_input(self.input.as_deref())?
        };
        if markdown.trim().is_empty() {
            output.warning("Warning: input is empty");
        }

        tracing::info!(bytes = markdown.len(), "Rendering Markdown");
        let html = storage_format_renderer(options).render(&markdown);

        write_output(&mut io::stdout().lock(), &html)?;
        Ok(())
    }
}

/// Map loaded configuration to renderer options.
fn converter_options(config: &Config) -> Result<ConverterOptions, CliError> {
    let markdown = &config.markdown;
    Ok(ConverterOptions {
        extensions: Extensions {
            tables: markdown.tables,
            strikethrough: markdown.strikethrough,
            tasklists: markdown.tasklists,
            footnotes: markdown.footnotes,
            smart_punctuation: markdown.smart_punctuation,
            heading_attributes: markdown.heading_attributes,
            definition_lists: markdown.definition_lists,
        },
        heading_ids: markdown.heading_ids,
        external_links_new_tab: markdown.external_links_new_tab,
        languages: language_map(config)?,
    })
}

/// Read Markdown from a file, or from stdin when `input` is `None` or `-`.
fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    match input {
        Some(path) if path != Path::new("-") => {
            tracing::info!(path = %path.display(), "Reading Markdown file");
            std::fs::read_to_string(path).map_err(|source| CliError::Input {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            tracing::info!("Reading Markdown from stdin");
            Ok(read_from(io::stdin().lock())?)
        }
    }
}

fn read_from(mut reader: impl Read) -> io::Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

/// Write rendered markup followed by a newline.
fn write_output(out: &mut impl Write, html: &str) -> io::Result<()> {
    writeln!(out, "{html}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.md");
        std::fs::write(&path, "# Title\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "# Title\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = read_input(Some(&path)).unwrap_err();

        assert!(matches!(err, CliError::Input { .. }), "got {err:?}");
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn test_read_from_reader() {
        let text = read_from("```sh\nls\n```".as_bytes()).unwrap();
        assert_eq!(text, "```sh\nls\n```");
    }

    #[test]
    fn test_read_from_invalid_utf8() {
        let err = read_from(&[0xff, 0xfe][..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_write_output_appends_newline() {
        let mut buf = Vec::new();
        write_output(&mut buf, "<p>x</p>").unwrap();
        assert_eq!(buf, b"<p>x</p>\n");
    }

    #[test]
    fn test_converter_options_from_default_config() {
        let options = converter_options(&Config::default()).unwrap();
        assert_eq!(options.extensions, Extensions::default());
        assert!(options.heading_ids);
        assert!(options.external_links_new_tab);
    }

    #[test]
    fn test_converter_options_from_loaded_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("md2conf.toml");
        std::fs::write(
            &path,
            "[markdown]\nfootnotes = true\ntables = false\n\n[code.aliases]\ntsx = \"js\"\n",
        )
        .unwrap();
        let settings = CliSettings {
            heading_ids: Some(false),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        let options = converter_options(&config).unwrap();

        assert!(options.extensions.footnotes);
        assert!(!options.extensions.tables);
        assert!(!options.heading_ids);

        let html = storage_format_renderer(options).render("# T\n\n```tsx\nx\n```");
        assert!(html.starts_with("<h1>T</h1>\n"));
        assert!(html.contains(r#"<ac:parameter ac:name="language">js</ac:parameter>"#));
    }

    #[test]
    fn test_sample_output() {
        let options = converter_options(&Config::default()).unwrap();
        let html = storage_format_renderer(options).render(SAMPLE_DOCUMENT);
        let mut buf = Vec::new();
        write_output(&mut buf, &html).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "<h1 id=\"heading\">Heading</h1>\n\
             <p>Paragraph text</p>\n\
             <ac:structured-macro ac:name=\"code\" ac:schema-version=\"1\">\n\
             <ac:parameter ac:name=\"language\">erl</ac:parameter>\n\
             <ac:plain-text-body><![CDATA[code block]]></ac:plain-text-body>\n\
             </ac:structured-macro>\n"
        );
    }
}
