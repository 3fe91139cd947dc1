//! Serializes component documents to JSON or Markdown files.

use crate::prose::ProseSource;
use anyhow::{anyhow, Context, Result};
use compdoc_common::{ComponentDocument, PropertyDescriptor};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!("unknown format: {}. Use json or markdown", s)),
        }
    }
}

pub fn render(
    doc: &ComponentDocument,
    prose: &dyn ProseSource,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(doc, prose),
        OutputFormat::Markdown => Ok(render_markdown(doc, prose)),
    }
}

/// Write one `<componentName>.<ext>` file per document. Returns the written paths.
pub fn write_documents(
    out_dir: &Path,
    docs: &[ComponentDocument],
    prose: &dyn ProseSource,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;

    let mut written = Vec::with_capacity(docs.len());
    for doc in docs {
        let path = out_dir.join(format!("{}.{}", doc.name(), format.file_extension()));
        let content = render(doc, prose, format)?;
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        written.push(path);
    }

    info!("Wrote {} documents to {:?}", written.len(), out_dir);
    Ok(written)
}

fn render_json(doc: &ComponentDocument, prose: &dyn ProseSource) -> Result<String> {
    let mut value = serde_json::to_value(doc)?;
    if let (Some(text), Some(record)) = (prose.prose_for(doc.name()), value.as_object_mut()) {
        record.insert("prose".to_string(), serde_json::Value::String(text));
    }
    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

fn render_markdown(doc: &ComponentDocument, prose: &dyn ProseSource) -> String {
    let mut lines: Vec<String> = Vec::new();
    push_component(&mut lines, doc, prose, 1);
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_component(
    lines: &mut Vec<String>,
    doc: &ComponentDocument,
    prose: &dyn ProseSource,
    level: usize,
) {
    let heading = "#".repeat(level);
    let section = "#".repeat(level + 1);

    lines.push(format!("{} {}\n", heading, doc.name()));
    lines.push(format!("- Category: `{}`", doc.category()));
    if let Some(base) = doc.base_class() {
        lines.push(format!("- Extends: `{}`", base));
    }
    if let Some(source) = doc.alias_of() {
        lines.push(format!("- Alias of: `{}`", source));
    }
    lines.push(String::new());

    if let Some(description) = doc.description() {
        lines.push(description.to_string());
        lines.push(String::new());
    }
    if let Some(text) = prose.prose_for(doc.name()) {
        lines.push(text.trim_end().to_string());
        lines.push(String::new());
    }

    if !doc.props().is_empty() {
        lines.push(format!("{} Properties\n", section));
        lines.push("| Name | Type | Default | Inherited from |".to_string());
        lines.push("|------|------|---------|----------------|".to_string());
        for prop in doc.props() {
            lines.push(property_row(prop));
        }
        lines.push(String::new());
    }

    if !doc.methods().is_empty() {
        lines.push(format!("{} Methods\n", section));
        for method in doc.methods() {
            let params: Vec<String> = method
                .parameters
                .iter()
                .map(|p| {
                    let marker = if p.optional { "?" } else { "" };
                    format!("{}{}: {}", p.name, marker, p.type_annotation)
                })
                .collect();
            lines.push(format!(
                "- `{}({}): {}`",
                method.name,
                params.join(", "),
                method.return_type
            ));
        }
        lines.push(String::new());
    }

    if !doc.events().is_empty() {
        lines.push(format!("{} Events\n", section));
        for event in doc.events() {
            lines.push(format!("- `{}` ({})", event.name, escape_cell(&event.parameters)));
        }
        lines.push(String::new());
    }

    if !doc.styles().is_empty() {
        lines.push(format!("{} Styles\n", section));
        for style in doc.styles() {
            match &style.description {
                Some(description) => {
                    lines.push(format!("- `{}`: {}", style.class_name, description))
                }
                None => lines.push(format!("- `{}`", style.class_name)),
            }
        }
        lines.push(String::new());
    }

    for child in doc.children() {
        push_component(lines, child, prose, level + 1);
    }
}

fn property_row(prop: &PropertyDescriptor) -> String {
    let name = if prop.optional {
        format!("{}?", prop.name)
    } else {
        prop.name.clone()
    };
    format!(
        "| `{}` | `{}` | {} | {} |",
        name,
        escape_cell(&prop.type_annotation),
        prop.default
            .as_deref()
            .map(|d| format!("`{}`", escape_cell(d)))
            .unwrap_or_default(),
        prop.inherited_from.as_deref().unwrap_or_default()
    )
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
