//! Document-form index
//!
//! Generates the repository `README.md`: how to reach the archive, a table
//! of every archived URL, mirroring notes and contact details.

use crate::output::traits::{IndexContext, IndexRenderer};
use crate::storage::{ArchiveRecord, Metadata};

/// Renders the archive listing as markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownIndex;

impl IndexRenderer for MarkdownIndex {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn render(&self, metadata: &Metadata, context: &IndexContext) -> String {
        format_markdown_index(metadata, context)
    }
}

/// Formats the full markdown index
pub fn format_markdown_index(metadata: &Metadata, context: &IndexContext) -> String {
    let mut md = String::new();

    md.push_str("# Web Archive\n\n");
    md.push_str("This repository contains archived copies of various websites.\n\n");

    // Access
    md.push_str("## **Accessing the Archive**\n");
    if let Some(links) = &context.links {
        md.push_str("### Online, no download required\n");
        md.push_str(&format!("[View the archive]({})\n\n", links.pages_url));
        md.push_str("### Locally\n");
        md.push_str(&format!(
            "[Download ZIP]({}) and extract the contents. Open `index.html` in your browser to navigate the archive.\n\n",
            links.zip_url
        ));
    } else {
        md.push_str("### Locally\n");
        md.push_str(
            "Clone or download this repository and open `index.html` in your browser to navigate the archive.\n\n",
        );
    }

    // Listing
    md.push_str("## **Archived Websites**\n");
    md.push_str("| Website | Description | Last Successful Archive |\n");
    md.push_str("|---------|------------|-------------------------|\n");
    for (url, record) in metadata.iter() {
        md.push_str(&format_row(url, record));
        md.push('\n');
    }
    md.push('\n');

    // Mirroring
    md.push_str("## **Mirroring**\n");
    md.push_str(
        "If you'd like to create a mirror of this archive, simply fork this repository or download the archive.\n\n",
    );

    // Contact
    let email = context
        .contact_email
        .as_deref()
        .map(|email| format!("[send an email](mailto:{})", email));
    match (&context.links, email) {
        (Some(links), email) => {
            md.push_str("## **Contact**\n");
            md.push_str(&format!(
                "If you have any questions, feel free to open an issue on [GitHub]({}).",
                links.issues_url
            ));
            if let Some(email) = email {
                md.push_str(&format!(" Or you can {}.", email));
            }
            md.push('\n');
        }
        (None, Some(email)) => {
            md.push_str("## **Contact**\n");
            md.push_str(&format!("If you have any questions, you can {}.\n", email));
        }
        (None, None) => {}
    }

    md
}

/// One table row: linked URL, description, status
fn format_row(url: &str, record: &ArchiveRecord) -> String {
    let target = record
        .archived_path()
        .map(link_target)
        .unwrap_or_else(|| "#".to_string());
    let description = record.title.as_deref().map(escape_cell).unwrap_or_default();

    format!(
        "| [{}]({}) | {} | {} |",
        escape_link_text(url),
        target,
        description,
        escape_cell(&record.last_archived.to_string())
    )
}

/// Escapes characters that would end link text or a table cell
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Wraps paths that markdown would otherwise split in angle brackets
fn link_target(path: &str) -> String {
    if path.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        format!("<{}>", path)
    } else {
        path.to_string()
    }
}
