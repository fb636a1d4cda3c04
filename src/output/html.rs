//! Page-form index
//!
//! Generates `index.html`, the entry point of the published archive.

use crate::output::traits::{IndexContext, IndexRenderer};
use crate::storage::{ArchiveRecord, Metadata};
use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = r#"    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 40px;
            line-height: 1.6;
            max-width: 800px;
        }
        h1, h2 {
            color: #333;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-top: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #f4f4f4;
        }
        td.failed {
            color: #b00020;
            font-weight: bold;
        }
        a {
            color: #007bff;
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
    </style>
"#;

/// Renders the archive listing as a standalone HTML page
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlIndex;

impl IndexRenderer for HtmlIndex {
    fn name(&self) -> &'static str {
        "html"
    }

    fn render(&self, metadata: &Metadata, context: &IndexContext) -> String {
        format_html_index(metadata, context)
    }
}

/// Formats the full HTML index
pub fn format_html_index(metadata: &Metadata, context: &IndexContext) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("    <title>Archived Websites</title>\n");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n\n");

    html.push_str("    <h1>Archived Websites</h1>\n");
    if let Some(description) = &context.schedule_description {
        html.push_str(&format!("    <p>{}</p>\n", encode_text(description)));
    }
    html.push('\n');

    // Access
    html.push_str("    <h2>Accessing the Archive</h2>\n");
    if let Some(links) = &context.links {
        html.push_str(&format!(
            "    <p><strong>Online, no download required:</strong> <a href=\"{}\">{}</a></p>\n",
            encode_double_quoted_attribute(&links.pages_url),
            encode_text(&links.pages_url)
        ));
        html.push_str(&format!(
            "    <p><strong>Locally:</strong> <a href=\"{}\">Download ZIP</a> and extract the contents.</p>\n",
            encode_double_quoted_attribute(&links.zip_url)
        ));
    } else {
        html.push_str(
            "    <p><strong>Locally:</strong> clone or download this repository and open this page.</p>\n",
        );
    }
    html.push('\n');

    // Listing
    html.push_str("    <h2>List of Archived Websites</h2>\n");
    html.push_str("    <table>\n");
    html.push_str("        <tr>\n");
    html.push_str("            <th>Website</th>\n");
    html.push_str("            <th>Description</th>\n");
    html.push_str("            <th>Last Successful Archive</th>\n");
    html.push_str("        </tr>\n");
    for (url, record) in metadata.iter() {
        html.push_str("        ");
        html.push_str(&format_row(url, record));
        html.push('\n');
    }
    html.push_str("    </table>\n\n");

    // Contact
    let email = context.contact_email.as_deref().map(|email| {
        format!(
            "<a href=\"mailto:{}\">send an email</a>",
            encode_double_quoted_attribute(email)
        )
    });
    match (&context.links, email) {
        (Some(links), email) => {
            html.push_str("    <h2>Contact</h2>\n");
            html.push_str(&format!(
                "    <p>If you have questions, open an issue on <a href=\"{}\">GitHub</a>.",
                encode_double_quoted_attribute(&links.issues_url)
            ));
            if let Some(email) = email {
                html.push_str(&format!(" Or you can {}.", email));
            }
            html.push_str("</p>\n\n");
        }
        (None, Some(email)) => {
            html.push_str("    <h2>Contact</h2>\n");
            html.push_str(&format!("    <p>If you have questions, you can {}.</p>\n\n", email));
        }
        (None, None) => {}
    }

    html.push_str("</body>\n</html>\n");

    html
}

/// One table row: linked URL, description, status
fn format_row(url: &str, record: &ArchiveRecord) -> String {
    let href = record.archived_path().unwrap_or("#");
    let description = record.title.as_deref().unwrap_or("");
    let status_class = if record.last_archived.is_failed() {
        " class=\"failed\""
    } else {
        ""
    };

    format!(
        "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td{}>{}</td></tr>",
        encode_double_quoted_attribute(href),
        encode_text(url),
        encode_text(description),
        status_class,
        encode_text(&record.last_archived.to_string())
    )
}
