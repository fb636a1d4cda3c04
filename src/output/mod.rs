//! Output module for generating the archive indexes
//!
//! This module handles:
//! - Rendering the markdown `README.md` listing
//! - Rendering the HTML `index.html` listing
//! - Computing and printing archive statistics

mod html;
mod markdown;
pub mod stats;
mod traits;

pub use html::{format_html_index, HtmlIndex};
pub use markdown::{format_markdown_index, MarkdownIndex};
pub use stats::{print_statistics, ArchiveStatistics};
pub use traits::{IndexContext, IndexRenderer, OutputError, OutputResult, SiteLinks};

use crate::config::SiteConfig;
use crate::storage::Metadata;

/// Regenerates both indexes from the full metadata
///
/// # Arguments
///
/// * `metadata` - Every archived URL and its latest record
/// * `site` - Published site configuration (targets and boilerplate)
///
/// # Returns
///
/// * `Ok(())` - Both files were overwritten
/// * `Err(OutputError)` - A file could not be written
pub fn render_indexes(metadata: &Metadata, site: &SiteConfig) -> OutputResult<()> {
    let context = IndexContext::from_config(site);

    MarkdownIndex.write(metadata, &context, &site.readme_path)?;
    HtmlIndex.write(metadata, &context, &site.index_path)?;

    tracing::info!(
        "Regenerated {} and {} ({} entries)",
        site.readme_path.display(),
        site.index_path.display(),
        metadata.len()
    );

    Ok(())
}
