//! Statistics over the archive metadata
//!
//! Backs the `--stats` command-line mode.

use crate::storage::{LastArchived, Metadata};
use chrono::NaiveDate;

/// Archive statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveStatistics {
    /// Number of distinct URLs with a record
    pub total: usize,

    /// URLs whose last attempt succeeded
    pub archived: usize,

    /// URLs whose last attempt failed
    pub failed: usize,

    /// URLs with a status this version does not recognize
    pub unrecognized: usize,

    /// Most recent successful archive date
    pub latest: Option<NaiveDate>,

    /// Failed URLs, in stored order
    pub failed_urls: Vec<String>,
}

impl ArchiveStatistics {
    /// Computes statistics from loaded metadata
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let mut stats = Self {
            total: metadata.len(),
            ..Default::default()
        };

        for (url, record) in metadata.iter() {
            match &record.last_archived {
                LastArchived::Date(date) => {
                    stats.archived += 1;
                    stats.latest = stats.latest.max(Some(*date));
                }
                LastArchived::Failed => {
                    stats.failed += 1;
                    stats.failed_urls.push(url.clone());
                }
                LastArchived::Other(_) => stats.unrecognized += 1,
            }
        }

        stats
    }

    /// Share of URLs whose last attempt succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.archived as f64 / self.total as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ArchiveStatistics) {
    println!("=== Archive Statistics ===\n");

    println!("Overview:");
    println!("  Archived URLs: {}", stats.total);
    println!("  Last attempt succeeded: {}", stats.archived);
    println!("  Last attempt failed: {}", stats.failed);
    if stats.unrecognized > 0 {
        println!("  Unrecognized status: {}", stats.unrecognized);
    }
    match stats.latest {
        Some(date) => println!("  Most recent archive: {}", date),
        None => println!("  Most recent archive: never"),
    }
    println!();

    if !stats.failed_urls.is_empty() {
        println!("Failed URLs ({}):", stats.failed_urls.len());
        for url in &stats.failed_urls {
            println!("  - {}", url);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} URLs)",
        stats.success_rate(),
        stats.archived,
        stats.total
    );
}
