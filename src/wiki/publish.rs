//! Concurrent page publishing.
//!
//! Each page edit is an independent unit of work: a failed publish is
//! logged and abandoned without blocking or cancelling its siblings, and
//! the pool is drained to completion before the report returns. No retries;
//! timeouts are whatever the HTTP client enforces.

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::render::Page;
use crate::wiki::WikiClient;

const EDIT_SUMMARY: &str = "Automated page update";

#[derive(Debug, Default)]
pub struct PublishReport {
    pub published: Vec<String>,
    /// `(title, error)` for every page that failed.
    pub failed: Vec<(String, String)>,
}

/// Publish all pages through a fixed-size worker pool sharing one client.
pub fn publish_pages(client: &WikiClient, pages: &[Page], jobs: usize) -> Result<PublishReport> {
    let token = client.csrf_token().context("failed to fetch edit token")?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
        .context("failed to build publish pool")?;

    let results: Vec<(String, Option<String>)> = pool.install(|| {
        pages
            .par_iter()
            .map(|page| {
                match client.edit(&token, &page.title, &page.content, EDIT_SUMMARY) {
                    Ok(()) => {
                        tracing::info!(title = %page.title, "published");
                        (page.title.clone(), None)
                    }
                    Err(err) => {
                        let err = format!("{err:#}");
                        tracing::warn!(title = %page.title, error = %err, "publish failed");
                        (page.title.clone(), Some(err))
                    }
                }
            })
            .collect()
    });

    let mut report = PublishReport::default();
    for (title, error) in results {
        match error {
            None => report.published.push(title),
            Some(error) => report.failed.push((title, error)),
        }
    }
    Ok(report)
}
