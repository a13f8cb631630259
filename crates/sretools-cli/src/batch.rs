//! Parallel batch lookups using Rayon
//!
//! The range table is fetched once and shared; each input line is parsed and
//! checked on the thread pool. Results come back in input order.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use sretools_cidr::{find_containing_range, IpRangeEntry};
use sretools_core::parse_address;
use std::io::{BufRead, BufReader, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::output::ErrorReport;

/// Batch processing result
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub input: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<IpRangeEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    ranges: Arc<Vec<IpRangeEntry>>,
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `ranges` - Range table, in lookup order
    /// * `num_threads` - Number of threads (default: CPU cores)
    pub fn new(ranges: Vec<IpRangeEntry>, num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(num_cpus::get).max(1);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self {
            ranges: Arc::new(ranges),
            thread_pool,
        })
    }

    /// Look up every input against the range table
    pub fn process(&self, inputs: Vec<String>) -> Vec<BatchResult> {
        let total = inputs.len();
        let processed = AtomicUsize::new(0);

        self.thread_pool.install(|| {
            inputs
                .into_par_iter()
                .map(|input| {
                    let result = self.lookup(input);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        tracing::debug!("Processed {}/{} IPs", count, total);
                    }

                    result
                })
                .collect()
        })
    }

    fn lookup(&self, input: String) -> BatchResult {
        match parse_address(&input) {
            Ok(addr) => {
                let matched = find_containing_range(addr, self.ranges.iter()).cloned();
                BatchResult {
                    input,
                    found: matched.is_some(),
                    matched,
                    error: None,
                }
            }
            Err(e) => BatchResult {
                input,
                found: false,
                matched: None,
                error: Some(ErrorReport::from(&e)),
            },
        }
    }

    /// Get thread pool info
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

/// Read one address per line, skipping blanks and `#` comments
pub fn read_inputs<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line.context("reading batch input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        inputs.push(trimmed.to_string());
    }
    Ok(inputs)
}
