pub mod client;
pub mod types;

pub use client::CloudflareClient;
pub use types::*;

use thiserror::Error;

/// Failures talking to the Cloudflare v4 API.
#[derive(Debug, Error)]
pub enum CloudflareError {
    #[error("Cloudflare request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Cloudflare API error: {body}")]
    Upstream { status: u16, body: String },

    #[error("Cloudflare API failed: {0}")]
    Api(String),

    #[error("Cloudflare response could not be parsed: {0}")]
    Parse(String),

    #[error("Zone {zone}: {source}")]
    Zone {
        zone: String,
        #[source]
        source: Box<CloudflareError>,
    },
}

impl CloudflareError {
    /// Attach the owning zone so aggregation failures identify the culprit.
    pub fn for_zone(zone: impl Into<String>, source: CloudflareError) -> Self {
        CloudflareError::Zone { zone: zone.into(), source: Box::new(source) }
    }
}
