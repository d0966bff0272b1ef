use crate::model::{DESCRIPTION_OVERRIDES, DescriptionOverride};
use anyhow::{Context, Result};
use aws_config::{Region, SdkConfig, meta::region::RegionProviderChain};
use std::{env, sync::LazyLock};

pub static VERBOSE: LazyLock<bool> = LazyLock::new(|| match env::var("VERBOSE") {
    Ok(val) => val.parse::<bool>().unwrap_or(false),
    Err(_) => false,
});

pub fn get_verbose() -> bool {
    *VERBOSE
}

/// Runtime configuration for the inventory handler, read once at startup
/// and passed into the handler.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bucket holding both the model metadata objects and the movie payloads.
    pub bucket: String,
    /// Key prefix under which the model metadata objects live.
    pub meta_prefix: String,
    /// Key prefix under which the rendered movie payloads live.
    pub movies_prefix: String,
    /// Public base URL prepended to each model's `uv.src` value.
    pub public_movies_base_url: String,
    /// Fixed description overrides keyed on source-URL substrings.
    pub overrides: &'static [DescriptionOverride],
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bucket = env::var("MODEL_INVENTORY_BUCKET")
            .context("MODEL_INVENTORY_BUCKET must be provided")?;
        let public_movies_base_url =
            env::var("PUBLIC_MOVIES_BASE_URL").context("PUBLIC_MOVIES_BASE_URL must be provided")?;
        let meta_prefix = env::var("META_PREFIX").unwrap_or_else(|_| "meta/".to_string());
        let movies_prefix = env::var("MOVIES_PREFIX").unwrap_or_else(|_| "movies/".to_string());

        Ok(Self {
            bucket,
            meta_prefix,
            movies_prefix,
            public_movies_base_url,
            overrides: DESCRIPTION_OVERRIDES,
        })
    }
}

pub async fn load_aws_config() -> SdkConfig {
    let region_provider = RegionProviderChain::default_provider().or_else(Region::new("eu-west-1"));
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await
}
