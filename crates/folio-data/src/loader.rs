use crate::builtin;
use crate::model::Portfolio;
use folio_core::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{info, warn};

const API_TIMEOUT: Duration = Duration::from_secs(5);

/// Staged portfolio loader: the live website API, then a shared JSON data
/// file, then the embedded dataset. The first stage that produces data
/// wins and is cached for the life of the source.
pub struct PortfolioSource {
    api_url: Option<String>,
    data_path: Option<PathBuf>,
    cached: OnceCell<Arc<Portfolio>>,
}

impl PortfolioSource {
    pub fn new(api_url: Option<String>, data_path: Option<PathBuf>) -> Self {
        Self {
            api_url,
            data_path,
            cached: OnceCell::new(),
        }
    }

    /// A source that only serves the embedded dataset.
    pub fn builtin() -> Self {
        Self::new(None, None)
    }

    /// Load the portfolio. Stage failures are logged and fall through;
    /// the embedded dataset means this always succeeds.
    pub async fn load(&self) -> Arc<Portfolio> {
        self.cached
            .get_or_init(|| async { Arc::new(self.load_uncached().await) })
            .await
            .clone()
    }

    async fn load_uncached(&self) -> Portfolio {
        if let Some(url) = &self.api_url {
            match fetch_from_api(url).await {
                Ok(portfolio) => {
                    info!(url = url.as_str(), "Loaded portfolio from API");
                    return portfolio;
                }
                Err(e) => warn!(url = url.as_str(), "Portfolio API unavailable: {e}"),
            }
        }

        if let Some(path) = &self.data_path {
            match read_from_file(path).await {
                Ok(portfolio) => {
                    info!(path = %path.display(), "Loaded portfolio from data file");
                    return portfolio;
                }
                Err(e) => warn!(path = %path.display(), "Portfolio data file unusable: {e}"),
            }
        }

        info!("Using built-in portfolio data");
        builtin::portfolio()
    }
}

async fn fetch_from_api(url: &str) -> Result<Portfolio> {
    let client = reqwest::Client::builder().timeout(API_TIMEOUT).build()?;
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.json().await?)
}

async fn read_from_file(path: &Path) -> Result<Portfolio> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}
