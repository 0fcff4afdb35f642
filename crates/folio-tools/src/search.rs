//! Free-text search across the whole portfolio.

use crate::ToolId;
use async_trait::async_trait;
use folio_core::{Result, Tool};
use folio_data::PortfolioQueries;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct SearchTool {
    queries: PortfolioQueries,
}

impl SearchTool {
    pub fn new(queries: PortfolioQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        ToolId::SearchPortfolio.name()
    }

    fn description(&self) -> &str {
        "Search across all portfolio data (experience, projects, skills) for content \
         matching a query. Useful for finding specific technologies, companies, or topics."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query to find relevant portfolio information"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            query: String,
        }
        let args: Args = serde_json::from_value(args)?;
        Ok(self.queries.search(&args.query))
    }
}
