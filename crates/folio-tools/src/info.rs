//! Parameterless information tools: education, contact, personal bio, and
//! the whole-portfolio summary.

use crate::ToolId;
use async_trait::async_trait;
use folio_core::{Result, Tool};
use folio_data::PortfolioQueries;
use serde_json::{json, Value};

fn no_parameters() -> Value {
    json!({"type": "object", "properties": {}})
}

pub struct EducationTool {
    queries: PortfolioQueries,
}

impl EducationTool {
    pub fn new(queries: PortfolioQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl Tool for EducationTool {
    fn name(&self) -> &str {
        ToolId::GetEducation.name()
    }

    fn description(&self) -> &str {
        "Get information about educational background, including degrees, institutions, \
         dates, and academic achievements."
    }

    fn parameters_schema(&self) -> Value {
        no_parameters()
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        Ok(self.queries.education_summary())
    }
}

pub struct ContactInfoTool {
    queries: PortfolioQueries,
}

impl ContactInfoTool {
    pub fn new(queries: PortfolioQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl Tool for ContactInfoTool {
    fn name(&self) -> &str {
        ToolId::GetContactInfo.name()
    }

    fn description(&self) -> &str {
        "Get contact information including email, meeting link, GitHub, LinkedIn, and \
         resume link."
    }

    fn parameters_schema(&self) -> Value {
        no_parameters()
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        Ok(self.queries.contact_info())
    }
}

pub struct PersonalInfoTool {
    queries: PortfolioQueries,
}

impl PersonalInfoTool {
    pub fn new(queries: PortfolioQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl Tool for PersonalInfoTool {
    fn name(&self) -> &str {
        ToolId::GetPersonalInfo.name()
    }

    fn description(&self) -> &str {
        "Get personal information including name, tagline, and bio/summary."
    }

    fn parameters_schema(&self) -> Value {
        no_parameters()
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        Ok(self.queries.personal_info())
    }
}

pub struct PortfolioSummaryTool {
    queries: PortfolioQueries,
}

impl PortfolioSummaryTool {
    pub fn new(queries: PortfolioQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl Tool for PortfolioSummaryTool {
    fn name(&self) -> &str {
        ToolId::GetPortfolioSummary.name()
    }

    fn description(&self) -> &str {
        "Get a high-level summary of the entire portfolio including counts of experience, \
         projects, skills, and education."
    }

    fn parameters_schema(&self) -> Value {
        no_parameters()
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        Ok(self.queries.portfolio_summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ToolRegistry;
    use folio_data::builtin;
    use std::sync::Arc;

    fn queries() -> PortfolioQueries {
        PortfolioQueries::new(Arc::new(builtin::portfolio()))
    }

    #[tokio::test]
    async fn test_education_needs_no_arguments() {
        let tool = EducationTool::new(queries());
        let out = tool.execute(json!({})).await.unwrap();
        assert!(out.contains("University of Glasgow"), "got: {out}");
    }

    #[tokio::test]
    async fn test_info_tools_accept_null_arguments_via_registry() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(ContactInfoTool::new(queries())))
            .unwrap();
        registry
            .register(Arc::new(PersonalInfoTool::new(queries())))
            .unwrap();
        registry
            .register(Arc::new(PortfolioSummaryTool::new(queries())))
            .unwrap();

        for name in ["getContactInfo", "getPersonalInfo", "getPortfolioSummary"] {
            let output = registry.execute(name, "call-1", Value::Null).await;
            assert!(!output.is_error, "{name} failed: {}", output.content);
            assert!(output.content.contains("Ayush Jaipuriyar"), "got: {}", output.content);
        }
    }
}
