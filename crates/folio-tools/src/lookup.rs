//! Filtered lookups: experience by company, projects by id or featured
//! flag, skills by category.

use crate::ToolId;
use async_trait::async_trait;
use folio_core::{Result, Tool};
use folio_data::PortfolioQueries;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct ExperienceTool {
    queries: PortfolioQueries,
}

impl ExperienceTool {
    pub fn new(queries: PortfolioQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl Tool for ExperienceTool {
    fn name(&self) -> &str {
        ToolId::GetExperience.name()
    }

    fn description(&self) -> &str {
        "Get detailed information about work experience, including positions, companies, \
         achievements, and technologies used. Can optionally filter by company name."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Optional company name to filter experience by (e.g., 'Healthtrip', 'Microsoft')"
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            company: Option<String>,
        }
        let args: Args = serde_json::from_value(args)?;
        Ok(self.queries.experience_summary(args.company.as_deref()))
    }
}

pub struct ProjectsTool {
    queries: PortfolioQueries,
}

impl ProjectsTool {
    pub fn new(queries: PortfolioQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl Tool for ProjectsTool {
    fn name(&self) -> &str {
        ToolId::GetProjects.name()
    }

    fn description(&self) -> &str {
        "Get information about projects, including descriptions, technologies used, and \
         links. Can filter by featured projects or get a specific project by ID."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "featured": {
                    "type": "boolean",
                    "description": "If true, only return featured/highlighted projects"
                },
                "projectId": {
                    "type": "string",
                    "description": "Optional project ID to get details for a specific project"
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Args {
            featured: Option<bool>,
            project_id: Option<String>,
        }
        let args: Args = serde_json::from_value(args)?;
        Ok(self
            .queries
            .project_details(args.featured, args.project_id.as_deref()))
    }
}

pub struct SkillsTool {
    queries: PortfolioQueries,
}

impl SkillsTool {
    pub fn new(queries: PortfolioQueries) -> Self {
        Self { queries }
    }
}

#[async_trait]
impl Tool for SkillsTool {
    fn name(&self) -> &str {
        ToolId::GetSkills.name()
    }

    fn description(&self) -> &str {
        "Get a list of technical skills organized by category (frontend, backend, tools, \
         other). Can optionally filter by a specific category."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "enum": ["frontend", "backend", "tools", "other"],
                    "description": "Optional category to filter skills by"
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            category: Option<String>,
        }
        let args: Args = serde_json::from_value(args)?;
        Ok(self.queries.skills_by_category(args.category.as_deref()))
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
    async fn test_experience_passes_company_through() {
        let tool = ExperienceTool::new(queries());
        let out = tool.execute(json!({"company": "Healthtrip"})).await.unwrap();
        assert!(out.contains("Healthtrip"), "got: {out}");
        assert!(!out.contains("Microsoft"), "got: {out}");
    }

    #[tokio::test]
    async fn test_experience_ignores_extra_arguments() {
        let tool = ExperienceTool::new(queries());
        let out = tool
            .execute(json!({"company": "Microsoft", "verbose": true}))
            .await
            .unwrap();
        assert!(out.contains("Mentee at Engage'22"), "got: {out}");
    }

    #[tokio::test]
    async fn test_projects_takes_camel_case_project_id() {
        let tool = ProjectsTool::new(queries());
        let out = tool
            .execute(json!({"featured": true, "projectId": "project-4"}))
            .await
            .unwrap();
        assert!(out.starts_with("Vantage-14are05 Linux Utility"), "got: {out}");
    }

    #[tokio::test]
    async fn test_skills_category_enum_is_enforced_by_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(SkillsTool::new(queries()))).unwrap();

        let output = registry
            .execute("getSkills", "call-1", json!({"category": "sports"}))
            .await;
        assert!(output.is_error);
        assert_eq!(
            output.content,
            "Invalid value for category: sports. Must be one of: frontend, backend, tools, other"
        );
    }

    #[tokio::test]
    async fn test_skills_without_category_lists_all_groups() {
        let tool = SkillsTool::new(queries());
        let out = tool.execute(json!({})).await.unwrap();
        assert!(out.contains("Frontend Technologies:"), "got: {out}");
        assert!(out.contains("Backend Technologies:"), "got: {out}");
        assert!(out.contains("Tools & DevOps:"), "got: {out}");
    }
}
