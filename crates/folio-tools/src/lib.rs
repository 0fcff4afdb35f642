//! The portfolio tools the language model can call, and their wire names.

pub mod info;
pub mod lookup;
pub mod search;

use folio_core::{Result, ToolRegistry};
use folio_data::PortfolioQueries;
use std::fmt;
use std::sync::Arc;

pub use info::{ContactInfoTool, EducationTool, PersonalInfoTool, PortfolioSummaryTool};
pub use lookup::{ExperienceTool, ProjectsTool, SkillsTool};
pub use search::SearchTool;

/// The closed set of portfolio tools. Wire names are part of the model
/// prompt contract and never change casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    GetExperience,
    GetProjects,
    GetSkills,
    GetEducation,
    GetContactInfo,
    GetPersonalInfo,
    GetPortfolioSummary,
    SearchPortfolio,
}

impl ToolId {
    pub const ALL: [ToolId; 8] = [
        ToolId::GetExperience,
        ToolId::GetProjects,
        ToolId::GetSkills,
        ToolId::GetEducation,
        ToolId::GetContactInfo,
        ToolId::GetPersonalInfo,
        ToolId::GetPortfolioSummary,
        ToolId::SearchPortfolio,
    ];

    /// Wire name the model calls this tool by.
    pub fn name(&self) -> &'static str {
        match self {
            ToolId::GetExperience => "getExperience",
            ToolId::GetProjects => "getProjects",
            ToolId::GetSkills => "getSkills",
            ToolId::GetEducation => "getEducation",
            ToolId::GetContactInfo => "getContactInfo",
            ToolId::GetPersonalInfo => "getPersonalInfo",
            ToolId::GetPortfolioSummary => "getPortfolioSummary",
            ToolId::SearchPortfolio => "searchPortfolio",
        }
    }

    pub fn parse(name: &str) -> Option<ToolId> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register every portfolio tool against one shared query view. Fails if
/// any tool carries a malformed parameter schema.
pub fn register_all(registry: &mut ToolRegistry, queries: &PortfolioQueries) -> Result<()> {
    registry.register(Arc::new(ExperienceTool::new(queries.clone())))?;
    registry.register(Arc::new(ProjectsTool::new(queries.clone())))?;
    registry.register(Arc::new(SkillsTool::new(queries.clone())))?;
    registry.register(Arc::new(EducationTool::new(queries.clone())))?;
    registry.register(Arc::new(ContactInfoTool::new(queries.clone())))?;
    registry.register(Arc::new(PersonalInfoTool::new(queries.clone())))?;
    registry.register(Arc::new(PortfolioSummaryTool::new(queries.clone())))?;
    registry.register(Arc::new(SearchTool::new(queries.clone())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_data::builtin;

    fn registry() -> ToolRegistry {
        let queries = PortfolioQueries::new(Arc::new(builtin::portfolio()));
        let mut registry = ToolRegistry::new();
        register_all(&mut registry, &queries).unwrap();
        registry
    }

    #[test]
    fn test_register_all_covers_every_tool_id() {
        let registry = registry();
        assert_eq!(registry.len(), ToolId::ALL.len());
        for id in ToolId::ALL {
            assert!(registry.contains(id.name()), "missing {id}");
        }
    }

    #[test]
    fn test_wire_names_parse_back() {
        for id in ToolId::ALL {
            assert_eq!(ToolId::parse(id.name()), Some(id));
        }
        assert_eq!(ToolId::parse("getexperience"), None);
        assert_eq!(ToolId::parse("deleteEverything"), None);
    }

    #[tokio::test]
    async fn test_dispatch_reports_unknown_function() {
        let registry = registry();
        let output = registry
            .execute("getWeather", "call-1", serde_json::json!({}))
            .await;
        assert!(output.is_error);
        assert_eq!(output.content, "Error: Unknown function 'getWeather'");
    }

    #[tokio::test]
    async fn test_dispatch_end_to_end() {
        let registry = registry();
        let output = registry
            .execute(
                "getSkills",
                "call-1",
                serde_json::json!({"category": "frontend"}),
            )
            .await;
        assert!(!output.is_error, "got: {}", output.content);
        assert!(output.content.starts_with("Frontend Technologies: "), "got: {}", output.content);
    }
}
