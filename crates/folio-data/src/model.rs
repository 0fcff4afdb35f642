use serde::{Deserialize, Deserializer, Serialize};

/// Complete portfolio dataset. Wire format is the camelCase JSON the
/// portfolio website serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub personal: PersonalInfo,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub tagline: String,
    pub bio: String,
    pub email: String,
    pub social: SocialLinks,
}

/// Contact and profile links. Upstream data uses empty strings for links
/// that don't exist, so empty deserializes to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinks {
    #[serde(deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub resume_link: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// One of `frontend`, `backend`, `tools`, `other` in practice; unknown
    /// categories still display, under their raw name.
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stargazer_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl Experience {
    /// Display form of the employment period.
    pub fn period(&self) -> String {
        period(&self.start_date, self.end_date.as_deref(), self.current)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl Education {
    /// Display form of the study period.
    pub fn period(&self) -> String {
        period(&self.start_date, self.end_date.as_deref(), self.current)
    }
}

fn period(start: &str, end: Option<&str>, current: bool) -> String {
    match end {
        Some(end) if !current => format!("{start} - {end}"),
        _ => format!("{start} - Present"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::json!({
            "id": "project-x",
            "title": "Widget",
            "description": "Does things.",
            "technologies": ["Rust"],
            "liveUrl": "https://widget.example.dev",
            "githubUrl": "https://github.com/example/widget",
            "featured": true,
            "stargazerCount": 42,
        });
        let project: Project = serde_json::from_value(json).unwrap();
        assert_eq!(project.live_url.as_deref(), Some("https://widget.example.dev"));
        assert_eq!(project.stargazer_count, Some(42));

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["githubUrl"], "https://github.com/example/widget");
        assert_eq!(back["stargazerCount"], 42);
    }

    #[test]
    fn test_unknown_optional_fields_default() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": "p",
            "title": "T",
            "description": "D",
        }))
        .unwrap();
        assert!(!project.featured);
        assert!(project.technologies.is_empty());
        assert_eq!(project.github_url, None);
    }

    #[test]
    fn test_empty_social_link_becomes_none() {
        let social: SocialLinks = serde_json::from_value(serde_json::json!({
            "github": "https://github.com/example",
            "twitter": "",
        }))
        .unwrap();
        assert_eq!(social.github.as_deref(), Some("https://github.com/example"));
        assert_eq!(social.twitter, None);
        assert_eq!(social.meeting_link, None);
    }

    #[test]
    fn test_period_prefers_explicit_end_date() {
        let experience: Experience = serde_json::from_value(serde_json::json!({
            "id": "exp-x",
            "company": "Example Co",
            "position": "Engineer",
            "location": "Remote",
            "startDate": "2024-01",
            "endDate": "2024-08",
        }))
        .unwrap();
        assert_eq!(experience.period(), "2024-01 - 2024-08");
    }

    #[test]
    fn test_period_shows_present_for_current_roles() {
        let education: Education = serde_json::from_value(serde_json::json!({
            "id": "edu-x",
            "institution": "Somewhere",
            "degree": "M.Sc.",
            "field": "CS",
            "location": "Glasgow, UK",
            "startDate": "2024-09",
            "endDate": "2025-09",
            "current": true,
        }))
        .unwrap();
        assert_eq!(education.period(), "2024-09 - Present");
    }
}
