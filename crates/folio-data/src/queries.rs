use crate::model::{Education, Experience, Portfolio, Project, Skill};
use std::collections::HashSet;
use std::sync::Arc;

/// Read-only formatted views over the portfolio, one per agent tool.
///
/// Answers are plain text for a voice model to speak from, not markup.
/// Empty filter strings behave like no filter at all, because models
/// routinely send `""` for arguments they meant to omit.
#[derive(Debug, Clone)]
pub struct PortfolioQueries {
    data: Arc<Portfolio>,
}

impl PortfolioQueries {
    pub fn new(data: Arc<Portfolio>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Portfolio {
        &self.data
    }

    /// Work history, optionally narrowed to companies whose name contains
    /// `company` (case-insensitive).
    pub fn experience_summary(&self, company: Option<&str>) -> String {
        let mut experiences: Vec<&Experience> = self.data.experience.iter().collect();
        if let Some(company) = company.filter(|c| !c.is_empty()) {
            let needle = company.to_lowercase();
            experiences.retain(|exp| exp.company.to_lowercase().contains(&needle));
            if experiences.is_empty() {
                return format!("No experience found for company: {company}");
            }
        }
        if experiences.is_empty() {
            return "No experience information available.".to_string();
        }

        experiences
            .iter()
            .map(|exp| format_experience(exp))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Project details. A project id takes precedence over the featured
    /// filter; `featured == Some(false)` means no filter, same as `None`.
    pub fn project_details(&self, featured: Option<bool>, project_id: Option<&str>) -> String {
        let projects: Vec<&Project> = if let Some(id) = project_id.filter(|id| !id.is_empty()) {
            let selected: Vec<&Project> =
                self.data.projects.iter().filter(|p| p.id == id).collect();
            if selected.is_empty() {
                return format!("No project found with ID: {id}");
            }
            selected
        } else if featured == Some(true) {
            self.data.projects.iter().filter(|p| p.featured).collect()
        } else {
            self.data.projects.iter().collect()
        };

        if projects.is_empty() {
            return "No projects available.".to_string();
        }

        projects
            .iter()
            .map(|p| format_project(p))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Skills grouped by category, optionally narrowed to one category
    /// (case-insensitive exact match). Groups keep dataset order.
    pub fn skills_by_category(&self, category: Option<&str>) -> String {
        let mut skills: Vec<&Skill> = self.data.skills.iter().collect();
        let filter = category.filter(|c| !c.is_empty());
        if let Some(category) = filter {
            let needle = category.to_lowercase();
            skills.retain(|s| s.category.to_lowercase() == needle);
        }
        if skills.is_empty() {
            return match filter {
                Some(category) => format!("No skills found in category: {category}"),
                None => "No skills information available.".to_string(),
            };
        }

        group_by_category(&skills)
            .into_iter()
            .map(|(category, names)| {
                format!("{}: {}", category_display_name(&category), names.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn education_summary(&self) -> String {
        if self.data.education.is_empty() {
            return "No education information available.".to_string();
        }
        self.data
            .education
            .iter()
            .map(format_education)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn contact_info(&self) -> String {
        let personal = &self.data.personal;
        let social = &personal.social;

        let mut lines = vec![
            format!("Name: {}", personal.name),
            format!("Email: {}", personal.email),
        ];
        if let Some(link) = &social.meeting_link {
            lines.push(format!("Schedule a Meeting: {link}"));
        }
        if let Some(github) = &social.github {
            lines.push(format!("GitHub: {github}"));
        }
        if let Some(linkedin) = &social.linkedin {
            lines.push(format!("LinkedIn: {linkedin}"));
        }
        if let Some(resume) = &social.resume_link {
            lines.push(format!("Resume: {resume}"));
        }
        lines.join("\n")
    }

    pub fn personal_info(&self) -> String {
        let personal = &self.data.personal;
        format!("{} - {}\n\n{}", personal.name, personal.tagline, personal.bio)
    }

    pub fn portfolio_summary(&self) -> String {
        let data = &self.data;
        let personal = &data.personal;
        let featured = data.projects.iter().filter(|p| p.featured).count();

        format!(
            "{} - {}\n\n{}\n\n\
             Experience: {} positions\n\
             Projects: {} total ({} featured)\n\
             Skills: {} technical skills across {} categories\n\
             Education: {} degrees\n\n\
             Contact: {}\n\
             Meeting Link: {}",
            personal.name,
            personal.tagline,
            personal.bio,
            data.experience.len(),
            data.projects.len(),
            featured,
            data.skills.len(),
            category_count(&data.skills),
            data.education.len(),
            personal.email,
            personal
                .social
                .meeting_link
                .as_deref()
                .unwrap_or("Not available"),
        )
    }

    /// Case-insensitive substring search across experience, projects, and
    /// skills, rendered as labeled sections.
    pub fn search(&self, query: &str) -> String {
        let needle = query.to_lowercase();
        let mut sections: Vec<String> = Vec::new();

        let experience: Vec<&Experience> = self
            .data
            .experience
            .iter()
            .filter(|exp| {
                exp.company.to_lowercase().contains(&needle)
                    || exp.position.to_lowercase().contains(&needle)
                    || exp.description.to_lowercase().contains(&needle)
                    || exp
                        .achievements
                        .iter()
                        .any(|a| a.to_lowercase().contains(&needle))
                    || exp
                        .technologies
                        .iter()
                        .any(|t| t.to_lowercase().contains(&needle))
            })
            .collect();
        if !experience.is_empty() {
            sections.push("RELEVANT EXPERIENCE:".to_string());
            sections.push(
                experience
                    .iter()
                    .map(|exp| format_experience(exp))
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            );
        }

        let projects: Vec<&Project> = self
            .data
            .projects
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p
                        .technologies
                        .iter()
                        .any(|t| t.to_lowercase().contains(&needle))
            })
            .collect();
        if !projects.is_empty() {
            sections.push("\nRELEVANT PROJECTS:".to_string());
            sections.push(
                projects
                    .iter()
                    .map(|p| format_project(p))
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            );
        }

        let skills: Vec<&str> = self
            .data
            .skills
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .map(|s| s.name.as_str())
            .collect();
        if !skills.is_empty() {
            sections.push("\nRELEVANT SKILLS:".to_string());
            sections.push(skills.join(", "));
        }

        if sections.is_empty() {
            format!("No results found for: {query}")
        } else {
            sections.join("\n")
        }
    }

    /// Compact overview embedded in the agent's system instructions.
    pub fn briefing(&self) -> String {
        let data = &self.data;
        let personal = &data.personal;
        let featured = data.projects.iter().filter(|p| p.featured).count();

        format!(
            "Portfolio Owner: {}\n\
             Current Role: {}\n\
             Bio: {}\n\n\
             Quick Stats:\n\
             - Work Experience: {} positions\n\
             - Projects: {} total ({} featured)\n\
             - Technical Skills: {} skills across {} categories\n\
             - Education: {} degrees\n\n\
             Contact Information:\n\
             - Email: {}\n\
             - Meeting Link: {}\n\
             - GitHub: {}\n\
             - LinkedIn: {}",
            personal.name,
            personal.tagline,
            personal.bio,
            data.experience.len(),
            data.projects.len(),
            featured,
            data.skills.len(),
            category_count(&data.skills),
            data.education.len(),
            personal.email,
            personal
                .social
                .meeting_link
                .as_deref()
                .unwrap_or("Not available"),
            personal.social.github.as_deref().unwrap_or("Not available"),
            personal
                .social
                .linkedin
                .as_deref()
                .unwrap_or("Not available"),
        )
    }
}

fn category_count(skills: &[Skill]) -> usize {
    skills
        .iter()
        .map(|s| s.category.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn format_experience(exp: &Experience) -> String {
    format!(
        "{} at {}\n\
         Location: {}\n\
         Period: {}\n\n\
         {}\n\n\
         Key Achievements:\n{}\n\n\
         Technologies: {}",
        exp.position,
        exp.company,
        exp.location,
        exp.period(),
        exp.description,
        numbered(&exp.achievements),
        exp.technologies.join(", ")
    )
}

fn format_project(project: &Project) -> String {
    let mut links = Vec::new();
    if let Some(url) = &project.live_url {
        links.push(format!("Live: {url}"));
    }
    if let Some(url) = &project.github_url {
        links.push(format!("GitHub: {url}"));
    }
    let links_section = if links.is_empty() {
        String::new()
    } else {
        format!("\nLinks: {}", links.join(" | "))
    };

    let stats = match project.stargazer_count {
        Some(stars) if stars > 0 => format!("\nGitHub Stars: {stars}"),
        _ => String::new(),
    };

    format!(
        "{}\n{}\n\nTechnologies: {}{}{}",
        project.title,
        project.description,
        project.technologies.join(", "),
        links_section,
        stats
    )
}

fn format_education(edu: &Education) -> String {
    let mut result = format!(
        "{} in {}\n{}, {}\nPeriod: {}",
        edu.degree,
        edu.field,
        edu.institution,
        edu.location,
        edu.period()
    );
    if let Some(description) = edu.description.as_deref().filter(|d| !d.is_empty()) {
        result.push_str(&format!("\n\n{description}"));
    }
    if !edu.achievements.is_empty() {
        result.push_str(&format!(
            "\n\nKey Achievements:\n{}",
            numbered(&edu.achievements)
        ));
    }
    result
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn group_by_category(skills: &[&Skill]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for skill in skills {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == skill.category)
        {
            Some((_, names)) => names.push(skill.name.clone()),
            None => groups.push((skill.category.clone(), vec![skill.name.clone()])),
        }
    }
    groups
}

fn category_display_name(category: &str) -> &str {
    match category {
        "frontend" => "Frontend Technologies",
        "backend" => "Backend Technologies",
        "tools" => "Tools & DevOps",
        "other" => "Other Skills",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    fn queries() -> PortfolioQueries {
        PortfolioQueries::new(Arc::new(builtin::portfolio()))
    }

    #[test]
    fn test_experience_filtered_by_company() {
        let out = queries().experience_summary(Some("Healthtrip"));
        assert!(
            out.starts_with("Software Developer | Full Stack | Backend Intern at Healthtrip\n"),
            "got: {out}"
        );
        assert!(out.contains("Location: Noida, India"), "got: {out}");
        assert!(out.contains("Period: 2024-01 - 2024-08"), "got: {out}");
        assert!(out.contains("\nKey Achievements:\n  1. Refactored"), "got: {out}");
        assert!(out.contains("Technologies: NestJS, Elasticsearch"), "got: {out}");
        assert!(!out.contains("AST Consulting"), "got: {out}");
    }

    #[test]
    fn test_experience_filter_is_case_insensitive_substring() {
        let out = queries().experience_summary(Some("healthTRIP"));
        assert!(out.contains("Healthtrip"), "got: {out}");
        let out = queries().experience_summary(Some("micro"));
        assert!(out.contains("Microsoft"), "got: {out}");
    }

    #[test]
    fn test_experience_unknown_company_sentinel() {
        let out = queries().experience_summary(Some("nonexistent-co"));
        assert_eq!(out, "No experience found for company: nonexistent-co");
    }

    #[test]
    fn test_experience_without_filter_lists_everything() {
        let out = queries().experience_summary(None);
        for company in ["Healthtrip", "AST Consulting", "Microsoft"] {
            assert!(out.contains(company), "missing {company}: {out}");
        }
        assert_eq!(out.matches("Key Achievements:").count(), 3);
    }

    #[test]
    fn test_empty_company_filter_means_no_filter() {
        assert_eq!(queries().experience_summary(Some("")), queries().experience_summary(None));
    }

    #[test]
    fn test_project_id_takes_precedence_over_featured() {
        let out = queries().project_details(Some(true), Some("project-4"));
        // project-4 is not featured; the id must still win.
        assert!(out.starts_with("Vantage-14are05 Linux Utility\n"), "got: {out}");
        assert!(!out.contains("LeetCode"), "got: {out}");
    }

    #[test]
    fn test_project_by_id_includes_links() {
        let out = queries().project_details(None, Some("project-1"));
        assert!(
            out.contains("\nLinks: GitHub: https://github.com/ayushjaipuriyar/leetcode-mcpserver"),
            "got: {out}"
        );
    }

    #[test]
    fn test_unknown_project_id_sentinel() {
        let out = queries().project_details(None, Some("project-99"));
        assert_eq!(out, "No project found with ID: project-99");
    }

    #[test]
    fn test_featured_filter() {
        let out = queries().project_details(Some(true), None);
        assert!(out.contains("LeetCode MCP Server"), "got: {out}");
        assert!(out.contains("Segmentor"), "got: {out}");
        assert!(!out.contains("Partner Self-Serve Platform"), "got: {out}");
    }

    #[test]
    fn test_featured_false_lists_everything() {
        let out = queries().project_details(Some(false), None);
        assert!(out.contains("Partner Self-Serve Platform"), "got: {out}");
        assert!(out.contains("LeetCode MCP Server"), "got: {out}");
    }

    #[test]
    fn test_project_without_links_has_no_links_line() {
        let out = queries().project_details(None, Some("project-5"));
        assert!(!out.contains("Links:"), "got: {out}");
    }

    #[test]
    fn test_star_count_shown_only_when_positive() {
        let mut project = builtin::portfolio().projects[0].clone();
        project.stargazer_count = Some(128);
        assert!(format_project(&project).contains("\nGitHub Stars: 128"));

        project.stargazer_count = Some(0);
        assert!(!format_project(&project).contains("GitHub Stars"));
    }

    #[test]
    fn test_skills_grouped_in_dataset_order() {
        let out = queries().skills_by_category(None);
        let lines: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(
            lines[0],
            "Frontend Technologies: React, Next.js, Redux, TypeScript, JavaScript"
        );
        assert!(lines[1].starts_with("Backend Technologies: Node.js, NestJS"), "got: {out}");
        assert!(lines[2].starts_with("Tools & DevOps: PostgreSQL, MySQL"), "got: {out}");
    }

    #[test]
    fn test_skills_category_filter_is_case_insensitive() {
        let out = queries().skills_by_category(Some("TOOLS"));
        assert!(out.starts_with("Tools & DevOps: "), "got: {out}");
        assert!(!out.contains("Frontend"), "got: {out}");
    }

    #[test]
    fn test_skills_unknown_category_sentinel() {
        let out = queries().skills_by_category(Some("sports"));
        assert_eq!(out, "No skills found in category: sports");
    }

    #[test]
    fn test_unmapped_category_displays_raw() {
        let mut data = builtin::portfolio();
        data.skills.push(Skill {
            name: "Figma".into(),
            category: "design".into(),
        });
        let out = PortfolioQueries::new(Arc::new(data)).skills_by_category(Some("design"));
        assert_eq!(out, "design: Figma");
    }

    #[test]
    fn test_education_lists_both_degrees() {
        let out = queries().education_summary();
        assert!(out.starts_with("M.Sc. in Computer Science\nUniversity of Glasgow, Glasgow, UK\nPeriod: 2024-09 - 2025-09"), "got: {out}");
        assert!(out.contains("B.Tech. in Information Technology"), "got: {out}");
        assert!(out.contains("Key Achievements:\n  1. Specialized"), "got: {out}");
    }

    #[test]
    fn test_contact_info_exact_shape() {
        let out = queries().contact_info();
        assert_eq!(
            out,
            "Name: Ayush Jaipuriyar\n\
             Email: ayushjaipuriyar21@gmail.com\n\
             Schedule a Meeting: https://cal.com/ayushjaipuriyar/15min\n\
             GitHub: https://github.com/ayushjaipuriyar\n\
             LinkedIn: https://linkedin.com/in/ayushjaipuriyar\n\
             Resume: /api/resume"
        );
    }

    #[test]
    fn test_personal_info_shape() {
        let out = queries().personal_info();
        assert!(out.starts_with("Ayush Jaipuriyar - Full Stack Software Engineer\n\n"), "got: {out}");
        assert!(out.ends_with("at Healthtrip."), "got: {out}");
    }

    #[test]
    fn test_portfolio_summary_counts() {
        let out = queries().portfolio_summary();
        assert!(out.contains("Experience: 3 positions"), "got: {out}");
        assert!(out.contains("Projects: 6 total (3 featured)"), "got: {out}");
        assert!(out.contains("Skills: 26 technical skills across 3 categories"), "got: {out}");
        assert!(out.contains("Education: 2 degrees"), "got: {out}");
        assert!(out.contains("Contact: ayushjaipuriyar21@gmail.com"), "got: {out}");
        assert!(out.contains("Meeting Link: https://cal.com/ayushjaipuriyar/15min"), "got: {out}");
    }

    #[test]
    fn test_missing_meeting_link_reads_not_available() {
        let mut data = builtin::portfolio();
        data.personal.social.meeting_link = None;
        let out = PortfolioQueries::new(Arc::new(data)).portfolio_summary();
        assert!(out.contains("Meeting Link: Not available"), "got: {out}");
    }

    #[test]
    fn test_search_finds_experience_and_skills() {
        let out = queries().search("kubernetes");
        assert!(out.contains("RELEVANT EXPERIENCE:"), "got: {out}");
        assert!(out.contains("RELEVANT SKILLS:"), "got: {out}");
        assert!(out.contains("Kubernetes"), "got: {out}");
        assert!(!out.contains("RELEVANT PROJECTS:"), "got: {out}");
    }

    #[test]
    fn test_search_sections_keep_order() {
        let out = queries().search("nestjs");
        let exp = out.find("RELEVANT EXPERIENCE:").unwrap();
        let proj = out.find("RELEVANT PROJECTS:").unwrap();
        let skills = out.find("RELEVANT SKILLS:").unwrap();
        assert!(exp < proj && proj < skills, "got: {out}");
        assert!(out.contains("Partner Self-Serve Platform"), "got: {out}");
    }

    #[test]
    fn test_search_without_matches_sentinel() {
        let out = queries().search("zzzquil");
        assert_eq!(out, "No results found for: zzzquil");
    }

    #[test]
    fn test_briefing_shape() {
        let out = queries().briefing();
        assert!(out.starts_with("Portfolio Owner: Ayush Jaipuriyar\nCurrent Role: Full Stack Software Engineer\nBio: "), "got: {out}");
        assert!(out.contains("- Work Experience: 3 positions"), "got: {out}");
        assert!(out.contains("- Technical Skills: 26 skills across 3 categories"), "got: {out}");
        assert!(out.contains("- Meeting Link: https://cal.com/ayushjaipuriyar/15min"), "got: {out}");
        assert!(out.ends_with("- LinkedIn: https://linkedin.com/in/ayushjaipuriyar"), "got: {out}");
    }
}
