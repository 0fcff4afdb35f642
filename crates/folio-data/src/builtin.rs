//! Embedded portfolio dataset, used when neither the live API nor a data
//! file is available. Content mirrors the website's published config.

use crate::model::{
    Education, Experience, PersonalInfo, Portfolio, Project, Skill, SocialLinks,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn skill(name: &str, category: &str) -> Skill {
    Skill {
        name: name.to_string(),
        category: category.to_string(),
    }
}

/// The built-in portfolio.
pub fn portfolio() -> Portfolio {
    Portfolio {
        personal: personal(),
        skills: skills(),
        projects: projects(),
        experience: experience(),
        education: education(),
    }
}

fn personal() -> PersonalInfo {
    PersonalInfo {
        name: "Ayush Jaipuriyar".into(),
        tagline: "Full Stack Software Engineer".into(),
        bio: "Full stack Software Engineer specializing in scalable, fault-tolerant \
              distributed systems and APIs. Experienced with AWS, Docker, Kubernetes \
              and CI/CD. Currently pursuing M.Sc. in Computer Science at University \
              of Glasgow. Previously reduced API latency by 38% and automated \
              deployments from 3 hours to 10 minutes at Healthtrip."
            .into(),
        email: "ayushjaipuriyar21@gmail.com".into(),
        social: SocialLinks {
            github: Some("https://github.com/ayushjaipuriyar".into()),
            linkedin: Some("https://linkedin.com/in/ayushjaipuriyar".into()),
            twitter: None,
            email: None,
            meeting_link: Some("https://cal.com/ayushjaipuriyar/15min".into()),
            resume_link: Some("/api/resume".into()),
        },
    }
}

fn skills() -> Vec<Skill> {
    vec![
        skill("React", "frontend"),
        skill("Next.js", "frontend"),
        skill("Redux", "frontend"),
        skill("TypeScript", "frontend"),
        skill("JavaScript", "frontend"),
        skill("Node.js", "backend"),
        skill("NestJS", "backend"),
        skill("Express", "backend"),
        skill("Python", "backend"),
        skill("Flask", "backend"),
        skill("Django", "backend"),
        skill("Java", "backend"),
        skill("C/C++", "backend"),
        skill("PostgreSQL", "tools"),
        skill("MySQL", "tools"),
        skill("MongoDB", "tools"),
        skill("Redis", "tools"),
        skill("Elasticsearch", "tools"),
        skill("AWS", "tools"),
        skill("Docker", "tools"),
        skill("Kubernetes", "tools"),
        skill("Terraform", "tools"),
        skill("GitHub Actions", "tools"),
        skill("Jenkins", "tools"),
        skill("Prometheus", "tools"),
        skill("Grafana", "tools"),
    ]
}

fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "project-1".into(),
            title: "LeetCode MCP Server".into(),
            description: "Developed an MCP server with 15+ tools and 5 endpoints, \
                          delivering median responses <150ms and real-time submission \
                          streaming that cut manual testing overhead 80%."
                .into(),
            technologies: strings(&["Node.js", "TypeScript", "Express", "WebSocket"]),
            live_url: None,
            github_url: Some("https://github.com/ayushjaipuriyar/leetcode-mcpserver".into()),
            featured: true,
            stargazer_count: None,
        },
        Project {
            id: "project-2".into(),
            title: "Near-RT RIC ML-based Malicious Traffic Detection".into(),
            description: "Built an ML pipeline on Near-RT RIC with xApps for real-time \
                          traffic analysis. Classifiers achieved 67-73% accuracy and F1 \
                          up to 76% for detecting malicious network traffic."
                .into(),
            technologies: strings(&["Python", "PyTorch", "Open RAN", "Machine Learning"]),
            live_url: None,
            github_url: Some(
                "https://github.com/ayushjaipuriyar/ric-xapps-malicious-detection".into(),
            ),
            featured: true,
            stargazer_count: None,
        },
        Project {
            id: "project-3".into(),
            title: "Segmentor - M3U8 Stream Downloader".into(),
            description: "Created a Python CLI to download 100+ .m3u8 segments in \
                          parallel and assemble streams via ffmpeg in ≤60s, improving \
                          throughput 10x and reliability ~70%."
                .into(),
            technologies: strings(&["Python", "ffmpeg", "tkinter", "Async I/O"]),
            live_url: None,
            github_url: Some("https://github.com/ayushjaipuriyar/animepahe-dl".into()),
            featured: true,
            stargazer_count: None,
        },
        Project {
            id: "project-4".into(),
            title: "Vantage-14are05 Linux Utility".into(),
            description: "Produced a Linux utility exposing ACPI performance and battery \
                          tuning controls with profile switching, reducing battery \
                          discharge 20-30% and attracting community contributions."
                .into(),
            technologies: strings(&["Linux", "ACPI", "Bash", "System Programming"]),
            live_url: None,
            github_url: Some("https://github.com/ayushjaipuriyar/vantage-14are05".into()),
            featured: false,
            stargazer_count: None,
        },
        Project {
            id: "project-5".into(),
            title: "Partner Self-Serve Platform".into(),
            description: "Built a self-serve partner platform with Kong API Gateway, \
                          OAuth2, and Redis, automating onboarding from 4 days to 10 \
                          minutes and increasing partner acquisition by 60%."
                .into(),
            technologies: strings(&["NestJS", "Kong", "OAuth2", "Redis", "Docker"]),
            live_url: None,
            github_url: None,
            featured: false,
            stargazer_count: None,
        },
        Project {
            id: "project-6".into(),
            title: "Multilingual Translation System".into(),
            description: "Engineered a fault-tolerant backend translation system \
                          supporting 9 languages and 5,000+ entries/day, delivering 100% \
                          uptime and boosting global engagement by 70%."
                .into(),
            technologies: strings(&["NestJS", "Redis", "Elasticsearch", "Microservices"]),
            live_url: None,
            github_url: None,
            featured: false,
            stargazer_count: None,
        },
    ]
}

fn experience() -> Vec<Experience> {
    vec![
        Experience {
            id: "exp-2".into(),
            company: "Healthtrip".into(),
            position: "Software Developer | Full Stack | Backend Intern".into(),
            location: "Noida, India".into(),
            start_date: "2024-01".into(),
            end_date: Some("2024-08".into()),
            current: false,
            description: "Full-stack engineer building scalable healthcare platform \
                          solutions with microservices architecture."
                .into(),
            achievements: strings(&[
                "Refactored and migrated 50% of a PHP monolith into NestJS microservices, \
                 reducing API latency by 38% (400ms → 250ms) for 10,000+ daily users",
                "Built a self-serve partner platform (Kong, OAuth2, Redis), automating \
                 onboarding from 4 days to 10 minutes and increasing partner acquisition \
                 by 60%",
                "Implemented multi-tier Redis caching (reduced DB load by 70%) and \
                 automated Docker/Kubernetes CI/CD to enable zero-downtime releases",
                "Engineered a fault-tolerant backend translation system supporting 9 \
                 languages and 5,000+ entries/day, delivering 100% uptime and boosting \
                 global engagement by 70%",
                "Integrated Elasticsearch with multilingual/fuzzy search, improving \
                 cross-language matching by 60% and increasing user engagement by 70%",
                "Automated CI/CD (Jenkins, GitHub Actions, Docker, K8s) and configured \
                 AWS/Cloudflare (WAF/CDN) to double release frequency, halve page load \
                 times (3.2s → 1.6s), and maintain 99.9% uptime",
            ]),
            technologies: strings(&[
                "NestJS",
                "Elasticsearch",
                "Redis",
                "JWT/OAuth2",
                "Jenkins",
                "GitHub Actions",
                "AWS",
                "Cloudflare",
                "Docker",
                "Kubernetes",
            ]),
        },
        Experience {
            id: "exp-3".into(),
            company: "AST Consulting".into(),
            position: "Software Developer Intern".into(),
            location: "New Delhi, India".into(),
            start_date: "2023-06".into(),
            end_date: Some("2023-08".into()),
            current: false,
            description: "Led full-stack development for a global SaaS automation \
                          platform serving 5,000+ active users."
                .into(),
            achievements: strings(&[
                "Led full-stack SaaS platform (React, NestJS) for 5,000+ users, deploying \
                 scalable microservices on AWS",
                "Automated CI/CD (GitHub Actions) for AWS EC2, leveraged CloudFront CDN \
                 to cut image loads 50% with 99.5% uptime",
                "Optimized MongoDB queries (–45% latency, 190ms), supporting 1,500+ \
                 concurrent requests",
                "Built unified REST/GraphQL API integrating Stripe/Chargebee billing, \
                 WhatsApp (WATI), and OpenAI automations",
                "Used Google Analytics and Clarity to drive UX and workflow improvements",
                "Developed cross-platform posting (Telegram, WhatsApp), increasing \
                 engagement ~35%",
            ]),
            technologies: strings(&[
                "NestJS",
                "React.js",
                "MongoDB",
                "GitHub Actions",
                "AWS",
                "CloudFront",
                "GraphQL",
                "Stripe",
                "OpenAI",
            ]),
        },
        Experience {
            id: "exp-4".into(),
            company: "Microsoft".into(),
            position: "Mentee at Engage'22".into(),
            location: "Remote".into(),
            start_date: "2022-05".into(),
            end_date: Some("2022-07".into()),
            current: false,
            description: "Built a full-stack movie recommendation system as part of \
                          Microsoft's Engage mentorship program."
                .into(),
            achievements: strings(&[
                "Built a recommendation system using Python to predict movies that users \
                 may be interested in based on their past movie ratings",
                "Obtained the dataset for the project from MovieLens for training the \
                 recommendation algorithm",
                "Programmed an interactive web page using ReactJS to acquire movie \
                 ratings from users and exhibit the recommended movies",
                "Utilized Python as the backend programming language with designated \
                 endpoints for receiving and transmitting requests for getting \
                 recommended movies and submitting movie ratings",
            ]),
            technologies: strings(&[
                "Python",
                "ReactJS",
                "Machine Learning",
                "MovieLens",
                "REST API",
            ]),
        },
    ]
}

fn education() -> Vec<Education> {
    vec![
        Education {
            id: "edu-1".into(),
            institution: "University of Glasgow".into(),
            degree: "M.Sc.".into(),
            field: "Computer Science".into(),
            location: "Glasgow, UK".into(),
            start_date: "2024-09".into(),
            end_date: Some("2025-09".into()),
            current: false,
            description: Some(
                "Pursuing Master's degree in Computer Science with focus on distributed \
                 systems, cloud computing, and machine learning."
                    .into(),
            ),
            achievements: strings(&[
                "Specialized in advanced distributed systems and microservices architecture",
                "Research on ML-based network traffic detection in Open RAN systems",
                "Built ML pipeline on Near-RT RIC with xApps achieving 67-73% accuracy \
                 and F1 up to 76%",
            ]),
        },
        Education {
            id: "edu-2".into(),
            institution: "Manipal University Jaipur".into(),
            degree: "B.Tech.".into(),
            field: "Information Technology".into(),
            location: "Jaipur, India".into(),
            start_date: "2020-06".into(),
            end_date: Some("2024-06".into()),
            current: false,
            description: Some(
                "Bachelor of Technology in Information Technology with focus on software \
                 engineering and distributed systems."
                    .into(),
            ),
            achievements: strings(&[
                "Published research paper on 'A Lossless Image Encryption Technique using \
                 Chaotic Map and DNA Encoding' in Multimedia Tools and Applications \
                 (Apr. 2025)",
                "Developed multiple open-source projects including Linux utilities and \
                 automation tools",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_counts() {
        let data = portfolio();
        assert_eq!(data.experience.len(), 3);
        assert_eq!(data.projects.len(), 6);
        assert_eq!(data.projects.iter().filter(|p| p.featured).count(), 3);
        assert_eq!(data.skills.len(), 26);
        assert_eq!(data.education.len(), 2);
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let data = portfolio();
        let mut ids: Vec<&str> = data.projects.iter().map(|p| p.id.as_str()).collect();
        ids.extend(data.experience.iter().map(|e| e.id.as_str()));
        ids.extend(data.education.iter().map(|e| e.id.as_str()));
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_builtin_round_trips_through_wire_format() {
        let data = portfolio();
        let json = serde_json::to_string(&data).unwrap();
        let parsed: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
    }
}
