//! Portfolio content for the voice agent: the data model, the staged
//! loader, and the plain-text answers served to the language model.

pub mod builtin;
pub mod loader;
pub mod model;
pub mod queries;

pub use loader::PortfolioSource;
pub use model::{Education, Experience, PersonalInfo, Portfolio, Project, Skill, SocialLinks};
pub use queries::PortfolioQueries;
