// src/linkedin/mod.rs
pub mod extractor;
pub mod fetcher;
pub mod presenter;
pub mod profile;
pub mod scoring;
pub mod scraper;
pub mod session;
pub mod types;

pub use fetcher::{LinkedInClient, PageFetch, PageSource, Pacing, ResultFetcher, SearchQuery};
pub use presenter::{mask_name, render_mockup};
pub use scoring::{prioritize, StrengthFormula};
pub use scraper::{ConnectionScraper, SearchVariant};
pub use session::SessionBuilder;
pub use types::{Capabilities, ConnectionDegree, Employee, EmployeeCard, SearchResults};
