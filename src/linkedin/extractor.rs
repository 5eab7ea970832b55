// src/linkedin/extractor.rs
use anyhow::Result;
use rand::Rng;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::types::{ConnectionDegree, EmployeeCard};

/// Where the profile link of a card lives.
#[derive(Debug, Clone, Copy)]
pub enum LinkSource {
    /// Anchor inside the card matched by a selector.
    Selector(&'static str),
    /// First `a[href]` under the card's parent element.
    ParentAnchor,
}

#[derive(Debug, Clone, Copy)]
pub enum MutualSource {
    /// Insight line such as "12 mutual connections".
    Insight(&'static str),
    /// No usable markup; draw a count uniformly from `0..=max`.
    Simulated { max: u32 },
}

#[derive(Debug, Clone, Copy)]
pub enum DegreeSource {
    /// Distance label, then a badge that mentions 1st/2nd/3rd.
    Badges {
        distance: &'static str,
        badge: &'static str,
    },
    /// First span whose text looks like an ordinal ("2nd", "3rd", "4th").
    OrdinalSpan,
}

/// Selector configuration for one flavour of search result markup.
#[derive(Debug, Clone, Copy)]
pub struct CardSelectors {
    pub container: &'static str,
    pub name: &'static str,
    pub link: LinkSource,
    pub title: &'static str,
    pub location: &'static str,
    pub mutual: MutualSource,
    pub degree: DegreeSource,
    pub name_fallback: &'static str,
    pub degree_fallback: &'static str,
    pub profile_url_fallback: Option<&'static str>,
}

impl CardSelectors {
    pub const COMPANY_FACET: Self = Self {
        container: "li.reusable-search__result-container",
        name: ".entity-result__title-text a span[aria-hidden=\"true\"]",
        link: LinkSource::Selector(".entity-result__title-text a"),
        title: ".entity-result__primary-subtitle",
        location: ".entity-result__secondary-subtitle",
        mutual: MutualSource::Insight(".entity-result__insight"),
        degree: DegreeSource::Badges {
            distance: ".dist-value",
            badge: ".entity-result__badge-text",
        },
        name_fallback: "Unknown",
        degree_fallback: "3rd+",
        profile_url_fallback: None,
    };

    pub const KEYWORDS: Self = Self {
        container: "div.entity-result__content",
        name: "span[aria-hidden=\"true\"]",
        link: LinkSource::ParentAnchor,
        title: "div.entity-result__primary-subtitle",
        location: "div.entity-result__secondary-subtitle",
        mutual: MutualSource::Simulated { max: 25 },
        degree: DegreeSource::OrdinalSpan,
        name_fallback: "LinkedIn User",
        degree_fallback: "3rd",
        profile_url_fallback: Some("#"),
    };
}

enum CompiledLink {
    Selector(Selector),
    ParentAnchor(Selector),
}

enum CompiledMutual {
    Insight { selector: Selector, pattern: Regex },
    Simulated { max: u32 },
}

enum CompiledDegree {
    Badges { distance: Selector, badge: Selector },
    OrdinalSpan { spans: Selector, pattern: Regex },
}

/// Pulls employee cards out of a search results page.
pub struct CardExtractor {
    container: Selector,
    name: Selector,
    link: CompiledLink,
    title: Selector,
    location: Selector,
    mutual: CompiledMutual,
    degree: CompiledDegree,
    name_fallback: &'static str,
    degree_fallback: &'static str,
    profile_url_fallback: Option<&'static str>,
}

impl CardExtractor {
    pub fn new(selectors: &CardSelectors) -> Result<Self> {
        let link = match selectors.link {
            LinkSource::Selector(s) => CompiledLink::Selector(parse_selector(s)?),
            LinkSource::ParentAnchor => CompiledLink::ParentAnchor(parse_selector("a[href]")?),
        };

        let mutual = match selectors.mutual {
            MutualSource::Insight(s) => CompiledMutual::Insight {
                selector: parse_selector(s)?,
                pattern: Regex::new(r"(?i)(\d+)\s+mutual\s+connection")?,
            },
            MutualSource::Simulated { max } => CompiledMutual::Simulated { max },
        };

        let degree = match selectors.degree {
            DegreeSource::Badges { distance, badge } => CompiledDegree::Badges {
                distance: parse_selector(distance)?,
                badge: parse_selector(badge)?,
            },
            DegreeSource::OrdinalSpan => CompiledDegree::OrdinalSpan {
                spans: parse_selector("span")?,
                pattern: Regex::new(r"^\d+(st|nd|rd|th)\+?$")?,
            },
        };

        Ok(Self {
            container: parse_selector(selectors.container)?,
            name: parse_selector(selectors.name)?,
            link,
            title: parse_selector(selectors.title)?,
            location: parse_selector(selectors.location)?,
            mutual,
            degree,
            name_fallback: selectors.name_fallback,
            degree_fallback: selectors.degree_fallback,
            profile_url_fallback: selectors.profile_url_fallback,
        })
    }

    /// Extract every card on a page, in document order.
    pub fn parse_page(&self, html: &str, company: &str) -> Vec<EmployeeCard> {
        let document = Html::parse_document(html);
        document
            .select(&self.container)
            .map(|card| self.extract_card(card, company))
            .collect()
    }

    /// Extract one card. Each field falls back independently when its markup is missing.
    pub fn extract_card(&self, card: ElementRef<'_>, company: &str) -> EmployeeCard {
        let name = first_text(card, &self.name).unwrap_or_else(|| {
            debug!("Card without name, using fallback");
            self.name_fallback.to_string()
        });

        let title_company =
            first_text(card, &self.title).unwrap_or_else(|| format!("Professional at {}", company));

        let location =
            first_text(card, &self.location).unwrap_or_else(|| "Unknown Location".to_string());

        let profile_url = self
            .profile_url(card)
            .or_else(|| self.profile_url_fallback.map(str::to_string));

        EmployeeCard {
            name,
            title_company,
            location,
            profile_url,
            mutual_connections: self.mutual_connections(card),
            connection_degree: self.connection_degree(card),
        }
    }

    fn profile_url(&self, card: ElementRef<'_>) -> Option<String> {
        let anchor = match &self.link {
            CompiledLink::Selector(selector) => card.select(selector).next(),
            CompiledLink::ParentAnchor(selector) => {
                let scope = card.parent().and_then(ElementRef::wrap).unwrap_or(card);
                scope.select(selector).next()
            }
        }?;

        anchor
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string)
    }

    fn mutual_connections(&self, card: ElementRef<'_>) -> u32 {
        match &self.mutual {
            CompiledMutual::Insight { selector, pattern } => first_text(card, selector)
                .and_then(|text| {
                    pattern
                        .captures(&text)
                        .and_then(|caps| caps.get(1))
                        .and_then(|count| count.as_str().parse().ok())
                })
                .unwrap_or(0),
            CompiledMutual::Simulated { max } => rand::thread_rng().gen_range(0..=*max),
        }
    }

    fn connection_degree(&self, card: ElementRef<'_>) -> ConnectionDegree {
        let label = match &self.degree {
            CompiledDegree::Badges { distance, badge } => first_text(card, distance).or_else(|| {
                first_text(card, badge).filter(|text| ConnectionDegree::parse(text).is_known())
            }),
            CompiledDegree::OrdinalSpan { spans, pattern } => card
                .select(spans)
                .map(element_text)
                .find(|text| pattern.is_match(text)),
        };

        ConnectionDegree::parse(label.as_deref().unwrap_or(self.degree_fallback))
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("Invalid selector '{}': {:?}", selector, e))
}

fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
