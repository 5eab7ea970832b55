// src/linkedin/profile.rs
use scraper::{ElementRef, Html, Selector};

use super::extractor::clean_text;
use super::types::CurrentPosition;

pub const OWN_PROFILE_PATH: &str = "/in/me/";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Read the first entry of the experience section of a profile page.
pub fn extract_current_position(html: &str) -> CurrentPosition {
    let document = Html::parse_document(html);

    let experience = ["section[data-section=\"experience\"]", "div#experience"]
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| document.select(&selector).next());

    let Some(experience) = experience else {
        return CurrentPosition::default();
    };

    let first_job = Selector::parse("li.artdeco-list__item")
        .ok()
        .and_then(|selector| experience.select(&selector).next());

    let Some(first_job) = first_job else {
        return CurrentPosition::default();
    };

    CurrentPosition {
        title: text_of(first_job, ".mr1.t-bold span[aria-hidden=\"true\"]"),
        company: text_of(first_job, ".t-14.t-normal span[aria-hidden=\"true\"]"),
    }
}

fn text_of(element: ElementRef<'_>, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    element
        .select(&selector)
        .next()
        .map(|e| clean_text(&e.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}
