use serde::{Deserialize, Serialize};

// --- SerpApi (serpapi.com) ---

/// Query parameters for the SerpApi Google engine.
#[derive(Debug, Clone, Serialize)]
pub struct SerpApiParams<'a> {
    pub engine: &'a str,
    pub q: &'a str,
    pub api_key: &'a str,
    pub device: &'a str,
    pub gl: &'a str,
    pub hl: &'a str,
    pub location: &'a str,
}

impl<'a> SerpApiParams<'a> {
    /// US desktop Google search, the locale keyword research targets.
    pub fn google_us(q: &'a str, api_key: &'a str) -> Self {
        Self {
            engine: "google",
            q,
            api_key,
            device: "desktop",
            gl: "us",
            hl: "en",
            location: "United States",
        }
    }
}

/// The subset of a SerpApi response that carries keyword phrases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerpApiResponse {
    #[serde(default)]
    pub related_searches: Vec<RelatedSearch>,
    #[serde(default)]
    pub related_questions: Vec<RelatedQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedSearch {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedQuestion {
    #[serde(default)]
    pub question: String,
}

impl SerpApiResponse {
    /// Related searches followed by "people also ask" questions, blanks dropped.
    pub fn keyword_phrases(self) -> Vec<String> {
        let searches = self.related_searches.into_iter().map(|r| r.query);
        let questions = self.related_questions.into_iter().map(|q| q.question);
        non_blank(searches.chain(questions))
    }
}

// --- Serper (google.serper.dev) ---

/// JSON body for a Serper search.
#[derive(Debug, Clone, Serialize)]
pub struct SerperRequest<'a> {
    pub q: &'a str,
    pub gl: &'a str,
    pub hl: &'a str,
}

impl<'a> SerperRequest<'a> {
    pub fn us_english(q: &'a str) -> Self {
        Self { q, gl: "us", hl: "en" }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerperResponse {
    #[serde(default, rename = "relatedSearches")]
    pub related_searches: Vec<RelatedSearch>,
    #[serde(default, rename = "peopleAlsoAsk")]
    pub people_also_ask: Vec<PeopleAlsoAsk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeopleAlsoAsk {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl SerperResponse {
    /// Related searches followed by "people also ask" questions, blanks dropped.
    pub fn keyword_phrases(self) -> Vec<String> {
        let searches = self.related_searches.into_iter().map(|r| r.query);
        let questions = self.people_also_ask.into_iter().map(|q| q.question);
        non_blank(searches.chain(questions))
    }
}

fn non_blank(phrases: impl Iterator<Item = String>) -> Vec<String> {
    phrases
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
