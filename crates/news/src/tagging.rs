//! Keyword tagging for scraped articles.
//!
//! Each category scores the number of case-insensitive whole-word keyword
//! occurrences in the article text. Categories scoring at least the
//! threshold become tags, in category order; an article matching nothing is
//! tagged `Other`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::record::RawNewsRecord;

pub const DEFAULT_TAG_THRESHOLD: usize = 2;
pub const FALLBACK_TAG: &str = "Other";

const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Political",
        &[
            "president",
            "congress",
            "senate",
            "election",
            "vote",
            "campaign",
            "democrat",
            "republican",
            "legislation",
            "policy",
            "government",
            "white house",
            "capitol",
            "politician",
            "governor",
            "mayor",
            "political",
            "parliament",
            "bill",
            "law",
            "regulation",
        ],
    ),
    (
        "Sports",
        &[
            "game",
            "team",
            "player",
            "coach",
            "score",
            "win",
            "loss",
            "championship",
            "tournament",
            "league",
            "nfl",
            "nba",
            "mlb",
            "nhl",
            "soccer",
            "football",
            "basketball",
            "baseball",
            "athlete",
            "stadium",
            "match",
            "playoff",
            "season",
        ],
    ),
    (
        "Global/International",
        &[
            "international",
            "foreign",
            "country",
            "nation",
            "global",
            "world",
            "embassy",
            "diplomat",
            "treaty",
            "united nations",
            "border",
            "immigrant",
            "refugee",
            "war",
            "conflict",
            "overseas",
            "abroad",
            "china",
            "russia",
            "europe",
            "asia",
            "africa",
        ],
    ),
    (
        "Weather",
        &[
            "weather",
            "storm",
            "hurricane",
            "tornado",
            "flood",
            "rain",
            "snow",
            "temperature",
            "forecast",
            "climate",
            "wind",
            "drought",
            "thunderstorm",
            "blizzard",
            "heatwave",
            "cold front",
            "warning",
            "meteorologist",
            "precipitation",
            "degrees",
        ],
    ),
    (
        "Science & Tech",
        &[
            "technology",
            "science",
            "research",
            "study",
            "scientist",
            "innovation",
            "discovery",
            "experiment",
            "ai",
            "artificial intelligence",
            "computer",
            "software",
            "app",
            "startup",
            "tech",
            "digital",
            "internet",
            "cyber",
            "data",
            "algorithm",
            "space",
            "nasa",
        ],
    ),
    (
        "Health",
        &[
            "health",
            "medical",
            "doctor",
            "hospital",
            "patient",
            "disease",
            "virus",
            "vaccine",
            "medicine",
            "treatment",
            "cdc",
            "fda",
            "pandemic",
            "epidemic",
            "symptom",
            "diagnosis",
            "healthcare",
            "mental health",
            "therapy",
            "drug",
            "prescription",
        ],
    ),
    (
        "Business/Economy",
        &[
            "business",
            "economy",
            "market",
            "stock",
            "company",
            "ceo",
            "profit",
            "revenue",
            "financial",
            "investment",
            "trade",
            "industry",
            "corporation",
            "banking",
            "wall street",
            "dollar",
            "economic",
            "employment",
            "job",
            "unemployment",
            "recession",
        ],
    ),
    (
        "Crime",
        &[
            "police",
            "arrest",
            "crime",
            "criminal",
            "investigation",
            "suspect",
            "victim",
            "murder",
            "robbery",
            "theft",
            "assault",
            "detective",
            "trial",
            "court",
            "lawsuit",
            "prison",
            "jail",
            "officer",
            "shooting",
            "violence",
            "fbi",
            "charged",
        ],
    ),
    (
        "Education",
        &[
            "school",
            "student",
            "teacher",
            "education",
            "university",
            "college",
            "classroom",
            "learning",
            "degree",
            "academic",
            "campus",
            "tuition",
            "graduation",
            "professor",
            "curriculum",
            "test",
            "exam",
            "study",
            "scholarship",
        ],
    ),
    (
        "Entertainment",
        &[
            "movie",
            "film",
            "actor",
            "actress",
            "music",
            "concert",
            "celebrity",
            "hollywood",
            "entertainment",
            "show",
            "series",
            "album",
            "song",
            "artist",
            "performance",
            "award",
            "netflix",
            "streaming",
            "tv",
            "television",
            "theater",
        ],
    ),
    (
        "Environment",
        &[
            "environment",
            "climate change",
            "pollution",
            "wildlife",
            "endangered",
            "conservation",
            "ecosystem",
            "sustainability",
            "carbon",
            "emissions",
            "renewable",
            "fossil fuel",
            "recycling",
            "deforestation",
            "ocean",
            "species",
            "habitat",
            "green energy",
        ],
    ),
    (
        "Disaster",
        &[
            "fire",
            "wildfire",
            "earthquake",
            "disaster",
            "emergency",
            "evacuation",
            "rescue",
            "damage",
            "destruction",
            "casualties",
            "explosion",
            "crash",
            "accident",
            "collapsed",
            "victims",
        ],
    ),
];

#[derive(Debug, Clone)]
struct Category {
    tag: String,
    patterns: Vec<Regex>,
}

#[derive(Debug, Clone)]
pub struct ArticleTagger {
    categories: Vec<Category>,
}

impl Default for ArticleTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleTagger {
    /// Tagger with the built-in twelve categories.
    pub fn new() -> Self {
        Self::from_categories(
            CATEGORIES
                .iter()
                .map(|(tag, kws)| {
                    let keywords = kws.iter().map(|k| k.to_string()).collect::<Vec<_>>();
                    (tag.to_string(), keywords)
                }),
        )
    }

    /// Tagger with custom categories, kept in the given order.
    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let categories = categories
            .into_iter()
            .map(|(tag, keywords)| Category {
                tag,
                // Escaped literals always compile; nothing is dropped in practice.
                patterns: keywords
                    .iter()
                    .filter_map(|kw| {
                        Regex::new(&format!(r"\b{}\b", regex::escape(&kw.to_lowercase()))).ok()
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    /// Per-category keyword hit counts, in category order.
    pub fn scores(&self, text: &str) -> Vec<(&str, usize)> {
        let text = text.to_lowercase();
        self.categories
            .iter()
            .map(|c| {
                let score = c.patterns.iter().map(|p| p.find_iter(&text).count()).sum::<usize>();
                (c.tag.as_str(), score)
            })
            .collect()
    }

    pub fn tag(&self, text: &str, threshold: usize) -> Vec<String> {
        let tags: Vec<String> = self
            .scores(text)
            .into_iter()
            .filter(|(_, score)| *score >= threshold)
            .map(|(tag, _)| tag.to_string())
            .collect();
        if tags.is_empty() {
            vec![FALLBACK_TAG.to_string()]
        } else {
            tags
        }
    }

    /// Tags for an article given as paragraphs (joined with spaces).
    pub fn tag_paragraphs<S: AsRef<str>>(&self, paragraphs: &[S], threshold: usize) -> Vec<String> {
        let text = paragraphs
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        self.tag(&text, threshold)
    }
}

/// A scraped article before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub link: String,
    pub paragraphs: Vec<String>,
}

impl ArticleDraft {
    /// Stored row shape: headline and link as JSON-encoded objects, content
    /// as paragraphs separated by blank lines.
    pub fn into_record(self, tagger: &ArticleTagger, threshold: usize) -> RawNewsRecord {
        let tags = tagger.tag_paragraphs(&self.paragraphs, threshold);
        RawNewsRecord {
            id: None,
            headline: json!(json!({ "title": self.title }).to_string()),
            link: json!(json!({ "url": self.link }).to_string()),
            tags: json!(tags),
            content: json!(self.paragraphs.join("\n\n")),
            created_at: None,
        }
    }
}
