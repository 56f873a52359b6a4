use news::{NO_NEWS_MESSAGE, NewsError, NewsItem};
use serde::Serialize;
use tracing::{debug, warn};

/// Modal body when an article has no stored text.
pub const NO_CONTENT_MESSAGE: &str = "No content available.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum PanelContent {
    Loading,
    Items(Vec<NewsItem>),
    Empty,
    Failed(String),
}

impl PanelContent {
    /// Inline status text, if the panel shows one instead of a list.
    pub fn message(&self) -> Option<&str> {
        match self {
            PanelContent::Loading => Some("Loading news..."),
            PanelContent::Items(_) => None,
            PanelContent::Empty => Some(NO_NEWS_MESSAGE),
            PanelContent::Failed(msg) => Some(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Closed,
    Open {
        country: String,
        content: PanelContent,
    },
}

/// Article modal contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleView {
    pub headline: String,
    pub content: String,
    pub link: Option<String>,
}

impl ArticleView {
    fn from_item(item: &NewsItem) -> Self {
        Self {
            headline: item.text.clone(),
            content: item
                .content
                .clone()
                .unwrap_or_else(|| NO_CONTENT_MESSAGE.to_string()),
            link: item.url.clone(),
        }
    }
}

/// A news load the host must run against its `NewsSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsRequest {
    pub seq: u64,
    pub country: String,
    pub table: String,
    pub limit: usize,
}

/// Outcome of a [`NewsRequest`], fed back through
/// [`crate::session::GlobeSession::apply_news`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsResponse {
    pub seq: u64,
    pub result: Result<Vec<NewsItem>, NewsError>,
}

/// Run a request against a source.
pub async fn fetch_news(source: &dyn news::NewsSource, request: &NewsRequest) -> NewsResponse {
    NewsResponse {
        seq: request.seq,
        result: news::load_news(source, &request.table, request.limit).await,
    }
}

/// Side panel plus article modal.
///
/// Every selection or close bumps `seq`; responses carrying an older number
/// are discarded, so the panel always shows the latest selection.
#[derive(Debug, Clone, Default)]
pub struct PanelController {
    state: PanelState,
    article: Option<ArticleView>,
    seq: u64,
}

impl PanelController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn article(&self) -> Option<&ArticleView> {
        self.article.as_ref()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open { .. })
    }

    /// Open the panel for `country`. With a table the panel shows `Loading`
    /// and a request is returned; without one it shows `Empty` straight away.
    pub fn select(
        &mut self,
        country: &str,
        table: Result<&str, NewsError>,
        limit: usize,
    ) -> Option<NewsRequest> {
        self.seq += 1;
        self.article = None;
        match table {
            Ok(table) => {
                self.state = PanelState::Open {
                    country: country.to_string(),
                    content: PanelContent::Loading,
                };
                Some(NewsRequest {
                    seq: self.seq,
                    country: country.to_string(),
                    table: table.to_string(),
                    limit,
                })
            }
            Err(err) => {
                warn!(country, error = %err, "no news table for selection");
                self.state = PanelState::Open {
                    country: country.to_string(),
                    content: PanelContent::Empty,
                };
                None
            }
        }
    }

    /// Apply a load result. Returns `false` if it was stale and dropped.
    pub fn accept(&mut self, response: NewsResponse) -> bool {
        if response.seq != self.seq {
            debug!(seq = response.seq, current = self.seq, "stale news response dropped");
            return false;
        }
        let PanelState::Open { content, country } = &mut self.state else {
            return false;
        };
        *content = match response.result {
            Ok(items) if items.is_empty() => PanelContent::Empty,
            Ok(items) => PanelContent::Items(items),
            Err(err) => {
                warn!(country = country.as_str(), error = %err, "news load failed");
                PanelContent::Failed(err.user_message().to_string())
            }
        };
        true
    }

    pub fn close(&mut self) {
        self.seq += 1;
        self.state = PanelState::Closed;
        self.article = None;
    }

    /// Open the modal for the `index`-th listed item.
    pub fn open_article(&mut self, index: usize) -> Option<&ArticleView> {
        let PanelState::Open {
            content: PanelContent::Items(items),
            ..
        } = &self.state
        else {
            return None;
        };
        let item = items.get(index)?;
        self.article = Some(ArticleView::from_item(item));
        self.article.as_ref()
    }

    pub fn close_article(&mut self) {
        self.article = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{NO_CONTENT_MESSAGE, NewsResponse, PanelContent, PanelController, PanelState};
    use news::{NO_NEWS_MESSAGE, NewsError, NewsItem, QUERY_FAILED_MESSAGE};
    use pretty_assertions::assert_eq;

    fn item(text: &str, content: Option<&str>) -> NewsItem {
        NewsItem {
            text: text.to_string(),
            url: Some(format!("https://example.com/{text}")),
            tags: vec!["Other".to_string()],
            content: content.map(str::to_string),
            created_at: None,
        }
    }

    fn content(panel: &PanelController) -> Option<&PanelContent> {
        match panel.state() {
            PanelState::Open { content, .. } => Some(content),
            PanelState::Closed => None,
        }
    }

    #[test]
    fn select_then_accept_shows_items() {
        let mut panel = PanelController::new();
        let request = panel.select("India", Ok("India_news"), 10).expect("request");
        assert_eq!(request.table, "India_news");
        assert_eq!(content(&panel), Some(&PanelContent::Loading));

        assert!(panel.accept(NewsResponse {
            seq: request.seq,
            result: Ok(vec![item("a", None)]),
        }));
        assert_eq!(
            content(&panel),
            Some(&PanelContent::Items(vec![item("a", None)]))
        );
    }

    #[test]
    fn newer_selection_wins_over_late_response() {
        let mut panel = PanelController::new();
        let first = panel.select("India", Ok("India_news"), 10).expect("first");
        let second = panel.select("USA", Ok("USA_news"), 10).expect("second");

        assert!(!panel.accept(NewsResponse {
            seq: first.seq,
            result: Ok(vec![item("india", None)]),
        }));
        assert_eq!(content(&panel), Some(&PanelContent::Loading));

        assert!(panel.accept(NewsResponse {
            seq: second.seq,
            result: Ok(vec![item("usa", None)]),
        }));
        match panel.state() {
            PanelState::Open { country, .. } => assert_eq!(country, "USA"),
            PanelState::Closed => panic!("panel closed"),
        }
    }

    #[test]
    fn close_invalidates_in_flight_loads() {
        let mut panel = PanelController::new();
        let request = panel.select("China", Ok("China_news"), 10).expect("request");
        panel.close();
        assert!(!panel.accept(NewsResponse {
            seq: request.seq,
            result: Ok(vec![item("late", None)]),
        }));
        assert_eq!(panel.state(), &PanelState::Closed);
    }

    #[test]
    fn missing_table_and_failures_render_inline_messages() {
        let mut panel = PanelController::new();
        let missing = panel.select(
            "Atlantis",
            Err(NewsError::NoSource {
                country: "Atlantis".to_string(),
            }),
            10,
        );
        assert!(missing.is_none());
        assert_eq!(
            content(&panel).and_then(PanelContent::message),
            Some(NO_NEWS_MESSAGE)
        );

        let request = panel.select("USA", Ok("USA_news"), 10).expect("request");
        panel.accept(NewsResponse {
            seq: request.seq,
            result: Err(NewsError::Query("timeout".to_string())),
        });
        assert_eq!(
            content(&panel),
            Some(&PanelContent::Failed(QUERY_FAILED_MESSAGE.to_string()))
        );

        let request = panel.select("USA", Ok("USA_news"), 10).expect("request");
        panel.accept(NewsResponse {
            seq: request.seq,
            result: Ok(Vec::new()),
        });
        assert_eq!(content(&panel), Some(&PanelContent::Empty));
    }

    #[test]
    fn article_modal_opens_listed_items_only() {
        let mut panel = PanelController::new();
        assert!(panel.open_article(0).is_none());

        let request = panel.select("India", Ok("India_news"), 10).expect("request");
        panel.accept(NewsResponse {
            seq: request.seq,
            result: Ok(vec![item("a", Some("Body.")), item("b", None)]),
        });

        let view = panel.open_article(1).expect("article").clone();
        assert_eq!(view.headline, "b");
        assert_eq!(view.content, NO_CONTENT_MESSAGE);
        assert_eq!(view.link.as_deref(), Some("https://example.com/b"));
        assert!(panel.open_article(2).is_none());

        panel.close_article();
        assert!(panel.article().is_none());

        panel.open_article(0);
        panel.close();
        assert!(panel.article().is_none());
    }
}
