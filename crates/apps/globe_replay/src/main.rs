use std::env;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use globe::{
    FrameState, GlobeConfig, GlobeSession, InputEvent, RenderLoop, SessionEffect, fetch_news,
};
use news::{ArticleDraft, ArticleTagger, DEFAULT_TAG_THRESHOLD, InMemoryNewsSource};
use scene::highlight::{CursorHint, MarkerVisual};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless news-globe replay and news fixture tools")]
struct Args {
    /// Session config JSON (default: $GLOBE_CONFIG, else built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// News fixture JSON `{ "<table>": [records...] }` (default: $GLOBE_NEWS)
    #[arg(long)]
    news: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an input script and print one JSON line per frame
    Run {
        /// Script: JSON array of input events and `{"frames": n}` steps
        #[arg(long)]
        script: PathBuf,

        /// Frame duration in seconds
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
    },

    /// Print the tags an article text would get
    Tag {
        /// Plain-text article; paragraphs separated by blank lines
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value_t = DEFAULT_TAG_THRESHOLD)]
        threshold: usize,
    },

    /// Tag an article and append it to a table of the news fixture
    Ingest {
        /// Target table (e.g. India_news)
        #[arg(long)]
        table: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        link: String,

        /// Plain-text article; paragraphs separated by blank lines
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value_t = DEFAULT_TAG_THRESHOLD)]
        threshold: usize,
    },
}

/// One step of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ScriptStep {
    Frames { frames: u64 },
    Input(InputEvent),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config_path = args
        .config
        .or_else(|| env::var_os("GLOBE_CONFIG").map(PathBuf::from));
    let news_path = args
        .news
        .or_else(|| env::var_os("GLOBE_NEWS").map(PathBuf::from));

    match args.command {
        Command::Run { script, dt } => {
            let config = load_config(config_path.as_deref()).await?;
            let source = load_fixture(news_path.as_deref()).await?;
            let steps: Vec<ScriptStep> =
                serde_json::from_str(&tokio::fs::read_to_string(&script).await?)?;
            info!(steps = steps.len(), script = %script.display(), "replaying");

            let mut session = GlobeSession::new(config)?;
            for line in replay(&mut session, &source, &steps, dt).await {
                println!("{line}");
            }
        }
        Command::Tag { file, threshold } => {
            let paragraphs = read_paragraphs(&file).await?;
            let tags = ArticleTagger::new().tag_paragraphs(&paragraphs, threshold);
            println!("{}", serde_json::to_string(&tags)?);
        }
        Command::Ingest {
            table,
            title,
            link,
            file,
            threshold,
        } => {
            let Some(news_path) = news_path else {
                return Err("ingest needs --news or GLOBE_NEWS".into());
            };
            let source = load_fixture(Some(&news_path)).await?;
            let draft = ArticleDraft {
                title,
                link,
                paragraphs: read_paragraphs(&file).await?,
            };
            let record = draft.into_record(&ArticleTagger::new(), threshold);
            println!("{}", serde_json::to_string(&record.tags)?);
            source.insert(&table, record)?;
            tokio::fs::write(&news_path, source.to_json_string()?).await?;
            info!(
                table = table.as_str(),
                rows = source.row_count(&table),
                "article ingested"
            );
        }
    }

    Ok(())
}

async fn load_config(path: Option<&Path>) -> Result<GlobeConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(GlobeConfig::from_json_str(
            &tokio::fs::read_to_string(path).await?,
        )?),
        None => Ok(GlobeConfig::default()),
    }
}

/// A missing fixture file is an empty store.
async fn load_fixture(
    path: Option<&Path>,
) -> Result<InMemoryNewsSource, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(InMemoryNewsSource::new());
    };
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(InMemoryNewsSource::from_json_str(&text)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "news fixture not found, starting empty");
            Ok(InMemoryNewsSource::new())
        }
        Err(err) => Err(err.into()),
    }
}

async fn read_paragraphs(path: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    Ok(split_paragraphs(&tokio::fs::read_to_string(path).await?))
}

fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Run a script against a session. News loads are resolved as soon as they
/// are requested. Returns one JSON line per frame plus a closing summary.
async fn replay(
    session: &mut GlobeSession,
    source: &InMemoryNewsSource,
    steps: &[ScriptStep],
    dt: f64,
) -> Vec<String> {
    let mut render = RenderLoop::new();
    let mut lines = Vec::new();

    for step in steps {
        match step {
            ScriptStep::Input(event) => {
                for effect in session.handle_input(*event) {
                    let SessionEffect::LoadNews(request) = effect;
                    let response = fetch_news(source, &request).await;
                    session.apply_news(response);
                }
            }
            ScriptStep::Frames { frames } => {
                for _ in 0..*frames {
                    let mut drawn = None;
                    let mut sink = |state: &FrameState| drawn = Some(frame_line(state));
                    render.run_frame(session, &mut sink, dt);
                    lines.extend(drawn.map(|line| line.to_string()));
                }
            }
        }
    }

    let events: Vec<serde_json::Value> = session
        .events()
        .map(|e| json!({ "frame": e.frame_index, "event": e.event }))
        .collect();
    lines.push(
        json!({
            "panel": session.panel(),
            "article": session.article(),
            "events": events,
        })
        .to_string(),
    );
    lines
}

fn frame_line(state: &FrameState) -> serde_json::Value {
    let highlighted: Vec<u32> = state
        .markers
        .iter()
        .filter(|m| m.visual == MarkerVisual::Highlighted)
        .map(|m| m.id.0)
        .collect();
    json!({
        "frame": state.frame.index,
        "eye": state.pose.eye.as_array(),
        "look_at": state.pose.look_at.as_array(),
        "cursor": match state.cursor {
            CursorHint::Grab => "grab",
            CursorHint::Pointer => "pointer",
        },
        "highlighted": highlighted,
    })
}

#[cfg(test)]
mod tests {
    use super::{ScriptStep, replay, split_paragraphs};
    use globe::{GlobeConfig, GlobeSession, InputEvent};
    use news::{InMemoryNewsSource, RawNewsRecord};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn script_steps_decode() {
        let steps: Vec<ScriptStep> = serde_json::from_str(
            r#"[{"frames": 2}, {"type": "pointer_move", "x": 3.0, "y": 4.0}, {"type": "close_panel"}]"#,
        )
        .expect("script");
        assert_eq!(
            steps,
            vec![
                ScriptStep::Frames { frames: 2 },
                ScriptStep::Input(InputEvent::PointerMove { x: 3.0, y: 4.0 }),
                ScriptStep::Input(InputEvent::ClosePanel),
            ]
        );
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let text = "First line\nwraps here.\n\n\n  Second.  \n\n";
        assert_eq!(
            split_paragraphs(text),
            vec!["First line wraps here.", "Second."]
        );
    }

    #[tokio::test]
    async fn replay_clicks_and_loads_news() {
        let source = InMemoryNewsSource::new();
        source
            .insert(
                "Atlantis_news",
                RawNewsRecord {
                    headline: json!("{\"title\": \"Harbour reopens\"}"),
                    ..RawNewsRecord::default()
                },
            )
            .expect("insert");
        let config = GlobeConfig::from_json_str(
            r#"{"countries": [{"name": "Atlantis", "lat": 0.0, "lon": -90.0, "table": "Atlantis_news"}]}"#,
        )
        .expect("config");
        let mut session = GlobeSession::new(config).expect("session");

        // Atlantis sits at the center of the default 1280x720 canvas.
        let steps = vec![
            ScriptStep::Input(InputEvent::PointerDown { x: 640.0, y: 360.0 }),
            ScriptStep::Input(InputEvent::PointerUp { x: 640.0, y: 360.0 }),
            ScriptStep::Frames { frames: 3 },
        ];
        let lines = replay(&mut session, &source, &steps, 1.0 / 60.0).await;
        assert_eq!(lines.len(), 4);

        let first: Value = serde_json::from_str(&lines[0]).expect("frame line");
        assert_eq!(first["frame"], json!(0));
        assert_eq!(first["cursor"], json!("pointer"));
        assert_eq!(first["highlighted"], json!([0]));

        let summary: Value = serde_json::from_str(&lines[3]).expect("summary");
        assert_eq!(summary["panel"]["panel"], json!("open"));
        assert_eq!(summary["panel"]["country"], json!("Atlantis"));
        assert_eq!(summary["panel"]["content"]["state"], json!("items"));
        assert_eq!(
            summary["panel"]["content"]["value"][0]["text"],
            json!("Harbour reopens")
        );
    }
}
