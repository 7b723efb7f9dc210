use anyhow::{Context, Result};
use clap::Parser;
use kjvsearch::{RankOrder, SearchOptions, Verse, VerseIndex};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Search the King James Bible for verses containing the given words", long_about = None)]
struct Cli {
    /// Query words
    words: Vec<String>,
    /// Corpus file, one `text|book|chapter|verse` record per line
    #[arg(long, default_value = "data/kjv.dat")]
    corpus: String,
    /// Maximum number of verses to print
    #[arg(long, default_value_t = 10)]
    max: usize,
    /// Keep the highest-scoring verses instead of the lowest
    #[arg(long, default_value_t = false)]
    best_first: bool,
    /// Print one JSON object per line
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Prefix each verse with its combined score
    #[arg(long, default_value_t = false)]
    scores: bool,
}

#[derive(Serialize)]
struct Hit<'a> {
    book: &'a str,
    chapter: u32,
    verse: u32,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    fmt().with_env_filter(log_filter(directives.as_deref())).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let index = VerseIndex::from_path(&cli.corpus).with_context(|| format!("loading corpus {}", cli.corpus))?;
    let order = if cli.best_first { RankOrder::HighestFirst } else { RankOrder::LowestFirst };
    let opts = SearchOptions::new(cli.max).order(order);

    let hits: Vec<(Verse, f64)> = index
        .rank(cli.words.as_slice(), &opts)
        .into_iter()
        .filter_map(|hit| index.verse(&hit.location).map(|v| (v, hit.score)))
        .collect();
    tracing::debug!(words = ?cli.words, hits = hits.len(), "query complete");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (verse, score) in &hits {
        let score = cli.scores.then_some(*score);
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(&to_hit(verse, score))?)?;
        } else {
            writeln!(out, "{}", format_line(verse, score))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Skipped corpus lines are reported unless `RUST_LOG` says otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::new(directives.unwrap_or("warn"))
}

fn to_hit(verse: &Verse, score: Option<f64>) -> Hit<'_> {
    Hit { book: &verse.book, chapter: verse.chapter, verse: verse.verse, text: verse.display_text(), score }
}

fn format_line(verse: &Verse, score: Option<f64>) -> String {
    let line = format!("{} {}:{} {}", verse.book, verse.chapter, verse.verse, verse.display_text());
    match score {
        Some(s) => format!("{s:.6} {line}"),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse() -> Verse {
        Verse { book: "John".into(), chapter: 11, verse: 35, text: "Jesus~wept.".into() }
    }

    #[test]
    fn formats_plain_line() {
        assert_eq!(format_line(&verse(), None), "John 11:35 Jesus wept.");
        assert_eq!(format_line(&verse(), Some(0.5)), "0.500000 John 11:35 Jesus wept.");
    }

    #[test]
    fn serializes_hit_without_score() {
        let v = verse();
        let json = serde_json::to_value(to_hit(&v, None)).unwrap();
        assert_eq!(json["text"], "Jesus wept.");
        assert_eq!(json["chapter"], 11);
        assert!(json.get("score").is_none());
    }

    #[test]
    fn warnings_are_logged_by_default() {
        assert_eq!(log_filter(None).to_string(), "warn");
        assert_eq!(log_filter(Some("kjvsearch=debug")).to_string(), "kjvsearch=debug");
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from(["search", "--max", "3", "--best-first", "light", "darkness"]);
        assert_eq!(cli.words, vec!["light", "darkness"]);
        assert_eq!(cli.max, 3);
        assert!(cli.best_first);
        assert_eq!(cli.corpus, "data/kjv.dat");
    }
}
