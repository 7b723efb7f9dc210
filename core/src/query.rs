use crate::index::{Location, Verse, VerseIndex};
use crate::tokenizer::normalize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Which end of the ranked candidates a query keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankOrder {
    /// Ascending combined score; the lowest-scoring candidates are kept.
    #[default]
    LowestFirst,
    /// Descending combined score; the highest-scoring candidates are kept.
    HighestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_results: usize,
    pub order: RankOrder,
}

impl SearchOptions {
    pub fn new(max_results: usize) -> Self {
        Self { max_results, order: RankOrder::default() }
    }

    pub fn order(mut self, order: RankOrder) -> Self {
        self.order = order;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLocation {
    pub location: Location,
    /// Product of the normalized scores of every query word posted here.
    pub score: f64,
}

impl VerseIndex {
    /// Top `max_results` verses for `words`, lowest combined score first.
    pub fn search<S: AsRef<str>>(&self, words: &[S], max_results: usize) -> Vec<Verse> {
        self.search_with(words, &SearchOptions::new(max_results))
    }

    pub fn search_with<S: AsRef<str>>(&self, words: &[S], opts: &SearchOptions) -> Vec<Verse> {
        self.rank(words, opts)
            .into_iter()
            .filter_map(|hit| self.verse(&hit.location))
            .collect()
    }

    /// Sorted and truncated candidates. Ties are broken by location.
    pub fn rank<S: AsRef<str>>(&self, words: &[S], opts: &SearchOptions) -> Vec<ScoredLocation> {
        if opts.max_results == 0 {
            return Vec::new();
        }
        let mut scored = self.score_matches(words);
        scored.sort_by(|a, b| {
            let by_score = match opts.order {
                RankOrder::LowestFirst => a.score.total_cmp(&b.score),
                RankOrder::HighestFirst => b.score.total_cmp(&a.score),
            };
            match by_score {
                Ordering::Equal => a.location.cmp(&b.location),
                other => other,
            }
        });
        scored.truncate(opts.max_results);
        scored
    }

    /// Every location at which at least one query word occurs, unordered.
    pub fn score_matches<S: AsRef<str>>(&self, words: &[S]) -> Vec<ScoredLocation> {
        let mut scores: HashMap<&Location, f64> = HashMap::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            let stem = normalize(word);
            for p in self.postings(&stem) {
                *scores.entry(&p.location).or_insert(1.0) *= p.score;
            }
        }
        tracing::trace!(words = words.len(), candidates = scores.len(), "scored query");
        scores
            .into_iter()
            .map(|(location, score)| ScoredLocation { location: location.clone(), score })
            .collect()
    }
}
