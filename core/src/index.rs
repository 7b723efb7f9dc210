use crate::error::{LoadError, RecordError};
use crate::tokenizer::{tokenize, SPACE_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Separates the four fields of a corpus line.
pub const FIELD_DELIMITER: char = '|';

/// Identifies a single verse. Ordered by book, chapter, then verse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl Location {
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self { book: book.into(), chapter, verse }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posting {
    pub location: Location,
    /// Occurrences of the stem within this verse.
    pub count: u32,
    /// `count` divided by the largest per-verse count in the corpus.
    pub score: f64,
}

/// A verse as returned by queries. `text` keeps the corpus placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl Verse {
    pub fn location(&self) -> Location {
        Location::new(self.book.clone(), self.chapter, self.verse)
    }

    /// Verse text with word placeholders turned back into spaces.
    pub fn display_text(&self) -> String {
        self.text.replace(SPACE_PLACEHOLDER, " ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub lines_read: usize,
    pub verses_indexed: usize,
    pub lines_skipped: usize,
    /// Global divisor used for normalization; 0 when nothing was indexed.
    pub max_count: u32,
}

/// One well-formed corpus line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub location: Location,
    pub text: String,
}

/// Parse `text|book|chapter|verse`.
pub fn parse_line(line: &str) -> Result<Record, RecordError> {
    if line.trim().is_empty() {
        return Err(RecordError::Blank);
    }
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let [text, book, chapter, verse] = fields.as_slice() else {
        return Err(RecordError::FieldCount(fields.len()));
    };
    let chapter: u32 = chapter.parse().map_err(|_| RecordError::Chapter(chapter.to_string()))?;
    let verse: u32 = verse.parse().map_err(|_| RecordError::Verse(verse.to_string()))?;
    Ok(Record { location: Location::new(*book, chapter, verse), text: text.to_string() })
}

/// Corpus store plus inverted index. Built once, read-only afterwards.
#[derive(Debug, Default)]
pub struct VerseIndex {
    pub(crate) postings: HashMap<String, Vec<Posting>>, // sorted by location
    pub(crate) verses: HashMap<Location, String>,
    stats: BuildStats,
}

impl VerseIndex {
    /// Build from a corpus file. Failing to open or read the file is fatal;
    /// malformed lines (bad fields, invalid UTF-8, no words) are logged and skipped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|source| LoadError::Open { path: path.to_path_buf(), source })?;
        tracing::debug!(path = %path.display(), "loading corpus");
        Self::from_reader(BufReader::new(f))
    }

    /// Lines are read as raw bytes; only I/O failures abort the build.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, LoadError> {
        let mut builder = IndexBuilder::default();
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            line_no += 1;
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| LoadError::Read { line: line_no, source })?;
            if n == 0 {
                break;
            }
            builder.push_line(line_no, trim_newline(&buf));
        }
        Ok(builder.finish())
    }

    /// Number of verses in the corpus store.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn num_stems(&self) -> usize {
        self.postings.len()
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Postings for an already-normalized stem.
    pub fn postings(&self, stem: &str) -> &[Posting] {
        self.postings.get(stem).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn verse(&self, location: &Location) -> Option<Verse> {
        self.verses.get(location).map(|text| Verse {
            book: location.book.clone(),
            chapter: location.chapter,
            verse: location.verse,
            text: text.clone(),
        })
    }

    pub fn verses(&self) -> impl Iterator<Item = Verse> + '_ {
        self.verses.keys().filter_map(|loc| self.verse(loc))
    }
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Accumulates raw per-verse counts; `finish` normalizes them.
#[derive(Default)]
struct IndexBuilder {
    raw_counts: HashMap<String, Vec<(Location, u32)>>,
    verses: HashMap<Location, String>,
    lines_read: usize,
    lines_skipped: usize,
}

impl IndexBuilder {
    fn push_line(&mut self, line_no: usize, line: &[u8]) {
        self.lines_read += 1;
        let parsed = std::str::from_utf8(line)
            .map_err(|_| RecordError::Encoding)
            .and_then(parse_line);
        match parsed.and_then(|record| self.ingest(record)) {
            Ok(()) => {}
            Err(RecordError::Blank) => {
                self.lines_skipped += 1;
                tracing::debug!(line = line_no, "skipping blank corpus line");
            }
            Err(err) => {
                self.lines_skipped += 1;
                tracing::warn!(line = line_no, error = %err, "skipping malformed corpus line");
            }
        }
    }

    fn ingest(&mut self, record: Record) -> Result<(), RecordError> {
        if self.verses.contains_key(&record.location) {
            return Err(RecordError::DuplicateLocation(record.location.to_string()));
        }
        let mut tally: HashMap<String, u32> = HashMap::new();
        for stem in tokenize(&record.text) {
            *tally.entry(stem).or_insert(0) += 1;
        }
        if tally.is_empty() {
            return Err(RecordError::NoWords);
        }
        for (stem, count) in tally {
            self.raw_counts.entry(stem).or_default().push((record.location.clone(), count));
        }
        self.verses.insert(record.location, record.text);
        Ok(())
    }

    fn finish(self) -> VerseIndex {
        let max_count = self
            .raw_counts
            .values()
            .flat_map(|plist| plist.iter().map(|(_, count)| *count))
            .max()
            .unwrap_or(0);

        let mut postings: HashMap<String, Vec<Posting>> = HashMap::with_capacity(self.raw_counts.len());
        if max_count > 0 {
            let divisor = f64::from(max_count);
            for (stem, plist) in self.raw_counts {
                let mut out: Vec<Posting> = plist
                    .into_iter()
                    .map(|(location, count)| Posting { location, count, score: f64::from(count) / divisor })
                    .collect();
                out.sort_by(|a, b| a.location.cmp(&b.location));
                postings.insert(stem, out);
            }
        }

        let stats = BuildStats {
            lines_read: self.lines_read,
            verses_indexed: self.verses.len(),
            lines_skipped: self.lines_skipped,
            max_count,
        };
        tracing::info!(
            verses = stats.verses_indexed,
            stems = postings.len(),
            skipped = stats.lines_skipped,
            max_count,
            "verse index built"
        );
        VerseIndex { postings, verses: self.verses, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_line() {
        let rec = parse_line("in~the~beginning|Genesis|1|1").unwrap();
        assert_eq!(rec.location, Location::new("Genesis", 1, 1));
        assert_eq!(rec.text, "in~the~beginning");
    }

    #[test]
    fn rejects_bad_numbers_and_field_counts() {
        assert_eq!(parse_line("x|Genesis|one|1"), Err(RecordError::Chapter("one".into())));
        assert_eq!(parse_line("x|Genesis|1|"), Err(RecordError::Verse("".into())));
        assert_eq!(parse_line("x|Genesis|1"), Err(RecordError::FieldCount(3)));
        assert_eq!(parse_line("x|Genesis|1|2|3"), Err(RecordError::FieldCount(5)));
        assert_eq!(parse_line("   "), Err(RecordError::Blank));
    }

    #[test]
    fn display_text_restores_spaces() {
        let v = Verse { book: "John".into(), chapter: 11, verse: 35, text: "Jesus~wept.".into() };
        assert_eq!(v.display_text(), "Jesus wept.");
        assert_eq!(v.location().to_string(), "John 11:35");
    }
}
