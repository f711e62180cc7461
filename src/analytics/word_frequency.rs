//! Word frequency analysis over a post corpus
//!
//! Tokenizes every post text on non-alphanumeric boundaries (Unicode-aware),
//! filters short tokens and stopwords, and ranks the surviving tokens by
//! occurrence count across the whole corpus.

use crate::models::{Language, Post};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Built-in English stopword list
///
/// Includes platform noise tokens ("rt", url fragments) alongside the usual
/// function words, matching what hashtag search results are full of.
const STOPWORDS_EN: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "once", "here", "there", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "can", "will", "just", "should", "now", "i", "me", "my", "we", "our",
    "you", "your", "he", "him", "his", "she", "her", "it", "its", "they", "them", "their",
    "what", "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "rt", "amp", "https", "http", "www", "com",
];

/// Built-in Portuguese stopword list
const STOPWORDS_PT: &[&str] = &[
    "de", "a", "o", "que", "e", "do", "da", "em", "um", "para", "com", "não", "nao", "uma",
    "os", "no", "se", "na", "por", "mais", "as", "dos", "como", "mas", "foi", "ao", "ele",
    "das", "tem", "seu", "sua", "ou", "ser", "quando", "muito", "há", "nos", "já", "está",
    "esta", "eu", "também", "tambem", "só", "so", "pelo", "pela", "até", "ate", "isso",
    "ela", "entre", "era", "depois", "sem", "mesmo", "aos", "ter", "seus", "quem", "nas",
    "me", "esse", "eles", "estão", "estao", "você", "voce", "tinha", "foram", "essa",
    "num", "nem", "suas", "meu", "minha", "têm", "numa", "pelos", "elas", "havia",
    "seja", "qual", "será", "sera", "nós", "tenho", "lhe", "deles", "essas",
    "esses", "pelas", "este", "fosse", "dele", "rt", "amp", "https", "http", "www", "com",
];

/// A normalized token and its occurrence count across the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequencyEntry {
    /// Normalized (case-folded when enabled) token
    pub word: String,

    /// Occurrence count, always at least 1
    pub count: u64,
}

/// Configuration for word frequency analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordFrequencyConfig {
    /// Minimum token length in characters; shorter tokens are discarded
    pub min_word_length: usize,

    /// Stopword override; `None` uses the built-in list for `language`
    pub stopwords: Option<HashSet<String>>,

    /// Case-fold tokens (and stopword comparison) when true
    pub case_fold: bool,

    /// Maximum entries in the ranked view
    pub top_n: usize,

    /// Language selecting the built-in stopword list
    pub language: Language,
}

impl Default for WordFrequencyConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            stopwords: None,
            case_fold: true,
            top_n: 20,
            language: Language::En,
        }
    }
}

/// Get the built-in stopword list for a language
#[must_use]
pub fn builtin_stopwords(language: Language) -> &'static [&'static str] {
    match language {
        Language::En => STOPWORDS_EN,
        Language::Pt => STOPWORDS_PT,
    }
}

/// Split text into tokens on non-alphanumeric boundaries (Unicode-aware)
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// Compute the full (untruncated) frequency table for a corpus
///
/// Entries are sorted by count descending, ties broken by ascending
/// lexicographic order of the word, giving a deterministic total order.
/// An empty corpus, or one where every token is filtered, yields an empty
/// table rather than an error.
#[must_use]
pub fn frequency_table(corpus: &[Post], config: &WordFrequencyConfig) -> Vec<WordFrequencyEntry> {
    let stopwords: HashSet<String> = match &config.stopwords {
        Some(set) if config.case_fold => set.iter().map(|w| w.to_lowercase()).collect(),
        Some(set) => set.iter().cloned().collect(),
        None if config.case_fold => builtin_stopwords(config.language)
            .iter()
            .map(|w| w.to_lowercase())
            .collect(),
        None => builtin_stopwords(config.language)
            .iter()
            .map(|w| (*w).to_string())
            .collect(),
    };

    let mut counts: HashMap<String, u64> = HashMap::new();

    for post in corpus {
        for token in tokenize(&post.text) {
            if token.chars().count() < config.min_word_length {
                continue;
            }
            let normalized = if config.case_fold {
                token.to_lowercase()
            } else {
                token.to_string()
            };
            if stopwords.contains(&normalized) {
                continue;
            }
            *counts.entry(normalized).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<WordFrequencyEntry> = counts
        .into_iter()
        .map(|(word, count)| WordFrequencyEntry { word, count })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    entries
}

/// Compute the ranked word frequency view, truncated to `top_n`
#[must_use]
pub fn word_frequencies(corpus: &[Post], config: &WordFrequencyConfig) -> Vec<WordFrequencyEntry> {
    let mut entries = frequency_table(corpus, config);
    entries.truncate(config.top_n);
    entries
}
