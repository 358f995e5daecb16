use crate::error::{Error, Result};
use crate::tokenizer::tokenize;
use std::collections::{HashMap, HashSet};

/// Position of a document in the title list of one index.
pub type DocId = usize;

/// Documents containing a word. Unordered in memory; the codec sorts it.
pub type DocSet = HashSet<DocId>;

/// Word → documents mapping plus the titles those documents carry.
///
/// Created by [`InvertedIndex::build`] or [`InvertedIndex::from_parts`] and
/// read-only afterwards, so it can be shared freely between readers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    titles: Vec<String>,
    words: HashMap<String, DocSet>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index `texts[i]` under document id `i`, titled `titles[i]`.
    pub fn build<S: AsRef<str>>(texts: &[S], titles: Vec<String>) -> Result<Self> {
        if texts.len() != titles.len() {
            return Err(Error::LengthMismatch { texts: texts.len(), titles: titles.len() });
        }
        let mut words: HashMap<String, DocSet> = HashMap::new();
        for (doc_id, text) in texts.iter().enumerate() {
            for word in tokenize(text.as_ref()) {
                words.entry(word).or_default().insert(doc_id);
            }
        }
        Ok(Self { titles, words })
    }

    /// Assemble an index from already-normalized entries.
    ///
    /// Fails with [`Error::Format`] if an entry points past the title list.
    pub fn from_parts(titles: Vec<String>, words: HashMap<String, DocSet>) -> Result<Self> {
        let num_docs = titles.len();
        for (word, docs) in &words {
            if let Some(bad) = docs.iter().find(|&&id| id >= num_docs) {
                return Err(Error::format(
                    0,
                    format!("word {word:?} refers to document {bad}, but there are only {num_docs} titles"),
                ));
            }
        }
        Ok(Self { titles, words })
    }

    pub fn titles(&self) -> &[String] { &self.titles }

    pub fn num_docs(&self) -> usize { self.titles.len() }

    pub fn num_words(&self) -> usize { self.words.len() }

    /// Documents containing an already-normalized `word`.
    pub fn docs(&self, word: &str) -> Option<&DocSet> { self.words.get(word) }

    /// Iterate `(word, docs)` entries in arbitrary order.
    pub fn words(&self) -> impl Iterator<Item = (&str, &DocSet)> {
        self.words.iter().map(|(w, d)| (w.as_str(), d))
    }

    /// Count query-token hits per title.
    ///
    /// Every occurrence of a token in `phrase` adds one to each title whose
    /// document contains it, so repeated tokens count repeatedly. Documents
    /// sharing a title share one counter. Titles with no hits are absent.
    pub fn find(&self, phrase: &str) -> HashMap<String, usize> {
        let mut hits: HashMap<String, usize> = HashMap::new();
        for word in tokenize(phrase) {
            let Some(docs) = self.words.get(&word) else { continue };
            for &doc_id in docs {
                *hits.entry(self.titles[doc_id].clone()).or_insert(0) += 1;
            }
        }
        hits
    }
}
