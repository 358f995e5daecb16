//! Index storage in an embedded `sled` database.
//!
//! Rows live in four trees:
//! - `titles`: title → row id
//! - `title_rows`: row id → title
//! - `words`: word → row id
//! - `word_title`: (word row id, title row id) → empty, both big-endian
//!
//! Titles and words are upserted, so equal titles share a single row.

use crate::error::{Error, Result};
use crate::tokenizer::tokenize;
use crate::InvertedIndex;
use sled::{Batch, Db, Tree};
use std::collections::HashMap;
use std::path::Path;

#[derive(Clone)]
pub struct Store {
    db: Db,
    titles: Tree,
    title_rows: Tree,
    words: Tree,
    word_title: Tree,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_db(sled::open(path)?)
    }

    /// A store that is deleted when dropped.
    pub fn temporary() -> Result<Self> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: Db) -> Result<Self> {
        Ok(Self {
            titles: db.open_tree("titles")?,
            title_rows: db.open_tree("title_rows")?,
            words: db.open_tree("words")?,
            word_title: db.open_tree("word_title")?,
            db,
        })
    }

    /// Insert `title` unless present; returns its row id either way.
    pub fn add_title(&self, title: &str) -> Result<u64> {
        if let Some(id) = self.titles.get(title)? {
            return decode_id(&id);
        }
        let id = self.db.generate_id()?;
        self.title_rows.insert(id.to_be_bytes(), title.as_bytes())?;
        self.titles.insert(title, &id.to_be_bytes()[..])?;
        Ok(id)
    }

    /// Insert `word` unless present; returns its row id either way.
    pub fn add_word(&self, word: &str) -> Result<u64> {
        if let Some(id) = self.words.get(word)? {
            return decode_id(&id);
        }
        let id = self.db.generate_id()?;
        self.words.insert(word, &id.to_be_bytes()[..])?;
        Ok(id)
    }

    /// Record that `word_id` occurs in every title of `title_ids`, atomically.
    pub fn add_word_titles(&self, word_id: u64, title_ids: &[u64]) -> Result<()> {
        let mut batch = Batch::default();
        for &title_id in title_ids {
            batch.insert(&membership_key(word_id, title_id)[..], Vec::<u8>::new());
        }
        self.word_title.apply_batch(batch)?;
        Ok(())
    }

    /// Row ids of the titles containing an already-normalized `word`.
    pub fn title_ids_for_word(&self, word: &str) -> Result<Vec<u64>> {
        let Some(word_id) = self.words.get(word)? else {
            return Ok(Vec::new());
        };
        let word_id = decode_id(&word_id)?;
        let mut ids = Vec::new();
        for entry in self.word_title.scan_prefix(word_id.to_be_bytes()) {
            let (key, _) = entry?;
            ids.push(decode_id(&key[8..])?);
        }
        Ok(ids)
    }

    pub fn title_by_id(&self, id: u64) -> Result<String> {
        let row = self
            .title_rows
            .get(id.to_be_bytes())?
            .ok_or_else(|| Error::Corrupt(format!("no title row with id {id}")))?;
        String::from_utf8(row.to_vec())
            .map_err(|e| Error::Corrupt(format!("title row {id} is not UTF-8: {e}")))
    }

    /// Write every title, word and membership of `index`.
    pub fn save_index(&self, index: &InvertedIndex) -> Result<()> {
        let mut row_ids = Vec::with_capacity(index.num_docs());
        for title in index.titles() {
            row_ids.push(self.add_title(title)?);
        }
        for (word, docs) in index.words() {
            let word_id = self.add_word(word)?;
            let title_ids: Vec<u64> = docs.iter().map(|&doc| row_ids[doc]).collect();
            self.add_word_titles(word_id, &title_ids)?;
        }
        tracing::debug!(num_docs = index.num_docs(), num_words = index.num_words(), "saved index to store");
        Ok(())
    }

    /// Same counting rules as [`InvertedIndex::find`], resolved through the store.
    ///
    /// Documents with equal titles share one title row, so their memberships
    /// merge: a word present in several such documents counts once per
    /// query token here, but once per document in [`InvertedIndex::find`].
    pub fn find(&self, phrase: &str) -> Result<HashMap<String, usize>> {
        let mut hits: HashMap<String, usize> = HashMap::new();
        for word in tokenize(phrase) {
            for title_id in self.title_ids_for_word(&word)? {
                *hits.entry(self.title_by_id(title_id)?).or_insert(0) += 1;
            }
        }
        Ok(hits)
    }

    /// Remove all rows.
    pub fn clear(&self) -> Result<()> {
        for tree in [&self.titles, &self.title_rows, &self.words, &self.word_title] {
            tree.clear()?;
        }
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

fn membership_key(word_id: u64, title_id: u64) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&word_id.to_be_bytes());
    key[8..].copy_from_slice(&title_id.to_be_bytes());
    key
}

fn decode_id(bytes: &[u8]) -> Result<u64> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| Error::Corrupt(format!("row id has {} bytes, expected 8", bytes.len())))?;
    Ok(u64::from_be_bytes(arr))
}
