//! Line-oriented text format of an [`InvertedIndex`].
//!
//! ```text
//! <title_0>
//! <title_1>
//! -
//! <word_a>:[0,3]
//! <word_b>:[1]
//! ```
//!
//! Titles come in document-id order, then a lone `-` line, then one line
//! per word sorted by byte order, each carrying its document ids as an
//! ascending JSON integer array. Every line ends with `\n`.

use crate::error::{Error, Result};
use crate::index::{DocId, DocSet, InvertedIndex};
use std::collections::HashMap;
use std::io::{Read, Write};

pub const DELIMITER: &str = "-";
pub const SEPARATOR: char = ':';

/// Render `index` in the text format. Output depends only on the index
/// content, never on map iteration order.
pub fn serialize(index: &InvertedIndex) -> String {
    let mut out = String::new();
    for title in index.titles() {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');

    let mut entries: Vec<(&str, &DocSet)> = index.words().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (word, docs) in entries {
        let mut ids: Vec<DocId> = docs.iter().copied().collect();
        ids.sort_unstable();
        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        out.push_str(word);
        out.push(SEPARATOR);
        out.push('[');
        out.push_str(&ids.join(","));
        out.push_str("]\n");
    }
    out
}

pub fn write_to<W: Write>(index: &InvertedIndex, mut writer: W) -> Result<()> {
    writer.write_all(serialize(index).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Parse the text format. Anything [`serialize`] would not have produced
/// is rejected with [`Error::Format`].
pub fn deserialize(bytes: &[u8]) -> Result<InvertedIndex> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::format(0, format!("index is not valid UTF-8: {e}")))?;
    let Some(body) = text.strip_suffix('\n') else {
        return Err(Error::format(text.lines().count(), "missing trailing newline"));
    };
    let lines: Vec<&str> = body.split('\n').collect();

    let delimiters: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| **line == DELIMITER)
        .map(|(i, _)| i)
        .collect();
    let split = match delimiters.as_slice() {
        [one] => *one,
        found => {
            return Err(Error::format(
                0,
                format!("expected exactly one delimiter line, found {}", found.len()),
            ))
        }
    };

    let titles: Vec<String> = lines[..split].iter().map(|t| t.to_string()).collect();
    let num_docs = titles.len();

    let mut words: HashMap<String, DocSet> = HashMap::new();
    let mut prev: Option<&str> = None;
    for (offset, line) in lines[split + 1..].iter().enumerate() {
        let line_no = split + offset + 2;
        let (word, ids) = parse_word_line(line, line_no, num_docs)?;
        if prev.is_some_and(|p| p >= word) {
            return Err(Error::format(line_no, format!("word {word:?} is out of order")));
        }
        prev = Some(word);
        words.insert(word.to_string(), ids.into_iter().collect());
    }

    InvertedIndex::from_parts(titles, words)
}

pub fn read_from<R: Read>(mut reader: R) -> Result<InvertedIndex> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    deserialize(&buf)
}

/// Split a `word:[ids]` line on its last separator and parse the id list.
fn parse_word_line(line: &str, line_no: usize, num_docs: usize) -> Result<(&str, Vec<DocId>)> {
    let Some(pos) = line.rfind(SEPARATOR) else {
        return Err(Error::format(line_no, format!("missing '{SEPARATOR}' in {line:?}")));
    };
    let (word, segment) = (&line[..pos], &line[pos + 1..]);
    if segment.is_empty() {
        return Err(Error::format(line_no, format!("empty id list in {line:?}")));
    }

    let ids: Vec<DocId> = serde_json::from_str(segment)
        .map_err(|e| Error::format(line_no, format!("cannot parse id list {segment:?}: {e}")))?;
    if ids.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::format(line_no, format!("ids in {segment:?} are not strictly ascending")));
    }
    if serde_json::to_string(&ids).ok().as_deref() != Some(segment) {
        return Err(Error::format(line_no, format!("id list {segment:?} is not in canonical form")));
    }
    if let Some(bad) = ids.iter().find(|&&id| id >= num_docs) {
        return Err(Error::format(
            line_no,
            format!("document {bad} is out of range for {num_docs} titles"),
        ));
    }
    Ok((word, ids))
}
