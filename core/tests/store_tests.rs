use revindex::store::Store;
use revindex::InvertedIndex;
use std::collections::HashMap;

fn sample() -> InvertedIndex {
    InvertedIndex::build(&["a b", "b c"], vec!["0".into(), "1".into()]).unwrap()
}

fn hits(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
    pairs.iter().map(|(t, n)| (t.to_string(), *n)).collect()
}

#[test]
fn upserts_return_existing_ids() {
    let store = Store::temporary().unwrap();
    let a = store.add_title("doc").unwrap();
    assert_eq!(store.add_title("doc").unwrap(), a);
    assert_ne!(store.add_title("other").unwrap(), a);
    assert_eq!(store.title_by_id(a).unwrap(), "doc");

    let w = store.add_word("rust").unwrap();
    assert_eq!(store.add_word("rust").unwrap(), w);
}

#[test]
fn find_matches_in_memory_find() {
    let idx = sample();
    let store = Store::temporary().unwrap();
    store.save_index(&idx).unwrap();

    for phrase in ["a b", "a a", "A: a. B, b.\n C! c?", "a d", "d e"] {
        assert_eq!(store.find(phrase).unwrap(), idx.find(phrase), "phrase {phrase:?}");
    }
    assert_eq!(store.find("a b").unwrap(), hits(&[("0", 2), ("1", 1)]));
    assert!(store.find("d e").unwrap().is_empty());
}

#[test]
fn unknown_word_has_no_titles() {
    let store = Store::temporary().unwrap();
    store.save_index(&sample()).unwrap();
    assert!(store.title_ids_for_word("zzz").unwrap().is_empty());
    assert_eq!(store.title_ids_for_word("b").unwrap().len(), 2);
}

#[test]
fn missing_title_row_is_corrupt() {
    let store = Store::temporary().unwrap();
    assert!(matches!(store.title_by_id(42).unwrap_err(), revindex::Error::Corrupt(_)));
}

#[test]
fn clear_removes_everything() {
    let store = Store::temporary().unwrap();
    store.save_index(&sample()).unwrap();
    store.clear().unwrap();
    assert!(store.find("a b c").unwrap().is_empty());
}

#[test]
fn reopens_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = Store::open(dir.path()).unwrap();
        store.save_index(&sample()).unwrap();
        store.flush().unwrap();
    }
    let store = Store::open(dir.path()).unwrap();
    assert_eq!(store.find("c").unwrap(), hits(&[("1", 1)]));
}

#[test]
fn equal_titles_share_one_row() {
    let idx = InvertedIndex::build(&["rust", "rust go"], vec!["same".into(), "same".into()]).unwrap();
    let store = Store::temporary().unwrap();
    store.save_index(&idx).unwrap();
    assert_eq!(idx.find("rust"), hits(&[("same", 2)]));
    assert_eq!(store.find("rust").unwrap(), hits(&[("same", 1)]));
}
