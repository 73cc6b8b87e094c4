use libthai::{build_store, open_store, seed_memory_store, Config, Engine, MatchType};
use std::fs;
use tempfile::tempdir;

#[test]
fn known_mappings_rank_first() {
    let engine = Engine::new(seed_memory_store(), Config::default());
    let cases = [
        ("kon", "คน"),
        ("narak", "น่ารัก"),
        ("sawatdee", "สวัสดี"),
        ("rak", "รัก"),
        ("mai", "ไม่"),
        ("chai", "ใช่"),
        ("dee", "ดี"),
    ];
    for (input, expected) in cases {
        let matches = engine.find_matches(input, 5).unwrap();
        assert!(!matches.is_empty(), "no matches for {}", input);
        assert_eq!(matches[0].text, expected, "top match for {}", input);
        assert_eq!(matches[0].match_type, MatchType::Exact);
    }
}

#[test]
fn override_spellings_find_proper_nouns() {
    let engine = Engine::new(seed_memory_store(), Config::default());
    let top = engine.find_matches("Chiang Mai", 3).unwrap();
    assert_eq!(top[0].text, "เชียงใหม่");
    let top = engine.find_matches("bangkok", 3).unwrap();
    assert_eq!(top[0].text, "กรุงเทพมหานคร");
}

#[test]
fn open_store_seeds_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("corpus.redb");
    let expected = seed_memory_store().len() as u64;

    {
        let store = open_store(&path).unwrap();
        assert_eq!(store.len().unwrap(), expected);
    }
    // Reopening an existing corpus must not insert the seed twice.
    let store = open_store(&path).unwrap();
    assert_eq!(store.len().unwrap(), expected);

    let engine = Engine::new(store, Config::default());
    let top = engine.find_matches("narak", 1).unwrap();
    assert_eq!(top[0].text, "น่ารัก");
}

#[test]
fn build_store_imports_tsv() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("corpus.redb");
    let tsv = dir.path().join("extra.tsv");
    fs::write(
        &tsv,
        "# extra words\nแมวน้ำ\tmaewnam\t1200\nคน\tkon\t5\nnot a line\nปัตตานี\tpattani\t300\tprovince\n",
    )
    .unwrap();

    let (store, report) = build_store(&db, Some(&tsv)).unwrap();
    let imported = report.imported.unwrap();
    assert_eq!(report.seeded, seed_memory_store().len());
    assert_eq!(imported.inserted, 2);
    assert_eq!(imported.duplicates, 1);
    assert_eq!(imported.malformed, 1);
    assert_eq!(store.len().unwrap(), (report.seeded + 2) as u64);

    let counts = store.category_counts().unwrap();
    assert_eq!(counts.get(&libthai::Category::Word), Some(&1));

    let engine = Engine::new(store, Config::default());
    let top = engine.find_matches("maewnam", 1).unwrap();
    assert_eq!(top[0].text, "แมวน้ำ");
}

#[test]
fn build_store_replaces_existing_database() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("corpus.redb");
    let tsv = dir.path().join("extra.tsv");
    fs::write(&tsv, "แมวน้ำ\tmaewnam\t1200\n").unwrap();

    {
        let (store, _) = build_store(&db, Some(&tsv)).unwrap();
        assert_eq!(store.len().unwrap(), seed_memory_store().len() as u64 + 1);
    }
    let (store, report) = build_store(&db, None).unwrap();
    assert!(report.imported.is_none());
    assert_eq!(store.len().unwrap(), seed_memory_store().len() as u64);
}
