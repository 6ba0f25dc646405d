use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;
use text_clipper::clip::{self, Clip};
use text_clipper::repository::{
    ClipRepository, MemoryClipRepository, SortKey, SqliteClipRepository,
};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Three active clips whose created/updated/last-used orders all differ,
/// plus one archived clip that must never show up in active listings.
fn seed(repo: &mut impl ClipRepository) {
    let rows = [
        ("a", 10, 40, 50, true),
        ("b", 20, 30, 10, true),
        ("c", 30, 35, 90, true),
        ("z", 5, 5, 5, false),
    ];
    for (title, created, updated, used, active) in rows {
        let mut clip = Clip::new(title, format!("{title} body"), at(created));
        clip.updated_at = at(updated);
        clip.last_used_at = at(used);
        clip.is_active = active;
        repo.create(&clip).unwrap();
    }
}

fn titles(repo: &impl ClipRepository, active: bool, key: &str) -> Vec<String> {
    repo.list_by_status(active, key)
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect()
}

fn check_sort_table(repo: &mut impl ClipRepository) {
    seed(repo);
    let expected = [
        ("createdAtDesc", ["c", "b", "a"]),
        ("createdAtAsc", ["a", "b", "c"]),
        ("updatedAtDesc", ["a", "c", "b"]),
        ("updatedAtAsc", ["b", "c", "a"]),
        ("lastUsedAtDesc", ["c", "a", "b"]),
        ("lastUsedAtAsc", ["b", "a", "c"]),
    ];
    for (key, order) in expected {
        assert!(SortKey::parse(key).is_some());
        assert_eq!(titles(&*repo, true, key), order, "{key}");
    }
    assert_eq!(titles(&*repo, false, "createdAtDesc"), ["z"]);

    let mut unordered = titles(&*repo, true, "not-a-real-key");
    unordered.sort();
    assert_eq!(unordered, ["a", "b", "c"]);
    assert_eq!(titles(&*repo, true, "").len(), 3);
}

fn check_duplicate(repo: &mut impl ClipRepository) {
    let mut source = Clip::new("src", "body", at(0));
    source.is_active = false;
    let id = repo.create(&source).unwrap();
    let started = clip::now();
    let dup = repo.duplicate(id).unwrap();
    assert_ne!(dup, id);

    let copy = repo.find_by_id(dup).unwrap();
    assert_eq!(copy.title, "src");
    assert_eq!(copy.content, "body");
    assert!(!copy.is_active);
    assert!(copy.created_at >= started);
    assert!(copy.updated_at >= started);
    assert!(copy.last_used_at >= started);

    assert!(repo.duplicate(dup + 100).unwrap_err().is_not_found());
}

#[test]
fn memory_backend_sort_table() {
    check_sort_table(&mut MemoryClipRepository::new());
}

#[test]
fn sqlite_backend_sort_table() {
    check_sort_table(&mut SqliteClipRepository::open_in_memory().unwrap());
}

#[test]
fn memory_backend_duplicate() {
    check_duplicate(&mut MemoryClipRepository::new());
}

#[test]
fn sqlite_backend_duplicate() {
    let tmp = TempDir::new().unwrap();
    let mut repo = SqliteClipRepository::open(&tmp.path().join("clips.db")).unwrap();
    check_duplicate(&mut repo);
}
