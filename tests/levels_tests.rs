//! Level catalog and progress persistence tests

use std::fs;
use std::path::PathBuf;

use tui_fifteen::core::{NullFeedback, ProgressStore, PuzzleSession};
use tui_fifteen::levels::{FileProgress, LevelCatalog, LevelData, Progress};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "tui-fifteen-it-{}-{}",
        std::process::id(),
        name
    ))
}

#[test]
fn test_catalog_round_trips_through_json() {
    let doc = serde_json::json!({
        "levels": [
            { "size": 3, "texture": "meadow", "icon": "meadow_icon" },
            { "size": 4, "texture": "aurora", "icon": "aurora_icon" },
        ]
    });
    let catalog = LevelCatalog::from_json_str(&doc.to_string()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get(1),
        Some(&LevelData {
            size: 4,
            texture: "aurora".to_string(),
            icon: "aurora_icon".to_string(),
        })
    );
}

#[test]
fn test_catalog_loads_from_file() {
    let path = temp_path("levels.json");
    fs::write(
        &path,
        r#"{"levels":[{"size":5,"texture":"nebula","icon":"nebula_icon"}]}"#,
    )
    .unwrap();

    let catalog = LevelCatalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(0).unwrap().size, 5);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_catalog_load_reports_the_path() {
    let path = temp_path("no-such-levels.json");
    let err = LevelCatalog::load(&path).unwrap_err();
    assert!(err.to_string().contains("no-such-levels.json"));
}

#[test]
fn test_catalog_rejects_degenerate_levels() {
    let doc = r#"{"levels":[{"size":3,"texture":"ok"},{"size":0,"texture":"bad"}]}"#;
    let err = LevelCatalog::from_json_str(doc).unwrap_err();
    assert!(err.to_string().contains("level 2"));
}

#[test]
fn test_builtin_catalog_feeds_valid_sessions() {
    let catalog = LevelCatalog::builtin();
    assert!(catalog.len() >= 2);
    for (index, level) in catalog.levels().iter().enumerate() {
        let session = PuzzleSession::new(index, level.size, &level.texture, 1).unwrap();
        assert_eq!(session.board().size(), level.size);
        assert_eq!(session.texture(), level.texture);
    }
}

#[test]
fn test_progress_persistence_format() {
    let mut progress = Progress::new();
    progress.unlock(1);
    progress.unlock(4);
    assert_eq!(progress.to_string(), "0,1,4");
    assert_eq!(Progress::parse("0,1,4").unwrap(), progress);
}

#[test]
fn test_solving_through_file_progress_persists_the_unlock() {
    let path = temp_path("progress.txt");
    let _ = fs::remove_file(&path);

    let mut store = FileProgress::load(&path).unwrap();
    assert!(!store.progress().is_unlocked(3));

    // Solve a scrambled 2x2 level by rotating its tiles clockwise: the
    // reachable state cycle has 12 entries, one of which is the solution.
    let mut session = PuzzleSession::new(2, 2, "aurora", 5).unwrap();
    session.shuffle_now();
    let mut feedback = NullFeedback;
    let mut guard = 0;
    while !session.is_solved() {
        let slot = match session.board().empty_index() {
            0 => 1,
            1 => 3,
            3 => 2,
            _ => 0,
        };
        assert!(session.tap(slot, &mut feedback, &mut store).moved());
        guard += 1;
        assert!(guard <= 12);
    }

    assert!(store.progress().is_unlocked(3));
    assert!(store.take_save_error().is_none());

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.split(',').any(|part| part == "3"));
    let _ = fs::remove_file(&path);
}

#[test]
fn test_unlock_next_is_implemented_for_plain_recording() {
    // ProgressStore is object-safe: sessions only ever see the trait.
    struct Count(usize);
    impl ProgressStore for Count {
        fn unlock_next(&mut self, _solved_level: usize) {
            self.0 += 1;
        }
    }
    let mut count = Count(0);
    let store: &mut dyn ProgressStore = &mut count;
    store.unlock_next(0);
    assert_eq!(count.0, 1);
}
