//! End-to-end session tests: file catalog + JSON file store across restarts.

use flashdeck_core::engine::{CardView, Direction};
use flashdeck_core::model::LearningStatus;
use flashdeck_core::store::JsonFileStore;
use flashdeck_core::StudySession;
use flashdeck_sources::file::FileSource;

const FIRST: &str = "###Animals\ncanis;dog\nfelis;cat\n###Colors\nruber;red\n";
const SECOND: &str = "###Animals\ncanis;dog\nfelis;cat\n###Numbers\nunus;one\n";

async fn open(dir: &tempfile::TempDir, catalog: &str) -> StudySession<JsonFileStore> {
    let catalog_path = dir.path().join("vokabeln.csv");
    std::fs::write(&catalog_path, catalog).unwrap();
    let store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
    StudySession::load(&FileSource::new(&catalog_path), store, Some(11))
        .await
        .unwrap()
}

#[tokio::test]
async fn progress_and_selection_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = open(&dir, FIRST).await;
    first.toggle_group("Colors").unwrap();
    let front = first.state().current().unwrap().front.clone();
    first.mark_unknown().unwrap();
    drop(first);

    let second = open(&dir, FIRST).await;
    assert!(!second.state().groups().is_selected("Colors"));
    assert_eq!(second.status_of(&front), LearningStatus::Unknown);
    assert_eq!(second.snapshot().summary.unknown, 1);
}

#[tokio::test]
async fn removed_groups_are_kept_and_new_groups_selected() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = open(&dir, FIRST).await;
    first.toggle_group("Animals").unwrap();
    drop(first);

    let second = open(&dir, SECOND).await;
    let groups = second.state().groups();
    assert_eq!(groups.discovered(), ["Animals", "Colors", "Numbers"]);
    assert!(!groups.is_selected("Animals"));
    assert!(groups.is_selected("Colors"));
    assert!(groups.is_selected("Numbers"));

    // Only the Numbers entry is visible: Animals is deselected, Colors is gone.
    assert_eq!(second.snapshot().summary.total, 1);
}

#[tokio::test]
async fn wraparound_over_a_filtered_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(&dir, FIRST).await;
    session.toggle_group("Colors").unwrap();

    let snapshot = session.advance(Direction::Backward).unwrap();
    assert!(matches!(snapshot.card, CardView::Card { position: 1, of: 2, .. }));

    let snapshot = session.advance(Direction::Forward).unwrap();
    assert!(matches!(snapshot.card, CardView::Card { position: 0, of: 2, .. }));
}

#[tokio::test]
async fn corrupt_store_file_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("store.json"), "{{{{").unwrap();

    let session = open(&dir, FIRST).await;
    assert!(session.state().progress().is_empty());
    assert_eq!(session.snapshot().summary.total, 3);
}
