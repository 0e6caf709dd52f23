//! End-to-end behaviour of the confession board through the service API.
//!
//! The file-backed tests go through a real slot on disk; the sequence tests
//! compare the service against a plain `Vec` model after every operation.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use confessions::admin::{CredentialCheck, SessionState};
use confessions::store::{ConfessionStore, FileStorage, MemoryStorage, Storage};
use confessions::{AppConfig, AppError, Confession, ConfessionId, ConfessionsService};
use proptest::prelude::*;
use tokio_test::{assert_err, assert_ok};

const SLOT: &str = "confessions_black_gold";

static TEST_ID: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
    let id = TEST_ID.fetch_add(1, Ordering::Relaxed);
    let dir = env::temp_dir().join(format!("confessions-flow-{}-{}", std::process::id(), id));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn memory_service(storage: Arc<MemoryStorage>) -> ConfessionsService<Arc<MemoryStorage>> {
    ConfessionsService::new(
        ConfessionStore::load(storage, SLOT),
        CredentialCheck::new("Rocky", "Rocky123"),
        Duration::from_millis(3200),
    )
}

#[test]
fn test_file_slot_survives_restart() {
    let dir = temp_dir();
    let mut config = AppConfig::default();
    config.storage.data_dir = Some(dir.clone());

    let before: Vec<Confession> = {
        let mut svc = ConfessionsService::from_config(&config);
        svc.submit("I eat lunch in the library").unwrap();
        let id = svc.submit("I never did the reading").unwrap();
        svc.login("Rocky", "Rocky123").unwrap();
        svc.toggle_read(&id).unwrap();
        svc.visible_confessions().unwrap().to_vec()
    };

    // Fresh process: logged out, same list once signed in.
    let mut svc = ConfessionsService::from_config(&config);
    assert!(svc.is_persistent());
    assert_eq!(svc.session(), SessionState::LoggedOut);
    assert!(svc.visible_confessions().is_none());
    assert_eq!(svc.unread_count(), 1);
    svc.login("Rocky", "Rocky123").unwrap();
    assert_eq!(svc.visible_confessions().unwrap(), before.as_slice());

    let raw = fs::read_to_string(dir.join(format!("{}.json", SLOT))).unwrap();
    assert!(raw.starts_with(r#"[{"id":""#));
    assert!(raw.contains(r#""createdAt":""#));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupted_file_slot_starts_empty() {
    let dir = temp_dir();
    let storage = FileStorage::new(&dir).unwrap();
    storage.set_item(SLOT, "[{\"id\": 12").unwrap();

    let mut config = AppConfig::default();
    config.storage.data_dir = Some(dir.clone());
    let mut svc = ConfessionsService::from_config(&config);
    assert_eq!(svc.confession_count(), 0);

    // The next write replaces the corrupted blob with a valid list.
    svc.submit("fresh start").unwrap();
    let blob = storage.get_item(SLOT).unwrap().unwrap();
    let parsed: Vec<Confession> = serde_json::from_str(&blob).unwrap();
    assert_eq!(parsed.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_credential_matrix() {
    let storage = Arc::new(MemoryStorage::new());
    let mut svc = memory_service(storage);

    for (username, password) in [("Rocky", "wrong"), ("other", "Rocky123"), ("ROCKY", "Rocky123")] {
        assert!(matches!(
            svc.login(username, password),
            Err(AppError::InvalidCredentials)
        ));
    }
    assert_err!(svc.login("Rocky", "rocky123"));
    assert_eq!(svc.session(), SessionState::LoggedOut);

    assert_ok!(svc.login("Rocky", "Rocky123"));
    assert_eq!(svc.session(), SessionState::LoggedIn);
}

#[test]
fn test_blank_submissions_change_nothing() {
    let storage = Arc::new(MemoryStorage::new());
    let mut svc = memory_service(Arc::clone(&storage));

    for blank in ["", "   ", "\n\t "] {
        assert!(matches!(svc.submit(blank), Err(AppError::EmptyInput)));
        assert!(svc.feedback().unwrap().is_error());
    }
    assert_eq!(svc.confession_count(), 0);
    assert_eq!(storage.get_item(SLOT).unwrap(), None);
}

#[tokio::test]
async fn test_precomputed_digest_used_by_service() {
    let storage = Arc::new(MemoryStorage::new());
    let mut svc = memory_service(storage);
    assert_ok!(svc.authenticator().spawn_precompute().await);
    assert!(svc.authenticator().is_primed());
    assert_ok!(svc.login("Rocky", "Rocky123"));
}

// --- Operation sequences ---

#[derive(Debug, Clone)]
enum Op {
    Submit(String),
    Toggle(usize),
    Delete(usize),
}

/// Reference model: (text, read), newest first.
type Model = Vec<(String, bool)>;

fn pick_id(svc: &ConfessionsService<Arc<MemoryStorage>>, index: usize) -> ConfessionId {
    let visible = svc.visible_confessions().unwrap();
    if visible.is_empty() {
        ConfessionId::from("missing")
    } else {
        visible[index % visible.len()].id.clone()
    }
}

fn apply(svc: &mut ConfessionsService<Arc<MemoryStorage>>, model: &mut Model, op: &Op) {
    match op {
        Op::Submit(text) => {
            let before = svc.confession_count();
            match svc.submit(text) {
                Ok(_) => {
                    model.insert(0, (text.trim().to_string(), false));
                    assert_eq!(svc.confession_count(), before + 1);
                    let first = &svc.visible_confessions().unwrap()[0];
                    assert_eq!(first.text, text.trim());
                    assert!(!first.read);
                }
                Err(AppError::EmptyInput) => {
                    assert!(text.trim().is_empty());
                    assert_eq!(svc.confession_count(), before);
                }
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        Op::Toggle(index) => {
            let id = pick_id(svc, *index);
            if let Some(read) = svc.toggle_read(&id).unwrap() {
                let slot = index % model.len();
                model[slot].1 = !model[slot].1;
                assert_eq!(model[slot].1, read);
            }
        }
        Op::Delete(index) => {
            let id = pick_id(svc, *index);
            if svc.request_delete(&id).unwrap() {
                assert!(svc.confirm_delete().unwrap().is_some());
                model.remove(index % model.len());
            }
        }
    }
}

fn check(svc: &ConfessionsService<Arc<MemoryStorage>>, model: &Model) {
    let visible = svc.visible_confessions().unwrap();
    let actual: Model = visible.iter().map(|c| (c.text.clone(), c.read)).collect();
    assert_eq!(&actual, model);
    assert_eq!(
        svc.unread_count(),
        visible.iter().filter(|c| !c.read).count()
    );
    assert_eq!(svc.unread_count(), model.iter().filter(|(_, read)| !read).count());
}

fn run(ops: &[Op]) {
    let storage = Arc::new(MemoryStorage::new());
    let mut svc = memory_service(Arc::clone(&storage));
    svc.login("Rocky", "Rocky123").unwrap();
    let mut model = Model::new();

    for op in ops {
        apply(&mut svc, &mut model, op);
        check(&svc, &model);
    }

    // Reloading the slot reproduces the list exactly.
    let reloaded = ConfessionStore::load(Arc::clone(&storage), SLOT);
    assert_eq!(reloaded.records(), svc.visible_confessions().unwrap());
}

#[test]
fn test_all_short_sequences() {
    let alphabet = [
        Op::Submit("a".to_string()),
        Op::Submit("  ".to_string()),
        Op::Toggle(0),
        Op::Toggle(1),
        Op::Delete(0),
        Op::Delete(1),
    ];

    for len in 0..=4u32 {
        let combinations = alphabet.len().pow(len);
        for mut n in 0..combinations {
            let mut ops = Vec::with_capacity(len as usize);
            for _ in 0..len {
                ops.push(alphabet[n % alphabet.len()].clone());
                n /= alphabet.len();
            }
            run(&ops);
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[ a-z]{0,8}".prop_map(Op::Submit),
        (0usize..6).prop_map(Op::Toggle),
        (0usize..6).prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn prop_service_matches_model(ops in prop::collection::vec(op_strategy(), 0..24)) {
        run(&ops);
    }

    #[test]
    fn prop_double_toggle_is_identity(texts in prop::collection::vec("[a-z]{1,5}", 1..6), pick in 0usize..6) {
        let storage = Arc::new(MemoryStorage::new());
        let mut svc = memory_service(storage);
        for text in &texts {
            svc.submit(text).unwrap();
        }
        svc.login("Rocky", "Rocky123").unwrap();
        let before = svc.visible_confessions().unwrap().to_vec();
        let id = before[pick % before.len()].id.clone();

        svc.toggle_read(&id).unwrap();
        svc.toggle_read(&id).unwrap();
        prop_assert_eq!(svc.visible_confessions().unwrap(), before.as_slice());
    }
}
