use async_trait::async_trait;
use duet_keyring::{CredentialStore, LegacyApiKey, MemoryBackend, SecretBackend, SecretError};
use tempfile::TempDir;

use crate::commands::select::handle_select;
use crate::migrate_legacy_key;
use crate::profile::{MAIN_PROFILE, ProfileStore};
use crate::state::AppState;

fn store() -> (TempDir, ProfileStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = ProfileStore::new(dir.path());
    (dir, store)
}

#[test]
fn main_profile_is_created_with_defaults() {
    let (dir, store) = store();

    let profile = store.load(MAIN_PROFILE).unwrap();

    assert_eq!(profile.name(), MAIN_PROFILE);
    assert_eq!(profile.config(), &duet_config::Config::default());
    assert!(dir.path().join("profiles").join("main.json").exists());
}

#[test]
fn unknown_profile_is_cloned_from_main() {
    let (dir, store) = store();

    let mut main = store.load(MAIN_PROFILE).unwrap();
    main.config_mut().languages.main_language = "DE".to_string();
    main.save().unwrap();

    let work = store.load("work").unwrap();
    assert_eq!(work.name(), "work");
    assert_eq!(work.config().languages.main_language, "DE");
    assert!(dir.path().join("profiles").join("work.json").exists());
}

#[tokio::test]
async fn legacy_key_moves_into_keyring_and_off_disk() {
    let (_dir, store) = store();

    let mut profile = store.load(MAIN_PROFILE).unwrap();
    profile.config_mut().api_key = "legacy-key:fx".to_string();
    profile.save().unwrap();

    let mut profile = store.load(MAIN_PROFILE).unwrap();
    let credentials = CredentialStore::new(MemoryBackend::new());

    assert!(credentials.migrate_from_legacy_config(&mut profile).await.unwrap());
    assert_eq!(credentials.retrieve().await.unwrap().expose(), "legacy-key:fx");

    let mut reloaded = store.load(MAIN_PROFILE).unwrap();
    assert_eq!(reloaded.legacy_api_key(), "");
    assert!(!credentials.migrate_from_legacy_config(&mut reloaded).await.unwrap());
}

#[test]
fn select_persists_secondary_language() {
    let (_dir, store) = store();

    let mut profile = store.load(MAIN_PROFILE).unwrap();
    profile.config_mut().languages.available_languages =
        vec!["ES".to_string(), "PT-BR".to_string()];
    profile.save().unwrap();

    let mut state = AppState::new(store.load(MAIN_PROFILE).unwrap(), CredentialStore::keyring());
    handle_select(&mut state, "pt-br").unwrap();

    let reloaded = store.load(MAIN_PROFILE).unwrap();
    assert_eq!(reloaded.config().languages.last_used_language, "PT-BR");
}

#[test]
fn select_rejects_language_outside_secondary_list() {
    let (_dir, store) = store();

    let mut state = AppState::new(store.load(MAIN_PROFILE).unwrap(), CredentialStore::keyring());

    assert!(handle_select(&mut state, "FR").is_err());
    assert!(handle_select(&mut state, "XX").is_err());

    let reloaded = store.load(MAIN_PROFILE).unwrap();
    assert_eq!(reloaded.config().languages.last_used_language, "ES");
}

#[test]
fn profile_names_stay_inside_profiles_dir() {
    let (dir, store) = store();

    for name in ["../escape", "a/b", "a\\b", "..", ".hidden", ""] {
        assert!(store.load(name).is_err(), "{name:?} accepted");
    }
    assert!(!dir.path().join("escape.json").exists());

    assert!(store.load("work-2.old").is_ok());
}

struct LockedKeyring;

#[async_trait]
impl SecretBackend for LockedKeyring {
    async fn store(&self, _secret: &str) -> Result<(), SecretError> {
        Err(SecretError::Keyring("keyring locked".to_string()))
    }

    async fn retrieve(&self) -> Result<Option<String>, SecretError> {
        Err(SecretError::Keyring("keyring locked".to_string()))
    }

    async fn clear(&self) -> Result<(), SecretError> {
        Err(SecretError::Keyring("keyring locked".to_string()))
    }
}

#[tokio::test]
async fn failed_migration_only_stops_key_commands() {
    let (_dir, store) = store();

    let mut profile = store.load(MAIN_PROFILE).unwrap();
    profile.config_mut().api_key = "legacy-key:fx".to_string();
    profile.save().unwrap();

    let credentials = CredentialStore::new(LockedKeyring);

    migrate_legacy_key(&credentials, &mut profile, false)
        .await
        .unwrap();
    assert!(
        migrate_legacy_key(&credentials, &mut profile, true)
            .await
            .is_err()
    );

    // left in place for the next attempt
    let reloaded = store.load(MAIN_PROFILE).unwrap();
    assert_eq!(reloaded.legacy_api_key(), "legacy-key:fx");
}
