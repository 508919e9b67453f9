use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use duet_config::Config;
use duet_keyring::LegacyApiKey;
use serde::{Deserialize, Serialize};

pub const MAIN_PROFILE: &str = "main";

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Profile files under `<root>/profiles/<name>.json`
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform config directory (`~/.config/duet` on Linux)
    pub fn default_location() -> anyhow::Result<Self> {
        let dirs = ProjectDirs::from("", "", "duet")
            .context("Failed to determine config directory")?;
        Ok(Self::new(dirs.config_dir()))
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    fn profile_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        if !is_valid_profile_name(name) {
            anyhow::bail!(
                "Invalid profile name {name:?}: use letters, digits, '-', '_' or '.', not starting with '.'"
            );
        }
        Ok(self.profiles_dir().join(format!("{name}.json")))
    }

    /// Create the profiles folder and a default main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.profiles_dir())
            .with_context(|| format!("Failed to create {}", self.profiles_dir().display()))?;

        let main_profile = self.profile_path(MAIN_PROFILE)?;
        if !main_profile.exists() {
            write_profile(
                &main_profile,
                &Profile {
                    name: MAIN_PROFILE.into(),
                    value: Config::default(),
                },
            )?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }

        Ok(())
    }

    /// Load a profile by name. An unknown name gets a new profile cloned
    /// from main.
    pub fn load(&self, name: &str) -> anyhow::Result<LoadedProfile> {
        let path = self.profile_path(name)?;
        self.init()?;

        if !path.exists() {
            tracing::warn!("Profile {name} not found, creating it from main");
            let main = read_profile(&self.profile_path(MAIN_PROFILE)?)?;
            write_profile(
                &path,
                &Profile {
                    name: name.into(),
                    value: main.value,
                },
            )?;
        }

        let profile = read_profile(&path)?;
        Ok(LoadedProfile { path, profile })
    }
}

/// A profile together with the file it came from
pub struct LoadedProfile {
    path: PathBuf,
    profile: Profile,
}

impl LoadedProfile {
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn config(&self) -> &Config {
        &self.profile.value
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.profile.value
    }

    pub fn save(&self) -> anyhow::Result<()> {
        write_profile(&self.path, &self.profile)
    }
}

impl LegacyApiKey for LoadedProfile {
    fn legacy_api_key(&self) -> String {
        self.profile.value.api_key.clone()
    }

    fn clear_legacy_api_key(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.profile.value.api_key.clear();
        self.save().map_err(|e| e.into())
    }
}

/// Profile names become file names inside `profiles/`, so they may not
/// contain separators or start with a dot
fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn read_profile(path: &Path) -> anyhow::Result<Profile> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse profile {}", path.display()))
}

fn write_profile(path: &Path, profile: &Profile) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string_pretty(profile)?)
        .with_context(|| format!("Failed to write profile {}", path.display()))
}
