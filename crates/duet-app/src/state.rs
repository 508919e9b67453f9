use duet_keyring::CredentialStore;

use crate::profile::LoadedProfile;

pub struct AppState {
    pub profile: LoadedProfile,
    pub credentials: CredentialStore,
}

impl AppState {
    pub fn new(profile: LoadedProfile, credentials: CredentialStore) -> Self {
        Self {
            profile,
            credentials,
        }
    }
}
