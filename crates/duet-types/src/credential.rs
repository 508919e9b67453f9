use std::fmt;

/// API secret. Never printed, wiped on drop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrite the secret bytes and leave the credential empty
    pub fn wipe(&mut self) {
        wipe_string(&mut self.0);
    }
}

/// Zero the bytes of `secret` and leave it empty. For copies of a secret that
/// live outside a [`Credential`].
pub fn wipe_string(secret: &mut String) {
    let mut bytes = std::mem::take(secret).into_bytes();
    bytes.iter_mut().for_each(|b| *b = 0);
    std::hint::black_box(&bytes);
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(********)")
        }
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.wipe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_shows_secret() {
        let credential = Credential::new("abc-123:fx");
        let printed = format!("{credential:?}");
        assert!(!printed.contains("abc-123"));
    }

    #[test]
    fn wipe_empties() {
        let mut credential = Credential::new("abc-123:fx");
        credential.wipe();
        assert!(credential.is_empty());
        assert_eq!(credential.expose(), "");

        // second wipe is harmless
        credential.wipe();
        assert!(credential.is_empty());
    }
}
