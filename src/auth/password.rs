use crate::config::AdminConfig;

/// Checks login attempts against the configured admin password.
pub struct PasswordCheck {
    password: String,
}

impl PasswordCheck {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            password: config.password.clone(),
        }
    }

    pub fn verify(&self, candidate: &str) -> bool {
        // Constant time over equal-length inputs
        let expected = self.password.as_bytes();
        let given = candidate.as_bytes();
        if expected.len() != given.len() {
            return false;
        }
        expected
            .iter()
            .zip(given)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
