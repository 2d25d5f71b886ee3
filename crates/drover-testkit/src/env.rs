//! Scoped environment variable override.

/// Sets a single environment variable for the guard's lifetime and restores
/// the prior value on drop — an empty string when the variable was unset,
/// matching how drover itself treats missing variables. Restoration runs
/// during unwinding too.
///
/// Use inside a [`TestSandbox`](crate::sandbox::TestSandbox); the guard does
/// not take the global env lock itself.
#[must_use = "the override ends when the guard drops"]
pub struct EnvVarGuard {
    key: String,
    prior: String,
}

impl EnvVarGuard {
    pub fn set(key: impl Into<String>, value: &str) -> Self {
        let key = key.into();
        let prior = std::env::var(&key).unwrap_or_default();
        std::env::set_var(&key, value);
        Self { key, prior }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        std::env::set_var(&self.key, &self.prior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::TestSandbox;
    use pretty_assertions::assert_eq;

    #[test]
    fn restores_prior_value() {
        let sandbox = TestSandbox::new();
        sandbox.set_env("DROVER_TESTKIT_ENV_A", "before");
        {
            let _guard = EnvVarGuard::set("DROVER_TESTKIT_ENV_A", "during");
            assert_eq!(std::env::var("DROVER_TESTKIT_ENV_A").unwrap(), "during");
        }
        assert_eq!(std::env::var("DROVER_TESTKIT_ENV_A").unwrap(), "before");
    }

    #[test]
    fn absent_variable_restored_as_empty() {
        let _sandbox = TestSandbox::new();
        {
            let _guard = EnvVarGuard::set("DROVER_TESTKIT_ENV_B", "during");
        }
        assert_eq!(std::env::var("DROVER_TESTKIT_ENV_B").unwrap(), "");
    }
}
