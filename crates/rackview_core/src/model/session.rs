use super::AppPath;

/// Read-only snapshot of the session that drives onboarding navigation.
///
/// Built fresh from the session store and the router on every evaluation;
/// nothing in the core ever writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionFacts {
    pub auth_loading: bool,
    pub config_loading: bool,
    pub is_admin: bool,
    pub completed_intro: bool,
    pub completed_user_intro: bool,
    pub current_path: AppPath,
}

impl SessionFacts {
    /// True while either input source is still loading.
    pub fn is_loading(&self) -> bool {
        self.auth_loading || self.config_loading
    }

    pub fn at(mut self, path: impl Into<AppPath>) -> Self {
        self.current_path = path.into();
        self
    }
}
