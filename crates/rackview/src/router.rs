//! Location history and route resolution.

use rackview_core::{AppPath, Section};

/// What is mounted for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A resource list screen
    Resources(Section),
    /// The onboarding flow; the step inside it is resolved by the intro screen
    Intro,
    NotFound,
}

impl Route {
    pub fn resolve(path: &AppPath) -> Self {
        match Section::from_path(path) {
            Some(Section::Intro) => Route::Intro,
            Some(section) => Route::Resources(section),
            None => Route::NotFound,
        }
    }
}

/// Browser-style history stack. Never empty.
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<AppPath>,
}

impl Router {
    pub fn new(initial: AppPath) -> Self {
        Self {
            history: vec![initial],
        }
    }

    pub fn current(&self) -> &AppPath {
        // `history` always holds at least the initial entry
        &self.history[self.history.len() - 1]
    }

    pub fn route(&self) -> Route {
        Route::resolve(self.current())
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn push(&mut self, path: AppPath) {
        if &path == self.current() {
            return;
        }
        tracing::debug!(from = %self.current(), to = %path, "navigate");
        self.history.push(path);
    }

    /// Swap the current entry for `path` without growing history.
    pub fn replace(&mut self, path: AppPath) {
        tracing::debug!(from = %self.current(), to = %path, "navigate (replace)");
        let last = self.history.len() - 1;
        self.history[last] = path;
    }

    pub fn navigate(&mut self, path: AppPath, replace: bool) {
        if replace {
            self.replace(path);
        } else {
            self.push(path);
        }
    }

    /// Go back one entry. The first entry is never popped.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Route::resolve(&AppPath::new("/tags")), Route::Resources(Section::Tags));
        assert_eq!(Route::resolve(&AppPath::new("/intro/user")), Route::Intro);
        assert_eq!(Route::resolve(&AppPath::new("/bogus")), Route::NotFound);
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let mut router = Router::new(AppPath::new("/intro"));
        for _ in 0..5 {
            router.navigate(AppPath::new("/intro/user"), true);
        }
        assert_eq!(router.depth(), 1);
        assert_eq!(router.current(), &AppPath::new("/intro/user"));
    }

    #[test]
    fn test_push_and_back() {
        let mut router = Router::new(AppPath::new("/machines"));
        router.push(AppPath::new("/tags"));
        router.push(AppPath::new("/tags"));
        assert_eq!(router.depth(), 2);

        assert!(router.back());
        assert_eq!(router.current(), &AppPath::new("/machines"));
        assert!(!router.back());
    }
}
