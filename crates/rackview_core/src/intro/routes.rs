use crate::model::{AppPath, Section};

/// Steps of the onboarding flow, in the order a new install walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntroStep {
    /// Region name and upstream settings.
    Index,
    /// Boot image selection.
    Images,
    /// Summary, finishes the system-level intro.
    Success,
    /// Per-user intro (SSH keys), only after the system-level intro.
    UserIntro,
}

impl IntroStep {
    pub const ALL: [IntroStep; 4] = [
        IntroStep::Index,
        IntroStep::Images,
        IntroStep::Success,
        IntroStep::UserIntro,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            IntroStep::Index => "Welcome",
            IntroStep::Images => "Images",
            IntroStep::Success => "Setup complete",
            IntroStep::UserIntro => "User setup",
        }
    }

    /// The system-level step after this one, if any.
    pub fn next(&self) -> Option<IntroStep> {
        match self {
            IntroStep::Index => Some(IntroStep::Images),
            IntroStep::Images => Some(IntroStep::Success),
            IntroStep::Success | IntroStep::UserIntro => None,
        }
    }
}

/// Locations of the onboarding flow and the exit it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroRoutes {
    pub index: AppPath,
    pub images: AppPath,
    pub success: AppPath,
    pub user: AppPath,
    /// Where a finished flow lands.
    pub exit: AppPath,
}

impl Default for IntroRoutes {
    fn default() -> Self {
        let index = Section::Intro.index_path();
        Self {
            images: index.join("images"),
            success: index.join("success"),
            user: index.join("user"),
            exit: Section::Machines.index_path(),
            index,
        }
    }
}

impl IntroRoutes {
    pub fn path_for(&self, step: IntroStep) -> &AppPath {
        match step {
            IntroStep::Index => &self.index,
            IntroStep::Images => &self.images,
            IntroStep::Success => &self.success,
            IntroStep::UserIntro => &self.user,
        }
    }

    /// Whether `path` belongs to the onboarding flow at all.
    pub fn contains(&self, path: &AppPath) -> bool {
        path.is_under(&self.index)
    }

    pub fn is_user_intro(&self, path: &AppPath) -> bool {
        path.is_under(&self.user)
    }

    /// Resolve `path` to a step by matching it relative to the flow's index.
    /// Anything below the user-intro path belongs to the user step.
    pub fn step_for(&self, path: &AppPath) -> Option<IntroStep> {
        if self.is_user_intro(path) {
            return Some(IntroStep::UserIntro);
        }
        match path.relative_to(&self.index)? {
            "" => Some(IntroStep::Index),
            _ if path == &self.images => Some(IntroStep::Images),
            _ if path == &self.success => Some(IntroStep::Success),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let routes = IntroRoutes::default();
        assert_eq!(routes.index.as_str(), "/intro");
        assert_eq!(routes.images.as_str(), "/intro/images");
        assert_eq!(routes.success.as_str(), "/intro/success");
        assert_eq!(routes.user.as_str(), "/intro/user");
        assert_eq!(routes.exit.as_str(), "/machines");
    }

    #[test]
    fn test_step_for() {
        let routes = IntroRoutes::default();
        for step in IntroStep::ALL {
            assert_eq!(routes.step_for(routes.path_for(step)), Some(step));
        }
        assert_eq!(
            routes.step_for(&AppPath::new("/intro/user/keys")),
            Some(IntroStep::UserIntro)
        );
        assert_eq!(routes.step_for(&AppPath::new("/intro/bogus")), None);
        assert_eq!(routes.step_for(&AppPath::new("/machines")), None);
    }

    #[test]
    fn test_step_order() {
        assert_eq!(IntroStep::Index.next(), Some(IntroStep::Images));
        assert_eq!(IntroStep::Images.next(), Some(IntroStep::Success));
        assert_eq!(IntroStep::Success.next(), None);
    }
}
