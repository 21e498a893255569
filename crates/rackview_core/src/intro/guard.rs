//! Onboarding guard.
//!
//! [`IntroGuard::evaluate`] is a pure function of [`SessionFacts`]. The decision
//! table, first match wins:
//!
//! | facts                                             | render        | navigation          |
//! |---------------------------------------------------|---------------|---------------------|
//! | auth or config loading                            | `Loading`     | none                |
//! | intro incomplete, not admin                       | `Blocked`     | none                |
//! | intro and user intro complete                     | `Step(path)`  | replace → exit      |
//! | under user intro, intro incomplete                | `Step(path)`  | replace → index     |
//! | not under user intro, intro complete              | `Step(path)`  | replace → user      |
//! | otherwise                                         | `Step(path)`  | none                |
//!
//! The caller renders `render` and performs `decision` after the render pass.

use crate::model::{AppPath, SessionFacts};

use super::IntroRoutes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    None,
    RedirectTo { path: AppPath, replace: bool },
}

impl NavigationDecision {
    fn replace(path: &AppPath) -> Self {
        NavigationDecision::RedirectTo {
            path: path.clone(),
            replace: true,
        }
    }

    pub fn target(&self) -> Option<&AppPath> {
        match self {
            NavigationDecision::None => None,
            NavigationDecision::RedirectTo { path, .. } => Some(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderChoice {
    Loading,
    Blocked,
    Step(AppPath),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroOutcome {
    pub decision: NavigationDecision,
    pub render: RenderChoice,
}

#[derive(Debug, Clone, Default)]
pub struct IntroGuard {
    routes: IntroRoutes,
}

impl IntroGuard {
    pub fn new(routes: IntroRoutes) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &IntroRoutes {
        &self.routes
    }

    pub fn evaluate(&self, facts: &SessionFacts) -> IntroOutcome {
        if facts.is_loading() {
            return IntroOutcome {
                decision: NavigationDecision::None,
                render: RenderChoice::Loading,
            };
        }

        if !facts.completed_intro && !facts.is_admin {
            return IntroOutcome {
                decision: NavigationDecision::None,
                render: RenderChoice::Blocked,
            };
        }

        let on_user_intro = self.routes.is_user_intro(&facts.current_path);
        let decision = if facts.completed_intro && facts.completed_user_intro {
            NavigationDecision::replace(&self.routes.exit)
        } else if on_user_intro && !facts.completed_intro {
            NavigationDecision::replace(&self.routes.index)
        } else if !on_user_intro && facts.completed_intro {
            NavigationDecision::replace(&self.routes.user)
        } else {
            NavigationDecision::None
        };

        if let Some(target) = decision.target() {
            tracing::trace!(from = %facts.current_path, to = %target, "intro redirect decided");
        }

        IntroOutcome {
            decision,
            render: RenderChoice::Step(facts.current_path.clone()),
        }
    }

    /// Gate for locations outside the onboarding flow: sends an install whose
    /// intro is unfinished back into the flow at the step it still owes.
    pub fn entry_redirect(&self, facts: &SessionFacts) -> NavigationDecision {
        if facts.is_loading() || self.routes.contains(&facts.current_path) {
            return NavigationDecision::None;
        }
        if !facts.completed_intro {
            NavigationDecision::replace(&self.routes.index)
        } else if !facts.completed_user_intro {
            NavigationDecision::replace(&self.routes.user)
        } else {
            NavigationDecision::None
        }
    }
}
