//! Onboarding guard tests

use crate::intro::{IntroGuard, IntroRoutes, NavigationDecision, RenderChoice};
use crate::model::{AppPath, SessionFacts};

fn resolved_admin(path: &str) -> SessionFacts {
    SessionFacts {
        is_admin: true,
        ..Default::default()
    }
    .at(path)
}

fn redirect(path: &str) -> NavigationDecision {
    NavigationDecision::RedirectTo {
        path: AppPath::new(path),
        replace: true,
    }
}

#[test]
fn test_admin_on_images_step_renders_it() {
    let guard = IntroGuard::default();
    let outcome = guard.evaluate(&resolved_admin("/intro/images"));

    assert_eq!(outcome.render, RenderChoice::Step(AppPath::new("/intro/images")));
    assert_eq!(outcome.decision, NavigationDecision::None);
}

#[test]
fn test_loading_wins_over_everything() {
    let guard = IntroGuard::default();
    for config_loading in [false, true] {
        for is_admin in [false, true] {
            for completed_intro in [false, true] {
                for completed_user_intro in [false, true] {
                    let facts = SessionFacts {
                        auth_loading: true,
                        config_loading,
                        is_admin,
                        completed_intro,
                        completed_user_intro,
                        current_path: AppPath::new("/intro/user"),
                    };
                    let outcome = guard.evaluate(&facts);
                    assert_eq!(outcome.render, RenderChoice::Loading);
                    assert_eq!(outcome.decision, NavigationDecision::None);
                }
            }
        }
    }

    let config_only = SessionFacts {
        config_loading: true,
        is_admin: true,
        ..Default::default()
    };
    assert_eq!(guard.evaluate(&config_only).render, RenderChoice::Loading);
}

#[test]
fn test_non_admin_blocked_before_intro() {
    let guard = IntroGuard::default();
    for path in ["/intro", "/intro/images", "/intro/user"] {
        let facts = SessionFacts::default().at(path);
        let outcome = guard.evaluate(&facts);
        assert_eq!(outcome.render, RenderChoice::Blocked);
        assert_eq!(outcome.decision, NavigationDecision::None);
    }
}

#[test]
fn test_exit_when_everything_complete() {
    let guard = IntroGuard::default();
    for path in ["/intro", "/intro/images", "/intro/success", "/intro/user", "/elsewhere"] {
        for is_admin in [false, true] {
            let facts = SessionFacts {
                is_admin,
                completed_intro: true,
                completed_user_intro: true,
                ..Default::default()
            }
            .at(path);
            assert_eq!(guard.evaluate(&facts).decision, redirect("/machines"));
        }
    }
}

#[test]
fn test_user_intro_requires_system_intro() {
    let guard = IntroGuard::default();
    for path in ["/intro/user", "/intro/user/keys"] {
        let outcome = guard.evaluate(&resolved_admin(path));
        assert_eq!(outcome.decision, redirect("/intro"));
    }
}

#[test]
fn test_completed_intro_forces_user_step() {
    let guard = IntroGuard::default();
    for is_admin in [false, true] {
        for path in ["/intro", "/intro/images", "/intro/success", "/intro/users"] {
            let facts = SessionFacts {
                is_admin,
                completed_intro: true,
                ..Default::default()
            }
            .at(path);
            assert_eq!(guard.evaluate(&facts).decision, redirect("/intro/user"));
        }
    }
}

#[test]
fn test_non_admin_reaches_user_intro_after_system_intro() {
    let guard = IntroGuard::default();
    let facts = SessionFacts {
        completed_intro: true,
        ..Default::default()
    }
    .at("/intro/user");
    let outcome = guard.evaluate(&facts);

    assert_eq!(outcome.render, RenderChoice::Step(AppPath::new("/intro/user")));
    assert_eq!(outcome.decision, NavigationDecision::None);
}

#[test]
fn test_redirects_always_replace() {
    let guard = IntroGuard::default();
    for bits in 0u8..32 {
        for path in ["/intro", "/intro/user", "/intro/images"] {
            let facts = facts_from_bits(bits, path);
            if let NavigationDecision::RedirectTo { replace, .. } = guard.evaluate(&facts).decision {
                assert!(replace);
            }
        }
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let guard = IntroGuard::default();
    for bits in 0u8..32 {
        for path in ["/intro", "/intro/user", "/intro/success", "/"] {
            let facts = facts_from_bits(bits, path);
            let first = guard.evaluate(&facts);
            let second = guard.evaluate(&facts);
            let third = guard.evaluate(&facts);
            assert_eq!(first, second);
            assert_eq!(second, third);
        }
    }
}

fn facts_from_bits(bits: u8, path: &str) -> SessionFacts {
    SessionFacts {
        auth_loading: bits & 0b00001 != 0,
        config_loading: bits & 0b00010 != 0,
        is_admin: bits & 0b00100 != 0,
        completed_intro: bits & 0b01000 != 0,
        completed_user_intro: bits & 0b10000 != 0,
        current_path: AppPath::new(path),
    }
}

/// Every combination of the five inputs, checked against the table written
/// out longhand.
#[test]
fn test_full_decision_table() {
    let guard = IntroGuard::default();
    let routes = IntroRoutes::default();

    for bits in 0u8..32 {
        for path in ["/intro", "/intro/images", "/intro/success", "/intro/user", "/intro/user/x"] {
            let facts = facts_from_bits(bits, path);
            let outcome = guard.evaluate(&facts);
            let on_user = AppPath::new(path).is_under(&routes.user);

            let (render, decision) = if facts.auth_loading || facts.config_loading {
                (RenderChoice::Loading, NavigationDecision::None)
            } else if !facts.completed_intro && !facts.is_admin {
                (RenderChoice::Blocked, NavigationDecision::None)
            } else {
                let step = RenderChoice::Step(AppPath::new(path));
                match (facts.completed_intro, facts.completed_user_intro, on_user) {
                    (true, true, _) => (step, redirect("/machines")),
                    (false, _, true) => (step, redirect("/intro")),
                    (true, false, false) => (step, redirect("/intro/user")),
                    _ => (step, NavigationDecision::None),
                }
            };

            assert_eq!(outcome.render, render, "bits={bits:05b} path={path}");
            assert_eq!(outcome.decision, decision, "bits={bits:05b} path={path}");
        }
    }
}

#[test]
fn test_custom_routes() {
    let routes = IntroRoutes {
        index: AppPath::new("/setup"),
        images: AppPath::new("/setup/images"),
        success: AppPath::new("/setup/done"),
        user: AppPath::new("/setup/me"),
        exit: AppPath::new("/dashboard"),
    };
    let guard = IntroGuard::new(routes);
    let facts = SessionFacts {
        is_admin: true,
        completed_intro: true,
        ..Default::default()
    }
    .at("/setup/images");

    assert_eq!(guard.evaluate(&facts).decision, redirect("/setup/me"));
}

#[test]
fn test_entry_redirect() {
    let guard = IntroGuard::default();

    let fresh = resolved_admin("/machines");
    assert_eq!(guard.entry_redirect(&fresh), redirect("/intro"));

    let owes_user_step = SessionFacts {
        completed_intro: true,
        ..Default::default()
    }
    .at("/tags");
    assert_eq!(guard.entry_redirect(&owes_user_step), redirect("/intro/user"));

    let done = SessionFacts {
        completed_intro: true,
        completed_user_intro: true,
        ..Default::default()
    }
    .at("/tags");
    assert_eq!(guard.entry_redirect(&done), NavigationDecision::None);

    let loading = SessionFacts {
        auth_loading: true,
        ..Default::default()
    }
    .at("/tags");
    assert_eq!(guard.entry_redirect(&loading), NavigationDecision::None);

    let inside = resolved_admin("/intro/images");
    assert_eq!(guard.entry_redirect(&inside), NavigationDecision::None);
}
