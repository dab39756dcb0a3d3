//! Settings-route access gate.
//!
//! For each navigation to a protected destination the front end asks
//! one question: render, wait, or redirect where? The answer is a pure
//! function of authentication state, subscription state, and the
//! requested path. No decision is cached across navigations, because
//! subscription state can change out-of-band (a billing webhook can
//! lapse or revive a plan between two clicks).
//!
//! A failed subscription fetch is mapped by the caller to "status
//! unavailable" before calling [`decide`]: the gate then fails toward
//! the restrictive activation path, never toward open access.

use crate::domain::subscription::SubscriptionStatus;

/// Route destinations the gate can send a user to.
pub mod destinations {
    /// Login page; unauthenticated users land here
    pub const LOGIN: &str = "/login";

    /// First-time plan selection for accounts with no paid history
    pub const ACTIVATION: &str = "/activate";

    /// Plan resumption for accounts with a lapsed paid plan
    pub const REACTIVATION: &str = "/settings/reactivate";

    /// Default settings destination for accounts with an active plan
    pub const SUBSCRIPTION: &str = "/settings/subscription";
}

/// Inputs to one gate evaluation.
#[derive(Debug, Clone)]
pub struct GateInput<'a> {
    /// Whether a valid session token is held
    pub is_authenticated: bool,

    /// Whether the session check is still in flight
    pub is_auth_loading: bool,

    /// Freshly fetched subscription status; `None` when the account has
    /// no subscription record or the fetch failed
    pub subscription: Option<&'a SubscriptionStatus>,

    /// Whether the subscription fetch is still in flight
    pub is_subscription_loading: bool,

    /// The protected path the user is navigating to
    pub requested_path: &'a str,
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Inputs still loading; show a placeholder, decide nothing yet
    Pending,

    /// Render the requested destination
    Render,

    /// Send to login, remembering where the user was headed so the
    /// navigation can resume after authentication
    RedirectToLogin { resume_path: String },

    /// Send to a subscription destination
    Redirect { to: &'static str },
}

/// Decide whether a navigation may proceed. Rules are evaluated in
/// order; the first match wins.
pub fn decide(input: &GateInput) -> GateDecision {
    // 1. Suspend while either input is unresolved; redirecting on a
    //    half-loaded state flashes the wrong page.
    if input.is_auth_loading || input.is_subscription_loading {
        return GateDecision::Pending;
    }

    // 2. Authentication precedes everything else.
    if !input.is_authenticated {
        return GateDecision::RedirectToLogin {
            resume_path: input.requested_path.to_string(),
        };
    }

    // 3. No subscription record (or the fetch failed): the only place
    //    to go is activation. The already-there check breaks the loop.
    let Some(subscription) = input.subscription else {
        return redirect_unless_at(input.requested_path, destinations::ACTIVATION);
    };

    if subscription.is_active {
        // 4. An active plan has nothing to activate or reactivate.
        if input.requested_path == destinations::ACTIVATION
            || input.requested_path == destinations::REACTIVATION
        {
            return GateDecision::Redirect {
                to: destinations::SUBSCRIPTION,
            };
        }
        return GateDecision::Render;
    }

    // 5. Inactive: lapsed plans resume, fresh accounts activate.
    if subscription.has_history {
        redirect_unless_at(input.requested_path, destinations::REACTIVATION)
    } else {
        redirect_unless_at(input.requested_path, destinations::ACTIVATION)
    }
}

fn redirect_unless_at(requested_path: &str, to: &'static str) -> GateDecision {
    if requested_path == to {
        GateDecision::Render
    } else {
        GateDecision::Redirect { to }
    }
}
