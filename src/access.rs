// src/access.rs
//! Route and feature access decisions for the signed-in user

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::app_log;
use crate::session::SessionState;
use crate::types::{User, UserType};

pub const HOME_ROUTE: &str = "/";
pub const CANDIDATE_DASHBOARD_ROUTE: &str = "/dashboard";
pub const COMPANY_DASHBOARD_ROUTE: &str = "/dashboard-empresa";

const DEFAULT_UPGRADE_MESSAGE: &str = "Assine para ter acesso completo a esta funcionalidade";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still loading; show a placeholder.
    Loading,
    Redirect(&'static str),
    Allow,
}

/// Restricts a route to some user types. An empty list admits any signed-in user.
#[derive(Debug, Clone, Default)]
pub struct RoleGuard {
    allowed_roles: Vec<UserType>,
}

impl RoleGuard {
    pub fn new(allowed_roles: Vec<UserType>) -> Self {
        Self { allowed_roles }
    }

    pub fn decide(&self, session: &SessionState) -> GuardDecision {
        if session.is_loading {
            return GuardDecision::Loading;
        }

        let user = match session.user() {
            Some(user) if session.is_authenticated() => user,
            _ => return GuardDecision::Redirect(HOME_ROUTE),
        };

        let user_type = user.user_type();
        if !self.allowed_roles.is_empty() && !self.allowed_roles.contains(&user_type) {
            app_log!(debug, "Route not allowed for {:?}, redirecting", user_type);
            return GuardDecision::Redirect(dashboard_route(user_type));
        }

        GuardDecision::Allow
    }
}

pub fn dashboard_route(user_type: UserType) -> &'static str {
    match user_type {
        UserType::Company => COMPANY_DASHBOARD_ROUTE,
        UserType::Candidate => CANDIDATE_DASHBOARD_ROUTE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Jobs,
    Profile,
    DiscTest,
    Interview,
    Trilhas,
    JobGenerator,
}

impl Feature {
    pub fn is_premium(&self) -> bool {
        matches!(self, Feature::Trilhas | Feature::JobGenerator)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Jobs => "jobs",
            Feature::Profile => "profile",
            Feature::DiscTest => "disc_test",
            Feature::Interview => "interview",
            Feature::Trilhas => "trilhas",
            Feature::JobGenerator => "job_generator",
        };
        f.write_str(name)
    }
}

impl FromStr for Feature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "jobs" | "vagas" => Ok(Feature::Jobs),
            "profile" | "perfil" => Ok(Feature::Profile),
            "disc_test" | "disc" => Ok(Feature::DiscTest),
            "interview" | "entrevista" => Ok(Feature::Interview),
            "trilhas" => Ok(Feature::Trilhas),
            "job_generator" => Ok(Feature::JobGenerator),
            other => anyhow::bail!("Unknown feature: {}", other),
        }
    }
}

/// Free features are open to everyone; premium ones need an active subscription.
pub fn can_access_feature(user: Option<&User>, feature: Feature) -> bool {
    !feature.is_premium() || user.is_some_and(User::has_active_subscription)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// Replace the content with an upgrade card.
    #[default]
    Block,
    /// Show the content blurred behind the upgrade prompt.
    Blur,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum PremiumAccess {
    Granted,
    Fallback,
    Hidden,
    UpgradePrompt { mode: LockMode, message: String },
}

#[derive(Debug, Clone)]
pub struct PremiumGate {
    pub feature: Feature,
    pub has_fallback: bool,
    pub show_upgrade_prompt: bool,
    pub mode: LockMode,
    pub upgrade_message: String,
}

impl PremiumGate {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            has_fallback: false,
            show_upgrade_prompt: true,
            mode: LockMode::default(),
            upgrade_message: DEFAULT_UPGRADE_MESSAGE.to_string(),
        }
    }

    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    pub fn with_mode(mut self, mode: LockMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn without_prompt(mut self) -> Self {
        self.show_upgrade_prompt = false;
        self
    }

    pub fn decide(&self, user: Option<&User>) -> PremiumAccess {
        if can_access_feature(user, self.feature) {
            PremiumAccess::Granted
        } else if self.has_fallback {
            PremiumAccess::Fallback
        } else if !self.show_upgrade_prompt {
            PremiumAccess::Hidden
        } else {
            PremiumAccess::UpgradePrompt {
                mode: self.mode,
                message: self.upgrade_message.clone(),
            }
        }
    }
}

/// Role helpers over the current session.
pub struct UserPermissions<'a> {
    session: &'a SessionState,
}

impl<'a> UserPermissions<'a> {
    pub fn new(session: &'a SessionState) -> Self {
        Self { session }
    }

    fn user_type(&self) -> Option<UserType> {
        self.session.user().map(User::user_type)
    }

    pub fn has_role(&self, role: UserType) -> bool {
        self.user_type() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[UserType]) -> bool {
        self.user_type().is_some_and(|t| roles.contains(&t))
    }

    pub fn can_access_company_features(&self) -> bool {
        self.session.is_authenticated() && self.has_role(UserType::Company)
    }

    pub fn can_access_candidate_features(&self) -> bool {
        self.session.is_authenticated() && self.has_role(UserType::Candidate)
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_authenticated()
            && self
                .session
                .user()
                .and_then(|u| u.role.as_deref())
                .is_some_and(|role| role == "admin")
    }
}
