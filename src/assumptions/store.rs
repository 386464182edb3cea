//! Per-user assumption profiles

use super::Assumptions;
use std::collections::HashMap;

/// Identifier of an authenticated user
pub type UserId = u64;

/// Supplies the assumption profile for a (possibly anonymous) user
pub trait AssumptionStore {
    /// Saved profile for `user`, or the defaults when there is none
    fn assumptions_for(&self, user: Option<UserId>) -> Assumptions;

    /// Persist a profile for `user`, replacing any previous one
    fn save(&mut self, user: UserId, assumptions: Assumptions);
}

/// HashMap-backed store with a configurable fallback profile
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssumptionStore {
    profiles: HashMap<UserId, Assumptions>,
    fallback: Assumptions,
}

impl InMemoryAssumptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `fallback` for anonymous users and users without a profile
    pub fn with_fallback(fallback: Assumptions) -> Self {
        Self {
            profiles: HashMap::new(),
            fallback,
        }
    }

    pub fn has_profile(&self, user: UserId) -> bool {
        self.profiles.contains_key(&user)
    }
}

impl AssumptionStore for InMemoryAssumptionStore {
    fn assumptions_for(&self, user: Option<UserId>) -> Assumptions {
        match user.and_then(|id| self.profiles.get(&id)) {
            Some(profile) => {
                log::debug!("using saved assumptions for user {:?}", user);
                profile.clone()
            }
            None => {
                log::debug!("using default assumptions");
                self.fallback.clone()
            }
        }
    }

    fn save(&mut self, user: UserId, assumptions: Assumptions) {
        self.profiles.insert(user, assumptions);
    }
}
