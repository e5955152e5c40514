use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::error;

use crate::models::identity::Identity;
use crate::models::profile::Profile;
use crate::models::role::Role;
use crate::services::profile_service::ProfileService;
use crate::services::session::{SessionProvider, SubscriptionHandle};

/// Destination after authentication state resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Landing,
    Login,
    CandidateDashboard,
    EmployerDashboard,
    AdminDashboard,
}

/// The single role table used by every screen.
pub fn route_for_role(role: Role) -> Route {
    match role {
        Role::Candidate => Route::CandidateDashboard,
        Role::Employer => Route::EmployerDashboard,
        Role::Admin => Route::AdminDashboard,
    }
}

/// Missing profiles, missing roles and unrecognised values all land on `Landing`.
pub fn route_for_profile(profile: Option<&Profile>) -> Route {
    profile
        .and_then(Profile::role)
        .map_or(Route::Landing, route_for_role)
}

#[derive(Clone)]
pub struct RoleRouter {
    profiles: ProfileService,
}

impl RoleRouter {
    pub fn new(profiles: ProfileService) -> Self {
        Self { profiles }
    }

    pub async fn route_for(&self, identity: Option<&Identity>) -> Route {
        let Some(identity) = identity else {
            return Route::Login;
        };
        match self.profiles.get(identity.uid()).await {
            Ok(profile) => route_for_profile(profile.as_ref()),
            Err(e) => {
                error!("Error fetching profile for {}: {}", identity, e);
                Route::Landing
            }
        }
    }

    /// Emits one route per auth transition of `session` until the handle is
    /// unsubscribed. Routes resolved after teardown are dropped.
    pub fn follow(&self, session: &SessionProvider) -> (SubscriptionHandle, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let router = self.clone();
        let handle = session.on_change(move |identity, live| {
            let router = router.clone();
            let tx = tx.clone();
            async move {
                let route = router.route_for(identity.as_ref()).await;
                if live.is_alive() {
                    let _ = tx.send(route);
                }
            }
        });
        (handle, rx)
    }
}
