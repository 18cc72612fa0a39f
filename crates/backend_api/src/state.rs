use std::sync::Arc;

use debt_engine::PayoffEngine;
use household::{InviteService, RolePermissionTable};
use models::Settings;

use crate::repository::DataRepository;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: PayoffEngine,
    pub permissions: Arc<RolePermissionTable>,
    pub invites: Arc<InviteService>,
    pub repo: Arc<dyn DataRepository>,
}

impl AppState {
    pub fn new(
        engine: PayoffEngine,
        permissions: RolePermissionTable,
        invites: InviteService,
        repo: Arc<dyn DataRepository>,
    ) -> Self {
        Self {
            engine,
            permissions: Arc::new(permissions),
            invites: Arc::new(invites),
            repo,
        }
    }

    /// Builds the state from loaded settings with the standard role table.
    pub fn from_settings(settings: &Settings, repo: Arc<dyn DataRepository>) -> anyhow::Result<Self> {
        let invites = InviteService::new(&settings.invites.secret, settings.invites.validity_days)?;
        Ok(Self::new(
            PayoffEngine::new(settings.payoff.max_months),
            RolePermissionTable::standard(),
            invites,
            repo,
        ))
    }
}
