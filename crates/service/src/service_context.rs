//! Maintenance-mode flag, stored as a single `service_context` row.

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{error, info, instrument};

use models::service_context::{self, ServiceContextPatch};

use crate::errors::ServiceError;

#[derive(Clone)]
pub struct ServiceContextService {
    db: DatabaseConnection,
}

impl ServiceContextService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Current context, created with `maintenance = false` on first use.
    pub async fn get_status(&self) -> Result<service_context::Model, ServiceError> {
        Ok(service_context::get_or_create(&self.db).await?)
    }

    pub async fn is_maintenance(&self) -> Result<bool, ServiceError> {
        Ok(self.get_status().await?.maintenance)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, patch: ServiceContextPatch) -> Result<service_context::Model, ServiceError> {
        const MSG: &str = "Error updating object";
        let txn = self.db.begin().await.map_err(|e| {
            error!(error = %e, "begin failed");
            ServiceError::Persistence(MSG.into())
        })?;
        match service_context::update(&txn, patch).await {
            Ok(ctx) => {
                txn.commit().await.map_err(|e| {
                    error!(error = %e, "commit failed");
                    ServiceError::Persistence(MSG.into())
                })?;
                info!(maintenance = ctx.maintenance, "service context updated");
                Ok(ctx)
            }
            Err(e) => {
                error!(error = %e, "{MSG}");
                if let Err(rollback_err) = txn.rollback().await {
                    error!(error = %rollback_err, "rollback failed");
                }
                Err(ServiceError::Persistence(MSG.into()))
            }
        }
    }

    pub async fn activate_maintenance_mode(&self) -> Result<service_context::Model, ServiceError> {
        self.update(ServiceContextPatch { maintenance: Some(true) }).await
    }

    pub async fn deactivate_maintenance_mode(&self) -> Result<service_context::Model, ServiceError> {
        self.update(ServiceContextPatch { maintenance: Some(false) }).await
    }
}
