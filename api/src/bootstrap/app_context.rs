use std::sync::Arc;

use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::ports::claim_repository::ClaimRepository;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::ports::store_health::StoreHealth;
use crate::application::ports::upload_storage_port::UploadStoragePort;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    farmer_repo: Arc<dyn FarmerRepository>,
    policy_repo: Arc<dyn PolicyRepository>,
    claim_repo: Arc<dyn ClaimRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    upload_storage: Arc<dyn UploadStoragePort>,
    store_health: Arc<dyn StoreHealth>,
}

impl AppServices {
    pub fn new(
        farmer_repo: Arc<dyn FarmerRepository>,
        policy_repo: Arc<dyn PolicyRepository>,
        claim_repo: Arc<dyn ClaimRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        upload_storage: Arc<dyn UploadStoragePort>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            farmer_repo,
            policy_repo,
            claim_repo,
            application_repo,
            upload_storage,
            store_health,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn farmer_repo(&self) -> Arc<dyn FarmerRepository> {
        self.services.farmer_repo.clone()
    }

    pub fn policy_repo(&self) -> Arc<dyn PolicyRepository> {
        self.services.policy_repo.clone()
    }

    pub fn claim_repo(&self) -> Arc<dyn ClaimRepository> {
        self.services.claim_repo.clone()
    }

    pub fn application_repo(&self) -> Arc<dyn ApplicationRepository> {
        self.services.application_repo.clone()
    }

    pub fn upload_storage(&self) -> Arc<dyn UploadStoragePort> {
        self.services.upload_storage.clone()
    }

    pub fn store_health(&self) -> Arc<dyn StoreHealth> {
        self.services.store_health.clone()
    }
}
