//! Fresh pharmacy per iteration.
use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use futures::executor::block_on;
use pharmacy_core::{
    Account, Catalog, FixedClock, LocalPharmacy, LoginForm, MemoryStore, PharmacyApi,
    PharmacyError, Role,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Data shared by every iteration.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub catalog: Catalog,
}

impl TesterAssets {
    pub fn load_default() -> Result<Self> {
        let catalog = Catalog::load_from_static().context("embedded catalog is malformed")?;
        Ok(Self { catalog })
    }
}

pub type ScenarioPharmacy = LocalPharmacy<MemoryStore, FixedClock, ChaCha8Rng>;

/// One iteration's world: the service over an empty store, plus the RNG the
/// scenario uses to pick its inputs.
pub struct Harness {
    pub pharmacy: ScenarioPharmacy,
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl Harness {
    pub fn new(assets: &Arc<TesterAssets>, seed: u64) -> Self {
        let epoch = Utc
            .with_ymd_and_hms(2024, 1, 20, 9, 0, 0)
            .single()
            .unwrap_or_default();
        let pharmacy = LocalPharmacy::new(
            MemoryStore::new(),
            FixedClock::new(epoch),
            ChaCha8Rng::seed_from_u64(seed),
            assets.catalog.clone(),
        );
        Self {
            pharmacy,
            rng: ChaCha8Rng::seed_from_u64(seed.rotate_left(32) ^ 0x5eed),
            seed,
        }
    }

    pub const fn catalog(&self) -> &Catalog {
        self.pharmacy.catalog()
    }

    pub fn login(&self, role: Role, email: &str) -> Result<Account, PharmacyError> {
        let form = LoginForm {
            role,
            email: email.to_string(),
            password: "password123".to_string(),
        };
        block_on(self.pharmacy.login(&form))
    }
}
