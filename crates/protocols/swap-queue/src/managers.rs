//! Version-dispatched managers
//!
//! Holds the per-block collaborators (constants, swapper, swap queue,
//! outbound store, events) and swaps implementations when the protocol
//! version changes. The store itself is never held here; it is passed to every
//! call.

use std::rc::Rc;

use amm::{get_swapper, AmmError, Swapper};
use outbound::TxOutStore;
use swapline_core::{ConstantValues, Network, Version};
use swapline_store::Keeper;
use thiserror::Error;

use crate::errors::SwapError;
use crate::events::EventManager;
use crate::queue::{get_swap_queue, SwapQueue};

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),

    #[error("core error: {0}")]
    Core(#[from] swapline_core::Error),

    #[error("amm error: {0}")]
    Amm(#[from] AmmError),
}

impl ManagerError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion(_) => "unsupported_version",
            Self::Core(e) => e.error_code(),
            Self::Amm(e) => e.error_code(),
        }
    }
}

pub struct Managers {
    version: Version,
    network: Network,
    constants: ConstantValues,
    swapper: Rc<dyn Swapper>,
    swap_queue: Rc<dyn SwapQueue>,
    tx_out: TxOutStore,
    events: EventManager,
}

impl Managers {
    pub fn new(version: Version, network: Network) -> Result<Self, ManagerError> {
        Ok(Self {
            constants: ConstantValues::for_version(&version, network)?,
            swapper: get_swapper(&version)?,
            swap_queue: get_swap_queue(&version)?,
            tx_out: TxOutStore::new(),
            events: EventManager::new(),
            version,
            network,
        })
    }

    /// Managers for the version and network the store reports
    pub fn from_keeper(keeper: &dyn Keeper) -> Result<Self, ManagerError> {
        Self::new(keeper.version(), keeper.network())
    }

    /// Re-select implementations when the active version moved
    pub fn begin_block(&mut self, keeper: &dyn Keeper) -> Result<(), ManagerError> {
        let version = keeper.version();
        let network = keeper.network();
        if version == self.version && network == self.network {
            return Ok(());
        }

        self.constants = ConstantValues::for_version(&version, network)?;
        self.swapper = get_swapper(&version)?;
        self.swap_queue = get_swap_queue(&version)?;
        tracing::info!(
            from = %self.version,
            to = %version,
            network = %network,
            "Protocol version changed, managers reloaded"
        );
        self.version = version;
        self.network = network;
        Ok(())
    }

    /// Run the swap queue for the block
    pub fn end_block(&mut self, keeper: &mut dyn Keeper) -> Result<(), SwapError> {
        let queue = Rc::clone(&self.swap_queue);
        queue.end_block(keeper, self)
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn constants(&self) -> &ConstantValues {
        &self.constants
    }

    pub fn swapper(&self) -> Rc<dyn Swapper> {
        Rc::clone(&self.swapper)
    }

    pub fn swap_queue(&self) -> Rc<dyn SwapQueue> {
        Rc::clone(&self.swap_queue)
    }

    pub fn tx_out_store(&self) -> &TxOutStore {
        &self.tx_out
    }

    pub fn tx_out_store_mut(&mut self) -> &mut TxOutStore {
        &mut self.tx_out
    }

    pub fn events(&self) -> &EventManager {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }
}
