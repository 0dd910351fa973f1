//! Protocol id → handler dispatch table.

use indexmap::IndexMap;

use fireball_core::{InitError, ProtocolId};

use crate::config::InitConfig;
use crate::protocol::InitProtocol;
use crate::protocols::{
    GlasmaFlowProfile, GlasmaTensorProfile, GubserProfile, HybridProfile,
    LongitudinalTestProfile, PreEquilibriumProfile, SourceIntegratedProfile, SourceVacuumProfile,
    ThicknessProfile,
};

/// Builds a protocol from configuration.
pub type ProtocolFactory = fn(&InitConfig) -> Result<Box<dyn InitProtocol>, InitError>;

#[derive(Clone, Copy)]
struct Entry {
    name: &'static str,
    factory: ProtocolFactory,
}

/// Registered protocols, in registration order.
#[derive(Clone)]
pub struct ProtocolRegistry {
    entries: IndexMap<ProtocolId, Entry>,
}

impl std::fmt::Debug for ProtocolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(id, e)| (id.0, e.name)))
            .finish()
    }
}

impl Default for ProtocolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProtocolRegistry {
    /// A registry with no protocols.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// All built-in protocols.
    pub fn standard() -> Self {
        let mut r = Self::empty();
        r.register(ProtocolId(0), "gubser", GubserProfile::from_config);
        r.register(ProtocolId(1), "longitudinal_1p1d", LongitudinalTestProfile::from_config);
        r.register(ProtocolId(8), "glasma_flow", GlasmaFlowProfile::from_config);
        r.register(ProtocolId(9), "glasma_tensor", GlasmaTensorProfile::from_config);
        r.register(ProtocolId(91), "glasma_energy_flow", GlasmaTensorProfile::from_config);
        r.register(ProtocolId(92), "glasma_energy", GlasmaTensorProfile::from_config);
        r.register(ProtocolId(11), "thickness", ThicknessProfile::from_config);
        r.register(ProtocolId(13), "source_vacuum", SourceVacuumProfile::from_config);
        r.register(ProtocolId(30), "source_integrated", SourceIntegratedProfile::from_config);
        r.register(ProtocolId(42), "pre_equilibrium", PreEquilibriumProfile::from_config);
        r.register(ProtocolId(101), "hybrid", HybridProfile::from_config);
        r
    }

    /// Register `factory` under `id`, returning the name it replaced.
    pub fn register(
        &mut self,
        id: ProtocolId,
        name: &'static str,
        factory: ProtocolFactory,
    ) -> Option<&'static str> {
        self.entries
            .insert(id, Entry { name, factory })
            .map(|old| old.name)
    }

    /// Whether `id` has a handler.
    pub fn contains(&self, id: ProtocolId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Name registered for `id`.
    pub fn name(&self, id: ProtocolId) -> Option<&'static str> {
        self.entries.get(&id).map(|e| e.name)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ProtocolId> + '_ {
        self.entries.keys().copied()
    }

    /// Instantiate the protocol for `cfg.protocol`.
    ///
    /// # Errors
    ///
    /// [`InitError::UnknownProtocol`] for unregistered ids, or whatever
    /// the factory reports.
    pub fn build(&self, cfg: &InitConfig) -> Result<Box<dyn InitProtocol>, InitError> {
        let entry = self
            .entries
            .get(&cfg.protocol)
            .ok_or(InitError::UnknownProtocol {
                id: cfg.protocol.0,
            })?;
        (entry.factory)(cfg)
    }
}
