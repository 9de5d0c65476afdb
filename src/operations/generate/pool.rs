use std::collections::HashSet;

use slotmap::SlotMap;

use crate::geometry::Chain;
use crate::math::Point3;

/// Role flags for one admitted vertex.
#[derive(Debug, Clone, Copy)]
struct Roles {
    unused: bool,
    endpoint: bool,
    blocked: bool,
    active: bool,
}

impl Default for Roles {
    fn default() -> Self {
        Self {
            unused: true,
            endpoint: false,
            blocked: false,
            active: false,
        }
    }
}

/// Classification of every admitted vertex during one generation run.
///
/// Vertices are referred to by their index in the admitted list.
#[derive(Debug)]
pub(super) struct PointPool {
    roles: Vec<Roles>,
    endpoint_order: Vec<usize>,
}

impl PointPool {
    pub(super) fn new(count: usize) -> Self {
        Self {
            roles: vec![Roles::default(); count],
            endpoint_order: Vec::new(),
        }
    }

    /// The search universe: `(unused ∪ endpoint) − blocked − active`.
    ///
    /// Unused vertices come first in admission order, followed by endpoints
    /// in the order they were recorded.
    pub(super) fn available(&self) -> Vec<usize> {
        let unused = self
            .roles
            .iter()
            .enumerate()
            .filter(|(_, r)| r.unused)
            .map(|(i, _)| i);
        unused
            .chain(self.endpoint_order.iter().copied())
            .filter(|&i| !self.roles[i].blocked && !self.roles[i].active)
            .collect()
    }

    pub(super) fn is_unused(&self, i: usize) -> bool {
        self.roles[i].unused
    }

    pub(super) fn take(&mut self, i: usize) {
        self.roles[i].unused = false;
    }

    /// Marks `i` as an endpoint, or as blocked if it already was one.
    ///
    /// Returns `true` if the vertex became blocked.
    pub(super) fn record_endpoint(&mut self, i: usize) -> bool {
        let roles = &mut self.roles[i];
        if roles.endpoint {
            roles.blocked = true;
            true
        } else {
            roles.endpoint = true;
            self.endpoint_order.push(i);
            false
        }
    }

    pub(super) fn activate(&mut self, i: usize) {
        self.roles[i].active = true;
    }

    pub(super) fn clear_active(&mut self) {
        for r in &mut self.roles {
            r.active = false;
        }
    }
}

slotmap::new_key_type! {
    /// Identifier for a chain under construction.
    pub(super) struct ChainId;
}

/// Chains built so far, with a per-vertex membership index.
#[derive(Debug)]
pub(super) struct ChainStore {
    chains: SlotMap<ChainId, Vec<usize>>,
    order: Vec<ChainId>,
    membership: Vec<Vec<ChainId>>,
}

impl ChainStore {
    pub(super) fn new(count: usize) -> Self {
        Self {
            chains: SlotMap::with_key(),
            order: Vec::new(),
            membership: vec![Vec::new(); count],
        }
    }

    /// Starts a new chain at `seed`.
    pub(super) fn create(&mut self, seed: usize) -> ChainId {
        let id = self.chains.insert(vec![seed]);
        self.order.push(id);
        self.membership[seed].push(id);
        id
    }

    pub(super) fn push(&mut self, id: ChainId, i: usize) {
        if let Some(chain) = self.chains.get_mut(id) {
            chain.push(i);
            self.membership[i].push(id);
        }
    }

    pub(super) fn points(&self, id: ChainId) -> &[usize] {
        self.chains.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Chains that contain vertex `i`.
    pub(super) fn chains_of(&self, i: usize) -> &[ChainId] {
        &self.membership[i]
    }

    /// Removes a chain and every membership entry pointing at it.
    pub(super) fn discard(&mut self, id: ChainId) {
        if let Some(points) = self.chains.remove(id) {
            for i in points {
                self.membership[i].retain(|&c| c != id);
            }
            self.order.retain(|&c| c != id);
        }
    }

    /// Vertices other than `i` that share a chain with it.
    pub(super) fn partners(&self, i: usize) -> HashSet<usize> {
        self.membership[i]
            .iter()
            .filter_map(|&id| self.chains.get(id))
            .flatten()
            .copied()
            .filter(|&j| j != i)
            .collect()
    }

    /// Resolves the stored chains into point chains, in creation order.
    pub(super) fn into_chains(self, points: &[Point3]) -> Vec<Chain> {
        self.order
            .iter()
            .filter_map(|&id| self.chains.get(id))
            .map(|indices| Chain::from_points(indices.iter().map(|&i| points[i]).collect()))
            .collect()
    }
}
