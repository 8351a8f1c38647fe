//! `AgentStore` — the single owner of all agents.
//!
//! Agents live in one contiguous `Vec` and are never freed individually;
//! an agent's `AgentId` is its index and stays valid for the whole run.
//! Everything else (grid cells, neighbor lists) refers to agents by ID.

use std::ops::{Index, IndexMut};

use spp_core::{AgentId, Vec2};

use crate::Agent;

/// Contiguous, stably indexed agent collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    /// Wrap hand-built agents; agent `i` gets `AgentId(i)`.
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Agent> {
        self.agents.iter_mut()
    }

    /// `(AgentId, &Agent)` pairs in ascending ID order.
    pub fn enumerate(&self) -> impl Iterator<Item = (AgentId, &Agent)> + '_ {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, a)| (AgentId(i as u32), a))
    }

    /// Overwrite `buf` with every agent's current velocity, indexed by ID.
    ///
    /// The flock calls this once per step to freeze pre-step velocities
    /// before any pending heading is computed.  `buf` keeps its capacity.
    pub fn snapshot_velocities(&self, buf: &mut Vec<Vec2>) {
        buf.clear();
        buf.extend(self.agents.iter().map(|a| a.velocity));
    }

    /// Vector sum of all velocities.
    pub fn velocity_sum(&self) -> Vec2 {
        self.agents.iter().map(|a| a.velocity).sum()
    }
}

impl Index<AgentId> for AgentStore {
    type Output = Agent;
    #[inline]
    fn index(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }
}

impl IndexMut<AgentId> for AgentStore {
    #[inline]
    fn index_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }
}

impl<'a> IntoIterator for &'a AgentStore {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;
    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}
