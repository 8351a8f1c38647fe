//! Plain data row types written by output backends.

use spp_agent::Agent;
use spp_core::Step;

/// One point of the order-parameter time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderParameterRow {
    /// Completed steps at the time of measurement.
    pub step:            u64,
    pub order_parameter: f64,
}

/// Position and velocity of one agent at a given step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub step:     u64,
    pub x:        f64,
    pub y:        f64,
    pub vx:       f64,
    pub vy:       f64,
}

impl AgentSnapshotRow {
    pub fn from_agent(agent_id: u32, step: Step, agent: &Agent) -> Self {
        Self {
            agent_id,
            step: step.0,
            x:    agent.position.x,
            y:    agent.position.y,
            vx:   agent.velocity.x,
            vy:   agent.velocity.y,
        }
    }
}
