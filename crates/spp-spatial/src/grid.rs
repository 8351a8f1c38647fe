//! `SpatialGrid` — agents binned into a periodic `W × W` grid of square cells.
//!
//! # Layout
//!
//! Cell `c = col + W * row` covers `[col·s, (col+1)·s) × [row·s, (row+1)·s)`
//! for site size `s`.  Cell contents are stored packed: all entries live in
//! one `Vec<GridEntry>` and cell `c` owns the run
//! `entries[offsets[c]..offsets[c + 1]]`.  Within a run, entries appear in
//! ascending `AgentId` order.
//!
//! The grid is rebuilt from scratch every step:
//!
//! ```text
//! pass 1: cell index per agent, count per cell
//! prefix: offsets[c + 1] = offsets[c] + counts[c]
//! pass 2: scatter each agent into its cell's run
//! ```
//!
//! No per-cell allocation happens after the first rebuild.

use spp_core::{AgentId, Vec2};

use crate::{SpatialError, SpatialResult};

/// One binned agent: its ID and the position it was binned at.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridEntry {
    pub id:       AgentId,
    pub position: Vec2,
}

/// Cell indices visited by one neighbor query: the agent's own cell first,
/// then left, right, lower, upper, and the four diagonals.
pub type Stencil = [usize; 9];

/// Periodic uniform grid over the square domain `[0, W·s)²`.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    width:     usize,
    site_size: f64,

    /// `cell_count + 1` prefix offsets into `entries`.
    offsets: Vec<u32>,
    /// Per-cell counters; reused as scatter cursors in pass 2.
    counts:  Vec<u32>,
    /// Packed cell contents.
    entries: Vec<GridEntry>,
    /// Cell index of every agent from the last rebuild, indexed by `AgentId`.
    cell_of: Vec<u32>,
    /// Positions captured in pass 1, indexed by `AgentId`.
    positions: Vec<Vec2>,
}

impl SpatialGrid {
    /// Create an empty grid of `width × width` cells of side `site_size`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::InvalidSiteSize`] if `site_size` is not finite and
    ///   positive.
    /// - [`SpatialError::SiteSmallerThanRadius`] if `site_size < interaction_radius`;
    ///   the 3×3 stencil would silently miss neighbors.
    /// - [`SpatialError::GridTooNarrow`] if `width < 3`.
    pub fn new(width: usize, site_size: f64, interaction_radius: f64) -> SpatialResult<Self> {
        if !(site_size.is_finite() && site_size > 0.0) {
            return Err(SpatialError::InvalidSiteSize(site_size));
        }
        if site_size < interaction_radius {
            return Err(SpatialError::SiteSmallerThanRadius {
                site_size,
                radius: interaction_radius,
            });
        }
        if width < 3 {
            return Err(SpatialError::GridTooNarrow(width));
        }

        let cell_count = width * width;
        Ok(Self {
            width,
            site_size,
            offsets:   vec![0; cell_count + 1],
            counts:    vec![0; cell_count],
            entries:   Vec::new(),
            cell_of:   Vec::new(),
            positions: Vec::new(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn site_size(&self) -> f64 {
        self.site_size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.width
    }

    /// Side length of the covered domain.
    #[inline]
    pub fn domain_size(&self) -> f64 {
        self.width as f64 * self.site_size
    }

    /// Number of agents binned by the last rebuild.
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.entries.len()
    }

    /// Cell containing `position`: `floor(x/s) + W * floor(y/s)`.
    ///
    /// Positions are expected in `[0, W·s)`; anything outside is clamped to
    /// the border cells.
    #[inline]
    pub fn cell_index(&self, position: Vec2) -> usize {
        // `as usize` saturates negative values to 0.
        let col = ((position.x / self.site_size) as usize).min(self.width - 1);
        let row = ((position.y / self.site_size) as usize).min(self.width - 1);
        col + self.width * row
    }

    /// `(col, row)` of cell `cell`.
    #[inline]
    pub fn cell_coords(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    /// Re-bin every agent.  `positions` yields agent positions in
    /// ascending `AgentId` order.
    pub fn rebuild<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec2>,
    {
        // ── Pass 1: count ─────────────────────────────────────────────────
        self.counts.fill(0);
        self.cell_of.clear();
        self.positions.clear();
        for position in positions {
            let cell = self.cell_index(position);
            self.counts[cell] += 1;
            self.cell_of.push(cell as u32);
            self.positions.push(position);
        }

        // ── Prefix sum → offsets ──────────────────────────────────────────
        let mut running = 0u32;
        for (cell, &count) in self.counts.iter().enumerate() {
            self.offsets[cell] = running;
            running += count;
        }
        self.offsets[self.counts.len()] = running;

        // ── Pass 2: scatter ───────────────────────────────────────────────
        let placeholder = GridEntry { id: AgentId::INVALID, position: Vec2::ZERO };
        self.entries.clear();
        self.entries.resize(self.positions.len(), placeholder);
        self.counts.fill(0); // reuse as cursor

        for (i, (&cell, &position)) in self.cell_of.iter().zip(&self.positions).enumerate() {
            let cell = cell as usize;
            let slot = (self.offsets[cell] + self.counts[cell]) as usize;
            self.entries[slot] = GridEntry { id: AgentId(i as u32), position };
            self.counts[cell] += 1;
        }
    }

    /// Agents binned in `cell` by the last rebuild, in ascending ID order.
    #[inline]
    pub fn cell(&self, cell: usize) -> &[GridEntry] {
        let start = self.offsets[cell] as usize;
        let end = self.offsets[cell + 1] as usize;
        &self.entries[start..end]
    }

    /// Cell `agent` was binned into by the last rebuild.
    ///
    /// # Panics
    /// Panics if `agent` was not part of the last rebuild.
    #[inline]
    pub fn cell_of(&self, agent: AgentId) -> usize {
        self.cell_of[agent.index()] as usize
    }

    /// The nine cells around `cell`, wrapping periodically in both axes.
    pub fn stencil(&self, cell: usize) -> Stencil {
        let w = self.width;
        let (col, row) = self.cell_coords(cell);
        let left = (col + w - 1) % w;
        let right = (col + 1) % w;
        let down = (row + w - 1) % w;
        let up = (row + 1) % w;
        [
            cell,
            left + w * row,
            right + w * row,
            col + w * down,
            col + w * up,
            left + w * down,
            right + w * down,
            left + w * up,
            right + w * up,
        ]
    }

    /// Candidate neighbors of `agent`, which sits in `own_cell`: every agent
    /// binned in the 3×3 periodic stencil around `own_cell`, except `agent`
    /// itself.
    ///
    /// Candidates still need a distance check
    /// (see `spp_agent::Agent::refresh_neighbors`).
    pub fn neighbors_of(
        &self,
        agent:    AgentId,
        own_cell: usize,
    ) -> impl Iterator<Item = (AgentId, Vec2)> + '_ {
        self.stencil(own_cell)
            .into_iter()
            .flat_map(move |c| self.cell(c).iter())
            .filter(move |e| e.id != agent)
            .map(|e| (e.id, e.position))
    }
}
