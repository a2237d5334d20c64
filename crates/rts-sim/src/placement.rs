//! `SiteIndex`: build-site placement backed by an R-tree of expansion sites.
//!
//! In-base builds are placed on a simple ring around the home position, and
//! a released slot is handed out again before a new one is opened.
//! Expansions claim the free candidate site nearest to home; a released site
//! becomes available again.

use std::collections::HashSet;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rts_core::{Position, UnitType};
use rts_task::{BuildLocation, Placement};
use tracing::debug;

// ── R-tree site entry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct SiteEntry {
    point: [f32; 2],
    site:  Position,
}

impl SiteEntry {
    fn new(site: Position) -> Self {
        Self { point: [site.x as f32, site.y as f32], site }
    }
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SiteEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── SiteIndex ─────────────────────────────────────────────────────────────────

pub struct SiteIndex {
    home:       Position,
    free:       RTree<SiteEntry>,
    claimed:    HashSet<Position>,
    base_slots: u32,
    slots_used: HashSet<Position>,
    slots_free: Vec<Position>,
}

impl SiteIndex {
    /// Index `candidates` as expansion sites around `home`.
    pub fn new(home: Position, candidates: impl IntoIterator<Item = Position>) -> Self {
        let entries: Vec<SiteEntry> = candidates.into_iter().map(SiteEntry::new).collect();
        Self {
            home,
            free: RTree::bulk_load(entries),
            claimed: HashSet::new(),
            base_slots: 0,
            slots_used: HashSet::new(),
            slots_free: Vec::new(),
        }
    }

    pub fn home(&self) -> Position {
        self.home
    }

    /// Expansion sites still available.
    pub fn free_sites(&self) -> usize {
        self.free.size()
    }

    pub fn is_claimed(&self, site: Position) -> bool {
        self.claimed.contains(&site)
    }

    /// In-base slots currently reserved.
    pub fn base_slots_in_use(&self) -> usize {
        self.slots_used.len()
    }

    fn take_base_slot(&mut self) -> Position {
        let slot = match self.slots_free.pop() {
            Some(slot) => slot,
            None => self.open_base_slot(),
        };
        self.slots_used.insert(slot);
        slot
    }

    fn open_base_slot(&mut self) -> Position {
        // Eight slots per ring, rings three tiles apart.
        const OFFSETS: [(i32, i32); 8] =
            [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];
        let ring = (self.base_slots / 8 + 1) as i32 * 3;
        let (dx, dy) = OFFSETS[(self.base_slots % 8) as usize];
        self.base_slots += 1;
        Position::new(self.home.x + dx * ring, self.home.y + dy * ring)
    }
}

impl Placement for SiteIndex {
    fn reserve(&mut self, unit_type: UnitType, location: BuildLocation) -> Option<Position> {
        match location {
            BuildLocation::Base => Some(self.take_base_slot()),
            BuildLocation::Expansion => {
                let home = [self.home.x as f32, self.home.y as f32];
                let entry = self.free.nearest_neighbor(&home)?.clone();
                self.free.remove(&entry);
                self.claimed.insert(entry.site);
                debug!(%unit_type, site = %entry.site, "claimed expansion site");
                Some(entry.site)
            }
        }
    }

    fn release(&mut self, site: Position) {
        if self.claimed.remove(&site) {
            debug!(%site, "released expansion site");
            self.free.insert(SiteEntry::new(site));
        } else if self.slots_used.remove(&site) {
            self.slots_free.push(site);
        }
    }
}
