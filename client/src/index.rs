use std::collections::HashMap;

use orrery_shared::{Empire, HexCoord, Movable, Sector};

/// Coordinate-keyed world state for one load.
///
/// Writers are additive; a re-load calls [`EntityIndex::clear`] first, which
/// resets every mapping in one step so readers never see a partial clear.
#[derive(Debug, Default)]
pub struct EntityIndex {
    movables: HashMap<HexCoord, Vec<Movable>>,
    sectors: HashMap<HexCoord, Sector>,
    empires: Vec<Empire>,
    empires_by_url: HashMap<String, usize>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Movables stationed at a cell; empty for cells nothing occupies.
    pub fn movables_at(&self, coord: HexCoord) -> &[Movable] {
        self.movables
            .get(&coord)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn sector_at(&self, coord: HexCoord) -> Option<&Sector> {
        self.sectors.get(&coord)
    }

    /// Every empire claiming a cell, in discovery order. Overlapping claims
    /// are legal; the renderer decides how to show them.
    pub fn owners_of(&self, coord: HexCoord) -> Vec<&Empire> {
        self.empires
            .iter()
            .filter(|empire| empire.owns(coord))
            .collect()
    }

    pub fn empire_by_url(&self, url: &str) -> Option<&Empire> {
        self.empires_by_url
            .get(url)
            .map(|&index| &self.empires[index])
    }

    pub fn empires(&self) -> &[Empire] {
        &self.empires
    }

    pub fn index_movable(&mut self, movable: Movable) {
        self.movables.entry(movable.position).or_default().push(movable);
    }

    pub fn index_sector(&mut self, sector: Sector) {
        self.sectors.insert(sector.position, sector);
    }

    /// Registers an empire with its territory. A repeated URL replaces the
    /// earlier entry in place, keeping discovery order.
    pub fn add_empire(&mut self, empire: Empire) {
        match self.empires_by_url.get(&empire.url) {
            Some(&index) => self.empires[index] = empire,
            None => {
                self.empires_by_url
                    .insert(empire.url.clone(), self.empires.len());
                self.empires.push(empire);
            }
        }
    }

    /// Extends a known empire's territory by one cell. Returns false when the
    /// empire has not been indexed yet.
    pub fn add_territory(&mut self, empire_url: &str, coord: HexCoord) -> bool {
        match self.empires_by_url.get(empire_url) {
            Some(&index) => {
                self.empires[index].territory.insert(coord);
                true
            }
            None => false,
        }
    }

    /// Drops every mapping at once, ahead of a full re-load.
    pub fn clear(&mut self) {
        self.movables.clear();
        self.sectors.clear();
        self.empires.clear();
        self.empires_by_url.clear();
    }

    pub fn movables_mut(&mut self) -> impl Iterator<Item = &mut Movable> {
        self.movables.values_mut().flat_map(|cell| cell.iter_mut())
    }

    pub fn movables(&self) -> impl Iterator<Item = &Movable> {
        self.movables.values().flat_map(|cell| cell.iter())
    }

    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.values()
    }
}
