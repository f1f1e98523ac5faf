//! Bounded 2D field indexing which organism occupies each cell.

use eco_core::{Direction, Location, Occupant, OrganismKind, SimRng};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A rectangular, non-wrapping grid holding at most one occupant per cell.
///
/// Keeps a reverse index from occupant to cell so relocating an occupant
/// never leaves a stale copy behind.
#[derive(Debug, Clone)]
pub struct Field {
    depth: i32,
    width: i32,
    cells: Vec<Option<Occupant>>,
    locations: HashMap<Occupant, Location>,
}

impl Field {
    pub fn new(depth: i32, width: i32) -> Self {
        assert!(depth > 0 && width > 0, "field dimensions must be positive");
        let size = depth as usize * width as usize;
        Self {
            depth,
            width,
            cells: vec![None; size],
            locations: HashMap::new(),
        }
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn contains(&self, loc: Location) -> bool {
        (0..self.depth).contains(&loc.row) && (0..self.width).contains(&loc.col)
    }

    /// Put `occupant` at `loc`.
    ///
    /// Whatever was at `loc` is evicted and returned, and the occupant's
    /// previous cell, if any, is vacated.
    pub fn place(&mut self, occupant: Occupant, loc: Location) -> Option<Occupant> {
        let index = self.index_of(loc);

        let evicted = self.cells[index].take().filter(|prev| *prev != occupant);
        if let Some(prev) = evicted {
            self.locations.remove(&prev);
        }

        if let Some(old) = self.locations.insert(occupant, loc) {
            if old != loc {
                let old_index = self.index_of(old);
                self.cells[old_index] = None;
            }
        }

        self.cells[index] = Some(occupant);
        evicted
    }

    /// Empty `loc`, returning whoever was there.
    pub fn clear(&mut self, loc: Location) -> Option<Occupant> {
        if !self.contains(loc) {
            return None;
        }
        let index = self.index_of(loc);
        let occupant = self.cells[index].take();
        if let Some(occupant) = occupant {
            self.locations.remove(&occupant);
        }
        occupant
    }

    pub fn clear_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.locations.clear();
    }

    pub fn occupant_at(&self, loc: Location) -> Option<Occupant> {
        if !self.contains(loc) {
            return None;
        }
        self.cells[self.index_of(loc)]
    }

    pub fn is_free(&self, loc: Location) -> bool {
        self.contains(loc) && self.cells[self.index_of(loc)].is_none()
    }

    pub fn location_of(&self, occupant: &Occupant) -> Option<Location> {
        self.locations.get(occupant).copied()
    }

    /// In-bounds cells touching `loc`, shuffled on every call.
    pub fn adjacent_locations(&self, loc: Location, rng: &mut SimRng) -> Vec<Location> {
        let mut adjacent: Vec<Location> = Direction::all()
            .iter()
            .map(|dir| {
                let (d_row, d_col) = dir.to_delta();
                loc.offset(d_row, d_col)
            })
            .filter(|neighbor| self.contains(*neighbor))
            .collect();
        rng.shuffle(&mut adjacent);
        adjacent
    }

    /// Unoccupied neighbors of `loc` in random order.
    pub fn free_adjacent_locations(&self, loc: Location, rng: &mut SimRng) -> Vec<Location> {
        let mut free = self.adjacent_locations(loc, rng);
        free.retain(|neighbor| self.is_free(*neighbor));
        free
    }

    /// One unoccupied neighbor of `loc`, chosen uniformly.
    pub fn free_adjacent_location(&self, loc: Location, rng: &mut SimRng) -> Option<Location> {
        self.free_adjacent_locations(loc, rng).first().copied()
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.locations.len()
    }

    /// Occupied cells in row-major order
    pub fn occupants(&self) -> impl Iterator<Item = (Location, Occupant)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|occupant| (self.index_to_loc(i), occupant)))
    }

    /// Kind of every cell in row-major order, `None` for empty cells
    pub fn kinds(&self) -> Vec<Option<OrganismKind>> {
        self.cells
            .iter()
            .map(|cell| cell.map(|occupant| occupant.kind()))
            .collect()
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for occupant in self.cells.iter().flatten() {
            census.increment(occupant.kind());
        }
        census
    }

    fn index_of(&self, loc: Location) -> usize {
        assert!(self.contains(loc), "location {} outside the field", loc);
        (loc.row * self.width + loc.col) as usize
    }

    fn index_to_loc(&self, index: usize) -> Location {
        let row = (index as i32) / self.width;
        let col = (index as i32) % self.width;
        Location::new(row, col)
    }
}

/// Head count per organism kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census {
    counts: BTreeMap<OrganismKind, usize>,
}

impl Census {
    pub fn increment(&mut self, kind: OrganismKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    pub fn count(&self, kind: OrganismKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Kinds with at least one member
    pub fn kinds_present(&self) -> usize {
        self.counts.values().filter(|&&count| count > 0).count()
    }

    /// Worth simulating further: more than one kind is still around.
    pub fn is_viable(&self) -> bool {
        self.kinds_present() > 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrganismKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {}", kind, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::{AnimalId, PlantId, Species};
    use slotmap::KeyData;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn rabbit(index: u32) -> Occupant {
        Occupant::Animal {
            id: AnimalId::from(KeyData::from_ffi(index as u64)),
            species: Species::Rabbit,
        }
    }

    fn plant(index: u32) -> Occupant {
        Occupant::Plant {
            id: PlantId::from(KeyData::from_ffi(index as u64)),
        }
    }

    #[test]
    fn test_field_creation() {
        let field = Field::new(10, 12);
        assert_eq!(field.depth(), 10);
        assert_eq!(field.width(), 12);
        assert_eq!(field.occupied(), 0);
        assert!(field.contains(Location::new(9, 11)));
        assert!(!field.contains(Location::new(10, 0)));
        assert!(!field.contains(Location::new(0, -1)));
    }

    #[test]
    fn test_place_relocates_instead_of_duplicating() {
        let mut field = Field::new(5, 5);
        let a = rabbit(0);
        field.place(a, Location::new(1, 1));
        field.place(a, Location::new(2, 2));

        assert_eq!(field.occupant_at(Location::new(1, 1)), None);
        assert_eq!(field.occupant_at(Location::new(2, 2)), Some(a));
        assert_eq!(field.location_of(&a), Some(Location::new(2, 2)));
        assert_eq!(field.occupied(), 1);
    }

    #[test]
    fn test_place_evicts_previous_occupant() {
        let mut field = Field::new(5, 5);
        let loc = Location::new(3, 3);
        field.place(plant(0), loc);
        let evicted = field.place(rabbit(1), loc);

        assert_eq!(evicted, Some(plant(0)));
        assert_eq!(field.location_of(&plant(0)), None);
        assert_eq!(field.occupant_at(loc), Some(rabbit(1)));
    }

    #[test]
    fn test_clear() {
        let mut field = Field::new(5, 5);
        let loc = Location::new(0, 4);
        field.place(plant(7), loc);
        assert_eq!(field.clear(loc), Some(plant(7)));
        assert_eq!(field.occupant_at(loc), None);
        assert_eq!(field.location_of(&plant(7)), None);
        assert_eq!(field.clear(Location::new(-1, 0)), None);
    }

    #[test]
    fn test_neighbors() {
        let field = Field::new(10, 10);
        let mut rng = SimRng::from_seed_u64(1);

        assert_eq!(field.adjacent_locations(Location::new(5, 5), &mut rng).len(), 8);
        assert_eq!(field.adjacent_locations(Location::new(0, 0), &mut rng).len(), 3);
        assert_eq!(field.adjacent_locations(Location::new(0, 5), &mut rng).len(), 5);
        assert_eq!(field.adjacent_locations(Location::new(9, 9), &mut rng).len(), 3);
    }

    #[test]
    fn test_single_cell_field_has_no_neighbors() {
        let field = Field::new(1, 1);
        let mut rng = SimRng::default();
        assert!(field.adjacent_locations(Location::new(0, 0), &mut rng).is_empty());
        assert_eq!(field.free_adjacent_location(Location::new(0, 0), &mut rng), None);
    }

    #[test]
    fn test_free_adjacent_locations_skip_occupied() {
        let mut field = Field::new(3, 3);
        let mut rng = SimRng::from_seed_u64(2);
        let center = Location::new(1, 1);
        field.place(plant(0), Location::new(0, 0));
        field.place(plant(1), Location::new(2, 2));

        let free = field.free_adjacent_locations(center, &mut rng);
        assert_eq!(free.len(), 6);
        assert!(free.iter().all(|loc| field.is_free(*loc)));

        let mut index = 2;
        for loc in field.adjacent_locations(center, &mut rng) {
            if field.is_free(loc) {
                field.place(plant(index), loc);
                index += 1;
            }
        }
        assert_eq!(field.free_adjacent_location(center, &mut rng), None);
    }

    #[test]
    fn test_census() {
        let mut field = Field::new(4, 4);
        field.place(rabbit(0), Location::new(0, 0));
        field.place(rabbit(1), Location::new(0, 1));
        field.place(plant(0), Location::new(3, 3));

        let census = field.census();
        assert_eq!(census.count(OrganismKind::Animal(Species::Rabbit)), 2);
        assert_eq!(census.count(OrganismKind::Plant), 1);
        assert_eq!(census.count(OrganismKind::Animal(Species::Fox)), 0);
        assert_eq!(census.total(), 3);
        assert_eq!(census.to_string(), "rabbit: 2 plant: 1");
        assert!(census.is_viable());

        field.clear(Location::new(3, 3));
        assert!(!field.census().is_viable());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Place(u32, i32, i32),
        Clear(i32, i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..12, 0i32..6, 0i32..7).prop_map(|(o, r, c)| Op::Place(o, r, c)),
            (0i32..6, 0i32..7).prop_map(|(r, c)| Op::Clear(r, c)),
        ]
    }

    proptest! {
        #[test]
        fn prop_one_occupant_per_cell_and_back_references_agree(
            ops in proptest::collection::vec(op_strategy(), 0..200)
        ) {
            let mut field = Field::new(6, 7);
            for op in ops {
                match op {
                    Op::Place(o, r, c) => {
                        let occupant = if o % 2 == 0 { rabbit(o) } else { plant(o) };
                        field.place(occupant, Location::new(r, c));
                    }
                    Op::Clear(r, c) => {
                        field.clear(Location::new(r, c));
                    }
                }
            }

            let mut seen = HashSet::new();
            for (loc, occupant) in field.occupants() {
                prop_assert!(seen.insert(occupant), "occupant in two cells");
                prop_assert_eq!(field.location_of(&occupant), Some(loc));
            }
            prop_assert_eq!(seen.len(), field.occupied());
        }

        #[test]
        fn prop_adjacent_locations_are_the_bounded_ring(
            depth in 1i32..8,
            width in 1i32..8,
            row_pick in 0i32..64,
            col_pick in 0i32..64,
            seed in any::<u64>(),
        ) {
            let (row, col) = (row_pick % depth, col_pick % width);
            let field = Field::new(depth, width);
            let mut rng = SimRng::from_seed_u64(seed);
            let loc = Location::new(row, col);

            let adjacent = field.adjacent_locations(loc, &mut rng);
            let unique: HashSet<Location> = adjacent.iter().copied().collect();
            prop_assert_eq!(unique.len(), adjacent.len());
            prop_assert!(!unique.contains(&loc));

            let mut expected = HashSet::new();
            for r in row - 1..=row + 1 {
                for c in col - 1..=col + 1 {
                    let candidate = Location::new(r, c);
                    if candidate != loc && field.contains(candidate) {
                        expected.insert(candidate);
                    }
                }
            }
            prop_assert_eq!(unique, expected);
        }
    }
}
