//! Weighted maps of named locations.
//!
//! A `MapSpace` is a directed graph whose vertices are named locations,
//! optionally placed on a plane, and whose arcs carry non-negative travel
//! costs. Roads are just a pair of arcs with the same cost.
//!
//! Maps are built once, either through [`MapBuilder`], from an in-memory
//! adjacency literal or from text, and are read-only from then on.
//!
//! ```text
//! # Comments run to the end of the line.
//! location Arad 91 492
//! location Zerind 108 531
//! road Arad Zerind 75
//! one-way Zerind Arad 80
//! ```

use std::path::PathBuf;

use derive_more::Display;
use nonmax::NonMaxU32;
use num_traits::Zero;
use rand::Rng;
use rustc_hash::FxHashMap;
use thiserror::Error;
use thousands::Separable;

use crate::float_cost::FloatCost;
use crate::problem::Heuristic;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::Neighbours;
use crate::space::Space;
use crate::space::State;

/// How many tries `MapProblem::randomize` gets to find a usable pair.
const RANDOM_STATE_MAX_TRIES: u16 = 1000;

/// A location in a `MapSpace`.
///
/// Ids are handed out in declaration order and are only meaningful within
/// the map that issued them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(NonMaxU32);

impl LocationId {
    fn new(index: usize) -> Option<Self> {
        u32::try_from(index).ok().and_then(NonMaxU32::new).map(Self)
    }

    #[inline(always)]
    pub fn as_usize(&self) -> usize {
        self.0.get() as usize
    }
}

impl State for LocationId {}

impl std::fmt::Debug for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0.get())
    }
}

/// Travelling to the given location along the arc that leads there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapAction(pub LocationId);

impl Action for MapAction {}

pub type MapCost = FloatCost<f64>;

/// A point on the plane.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display("({x}, {y})")]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    ///
    /// ```
    /// use gps_search::problems::map::Coordinates;
    /// let a = Coordinates::new(0.0, 0.0);
    /// let b = Coordinates::new(3.0, 4.0);
    /// assert_eq!(a.distance(&b), 5.0);
    /// ```
    #[inline(always)]
    pub fn distance(&self, other: &Coordinates) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Mistakes in a map or problem definition, caught before searching.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Unknown location '{0}'")]
    UnknownLocation(String),
    #[error("Location '{0}' was already declared")]
    DuplicateLocation(String),
    #[error("Invalid cost {cost} for '{from}' -> '{to}'")]
    InvalidCost { from: String, to: String, cost: f64 },
    #[error("Invalid coordinates for '{0}'")]
    InvalidCoordinates(String),
    #[error("Too many locations")]
    TooManyLocations,
    #[error("No goals")]
    NoGoals,
}

#[derive(Clone, Default)]
pub struct MapSpace {
    names: Vec<String>,
    ids: FxHashMap<String, LocationId>,
    coordinates: Vec<Option<Coordinates>>,
    /// Outgoing arcs of each location, in insertion order.
    arcs: Vec<Vec<(LocationId, MapCost)>>,
}

impl MapSpace {
    #[must_use]
    pub fn builder() -> MapBuilder {
        MapBuilder::default()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All locations, in declaration order.
    pub fn locations(&self) -> impl Iterator<Item = LocationId> + '_ {
        (0..self.len()).filter_map(LocationId::new)
    }

    pub fn name(&self, id: LocationId) -> &str {
        &self.names[id.as_usize()]
    }

    pub fn id(&self, name: &str) -> Option<LocationId> {
        self.ids.get(name).copied()
    }

    pub fn coordinates(&self, id: LocationId) -> Option<Coordinates> {
        self.coordinates[id.as_usize()]
    }

    /// The cost of the arc `from -> to`, if there's one.
    pub fn edge_cost(&self, from: LocationId, to: LocationId) -> Option<MapCost> {
        self.arcs[from.as_usize()]
            .iter()
            .find(|(n, _)| *n == to)
            .map(|(_, c)| *c)
    }

    /// Number of arcs. Roads count twice.
    pub fn num_edges(&self) -> usize {
        self.arcs.iter().map(Vec::len).sum()
    }

    /// Location names along a sequence of states.
    pub fn route(&self, states: &[LocationId]) -> Vec<String> {
        states.iter().map(|s| self.name(*s).to_string()).collect()
    }

    /// Builds a map from an adjacency literal, making it undirected.
    ///
    /// Every listed arc is added first, in order. Then the reverse of each
    /// listed arc is appended, unless that arc was listed as well.
    pub fn from_adjacency<'a, L, Adj>(
        locations: L,
        adjacency: &[(&'a str, Adj)],
    ) -> Result<MapSpace, ConfigurationError>
    where
        L: IntoIterator<Item = (&'a str, Option<Coordinates>)>,
        Adj: AsRef<[(&'a str, f64)]>,
    {
        let mut builder = MapBuilder::default();
        for (name, coordinates) in locations {
            match coordinates {
                Some(Coordinates { x, y }) => builder.location_at(name, x, y)?,
                None => builder.location(name)?,
            };
        }

        for (from, neighbours) in adjacency {
            for (to, cost) in neighbours.as_ref() {
                builder.one_way(from, to, *cost)?;
            }
        }
        for (from, neighbours) in adjacency {
            for (to, cost) in neighbours.as_ref() {
                if !builder.has_arc(to, from) {
                    builder.one_way(to, from, *cost)?;
                }
            }
        }

        Ok(builder.build())
    }

    /// Generates a connected-ish map with `locations` locations scattered
    /// over a 1000x1000 square and `roads` random roads between them.
    ///
    /// Roads are never shorter than the straight line between their ends, so
    /// `StraightLineDistance` stays admissible.
    pub fn random<R: Rng>(r: &mut R, locations: usize, roads: usize) -> MapSpace {
        let mut space = MapSpace::default();
        for i in 0..locations {
            let at = Coordinates::new(r.random_range(0.0..1000.0), r.random_range(0.0..1000.0));
            if space.push_location(format!("L{i}"), Some(at)).is_none() {
                break;
            }
        }

        if space.len() < 2 {
            return space;
        }
        for _ in 0..roads {
            let a = r.random_range(0..space.len());
            let b = r.random_range(0..space.len());
            if a == b {
                continue;
            }
            let (Some(a), Some(b)) = (LocationId::new(a), LocationId::new(b)) else {
                continue;
            };
            let (Some(pa), Some(pb)) = (space.coordinates(a), space.coordinates(b)) else {
                continue;
            };
            let detour = MapCost::new(1.0 + r.random::<f64>() * 0.5);
            let cost = (MapCost::new(pa.distance(&pb)) * detour).ceil();
            space.set_arc(a, b, cost);
            space.set_arc(b, a, cost);
        }

        space
    }

    /// Appends a location, unless ids ran out.
    fn push_location(&mut self, name: String, coordinates: Option<Coordinates>) -> Option<LocationId> {
        let id = LocationId::new(self.len())?;
        self.ids.insert(name.clone(), id);
        self.names.push(name);
        self.coordinates.push(coordinates);
        self.arcs.push(vec![]);
        Some(id)
    }

    /// Adds or overwrites the arc `from -> to`.
    fn set_arc(&mut self, from: LocationId, to: LocationId, cost: MapCost) {
        let arcs = &mut self.arcs[from.as_usize()];
        match arcs.iter_mut().find(|(n, _)| *n == to) {
            Some(arc) => arc.1 = cost,
            None => arcs.push((to, cost)),
        }
    }
}

impl Space<LocationId, MapAction, MapCost> for MapSpace {
    #[inline(always)]
    fn apply(&self, s: &LocationId, a: &MapAction) -> Option<LocationId> {
        self.edge_cost(*s, a.0).map(|_| a.0)
    }

    /// Infinite when there's no such arc.
    #[inline(always)]
    fn cost(&self, s: &LocationId, a: &MapAction) -> MapCost {
        self.edge_cost(*s, a.0).unwrap_or_else(MapCost::infinity)
    }

    fn neighbours(&self, s: &LocationId) -> Neighbours<LocationId, MapAction> {
        self.arcs[s.as_usize()]
            .iter()
            .map(|(n, _)| (*n, MapAction(*n)))
            .collect()
    }

    #[inline(always)]
    fn valid(&self, s: &LocationId) -> bool {
        s.as_usize() < self.len()
    }

    fn supports_random_state() -> bool {
        true
    }
    fn random_state<R: rand::Rng>(&self, r: &mut R) -> Option<LocationId> {
        if self.is_empty() {
            return None;
        }
        LocationId::new(r.random_range(0..self.len()))
    }
}

impl std::fmt::Display for MapSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "MapSpace({} locations; {} arcs)",
            self.len().separate_with_commas(),
            self.num_edges().separate_with_commas(),
        )
    }
}

impl std::fmt::Debug for MapSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

/// Builds a `MapSpace` one location or arc at a time.
///
/// Locations must be declared before the arcs that use them.
#[derive(Debug, Default)]
pub struct MapBuilder {
    space: MapSpace,
}

impl MapBuilder {
    /// Declares a location without coordinates.
    pub fn location(&mut self, name: &str) -> Result<&mut Self, ConfigurationError> {
        self.declare(name, None)
    }

    pub fn location_at(&mut self, name: &str, x: f64, y: f64) -> Result<&mut Self, ConfigurationError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigurationError::InvalidCoordinates(name.to_string()));
        }
        self.declare(name, Some(Coordinates::new(x, y)))
    }

    /// Adds arcs in both directions. Existing arcs get their cost
    /// overwritten.
    pub fn road(&mut self, a: &str, b: &str, cost: f64) -> Result<&mut Self, ConfigurationError> {
        self.one_way(a, b, cost)?;
        self.one_way(b, a, cost)
    }

    /// Adds the arc `from -> to`, overwriting its cost if it already exists.
    pub fn one_way(&mut self, from: &str, to: &str, cost: f64) -> Result<&mut Self, ConfigurationError> {
        let from_id = self.lookup(from)?;
        let to_id = self.lookup(to)?;
        let cost = match MapCost::try_new(cost) {
            Some(c) if cost.is_finite() => c,
            _ => {
                return Err(ConfigurationError::InvalidCost {
                    from: from.to_string(),
                    to: to.to_string(),
                    cost,
                });
            }
        };

        self.space.set_arc(from_id, to_id, cost);
        Ok(self)
    }

    pub fn build(self) -> MapSpace {
        self.space
    }

    fn has_arc(&self, from: &str, to: &str) -> bool {
        match (self.space.id(from), self.space.id(to)) {
            (Some(from), Some(to)) => self.space.edge_cost(from, to).is_some(),
            _ => false,
        }
    }

    fn lookup(&self, name: &str) -> Result<LocationId, ConfigurationError> {
        self.space
            .id(name)
            .ok_or_else(|| ConfigurationError::UnknownLocation(name.to_string()))
    }

    fn declare(
        &mut self,
        name: &str,
        coordinates: Option<Coordinates>,
    ) -> Result<&mut Self, ConfigurationError> {
        if self.space.id(name).is_some() {
            return Err(ConfigurationError::DuplicateLocation(name.to_string()));
        }
        self.space
            .push_location(name.to_string(), coordinates)
            .ok_or(ConfigurationError::TooManyLocations)?;
        Ok(self)
    }
}

#[derive(Debug, Error)]
pub enum MapParseError {
    #[error("Line {line}: unknown directive '{directive}'")]
    UnknownDirective { line: usize, directive: String },
    #[error("Line {line}: expected {expected}")]
    Malformed { line: usize, expected: &'static str },
    #[error("Line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },
    #[error("Line {line}: {e}")]
    Configuration { line: usize, e: ConfigurationError },
    #[error("I/O error when loading '{p}': {e}")]
    IOError { p: PathBuf, e: std::io::Error },
}

impl std::convert::TryFrom<&str> for MapSpace {
    type Error = MapParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut builder = MapBuilder::default();

        for (i, line) in s.lines().enumerate() {
            let line_number = i + 1;
            let content = match line.split_once('#') {
                Some((content, _comment)) => content,
                None => line,
            };
            let fields: Vec<&str> = content.split_whitespace().collect();
            let number = |value: &str| {
                value.parse::<f64>().map_err(|_| MapParseError::InvalidNumber {
                    line: line_number,
                    value: value.to_string(),
                })
            };

            let result = match *fields.as_slice() {
                [] => continue,
                ["location", name] => builder.location(name),
                ["location", name, x, y] => builder.location_at(name, number(x)?, number(y)?),
                ["road", a, b, cost] => builder.road(a, b, number(cost)?),
                ["one-way", from, to, cost] => builder.one_way(from, to, number(cost)?),
                ["location", ..] => {
                    return Err(MapParseError::Malformed {
                        line: line_number,
                        expected: "location <name> [<x> <y>]",
                    });
                }
                ["road", ..] => {
                    return Err(MapParseError::Malformed {
                        line: line_number,
                        expected: "road <a> <b> <cost>",
                    });
                }
                ["one-way", ..] => {
                    return Err(MapParseError::Malformed {
                        line: line_number,
                        expected: "one-way <from> <to> <cost>",
                    });
                }
                [directive, ..] => {
                    return Err(MapParseError::UnknownDirective {
                        line: line_number,
                        directive: directive.to_string(),
                    });
                }
            };
            result.map_err(|e| MapParseError::Configuration {
                line: line_number,
                e,
            })?;
        }

        Ok(builder.build())
    }
}

impl std::convert::TryFrom<&std::path::Path> for MapSpace {
    type Error = MapParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(p).map_err(|e| MapParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        MapSpace::try_from(text.as_str())
    }
}

/// Travelling from one location to any of the goal locations.
#[derive(Clone, Debug)]
pub struct MapProblem {
    space: MapSpace,
    initial: LocationId,
    goals: Vec<LocationId>,
}

impl MapProblem {
    pub fn new(space: MapSpace, initial: &str, goal: &str) -> Result<Self, ConfigurationError> {
        Self::with_goals(space, initial, [goal])
    }

    pub fn with_goals<'a>(
        space: MapSpace,
        initial: &str,
        goals: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ConfigurationError> {
        let lookup = |name: &str| {
            space
                .id(name)
                .ok_or_else(|| ConfigurationError::UnknownLocation(name.to_string()))
        };
        let initial = lookup(initial)?;
        let goals = goals.into_iter().map(lookup).collect::<Result<Vec<_>, _>>()?;
        Self::from_ids(space, initial, goals)
    }

    pub fn from_ids(
        space: MapSpace,
        initial: LocationId,
        goals: Vec<LocationId>,
    ) -> Result<Self, ConfigurationError> {
        if goals.is_empty() {
            return Err(ConfigurationError::NoGoals);
        }
        for s in std::iter::once(&initial).chain(&goals) {
            if !space.valid(s) {
                return Err(ConfigurationError::UnknownLocation(format!("{s:?}")));
            }
        }
        Ok(Self {
            space,
            initial,
            goals,
        })
    }

    /// Picks a random initial location and a different random goal.
    ///
    /// Gives up on maps with less than two locations.
    pub fn randomize<R: Rng>(space: MapSpace, r: &mut R) -> Option<MapProblem> {
        let initial = space.random_state(r)?;
        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            if let Some(goal) = space.random_state(r)
                && goal != initial
            {
                return Some(MapProblem {
                    space,
                    initial,
                    goals: vec![goal],
                });
            }
        }
        None
    }
}

impl Problem<MapSpace, LocationId, MapAction, MapCost> for MapProblem {
    fn space(&self) -> &MapSpace {
        &self.space
    }
    fn initial(&self) -> LocationId {
        self.initial
    }
    fn goals(&self) -> &[LocationId] {
        &self.goals
    }
}

/// Straight-line distance to the closest goal.
///
/// Admissible as long as no arc is shorter than the straight line between its
/// ends. Without coordinates there's nothing to go by and it's zero.
#[derive(Copy, Clone, Debug, Default)]
pub struct StraightLineDistance;

impl Heuristic<MapProblem, MapSpace, LocationId, MapAction, MapCost> for StraightLineDistance {
    fn h(&self, p: &MapProblem, s: &LocationId) -> MapCost {
        let space = p.space();
        let Some(from) = space.coordinates(*s) else {
            return MapCost::zero();
        };

        let mut h = f64::INFINITY;
        for goal in p.goals() {
            match space.coordinates(*goal) {
                Some(to) => h = h.min(from.distance(&to)),
                None => return MapCost::zero(),
            }
        }
        MapCost::new(h)
    }
}
