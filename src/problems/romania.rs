//! The road map of Romania.
//!
//! Cities go by their initial, with coordinates in the same units as road
//! lengths so straight-line distances underestimate travel costs.

use crate::problems::map::Coordinates;
use crate::problems::map::MapSpace;

const CITIES: [(&str, &str, f64, f64); 20] = [
    ("A", "Arad", 91.0, 492.0),
    ("B", "Bucharest", 400.0, 327.0),
    ("C", "Craiova", 253.0, 288.0),
    ("D", "Drobeta", 165.0, 299.0),
    ("E", "Eforie", 562.0, 293.0),
    ("F", "Fagaras", 305.0, 449.0),
    ("G", "Giurgiu", 375.0, 270.0),
    ("H", "Hirsova", 534.0, 350.0),
    ("I", "Iasi", 473.0, 506.0),
    ("L", "Lugoj", 165.0, 379.0),
    ("M", "Mehadia", 168.0, 339.0),
    ("N", "Neamt", 406.0, 537.0),
    ("O", "Oradea", 131.0, 571.0),
    ("P", "Pitesti", 320.0, 368.0),
    ("R", "Rimnicu Vilcea", 233.0, 410.0),
    ("S", "Sibiu", 207.0, 457.0),
    ("T", "Timisoara", 94.0, 410.0),
    ("U", "Urziceni", 456.0, 350.0),
    ("V", "Vaslui", 509.0, 444.0),
    ("Z", "Zerind", 108.0, 531.0),
];

/// Every road, listed once. The reverse directions are filled in.
const ROADS: [(&str, &[(&str, f64)]); 13] = [
    ("A", &[("Z", 75.0), ("S", 140.0), ("T", 118.0)]),
    ("B", &[("U", 85.0), ("P", 101.0), ("G", 90.0), ("F", 211.0)]),
    ("C", &[("D", 120.0), ("R", 146.0), ("P", 138.0)]),
    ("D", &[("M", 75.0)]),
    ("E", &[("H", 86.0)]),
    ("F", &[("S", 99.0)]),
    ("H", &[("U", 98.0)]),
    ("I", &[("V", 92.0), ("N", 87.0)]),
    ("L", &[("T", 111.0), ("M", 70.0)]),
    ("O", &[("Z", 71.0), ("S", 151.0)]),
    ("P", &[("R", 97.0)]),
    ("R", &[("S", 80.0)]),
    ("U", &[("V", 142.0)]),
];

/// The map of Romania, cities named by their initial.
pub fn romania() -> MapSpace {
    let cities = CITIES
        .iter()
        .map(|(initial, _, x, y)| (*initial, Some(Coordinates::new(*x, *y))));
    match MapSpace::from_adjacency(cities, &ROADS) {
        Ok(space) => space,
        Err(e) => unreachable!("The Romania map is broken: {e}"),
    }
}

/// The full name of a city, given its initial.
///
/// ```
/// use gps_search::problems::romania::romania_city;
/// assert_eq!(romania_city("R"), Some("Rimnicu Vilcea"));
/// assert_eq!(romania_city("Q"), None);
/// ```
pub fn romania_city(initial: &str) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|(i, ..)| *i == initial)
        .map(|(_, name, ..)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Space;

    #[test]
    fn shape() {
        let space = romania();
        assert_eq!(space.len(), 20);
        // 23 roads, both ways.
        assert_eq!(space.num_edges(), 46);

        for s in space.locations() {
            for (n, _) in space.neighbours(&s) {
                assert_eq!(space.edge_cost(s, n), space.edge_cost(n, s));
            }
        }
    }

    #[test]
    fn neighbour_order() {
        let space = romania();
        let neighbours = |name: &str| -> Vec<String> {
            let Some(s) = space.id(name) else {
                return vec![];
            };
            let states: Vec<_> = space.neighbours(&s).into_iter().map(|(n, _)| n).collect();
            space.route(&states)
        };

        assert_eq!(neighbours("A"), ["Z", "S", "T"]);
        assert_eq!(neighbours("D"), ["M", "C"]);
        assert_eq!(neighbours("M"), ["D", "L"]);
        assert_eq!(neighbours("S"), ["A", "F", "O", "R"]);
    }

    #[test]
    fn straight_lines_underestimate_roads() {
        let space = romania();
        for s in space.locations() {
            for (n, a) in space.neighbours(&s) {
                let (Some(from), Some(to)) = (space.coordinates(s), space.coordinates(n)) else {
                    panic!("Missing coordinates");
                };
                assert!(
                    from.distance(&to) <= space.cost(&s, &a).into_inner(),
                    "{} -> {}",
                    space.name(s),
                    space.name(n)
                );
            }
        }
    }

    #[test]
    fn city_names() {
        assert_eq!(romania_city("A"), Some("Arad"));
        assert_eq!(romania_city("Z"), Some("Zerind"));
    }
}
