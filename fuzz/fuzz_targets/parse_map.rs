#![no_main]

use libfuzzer_sys::fuzz_target;

use gps_search::algorithms::Algorithm;
use gps_search::problem::Problem;
use gps_search::problems::map::MapProblem;
use gps_search::problems::map::MapSpace;
use gps_search::problems::map::StraightLineDistance;
use gps_search::space::Space;

// Any map that parses can be searched between its first and last locations.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(space) = MapSpace::try_from(text) else {
        return;
    };
    let (Some(first), Some(last)) = (space.locations().next(), space.locations().last()) else {
        return;
    };
    let Ok(problem) = MapProblem::from_ids(space, first, vec![last]) else {
        return;
    };

    for algorithm in Algorithm::ALL {
        let outcome = algorithm.run(&problem, StraightLineDistance);
        if let Some(path) = outcome.path() {
            assert!(problem.space().valid_path(&path));
            assert!(outcome.generated() >= outcome.visited());
        }
    }
});
