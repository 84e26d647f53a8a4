use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use gps_search::algorithms::Algorithm;
use gps_search::problems::map::MapProblem;
use gps_search::problems::map::StraightLineDistance;
use gps_search::problems::romania::romania;

const TRIPS: [(&str, &str); 4] = [("M", "F"), ("A", "B"), ("B", "A"), ("O", "E")];

fn generated(algorithm: Algorithm, problem: &MapProblem) -> usize {
    algorithm.run(problem, StraightLineDistance).generated()
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Romania");

    for (start, goal) in TRIPS {
        let Ok(problem) = MapProblem::new(romania(), start, goal) else {
            log::warn!("Skipping {start} -> {goal}");
            continue;
        };
        let trip = format!("{start}->{goal}");

        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), &trip),
                &problem,
                |b, p| b.iter(|| generated(algorithm, p)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
