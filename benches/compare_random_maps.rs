use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use gps_search::algorithms::Algorithm;
use gps_search::problems::map::MapProblem;
use gps_search::problems::map::MapSpace;
use gps_search::problems::map::StraightLineDistance;

/// Maximum time willing to wait for a single benchmark instance.
/// Experiments are carried out at least 5s and at least 100 times, so running a
/// 1s instance takes 1m40s.
const MAX_INSTANCE_TIME: Duration = Duration::from_secs(1);

const SIZES: [(usize, usize); 3] = [(100, 250), (1_000, 2_500), (10_000, 25_000)];

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random maps");

    for (locations, roads) in SIZES {
        for i in 0..3u64 {
            let instance_name = format!("{locations}x{roads}:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let space = MapSpace::random(&mut rng, locations, roads);
            let Some(problem) = MapProblem::randomize(space, &mut rng) else {
                continue;
            };

            for algorithm in Algorithm::ALL {
                let mut stopwatch = Stopwatch::new_started();
                let outcome = algorithm.run(&problem, StraightLineDistance);
                stopwatch.stop();
                if stopwatch.elapsed() > MAX_INSTANCE_TIME {
                    log::warn!(
                        "Skipping {instance_name} as it takes too long with {algorithm} ({})",
                        human_duration(&stopwatch.elapsed())
                    );
                    continue;
                }
                println!("{algorithm} on {instance_name}: {}", outcome.statistics());

                group.bench_with_input(
                    BenchmarkId::new(algorithm.name(), &instance_name),
                    &problem,
                    |b, p| b.iter(|| algorithm.run(p, StraightLineDistance).visited()),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
