use criterion::{criterion_group, criterion_main, Criterion};

use studiegang_cohort::CohortGenerator;
use studiegang_config::{CohortConfig, DropoutPolicyConfig, SimulationConfig};
use studiegang_core::{Catalog, Course, CourseCode};
use studiegang_model::UniversityModel;
use studiegang_telemetry::MetricsRecorder;

fn bench_catalog() -> Catalog {
    Catalog::from_courses((0..30).map(|i| {
        (
            CourseCode(format!("CS{}", 1000 + i)),
            Course {
                name: format!("Course {i}"),
                credits: 3,
                category: if i < 10 { "CS Core".into() } else { "Elective".into() },
                prerequisites: Vec::new(),
                corequisites: Vec::new(),
                terms_offered: Vec::new(),
            },
        )
    }))
}

fn simulation_benchmark(c: &mut Criterion) {
    let catalog = bench_catalog();
    let cohort_config = CohortConfig {
        students_per_term: 100,
        ..CohortConfig::default()
    };
    let students = CohortGenerator::new(cohort_config, 42).generate(&catalog, "CS Core");

    c.bench_function("simulate_300_students_14_semesters", |b| {
        b.iter(|| {
            let mut model = UniversityModel::new(
                catalog.clone(),
                students.clone(),
                SimulationConfig::default(),
                DropoutPolicyConfig::default(),
                MetricsRecorder::new(),
            );
            model.run()
        })
    });
}

criterion_group!(benches, simulation_benchmark);
criterion_main!(benches);
