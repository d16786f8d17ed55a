use criterion::{Criterion, criterion_group, criterion_main};
use pipeline_runner::core::config::{MatrixEntry, OsFamily, Pipeline};
use pipeline_runner::core::execution::run_entry;
use tempfile::tempdir;
use tokio::runtime::Runtime;

fn bench_run_entry(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let project = tempdir().unwrap();
    std::fs::write(project.path().join("README.md"), "bench project\n").unwrap();

    let pipeline = Pipeline {
        language: "en".to_string(),
        env: vec![],
        install: vec![],
        script: vec!["true".to_string()],
        after_success: vec![],
        branches: None,
        matrix: vec![],
    };
    let entry = MatrixEntry {
        os: OsFamily::Linux,
        runtime: "3.6".to_string(),
        env: Some("TOXENV=py36".to_string()),
    };

    c.bench_function("run_entry", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = run_entry(entry.clone(), &pipeline, project.path()).await;
        });
    });
}

criterion_group!(benches, bench_run_entry);
criterion_main!(benches);
