use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fctms_workout::artifacts::{ArtifactPaths, ArtifactStore};
use fctms_workout::prediction::{PredictionService, WorkoutRequest};
use serde_json::json;
use std::sync::Arc;

fn fixture_service() -> PredictionService {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    let store = ArtifactStore::load(&ArtifactPaths::from_dir(dir)).unwrap();
    PredictionService::new(Arc::new(store))
}

fn bench_prediction(c: &mut Criterion) {
    let service = fixture_service();
    let body = json!({
        "Age": 25,
        "Gender": "male",
        "BMI": 24.5,
        "Fat_Percentage": 18.0,
        "Session_Duration_Minutes": 45,
        "Workout_Frequency": 4,
        "Experience_Level": 2,
        "Type_of_Exercise": "Cardio",
        "Age_Group": "20-29"
    });
    let request = WorkoutRequest::from_json(&body).unwrap();

    let mut group = c.benchmark_group("prediction");

    group.bench_function("parse_request", |b| {
        b.iter(|| WorkoutRequest::from_json(black_box(&body)).unwrap())
    });

    group.bench_function("predict", |b| {
        b.iter(|| service.predict(black_box(&request)).unwrap())
    });

    group.bench_function("predict_and_serialize", |b| {
        b.iter(|| {
            let result = service.predict_value(black_box(&body)).unwrap();
            serde_json::to_vec(&result).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_prediction);
criterion_main!(benches);
