use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use frame_processor_rs::video_pipeline::format::{FrameDescriptor, Orientation};
use frame_processor_rs::video_pipeline::transform::FrameTransform;
use frame_processor_rs::video_pipeline::{ChromaTable, LumaTable, ParameterStore};

fn generate_yuy2_frame(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 2);
    for y in 0..height {
        for x in (0..width).step_by(2) {
            let value = ((x + y) % 256) as u8;
            data.extend_from_slice(&[value, 128, value, 128]);
        }
    }
    data
}

fn benchmark_table_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_rebuild");

    group.bench_function("luma", |b| {
        b.iter(|| LumaTable::build(black_box(140), black_box(110), black_box(90)));
    });

    group.bench_function("chroma", |b| {
        b.iter(|| ChromaTable::build(black_box(150), black_box(200)));
    });

    group.finish();
}

fn benchmark_frame_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_by_size");

    let sizes = vec![
        (320, 240, "320x240"),
        (640, 480, "640x480"),
        (1280, 720, "1280x720"),
    ];

    for (width, height, label) in sizes {
        let input = generate_yuy2_frame(width, height);
        let format = FrameDescriptor::new(width, height, 16, Orientation::TopDown)
            .expect("valid benchmark format");
        let tables = ParameterStore::default().tables();

        group.bench_with_input(BenchmarkId::from_parameter(label), &input, |b, data| {
            let mut transform = FrameTransform::new(data.len(), u64::MAX);
            let mut output = vec![0u8; data.len()];
            b.iter(|| {
                let _ = transform.apply(black_box(data), &format, &mut output, &format, &tables);
            });
        });
    }

    group.finish();
}

fn benchmark_blend_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("blend_overhead");
    let (width, height) = (640, 480);
    let input = generate_yuy2_frame(width, height);
    let format = FrameDescriptor::new(width, height, 16, Orientation::TopDown)
        .expect("valid benchmark format");
    let tables = ParameterStore::default().tables();

    group.bench_function("without_blend", |b| {
        let mut transform = FrameTransform::new(input.len(), u64::MAX);
        let mut output = vec![0u8; input.len()];
        b.iter(|| {
            let _ = transform.apply(black_box(&input), &format, &mut output, &format, &tables);
        });
    });

    group.bench_function("with_blend", |b| {
        let mut transform = FrameTransform::new(input.len(), 0);
        let mut output = vec![0u8; input.len()];
        b.iter(|| {
            let _ = transform.apply(black_box(&input), &format, &mut output, &format, &tables);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_table_rebuild,
    benchmark_frame_sizes,
    benchmark_blend_overhead
);
criterion_main!(benches);
