use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softraster::bench::{EdgeFunctionRasterizer, FrameBuffer, GouraudShader, Rasterizer, Shading};
use softraster::math::vec3::Vec3;
use softraster::{default_scene, Renderer};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;
const RED: u32 = 0xFFFF0000;

// All clockwise on screen, so none are culled.

fn small_triangle() -> [Vec3; 3] {
    [
        Vec3::new(100.0, 100.0, 0.0),
        Vec3::new(120.0, 100.0, 0.0),
        Vec3::new(110.0, 120.0, 0.0),
    ]
}

fn medium_triangle() -> [Vec3; 3] {
    [
        Vec3::new(100.0, 100.0, 0.0),
        Vec3::new(300.0, 100.0, 0.0),
        Vec3::new(200.0, 300.0, 0.0),
    ]
}

fn large_triangle() -> [Vec3; 3] {
    [
        Vec3::new(50.0, 50.0, 0.0),
        Vec3::new(750.0, 100.0, 0.0),
        Vec3::new(400.0, 550.0, 0.0),
    ]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let rasterizer = EdgeFunctionRasterizer::default();
    let gouraud = GouraudShader::new([0.2, 0.7, 1.0], [0.0, 255.0, 255.0, 255.0]);

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("flat", name), &triangle, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear();
                rasterizer.fill_triangle(black_box(*tri), &mut fb, Shading::PerTriangle(RED));
            });
        });

        group.bench_with_input(BenchmarkId::new("gouraud", name), &triangle, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear();
                rasterizer.fill_triangle(black_box(*tri), &mut fb, Shading::PerPixel(&gouraud));
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let rasterizer = EdgeFunctionRasterizer::default();

    // Generate a grid of small triangles
    let triangles: Vec<[Vec3; 3]> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                [
                    Vec3::new(x, y, 0.0),
                    Vec3::new(x + 35.0, y, 0.0),
                    Vec3::new(x + 17.5, y + 25.0, 0.0),
                ]
            })
        })
        .collect();

    group.bench_function("flat_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear();
            for tri in &triangles {
                rasterizer.fill_triangle(black_box(*tri), &mut fb, Shading::PerTriangle(RED));
            }
        });
    });

    group.finish();
}

fn benchmark_scene_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_frame");

    group.bench_function("default_scene_800x600", |b| {
        let mut scene = default_scene();
        let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| black_box(renderer.draw_scene(&mut scene)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_scene_frame
);
criterion_main!(benches);
