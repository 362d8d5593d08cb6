use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanline3d::bench::{
    ClipSpaceClipper, Color, FrameBuffer, Polygon, Rasterizer, ScanlineRasterizer, ShadedPolygon,
    TiledRasterizer,
};
use scanline3d::math::Vec4;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;
const BACKGROUND: u32 = 0xFF000000;

fn quad(x: f64, y: f64, w: f64, h: f64, z: f64) -> ShadedPolygon {
    ShadedPolygon::new(
        Polygon::new(vec![
            Vec4::point(x, y, z),
            Vec4::point(x + w, y, z + 0.01),
            Vec4::point(x + w, y + h, z + 0.02),
            Vec4::point(x, y + h, z + 0.01),
        ]),
        Color::new(1.0, 0.0, 0.0),
    )
}

fn triangle(x: f64, y: f64, size: f64, z: f64) -> ShadedPolygon {
    ShadedPolygon::new(
        Polygon::new(vec![
            Vec4::point(x, y, z),
            Vec4::point(x + size, y, z),
            Vec4::point(x + size / 2.0, y + size * 0.7, z),
        ]),
        Color::new(0.0, 1.0, 0.0),
    )
}

fn benchmark_single_polygon(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_polygon");

    let scanline = ScanlineRasterizer::new();
    let tiled = TiledRasterizer::default();

    for (name, polygon) in [
        ("small", triangle(100.0, 100.0, 20.0, 0.5)),
        ("medium", triangle(100.0, 100.0, 200.0, 0.5)),
        ("large", quad(50.0, 50.0, 700.0, 500.0, 0.5)),
    ] {
        let polygons = vec![polygon];
        group.bench_with_input(BenchmarkId::new("scanline", name), &polygons, |b, polys| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, BACKGROUND).unwrap();
            b.iter(|| {
                fb.clear(BACKGROUND);
                scanline.fill_polygons(black_box(polys), &mut fb);
            });
        });

        group.bench_with_input(BenchmarkId::new("tiled", name), &polygons, |b, polys| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, BACKGROUND).unwrap();
            b.iter(|| {
                fb.clear(BACKGROUND);
                tiled.fill_polygons(black_box(polys), &mut fb);
            });
        });
    }

    group.finish();
}

fn benchmark_many_polygons(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_polygons");

    // overlapping grid so the depth test rejects a share of the pixels
    let polygons: Vec<ShadedPolygon> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f64 * 38.0;
                let y = row as f64 * 28.0;
                quad(x, y, 60.0, 45.0, ((row * 20 + col) % 7) as f64 / 7.0)
            })
        })
        .collect();

    group.bench_function("scanline_400_quads", |b| {
        let scanline = ScanlineRasterizer::new();
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, BACKGROUND).unwrap();
        b.iter(|| {
            fb.clear(BACKGROUND);
            scanline.fill_polygons(black_box(&polygons), &mut fb);
        });
    });

    for rows in [8, 16, 64] {
        group.bench_with_input(BenchmarkId::new("tiled_400_quads", rows), &rows, |b, &rows| {
            let tiled = TiledRasterizer::new(rows);
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, BACKGROUND).unwrap();
            b.iter(|| {
                fb.clear(BACKGROUND);
                tiled.fill_polygons(black_box(&polygons), &mut fb);
            });
        });
    }

    group.finish();
}

fn benchmark_frustum_clipping(c: &mut Criterion) {
    // clip-space quads with w = 1, half of them straddling the right plane
    let polygons: Vec<Polygon<4>> = (0..1000)
        .map(|i| {
            let x = (i % 40) as f64 / 20.0 - 1.0;
            let y = (i / 40) as f64 / 25.0 - 0.5;
            Polygon::new(vec![
                Vec4::new(x, y, 0.5, 1.0),
                Vec4::new(x + 0.6, y, 0.5, 1.0),
                Vec4::new(x + 0.6, y + 0.3, 0.6, 1.0),
                Vec4::new(x, y + 0.3, 0.6, 1.0),
            ])
        })
        .collect();
    let clipper = ClipSpaceClipper::new();

    c.bench_function("clip_space_1000_quads", |b| {
        b.iter(|| clipper.clip_polygons(black_box(&polygons)));
    });
}

criterion_group!(
    benches,
    benchmark_single_polygon,
    benchmark_many_polygons,
    benchmark_frustum_clipping
);
criterion_main!(benches);
