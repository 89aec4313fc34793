use nalgebra::Vector3;
use rast3d_core::{Mesh, RenderConfig};
use rast3d_raster::Rasterizer;
use rast3d_terminal::{run_batch, FrameState, Pipeline};

/// Bounds of lit pixels in screen coordinates (origin bottom-left):
/// (min_x, max_x, min_y, max_y)
fn lit_bounds(r: &Rasterizer) -> (usize, usize, usize, usize) {
    let (w, h) = (r.width(), r.height());
    let mut bounds = (usize::MAX, 0, usize::MAX, 0);
    for (i, color) in r.frame_buffer().iter().enumerate() {
        if *color == Vector3::zeros() {
            continue;
        }
        let (x, y) = (i % w, h - 1 - i / w);
        bounds.0 = bounds.0.min(x);
        bounds.1 = bounds.1.max(x);
        bounds.2 = bounds.2.min(y);
        bounds.3 = bounds.3.max(y);
    }
    bounds
}

fn default_pipeline() -> Pipeline {
    Pipeline::new(&RenderConfig::default(), Mesh::default_triangle()).unwrap()
}

#[test]
fn unrotated_triangle_is_centered() {
    let mut pipeline = default_pipeline();
    let r = pipeline.render(&FrameState::new(0.0)).unwrap();
    assert_eq!((r.width(), r.height()), (700, 700));

    // Eye at z = 5 puts the triangle 7 units away: x = +-2 lands at
    // 350 * (1 +- 2 / (7 * tan(22.5deg))) = 591.4 / 108.6
    let (min_x, max_x, min_y, max_y) = lit_bounds(r);
    assert_eq!((min_x, max_x), (108, 591));
    assert_eq!((min_y, max_y), (350, 591));
    assert_eq!(min_x + max_x, 699);

    let white = Some(Vector3::new(255.0, 255.0, 255.0));
    assert_eq!(r.pixel(350, 350), white);
    assert_eq!(r.pixel(350, 591), white);
    assert_eq!(r.pixel(350, 450), Some(Vector3::zeros()));
}

#[test]
fn rendering_is_reproducible() {
    let mut pipeline = default_pipeline();
    let first = pipeline.render(&FrameState::new(0.0)).unwrap().to_rgb_image();
    pipeline.render(&FrameState::new(130.0)).unwrap();
    let second = pipeline.render(&FrameState::new(0.0)).unwrap().to_rgb_image();
    assert_eq!(first, second);

    let mut fresh = default_pipeline();
    let third = fresh.render(&FrameState::new(0.0)).unwrap().to_rgb_image();
    assert_eq!(first, third);
}

#[test]
fn quarter_turn_rotates_counter_clockwise() {
    let mut pipeline = default_pipeline();
    let r = pipeline.render(&FrameState::new(90.0)).unwrap();

    // (2,0) -> (0,2), (0,2) -> (-2,0), (-2,0) -> (0,-2)
    let (min_x, max_x, min_y, max_y) = lit_bounds(r);
    assert!((107..=109).contains(&min_x), "min_x {min_x}");
    assert!((349..=351).contains(&max_x), "max_x {max_x}");
    assert!((107..=109).contains(&min_y), "min_y {min_y}");
    assert!((590..=592).contains(&max_y), "max_y {max_y}");
}

#[test]
fn arbitrary_axis_half_turn_about_y() {
    let config = RenderConfig {
        rotation_axis: Some([0.0, 1.0, 0.0]),
        ..RenderConfig::default()
    };
    let mut pipeline = Pipeline::new(&config, Mesh::default_triangle()).unwrap();

    // Half a turn about Y brings the triangle to z = +2, three units from
    // the eye, so its base runs past both frame edges.
    let r = pipeline.render(&FrameState::new(180.0)).unwrap();
    let (min_x, max_x, min_y, _) = lit_bounds(r);
    assert_eq!((min_x, max_x), (0, 699));
    assert_eq!(min_y, 350);
}

#[test]
fn filled_triangle_covers_its_centroid() {
    let config = RenderConfig {
        fill: true,
        ..RenderConfig::default()
    };
    let mut pipeline = Pipeline::new(&config, Mesh::default_triangle()).unwrap();
    let r = pipeline.render(&FrameState::new(0.0)).unwrap();

    let centroid = r.pixel(350, 430).unwrap();
    assert!(centroid.x > 0.0 && centroid.y > 0.0 && centroid.z > 0.0);
    assert_eq!(r.pixel(100, 100), Some(Vector3::zeros()));
}

#[test]
fn batch_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output.png");

    let mut pipeline = default_pipeline();
    run_batch(&mut pipeline, 0.0, &output).unwrap();

    let image = image::open(&output).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (700, 700));
    // Screen (350, 350) is image row 700 - 1 - 350
    assert_eq!(image.get_pixel(350, 349).0, [255, 255, 255]);

    let expected = pipeline.render(&FrameState::new(0.0)).unwrap().to_rgb_image();
    assert_eq!(image, expected);
}
