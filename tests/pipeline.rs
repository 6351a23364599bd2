use std::path::PathBuf;

use rastery::colors;
use rastery::prelude::*;

fn sample_config() -> RenderConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/rastery.toml");
    RenderConfig::load(path).unwrap()
}

fn cube_render(config: &RenderConfig) -> Render {
    let mut render = Render::new();
    render.insert_scene(
        Scene::new(ModelInstance::at(Vec3::new(0.0, 0.0, config.render.model_distance))),
        Model::cube(2.0, config.render.color),
    );
    render
}

#[test]
fn sample_config_loads() {
    let config = sample_config();
    assert_eq!(config.viewport.width, 800);
    assert_eq!(config.render.max_retries, 16);
    assert_eq!(config.render.color, [0, 0, 255]);
}

#[test]
fn cube_frame_lands_in_the_middle_of_the_canvas() {
    let config = sample_config();
    let mut ctx = RenderContext::from_config(&config);
    let mut render = cube_render(&config);

    let triangles = render.render(&mut ctx).unwrap();
    assert_eq!(triangles.len(), 12);

    let mut canvas = Canvas::new(ctx.viewport().width(), ctx.viewport().height());
    let written = ScanlineRasterizer::new().draw_frame(&triangles, &mut canvas.as_framebuffer());

    assert!(written > 0);
    assert_ne!(canvas.pixel(400, 300), Some(colors::BACKGROUND));
    assert_eq!(canvas.pixel(0, 0), Some(colors::BACKGROUND));
    assert_eq!(canvas.pixel(799, 599), Some(colors::BACKGROUND));
}

#[test]
fn deep_near_plane_pushes_the_camera_back_once() {
    let mut config = sample_config();
    config.camera.near_plane = 100.0;
    let mut ctx = RenderContext::from_config(&config);
    let mut render = cube_render(&config);

    let triangles = render.render(&mut ctx).unwrap();

    // The nearest cube face is at depth 5: D - z + 1 = 96.
    assert_eq!(triangles.len(), 12);
    assert!((ctx.camera().position().z + 96.0).abs() < 1e-4);
}

#[test]
fn zero_retry_ceiling_makes_any_restart_fatal() {
    let mut config = sample_config();
    config.camera.near_plane = 100.0;
    config.render.max_retries = 0;
    let mut ctx = RenderContext::from_config(&config);
    let mut render = cube_render(&config);

    let result = render.render(&mut ctx);

    assert!(matches!(
        result,
        Err(RenderError::RetryLimitExceeded { retries: 0 })
    ));
}

#[test]
fn near_plane_beyond_float_precision_hits_the_ceiling() {
    // At this depth the pushback rounds away: 5 + 1e9 == 1e9 in f32, so every
    // pass lands back inside the near plane.
    let mut config = sample_config();
    config.camera.near_plane = 1.0e9;
    let mut ctx = RenderContext::from_config(&config);
    let mut render = cube_render(&config);

    let result = render.render(&mut ctx);

    assert!(matches!(
        result,
        Err(RenderError::RetryLimitExceeded { retries: 16 })
    ));
}

#[test]
fn sliver_that_projects_to_one_pixel_writes_nothing() {
    let config = sample_config();
    let mut ctx = RenderContext::from_config(&config);
    let mut render = Render::new();
    render.insert_scene(
        Scene::new(ModelInstance::default()),
        Model::triangle(
            Vec3::new(100.0, 0.0, 50.0),
            Vec3::new(100.001, 0.0, 50.0),
            Vec3::new(100.0, -0.001, 50.0),
            config.render.color,
        ),
    );

    let triangles = render.render(&mut ctx).unwrap();
    let mut canvas = Canvas::new(ctx.viewport().width(), ctx.viewport().height());
    let written = ScanlineRasterizer::new().draw_frame(&triangles, &mut canvas.as_framebuffer());

    assert_eq!(triangles.len(), 1);
    assert!(triangles[0].is_degenerate());
    assert_eq!(written, 0);
    assert!(canvas.pixels().iter().all(|&c| c == colors::BACKGROUND));
}

#[test]
fn off_screen_model_writes_no_pixels() {
    let config = sample_config();
    let mut ctx = RenderContext::from_config(&config);
    let mut render = Render::new();
    render.insert_scene(
        Scene::new(ModelInstance::at(Vec3::new(50.0, 0.0, 6.0))),
        Model::cube(2.0, config.render.color),
    );

    let triangles = render.render(&mut ctx).unwrap();
    let mut canvas = Canvas::new(ctx.viewport().width(), ctx.viewport().height());
    let written = ScanlineRasterizer::new().draw_frame(&triangles, &mut canvas.as_framebuffer());

    assert_eq!(triangles.len(), 12);
    assert_eq!(written, 0);
}

#[test]
fn threaded_animation_matches_inline_animation() {
    let config = sample_config();
    let step = AnimationStep::spin(Vec3::new(0.1, 0.2, 0.0));
    let scene = Scene::new(ModelInstance::at(Vec3::new(0.0, 0.0, 6.0))).with_animation(step);

    let mut inline = Render::new();
    inline.insert_scene(scene.clone(), Model::default());
    let mut inline_ctx = RenderContext::from_config(&config);
    inline_ctx.set_animation_enabled(true);

    let mut threaded = Render::new();
    threaded.insert_scene(scene, Model::default());
    let mut threaded_ctx = RenderContext::from_config(&config);
    let animator = Animator::spawn().unwrap();

    // Inline applies the step while composing; threaded applies it between frames.
    inline.render(&mut inline_ctx).unwrap();
    threaded.render(&mut threaded_ctx).unwrap();
    let queued = threaded.submit_animation(&animator).unwrap();
    threaded.apply_poses(animator.collect(queued).unwrap());

    let inline_pose = inline.state().get(0).unwrap().scene().model_instance();
    let threaded_pose = threaded.state().get(0).unwrap().scene().model_instance();
    assert_eq!(inline_pose, threaded_pose);
}

#[test]
fn frame_is_written_as_png() {
    let mut canvas = Canvas::new(16, 8);
    let triangle = Triangle::from_coords((0, 0), (16, 0), (0, 8), 1.0, [255, 0, 0]);
    ScanlineRasterizer::new().fill_triangle(&triangle, &mut canvas.as_framebuffer());

    let path = std::env::temp_dir().join(format!("rastery-{}-frame.png", std::process::id()));
    canvas.save(&path).unwrap();
    let image = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).ok();

    assert_eq!(image.dimensions(), (16, 8));
    assert_eq!(image.get_pixel(1, 1), &image::Rgba([255, 0, 0, 255]));
}
