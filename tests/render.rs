use tilebrot::{render, render_with_stats, RenderConfig, RenderError, TiledRenderer};

fn canonical() -> RenderConfig {
    RenderConfig {
        width: 64,
        height: 48,
        max_iter: 256,
        tile_size: 16,
        ..RenderConfig::default()
    }
}

#[test]
fn centre_of_the_canonical_view_never_escapes() {
    let buffer = TiledRenderer::new(&canonical()).unwrap().divergence(None).unwrap();
    assert_eq!(buffer.get(32, 24), 255);
}

#[test]
fn counts_stay_below_the_cap() {
    for &max_iter in &[1, 2, 17, 256] {
        let config = RenderConfig { max_iter, ..canonical() };
        let buffer = TiledRenderer::new(&config).unwrap().divergence(None).unwrap();
        assert!(buffer.counts().iter().all(|&c| c < max_iter));
    }
}

#[test]
fn far_away_viewport_escapes_at_once() {
    let config = RenderConfig {
        x_min: 5.0,
        x_max: 6.0,
        y_min: 5.0,
        y_max: 6.0,
        ..canonical()
    };
    let buffer = TiledRenderer::new(&config).unwrap().divergence(None).unwrap();
    assert!(buffer.counts().iter().all(|&c| c == 1));
}

#[test]
fn single_tile_and_many_tiles_agree() {
    let one = RenderConfig { tile_size: 64, ..canonical() };
    let reference = TiledRenderer::new(&one).unwrap().divergence(None).unwrap();
    for &(tile_size, threads) in &[(1, 1), (7, 1), (16, 3), (30, 2), (48, 4)] {
        let config = RenderConfig { tile_size, threads, ..canonical() };
        let buffer = TiledRenderer::new(&config).unwrap().divergence(None).unwrap();
        assert_eq!(buffer, reference, "tile {} threads {}", tile_size, threads);
    }
}

#[test]
fn oversized_tile_matches_a_single_tile() {
    let single = RenderConfig { tile_size: 64, ..canonical() };
    let reference = TiledRenderer::new(&single).unwrap().divergence(None).unwrap();
    for &threads in &[1, 4] {
        let config = RenderConfig {
            tile_size: usize::max_value(),
            threads,
            ..canonical()
        };
        let buffer = TiledRenderer::new(&config).unwrap().divergence(None).unwrap();
        assert_eq!(buffer, reference);
    }
}

#[test]
fn cardioid_interior_is_uniform() {
    let config = RenderConfig {
        x_min: -0.6,
        x_max: -0.4,
        y_min: -0.1,
        y_max: 0.1,
        max_iter: 100,
        ..canonical()
    };
    let buffer = TiledRenderer::new(&config).unwrap().divergence(None).unwrap();
    assert!(buffer.counts().iter().all(|&c| c == 99));

    let image = render(&config).unwrap();
    let first = image[(0, 0)][0];
    assert!(image.iter().all(|&p| p == first));
}

#[test]
fn single_iteration_renders_black() {
    let config = RenderConfig { max_iter: 1, ..canonical() };
    let image = render(&config).unwrap();
    assert!(image.iter().all(|&p| p == 0));
}

#[test]
fn image_has_the_requested_shape() {
    let (image, stats) = render_with_stats(&canonical(), None).unwrap();
    assert_eq!(image.dimensions(), (64, 48));
    assert_eq!(stats.tiles, (4, 3));
    assert_eq!(*image.iter().max().unwrap(), 255);
}

#[test]
fn bad_input_fails_before_rendering() {
    let inverted = RenderConfig { x_min: 1.0, x_max: -2.0, ..canonical() };
    match render(&inverted) {
        Err(RenderError::InvalidViewport { .. }) => (),
        other => panic!("unexpected {:?}", other.map(|i| i.dimensions())),
    }
    let overflowing = RenderConfig { x_min: -1e308, x_max: 1e308, ..canonical() };
    match render(&overflowing) {
        Err(RenderError::InvalidViewport { .. }) => (),
        other => panic!("unexpected {:?}", other.map(|i| i.dimensions())),
    }
    assert_eq!(
        render(&RenderConfig { max_iter: 0, ..canonical() }).map(|i| i.dimensions()),
        Err(RenderError::InvalidIterationCap(0))
    );
}
