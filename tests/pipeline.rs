//! End-to-end pipeline tests: buffer in, filtered preview and mosaic out.

use pretty_assertions::assert_eq;

use brix::types::Colour;
use brix::{
    adjust, grid_dimensions, sample_mosaic, validate_catalog, BrickPalette, BrixError,
    FilterRegistry, PixelBuffer, UserParams,
};

/// A vertical black-to-white gradient, one luminance step per row.
fn vertical_gradient(width: u32, height: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(width, height, Colour::BLACK);
    for y in 0..height {
        let v = ((y as f32 / (height - 1) as f32) * 255.0).round() as u8;
        for x in 0..width {
            buf.set_pixel(x, y, Colour::rgb(v, v, v));
        }
    }
    buf
}

#[test]
fn solid_red_to_uniform_mosaic() {
    // 32x32 solid red through clean-quantize onto a 16x16 grid: every
    // cell is the palette colour nearest pure red.
    let registry = FilterRegistry::builtin();
    let palette = BrickPalette::standard();

    let photo = PixelBuffer::filled(32, 32, Colour::rgb(255, 0, 0));
    let mut params = UserParams::new();
    params.insert("dithering".to_string(), "none".into());

    let filtered = registry.apply("clean-quantize", &photo, &params).unwrap();
    let mosaic = sample_mosaic(&filtered, 16, 16, palette).unwrap();

    let expected = palette.nearest(Colour::rgb(255, 0, 0));
    assert_eq!(expected.name, "red");
    assert_eq!(mosaic.width(), 16);
    assert_eq!(mosaic.height(), 16);
    for cell in mosaic.cells() {
        assert_eq!(*cell, expected);
    }
}

#[test]
fn duotone_gradient_splits_exactly_at_threshold() {
    let registry = FilterRegistry::builtin();
    let palette = BrickPalette::standard();
    let black = palette.by_name("black").unwrap().colour;
    let white = palette.by_name("white").unwrap().colour;

    // 256 rows: row y has luminance exactly y
    let gradient = vertical_gradient(8, 256);
    let out = registry.apply("duotone", &gradient, &UserParams::new()).unwrap();

    for y in 0..256u32 {
        let expected = if y >= 128 { white } else { black };
        assert_eq!(out.pixel(3, y), expected, "row {}", y);
    }
}

#[test]
fn quantized_input_passes_through_unchanged() {
    let registry = FilterRegistry::builtin();
    let palette = BrickPalette::standard();

    // Compose an image purely from palette colours
    let mut buf = PixelBuffer::filled(16, 16, palette.by_name("tan").unwrap().colour);
    for i in 0..16u32 {
        buf.set_pixel(i, i, palette.by_name("dark-green").unwrap().colour);
    }

    let mut params = UserParams::new();
    params.insert("dithering".to_string(), "none".into());
    let out = registry.apply("clean-quantize", &buf, &params).unwrap();
    assert_eq!(out, buf);
}

#[test]
fn unknown_filter_aborts_without_touching_input() {
    let registry = FilterRegistry::builtin();
    let buf = PixelBuffer::filled(8, 8, Colour::rgb(1, 2, 3));
    let snapshot = buf.clone();

    let result = registry.apply("vaporwave", &buf, &UserParams::new());
    match result {
        Err(BrixError::UnknownFilter { id }) => assert_eq!(id, "vaporwave"),
        other => panic!("expected UnknownFilter, got {:?}", other),
    }
    assert_eq!(buf, snapshot);
}

#[test]
fn block_centre_sampling_on_integral_multiple() {
    // Source dimensions are an exact k-multiple of the grid: the sampler
    // reads the true centre of each block even after filtering.
    let registry = FilterRegistry::builtin();
    let palette = BrickPalette::standard();

    let k = 5u32;
    let mut photo = PixelBuffer::filled(16 * k, 16 * k, Colour::rgb(13, 105, 171));
    // Mark each block's centre with a different palette colour
    for gy in 0..16 {
        for gx in 0..16 {
            photo.set_pixel(gx * k + k / 2, gy * k + k / 2, Colour::rgb(196, 40, 27));
        }
    }

    let mut params = UserParams::new();
    params.insert("dithering".to_string(), "none".into());
    let filtered = registry.apply("clean-quantize", &photo, &params).unwrap();
    let mosaic = sample_mosaic(&filtered, 16, 16, palette).unwrap();

    for cell in mosaic.cells() {
        assert_eq!(cell.name, "red");
    }
}

#[test]
fn adjustment_filter_sample_chain_is_deterministic() {
    let registry = FilterRegistry::builtin();
    let palette = BrickPalette::standard();
    let photo = vertical_gradient(48, 48);

    let run = || {
        let adjusted = adjust::contrast(&adjust::brightness(&photo, 0.1), 0.2);
        let filtered = registry
            .apply("floyd-steinberg", &adjusted, &UserParams::new())
            .unwrap();
        sample_mosaic(&filtered, 16, 16, palette).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn derived_grid_fits_the_cap() {
    let (w, h) = grid_dimensions(4000, 3000, 640);
    assert!(w <= 512 && h <= 512);
    assert_eq!(w % 16, 0);
    assert_eq!(h % 16, 0);

    // And the derived grid is directly usable by the sampler
    let photo = PixelBuffer::filled(80, 60, Colour::rgb(40, 127, 70));
    let mosaic = sample_mosaic(&photo, w, h, BrickPalette::standard()).unwrap();
    assert_eq!((mosaic.width(), mosaic.height()), (w, h));
}

#[test]
fn mosaic_closed_over_palette_for_every_filter() {
    let registry = FilterRegistry::builtin();
    let palette = BrickPalette::standard();
    let photo = vertical_gradient(32, 32);

    for id in registry.ids().collect::<Vec<_>>() {
        let filtered = registry.apply(id, &photo, &UserParams::new()).unwrap();
        let mosaic = sample_mosaic(&filtered, 16, 16, palette).unwrap();
        for cell in mosaic.cells() {
            assert!(
                palette.by_id(cell.id).is_some(),
                "{} produced a non-palette cell",
                id
            );
        }
    }
}

#[test]
fn preview_round_trips_through_host_image() {
    // The filtered preview converts to a host image, survives a PNG
    // encode/decode, and converts back unchanged.
    let registry = FilterRegistry::builtin();
    let photo = vertical_gradient(24, 24);
    let filtered = registry.apply("cartoon", &photo, &UserParams::new()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preview.png");
    filtered.to_image().save(&path).unwrap();

    let reloaded = image::open(&path).unwrap().to_rgba8();
    let back = PixelBuffer::from_image(&reloaded);
    assert_eq!(back, filtered);
}

#[test]
fn catalog_validates_and_serializes() {
    let registry = FilterRegistry::builtin();
    assert!(validate_catalog(&registry).is_ok());

    let json = serde_json::to_value(registry.filters()).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 25);
    for f in arr {
        assert!(f["id"].is_string());
        assert!(f["display_name"].is_string());
        assert!(f["category"].is_string());
        assert!(f["schema"].is_array());
    }
}

#[test]
fn host_json_params_drive_the_pipeline() {
    let registry = FilterRegistry::builtin();
    let palette = BrickPalette::standard();

    let params: UserParams = serde_json::from_str(
        r#"{"colour-a": "dark-blue", "colour-b": "cool-yellow", "threshold": 96}"#,
    )
    .unwrap();

    let gradient = vertical_gradient(8, 256);
    let out = registry.apply("duotone", &gradient, &params).unwrap();

    let dark = palette.by_name("dark-blue").unwrap().colour;
    let light = palette.by_name("cool-yellow").unwrap().colour;
    assert_eq!(out.pixel(0, 0), dark);
    assert_eq!(out.pixel(0, 255), light);
    // Split moves with the threshold
    assert_eq!(out.pixel(0, 95), dark);
    assert_eq!(out.pixel(0, 96), light);
}
