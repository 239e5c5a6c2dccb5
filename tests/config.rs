extern crate tilecanvas;

use tilecanvas::*;

#[test]
fn defaults() {
    let c = CanvasConfig::default();
    assert_eq!(c.tile_size, 400);
    assert_eq!(c.margin, 1);
    assert_eq!(c.pan_step, 20.0);
    assert_eq!(c.line_height, 40.0);
    assert_eq!((c.zoom_min, c.zoom_max, c.zoom_divisor), (-1000.0, 3000.0, 1000.0));
    assert_eq!((c.pinch_min_scale, c.pinch_max_scale), (0.5, 8.0));
    assert_eq!(c.background, Rgba8::white());
    assert_eq!(CanvasConfig::from_json("{}").unwrap(), c);
}

#[test_log::test]
fn partial_json_keeps_other_defaults() {
    let c = CanvasConfig::from_json(r##"{ "tile_size": 256, "margin": 0, "background": "#202020" }"##).unwrap();
    assert_eq!(c.tile_size, 256);
    assert_eq!(c.margin, 1);
    assert_eq!(c.background, Rgba8::gray(0x20));
    assert_eq!(c.pan_step, 20.0);
}

#[test]
fn bad_color_is_a_config_error() {
    match CanvasConfig::from_json(r#"{ "background": "white" }"#) {
        Err(Error::Config(e)) => assert!(e.to_string().contains("white"), "{}", e),
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(CanvasConfig::from_json("[1, 2"), Err(Error::Config(_))));
}

#[test_log::test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("tilecanvas-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "pan_step": 35.5, "zoom_max": 2000 }"#).unwrap();
    let c = CanvasConfig::load(&path);
    std::fs::remove_file(&path).unwrap();
    let c = c.unwrap();
    assert_eq!(c.pan_step, 35.5);
    assert_eq!(c.zoom_max, 2000.0);

    let missing = std::env::temp_dir().join("tilecanvas-config-does-not-exist.json");
    assert!(matches!(CanvasConfig::load(&missing), Err(Error::Io(_))));
}

#[test]
fn config_drives_the_canvas() {
    let c = CanvasConfig::from_json(r#"{ "tile_size": 100, "pan_step": 50 }"#).unwrap();
    let mut canvas = TileCanvas::new(c);
    canvas.load_surface(250, 150);
    assert_eq!(canvas.store().tile_size(), 100);
    assert_eq!(canvas.store().len(), 5 * 4);
    canvas.pan(PanDirection::Left);
    assert_eq!(canvas.view().origin, WorldPoint::new(-50.0, 0.0));
    assert!(canvas.store().contains(TileCoord::new(-1, 0)));
}

#[test]
fn color_parsing() {
    assert_eq!("#abc".parse::<Rgba8>().unwrap(), Rgba8::new(0xaa, 0xbb, 0xcc, 255));
    assert_eq!("#FF8000".parse::<Rgba8>().unwrap(), Rgba8::new(255, 128, 0, 255));
    assert_eq!("#00000080".parse::<Rgba8>().unwrap(), Rgba8::new(0, 0, 0, 128));
    for bad in &["#12", "abc", "#12345g", ""] {
        match bad.parse::<Rgba8>() {
            Err(Error::InvalidColor(s)) => assert_eq!(&s, bad),
            other => panic!("{:?} gave {:?}", bad, other),
        }
    }
    let c = Rgba8::new(1, 2, 3, 255);
    assert_eq!(c.to_hex().parse::<Rgba8>().unwrap(), c);
}
