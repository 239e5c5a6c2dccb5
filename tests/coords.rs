extern crate tilecanvas;

use tilecanvas::{tile_of, tile_local_pos, tile_viewport_origin};
use tilecanvas::{viewport_to_world, world_to_viewport};
use tilecanvas::{TileCoord, ViewState, ViewportPoint, WorldPoint};

fn views() -> Vec<ViewState> {
    let mut out = vec![];
    for &(ox, oy) in &[(0.0, 0.0), (-950.25, 13.5), (1200.0, -4000.75)] {
        for &scale in &[0.5, 0.848, 1.0, 2.0, 3.3, 8.0] {
            let mut v = ViewState::new(640, 480);
            v.origin = WorldPoint::new(ox, oy);
            v.scale = scale;
            out.push(v);
        }
    }
    out
}

#[test_log::test]
fn tile_space_round_trip() {
    for view in views() {
        for y in (0 .. 480).step_by(37) {
            for x in (0 .. 640).step_by(29) {
                let p = ViewportPoint::new(x as f64 + 0.5, y as f64 + 0.5);
                let w = viewport_to_world(p, &view);
                let t = tile_of(w, 400.0);
                let (lx, ly) = tile_local_pos(w, t, 400.0);
                assert!(lx > -1e-9 && lx < 400.0 + 1e-9 && ly > -1e-9 && ly < 400.0 + 1e-9);
                let o = tile_viewport_origin(t, &view, 400.0);
                let back = ViewportPoint::new(o.x + lx / view.scale, o.y + ly / view.scale);
                assert!((back.x - p.x).abs() < 1e-9, "{:?} {:?}", back, p);
                assert!((back.y - p.y).abs() < 1e-9, "{:?} {:?}", back, p);
            }
        }
    }
}

#[test]
fn world_viewport_inverse() {
    for view in views() {
        let p = ViewportPoint::new(123.0, 77.0);
        let q = world_to_viewport(viewport_to_world(p, &view), &view);
        assert!((q.x - p.x).abs() < 1e-9);
        assert!((q.y - p.y).abs() < 1e-9);
    }
}

#[test]
fn tile_of_uses_floor() {
    assert_eq!(tile_of(WorldPoint::new(-0.5, -0.5), 400.0), TileCoord::new(-1, -1));
    assert_eq!(tile_of(WorldPoint::new(0.0, 0.0), 400.0), TileCoord::new(0, 0));
    assert_eq!(tile_of(WorldPoint::new(-400.0, 399.99), 400.0), TileCoord::new(-1, 0));
    assert_eq!(tile_of(WorldPoint::new(-400.01, 800.0), 400.0), TileCoord::new(-2, 2));
}

#[test]
fn tile_origin_follows_view() {
    let mut view = ViewState::new(800, 600);
    view.origin = WorldPoint::new(100.0, -50.0);
    view.scale = 2.0;
    let o = tile_viewport_origin(TileCoord::new(1, 0), &view, 400.0);
    assert_eq!(o, ViewportPoint::new(150.0, 25.0));
}
