//! End-to-end scenarios through the public API.

use tessera::geometry::star;
use tessera::patterns::WangGrid;
use tessera::{
    render_tile, render_user_tile, ActionLog, CacheStats, Color, Compositor, DrawAction, Palette, Pixmap, Point,
    StrokeKind, StrokeOutcome, TileDescriptor, TileKind,
};

fn color_at(pixmap: &Pixmap, x: u32, y: u32) -> Color {
    Color::from(pixmap.pixel(x, y).expect("pixel in bounds").demultiply())
}

#[test]
fn octagram_at_reference_size() {
    let desc = TileDescriptor::new(TileKind::Octagram1, 150);
    let tile = render_tile(&desc).unwrap();
    let p = Palette::default();

    let s = star(Point::new(75.0, 75.0), 57.6, 75.0, 8, 0.0);
    assert_eq!(s.len(), 16);
    assert_eq!(s.vertices[0], Point::new(150.0, 75.0));

    // Gold body, deep blue corners, white outline somewhere along the edges
    assert_eq!(color_at(&tile, 75, 75), p.accent());
    assert_eq!(color_at(&tile, 75 + 40, 75 + 15), p.accent());
    assert_eq!(color_at(&tile, 3, 3), p.dark());
    let white = tile.pixels().iter().filter(|px| Color::from(px.demultiply()) == p.light()).count();
    assert!(white > 50, "only {} outline pixels", white);
}

#[test]
fn user_line_scales_from_reference() {
    let mut log = ActionLog::new();
    log.push(DrawAction::Line { from: Point::new(10.0, 10.0), to: Point::new(140.0, 140.0), color: Color::BLACK });
    let tile = render_user_tile(&log, 300, &Palette::default()).unwrap();

    for t in [20, 150, 279] {
        assert_eq!(color_at(&tile, t, t), Color::BLACK, "missing stroke at {}", t);
    }
    assert_eq!(color_at(&tile, 10, 10), Palette::default().light());
}

#[test]
fn compositor_records_reference_coordinates() {
    let mut c = Compositor::new(TileDescriptor::new(TileKind::User, 300));
    c.begin_stroke(StrokeKind::Line, Point::new(20.0, 20.0));
    c.update_stroke(Point::new(150.0, 150.0));
    assert_eq!(c.commit_stroke(Point::new(280.0, 280.0)), StrokeOutcome::Committed);

    match c.log().get(0) {
        Some(DrawAction::Line { from, to, .. }) => {
            assert_eq!(*from, Point::new(10.0, 10.0));
            assert_eq!(*to, Point::new(140.0, 140.0));
        }
        other => panic!("expected a line, got {:?}", other),
    }
}

#[test]
fn three_actions_then_two_undos() {
    let mut c = Compositor::new(TileDescriptor::new(TileKind::User, 150));
    for y in [30.0, 60.0, 90.0] {
        c.begin_stroke(StrokeKind::Line, Point::new(10.0, y));
        c.commit_stroke(Point::new(140.0, y));
    }
    assert_eq!(c.log().len(), 3);
    assert!(c.undo());
    assert!(c.undo());
    assert_eq!(c.log().len(), 1);
    match c.log().get(0) {
        Some(DrawAction::Line { from, .. }) => assert_eq!(from.y, 30.0),
        other => panic!("expected the first line, got {:?}", other),
    }
}

#[test]
fn every_kind_is_deterministic() {
    for &kind in TileKind::all() {
        let desc = TileDescriptor::new(kind, 90);
        let a = render_tile(&desc).unwrap();
        let b = render_tile(&desc).unwrap();
        assert_eq!(a.data(), b.data(), "{} differs between renders", kind);
    }
}

#[test]
fn kinds_look_different() {
    let a = render_tile(&TileDescriptor::new(TileKind::Truchet, 120)).unwrap();
    let b = render_tile(&TileDescriptor::new(TileKind::Labyrinth, 120)).unwrap();
    let c = render_tile(&TileDescriptor::new(TileKind::Hilbert, 120)).unwrap();
    assert_ne!(a.data(), b.data());
    assert_ne!(b.data(), c.data());
}

#[test]
fn viewport_reuses_cached_tile() {
    let mut c = Compositor::new(TileDescriptor::new(TileKind::Wang, 100));
    c.paint_viewport(640, 480).unwrap();
    c.paint_viewport(640, 480).unwrap();
    c.export_composite(1024, 768).unwrap();
    assert_eq!(c.stats(), CacheStats { hits: 2, renders: 1 });
}

#[test]
fn fill_inside_drawn_box_through_compositor() {
    let mut c = Compositor::new(TileDescriptor::new(TileKind::User, 300));
    // Box in viewport pixels of the second tile row, 2x the reference size
    let corners = [(80.0, 380.0), (220.0, 380.0), (220.0, 520.0), (80.0, 520.0)];
    for i in 0..4 {
        let (a, b) = (corners[i], corners[(i + 1) % 4]);
        c.begin_stroke(StrokeKind::Line, Point::new(a.0, a.1));
        c.commit_stroke(Point::new(b.0, b.1));
    }
    let red = Color::rgb(220, 30, 30);
    let action = c.fill_at(Point::new(150.0, 450.0), red).unwrap();
    assert!(matches!(action, Some(DrawAction::Fill { .. })));
    assert_eq!(c.log().len(), 5);

    let tile = c.render_tile().unwrap();
    assert_eq!(color_at(tile, 150, 150), red);
    assert_eq!(color_at(tile, 30, 150), Palette::default().light());
}

#[test]
fn wang_grid_wraps_for_the_default_size() {
    let grid = WangGrid::generate(8);
    assert!(grid.is_seamless());
    assert_eq!(grid.cells().len(), 64);
}
