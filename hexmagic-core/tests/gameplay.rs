//! Drives the controller through whole gestures and checks what reaches the
//! renderer.

use hexmagic_core::geometry::centroid;
use hexmagic_core::{Controller, Layout, LayoutSpec, Outcome, Point, Renderer, Scene, TileSprite, Tiles};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SOLUTION: [u32; 19] = [
    3, 17, 18, 19, 7, 1, 11, 16, 2, 5, 6, 9, 12, 4, 8, 14, 10, 13, 15,
];

#[derive(Debug, PartialEq)]
enum Call {
    Draw { tiles: usize, won: bool },
    PrepareDrag { tiles: usize, missing: Option<usize> },
    Dragged { tile: usize, at: Point },
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Renderer for Recorder {
    fn draw(&mut self, scene: &Scene<'_>) {
        self.calls.push(Call::Draw {
            tiles: scene.tiles.len(),
            won: scene.won,
        });
    }

    fn prepare_drag(&mut self, scene: &Scene<'_>) {
        let missing = (0..19).find(|t| scene.sprite(*t).is_none());
        self.calls.push(Call::PrepareDrag {
            tiles: scene.tiles.len(),
            missing,
        });
    }

    fn draw_dragged(&mut self, sprite: &TileSprite, at: Point) {
        assert!(sprite.selected);
        self.calls.push(Call::Dragged {
            tile: sprite.tile,
            at,
        });
    }
}

fn cell_center(c: &Controller, cell: usize) -> Point {
    centroid(&c.cell_polygons()[cell])
}

/// Runs down / move / up and presents every outcome.
fn gesture(c: &mut Controller, r: &mut Recorder, from: Point, to: Point) -> Outcome {
    let down = c.pointer_down(from).unwrap();
    c.present(&down, r);
    let mv = c.pointer_move(to);
    c.present(&mv, r);
    let up = c.pointer_up(to).unwrap();
    c.present(&up, r);
    up
}

#[test]
fn drag_renders_background_then_follows_pointer() {
    let layout = Layout::standard();
    let tiles = Tiles::ordered(&layout);
    let mut c = Controller::new(layout, tiles).unwrap();
    let mut r = Recorder::default();

    let from = cell_center(&c, 0);
    let to = cell_center(&c, 1);
    let out = gesture(&mut c, &mut r, from, to);

    assert_eq!(out, Outcome::Swapped { tile: 0, other: 1 });
    assert_eq!(
        r.calls,
        vec![
            Call::PrepareDrag {
                tiles: 18,
                missing: Some(0)
            },
            Call::Draw {
                tiles: 19,
                won: false
            },
            Call::Dragged {
                tile: 0,
                at: to.offset(-46.0, -46.0)
            },
            Call::Draw {
                tiles: 19,
                won: false
            },
        ]
    );
}

#[test]
fn solving_by_swap_reports_a_win() {
    let layout = Layout::standard();
    let mut values = SOLUTION;
    values.swap(5, 13);
    let tiles = Tiles::from_values(&layout, &values).unwrap();
    let mut c = Controller::new(layout, tiles).unwrap();
    assert!(!c.is_won());

    let mut r = Recorder::default();
    let (a, b) = (cell_center(&c, 5), cell_center(&c, 13));
    gesture(&mut c, &mut r, a, b);

    assert!(c.is_won());
    assert_eq!(
        r.calls.last(),
        Some(&Call::Draw {
            tiles: 19,
            won: true
        })
    );
}

#[test]
fn solving_by_detach_and_place() {
    let layout = Layout::standard();
    let tiles = Tiles::from_values(&layout, &SOLUTION).unwrap();
    let mut c = Controller::new(layout, tiles).unwrap();
    let mut r = Recorder::default();

    let parked = Point::new(650.0, 200.0);
    let from = cell_center(&c, 11);
    assert!(matches!(
        gesture(&mut c, &mut r, from, parked),
        Outcome::Detached { .. }
    ));
    assert!(!c.is_won());
    assert_eq!(c.verdict().row_sums[2], 38 - 9);

    let back = cell_center(&c, 11);
    assert_eq!(
        gesture(&mut c, &mut r, parked, back),
        Outcome::Placed { tile: 8, cell: 11 }
    );
    assert!(c.is_won());
}

#[test]
fn occupied_cell_never_gets_a_second_tile() {
    let layout = Layout::standard();
    let mut c = Controller::shuffled(layout, &mut SmallRng::seed_from_u64(99)).unwrap();
    let mut r = Recorder::default();

    for step in 0..40u32 {
        let from = cell_center(&c, (step as usize * 7) % 19);
        let to = if step % 3 == 0 {
            Point::new(600.0 + step as f64, 50.0 + 8.0 * step as f64)
        } else {
            cell_center(&c, (step as usize * 11 + 3) % 19)
        };
        gesture(&mut c, &mut r, from, to);

        let mut seen = [false; 19];
        for p in c.tiles().positions() {
            if let Some(cell) = p.cell() {
                assert!(!seen[cell], "step {}: cell {} doubly occupied", step, cell);
                seen[cell] = true;
            }
        }
        assert_eq!(c.tiles().len(), 19);
    }
}

#[test]
fn reset_deals_a_new_full_board() {
    let layout = Layout::standard();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut c = Controller::shuffled(layout, &mut rng).unwrap();
    c.pointer_down(cell_center(&c, 0)).unwrap();
    c.pointer_up(Point::new(700.0, 700.0)).unwrap();
    c.pointer_down(cell_center(&c, 1)).unwrap();
    c.reset(&mut rng).unwrap();
    assert_eq!(c.selected(), None);
    assert!(c.tiles().positions().iter().all(|p| p.cell().is_some()));
}

#[test]
fn layout_spec_parses_from_json() {
    let json = r#"{
        "rows": [
            {"x_offset": 1.0, "count": 3},
            {"x_offset": 0.5, "count": 4},
            {"x_offset": 0.0, "count": 5},
            {"x_offset": 0.5, "count": 4},
            {"x_offset": 1.0, "count": 3}
        ]
    }"#;
    let spec: LayoutSpec = serde_json::from_str(json).unwrap();
    assert_eq!(spec, LayoutSpec::default());
    let layout = Layout::try_from(spec).unwrap();
    assert_eq!(layout.cell_count(), 19);
    assert_eq!(layout.row_starts(), &[0, 3, 7, 12, 16]);
}
