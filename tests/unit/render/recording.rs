use super::*;

fn square() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((4.0, 0.0));
    p.line_to((4.0, 4.0));
    p.close_path();
    p
}

fn names(ops: &[DrawOp]) -> Vec<&'static str> {
    ops.iter().map(DrawOp::name).collect()
}

#[test]
fn records_calls_in_order() {
    let mut rec = RecordingSurface::new();
    let img = RasterImage::solid(1, 1, [0, 0, 0, 255]);
    rec.push_layer();
    rec.push_clip(&square(), Affine::IDENTITY);
    rec.fill_path(&square(), Affine::translate((1.0, 2.0)), Rgba::BLACK);
    rec.draw_image_rect(&img, Rect::new(0.0, 0.0, 2.0, 2.0), 0.5);
    rec.pop_clip();
    rec.draw_image(&img, Affine::IDENTITY, 1.0, BlendMode::DestIn);
    rec.pop_layer();

    assert_eq!(
        names(rec.ops()),
        [
            "push-layer",
            "push-clip",
            "fill",
            "image-rect",
            "pop-clip",
            "image",
            "pop-layer"
        ]
    );
    assert_eq!(
        rec.ops()[2],
        DrawOp::FillPath {
            path: square(),
            transform: Affine::translate((1.0, 2.0)),
            color: Rgba::BLACK,
        }
    );
}

#[test]
fn replay_reproduces_the_recording() {
    let mut rec = RecordingSurface::new();
    rec.fill_path(&square(), Affine::IDENTITY, Rgba::BLACK);
    rec.draw_text(
        "hi",
        &TextStyle::default(),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Affine::IDENTITY,
    );

    let mut copy = RecordingSurface::new();
    rec.replay(&mut copy);
    assert_eq!(copy.ops(), rec.ops());

    rec.clear();
    assert!(rec.ops().is_empty());
    assert_eq!(copy.into_ops().len(), 2);
}
