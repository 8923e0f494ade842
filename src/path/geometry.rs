use kurbo::PathEl;

use crate::{
    foundation::core::{BezPath, Point},
    path::parser::{PathCommand, parse_path},
};

/// Build Bezier geometry from parsed commands.
///
/// Arc commands (`A`/`a`) are drawn as a straight chord to the arc's end point.
/// `S`/`s` reflect the previous cubic control point when the previous command was a cubic.
pub fn build_bezpath(commands: &[PathCommand]) -> BezPath {
    let mut path = BezPath::new();
    let mut cur = Point::ZERO;
    let mut ctrl = Point::ZERO;
    let mut prev = ' ';

    for cmd in commands {
        let a: Vec<f64> = cmd.args.iter().map(|&v| f64::from(v)).collect();
        let rel = |x: f64, y: f64, cur: Point| Point::new(cur.x + x, cur.y + y);
        if !matches!(cmd.kind, 'M' | 'm' | 'Z' | 'z') {
            ensure_started(&mut path, cur);
        }

        match cmd.kind {
            'M' | 'm' if a.len() >= 2 => {
                cur = if cmd.kind == 'm' {
                    rel(a[0], a[1], cur)
                } else {
                    Point::new(a[0], a[1])
                };
                path.move_to(cur);
            }
            'L' | 'l' if a.len() >= 2 => {
                cur = if cmd.kind == 'l' {
                    rel(a[0], a[1], cur)
                } else {
                    Point::new(a[0], a[1])
                };
                path.line_to(cur);
            }
            'H' | 'h' if !a.is_empty() => {
                cur.x = if cmd.kind == 'h' { cur.x + a[0] } else { a[0] };
                path.line_to(cur);
            }
            'V' | 'v' if !a.is_empty() => {
                cur.y = if cmd.kind == 'v' { cur.y + a[0] } else { a[0] };
                path.line_to(cur);
            }
            'C' | 'c' if a.len() >= 6 => {
                let base = if cmd.kind == 'c' { cur } else { Point::ZERO };
                let p1 = rel(a[0], a[1], base);
                let p2 = rel(a[2], a[3], base);
                let p3 = rel(a[4], a[5], base);
                path.curve_to(p1, p2, p3);
                ctrl = p2;
                cur = p3;
            }
            'S' | 's' if a.len() >= 4 => {
                let p1 = if matches!(prev, 'C' | 'c' | 'S' | 's') {
                    Point::new(2.0 * cur.x - ctrl.x, 2.0 * cur.y - ctrl.y)
                } else {
                    cur
                };
                let base = if cmd.kind == 's' { cur } else { Point::ZERO };
                let p2 = rel(a[0], a[1], base);
                let p3 = rel(a[2], a[3], base);
                path.curve_to(p1, p2, p3);
                ctrl = p2;
                cur = p3;
            }
            'Q' | 'q' if a.len() >= 4 => {
                let base = if cmd.kind == 'q' { cur } else { Point::ZERO };
                let p1 = rel(a[0], a[1], base);
                let p2 = rel(a[2], a[3], base);
                path.quad_to(p1, p2);
                ctrl = p1;
                cur = p2;
            }
            'A' | 'a' if a.len() >= 7 => {
                cur = if cmd.kind == 'a' {
                    rel(a[5], a[6], cur)
                } else {
                    Point::new(a[5], a[6])
                };
                path.line_to(cur);
            }
            'Z' | 'z' => {
                if !path.elements().is_empty() {
                    path.close_path();
                }
            }
            _ => continue,
        }
        prev = cmd.kind;
    }

    path
}

/// Parse path data and build its geometry. `None` when nothing parses.
pub fn parse_bezpath(src: &str) -> Option<BezPath> {
    let commands = parse_path(src);
    if commands.is_empty() {
        return None;
    }
    Some(build_bezpath(&commands))
}

// kurbo requires an open subpath before drawing segments.
fn ensure_started(path: &mut BezPath, from: Point) {
    if matches!(path.elements().last(), None | Some(PathEl::ClosePath)) {
        path.move_to(from);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/geometry.rs"]
mod tests;
