use crate::error::{Error, Result};
use crate::geometry::Point;

/// Point-in-convex-polygon test by consistent edge side.
///
/// The sign of the first edge's cross product fixes the expected side;
/// zero counts as the non-positive side. Vertices themselves are inside.
pub fn point_in_convex_polygon(p: Point, poly: &[Point]) -> Result<bool> {
    if poly.len() < 3 {
        return Err(Error::DegeneratePolygon(poly.len()));
    }
    if poly.contains(&p) {
        return Ok(true);
    }
    let n = poly.len();
    let mut expected: Option<bool> = None;
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        let positive = cross > 0.0;
        match expected {
            None => expected = Some(positive),
            Some(side) if side != positive => return Ok(false),
            Some(_) => {}
        }
    }
    Ok(true)
}

/// Index of the first polygon containing `p`.
pub fn resolve_hit<P: AsRef<[Point]>>(p: Point, polygons: &[P]) -> Result<Option<usize>> {
    for (i, poly) in polygons.iter().enumerate() {
        if point_in_convex_polygon(p, poly.as_ref())? {
            return Ok(Some(i));
        }
    }
    Ok(None)
}
