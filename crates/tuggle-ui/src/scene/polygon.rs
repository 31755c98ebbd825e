use std::f32::consts::TAU;

use tuggle_ui_graphics::{Point, Rect};

/// Triangulated filled shape in node-local coordinates.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point>,
    indices: Vec<[u32; 3]>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>, indices: Vec<[u32; 3]>) -> Self {
        let count = vertices.len() as u32;
        let indices = indices
            .into_iter()
            .filter(|tri| tri.iter().all(|&i| i < count))
            .collect();
        Self { vertices, indices }
    }

    /// Fan-triangulates a convex outline.
    pub fn convex(outline: Vec<Point>) -> Self {
        let indices = (1..outline.len().saturating_sub(1) as u32)
            .map(|i| [0, i, i + 1])
            .collect();
        Self::new(outline, indices)
    }

    /// Disc centred on the origin.
    pub fn circle(radius: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity(segments + 1);
        vertices.push(Point::ZERO);
        vertices.extend((0..segments).map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            Point::new(angle.cos() * radius, angle.sin() * radius)
        }));
        let n = segments as u32;
        let indices = (0..n).map(|i| [0, 1 + i, 1 + (i + 1) % n]).collect();
        Self { vertices, indices }
    }

    /// Annulus centred on the origin.
    pub fn ring(inner_radius: f32, outer_radius: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity(segments * 2);
        for i in 0..segments {
            let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
            vertices.push(Point::new(cos * inner_radius, sin * inner_radius));
            vertices.push(Point::new(cos * outer_radius, sin * outer_radius));
        }
        let n = segments as u32;
        let mut indices = Vec::with_capacity(segments * 2);
        for i in 0..n {
            let inner = 2 * i;
            let outer = inner + 1;
            let next_inner = 2 * ((i + 1) % n);
            let next_outer = next_inner + 1;
            indices.push([inner, outer, next_outer]);
            indices.push([inner, next_outer, next_inner]);
        }
        Self { vertices, indices }
    }

    /// Axis-aligned rectangle with its lower-left corner at the origin.
    pub fn rect(width: f32, height: f32) -> Self {
        Self::convex(vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ])
    }

    pub fn triangle(a: Point, b: Point, c: Point) -> Self {
        Self::new(vec![a, b, c], vec![[0, 1, 2]])
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        Rect::bounding(&self.vertices).unwrap_or_default()
    }

    /// Iterates triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices.iter().map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Point-in-polygon over the triangulation.
    pub fn contains(&self, p: Point) -> bool {
        self.triangles().any(|[a, b, c]| {
            let d1 = edge_sign(p, a, b);
            let d2 = edge_sign(p, b, c);
            let d3 = edge_sign(p, c, a);
            let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            !(has_neg && has_pos)
        })
    }
}

fn edge_sign(p: Point, a: Point, b: Point) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}
