use bytemuck::{Pod, Zeroable};
use cubescape_common::{Color, SceneObject};
use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, PartialEq)]
pub(crate) struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct GroundVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

fn rgba(color: Color) -> [f32; 4] {
    let [r, g, b] = color.to_rgb_f32();
    [r, g, b, 1.0]
}

/// Unit cube centred on the origin, one quad per face.
pub(crate) fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    // (normal, four corners counter-clockwise seen from outside)
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0],  [[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]]),
        ([0.0, 0.0, -1.0], [[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]]),
        ([1.0, 0.0, 0.0],  [[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]]),
        ([-1.0, 0.0, 0.0], [[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]]),
        ([0.0, 1.0, 0.0],  [[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]]),
        ([0.0, -1.0, 0.0], [[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u16;
        vertices.extend(corners.map(|position| Vertex { position, normal }));
        indices.extend([0, 1, 2, 2, 3, 0].map(|i| base + i));
    }
    (vertices, indices)
}

/// Flat square on y = 0, `half_extent` from the origin along x and z.
pub(crate) fn ground_mesh(half_extent: f32, color: Color) -> Vec<GroundVertex> {
    let e = half_extent;
    let color = rgba(color);
    // Counter-clockwise seen from above.
    [[-e, e], [e, e], [e, -e], [e, -e], [-e, -e], [-e, e]]
        .map(|[x, z]| GroundVertex {
            position: [x, 0.0, z],
            color,
        })
        .to_vec()
}

/// One instance per object, in scene order, capped at `limit`.
pub(crate) fn cube_instances(objects: &[SceneObject], limit: usize) -> Vec<InstanceData> {
    objects
        .iter()
        .take(limit)
        .map(|o| {
            let cols = Mat4::from_translation(o.position).to_cols_array_2d();
            InstanceData {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
                color: rgba(o.color),
            }
        })
        .collect()
}
