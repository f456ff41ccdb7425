use glam::Vec3;

/// Position of the scene's single directional light. Only its direction matters.
pub(crate) const SUN_POSITION: Vec3 = Vec3::new(5.0, 10.0, 5.0);
/// Flat white ambient term added to every lit surface.
pub(crate) const AMBIENT: f32 = 0.4;

/// `xyz` is the unit direction towards the sun, `w` the ambient term.
pub(crate) fn sun() -> [f32; 4] {
    SUN_POSITION.normalize().extend(AMBIENT).to_array()
}

macro_rules! scene_prelude {
    () => {
        r#"
struct Scene {
    view_proj: mat4x4<f32>,
    sun: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: Scene;

// Ambient plus full-strength lambert, clamped so lit faces saturate.
fn shade(albedo: vec3<f32>, normal: vec3<f32>) -> vec3<f32> {
    let lambert = max(dot(normalize(normal), scene.sun.xyz), 0.0);
    return min(albedo * (scene.sun.w + lambert), vec3<f32>(1.0));
}
"#
    };
}

/// Instanced unit cubes, one translation and color per instance.
pub const CUBE_SHADER: &str = concat!(
    scene_prelude!(),
    r#"
struct CubeCorner {
    @location(0) offset: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct CubeInstance {
    @location(2) col0: vec4<f32>,
    @location(3) col1: vec4<f32>,
    @location(4) col2: vec4<f32>,
    @location(5) col3: vec4<f32>,
    @location(6) albedo: vec4<f32>,
};

struct Surface {
    @builtin(position) clip: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) albedo: vec3<f32>,
};

@vertex
fn vs_main(corner: CubeCorner, cube: CubeInstance) -> Surface {
    let place = mat4x4<f32>(cube.col0, cube.col1, cube.col2, cube.col3);
    var out: Surface;
    out.clip = scene.view_proj * place * vec4<f32>(corner.offset, 1.0);
    // Translation only, so the face normal is unchanged.
    out.normal = corner.normal;
    out.albedo = cube.albedo.rgb;
    return out;
}

@fragment
fn fs_main(in: Surface) -> @location(0) vec4<f32> {
    return vec4<f32>(shade(in.albedo, in.normal), 1.0);
}
"#
);

/// Flat ground plane at `y = 0`, lit like the cubes with an upward normal.
pub const GROUND_SHADER: &str = concat!(
    scene_prelude!(),
    r#"
struct GroundCorner {
    @location(0) position: vec3<f32>,
    @location(1) albedo: vec4<f32>,
};

struct GroundSurface {
    @builtin(position) clip: vec4<f32>,
    @location(0) albedo: vec3<f32>,
};

@vertex
fn vs_ground(corner: GroundCorner) -> GroundSurface {
    var out: GroundSurface;
    out.clip = scene.view_proj * vec4<f32>(corner.position, 1.0);
    out.albedo = corner.albedo.rgb;
    return out;
}

@fragment
fn fs_ground(in: GroundSurface) -> @location(0) vec4<f32> {
    return vec4<f32>(shade(in.albedo, vec3<f32>(0.0, 1.0, 0.0)), 1.0);
}
"#
);
