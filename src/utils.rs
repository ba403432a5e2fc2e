//! Column-major `[f32; 16]` matrix helpers and small shared utilities.
//!
//! The public API trades in raw column-major arrays rather than a math-crate
//! type so backends can hand matrices straight to uniform uploads.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::field_of_view::FieldOfView;

static DEVICE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generates a unique identifier for any HMD device.
pub fn new_device_id() -> u64 {
    DEVICE_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub fn identity() -> [f32; 16] {
    let mut m = [0.0; 16];
    m[0] = 1.0;
    m[5] = 1.0;
    m[10] = 1.0;
    m[15] = 1.0;
    m
}

/// `a * b` for column-major 4x4 matrices (`m[col * 4 + row]`).
pub fn multiply(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut out = [0.0; 16];
    for col in 0..4 {
        for row in 0..4 {
            let mut v = 0.0;
            for k in 0..4 {
                v += a[k * 4 + row] * b[col * 4 + k];
            }
            out[col * 4 + row] = v;
        }
    }
    out
}

pub fn translation(v: [f32; 3]) -> [f32; 16] {
    let mut m = identity();
    m[12] = v[0];
    m[13] = v[1];
    m[14] = v[2];
    m
}

/// Rotation around the world up axis.
pub fn rotation_y(radians: f32) -> [f32; 16] {
    let (sin, cos) = radians.sin_cos();
    let mut m = identity();
    m[0] = cos;
    m[2] = -sin;
    m[8] = sin;
    m[10] = cos;
    m
}

/// Rotation matrix of a unit quaternion `[x, y, z, w]`.
pub fn quaternion_to_matrix(q: [f32; 4]) -> [f32; 16] {
    let [x, y, z, w] = q;
    let mut m = identity();
    m[0] = 1.0 - 2.0 * (y * y + z * z);
    m[1] = 2.0 * (x * y + z * w);
    m[2] = 2.0 * (x * z - y * w);
    m[4] = 2.0 * (x * y - z * w);
    m[5] = 1.0 - 2.0 * (x * x + z * z);
    m[6] = 2.0 * (y * z + x * w);
    m[8] = 2.0 * (x * z + y * w);
    m[9] = 2.0 * (y * z - x * w);
    m[10] = 1.0 - 2.0 * (x * x + y * y);
    m
}

/// Apply only the rotational 3x3 part of `m` to a direction vector.
pub fn transform_direction(m: &[f32; 16], v: [f32; 3]) -> [f32; 3] {
    [
        m[0] * v[0] + m[4] * v[1] + m[8] * v[2],
        m[1] * v[0] + m[5] * v[1] + m[9] * v[2],
        m[2] * v[0] + m[6] * v[1] + m[10] * v[2],
    ]
}

pub fn add3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot3(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize3(v: [f32; 3]) -> [f32; 3] {
    let len = dot3(v, v).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Right-handed look-at view matrix.
pub fn look_at_rh(eye: [f32; 3], center: [f32; 3], up: [f32; 3]) -> [f32; 16] {
    let f = normalize3(sub3(center, eye));
    let s = normalize3(cross3(f, up));
    let u = cross3(s, f);

    let mut m = identity();
    m[0] = s[0];
    m[4] = s[1];
    m[8] = s[2];
    m[1] = u[0];
    m[5] = u[1];
    m[9] = u[2];
    m[2] = -f[0];
    m[6] = -f[1];
    m[10] = -f[2];
    m[12] = -dot3(s, eye);
    m[13] = -dot3(u, eye);
    m[14] = dot3(f, eye);
    m
}

/// Right-handed, possibly off-center perspective projection covering the
/// given field-of-view port, looking down `-z`, GL clip-space depth.
pub fn perspective_from_fov(fov: &FieldOfView, near_z: f32, far_z: f32) -> [f32; 16] {
    let [tan_up, tan_down, tan_left, tan_right] = fov.tangents();

    let x_scale = 2.0 / (tan_left + tan_right);
    let y_scale = 2.0 / (tan_up + tan_down);

    let mut m = [0.0; 16];
    m[0] = x_scale;
    m[5] = y_scale;
    m[8] = (tan_right - tan_left) * x_scale * 0.5;
    m[9] = (tan_up - tan_down) * y_scale * 0.5;
    m[10] = -(far_z + near_z) / (far_z - near_z);
    m[11] = -1.0;
    m[14] = -2.0 * far_z * near_z / (far_z - near_z);
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &[f32; 16], b: &[f32; 16]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn multiply_by_identity_is_noop() {
        let t = translation([1.0, 2.0, 3.0]);
        assert!(approx(&multiply(&identity(), &t), &t));
        assert!(approx(&multiply(&t, &identity()), &t));
    }

    #[test]
    fn identity_quaternion_gives_identity_matrix() {
        assert!(approx(&quaternion_to_matrix([0.0, 0.0, 0.0, 1.0]), &identity()));
    }

    #[test]
    fn rotation_y_turns_forward_toward_minus_x() {
        let m = rotation_y(std::f32::consts::FRAC_PI_2);
        let v = transform_direction(&m, [0.0, 0.0, -1.0]);
        assert!((v[0] + 1.0).abs() < 1e-5);
        assert!(v[1].abs() < 1e-5);
        assert!(v[2].abs() < 1e-5);
    }

    #[test]
    fn look_at_origin_down_minus_z_is_identity() {
        let m = look_at_rh([0.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]);
        assert!(approx(&m, &identity()));
    }

    #[test]
    fn symmetric_fov_projects_on_center() {
        let fov = FieldOfView::symmetric(45.0);
        let m = perspective_from_fov(&fov, 0.01, 10000.0);
        // tan(45 deg) = 1 on all sides: unit scale, zero off-center terms
        assert!((m[0] - 1.0).abs() < 1e-5);
        assert!((m[5] - 1.0).abs() < 1e-5);
        assert!(m[8].abs() < 1e-5);
        assert!(m[9].abs() < 1e-5);
        assert!((m[11] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn asymmetric_fov_maps_port_edges_to_clip_edges() {
        let fov = FieldOfView {
            up_degrees: 50.0,
            down_degrees: 40.0,
            left_degrees: 55.0,
            right_degrees: 45.0,
        };
        let m = perspective_from_fov(&fov, 0.1, 100.0);
        let [tan_up, _, tan_left, _] = fov.tangents();

        // A point on the left frustum edge at z = -1 lands on ndc x = -1.
        let x = -tan_left;
        let clip_x = m[0] * x + m[8] * -1.0;
        let clip_w = m[11] * -1.0;
        assert!((clip_x / clip_w + 1.0).abs() < 1e-4);

        // A point on the top frustum edge lands on ndc y = +1.
        let y = tan_up;
        let clip_y = m[5] * y + m[9] * -1.0;
        assert!((clip_y / clip_w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn device_ids_are_unique_and_increasing() {
        let a = new_device_id();
        let b = new_device_id();
        assert!(b > a);
    }
}
