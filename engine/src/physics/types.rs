//! Physics type re-exports from glam plus the vector helpers shared by the
//! character controller and the orbit camera.
//!
//! Orientation convention: the local `+Z` axis of a rotation is "forward",
//! `+Y` is "up" and `+X` is "right" when looking along forward with up on top.

pub use glam::{Mat3, Quat, Vec2, Vec3};

/// Squared length below which a vector is treated as zero.
pub const EPSILON_SQ: f32 = 1e-8;

/// Frame-rate independent interpolation factor: `1 - e^(-sharpness * dt)`.
///
/// Always in `[0, 1]` for non-negative inputs; tends to `1` as `dt` grows.
#[inline]
pub fn smoothing_factor(sharpness: f32, dt: f32) -> f32 {
    1.0 - (-sharpness * dt).exp()
}

/// Whether `value` is indistinguishable from zero for steering purposes.
#[inline]
pub fn approximately_zero(value: f32) -> bool {
    value.abs() <= EPSILON_SQ
}

/// Remove the component of `v` along `normal` (`normal` need not be unit length).
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.length_squared();
    if len_sq < EPSILON_SQ {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

/// Scale `v` down so its length never exceeds `max_length`.
pub fn clamp_magnitude(v: Vec3, max_length: f32) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq > max_length * max_length {
        v * (max_length / len_sq.sqrt())
    } else {
        v
    }
}

/// Rotation whose forward axis (`+Z`) points along `forward` and whose up axis is
/// as close to `up` as possible.
///
/// Returns identity for a zero `forward`. When `forward` is parallel to `up` a
/// fallback up axis is chosen so the result is still a valid rotation.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = up.cross(f);
    if right.length_squared() < EPSILON_SQ {
        let fallback = if f.y.abs() < 0.99 { Vec3::Y } else { Vec3::Z };
        right = fallback.cross(f);
    }
    let right = right.normalize();
    let up = f.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, f)).normalize()
}

/// Re-express `direction` so it lies in the plane of `surface_normal`, keeping its
/// heading relative to `character_up`. The result is unit length (or zero).
pub fn direction_tangent_to_surface(direction: Vec3, surface_normal: Vec3, character_up: Vec3) -> Vec3 {
    let direction_right = direction.cross(character_up);
    surface_normal.cross(direction_right).normalize_or_zero()
}

/// Position and orientation of an object in world space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, rotation: Quat::IDENTITY }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Map a point from local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

/// Split `v` into its component along `up` and the remainder in the up-plane.
#[inline]
pub fn split_vertical(v: Vec3, up: Vec3) -> (Vec3, Vec3) {
    let vertical = up * v.dot(up);
    (vertical, v - vertical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_factor_bounds() {
        assert_eq!(smoothing_factor(5.0, 0.0), 0.0);
        assert!((smoothing_factor(5.0, 0.1) - (1.0 - (-0.5f32).exp())).abs() < 1e-6);
        assert_eq!(smoothing_factor(5.0, f32::INFINITY), 1.0);
    }

    #[test]
    fn test_project_on_plane_removes_normal_component() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let p = project_on_plane(v, Vec3::Y * 4.0);
        assert_eq!(p, Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn test_clamp_magnitude() {
        let v = clamp_magnitude(Vec3::new(1.0, 0.0, 1.0), 1.0);
        assert!((v.length() - 1.0).abs() < 1e-6);
        let short = Vec3::new(0.2, 0.0, 0.1);
        assert_eq!(clamp_magnitude(short, 1.0), short);
    }

    #[test]
    fn test_look_rotation_forward_axis() {
        let dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        let q = look_rotation(dir, Vec3::Y);
        assert!((q * Vec3::Z - dir).length() < 1e-5);
        assert!((q * Vec3::Y - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_look_rotation_identity_for_z() {
        let q = look_rotation(Vec3::Z, Vec3::Y);
        assert!(q.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn test_look_rotation_parallel_up_is_valid() {
        let q = look_rotation(Vec3::Y, Vec3::Y);
        assert!((q * Vec3::Z - Vec3::Y).length() < 1e-5);
        assert!(q.is_normalized());
    }

    #[test]
    fn test_transform_axes() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!((t.forward() - Vec3::X).length() < 1e-5);
        assert!((t.right() - -Vec3::Z).length() < 1e-5);
        assert!((t.up() - Vec3::Y).length() < 1e-5);
        assert!((t.transform_point(Vec3::Z) - Vec3::new(2.0, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_direction_tangent_on_flat_ground() {
        let d = direction_tangent_to_surface(Vec3::Z, Vec3::Y, Vec3::Y);
        assert!((d - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_direction_tangent_follows_slope() {
        // Ground rising toward +Z at 45 degrees.
        let normal = Vec3::new(0.0, 1.0, -1.0).normalize();
        let d = direction_tangent_to_surface(Vec3::Z, normal, Vec3::Y);
        assert!(d.dot(normal).abs() < 1e-6);
        assert!(d.y > 0.0 && d.z > 0.0);
        assert!((d.length() - 1.0).abs() < 1e-5);
    }
}
