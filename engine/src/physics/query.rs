//! Physics query capability
//!
//! The orbit camera only needs one question answered by the physics layer:
//! "which colliders does a sphere swept from here hit?". [`PhysicsQuery`] is that
//! seam. [`ColliderWorld`] is a small reference implementation over spheres and
//! axis-aligned boxes, enough to drive the camera headlessly and in tests.
//!
//! # Sweep approximation
//!
//! Sphere-vs-sphere sweeps are exact. Sphere-vs-box sweeps cast a ray against the
//! box inflated by the sweep radius, which is conservative near edges and corners.
//! A sweep that starts overlapping a shape reports a hit at distance `0`.

use glam::Vec3;

/// Opaque collider handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u32);

/// Bit set of collision layers (bit `n` = layer `n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// No layer.
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask with a single layer set. Layers above 31 yield an empty mask.
    pub fn layer(layer: u8) -> Self {
        Self(1u32.checked_shl(layer as u32).unwrap_or(0))
    }

    pub fn contains(self, layer: u8) -> bool {
        self.0 & Self::layer(layer).0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Whether trigger volumes take part in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerInteraction {
    #[default]
    Ignore,
    Collide,
}

/// Parameters for a swept-sphere query.
#[derive(Debug, Clone, Copy)]
pub struct SphereCast {
    pub origin: Vec3,
    pub radius: f32,
    /// Sweep direction, normalized by the implementation.
    pub direction: Vec3,
    pub max_distance: f32,
    pub layers: LayerMask,
    pub triggers: TriggerInteraction,
    /// Upper bound on the number of hits written.
    pub max_hits: usize,
}

/// One collider hit by a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastHit {
    pub collider: ColliderId,
    /// Distance travelled along the sweep direction (0 for initial overlap).
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Sphere-cast capability consumed by the orbit camera.
pub trait PhysicsQuery {
    /// Clear `hits` and fill it with at most `cast.max_hits` hits in no particular
    /// order. Returns the number of hits written.
    fn sphere_cast(&self, cast: &SphereCast, hits: &mut Vec<CastHit>) -> usize;
}

/// A query backend with no geometry at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWorld;

impl PhysicsQuery for EmptyWorld {
    fn sphere_cast(&self, _cast: &SphereCast, hits: &mut Vec<CastHit>) -> usize {
        hits.clear();
        0
    }
}

/// Primitive collider shapes understood by [`ColliderWorld`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere { center: Vec3, radius: f32 },
    Box { min: Vec3, max: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: ColliderId,
    pub shape: ColliderShape,
    pub layer: u8,
    pub is_trigger: bool,
}

/// Flat list of primitive colliders answering sphere casts by brute force.
#[derive(Debug, Clone, Default)]
pub struct ColliderWorld {
    colliders: Vec<Collider>,
    next_id: u32,
}

impl ColliderWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid sphere on layer 0.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32) -> ColliderId {
        self.insert(ColliderShape::Sphere { center, radius }, 0, false)
    }

    /// Add a solid box on layer 0. Corners may be given in any order.
    pub fn add_box(&mut self, a: Vec3, b: Vec3) -> ColliderId {
        self.insert(ColliderShape::Box { min: a.min(b), max: a.max(b) }, 0, false)
    }

    pub fn insert(&mut self, shape: ColliderShape, layer: u8, is_trigger: bool) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider { id, shape, layer, is_trigger });
        id
    }

    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    fn sweep(collider: &Collider, origin: Vec3, dir: Vec3, radius: f32, max_distance: f32) -> Option<CastHit> {
        match collider.shape {
            ColliderShape::Sphere { center, radius: r } => {
                let t = ray_sphere_intersect(origin, dir, center, r + radius)?;
                if t > max_distance {
                    return None;
                }
                let at = origin + dir * t;
                let normal = (at - center).normalize_or(-dir);
                Some(CastHit {
                    collider: collider.id,
                    distance: t,
                    point: center + normal * r,
                    normal,
                })
            }
            ColliderShape::Box { min, max } => {
                let inflated = Vec3::splat(radius);
                let t = ray_aabb_intersect(origin, dir, min - inflated, max + inflated)?;
                if t > max_distance {
                    return None;
                }
                let at = origin + dir * t;
                let point = at.clamp(min, max);
                let normal = if (at - point).length_squared() > 1e-12 {
                    (at - point).normalize()
                } else {
                    aabb_surface_normal(point, min, max)
                };
                Some(CastHit { collider: collider.id, distance: t, point, normal })
            }
        }
    }
}

impl PhysicsQuery for ColliderWorld {
    fn sphere_cast(&self, cast: &SphereCast, hits: &mut Vec<CastHit>) -> usize {
        hits.clear();
        let dir = cast.direction.normalize_or_zero();
        if dir == Vec3::ZERO || cast.max_hits == 0 {
            return 0;
        }

        for collider in &self.colliders {
            if hits.len() >= cast.max_hits {
                break;
            }
            if !cast.layers.contains(collider.layer) {
                continue;
            }
            if collider.is_trigger && cast.triggers == TriggerInteraction::Ignore {
                continue;
            }
            if let Some(hit) = Self::sweep(collider, cast.origin, dir, cast.radius, cast.max_distance) {
                hits.push(hit);
            }
        }
        hits.len()
    }
}

/// Ray-sphere intersection. Returns `0` when the origin is already inside.
pub fn ray_sphere_intersect(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = oc.dot(ray_dir);
    if b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some((-b - disc.sqrt()).max(0.0))
}

/// Ray-AABB intersection using the slab method. `ray_dir` must be normalized.
///
/// Returns the entry distance, `0` when the origin is inside the box, or `None`
/// if the box is missed or lies behind the origin.
pub fn ray_aabb_intersect(ray_origin: Vec3, ray_dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;
    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        Some(t_min.max(0.0))
    } else {
        None
    }
}

/// Outward normal of the AABB face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let normalized = (point - center) / half_extents;
    let abs = normalized.abs();

    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast_along_neg_z(origin: Vec3, max_distance: f32) -> SphereCast {
        SphereCast {
            origin,
            radius: 0.2,
            direction: Vec3::NEG_Z,
            max_distance,
            layers: LayerMask::ALL,
            triggers: TriggerInteraction::Ignore,
            max_hits: 32,
        }
    }

    #[test]
    fn test_ray_hits_aabb_from_front() {
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_aabb() {
        let t = ray_aabb_intersect(Vec3::new(5.0, 0.0, -5.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_inside_aabb_reports_zero() {
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, Some(0.0));
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_sphere() {
        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
        assert!(ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
    }

    #[test]
    fn test_surface_normal_faces() {
        let n = aabb_surface_normal(Vec3::new(1.0, 0.2, 0.1), Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(n, Vec3::X);
        let n = aabb_surface_normal(Vec3::new(0.1, -1.0, 0.2), Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(n, Vec3::NEG_Y);
    }

    #[test]
    fn test_sphere_cast_accounts_for_radius() {
        let mut world = ColliderWorld::new();
        let id = world.add_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let mut hits = Vec::new();
        let n = world.sphere_cast(&cast_along_neg_z(Vec3::ZERO, 10.0), &mut hits);
        assert_eq!(n, 1);
        assert_eq!(hits[0].collider, id);
        assert!((hits[0].distance - 3.8).abs() < 1e-4);
        assert!((hits[0].point - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-4);
    }

    #[test]
    fn test_sphere_cast_respects_max_distance() {
        let mut world = ColliderWorld::new();
        world.add_box(Vec3::new(-1.0, -1.0, -9.0), Vec3::new(1.0, 1.0, -8.0));
        let mut hits = Vec::new();
        assert_eq!(world.sphere_cast(&cast_along_neg_z(Vec3::ZERO, 5.0), &mut hits), 0);
        assert_eq!(world.sphere_cast(&cast_along_neg_z(Vec3::ZERO, 10.0), &mut hits), 1);
        assert!((hits[0].distance - 7.8).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_cast_filters_layers_and_triggers() {
        let mut world = ColliderWorld::new();
        world.insert(ColliderShape::Sphere { center: Vec3::new(0.0, 0.0, -3.0), radius: 0.5 }, 4, false);
        world.insert(ColliderShape::Sphere { center: Vec3::new(0.0, 0.0, -4.0), radius: 0.5 }, 0, true);
        let mut hits = Vec::new();

        let mut cast = cast_along_neg_z(Vec3::ZERO, 10.0);
        cast.layers = LayerMask::layer(0);
        assert_eq!(world.sphere_cast(&cast, &mut hits), 0);

        cast.triggers = TriggerInteraction::Collide;
        assert_eq!(world.sphere_cast(&cast, &mut hits), 1);

        cast.layers = LayerMask::ALL;
        cast.triggers = TriggerInteraction::Ignore;
        assert_eq!(world.sphere_cast(&cast, &mut hits), 1);
        assert!((hits[0].distance - 2.3).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_cast_caps_hit_count() {
        let mut world = ColliderWorld::new();
        for i in 0..5 {
            world.add_sphere(Vec3::new(0.0, 0.0, -2.0 - i as f32), 0.3);
        }
        let mut hits = Vec::new();
        let mut cast = cast_along_neg_z(Vec3::ZERO, 20.0);
        cast.max_hits = 3;
        assert_eq!(world.sphere_cast(&cast, &mut hits), 3);
    }

    #[test]
    fn test_initial_overlap_reports_zero_distance() {
        let mut world = ColliderWorld::new();
        world.add_sphere(Vec3::ZERO, 1.0);
        let mut hits = Vec::new();
        world.sphere_cast(&cast_along_neg_z(Vec3::ZERO, 5.0), &mut hits);
        assert_eq!(hits[0].distance, 0.0);
    }

    #[test]
    fn test_layer_mask() {
        assert!(LayerMask::ALL.contains(7));
        assert!(!LayerMask::NONE.contains(0));
        assert!(LayerMask::layer(3).contains(3));
        assert!(!LayerMask::layer(3).contains(2));
        assert_eq!(LayerMask::layer(40), LayerMask::NONE);
    }

    #[test]
    fn test_empty_world() {
        let mut hits = vec![CastHit {
            collider: ColliderId(9),
            distance: 1.0,
            point: Vec3::ZERO,
            normal: Vec3::Y,
        }];
        assert_eq!(EmptyWorld.sphere_cast(&cast_along_neg_z(Vec3::ZERO, 5.0), &mut hits), 0);
        assert!(hits.is_empty());
    }
}
