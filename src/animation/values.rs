use glam::{Quat, Vec3, Vec4};

/// Values that a [`KeyframeTrack`](crate::animation::KeyframeTrack) can carry.
pub trait Interpolatable: Copy + Sized {
    /// Number of scalar components per value in the flat export layout.
    const COMPONENTS: usize;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Cubic Hermite interpolation with glTF tangent conventions.
    /// Tangents are scaled by the key interval `dt`.
    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self;

    fn write_components(&self, out: &mut Vec<f32>);
}

/// Hermite basis weights `(s0, s1, s2, s3)` for `v0`, `m0`, `v1`, `m1`.
#[inline]
fn hermite_basis(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    (1.0 - s2, s3 - t2 + t, s2, s3)
}

impl Interpolatable for Vec3 {
    const COMPONENTS: usize = 3;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_basis(t);
        v0 * s0 + out_tangent0 * dt * s1 + v1 * s2 + in_tangent1 * dt * s3
    }

    fn write_components(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }
}

impl Interpolatable for Quat {
    const COMPONENTS: usize = 4;

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_basis(t);
        let blended = Vec4::from(v0) * s0
            + Vec4::from(out_tangent0) * dt * s1
            + Vec4::from(v1) * s2
            + Vec4::from(in_tangent1) * dt * s3;
        Quat::from_vec4(blended).normalize()
    }

    fn write_components(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.to_array());
    }
}
