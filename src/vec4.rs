//! Four-lane `f32` value type
//!
//! [`Vec4`] is a 16-byte, 16-byte-aligned `#[repr(C)]` struct. The named fields
//! `x, y, z, w`, the `[f32; 4]` view returned by [`Vec4::as_array`], and a
//! 128-bit SIMD register loaded from that view all observe the same bits: the
//! view is a reinterpretation of the struct, never a second copy.

use std::ops::Index;

use bytemuck::{Pod, Zeroable};

use crate::backends::scalar::ScalarBackend;
use crate::backends::LengthBackend;
use crate::{backends, Backend, Result, Vec4Error};

/// Four `f32` components stored in the order x, y, z, w
///
/// # Examples
///
/// ```
/// use vec4len::Vec4;
///
/// let v = Vec4::new(1.0, 2.0, 2.0, 4.0);
/// assert_eq!(v.as_array(), &[1.0, 2.0, 2.0, 4.0]);
/// assert_eq!(v.length(), 5.0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C, align(16))]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    /// All components zero
    pub const ZERO: Vec4 = Vec4::splat(0.0);

    /// Number of lanes
    pub const LANES: usize = 4;

    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Same value in every lane
    #[inline(always)]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Build from lanes `[x, y, z, w]`
    #[inline(always)]
    pub const fn from_array(lanes: [f32; 4]) -> Self {
        Self::new(lanes[0], lanes[1], lanes[2], lanes[3])
    }

    /// Copy out lanes `[x, y, z, w]`
    #[inline(always)]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Borrow the same 16 bytes as `[x, y, z, w]`
    ///
    /// This is the view SIMD backends load from.
    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }

    /// Mutably borrow the same 16 bytes as `[x, y, z, w]`
    #[inline(always)]
    pub fn as_mut_array(&mut self) -> &mut [f32; 4] {
        bytemuck::cast_mut(self)
    }

    /// Lane `index` of the register view, `None` past lane 3
    ///
    /// # Examples
    ///
    /// ```
    /// use vec4len::Vec4;
    ///
    /// let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
    /// assert_eq!(v.lane(2), Some(3.0));
    /// assert_eq!(v.lane(4), None);
    /// ```
    #[inline(always)]
    pub fn lane(&self, index: usize) -> Option<f32> {
        self.as_array().get(index).copied()
    }

    /// `x² + y² + z² + w²` in scalar arithmetic
    #[inline(always)]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Euclidean length on the best available backend
    ///
    /// The backend is detected on first use and cached for the process.
    #[inline]
    pub fn length(&self) -> f32 {
        // SAFETY: best_backend() only returns backends detected on this CPU
        unsafe { backends::length(crate::best_backend(), self) }
    }

    /// Euclidean length computed with scalar arithmetic on the named fields
    #[inline]
    pub fn length_scalar(&self) -> f32 {
        // SAFETY: the scalar backend has no target feature requirements
        unsafe { ScalarBackend::length(self) }
    }

    /// Euclidean length on an explicit backend
    ///
    /// # Errors
    ///
    /// Returns [`Vec4Error::UnsupportedBackend`] if `backend` cannot run on
    /// this CPU or target.
    ///
    /// # Examples
    ///
    /// ```
    /// use vec4len::{Backend, Vec4};
    ///
    /// let v = Vec4::new(3.0, 4.0, 0.0, 0.0);
    /// assert_eq!(v.length_with(Backend::Scalar).unwrap(), 5.0);
    /// ```
    pub fn length_with(&self, backend: Backend) -> Result<f32> {
        let backend = backend.resolve();
        if !backend.is_available() {
            return Err(Vec4Error::UnsupportedBackend(backend));
        }
        // SAFETY: availability was checked above
        Ok(unsafe { backends::length(backend, self) })
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(lanes: [f32; 4]) -> Self {
        Self::from_array(lanes)
    }
}

impl From<Vec4> for [f32; 4] {
    fn from(v: Vec4) -> Self {
        v.to_array()
    }
}

impl From<(f32, f32, f32, f32)> for Vec4 {
    fn from((x, y, z, w): (f32, f32, f32, f32)) -> Self {
        Self::new(x, y, z, w)
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;

    /// # Panics
    ///
    /// Panics if `index > 3`.
    fn index(&self, index: usize) -> &f32 {
        &self.as_array()[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<Vec4>(), 16);
        assert_eq!(std::mem::align_of::<Vec4>(), 16);
    }

    #[test]
    fn test_new() {
        assert_eq!(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4 {
                x: 1.0,
                y: 2.0,
                z: 3.0,
                w: 4.0
            }
        );
    }

    #[test]
    fn test_zero_and_default_agree() {
        assert_eq!(Vec4::ZERO, Vec4::default());
        assert_eq!(Vec4::ZERO, <Vec4 as Zeroable>::zeroed());
    }

    #[test]
    fn test_array_view_aliases_fields() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.as_array(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            v.as_array().as_ptr() as usize,
            &v as *const Vec4 as usize
        );

        v.as_mut_array()[2] = -7.5;
        assert_eq!(v.z, -7.5);

        v.w = 9.0;
        assert_eq!(v.lane(3), Some(9.0));
        assert_eq!(v[3], 9.0);
    }

    #[test]
    fn test_views_preserve_bits() {
        // Negative zero and a NaN payload survive every access path
        let nan = f32::from_bits(0x7FC0_1234);
        let v = Vec4::new(-0.0, nan, f32::INFINITY, f32::MIN_POSITIVE);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 16);

        for (i, lane) in v.as_array().iter().enumerate() {
            let from_bytes = f32::from_ne_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
            assert_eq!(lane.to_bits(), from_bytes.to_bits());
            assert_eq!(v.lane(i).unwrap().to_bits(), lane.to_bits());
        }
        assert_eq!(v.y.to_bits(), 0x7FC0_1234);
        assert_eq!(v.x.to_bits(), (-0.0f32).to_bits());
    }

    #[test]
    fn test_lane_out_of_range() {
        assert_eq!(Vec4::splat(1.0).lane(4), None);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let v = Vec4::splat(1.0);
        let _ = v[4];
    }

    #[test]
    fn test_conversions() {
        let v: Vec4 = [1.0, 2.0, 3.0, 4.0].into();
        assert_eq!(v, Vec4::from((1.0, 2.0, 3.0, 4.0)));
        let lanes: [f32; 4] = v.into();
        assert_eq!(lanes, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Vec4::from_array(v.to_array()), v);
    }

    #[test]
    fn test_length_zero() {
        assert_eq!(Vec4::ZERO.length(), 0.0);
        assert_eq!(Vec4::ZERO.length_scalar(), 0.0);
    }

    #[test]
    fn test_length_three_four_five() {
        let v = Vec4::new(3.0, 4.0, 0.0, 0.0);
        assert_eq!(v.length_scalar(), 5.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_squared() {
        assert_eq!(Vec4::new(1.0, 2.0, 3.0, 4.0).length_squared(), 30.0);
    }

    #[test]
    fn test_length_negative_components() {
        let v = Vec4::new(-1.0, -1.0, -1.0, -1.0);
        assert_eq!(v.length_scalar(), 2.0);
        assert!((v.length() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_nan_propagates() {
        let v = Vec4::new(1.0, f32::NAN, 0.0, 0.0);
        assert!(v.length().is_nan());
        assert!(v.length_scalar().is_nan());
    }

    #[test]
    fn test_length_infinity_propagates() {
        let v = Vec4::new(f32::NEG_INFINITY, 1.0, 0.0, 0.0);
        assert_eq!(v.length(), f32::INFINITY);
        assert_eq!(v.length_scalar(), f32::INFINITY);
    }

    #[test]
    fn test_length_with_every_available_backend() {
        let v = Vec4::new(0.25, 0.5, 1.0, 2.0);
        let reference = v.length_scalar();
        for backend in crate::available_backends() {
            let got = v.length_with(backend).unwrap();
            assert!(
                (got - reference).abs() <= 1e-6 * reference,
                "{backend}: got {got}, want {reference}"
            );
        }
    }

    #[test]
    fn test_length_with_auto() {
        let v = Vec4::new(3.0, 4.0, 0.0, 0.0);
        assert!((v.length_with(Backend::Auto).unwrap() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_with_unavailable_backend() {
        #[cfg(target_arch = "x86_64")]
        let foreign = Backend::NEON;
        #[cfg(not(target_arch = "x86_64"))]
        let foreign = Backend::SSE41;

        assert_eq!(
            Vec4::splat(1.0).length_with(foreign),
            Err(Vec4Error::UnsupportedBackend(foreign))
        );
    }
}
