use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;
use crate::errors::{Result, RetargetError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMode {
    Linear,
    Step,
    /// glTF layout: three values per key (in-tangent, value, out-tangent).
    CubicSpline,
}

impl InterpolationMode {
    #[inline]
    fn values_per_key(self) -> usize {
        match self {
            InterpolationMode::CubicSpline => 3,
            _ => 1,
        }
    }
}

/// How far the cursor scans linearly before falling back to binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last key interval a track was sampled in.
///
/// Playback time moves by small steps, so the next lookup is almost always in
/// the same or an adjacent interval.
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Creates a track. Key times must be finite and non-decreasing.
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Result<Self> {
        if times.is_empty() {
            return Err(RetargetError::EmptyTrack);
        }
        let mut previous = f32::NEG_INFINITY;
        for (index, &time) in times.iter().enumerate() {
            if !time.is_finite() || time < previous {
                return Err(RetargetError::UnsortedKeyTimes { index, time });
            }
            previous = time;
        }
        let expected = times.len() * interpolation.values_per_key();
        if values.len() != expected {
            return Err(RetargetError::TrackValueCount {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            times,
            values,
            interpolation,
        })
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    #[inline]
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.times.len()
    }

    /// Time of the last key.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Value stored at key `index`, skipping tangents for cubic tracks.
    #[inline]
    #[must_use]
    pub fn key_value(&self, index: usize) -> T {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.values[index * 3 + 1],
            _ => self.values[index],
        }
    }

    /// Stateless sampling using binary search.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        let next = self.times.partition_point(|&t| t <= time);
        self.sample_in_interval(next.saturating_sub(1), time)
    }

    /// Sampling that starts the key search at the cursor and updates it.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        let len = self.times.len();
        if len == 1 {
            return self.key_value(0);
        }

        let start = cursor.last_index.min(len - 1);
        let index = self
            .scan_from(start, time)
            .unwrap_or_else(|| self.times.partition_point(|&t| t <= time).saturating_sub(1));

        cursor.last_index = index;
        self.sample_in_interval(index, time)
    }

    /// Local search around `start`. Returns `None` when the time is more than
    /// [`MAX_SCAN_OFFSET`] intervals away.
    fn scan_from(&self, start: usize, time: f32) -> Option<usize> {
        let last = self.times.len() - 1;

        if time >= self.times[start] {
            for index in start..=(start + MAX_SCAN_OFFSET).min(last) {
                if index == last || time < self.times[index + 1] {
                    return Some(index);
                }
            }
            None
        } else {
            (start.saturating_sub(MAX_SCAN_OFFSET)..start)
                .rev()
                .find(|&index| time >= self.times[index])
        }
    }

    fn sample_in_interval(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index >= len - 1 {
            return self.key_value(len - 1);
        }

        let next = index + 1;
        let t0 = self.times[index];
        let dt = self.times[next] - t0;
        let t = if dt > 1e-6 { ((time - t0) / dt).clamp(0.0, 1.0) } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => self.key_value(index),
            InterpolationMode::Linear => T::interpolate_linear(self.key_value(index), self.key_value(next), t),
            InterpolationMode::CubicSpline => T::interpolate_cubic(
                self.values[index * 3 + 1],
                self.values[index * 3 + 2],
                self.values[next * 3],
                self.values[next * 3 + 1],
                t,
                dt,
            ),
        }
    }

    /// Flattens key values (tangents excluded) into `T::COMPONENTS` floats per key.
    #[must_use]
    pub fn flat_values(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.times.len() * T::COMPONENTS);
        for index in 0..self.times.len() {
            self.key_value(index).write_components(&mut out);
        }
        out
    }
}
