//! Storage: element buffers in lane or flat layout

use crate::dtype::Element;
use crate::runtime::Backend;

/// Element buffer of a [`Vector`](super::Vector)
///
/// The layout is fixed at construction by the backend:
/// - `Lanes`: a run of full registers (`lanes.len()` is a multiple of `width`)
///   followed by a scalar `tail` shorter than one register
/// - `Flat`: the elements exactly as given
///
/// Both layouts keep logical order, so element `i` is `lanes[i]` when
/// `i < lanes.len()` and `tail[i - lanes.len()]` otherwise.
#[derive(Clone, Debug)]
pub(crate) enum Storage<T: Element> {
    Lanes {
        lanes: Vec<T>,
        tail: Vec<T>,
        width: usize,
    },
    Flat(Vec<T>),
}

impl<T: Element> Storage<T> {
    /// Lay out `data` for `backend`
    pub(crate) fn new(mut data: Vec<T>, backend: Backend) -> Self {
        if !backend.is_simd() {
            return Self::Flat(data);
        }

        let width = backend.lanes::<T>();
        let split = data.len() - data.len() % width;
        let tail = data.split_off(split);
        Self::Lanes {
            lanes: data,
            tail,
            width,
        }
    }

    /// Build lane storage from already partitioned parts
    pub(crate) fn from_parts(lanes: Vec<T>, tail: Vec<T>, width: usize) -> Self {
        debug_assert!(width > 0 && lanes.len() % width == 0 && tail.len() < width);
        Self::Lanes { lanes, tail, width }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Lanes { lanes, tail, .. } => lanes.len() + tail.len(),
            Self::Flat(data) => data.len(),
        }
    }

    /// Lane width, 1 for flat storage
    #[inline]
    pub(crate) fn width(&self) -> usize {
        match self {
            Self::Lanes { width, .. } => *width,
            Self::Flat(_) => 1,
        }
    }

    /// `(lanes, tail)`; flat storage has no lanes and is all tail
    #[inline]
    pub(crate) fn parts(&self) -> (&[T], &[T]) {
        match self {
            Self::Lanes { lanes, tail, .. } => (lanes, tail),
            Self::Flat(data) => (&[], data),
        }
    }

    /// Element `i`, which must be in bounds
    #[inline]
    pub(crate) fn at(&self, i: usize) -> T {
        match self {
            Self::Lanes { lanes, tail, .. } => {
                if i < lanes.len() {
                    lanes[i]
                } else {
                    tail[i - lanes.len()]
                }
            }
            Self::Flat(data) => data[i],
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let (lanes, tail) = self.parts();
        lanes.iter().chain(tail).copied()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        match self {
            Self::Lanes { lanes, tail, .. } => {
                let mut out = Vec::with_capacity(lanes.len() + tail.len());
                out.extend_from_slice(lanes);
                out.extend_from_slice(tail);
                out
            }
            Self::Flat(data) => data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_storage_keeps_data() {
        let storage = Storage::new(vec![1.0f32, 2.0, 3.0], Backend::serial());
        assert_eq!(storage.len(), 3);
        assert_eq!(storage.width(), 1);
        assert_eq!(storage.parts(), (&[][..], &[1.0f32, 2.0, 3.0][..]));
    }

    #[test]
    fn test_lane_storage_split() {
        let backend = Backend::detect();
        if !backend.is_simd() {
            return;
        }

        let data: Vec<i32> = (0..19).collect();
        let storage = Storage::new(data.clone(), backend);
        let (lanes, tail) = storage.parts();
        assert_eq!(lanes.len(), 16);
        assert_eq!(tail, &[16, 17, 18]);
        for (i, &expected) in data.iter().enumerate() {
            assert_eq!(storage.at(i), expected);
        }
        assert_eq!(storage.to_vec(), data);
    }

    #[test]
    fn test_lane_storage_shorter_than_register() {
        let backend = Backend::detect();
        let storage = Storage::new(vec![1.0f64, 2.0], backend);
        let (lanes, tail) = storage.parts();
        assert!(lanes.is_empty());
        assert_eq!(tail, &[1.0, 2.0]);
    }
}
