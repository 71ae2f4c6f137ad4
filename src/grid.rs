use crate::colour::Colour;

/// A row-major 2D grid. Unlike a world map it does not wrap at the edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

/// Heights in [0, 1], one per cell.
pub type HeightField = Grid<f32>;

/// One colour per cell, same dimensions as the height field it was derived from.
pub type ColourField = Grid<Colour>;

/// Cell count of a `width` x `height` grid, or `None` if either side is zero,
/// doesn't fit an image dimension, or the RGB pixel buffer would overflow.
pub fn checked_area(width: usize, height: usize) -> Option<usize> {
    if width < 1 || height < 1 {
        return None;
    }
    u32::try_from(width).ok()?;
    u32::try_from(height).ok()?;
    let area = width.checked_mul(height)?;
    area.checked_mul(3)?;
    Some(area)
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Fill the entire grid with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Grid<T> {
    /// Wrap an existing row-major buffer. Returns `None` if the length doesn't match.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height).then_some(Self { width, height, data })
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }

    /// Build a grid of the same shape by applying `f` to every cell.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl Grid<f32> {
    /// Smallest and largest value in the grid, or `None` if empty.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid::new_with(3, 2, 0u32);
        grid.set(2, 1, 7);
        assert_eq!(grid.as_slice()[5], 7);
        assert_eq!(*grid.get(2, 1), 7);
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(Grid::from_vec(2, 2, vec![0.0f32; 3]).is_none());
        assert!(Grid::from_vec(2, 2, vec![0.0f32; 4]).is_some());
    }

    #[test]
    fn test_iter_coordinates() {
        let grid = Grid::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let cells: Vec<_> = grid.iter().map(|(x, y, &v)| (x, y, v)).collect();
        assert_eq!(cells, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
    }

    #[test]
    fn test_checked_area() {
        assert_eq!(checked_area(4, 3), Some(12));
        assert_eq!(checked_area(0, 3), None);
        assert_eq!(checked_area(usize::MAX, 2), None);
        assert_eq!(checked_area(u32::MAX as usize + 1, 1), None);
    }

    #[test]
    fn test_min_max() {
        let grid = Grid::from_vec(3, 1, vec![0.5f32, -1.0, 2.0]).unwrap();
        assert_eq!(grid.min_max(), Some((-1.0, 2.0)));
    }
}
