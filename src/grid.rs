use std::fmt;
use std::ops::{Index, IndexMut};

/// Error returned by [`Grid::from_vec`]
#[derive(Debug, thiserror::Error)]
#[error("buffer of length {got} does not fit a {height}x{width} grid")]
pub struct GridError {
    pub height: usize,
    pub width: usize,
    pub got: usize,
}

/// Number of samples in a `height` x `width` grid
///
/// # Panics
///
/// If the product does not fit a `usize`.
fn area(height: usize, width: usize) -> usize {
    height
        .checked_mul(width)
        .unwrap_or_else(|| panic!("{height}x{width} grid overflows usize"))
}

/// Dense 2-D grid of samples stored row major, the storage of a single channel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, T::default())
    }

    /// Reallocate to the given dimensions
    ///
    /// Previous contents are not preserved in any meaningful layout.
    ///
    /// # Panics
    ///
    /// If `height * width` overflows, before `self` is modified.
    pub fn set_size(&mut self, height: usize, width: usize) {
        let len = area(height, width);

        self.data.clear();
        self.data.resize(len, T::default());
        self.height = height;
        self.width = width;
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(height: usize, width: usize, value: T) -> Self {
        Self {
            height,
            width,
            data: vec![value; area(height, width)],
        }
    }

    pub fn from_vec(height: usize, width: usize, data: Vec<T>) -> Result<Self, GridError> {
        if height.checked_mul(width) != Some(data.len()) {
            return Err(GridError {
                height,
                width,
                got: data.len(),
            });
        }

        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Build a grid by evaluating `f(y, x)` for every position
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(area(height, width));

        for y in 0..height {
            for x in 0..width {
                data.push(f(y, x));
            }
        }

        Self {
            height,
            width,
            data,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`
    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn get(&self, y: usize, x: usize) -> Option<T> {
        if y < self.height && x < self.width {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
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

    /// Iterate over the rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.width.max(1))
    }

    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            height: self.height,
            width: self.width,
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (y, x): (usize, usize)) -> &T {
        assert!(
            y < self.height && x < self.width,
            "index ({y}, {x}) out of bounds for {}x{} grid",
            self.height,
            self.width
        );

        &self.data[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (y, x): (usize, usize)) -> &mut T {
        assert!(
            y < self.height && x < self.width,
            "index ({y}, {x}) out of bounds for {}x{} grid",
            self.height,
            self.width
        );

        &mut self.data[y * self.width + x]
    }
}

/// One line per row, columns right aligned
impl<T: Copy + fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "[grid size: {}x{}]", self.height, self.width);
        }

        for row in self.rows() {
            for value in row {
                write!(f, " {value:>10.4}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
