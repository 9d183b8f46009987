use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds one value per (element, integration point)
///
/// The values are stored in row-major order: `data[e * nip + q]`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Grid<T> {
    /// Number of elements
    nelem: usize,

    /// Number of integration points per element
    nip: usize,

    /// Holds all values (nelem × nip)
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Allocates a new instance with all entries equal to `value`
    pub fn new(nelem: usize, nip: usize, value: T) -> Self {
        Grid {
            nelem,
            nip,
            data: vec![value; nelem * nip],
        }
    }

    /// Allocates a new instance from nested rows
    ///
    /// # Input
    ///
    /// * `rows` -- `rows[e][q]` with all rows having the same length
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, StrError> {
        let nelem = rows.len();
        let nip = if nelem > 0 { rows[0].len() } else { 0 };
        let mut data = Vec::with_capacity(nelem * nip);
        for row in rows {
            if row.len() != nip {
                return Err("all rows must have the same number of integration points");
            }
            data.extend_from_slice(row);
        }
        Ok(Grid { nelem, nip, data })
    }

    /// Returns the nested rows `rows[e][q]`
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.nip == 0 {
            return vec![Vec::new(); self.nelem];
        }
        self.data.chunks(self.nip).map(|row| row.to_vec()).collect()
    }
}

impl<T> Grid<T> {
    /// Allocates a new instance from a flat vector in row-major order
    pub fn from_vec(nelem: usize, nip: usize, data: Vec<T>) -> Result<Self, StrError> {
        if data.len() != nelem * nip {
            return Err("data length must be equal to nelem × nip");
        }
        Ok(Grid { nelem, nip, data })
    }

    /// Returns the dimensions (nelem, nip)
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.nelem, self.nip)
    }

    /// Returns the number of elements
    #[inline]
    pub fn nelem(&self) -> usize {
        self.nelem
    }

    /// Returns the number of integration points per element
    #[inline]
    pub fn nip(&self) -> usize {
        self.nip
    }

    /// Returns the total number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the grid has no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns an access to the entry at (e, q)
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of range. See [Grid::try_get] for a checked access.
    #[inline]
    pub fn get(&self, e: usize, q: usize) -> &T {
        assert!(e < self.nelem && q < self.nip);
        &self.data[e * self.nip + q]
    }

    /// Returns an access to the entry at (e, q) or an error if the indices are out of range
    pub fn try_get(&self, e: usize, q: usize) -> Result<&T, StrError> {
        if e >= self.nelem || q >= self.nip {
            return Err("grid index is out of range");
        }
        Ok(&self.data[e * self.nip + q])
    }

    /// Returns a mutable access to the entry at (e, q) or an error if the indices are out of range
    pub fn try_get_mut(&mut self, e: usize, q: usize) -> Result<&mut T, StrError> {
        if e >= self.nelem || q >= self.nip {
            return Err("grid index is out of range");
        }
        Ok(&mut self.data[e * self.nip + q])
    }

    /// Returns a mutable access to the entry at (e, q)
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of range.
    #[inline]
    pub fn get_mut(&mut self, e: usize, q: usize) -> &mut T {
        assert!(e < self.nelem && q < self.nip);
        &mut self.data[e * self.nip + q]
    }

    /// Sets the entry at (e, q)
    #[inline]
    pub fn set(&mut self, e: usize, q: usize, value: T) {
        *self.get_mut(e, q) = value;
    }

    /// Returns the flat (row-major) data
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the flat (row-major) mutable data
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Checks that the dimensions are equal to (nelem, nip)
    pub fn check_dims(&self, nelem: usize, nip: usize) -> Result<(), StrError> {
        if self.nelem != nelem || self.nip != nip {
            return Err("grid dimensions must be equal to (nelem, nip)");
        }
        Ok(())
    }

    /// Returns a new grid by applying a function to each entry
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: Fn(&T) -> U,
    {
        Grid {
            nelem: self.nelem,
            nip: self.nip,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Returns a new grid by applying a fallible function to each entry
    pub fn try_map<U, F>(&self, f: F) -> Result<Grid<U>, StrError>
    where
        F: Fn(&T) -> Result<U, StrError>,
    {
        let data = self.data.iter().map(f).collect::<Result<Vec<_>, StrError>>()?;
        Ok(Grid {
            nelem: self.nelem,
            nip: self.nip,
            data,
        })
    }

    /// Returns the flat (row-major) data, consuming the grid
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl Grid<bool> {
    /// Allocates a mask selecting every integration point of the given elements
    pub fn mask_elements(nelem: usize, nip: usize, elements: &[usize]) -> Result<Self, StrError> {
        let mut mask = Grid::new(nelem, nip, false);
        for &e in elements {
            if e >= nelem {
                return Err("element index is out of range");
            }
            for q in 0..nip {
                mask.set(e, q, true);
            }
        }
        Ok(mask)
    }

    /// Returns the number of selected entries
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&selected| selected).count()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Grid;

    #[test]
    fn new_and_access_work() {
        let mut grid = Grid::new(3, 2, 0.0);
        assert_eq!(grid.dims(), (3, 2));
        assert_eq!(grid.nelem(), 3);
        assert_eq!(grid.nip(), 2);
        assert_eq!(grid.len(), 6);
        assert!(!grid.is_empty());
        grid.set(2, 1, 5.0);
        *grid.get_mut(0, 1) += 1.0;
        assert_eq!(grid.get(2, 1), &5.0);
        assert_eq!(grid.as_slice(), &[0.0, 1.0, 0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    #[should_panic]
    fn get_panics_on_out_of_range() {
        let grid = Grid::new(3, 2, 0_usize);
        grid.get(0, 2);
    }

    #[test]
    fn try_get_works() {
        let mut grid = Grid::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(grid.try_get(1, 0), Ok(&3));
        assert_eq!(grid.try_get(2, 0).err(), Some("grid index is out of range"));
        assert_eq!(grid.try_get(0, 2).err(), Some("grid index is out of range"));
        *grid.try_get_mut(0, 1).unwrap() = 7;
        assert_eq!(grid.get(0, 1), &7);
        assert_eq!(grid.try_get_mut(0, 5).err(), Some("grid index is out of range"));
    }

    #[test]
    fn from_rows_and_to_rows_work() {
        let grid = Grid::from_rows(&[vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        assert_eq!(grid.dims(), (3, 2));
        assert_eq!(grid.get(1, 0), &3);
        assert_eq!(grid.to_rows(), vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        assert_eq!(
            Grid::from_rows(&[vec![1, 2], vec![3]]).err(),
            Some("all rows must have the same number of integration points")
        );
    }

    #[test]
    fn from_vec_and_check_dims_work() {
        let grid = Grid::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(grid.get(1, 1), &4.0);
        assert_eq!(grid.check_dims(2, 2), Ok(()));
        assert_eq!(
            grid.check_dims(2, 3).err(),
            Some("grid dimensions must be equal to (nelem, nip)")
        );
        assert_eq!(
            Grid::from_vec(2, 2, vec![1.0]).err(),
            Some("data length must be equal to nelem × nip")
        );
    }

    #[test]
    fn map_works() {
        let grid = Grid::from_vec(1, 3, vec![1, 2, 3]).unwrap();
        let res = grid.map(|x| 2.0 * (*x as f64));
        assert_eq!(res.as_slice(), &[2.0, 4.0, 6.0]);

        let res = grid.try_map(|x| if *x < 3 { Ok(*x + 1) } else { Err("too large") });
        assert_eq!(res.err(), Some("too large"));
        let res = grid.try_map(|x| Ok::<_, &'static str>(*x * 10)).unwrap();
        assert_eq!(res.dims(), (1, 3));
        assert_eq!(res.into_vec(), vec![10, 20, 30]);
    }

    #[test]
    fn mask_elements_works() {
        let mask = Grid::mask_elements(3, 2, &[0, 2]).unwrap();
        assert_eq!(mask.as_slice(), &[true, true, false, false, true, true]);
        assert_eq!(mask.count(), 4);
        assert_eq!(
            Grid::mask_elements(3, 2, &[3]).err(),
            Some("element index is out of range")
        );
    }
}
