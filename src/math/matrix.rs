use std::fmt;

/// Fixed-shape row-major matrix of weights for one layer transition.
///
/// Rows are inputs (row 0 is the bias), columns are the neurons of the
/// receiving layer. The shape never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Builds a matrix whose entry `(r, c)` is `f(r, c)`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Matrix
    where
        F: FnMut(usize, usize) -> f64,
    {
        let data = (0..rows)
            .map(|r| (0..cols).map(|c| f(r, c)).collect())
            .collect();
        Matrix { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        self.data.get_mut(row).and_then(|r| r.get_mut(col))
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.data.get(row).map(Vec::as_slice)
    }

    /// Iterates over all entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flat_map(|r| r.iter().copied())
    }
}

/// One line per input row, tab-terminated `(i=row,o=col+1)=value` entries.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.iter().enumerate() {
            for (o, value) in row.iter().enumerate() {
                write!(f, "(i={},o={})={:?}\t", i, o + 1, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_fills_row_major() {
        let m = Matrix::from_fn(2, 3, |r, c| (r * 10 + c) as f64);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.get(1, 2), Some(12.0));
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn out_of_range_access_is_none() {
        let mut m = Matrix::zeros(2, 2);
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 2), None);
        assert!(m.get_mut(5, 5).is_none());
        assert!(m.row(2).is_none());
    }

    #[test]
    fn display_lists_one_row_per_line() {
        let m = Matrix::from_fn(2, 2, |r, c| if r == c { 1.0 } else { -0.5 });
        assert_eq!(
            m.to_string(),
            "(i=0,o=1)=1.0\t(i=0,o=2)=-0.5\t\n(i=1,o=1)=-0.5\t(i=1,o=2)=1.0\t\n"
        );
    }
}
