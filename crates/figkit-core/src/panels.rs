// File: crates/figkit-core/src/panels.rs
// Summary: Shape-aware views over a figure's dense, row-major grid of panel handles.
// Notes:
// - Containers never own the drawing areas; they share the figure's handle
//   buffer. Slicing builds a new buffer of handle clones, which still refer
//   to the same drawing areas.
// - Anything not defined here is reached through `Deref<Target = [Panel]>`.

use std::ops::{Deref, Index, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};
use std::rc::Rc;

use crate::error::{FigError, Result};
use crate::panel::Panel;

/// One axis of an index expression, with negative-from-end semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ix {
    At(isize),
    /// Half-open `start..stop` walked by `step` (never 0). Missing bounds
    /// default to the ends appropriate for the direction of `step`.
    Slice { start: Option<isize>, stop: Option<isize>, step: isize },
}

impl Ix {
    /// Every position along the axis.
    pub const fn all() -> Self {
        Ix::Slice { start: None, stop: None, step: 1 }
    }

    pub const fn range(start: isize, stop: isize) -> Self {
        Ix::Slice { start: Some(start), stop: Some(stop), step: 1 }
    }

    pub const fn step(self, step: isize) -> Self {
        match self {
            Ix::Slice { start, stop, .. } => Ix::Slice { start, stop, step },
            at => at,
        }
    }

    pub const fn is_scalar(&self) -> bool {
        matches!(self, Ix::At(_))
    }

    /// Positions selected along an axis of length `len`.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>> {
        match *self {
            Ix::At(i) => resolve_at(i, len).map(|p| vec![p]),
            Ix::Slice { start, stop, step } => slice_positions(start, stop, step, len),
        }
    }
}

fn resolve_at(i: isize, len: usize) -> Result<usize> {
    let n = len as isize;
    let p = if i < 0 { i + n } else { i };
    if (0..n).contains(&p) {
        Ok(p as usize)
    } else {
        Err(FigError::InvalidArgument(format!("index {i} is out of bounds for axis of size {len}")))
    }
}

fn slice_positions(start: Option<isize>, stop: Option<isize>, step: isize, len: usize) -> Result<Vec<usize>> {
    if step == 0 {
        return Err(FigError::InvalidArgument("slice step cannot be zero".into()));
    }
    let n = len as isize;
    let adjust = |v: isize, lo: isize, hi: isize| (if v < 0 { v + n } else { v }).clamp(lo, hi);
    let mut out = Vec::new();
    if step > 0 {
        let s = start.map_or(0, |v| adjust(v, 0, n));
        let e = stop.map_or(n, |v| adjust(v, 0, n));
        let mut i = s;
        while i < e {
            out.push(i as usize);
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    } else {
        let s = start.map_or(n - 1, |v| adjust(v, -1, n - 1));
        let e = stop.map_or(-1, |v| adjust(v, -1, n - 1));
        let mut i = s;
        while i > e {
            out.push(i as usize);
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    }
    Ok(out)
}

impl From<isize> for Ix {
    fn from(i: isize) -> Self { Ix::At(i) }
}

impl From<i32> for Ix {
    fn from(i: i32) -> Self { Ix::At(i as isize) }
}

impl From<usize> for Ix {
    fn from(i: usize) -> Self { Ix::At(i as isize) }
}

impl From<Range<isize>> for Ix {
    fn from(r: Range<isize>) -> Self { Ix::range(r.start, r.end) }
}

impl From<RangeInclusive<isize>> for Ix {
    fn from(r: RangeInclusive<isize>) -> Self {
        // `..=isize::MAX` has no exclusive end; an open stop selects the same positions.
        Ix::Slice { start: Some(*r.start()), stop: r.end().checked_add(1), step: 1 }
    }
}

impl From<RangeFrom<isize>> for Ix {
    fn from(r: RangeFrom<isize>) -> Self { Ix::Slice { start: Some(r.start), stop: None, step: 1 } }
}

impl From<RangeTo<isize>> for Ix {
    fn from(r: RangeTo<isize>) -> Self { Ix::Slice { start: None, stop: Some(r.end), step: 1 } }
}

impl From<RangeFull> for Ix {
    fn from(_: RangeFull) -> Self { Ix::all() }
}

fn gather(buf: &[Panel], positions: impl IntoIterator<Item = usize>) -> Rc<[Panel]> {
    positions.into_iter().map(|p| buf[p].clone()).collect()
}

/// A 1-D run of panels (a single row or column grid, or a flattened one).
#[derive(Clone, Debug, PartialEq)]
pub struct PanelArray1 {
    panels: Rc<[Panel]>,
}

impl PanelArray1 {
    /// View over `panels`, which must hold exactly `len` handles.
    pub fn new(panels: Rc<[Panel]>, len: usize) -> Result<Self> {
        if panels.len() != len {
            return Err(FigError::ShapeMismatch { expected: vec![len], actual: panels.len() });
        }
        Ok(Self { panels })
    }

    pub fn shape(&self) -> [usize; 1] {
        [self.panels.len()]
    }

    pub fn ndim(&self) -> usize { 1 }

    pub fn size(&self) -> usize {
        self.panels.len()
    }

    /// Panel at `i`, counting from the end when negative.
    pub fn get(&self, i: isize) -> Result<&Panel> {
        resolve_at(i, self.panels.len()).map(|p| &self.panels[p])
    }

    /// Sub-run selected by `ix`. A scalar index yields a one-element run.
    pub fn slice(&self, ix: impl Into<Ix>) -> Result<PanelArray1> {
        let pos = ix.into().positions(self.panels.len())?;
        Ok(Self { panels: gather(&self.panels, pos) })
    }

    pub fn as_slice(&self) -> &[Panel] {
        &self.panels
    }
}

impl Deref for PanelArray1 {
    type Target = [Panel];
    fn deref(&self) -> &[Panel] {
        &self.panels
    }
}

impl Index<usize> for PanelArray1 {
    type Output = Panel;
    fn index(&self, i: usize) -> &Panel {
        &self.panels[i]
    }
}

impl<'a> IntoIterator for &'a PanelArray1 {
    type Item = &'a Panel;
    type IntoIter = std::slice::Iter<'a, Panel>;
    fn into_iter(self) -> Self::IntoIter {
        self.panels.iter()
    }
}

/// Result of a 2-D selection; the rank follows from which axes were sliced.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Panel(Panel),
    Array1(PanelArray1),
    Array2(PanelArray2),
}

/// A `rows x cols` grid of panels stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelArray2 {
    panels: Rc<[Panel]>,
    rows: usize,
    cols: usize,
}

impl PanelArray2 {
    pub fn new(panels: Rc<[Panel]>, rows: usize, cols: usize) -> Result<Self> {
        if panels.len() != rows * cols {
            return Err(FigError::ShapeMismatch { expected: vec![rows, cols], actual: panels.len() });
        }
        Ok(Self { panels, rows, cols })
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    pub fn ndim(&self) -> usize { 2 }

    pub fn size(&self) -> usize {
        self.panels.len()
    }

    pub fn nrows(&self) -> usize { self.rows }

    pub fn ncols(&self) -> usize { self.cols }

    pub fn get(&self, row: isize, col: isize) -> Result<&Panel> {
        let r = resolve_at(row, self.rows)?;
        let c = resolve_at(col, self.cols)?;
        Ok(&self.panels[r * self.cols + c])
    }

    /// Row-major dense-array selection: two scalars give a panel, one
    /// scalar gives a 1-D run, two slices give a grid.
    pub fn select(&self, row: impl Into<Ix>, col: impl Into<Ix>) -> Result<Selection> {
        let (row, col) = (row.into(), col.into());
        let rs = row.positions(self.rows)?;
        let cs = col.positions(self.cols)?;
        let cells = rs.iter().flat_map(|&r| cs.iter().map(move |&c| r * self.cols + c));
        let panels = gather(&self.panels, cells);
        Ok(match (row.is_scalar(), col.is_scalar()) {
            (true, true) => Selection::Panel(panels[0].clone()),
            (true, false) | (false, true) => Selection::Array1(PanelArray1 { panels }),
            (false, false) => Selection::Array2(PanelArray2 { panels, rows: rs.len(), cols: cs.len() }),
        })
    }

    /// Row `i`, counting from the end when negative.
    pub fn row(&self, i: isize) -> Result<PanelArray1> {
        resolve_at(i, self.rows).map(|r| self.row_at(r))
    }

    /// Column `j`, counting from the end when negative.
    pub fn col(&self, j: isize) -> Result<PanelArray1> {
        let c = resolve_at(j, self.cols)?;
        Ok(PanelArray1 { panels: gather(&self.panels, (0..self.rows).map(|r| r * self.cols + c)) })
    }

    pub fn rows(&self) -> impl Iterator<Item = PanelArray1> + '_ {
        (0..self.rows).map(move |r| self.row_at(r))
    }

    fn row_at(&self, r: usize) -> PanelArray1 {
        let start = r * self.cols;
        PanelArray1 { panels: gather(&self.panels, start..start + self.cols) }
    }

    /// Same handles as a 1-D run in row-major order; shares the buffer.
    pub fn flatten(&self) -> PanelArray1 {
        PanelArray1 { panels: Rc::clone(&self.panels) }
    }

    pub fn as_slice(&self) -> &[Panel] {
        &self.panels
    }
}

impl Deref for PanelArray2 {
    type Target = [Panel];
    fn deref(&self) -> &[Panel] {
        &self.panels
    }
}

impl Index<(usize, usize)> for PanelArray2 {
    type Output = Panel;
    fn index(&self, (r, c): (usize, usize)) -> &Panel {
        assert!(r < self.rows && c < self.cols, "index ({r}, {c}) out of bounds for shape ({}, {})", self.rows, self.cols);
        &self.panels[r * self.cols + c]
    }
}

impl<'a> IntoIterator for &'a PanelArray2 {
    type Item = &'a Panel;
    type IntoIter = std::slice::Iter<'a, Panel>;
    fn into_iter(self) -> Self::IntoIter {
        self.panels.iter()
    }
}

/// What a subplot request hands back, by requested shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Panels {
    Single(Panel),
    Array1(PanelArray1),
    Array2(PanelArray2),
}

impl Panels {
    /// Pick the wrapper from the grid shape alone.
    pub(crate) fn from_grid(panels: Rc<[Panel]>, rows: usize, cols: usize, flatten: bool) -> Result<Self> {
        if rows == 1 && cols == 1 {
            return match panels.first() {
                Some(p) if panels.len() == 1 => Ok(Panels::Single(p.clone())),
                _ => Err(FigError::ShapeMismatch { expected: vec![1, 1], actual: panels.len() }),
            };
        }
        if rows == 1 || cols == 1 || flatten {
            return Ok(Panels::Array1(PanelArray1::new(panels, rows * cols)?));
        }
        Ok(Panels::Array2(PanelArray2::new(panels, rows, cols)?))
    }

    pub fn single(&self) -> Option<&Panel> {
        match self {
            Panels::Single(p) => Some(p),
            _ => None,
        }
    }

    pub fn array1(&self) -> Option<&PanelArray1> {
        match self {
            Panels::Array1(a) => Some(a),
            _ => None,
        }
    }

    pub fn array2(&self) -> Option<&PanelArray2> {
        match self {
            Panels::Array2(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_single(self) -> Result<Panel> {
        match self {
            Panels::Single(p) => Ok(p),
            other => Err(other.mismatch(vec![1, 1])),
        }
    }

    pub fn into_array1(self) -> Result<PanelArray1> {
        match self {
            Panels::Array1(a) => Ok(a),
            other => Err(other.mismatch(vec![other.len()])),
        }
    }

    pub fn into_array2(self) -> Result<PanelArray2> {
        match self {
            Panels::Array2(a) => Ok(a),
            other => Err(other.mismatch(vec![other.len(), 1])),
        }
    }

    fn mismatch(&self, expected: Vec<usize>) -> FigError {
        FigError::ShapeMismatch { expected, actual: self.len() }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Panels::Single(_) => Vec::new(),
            Panels::Array1(a) => a.shape().to_vec(),
            Panels::Array2(a) => a.shape().to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Every handle in row-major order, regardless of rank.
    pub fn as_slice(&self) -> &[Panel] {
        match self {
            Panels::Single(p) => std::slice::from_ref(p),
            Panels::Array1(a) => a.as_slice(),
            Panels::Array2(a) => a.as_slice(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Panel> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a Panels {
    type Item = &'a Panel;
    type IntoIter = std::slice::Iter<'a, Panel>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
