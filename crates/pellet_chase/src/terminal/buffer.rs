//! Character-cell frame buffer with a depth test

use nalgebra::Point3;

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character drawn in the cell
    pub glyph: char,
    /// Foreground colour
    pub color: [u8; 3],
}

impl Cell {
    /// An empty (space) cell
    pub const BLANK: Self = Self {
        glyph: ' ',
        color: [0, 0, 0],
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Grid of cells plus one depth value per cell
#[derive(Debug, Clone)]
pub struct CellBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    depth: Vec<f32>,
}

impl CellBuffer {
    /// Blank buffer of `width` × `height` cells
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    /// Width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Change dimensions; contents are cleared
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::BLANK; width * height];
        self.depth = vec![f32::INFINITY; width * height];
    }

    /// Blank every cell and reset depth
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
        self.depth.fill(f32::INFINITY);
    }

    /// Cell at (`x`, `y`), row 0 at the top
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[x + y * self.width])
    }

    /// Row `y` of cells
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = (y * self.width).min(self.cells.len());
        let end = (start + self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Write `cell` when it is closer than what is already there
    pub fn set(&mut self, x: usize, y: usize, depth: f32, cell: Cell) {
        if x < self.width && y < self.height {
            let index = x + y * self.width;
            if depth <= self.depth[index] {
                self.cells[index] = cell;
                self.depth[index] = depth;
            }
        }
    }

    /// Map normalised device coordinates to cell space (y down)
    #[allow(clippy::cast_precision_loss)]
    pub fn to_screen(&self, ndc: &Point3<f32>) -> Point3<f32> {
        Point3::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
            ndc.z,
        )
    }

    /// Fill a screen-space triangle, shading each covered cell with `shade`
    ///
    /// Both windings are filled. Cells are sampled at their centres and the
    /// depth is interpolated barycentrically.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn fill_triangle(
        &mut self,
        triangle: [Point3<f32>; 3],
        mut shade: impl FnMut(usize, usize) -> Cell,
    ) {
        let [a, b, c] = triangle;
        let area = edge(&a, &b, &c);
        if area.abs() <= f32::EPSILON || self.width == 0 || self.height == 0 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as usize;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as usize;
        let max_x = (a.x.max(b.x).max(c.x).ceil().max(0.0) as usize).min(self.width - 1);
        let max_y = (a.y.max(b.y).max(c.y).ceil().max(0.0) as usize).min(self.height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                let w0 = edge(&b, &c, &p) / area;
                let w1 = edge(&c, &a, &p) / area;
                let w2 = edge(&a, &b, &p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let depth = w0 * a.z + w1 * b.z + w2 * c.z;
                self.set(x, y, depth, shade(x, y));
            }
        }
    }
}

fn edge(a: &Point3<f32>, b: &Point3<f32>, p: &Point3<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
