/// Per-frame depth buffer and the character frame it resolves to
use crate::projection::Camera;
use crate::vertex::ColorTag;

/// A single output cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: ColorTag,
}

impl Default for Cell {
    fn default() -> Self {
        Self { ch: ' ', color: 0 }
    }
}

/// A finished WxH grid of cells, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on 0, an empty frame simply has no rows
        self.cells.chunks(self.width.max(1))
    }

    /// The characters of the frame, one line per row
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            text.extend(row.iter().map(|c| c.ch));
            text.push('\n');
        }
        text
    }
}

/// Depth and colour grids for one frame
///
/// Depth cells start out unset (`None`) and only ever move nearer.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    depth: Vec<Option<f64>>,
    color: Vec<ColorTag>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth: vec![None; size],
            color: vec![0; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate for a new surface size. Returns whether the size changed.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        *self = Self::new(width, height);
        true
    }

    pub fn clear(&mut self) {
        self.depth.fill(None);
        self.color.fill(0);
    }

    /// Depth-tested write. Returns `true` when the cell was taken.
    ///
    /// Ties keep the earlier write, so a later point only wins by being
    /// strictly nearer.
    pub fn plot(&mut self, x: usize, y: usize, depth: f64, color: ColorTag) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }

        let idx = y * self.width + x;
        let nearer = match self.depth[idx] {
            None => true,
            Some(current) => depth < current,
        };
        if nearer {
            self.depth[idx] = Some(depth);
            self.color[idx] = color;
        }
        nearer
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            self.depth[y * self.width + x]
        } else {
            None
        }
    }

    pub fn color_at(&self, x: usize, y: usize) -> ColorTag {
        if x < self.width && y < self.height {
            self.color[y * self.width + x]
        } else {
            0
        }
    }

    /// Turn depths into ramp characters. Unset cells get the camera's
    /// background character and no colour.
    pub fn resolve(&self, camera: &Camera) -> Frame {
        let cells = self
            .depth
            .iter()
            .zip(&self.color)
            .map(|(depth, &color)| match depth {
                Some(d) => Cell {
                    ch: camera.get_illumination(*d),
                    color,
                },
                None => Cell {
                    ch: camera.background(),
                    color: 0,
                },
            })
            .collect();

        Frame {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}
