use glam::IVec2;

/// Inclusive pixel rectangle in display coordinates (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left column.
    pub x0: i32,
    /// Bottom row.
    pub y0: i32,
    /// Right column (inclusive).
    pub x1: i32,
    /// Top row (inclusive).
    pub y1: i32,
}

impl PixelRect {
    /// Square of side `2 * extent + 1` centered on `center`.
    #[must_use]
    pub fn around(center: IVec2, extent: i32) -> Self {
        Self {
            x0: center.x - extent,
            y0: center.y - extent,
            x1: center.x + extent,
            y1: center.y + extent,
        }
    }

    /// Column count.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    /// Row count.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    /// Intersection with a `width` x `height` surface, `None` if empty.
    #[must_use]
    pub fn clip(&self, width: i32, height: i32) -> Option<Self> {
        let clipped = Self {
            x0: self.x0.max(0),
            y0: self.y0.max(0),
            x1: self.x1.min(width - 1),
            y1: self.y1.min(height - 1),
        };
        (clipped.x0 <= clipped.x1 && clipped.y0 <= clipped.y1)
            .then_some(clipped)
    }

    /// Whether the pixel lies inside.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Depth samples over a [`PixelRect`], stored bottom row first.
///
/// Samples outside the render surface read as the far plane (`1.0`).
#[derive(Debug, Clone, PartialEq)]
pub struct DepthWindow {
    rect: PixelRect,
    samples: Vec<f32>,
}

impl DepthWindow {
    /// Window over `rect` with every sample at the far plane.
    #[must_use]
    pub fn far(rect: PixelRect) -> Self {
        let count = (rect.width().max(0) * rect.height().max(0)) as usize;
        Self {
            rect,
            samples: vec![1.0; count],
        }
    }

    /// Covered rectangle.
    #[must_use]
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.rect.contains(x, y).then(|| {
            ((y - self.rect.y0) * self.rect.width() + (x - self.rect.x0))
                as usize
        })
    }

    /// Depth at a display pixel, `1.0` outside the window.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.index(x, y)
            .and_then(|i| self.samples.get(i).copied())
            .unwrap_or(1.0)
    }

    /// Store a sample; pixels outside the window are ignored.
    pub fn set(&mut self, x: i32, y: i32, depth: f32) {
        if let Some(sample) =
            self.index(x, y).and_then(|i| self.samples.get_mut(i))
        {
            *sample = depth;
        }
    }

    /// Samples in scan order: rows bottom to top, columns left to right.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, f32)> + '_ {
        let rect = self.rect;
        let width = rect.width();
        self.samples.iter().enumerate().map(move |(i, d)| {
            let i = i as i32;
            (IVec2::new(rect.x0 + i % width, rect.y0 + i / width), *d)
        })
    }

    /// Copy the part of `source` (row-major, top row first, `width` x
    /// `height`) that this window covers. Used by backends that keep a CPU
    /// copy of their depth buffer.
    pub fn fill_from_top_down(
        &mut self,
        source: &[f32],
        width: i32,
        height: i32,
    ) {
        let Some(clip) = self.rect.clip(width, height) else {
            return;
        };
        for y in clip.y0..=clip.y1 {
            let row = height - 1 - y;
            for x in clip.x0..=clip.x1 {
                if let Some(depth) = source.get((row * width + x) as usize) {
                    self.set(x, y, *depth);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_drops_out_of_surface_parts() {
        let rect = PixelRect::around(IVec2::new(0, 0), 2);
        let clip = rect.clip(10, 10).unwrap();
        assert_eq!(clip, PixelRect { x0: 0, y0: 0, x1: 2, y1: 2 });
        assert!(PixelRect::around(IVec2::new(20, 20), 1)
            .clip(10, 10)
            .is_none());
    }

    #[test]
    fn outside_samples_read_far() {
        let mut window = DepthWindow::far(PixelRect::around(IVec2::new(5, 5), 1));
        window.set(5, 5, 0.3);
        window.set(50, 50, 0.1);
        assert_eq!(window.get(5, 5), 0.3);
        assert_eq!(window.get(4, 4), 1.0);
        assert_eq!(window.get(50, 50), 1.0);
    }

    #[test]
    fn top_down_rows_are_flipped_into_display_rows() {
        // 2x2 surface, top row first.
        let source = [0.1, 0.2, 0.3, 0.4];
        let mut window = DepthWindow::far(PixelRect { x0: 0, y0: 0, x1: 1, y1: 1 });
        window.fill_from_top_down(&source, 2, 2);
        assert_eq!(window.get(0, 1), 0.1);
        assert_eq!(window.get(1, 1), 0.2);
        assert_eq!(window.get(0, 0), 0.3);
        assert_eq!(window.get(1, 0), 0.4);
    }

    #[test]
    fn scan_order_is_bottom_row_first() {
        let window = DepthWindow::far(PixelRect { x0: 3, y0: 7, x1: 4, y1: 8 });
        let coords: Vec<IVec2> = window.iter().map(|(p, _)| p).collect();
        assert_eq!(
            coords,
            vec![
                IVec2::new(3, 7),
                IVec2::new(4, 7),
                IVec2::new(3, 8),
                IVec2::new(4, 8)
            ]
        );
    }
}
