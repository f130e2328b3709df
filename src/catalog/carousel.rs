// src/catalog/carousel.rs

/// Wrapping carousel position over `len` items, `per_view` visible at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
    per_view: usize,
}

impl Carousel {
    pub fn new(len: usize, per_view: usize) -> Self {
        Self {
            index: 0,
            len,
            per_view: per_view.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Item count changed (new fetch); keep the index valid.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
    }

    /// Indices currently on screen.
    pub fn window(&self) -> Vec<usize> {
        (0..self.per_view.min(self.len))
            .map(|offset| (self.index + offset) % self.len)
            .collect()
    }
}
