//! Generation options and the overrides callers layer on top of them.
use serde::Serialize;

pub const DEFAULT_WIDTH: u32 = 720;
pub const DEFAULT_HEIGHT: u32 = 1080;

/// The service is always asked for exactly one image.
pub const IMAGE_COUNT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// A single override. Overrides are applied in order, so a later one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOption {
    Width(u32),
    Height(u32),
}

pub fn with_width(width: u32) -> ImageOption {
    ImageOption::Width(width)
}

pub fn with_height(height: u32) -> ImageOption {
    ImageOption::Height(height)
}

impl ImageOption {
    pub fn apply(self, options: &mut GenerationOptions) {
        match self {
            ImageOption::Width(w) => options.width = w,
            ImageOption::Height(h) => options.height = h,
        }
    }
}

impl GenerationOptions {
    /// Defaults with `overrides` applied left to right.
    pub fn from_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = ImageOption>,
    {
        let mut options = GenerationOptions::default();
        for opt in overrides {
            opt.apply(&mut options);
        }
        options
    }

    pub fn count(&self) -> u32 {
        IMAGE_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = GenerationOptions::from_overrides(Vec::new());
        assert_eq!(opts.width, 720);
        assert_eq!(opts.height, 1080);
        assert_eq!(opts.count(), 1);
    }

    #[test]
    fn later_override_wins() {
        let opts = GenerationOptions::from_overrides([
            with_width(512),
            with_height(512),
            with_width(1024),
        ]);
        assert_eq!(
            opts,
            GenerationOptions {
                width: 1024,
                height: 512
            }
        );
    }
}
