//! Startup parameters.

/// Fixed parameters of the window, context and frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Window title.
    pub title: String,

    /// Window width in pixels.
    pub width: u32,

    /// Window height in pixels.
    pub height: u32,

    /// Requested OpenGL core profile version.
    pub gl_version: (u8, u8),

    /// Synchronize buffer swaps with the display refresh.
    pub vsync: bool,

    /// Background fill color.
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: "Gaem".to_string(),
            width: 1280,
            height: 800,
            gl_version: (4, 0),
            vsync: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.title, "Gaem");
        assert_eq!((config.width, config.height), (1280, 800));
        assert_eq!(config.gl_version, (4, 0));
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
    }
}
