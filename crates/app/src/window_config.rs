//! Window configuration for the desktop app.

use faculty_app::APP_NAME;
use macroquad::window::Conf;

const DEFAULT_WINDOW_WIDTH: i32 = 1024;
const DEFAULT_WINDOW_HEIGHT: i32 = 768;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        // Linux desktop sessions may not scale low-DPI framebuffers automatically.
        high_dpi: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::build_window_conf;

    #[test]
    fn enables_high_dpi_rendering() {
        assert!(build_window_conf().high_dpi);
    }

    #[test]
    fn uses_expected_default_window_size() {
        let conf = build_window_conf();
        assert_eq!(conf.window_width, 1024);
        assert_eq!(conf.window_height, 768);
    }
}
