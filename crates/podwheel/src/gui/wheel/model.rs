use crate::gui::wheel::{
    BUTTON_HALF_ARC, REFERENCE_WIDTH, ROW_HEIGHT, SCREEN_ASPECT, SCREEN_MARGIN, TITLE_HEIGHT,
    WHEEL_RADIUS_FACTOR,
};
use clickwheel::geometry::angle_delta;
use clickwheel::{Point, Wheel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// What a click at some point presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Screen,
    Hub,
    Menu,
    Next,
    PlayPause,
    Previous,
    Outside,
}

impl Zone {
    /// Ring buttons and the angle their centre sits at.
    pub const BUTTONS: [(Zone, f64); 4] = [
        (Zone::Next, 0.0),
        (Zone::PlayPause, 90.0),
        (Zone::Previous, 180.0),
        (Zone::Menu, 270.0),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Menu => "MENU",
            Self::Next => "\u{23ED}",
            Self::PlayPause => "\u{23EF}",
            Self::Previous => "\u{23EE}",
            Self::Screen | Self::Hub | Self::Outside => "",
        }
    }
}

/// Screen and wheel placement for a window of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub scale: f64,
    pub screen: Rect,
    pub wheel: Wheel,
}

impl Layout {
    pub fn new(width: f64, height: f64, hub_ratio: f64) -> Self {
        let scale = (width / REFERENCE_WIDTH).max(0.1);
        let margin = SCREEN_MARGIN * scale;
        let screen_width = (width - 2.0 * margin).max(0.0);
        let screen = Rect {
            x: margin,
            y: margin,
            width: screen_width,
            height: screen_width * SCREEN_ASPECT,
        };

        let free = (height - screen.bottom()).max(0.0);
        let radius = (WHEEL_RADIUS_FACTOR * width).min((free - margin) / 2.0).max(0.0);
        let center = Point::new(width / 2.0, screen.bottom() + free / 2.0);

        Self {
            scale,
            screen,
            wheel: Wheel::new(center, radius).with_hub_ratio(hub_ratio),
        }
    }

    pub fn zone(&self, p: Point) -> Zone {
        if self.screen.contains(p) {
            return Zone::Screen;
        }
        if !self.wheel.contains(p) {
            return Zone::Outside;
        }
        if self.wheel.in_hub(p) {
            return Zone::Hub;
        }
        let angle = self.wheel.angle_of(p);
        Zone::BUTTONS
            .iter()
            .find(|(_, at)| angle_delta(*at, angle).abs() <= BUTTON_HALF_ARC)
            .map(|(zone, _)| *zone)
            .unwrap_or(Zone::Outside)
    }

    pub fn title_height(&self) -> f64 {
        TITLE_HEIGHT * self.scale
    }

    pub fn row_height(&self) -> f64 {
        ROW_HEIGHT * self.scale
    }

    /// How many list rows fit under the title bar.
    pub fn visible_rows(&self) -> usize {
        let room = self.screen.height - self.title_height();
        ((room / self.row_height()).floor() as usize).max(1)
    }
}

/// First row to draw so that `selection` stays on screen.
pub fn first_visible(selection: usize, len: usize, visible: usize) -> usize {
    if len <= visible || visible == 0 {
        return 0;
    }
    selection
        .saturating_sub(visible - 1)
        .min(len - visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(320.0, 540.0, 0.35)
    }

    #[test]
    fn test_wheel_sits_below_screen() {
        let l = layout();
        assert!(l.wheel.center.y - l.wheel.radius >= l.screen.bottom());
        assert!(l.wheel.center.y + l.wheel.radius <= 540.0);
        assert!(l.wheel.radius > 0.0);
    }

    #[test]
    fn test_zones_around_the_wheel() {
        let l = layout();
        let c = l.wheel.center;
        let ring = l.wheel.radius * 0.7;
        assert_eq!(l.zone(c), Zone::Hub);
        assert_eq!(l.zone(Point::on_circle(c, ring, 270.0)), Zone::Menu);
        assert_eq!(l.zone(Point::on_circle(c, ring, 0.0)), Zone::Next);
        assert_eq!(l.zone(Point::on_circle(c, ring, 90.0)), Zone::PlayPause);
        assert_eq!(l.zone(Point::on_circle(c, ring, 180.0)), Zone::Previous);
        assert_eq!(l.zone(Point::on_circle(c, ring, 350.0)), Zone::Next);
        assert_eq!(l.zone(Point::new(2.0, 539.0)), Zone::Outside);
        assert_eq!(l.zone(Point::new(160.0, 60.0)), Zone::Screen);
    }

    #[test]
    fn test_tiny_window_does_not_go_negative() {
        let l = Layout::new(10.0, 10.0, 0.35);
        assert!(l.wheel.radius >= 0.0);
        assert!(l.visible_rows() >= 1);
    }

    #[test]
    fn test_scrolling_keeps_selection_visible() {
        assert_eq!(first_visible(0, 3, 6), 0);
        assert_eq!(first_visible(5, 10, 6), 0);
        assert_eq!(first_visible(6, 10, 6), 1);
        assert_eq!(first_visible(9, 10, 6), 4);
        assert_eq!(first_visible(0, 10, 0), 0);
    }
}
