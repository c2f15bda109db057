use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub body: Srgba<f64>,
    pub screen: Srgba<f64>,
    pub text: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub selected_text: Srgba<f64>,
    pub wheel: Srgba<f64>,
    pub wheel_label: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub notice: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            body: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.92, 0.92, 0.93, 1.0),
                Some(1.0),
            ),
            screen: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.98, 0.98, 0.98, 1.0),
                Some(1.0),
            ),
            text: Self::lookup_color(
                context,
                "theme_text_color",
                Srgba::new(0.1, 0.1, 0.1, 1.0),
                None,
            ),
            selected: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.2, 0.45, 0.85, 1.0),
                Some(1.0),
            ),
            selected_text: Self::lookup_color(
                context,
                "theme_selected_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            wheel: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.8, 0.8, 0.82, 1.0),
                Some(0.12),
            ),
            wheel_label: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.45, 0.45, 0.47, 1.0),
                Some(0.6),
            ),
            hub: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.95, 0.95, 0.96, 1.0),
                Some(1.0),
            ),
            notice: Self::lookup_color(
                context,
                "error_bg_color",
                Srgba::new(0.8, 0.2, 0.2, 0.9),
                Some(0.9),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.podwheel-window {
    border-radius: 24px;
}
.podwheel-drawing-area:focus {
    outline: none;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
