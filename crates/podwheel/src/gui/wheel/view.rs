use super::model::{Layout, Rect, Zone, first_visible};
use super::{FONT_SIZE, LABEL_RING_FACTOR, ROW_PADDING, SCREEN_CORNER_RADIUS};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use clickwheel::menu::MenuItem;
use clickwheel::{Controller, Point, ViewContext};
use palette::Srgba;
use std::f64::consts::PI;

const PRIVACY_POLICY: &[&str] = &[
    "We store your handle, display",
    "name, your five song links and",
    "who you follow. Nothing else.",
    "Delete Account removes all of",
    "it, including friend links.",
];

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, rect: &Rect, radius: f64) {
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    let r = radius.min(w / 2.0).min(h / 2.0);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

/// Shortens `text` with an ellipsis until it fits in `max_width`.
fn fit_text(cr: &Context, text: &str, max_width: f64) -> String {
    let fits = |s: &str| cr.text_extents(s).map(|e| e.x_advance() <= max_width).unwrap_or(true);
    if fits(text) {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "\u{2026}";
        if fits(&candidate) {
            return candidate;
        }
    }
    String::new()
}

fn empty_message(context: ViewContext) -> &'static str {
    match context {
        ViewContext::MyFive => "No songs yet",
        ViewContext::FriendsList => "No friends yet",
        ViewContext::TodaysPlaylist => "Nothing dropped today",
        ViewContext::Music => "Nothing playing",
        _ => "",
    }
}

struct ScreenRenderer<'a> {
    controller: &'a Controller,
    layout: &'a Layout,
    colors: &'a ThemeColors,
}

impl<'a> ScreenRenderer<'a> {
    fn new(controller: &'a Controller, layout: &'a Layout, colors: &'a ThemeColors) -> Self {
        Self {
            controller,
            layout,
            colors,
        }
    }

    fn font_size(&self) -> f64 {
        FONT_SIZE * self.layout.scale
    }

    fn padding(&self) -> f64 {
        ROW_PADDING * self.layout.scale
    }

    fn draw(&self, cr: &Context, prompt: Option<&str>) -> Result<(), cairo::Error> {
        let screen = &self.layout.screen;
        cr.save()?;
        rounded_rect(cr, screen, SCREEN_CORNER_RADIUS * self.layout.scale);
        set_color(cr, self.colors.screen);
        cr.fill_preserve()?;
        cr.clip();

        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(self.font_size());

        self.draw_title(cr)?;
        let mut top = screen.y + self.layout.title_height();
        if self.controller.active_context() == ViewContext::Music {
            top = self.draw_now_playing(cr, top)?;
        }
        if self.controller.active_context() == ViewContext::PrivacyPolicy {
            self.draw_lines(cr, top, PRIVACY_POLICY)?;
        } else {
            self.draw_rows(cr, top)?;
        }

        if let Some(text) = prompt.or(self.controller.notice()) {
            self.draw_banner(cr, text)?;
        }
        cr.restore()
    }

    fn draw_title(&self, cr: &Context) -> Result<(), cairo::Error> {
        let screen = &self.layout.screen;
        let height = self.layout.title_height();

        cr.save()?;
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        set_color(cr, self.colors.text);
        let title = fit_text(cr, &self.controller.title(), screen.width - 4.0 * self.padding());
        let ext = cr.text_extents(&title)?;
        cr.move_to(
            screen.x + (screen.width - ext.x_advance()) / 2.0,
            screen.y + (height + ext.height()) / 2.0,
        );
        cr.show_text(&title)?;

        if self.controller.is_playing() {
            cr.move_to(screen.x + self.padding(), screen.y + (height + ext.height()) / 2.0);
            cr.show_text("\u{25B6}")?;
        }

        cr.set_line_width(1.0);
        cr.move_to(screen.x, screen.y + height);
        cr.line_to(screen.x + screen.width, screen.y + height);
        cr.stroke()?;
        cr.restore()
    }

    /// Track details above the Music controls. Returns where the rows start.
    fn draw_now_playing(&self, cr: &Context, top: f64) -> Result<f64, cairo::Error> {
        let Some(track) = self.controller.now_playing() else {
            return Ok(top);
        };
        let (title, artist) = match &track.meta {
            Some(meta) => (meta.title.clone(), meta.artist.clone()),
            None => (track.url.to_string(), String::new()),
        };
        let state = if self.controller.is_playing() {
            "Playing"
        } else {
            "Paused"
        };
        self.draw_lines(cr, top, &[title.as_str(), artist.as_str(), state])?;
        Ok(top + 3.0 * self.layout.row_height() + self.padding())
    }

    fn draw_lines(&self, cr: &Context, top: f64, lines: &[&str]) -> Result<(), cairo::Error> {
        let screen = &self.layout.screen;
        set_color(cr, self.colors.text);
        for (i, line) in lines.iter().enumerate() {
            let text = fit_text(cr, line, screen.width - 2.0 * self.padding());
            let baseline = top + (i as f64 + 1.0) * self.layout.row_height() - self.padding() / 2.0;
            cr.move_to(screen.x + self.padding(), baseline);
            cr.show_text(&text)?;
        }
        Ok(())
    }

    fn draw_rows(&self, cr: &Context, top: f64) -> Result<(), cairo::Error> {
        let screen = &self.layout.screen;
        let items = self.controller.items();
        let context = self.controller.active_context();

        if items.is_empty() {
            let message = empty_message(context);
            if !message.is_empty() {
                set_color(cr, self.colors.text);
                let ext = cr.text_extents(message)?;
                cr.move_to(
                    screen.x + (screen.width - ext.x_advance()) / 2.0,
                    top + (screen.bottom() - top) / 2.0,
                );
                cr.show_text(message)?;
            }
            return Ok(());
        }

        let row_height = self.layout.row_height();
        let visible = (((screen.bottom() - top) / row_height).floor() as usize).max(1);
        let selection = self.controller.selection();
        let first = first_visible(selection, items.len(), visible);

        for (row, (index, item)) in items
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let y = top + row as f64 * row_height;
            self.draw_row(cr, *item, y, index == selection)?;
        }
        Ok(())
    }

    fn draw_row(&self, cr: &Context, item: MenuItem, y: f64, selected: bool) -> Result<(), cairo::Error> {
        let screen = &self.layout.screen;
        let row_height = self.layout.row_height();
        let pad = self.padding();

        if selected {
            set_color(cr, self.colors.selected);
            cr.rectangle(screen.x, y, screen.width, row_height);
            cr.fill()?;
            set_color(cr, self.colors.selected_text);
        } else {
            set_color(cr, self.colors.text);
        }

        let baseline = y + row_height - pad * 0.75;
        let chevron_room = if item.has_children() { 2.0 * pad } else { 0.0 };
        let label = fit_text(
            cr,
            &self.controller.label(item),
            screen.width - 2.0 * pad - chevron_room,
        );
        cr.move_to(screen.x + pad, baseline);
        cr.show_text(&label)?;

        if item.has_children() {
            let ext = cr.text_extents("\u{203A}")?;
            cr.move_to(screen.x + screen.width - pad - ext.x_advance(), baseline);
            cr.show_text("\u{203A}")?;
        }
        Ok(())
    }

    fn draw_banner(&self, cr: &Context, text: &str) -> Result<(), cairo::Error> {
        let screen = &self.layout.screen;
        let height = self.layout.row_height();
        let pad = self.padding();

        set_color(cr, self.colors.notice);
        cr.rectangle(screen.x, screen.bottom() - height, screen.width, height);
        cr.fill()?;

        cr.set_source_rgb(1.0, 1.0, 1.0);
        let text = fit_text(cr, text, screen.width - 2.0 * pad);
        cr.move_to(screen.x + pad, screen.bottom() - pad * 0.75);
        cr.show_text(&text)
    }
}

fn draw_wheel(cr: &Context, layout: &Layout, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let wheel = &layout.wheel;
    let Point { x, y } = wheel.center;

    set_color(cr, colors.wheel);
    cr.arc(x, y, wheel.radius, 0.0, 2.0 * PI);
    cr.fill()?;

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(FONT_SIZE * layout.scale);
    set_color(cr, colors.wheel_label);
    for (zone, angle) in Zone::BUTTONS {
        let at = Point::on_circle(wheel.center, wheel.radius * LABEL_RING_FACTOR, angle);
        let ext = cr.text_extents(zone.label())?;
        cr.move_to(at.x - ext.x_advance() / 2.0, at.y + ext.height() / 2.0);
        cr.show_text(zone.label())?;
    }

    set_color(cr, colors.hub);
    cr.arc(x, y, wheel.hub_radius(), 0.0, 2.0 * PI);
    cr.fill_preserve()?;
    set_color(cr, colors.wheel_label);
    cr.set_line_width(1.0);
    cr.stroke()
}

pub fn draw(
    cr: &Context,
    controller: &Controller,
    layout: &Layout,
    colors: &ThemeColors,
    prompt: Option<&str>,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.body);
    cr.paint()?;
    ScreenRenderer::new(controller, layout, colors).draw(cr, prompt)?;
    draw_wheel(cr, layout, colors)
}
