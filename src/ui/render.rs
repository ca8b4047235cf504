use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph},
    Frame,
};

use super::braille::{pattern_char, BrailleCanvas};
use super::overlay::{render_overlay, OverlayMessage};
use crate::config::DisplayConfig;
use crate::game::World;

// Layout: two HUD rows on top, the arena in the middle, controls hint at the bottom
const UI_HEADER_ROWS: u16 = 2;
const UI_FOOTER_ROWS: u16 = 1;

// Length of the facing tick beyond the body, world units
const FACING_TICK: f32 = 0.8;
// How much the player marker grows per unit of height
const HEIGHT_GROWTH: f32 = 0.3;

/// Maps arena coordinates (x right, z up the screen) onto canvas pixels,
/// keeping the arena's aspect ratio.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    arena_depth: f32,
}

impl Viewport {
    fn fit(canvas: &BrailleCanvas, arena_width: f32, arena_depth: f32) -> Self {
        let pw = canvas.pixel_width() as f32;
        let ph = canvas.pixel_height() as f32;
        let scale = (pw / arena_width).min(ph / arena_depth).max(0.0);
        Self {
            scale,
            offset_x: (pw - arena_width * scale) / 2.0,
            offset_y: (ph - arena_depth * scale) / 2.0,
            arena_depth,
        }
    }

    fn to_pixel(&self, x: f32, z: f32) -> (i64, i64) {
        let px = self.offset_x + x * self.scale;
        let py = self.offset_y + (self.arena_depth - z) * self.scale;
        (px.round() as i64, py.round() as i64)
    }

    fn len(&self, world_units: f32) -> usize {
        (world_units * self.scale).round().max(1.0) as usize
    }
}

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

pub fn render(
    frame: &mut Frame,
    world: &World,
    display: &DisplayConfig,
    controls_hint: &str,
    overlay: Option<&OverlayMessage>,
) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let [header, arena_area, footer] = Layout::vertical([
        Constraint::Length(UI_HEADER_ROWS),
        Constraint::Min(1),
        Constraint::Length(UI_FOOTER_ROWS),
    ])
    .areas(area);

    draw_hud(frame, world, display, header);
    draw_arena(frame, world, display, arena_area);
    draw_controls(frame, controls_hint, footer);

    if let Some(message) = overlay {
        render_overlay(frame, message, area);
    }
}

fn draw_hud(frame: &mut Frame, world: &World, display: &DisplayConfig, area: Rect) {
    let [status_row, gauge_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let score = world
        .manager
        .score_text
        .as_ref()
        .map(|w| w.text.clone())
        .unwrap_or_default();

    let state = world.motion_state();
    // Airborne with the second jump still available
    let air_jump = if !world.player.is_grounded() && world.player.state().can_double_jump {
        " x2"
    } else {
        ""
    };
    let status = Line::from(vec![
        Span::styled(score, Style::default().fg(rgb(display.coin_color))),
        Span::raw(format!(
            "   {}/{} coins left   ",
            world.coins.len(),
            world.coins_total
        )),
        Span::styled(state.label(), Style::default().fg(Color::Yellow)),
        Span::styled(air_jump, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(
                "   speed {:.1}   height {:.1}   camera {}",
                world.body.planar_speed(),
                world.body.position.y,
                world.camera.heading_label()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), status_row);

    // Unbound slider: nothing to draw
    if let Some(slider) = world.manager.dash_cooldown_slider.as_ref() {
        let value = slider.value.clamp(0.0, 1.0);
        let label = if value >= 1.0 {
            "Dash ready".to_string()
        } else {
            format!("Dash {:>3.0}%", value * 100.0)
        };
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(rgb(display.cooldown_color))
                    .bg(Color::Rgb(30, 30, 30)),
            )
            .ratio(value as f64)
            .label(label);
        frame.render_widget(gauge, gauge_row);
    }
}

fn draw_arena(frame: &mut Frame, world: &World, display: &DisplayConfig, area: Rect) {
    let cells_w = area.width as usize;
    let cells_h = area.height as usize;

    // One canvas per color; later layers win where they overlap
    let mut walls = BrailleCanvas::new(cells_w, cells_h);
    let mut platforms = BrailleCanvas::new(cells_w, cells_h);
    let mut coins = BrailleCanvas::new(cells_w, cells_h);
    let mut player = BrailleCanvas::new(cells_w, cells_h);

    let view = Viewport::fit(&walls, world.arena.width, world.arena.depth);
    if view.scale <= 0.0 {
        return;
    }

    let (left, top) = view.to_pixel(0.0, world.arena.depth);
    walls.draw_rect(
        left.max(0) as usize,
        top.max(0) as usize,
        view.len(world.arena.width),
        view.len(world.arena.depth),
    );

    for platform in &world.arena.platforms {
        let (x, y) = view.to_pixel(platform.min_x, platform.max_z);
        platforms.draw_rect(
            x.max(0) as usize,
            y.max(0) as usize,
            view.len(platform.max_x - platform.min_x),
            view.len(platform.max_z - platform.min_z),
        );
    }

    for coin in &world.coins {
        let (cx, cy) = view.to_pixel(coin.position.x, coin.position.z);
        let diameter = view.len(coin.radius * 2.0);
        // Spinning edge-on, the coin narrows to a sliver
        let width = ((diameter as f32) * coin.apparent_width()).round().max(1.0) as usize;
        coins.fill_rect(
            (cx - width as i64 / 2).max(0) as usize,
            (cy - diameter as i64 / 2).max(0) as usize,
            width,
            diameter,
        );
    }

    let body = &world.body;
    let (px, py) = view.to_pixel(body.position.x, body.position.z);
    let size = view.len(body.radius * 2.0 + body.position.y * HEIGHT_GROWTH);
    player.fill_rect(
        (px - size as i64 / 2).max(0) as usize,
        (py - size as i64 / 2).max(0) as usize,
        size,
        size,
    );
    let facing = body.facing();
    let tip = body.position + facing * (body.radius + FACING_TICK);
    let (tx, ty) = view.to_pixel(tip.x, tip.z);
    player.draw_line(px, py, tx, ty);

    let layers = [
        (&walls, rgb(display.wall_color)),
        (&platforms, rgb(display.platform_color)),
        (&coins, rgb(display.coin_color)),
        (&player, rgb(display.player_color)),
    ];
    render_layers(frame, &layers, area);
}

/// Merge layered canvases cell by cell. Dots are combined; the color comes
/// from the topmost layer that has any dot in the cell.
fn render_layers(frame: &mut Frame, layers: &[(&BrailleCanvas, Color)], area: Rect) {
    let Some((base, _)) = layers.first() else {
        return;
    };

    let lines: Vec<Line> = (0..base.height())
        .map(|y| {
            let spans: Vec<Span> = (0..base.width())
                .map(|x| {
                    let mut pattern = 0u8;
                    let mut color = Color::White;
                    for (canvas, layer_color) in layers {
                        let cell = canvas.pattern(x, y);
                        if cell != 0 {
                            pattern |= cell;
                            color = *layer_color;
                        }
                    }
                    Span::styled(pattern_char(pattern).to_string(), Style::default().fg(color))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_controls(frame: &mut Frame, hint: &str, area: Rect) {
    let controls = Paragraph::new(hint.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_keeps_aspect_and_flips_z() {
        // 40 cells x 10 cells = 80 x 40 pixels
        let canvas = BrailleCanvas::new(40, 10);
        let view = Viewport::fit(&canvas, 40.0, 10.0);

        // Limited by width: 80 px / 40 units, centred vertically
        assert_eq!(view.scale, 2.0);
        assert_eq!(view.to_pixel(0.0, 10.0), (0, 10));
        assert_eq!(view.to_pixel(40.0, 0.0), (80, 30));
        assert_eq!(view.len(0.1), 1);
    }
}
