//! Raster rendering of a schedule as a daily timeline image.
//!
//! The canvas is fixed at 900x600. A supplied background (any decodable
//! format) is scaled to fill; otherwise the canvas starts white. Blocks are
//! mapped linearly from their time range onto a rounded timeline panel with
//! hour gridlines, and the result is PNG-encoded for embedding as a data
//! URL.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::models::ScheduleBlock;

pub const CANVAS_WIDTH: u32 = 900;
pub const CANVAS_HEIGHT: u32 = 600;

const PANEL_LEFT: i32 = 40;
const PANEL_TOP: i32 = 80;
const PANEL_RIGHT: i32 = CANVAS_WIDTH as i32 - 40;
const PANEL_BOTTOM: i32 = CANVAS_HEIGHT as i32 - 40;

/// Very short blocks are stretched to stay legible.
const MIN_BLOCK_HEIGHT: i32 = 28;

/// Time range painted when the schedule is empty.
const DEFAULT_RANGE_START: i32 = 9 * 60;
const DEFAULT_RANGE_END: i32 = 17 * 60;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GRIDLINE: Rgb<u8> = Rgb([221, 221, 221]);
const BLOCK_FILL: Rgb<u8> = Rgb([247, 247, 247]);

const TITLE: &str = "OMNI — AI Daily Schedule";

/// Paint `schedule` over an optional background and PNG-encode the result.
pub fn render_schedule(
    schedule: &[ScheduleBlock],
    background: Option<&[u8]>,
) -> Result<Vec<u8>, image::ImageError> {
    let mut canvas = background
        .and_then(|bytes| image::load_from_memory(bytes).ok())
        .map(|img| {
            image::imageops::resize(
                &img.to_rgb8(),
                CANVAS_WIDTH,
                CANVAS_HEIGHT,
                FilterType::Triangle,
            )
        })
        .unwrap_or_else(|| RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, WHITE));

    draw_text(&mut canvas, 30, 20, TITLE, BLACK, 3);
    stroke_rounded_rect(
        &mut canvas,
        PANEL_LEFT,
        PANEL_TOP,
        PANEL_RIGHT,
        PANEL_BOTTOM,
        18,
        BLACK,
        2,
    );

    let range_start = schedule
        .iter()
        .map(|b| i32::from(b.start.minutes()))
        .min()
        .unwrap_or(DEFAULT_RANGE_START);
    let range_end = schedule
        .iter()
        .map(|b| i32::from(b.end.minutes()))
        .max()
        .unwrap_or(DEFAULT_RANGE_END);
    let total = (range_end - range_start).max(1);
    let map_y = |t: i32| {
        let fraction = f64::from(t - range_start) / f64::from(total);
        PANEL_TOP + (fraction * f64::from(PANEL_BOTTOM - PANEL_TOP)) as i32
    };

    // Hour gridlines, stepping from the range start.
    let mut tick = range_start;
    while tick <= range_end {
        let y = map_y(tick);
        draw_hline(&mut canvas, PANEL_LEFT, PANEL_RIGHT, y, GRIDLINE);
        draw_text(
            &mut canvas,
            PANEL_LEFT + 10,
            y - 4,
            &format!("{:02}:00", tick / 60),
            BLACK,
            1,
        );
        tick += 60;
    }

    let block_left = PANEL_LEFT + 120;
    let block_right = PANEL_RIGHT - 20;
    for block in schedule {
        let y1 = map_y(i32::from(block.start.minutes()));
        let y2 = map_y(i32::from(block.end.minutes())).max(y1 + MIN_BLOCK_HEIGHT);

        fill_rounded_rect(&mut canvas, block_left, y1 + 2, block_right, y2 - 2, 14, BLOCK_FILL);
        stroke_rounded_rect(&mut canvas, block_left, y1 + 2, block_right, y2 - 2, 14, BLACK, 2);

        let caption = format!("{}–{}  {}", block.start.format(), block.end.format(), block.label);
        draw_text(&mut canvas, block_left + 14, y1 + 8, &caption, BLACK, 2);
    }

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(canvas).write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Wrap PNG bytes as an embeddable `data:` URL.
pub fn to_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

// ---------------------------------------------------------------------------
// Drawing primitives
// ---------------------------------------------------------------------------

fn put_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_hline(img: &mut RgbImage, x0: i32, x1: i32, y: i32, color: Rgb<u8>) {
    for x in x0..=x1 {
        put_pixel(img, x, y, color);
    }
}

/// Point membership in an axis-aligned rounded rectangle.
fn in_rounded_rect(x: i32, y: i32, x0: i32, y0: i32, x1: i32, y1: i32, radius: i32) -> bool {
    if x < x0 || x > x1 || y < y0 || y > y1 {
        return false;
    }
    let radius = radius.min((x1 - x0) / 2).min((y1 - y0) / 2).max(0);
    let dx = if x < x0 + radius {
        x0 + radius - x
    } else if x > x1 - radius {
        x - (x1 - radius)
    } else {
        0
    };
    let dy = if y < y0 + radius {
        y0 + radius - y
    } else if y > y1 - radius {
        y - (y1 - radius)
    } else {
        0
    };
    if dx == 0 || dy == 0 {
        return true;
    }
    dx * dx + dy * dy <= radius * radius
}

fn fill_rounded_rect(
    img: &mut RgbImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
    color: Rgb<u8>,
) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            if in_rounded_rect(x, y, x0, y0, x1, y1, radius) {
                put_pixel(img, x, y, color);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn stroke_rounded_rect(
    img: &mut RgbImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
    color: Rgb<u8>,
    width: i32,
) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            let on_border = in_rounded_rect(x, y, x0, y0, x1, y1, radius)
                && !in_rounded_rect(
                    x,
                    y,
                    x0 + width,
                    y0 + width,
                    x1 - width,
                    y1 - width,
                    radius - width,
                );
            if on_border {
                put_pixel(img, x, y, color);
            }
        }
    }
}

/// 8x8 bitmap text, integer-scaled. Dashes outside the basic glyph range
/// are normalized to `-`; anything else unknown renders as `?`.
fn draw_text(img: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>, scale: u32) {
    let scale = scale.max(1) as i32;
    let mut cursor_x = x;
    for ch in text.chars() {
        let ch = match ch {
            '–' | '—' => '-',
            _ => ch,
        };
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += 8 * scale;
            continue;
        };
        for (row_idx, row) in glyph.iter().enumerate() {
            let row_bits = *row;
            for col in 0..8i32 {
                if (row_bits >> col) & 1 == 1 {
                    for sy in 0..scale {
                        for sx in 0..scale {
                            put_pixel(
                                img,
                                cursor_x + col * scale + sx,
                                y + row_idx as i32 * scale + sy,
                                color,
                            );
                        }
                    }
                }
            }
        }
        cursor_x += 8 * scale;
    }
}
