use crate::{color::ColorSource, common::*};
use ab_glyph::{Font, PxScale};
use image::{Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut},
    rect::Rect,
};
use rect::{clamp, PixelSize, PixelTLBR, RatioTLBR};

/// Box outline thickness in pixels.
const OUTLINE_THICKNESS: i32 = 5;
/// Label text color.
const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
/// Horizontal inset of the label text from the strip's left edge.
const TEXT_MARGIN: i64 = 5;

/// One row of the resolution tier table, ordered by `max_height`.
#[derive(Debug)]
struct SizeTier {
    max_height: u32,
    font_height: f32,
    strip_height: i64,
}

const TIERS: [SizeTier; 3] = [
    SizeTier {
        max_height: 1000,
        font_height: 16.0,
        strip_height: 20,
    },
    SizeTier {
        max_height: 2000,
        font_height: 56.0,
        strip_height: 70,
    },
    SizeTier {
        max_height: u32::MAX,
        font_height: 120.0,
        strip_height: 150,
    },
];

fn tier_for(image_height: u32) -> &'static SizeTier {
    TIERS
        .iter()
        .find(|tier| image_height < tier.max_height)
        .unwrap_or(&TIERS[2])
}

/// Places the label strip directly above the box; below the box when it
/// would cross the image top; flush with the box bottom when that would
/// cross the image bottom.
fn strip_span(bbox: &PixelTLBR<i64>, strip_height: i64, image_height: i64) -> (i64, i64) {
    let mut top = bbox.t() - strip_height;
    let mut bottom = bbox.t();
    if top < 0 {
        top = bbox.b();
        bottom = bbox.b() + strip_height;
    }
    if bottom > image_height {
        top = bbox.b() - strip_height;
        bottom = bbox.b();
    }
    (top, bottom)
}

fn to_i32(bbox: &PixelTLBR<i64>) -> Result<PixelTLBR<i32>> {
    bbox.clone()
        .try_cast()
        .ok_or_else(|| format_err!("box {:?} does not fit drawing coordinates", bbox))
}

/// Draws a box outline without any label.
pub fn draw_box(image: &mut RgbImage, bbox: &PixelTLBR<i64>, color: Rgb<u8>) -> Result<()> {
    let bbox = to_i32(bbox)?;

    for inset in 0..OUTLINE_THICKNESS {
        let width = bbox.w() + 2 * inset;
        let height = bbox.h() + 2 * inset;
        if width == 0 || height == 0 {
            continue;
        }
        let ring = Rect::at(bbox.l() - inset, bbox.t() - inset).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(image, ring, color);
    }
    Ok(())
}

/// Converts a fractional box back to integer pixel coordinates on `image`,
/// clamped to the image bounds.
pub fn denormalize(bbox: &RatioTLBR<f64>, image: &RgbImage) -> Result<PixelTLBR<i64>> {
    ensure!(
        bbox.tlbr().iter().all(|coord| coord.is_finite()),
        "box coordinates must be finite, got {:?}",
        bbox
    );
    let size = PixelSize::from_hw(f64::from(image.height()), f64::from(image.width()));
    bbox.to_pixel_tlbr(&size)
        .try_cast()
        .ok_or_else(|| format_err!("box {:?} does not fit pixel coordinates", bbox))
}

/// Draws labeled boxes with an injected font and color source.
#[derive(Debug)]
pub struct BoxPainter<F, C> {
    font: F,
    colors: C,
}

impl<F, C> BoxPainter<F, C>
where
    F: Font,
    C: ColorSource,
{
    pub fn new(font: F, colors: C) -> Self {
        Self { font, colors }
    }

    /// Draws the box outline and, when `label` is given, a filled strip
    /// with the label text. `color` falls back to the color source.
    pub fn draw(
        &mut self,
        image: &mut RgbImage,
        bbox: &PixelTLBR<i64>,
        label: Option<&str>,
        color: Option<Rgb<u8>>,
    ) -> Result<()> {
        let color = color.unwrap_or_else(|| self.colors.next_color());
        draw_box(image, bbox, color)?;

        let label = match label {
            Some(label) => label,
            None => return Ok(()),
        };
        let corners = to_i32(bbox)?;

        let tier = tier_for(image.height());
        let image_height = i64::from(image.height());
        if tier.strip_height > image_height {
            warn!(
                "label strip of height {} exceeds image height {}, clipping",
                tier.strip_height, image_height
            );
        }

        let (strip_top, strip_bottom) = strip_span(bbox, tier.strip_height, image_height);
        if corners.w() > 0 {
            let strip = Rect::at(corners.l(), strip_top as i32)
                .of_size(corners.w() as u32, tier.strip_height as u32);
            draw_filled_rect_mut(image, strip, color);
        }

        let text_top = clamp(
            strip_bottom - tier.font_height as i64 - 2,
            strip_top,
            strip_bottom,
        );
        draw_text_mut(
            image,
            TEXT_COLOR,
            corners.l() + TEXT_MARGIN as i32,
            text_top as i32,
            PxScale::from(tier.font_height),
            &self.font,
            label,
        );
        Ok(())
    }
}
