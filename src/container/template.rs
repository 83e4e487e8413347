use image::{Rgba, RgbaImage};

use crate::{
    foundation::core::{Rgb24, TRANSPARENT},
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::{Frame, FrameSeq},
    ops::composite::{CompositeOpts, composite},
    ops::transform::resize,
};

/// Axis-aligned rectangle in template pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A region plus uniform inner padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContainerBox {
    pub region: Region,
    #[serde(default)]
    pub padding: u32,
}

impl ContainerBox {
    /// The region shrunk by `padding` on every side.
    pub fn content(&self) -> FramecraftResult<Region> {
        let double = self.padding.saturating_mul(2);
        if double >= self.region.width || double >= self.region.height {
            return Err(FramecraftError::invalid_argument(format!(
                "padding {} leaves no room in a {}x{} container",
                self.padding, self.region.width, self.region.height
            )));
        }
        let pad = i32::try_from(self.padding)
            .map_err(|_| FramecraftError::invalid_argument("container padding overflows"))?;
        Ok(Region {
            x: self.region.x.saturating_add(pad),
            y: self.region.y.saturating_add(pad),
            width: self.region.width - double,
            height: self.region.height - double,
        })
    }
}

/// Where a template puts its image and text content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerLayout {
    /// Image and text share one padded container.
    Shared { container: ContainerBox },
    /// Image and text have independent containers.
    Split {
        image: ContainerBox,
        text: ContainerBox,
    },
}

impl ContainerLayout {
    pub fn image_content(&self) -> FramecraftResult<Region> {
        match self {
            Self::Shared { container } => container.content(),
            Self::Split { image, .. } => image.content(),
        }
    }

    pub fn text_content(&self) -> FramecraftResult<Region> {
        match self {
            Self::Shared { container } => container.content(),
            Self::Split { text, .. } => text.content(),
        }
    }
}

/// A template image with a slot that user media is fitted into.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContainerTemplate {
    pub name: String,
    pub layout: ContainerLayout,
    /// Template drawn under the content when `true`, over it otherwise.
    #[serde(default)]
    pub is_background: bool,
    /// Canvas fill under everything; transparent when `None`.
    #[serde(default)]
    pub fill: Option<Rgb24>,
}

impl ContainerTemplate {
    pub fn validate(&self) -> FramecraftResult<()> {
        if self.name.trim().is_empty() {
            return Err(FramecraftError::config("container template name is empty"));
        }
        self.layout
            .image_content()
            .and_then(|_| self.layout.text_content())
            .map(|_| ())
            .map_err(|e| FramecraftError::config(format!("template '{}': {e}", self.name)))
    }
}

/// Fit `content` into `template`'s image slot, keeping aspect ratio and centring it.
#[tracing::instrument(skip(template_frames, content), fields(template = %template.name))]
pub fn fill_container(
    template_frames: FrameSeq,
    content: FrameSeq,
    template: &ContainerTemplate,
) -> FramecraftResult<FrameSeq> {
    let slot = template.layout.image_content()?;
    let (fit_w, fit_h) = fit_into(content.dimensions(), slot.width, slot.height);
    let content = FrameSeq::new(
        content
            .into_frames()
            .into_iter()
            .map(|f| -> FramecraftResult<Frame> {
                Ok(Frame::new(resize(&f.image, fit_w, fit_h, false)?, f.duration_ms))
            })
            .collect::<FramecraftResult<Vec<_>>>()?,
    )?;
    let x = slot.x + ((slot.width - fit_w) / 2) as i32;
    let y = slot.y + ((slot.height - fit_h) / 2) as i32;
    let fill: Option<Rgba<u8>> = template.fill.map(Rgb24::to_rgba);

    if template.is_background {
        let opts = CompositeOpts {
            x,
            y,
            expand: false,
            expand_color: fill,
        };
        return composite(template_frames, content, &opts);
    }

    let (w, h) = template_frames.dimensions();
    let canvas = FrameSeq::single(Frame::new(
        RgbaImage::from_pixel(w, h, fill.unwrap_or(TRANSPARENT)),
        0,
    ));
    let placed = composite(
        canvas,
        content,
        &CompositeOpts {
            x,
            y,
            ..CompositeOpts::default()
        },
    )?;
    composite(placed, template_frames, &CompositeOpts::default())
}

/// Scale `(w, h)` up or down to the largest size that fits `max_w` x `max_h`.
fn fit_into((w, h): (u32, u32), max_w: u32, max_h: u32) -> (u32, u32) {
    let scale = f64::min(
        f64::from(max_w) / f64::from(w.max(1)),
        f64::from(max_h) / f64::from(h.max(1)),
    );
    let fw = ((f64::from(w) * scale).round() as u32).clamp(1, max_w);
    let fh = ((f64::from(h) * scale).round() as u32).clamp(1, max_h);
    (fw, fh)
}

#[cfg(test)]
#[path = "../../tests/unit/container/template.rs"]
mod tests;
