use super::*;
use crate::render::raster::SvgRasterizer;
use image::{Rgba, RgbaImage};

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, Rgba(px));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn panel(title: &str, width: f32) -> Panel {
    Panel {
        title: title.to_owned(),
        png: png_bytes(40, 40, [10, 25, 59, 255]),
        width,
    }
}

fn doc() -> CompositeDoc {
    CompositeDoc::build(
        &panel("Kernel", 200.0),
        &panel("Multiplication", 200.0),
        &panel("Image", 400.0),
        &panel("Output", 250.0),
    )
    .unwrap()
}

fn seed_layout(layout: &FrameLayout, frames: usize) {
    let write = |p: &Path| {
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(p, png_bytes(20, 20, [243, 230, 255, 255])).unwrap();
    };
    write(&layout.kernel());
    for k in 1..=frames {
        let set = layout.frame_set(k);
        write(&set.image);
        write(&set.multiplication);
        write(&set.output);
    }
}

struct FailOn(usize, usize);

impl FrameRasterizer for FailOn {
    fn rasterize(&mut self, _svg: &str) -> ChalkResult<image::RgbaImage> {
        self.1 += 1;
        if self.1 == self.0 {
            return Err(ChalkError::render("rasterizer unavailable"));
        }
        Ok(RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255])))
    }
}

#[test]
fn document_embeds_four_titled_panels() {
    let d = doc();
    let svg = d.as_str();
    assert_eq!(svg.matches("<image").count(), 4);
    assert_eq!(svg.matches("data:image/png;base64,").count(), 4);
    for title in ["Kernel", "Multiplication", "Image", "Output"] {
        assert!(svg.contains(&format!(">{title}</text>")), "missing {title}");
    }
}

#[test]
fn canvas_fits_both_columns() {
    // Left column: 200 + 40 + 200 wide, (48 + 200) + 40 + (48 + 400) tall; output column 250 wide.
    assert!(doc().as_str().contains(r#"width="810" height="816""#));
}

#[test]
fn composite_rasterizes_on_white() {
    let img = SvgRasterizer::new().rasterize(doc().as_str()).unwrap();
    assert_eq!(img.dimensions(), (810, 816));
    assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
}

#[test]
fn non_image_panel_is_a_data_error() {
    let mut bad = panel("Kernel", 200.0);
    bad.png = b"not a png".to_vec();
    let err = CompositeDoc::build(
        &bad,
        &panel("Multiplication", 200.0),
        &panel("Image", 400.0),
        &panel("Output", 250.0),
    )
    .unwrap_err();
    assert!(matches!(err, ChalkError::Data(_)));
}

#[test]
fn rasterizer_failure_skips_only_that_frame() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path());
    seed_layout(&layout, 3);

    let report = render_composites(&layout, 3, &mut FailOn(2, 0)).unwrap();
    assert_eq!(report.skipped, vec![2]);
    assert_eq!(report.written, vec![layout.frame(1), layout.frame(3)]);
    assert!(!layout.frame(2).exists());
    assert!(layout.composite(2).is_file());
}

#[test]
fn missing_panel_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let layout = FrameLayout::new(dir.path());
    seed_layout(&layout, 1);

    let mut ok = FailOn(usize::MAX, 0);
    assert!(render_composites(&layout, 2, &mut ok).is_err());
}
