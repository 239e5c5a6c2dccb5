//! Reading and writing of images
//!
//! Surfaces are stored pre-multiplied; they are converted to straight alpha
//!   before writing. PPM files carry no alpha and are written as RGB
//!
//! See <https://en.wikipedia.org/wiki/Netpbm_format#PPM_example>
//!
use crate::buffer::{RenderingBuffer, BPP};
use crate::color::Rgba8;
use crate::Result;

use image::ImageEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Straight alpha RGBA bytes of a surface
pub fn to_rgba(buf: &RenderingBuffer) -> Vec<u8> {
    buf.as_bytes()
        .chunks_exact(BPP)
        .flat_map(|p| {
            let c = Rgba8::new(p[0], p[1], p[2], p[3]).demultiply();
            vec![c.r, c.g, c.b, c.a]
        })
        .collect()
}

/// RGB bytes of a surface, dropping alpha
pub fn to_rgb(buf: &RenderingBuffer) -> Vec<u8> {
    buf.as_bytes()
        .chunks_exact(BPP)
        .flat_map(|p| {
            let c = Rgba8::new(p[0], p[1], p[2], p[3]).demultiply();
            vec![c.r, c.g, c.b]
        })
        .collect()
}

/// Write a surface as a PNG with alpha
pub fn write_png<P: AsRef<Path>>(buf: &RenderingBuffer, filename: P) -> Result<()> {
    image::save_buffer_with_format(filename, &to_rgba(buf),
                                   buf.width as u32, buf.height as u32,
                                   image::ColorType::Rgba8,
                                   image::ImageFormat::Png)?;
    Ok(())
}

/// Write a surface as a binary PPM
pub fn write_ppm<P: AsRef<Path>>(buf: &RenderingBuffer, filename: P) -> Result<()> {
    let file = BufWriter::new(File::create(filename)?);
    PnmEncoder::new(file)
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
        .write_image(&to_rgb(buf), buf.width as u32, buf.height as u32,
                     image::ColorType::Rgb8)?;
    Ok(())
}

/// Read an image as RGB bytes with its width and height
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>,usize,usize)> {
    let img = image::open(filename)?.to_rgb8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w as usize, h as usize))
}

/// Compare two image files pixel by pixel
///
/// Returns false when sizes or any RGB value differ
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool> {
    let (d1,w1,h1) = read_file(f1)?;
    let (d2,w2,h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        log::debug!("image sizes differ: {}x{} {}x{}", w1, h1, w2, h2);
        return Ok(false);
    }
    let mut flag = true;
    for (i,(v1,v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            log::debug!("{} [{},{},{}]: {} {}", i, (i/3)%w1,(i/3)/w1,i%3, v1,v2);
            flag = false;
        }
    }
    Ok(flag)
}
