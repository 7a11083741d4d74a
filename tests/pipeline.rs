//! End-to-end conversion through the public API: accept a source, convert it
//! with the real codecs, save it, and read the saved WebP back.
//!
//! Run with: cargo test --test pipeline

use image::{ExtendedColorType, GenericImageView, ImageEncoder, RgbImage};
use std::sync::Arc;
use tempfile::TempDir;
use webpify::convert::Converter;
use webpify::save::{DirectorySink, save_result};
use webpify::session::{PreviewOutcome, Session};
use webpify::stats::ConversionStats;
use webpify::target::{FixedSize, TargetSpec};
use webpify::types::{MediaType, SourceImage};

fn photo_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 90])
    });
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

fn is_near_white(px: image::Rgba<u8>) -> bool {
    px.0[..3].iter().all(|&c| c >= 245)
}

#[tokio::test]
async fn preview_keeps_dimensions_and_reports_stats() {
    let source = SourceImage::accept("photo.jpg", "image/jpeg", photo_jpeg(800, 600)).unwrap();
    let mut session = Session::new();
    session.select(source);

    let ticket = session.begin_preview().unwrap();
    let result = Converter::new().convert_preview(ticket.source()).await;
    assert_eq!(session.finish_preview(ticket, result), PreviewOutcome::Attached);
    assert!(session.can_download());

    let preview = session.preview().unwrap();
    assert_eq!(preview.media_type, MediaType::WebP);
    assert_eq!((preview.width, preview.height), (800, 600));

    let decoded = image::load_from_memory(&preview.bytes).unwrap();
    assert_eq!(decoded.dimensions(), (800, 600));

    let source = session.source().unwrap();
    let stats = ConversionStats::new(&source, &preview);
    assert_eq!(stats.original_bytes, source.byte_len());
    assert_eq!(stats.converted_bytes, preview.bytes.len() as u64);
}

#[tokio::test]
async fn thumbnail_is_letterboxed_and_saved_under_conventional_name() {
    let source = Arc::new(
        SourceImage::accept("holiday.2024.jpg", "image/jpeg", photo_jpeg(800, 600)).unwrap(),
    );
    let thumb = TargetSpec::Fixed(FixedSize::Thumbnail);

    let result = Converter::new()
        .convert_for_size(Arc::clone(&source), thumb)
        .await
        .unwrap();
    assert_eq!((result.width, result.height), (300, 300));

    let tmp = TempDir::new().unwrap();
    let path = save_result(&DirectorySink::new(tmp.path()), &source, &result).unwrap();
    assert_eq!(path, tmp.path().join("holiday_300x300.webp"));

    let saved = image::open(&path).unwrap();
    assert_eq!(saved.dimensions(), (300, 300));
    // 4:3 into a square: white bands above and below, picture in the middle
    assert!(is_near_white(saved.get_pixel(0, 0)));
    assert!(is_near_white(saved.get_pixel(299, 299)));
    assert!(is_near_white(saved.get_pixel(150, 10)));
    assert!(!is_near_white(saved.get_pixel(150, 150)));
}

#[tokio::test]
async fn every_menu_size_has_exact_canvas() {
    let source = Arc::new(
        SourceImage::accept("tall.jpg", "image/jpeg", photo_jpeg(120, 400)).unwrap(),
    );
    let converter = Converter::new();

    for target in TargetSpec::all() {
        let result = converter
            .convert_for_size(Arc::clone(&source), target)
            .await
            .unwrap();
        let expected = target.canvas_size((120, 400));
        assert_eq!((result.width, result.height), expected, "{target}");
        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!(decoded.dimensions(), expected, "{target}");
    }
}

#[tokio::test]
async fn downloads_for_replaced_selection_are_dropped() {
    let mut session = Session::new();
    let first = session.select(
        SourceImage::accept("a.jpg", "image/jpeg", photo_jpeg(64, 64)).unwrap(),
    );
    let source = session.source().unwrap();
    let converter = Converter::new();
    let pending = converter.convert_for_size(source, TargetSpec::Fixed(FixedSize::Icon));

    session.select(SourceImage::accept("b.jpg", "image/jpeg", photo_jpeg(64, 64)).unwrap());
    let result = pending.await.unwrap();
    assert!(session.accept_download(first, result).is_none());
}

#[test]
fn rejected_inputs_never_become_sources() {
    assert!(SourceImage::accept("a.gif", "image/gif", vec![0; 10]).is_err());
    let oversized = vec![0; 10 * 1024 * 1024 + 1];
    assert!(SourceImage::accept("big.jpg", "image/jpeg", oversized).is_err());
}
