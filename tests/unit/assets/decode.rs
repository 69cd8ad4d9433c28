use super::*;

use image::{Rgba, RgbaImage};

fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

#[test]
fn png_data_uri_round_trips_through_decode_source() {
    let img = checker(4, 4);
    let uri = png_data_uri(&img).unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));

    let back = decode_source(SourceKind::QrImage, &ImageSource::DataUri(uri)).unwrap();
    assert_eq!(back, img);
}

#[test]
fn decode_image_reads_encoded_bytes() {
    let img = checker(6, 3);
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    assert_eq!(decode_image(&bytes).unwrap(), img);
    assert!(decode_image(&[0u8; 16]).is_err());
}

#[test]
fn from_user_str_distinguishes_uris_from_paths() {
    assert!(matches!(
        ImageSource::from_user_str("data:image/png;base64,AAAA"),
        ImageSource::DataUri(_)
    ));
    assert!(matches!(
        ImageSource::from_user_str("photos/cat.png"),
        ImageSource::Path(_)
    ));
}

#[test]
fn missing_file_reports_the_source_kind() {
    let source = ImageSource::Path("definitely/not/here.png".into());
    let err = decode_source(SourceKind::Logo, &source).unwrap_err();
    match err {
        QrForgeError::SourceDecode { kind, .. } => assert_eq!(kind, SourceKind::Logo),
        other => panic!("expected SourceDecode, got {other:?}"),
    }
}

#[test]
fn garbage_bytes_report_the_source_kind() {
    let source = ImageSource::Bytes(vec![0, 1, 2, 3]);
    let err = decode_source(SourceKind::UserPhoto, &source).unwrap_err();
    assert!(matches!(
        err,
        QrForgeError::SourceDecode {
            kind: SourceKind::UserPhoto,
            ..
        }
    ));
}

#[test]
fn non_base64_data_uris_are_rejected() {
    let source = ImageSource::DataUri("data:text/plain,hello".to_owned());
    assert!(decode_source(SourceKind::UserPhoto, &source).is_err());

    assert!(data_uri_bytes("http://not-a-data-uri").is_err());
}

#[test]
fn decode_pair_returns_both_images_in_order() {
    let qr = checker(4, 4);
    let photo = checker(8, 8);
    let qr_uri = ImageSource::DataUri(png_data_uri(&qr).unwrap());
    let photo_uri = ImageSource::DataUri(png_data_uri(&photo).unwrap());

    let (a, b) = decode_pair(
        (SourceKind::QrImage, &qr_uri),
        (SourceKind::UserPhoto, &photo_uri),
    )
    .unwrap();
    assert_eq!(a.dimensions(), (4, 4));
    assert_eq!(b.dimensions(), (8, 8));
}

#[test]
fn decode_pair_rejects_as_soon_as_either_source_fails() {
    let good = ImageSource::DataUri(png_data_uri(&checker(4, 4)).unwrap());
    let bad = ImageSource::Bytes(vec![9, 9, 9]);

    // Failing first source: error is attributed to it.
    let err = decode_pair((SourceKind::QrImage, &bad), (SourceKind::UserPhoto, &good)).unwrap_err();
    assert!(matches!(
        err,
        QrForgeError::SourceDecode {
            kind: SourceKind::QrImage,
            ..
        }
    ));

    // Failing second source: same, with the other attribution.
    let err = decode_pair((SourceKind::QrImage, &good), (SourceKind::UserPhoto, &bad)).unwrap_err();
    assert!(matches!(
        err,
        QrForgeError::SourceDecode {
            kind: SourceKind::UserPhoto,
            ..
        }
    ));
}

#[test]
fn resize_to_fit_contains_without_upscaling() {
    let wide = checker(100, 50);
    let fitted = resize_to_fit(&wide, 50, 50);
    assert_eq!(fitted.dimensions(), (50, 25));

    let small = checker(10, 10);
    assert_eq!(resize_to_fit(&small, 100, 100).dimensions(), (10, 10));

    let tall = checker(40, 80);
    assert_eq!(resize_to_fit(&tall, 60, 20).dimensions(), (10, 20));
}
