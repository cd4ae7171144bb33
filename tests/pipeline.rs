use image::{Rgba, RgbaImage};
use pixel_cipher::image_io::{encode_png, read_image_file, write_image_file, ImageSource, PngCodec};
use pixel_cipher::{DecodeOutcome, DecodeRequest, EncodeRequest, Pipeline, PixelBuffer, StegoError};

const LIMIT: u64 = 16 * 1024 * 1024;

/// Stand-in for a photograph: smooth gradients, semi-transparent alpha.
fn photo(width: u32, height: u32) -> PixelBuffer {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            ((x * 17) % 256) as u8,
            ((y * 23) % 256) as u8,
            (((x + y) * 31) % 256) as u8,
            (128 + (x + y) % 100) as u8,
        ])
    });
    PixelBuffer::new(width, height, img.into_raw()).unwrap()
}

fn photo_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(photo(width, height)).unwrap()
}

fn encode_request(image: Vec<u8>, message: &str, password: &str) -> EncodeRequest {
    EncodeRequest {
        image: Some(image),
        message: Some(message.to_string()),
        password: Some(password.to_string()),
    }
}

fn decode_request(image: Vec<u8>, password: &str) -> DecodeRequest {
    DecodeRequest {
        image: Some(image),
        password: Some(password.to_string()),
    }
}

#[tokio::test]
async fn test_hello_scenario() {
    let pipeline = Pipeline::png(LIMIT);

    let carrier = pipeline
        .encode(encode_request(photo_png(100, 100), "HELLO", "test123"))
        .await
        .unwrap();

    let outcome = pipeline
        .decode(decode_request(carrier.clone(), "test123"))
        .await
        .unwrap();
    assert_eq!(outcome, DecodeOutcome::Success("HELLO".to_string()));

    let outcome = pipeline
        .decode(decode_request(carrier, "wrong"))
        .await
        .unwrap();
    assert_eq!(outcome, DecodeOutcome::AuthFailure);
}

#[tokio::test]
async fn test_plain_photo_is_not_found() {
    // Odd channel values everywhere, so the length prefix reads as 0xFFFFFFFF.
    let img = RgbaImage::from_fn(100, 100, |x, y| {
        Rgba([
            ((x * 17) % 256) as u8 | 1,
            ((y * 23) % 256) as u8 | 1,
            (((x + y) * 31) % 256) as u8 | 1,
            255,
        ])
    });
    let png = encode_png(PixelBuffer::new(100, 100, img.into_raw()).unwrap()).unwrap();

    let outcome = Pipeline::png(LIMIT)
        .decode(decode_request(png, "test123"))
        .await
        .unwrap();
    assert_eq!(outcome, DecodeOutcome::NotFound);
}

#[tokio::test]
async fn test_even_photo_is_not_found() {
    // Even channel values everywhere, so the length prefix reads as 0.
    let img = RgbaImage::from_fn(100, 100, |x, y| {
        Rgba([
            ((x * 17) % 256) as u8 & !1,
            ((y * 23) % 256) as u8 & !1,
            (((x + y) * 31) % 256) as u8 & !1,
            255,
        ])
    });
    let png = encode_png(PixelBuffer::new(100, 100, img.into_raw()).unwrap()).unwrap();
    let pipeline = Pipeline::png(LIMIT);

    let outcome = pipeline
        .decode(decode_request(png.clone(), "test123"))
        .await
        .unwrap();
    assert_eq!(outcome, DecodeOutcome::NotFound);

    // Same outcome on a second run; extraction failures hold no state.
    let outcome = pipeline.decode(decode_request(png, "other")).await.unwrap();
    assert_eq!(outcome, DecodeOutcome::NotFound);
}

#[tokio::test]
async fn test_multi_kilobyte_unicode_roundtrip() {
    let pipeline = Pipeline::png(LIMIT);
    let message: String = "秘密のメッセージ, hidden text 🔐\n".repeat(100);
    assert!(message.len() > 4096);

    let carrier = pipeline
        .encode(encode_request(photo_png(160, 120), &message, "correct horse"))
        .await
        .unwrap();

    let outcome = pipeline
        .decode(decode_request(carrier, "correct horse"))
        .await
        .unwrap();
    assert_eq!(outcome, DecodeOutcome::Success(message));
}

#[tokio::test]
async fn test_alpha_and_high_bits_preserved() {
    let pipeline = Pipeline::png(LIMIT);
    let original = photo(64, 64);

    let carrier = pipeline
        .encode(encode_request(
            encode_png(original.clone()).unwrap(),
            "keep alpha intact",
            "pw",
        ))
        .await
        .unwrap();
    let embedded = PngCodec::new(LIMIT).load(carrier).await.unwrap();

    assert_eq!(embedded.width(), 64);
    assert_eq!(embedded.height(), 64);
    for (before, after) in original
        .as_bytes()
        .chunks_exact(4)
        .zip(embedded.as_bytes().chunks_exact(4))
    {
        assert_eq!(before[3], after[3]);
        for channel in 0..3 {
            assert_eq!(before[channel] & 0xFE, after[channel] & 0xFE);
        }
    }
}

#[tokio::test]
async fn test_capacity_exceeded_reports_budget() {
    // 10×10 = 300 bits; "HELLO" frames to 53 bytes = 424 bits.
    let result = Pipeline::png(LIMIT)
        .encode(encode_request(photo_png(10, 10), "HELLO", "test123"))
        .await;

    assert!(matches!(
        result,
        Err(StegoError::CapacityExceeded {
            required_bits: 424,
            available_bits: 300
        })
    ));
}

#[tokio::test]
async fn test_decode_is_idempotent() {
    let pipeline = Pipeline::png(LIMIT);
    let carrier = pipeline
        .encode(encode_request(photo_png(50, 50), "again", "pw"))
        .await
        .unwrap();

    let first = pipeline
        .decode(decode_request(carrier.clone(), "pw"))
        .await
        .unwrap();
    let second = pipeline.decode(decode_request(carrier, "pw")).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_fields_are_validation_errors() {
    let pipeline = Pipeline::png(LIMIT);

    let no_password = EncodeRequest {
        password: Some(String::new()),
        ..encode_request(photo_png(10, 10), "msg", "")
    };
    assert!(matches!(
        pipeline.encode(no_password).await,
        Err(StegoError::Validation(_))
    ));

    let no_image = EncodeRequest {
        image: None,
        ..encode_request(Vec::new(), "msg", "pw")
    };
    assert!(matches!(
        pipeline.encode(no_image).await,
        Err(StegoError::Validation(_))
    ));

    let no_password = DecodeRequest {
        image: Some(photo_png(10, 10)),
        password: None,
    };
    assert!(matches!(
        pipeline.decode(no_password).await,
        Err(StegoError::Validation(_))
    ));
}

#[tokio::test]
async fn test_undecodable_image_is_unexpected() {
    let result = Pipeline::png(LIMIT)
        .decode(decode_request(b"definitely not a png".to_vec(), "pw"))
        .await;

    assert!(matches!(result, Err(StegoError::Unexpected(_))));
}

#[tokio::test]
async fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let cover_path = dir.path().join("cover.png");
    let carrier_path = dir.path().join("secret.png");

    write_image_file(&cover_path, &photo_png(80, 60)).await.unwrap();

    let pipeline = Pipeline::png(LIMIT);
    let cover = read_image_file(&cover_path).await.unwrap();
    let carrier = pipeline
        .encode(encode_request(cover, "on disk", "pw"))
        .await
        .unwrap();
    write_image_file(&carrier_path, &carrier).await.unwrap();

    let reloaded = read_image_file(&carrier_path).await.unwrap();
    let outcome = pipeline.decode(decode_request(reloaded, "pw")).await.unwrap();
    assert_eq!(outcome, DecodeOutcome::Success("on disk".to_string()));
}

#[tokio::test]
async fn test_missing_file_is_unexpected() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_image_file(dir.path().join("nope.png")).await;

    assert!(matches!(result, Err(StegoError::Unexpected(_))));
}
