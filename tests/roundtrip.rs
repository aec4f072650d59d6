use enough::Unstoppable;
use zenindexed::checksum::{Adler32, crc32};
use zenindexed::*;

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

struct Chunk<'a> {
    kind: [u8; 4],
    payload: &'a [u8],
    crc: u32,
}

fn split_chunks(png: &[u8]) -> Vec<Chunk<'_>> {
    assert_eq!(&png[..8], &PNG_SIGNATURE);
    let mut pos = 8;
    let mut chunks = Vec::new();
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let payload = &png[pos + 8..pos + 8 + len];
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        chunks.push(Chunk { kind, payload, crc });
        pos += 12 + len;
    }
    assert_eq!(pos, png.len());
    chunks
}

fn decode_with_png_crate(data: &[u8]) -> (png::OutputInfo, Vec<u8>, Vec<u8>) {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().unwrap();
    let palette = reader.info().palette.as_ref().unwrap().to_vec();
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    (info, palette, buf)
}

fn bgra_palette(colors: usize) -> Vec<u8> {
    (0..colors)
        .flat_map(|i| {
            let i = i as u8;
            [i, i.wrapping_mul(3), i.wrapping_mul(7), 0x80]
        })
        .collect()
}

#[test]
fn two_by_one_scenario() {
    let palette = [0, 0, 255, 255, 0, 255, 0, 255];
    let png = encode_indexed_png(2, 1, &palette, 2, &[0, 1], Unstoppable).unwrap();

    let chunks = split_chunks(&png);
    let kinds: Vec<&[u8; 4]> = chunks.iter().map(|c| &c.kind).collect();
    assert_eq!(kinds, [b"IHDR", b"PLTE", b"IDAT", b"IEND"]);

    assert_eq!(chunks[1].payload, &[255, 0, 0, 0, 255, 0]);

    let idat = chunks[2].payload;
    assert_eq!(&idat[..2], &[0x78, 0x01]);
    assert_eq!(idat[2], 1, "single block must be final");
    assert_eq!(u16::from_le_bytes([idat[3], idat[4]]), 3);
    assert_eq!(u16::from_le_bytes([idat[5], idat[6]]), !3u16);
    assert_eq!(&idat[7..10], &[0, 0, 1]);
    assert_eq!(idat.len(), 2 + 5 + 3 + 4);
}

#[test]
fn ihdr_fields_roundtrip() {
    let (w, h) = (7u32, 3u32);
    let indexes = vec![0u8; (w * h) as usize];
    let png = encode_indexed_png(w, h, &bgra_palette(1), 1, &indexes, Unstoppable).unwrap();

    let chunks = split_chunks(&png);
    let ihdr = chunks[0].payload;
    assert_eq!(ihdr.len(), 13);
    assert_eq!(u32::from_be_bytes(ihdr[0..4].try_into().unwrap()), w);
    assert_eq!(u32::from_be_bytes(ihdr[4..8].try_into().unwrap()), h);
    assert_eq!(&ihdr[8..], &[8, 3, 0, 0, 0]);
}

#[test]
fn every_chunk_crc_matches() {
    let indexes: Vec<u8> = (0..40 * 9).map(|i| (i % 16) as u8).collect();
    let png = encode_indexed_png(40, 9, &bgra_palette(16), 16, &indexes, Unstoppable).unwrap();
    for chunk in split_chunks(&png) {
        let mut covered = chunk.kind.to_vec();
        covered.extend_from_slice(chunk.payload);
        assert_eq!(crc32(&covered), chunk.crc);
    }
}

#[test]
fn png_crate_decodes_indices_and_palette() {
    let (w, h) = (13u32, 11u32);
    let indexes: Vec<u8> = (0..w * h).map(|i| (i * 31 % 200) as u8).collect();
    let palette = bgra_palette(200);
    let png = encode_indexed_png(w, h, &palette, 200, &indexes, Unstoppable).unwrap();

    let (info, plte, pixels) = decode_with_png_crate(&png);
    assert_eq!(info.width, w);
    assert_eq!(info.height, h);
    assert_eq!(info.color_type, png::ColorType::Indexed);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    assert_eq!(pixels, indexes);

    assert_eq!(plte.len(), 200 * 3);
    for (rgb, bgra) in plte.chunks_exact(3).zip(palette.chunks_exact(4)) {
        assert_eq!(rgb, [bgra[2], bgra[1], bgra[0]]);
    }
}

#[test]
fn idat_inflates_to_filtered_scanlines() {
    let (w, h) = (9usize, 5usize);
    let indexes: Vec<u8> = (0..w * h).map(|i| (i * 13) as u8).collect();
    let png = encode_indexed_png(w as u32, h as u32, &bgra_palette(256), 256, &indexes, Unstoppable)
        .unwrap();
    let chunks = split_chunks(&png);
    let idat = chunks[2].payload;

    let raw = miniz_oxide::inflate::decompress_to_vec_zlib(idat).unwrap();
    assert_eq!(raw.len(), h * (w + 1));
    for (y, line) in raw.chunks_exact(w + 1).enumerate() {
        assert_eq!(line[0], 0, "filter type none");
        assert_eq!(&line[1..], &indexes[y * w..(y + 1) * w]);
    }

    let mut adler = Adler32::new();
    adler.update(&raw);
    let (a, b) = adler.sums();
    let trailer = &idat[idat.len() - 4..];
    assert_eq!(&trailer[..2], &b.to_be_bytes());
    assert_eq!(&trailer[2..], &a.to_be_bytes());
}

#[test]
fn hi_attribute_png_and_attribute_map() {
    // 16x8 image, 8x8 tiles, 4 colors per sub-palette
    let (w, h) = (16u32, 8u32);
    let mut indexes = vec![0u8; (w * h) as usize];
    for y in 0..h as usize {
        for x in 0..w as usize {
            let bank = if x < 8 { 1 } else { 3 };
            indexes[y * w as usize + x] = bank * 4 + ((x + y) % 4) as u8;
        }
    }

    let png = EncodeRequest::new()
        .with_index_mode(IndexMode::hi_attribute(4).unwrap())
        .encode(w, h, &bgra_palette(16), 16, &indexes, Unstoppable)
        .unwrap();
    let (_, _, pixels) = decode_with_png_crate(&png);
    let expected: Vec<u8> = indexes.iter().map(|i| i % 4).collect();
    assert_eq!(pixels, expected);

    let map = reduce_to_attribute_map(w, h, 8, 8, &indexes, 4).unwrap();
    assert_eq!(map, [1, 3]);
}

#[test]
fn palette_not_multiple_of_four_rejected() {
    let result = encode_indexed_png(1, 1, &[0, 0, 0, 0, 0, 0], 1, &[0], Unstoppable);
    match result.unwrap_err() {
        IndexedPngError::InvalidPalette(_) => {}
        other => panic!("expected InvalidPalette, got {other:?}"),
    }
}

#[test]
fn width_65536_rejected() {
    let err = encode_indexed_png(65_536, 1, &bgra_palette(1), 1, &[], Unstoppable).unwrap_err();
    assert!(matches!(err, IndexedPngError::WidthTooLarge { max: 65_535, .. }));
    assert!(err.to_string().contains("65535"));
}

#[test]
fn palette_count_errors() {
    let palette = bgra_palette(2);
    assert!(matches!(
        encode_indexed_png(1, 1, &palette, 3, &[0], Unstoppable),
        Err(IndexedPngError::PaletteTooShort { .. })
    ));
    let big = bgra_palette(300);
    assert!(matches!(
        encode_indexed_png(1, 1, &big, 257, &[0], Unstoppable),
        Err(IndexedPngError::PaletteTooLarge { colors: 257 })
    ));
}

#[test]
fn limits_reject_large() {
    let limits = Limits {
        max_pixels: Some(1),
        ..Default::default()
    };
    let result = EncodeRequest::new()
        .with_limits(&limits)
        .encode(1, 2, &bgra_palette(1), 1, &[0, 0], Unstoppable);
    match result.unwrap_err() {
        IndexedPngError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[cfg(feature = "rgb")]
#[test]
fn typed_bgra_palette_matches_bytes() {
    let typed = [
        rgb::alt::BGRA8 { b: 10, g: 20, r: 30, a: 255 },
        rgb::alt::BGRA8 { b: 40, g: 50, r: 60, a: 0 },
    ];
    let bytes = [10, 20, 30, 255, 40, 50, 60, 0];
    let a = EncodeRequest::new()
        .encode_bgra(2, 1, &typed, &[1, 0], Unstoppable)
        .unwrap();
    let b = encode_indexed_png(2, 1, &bytes, 2, &[1, 0], Unstoppable).unwrap();
    assert_eq!(a, b);
}

#[cfg(feature = "imgref")]
#[test]
fn strided_img_skips_padding() {
    // 3x2 image in a buffer with stride 5; padding bytes are 99
    let buf = [1u8, 2, 3, 99, 99, 4, 5, 6, 99, 99];
    let img = imgref::ImgRef::new_stride(&buf[..], 3, 2, 5);
    let palette = bgra_palette(7);
    let from_img = EncodeRequest::new()
        .encode_img(img, &palette, 7, Unstoppable)
        .unwrap();
    let flat = encode_indexed_png(3, 2, &palette, 7, &[1, 2, 3, 4, 5, 6], Unstoppable).unwrap();
    assert_eq!(from_img, flat);
}

#[cfg(feature = "base64")]
#[test]
fn data_uri_wraps_png() {
    let uri = encode_indexed_png_data_uri(1, 1, &bgra_palette(1), 1, &[0], Unstoppable).unwrap();
    assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
}
