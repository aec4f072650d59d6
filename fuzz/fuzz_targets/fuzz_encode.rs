#![no_main]
use libfuzzer_sys::fuzz_target;
use zenindexed::*;

fuzz_target!(|data: &[u8]| {
    // [w, h, colors, mode, palette..., indexes...]
    if data.len() < 4 {
        return;
    }
    let width = u32::from(data[0] % 64);
    let height = u32::from(data[1] % 64);
    let colors = usize::from(data[2]) + 1;
    let rest = &data[4..];
    let pixel_count = (width * height) as usize;
    let palette_len = colors * 4;
    if rest.len() < palette_len + pixel_count {
        // Whatever we are handed must fail cleanly, never panic
        let _ = encode_indexed_png(width, height, rest, colors, &[], enough::Unstoppable);
        return;
    }
    let palette = &rest[..palette_len];
    let indexes = &rest[palette_len..palette_len + pixel_count];

    let mode = match data[3] {
        0 => IndexMode::Direct,
        n => IndexMode::hi_attribute(u16::from(n)).unwrap(),
    };
    let Ok(png_bytes) = EncodeRequest::new()
        .with_index_mode(mode)
        .encode(width, height, palette, colors, indexes, enough::Unstoppable)
    else {
        return;
    };
    if width == 0 || height == 0 {
        return;
    }

    let mut decoder = png::Decoder::new(&png_bytes[..]);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().expect("encoded PNG must parse");
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("encoded PNG must decode");
    buf.truncate(info.buffer_size());

    let expected: Vec<u8> = match mode {
        IndexMode::HiAttribute { colors_per_palette } => indexes
            .iter()
            .map(|&i| (u16::from(i) % colors_per_palette.get()) as u8)
            .collect(),
        _ => indexes.to_vec(),
    };
    assert_eq!(buf, expected, "roundtrip index mismatch");
});
