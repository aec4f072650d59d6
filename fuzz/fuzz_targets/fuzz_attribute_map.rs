#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary geometry must either produce a map or an error, never panic
    if data.len() < 5 {
        return;
    }
    let width = u32::from(data[0]);
    let height = u32::from(data[1]);
    let tile_width = u32::from(data[2] % 17);
    let tile_height = u32::from(data[3] % 17);
    let colors = u16::from(data[4]);
    let indexes = &data[5..];
    if let Ok(map) =
        zenindexed::reduce_to_attribute_map(width, height, tile_width, tile_height, indexes, colors)
    {
        assert_eq!(
            map.len(),
            ((width / tile_width) * (height / tile_height)) as usize
        );
    }
});
