#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First bytes pick the block offsets, the rest is the raw stream.
    // Decoding must report damaged blocks as errors and never panic.
    if data.len() < 4 {
        let _ = qgd::decode::decode_scan_block(data, 0, None);
        return;
    }

    let (index, raw) = data.split_at(4);
    let count = (index[0] % 8) as u32;
    let stride = u16::from_le_bytes([index[1], index[2]]) as u32;
    let offsets: Vec<u32> = (0..count).map(|i| i * stride + index[3] as u32).collect();

    let _ = qgd::decode::decode_scan_block(raw, 0, None);
    let _ = qgd::decode::aggregate_scans(raw, &offsets);
});
