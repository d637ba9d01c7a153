#![no_main]

use arbitrary::Arbitrary;
use cc_blit::{encode, generate_lua, BlitError};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    /// Per-pixel palette selectors, so small inputs still repeat colors
    selectors: Vec<u8>,
    colors: Vec<[u8; 4]>,
}

fuzz_target!(|input: FuzzInput| {
    let width = (input.width as usize).min(128);
    let height = (input.height as usize).min(128);
    if input.colors.is_empty() || input.selectors.len() < width * height {
        return;
    }

    let mut rgba = Vec::with_capacity(width * height * 4);
    for &s in &input.selectors[..width * height] {
        rgba.extend_from_slice(&input.colors[s as usize % input.colors.len()]);
    }

    // The encoder should never panic
    match encode(&rgba, width, height) {
        Ok(encoded) => {
            assert_eq!(encoded.rows.len(), height / 3);
            for row in &encoded.rows {
                assert_eq!(row.len(), width / 2);
                assert!(row.patterns.iter().all(|&p| p < 64));
            }
            let _ = generate_lua(&encoded);
        }
        Err(BlitError::InvalidDimensions { .. }) => {
            assert!(width % 2 != 0 || height % 3 != 0);
        }
        Err(BlitError::PaletteTooLarge { count }) => assert!(count > 16),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
