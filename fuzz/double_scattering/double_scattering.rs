#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scatlet::{Scatlet, ScatteringOptions};

#[derive(Arbitrary, Debug)]
struct Data {
    rows: u8,
    cols: u8,
    scale: u8,
    signal_rows: u8,
    signal_cols: u8,
}

fuzz_target!(|data: Data| {
    let (rows, cols) = (data.rows as usize % 40 + 1, data.cols as usize % 40 + 1);
    let j = data.scale as usize % 4 + 1;
    let Ok(executor) = Scatlet::make_scattering2d_f64(j, (rows, cols), ScatteringOptions::default())
    else {
        return;
    };
    // mismatched shapes must be rejected without panicking
    let (signal_rows, signal_cols) = (data.signal_rows as usize % 40, data.signal_cols as usize % 40);
    let signal = vec![0.25f64; signal_rows * signal_cols];
    match executor.scattering(&signal, &[signal_rows, signal_cols]) {
        Ok(output) => {
            assert_eq!((signal_rows, signal_cols), (rows, cols));
            assert!(output.data.iter().all(|v| v.is_finite()));
        }
        Err(_) => assert_ne!((signal_rows, signal_cols), (rows, cols)),
    }
    _ = executor.scattering_paths(&signal, &[1, signal_rows, signal_cols]);
});
