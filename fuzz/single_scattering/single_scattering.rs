#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scatlet::{BorderMode, Scatlet, ScatteringOptions};

#[derive(Arbitrary, Debug)]
struct Data {
    rows: u8,
    cols: u8,
    scale: u8,
    orientations: u8,
    max_order: u8,
    batch: u8,
    pre_pad: bool,
}

fuzz_target!(|data: Data| {
    let (rows, cols) = (data.rows as usize % 48, data.cols as usize % 48);
    let j = data.scale as usize % 5;
    let options = ScatteringOptions {
        orientations: data.orientations as usize % 5,
        max_order: data.max_order as usize % 3,
        pre_pad: data.pre_pad,
        border_mode: BorderMode::Reflect101,
        ..Default::default()
    };
    let Ok(executor) = Scatlet::make_scattering2d_f32(j, (rows, cols), options) else {
        return;
    };
    let (in_rows, in_cols) = if data.pre_pad {
        executor.padded_size()
    } else {
        (rows, cols)
    };
    let batch = data.batch as usize % 3;
    let mut signal = vec![0f32; batch * in_rows * in_cols];
    for (i, v) in signal.iter_mut().enumerate() {
        *v = (i % 13) as f32 / 13.;
    }
    let output = executor
        .scattering(&signal, &[batch, in_rows, in_cols])
        .unwrap();
    let (out_rows, out_cols) = executor.output_size();
    assert_eq!(
        output.data.len(),
        batch * executor.coefficient_count() * out_rows * out_cols
    );
});
