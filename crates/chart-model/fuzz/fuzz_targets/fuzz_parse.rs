#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = chart_model::source::decode_chart_bytes(data).0;
    let score = chart_model::parse(text.lines());
    let runtime = chart_model::flatten(&score);
    for pair in runtime.events().windows(2) {
        assert!(pair[0].timeline_cmp(&pair[1]).is_le());
    }
});
