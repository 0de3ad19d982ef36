#![no_main]
use libfuzzer_sys::fuzz_target;
use servo_core::{InputCfg, InputRange};

fuzz_target!(|data: (f64, f64, &str)| {
    let (min, max, line) = data;
    let Ok(range) = InputRange::new(&InputCfg { min, max }) else {
        return;
    };
    if let Ok(v) = range.parse_line(line) {
        assert!((0.0..=1.0).contains(&v), "normalized {v} from {line:?}");
    }
});
