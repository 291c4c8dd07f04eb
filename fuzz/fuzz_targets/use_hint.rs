#![no_main]
use ct_decompose::{GAMMA2_32, GAMMA2_88, Q, use_hint, vartime::use_hint_vartime};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u32, bool, bool)| {
    let (r, hint, small_gamma2) = input;
    let r = r % Q;
    let gamma2 = if small_gamma2 { GAMMA2_88 } else { GAMMA2_32 };

    assert_eq!(
        use_hint(r, u32::from(hint), gamma2),
        use_hint_vartime(r as i32, i32::from(hint), gamma2 as i32) as u32
    );
});
