#![no_main]
use arbitrary::Arbitrary;
use ct_decompose::{GAMMA2_32, GAMMA2_88, decompose, vartime::decompose_vartime};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
pub enum Params {
    Gamma2Over32,
    Gamma2Over88,
}

fuzz_target!(|input: (u32, Params)| {
    let (r, params) = input;
    let gamma2 = match params {
        Params::Gamma2Over32 => GAMMA2_32,
        Params::Gamma2Over88 => GAMMA2_88,
    };

    let d = decompose(r, gamma2);
    let exact = i128::from(d.r1) * 2 * i128::from(gamma2) + i128::from(d.r0);
    assert_eq!(exact, i128::from(r));
    assert!(-(gamma2 as i32) < d.r0 && d.r0 <= gamma2 as i32);

    if let Ok(signed) = i32::try_from(r) {
        let (r1, r0) = decompose_vartime(signed, gamma2 as i32);
        assert_eq!((d.r1, d.r0), (r1 as u32, r0));
    }
});
