#![no_main]

use std::cmp::Ordering;

use arbitrary::Unstructured;
use cdt_sweep::{
    arbitrary::{abscissa_near, another_edge, edge},
    vertical_order,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(e0) = edge(&mut u) else { return };
    let Ok(e1) = another_edge(&mut u, &e0) else { return };
    let Ok(e2) = another_edge(&mut u, &e1) else { return };
    let Ok(x) = abscissa_near(&mut u, &e1) else { return };

    let c01 = vertical_order(&e0, &e1, x);
    let c10 = vertical_order(&e1, &e0, x);
    assert_eq!(c01, c10.reverse(), "{e0:?} vs {e1:?} at {x}");
    assert_eq!(c01 == Ordering::Equal, e0 == e1);
    assert_eq!(vertical_order(&e0, &e0, x), Ordering::Equal);

    let c12 = vertical_order(&e1, &e2, x);
    let c02 = vertical_order(&e0, &e2, x);
    if c01 == c12 && c01 != Ordering::Equal {
        assert_eq!(c02, c01, "{e0:?}, {e1:?}, {e2:?} at {x}");
    }
});
