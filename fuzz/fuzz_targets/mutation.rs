#![no_main]

use std::cmp::Ordering;

use arbitrary::{Arbitrary, Unstructured};
use cdt_sweep::{
    arbitrary::{another_edge, edge, float_in_range},
    vertical_order, Edges, VerticalList,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert { near: Option<usize> },
    Remove { idx: usize },
    RemoveRight { idx: usize },
    Move,
}

fn arbitrary_ops(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let len = u.arbitrary_len::<Op>()?;
    let mut edges = Edges::default();
    let mut list = VerticalList::default();
    for _ in 0..len {
        let op: Op = u.arbitrary()?;
        match op {
            Op::Insert { near } => {
                let e = match near {
                    Some(i) if !list.is_empty() => {
                        let other = edges[list.edges()[i % list.len()]];
                        another_edge(&mut u, &other)?
                    }
                    _ => edge(&mut u)?,
                };
                let Ok(idx) = edges.add_edge(*e.left(), *e.right()) else {
                    continue;
                };
                list.add_edge(&edges, idx);
            }
            Op::Remove { idx } => {
                if !list.is_empty() {
                    let e = edges[list.edges()[idx % list.len()]];
                    assert!(list.remove_edge(&edges, &e).is_some());
                }
            }
            Op::RemoveRight { idx } => {
                if !list.is_empty() {
                    let p = *edges[list.edges()[idx % list.len()]].right();
                    assert!(list.remove_edge_from_right_point(&edges, &p) > 0);
                }
            }
            Op::Move => {
                let x = float_in_range(-1e3, 3e6, &mut u)?;
                list.set_abscissa(&edges, x);
            }
        }

        for w in list.edges().windows(2) {
            let (a, b) = (&edges[w[0]], &edges[w[1]]);
            assert_ne!(
                vertical_order(a, b, list.abscissa()),
                Ordering::Greater,
                "{a:?} above {b:?} at {}",
                list.abscissa()
            );
        }
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = arbitrary_ops(Unstructured::new(data));
});
