use cdt_sweep::{Edge, EdgeIdx, Edges, Point, VerticalList};

#[derive(Debug, PartialEq)]
struct Visit {
    vertex: Point,
    removed: usize,
    upper: Option<EdgeIdx>,
    lower: Option<EdgeIdx>,
}

// Sweeps from left to right over all the endpoints of `edges`, plus the
// extra `points`. At each vertex, the edges ending there are retired, then
// the vertex's neighbors are looked up, then the edges starting there are
// added.
fn sweep(
    edges: &Edges,
    points: &[Point],
    mut at_vertex: impl FnMut(&mut VerticalList, &Point),
) -> Vec<Visit> {
    let mut vertices: Vec<Point> = edges
        .edges()
        .flat_map(|e| [*e.left(), *e.right()])
        .chain(points.iter().copied())
        .collect();
    vertices.sort();
    vertices.dedup();

    let mut list = VerticalList::default();
    let mut visits = Vec::new();
    let mut entrances = edges.entrances().iter().peekable();
    for v in vertices {
        list.set_abscissa_at(edges, &v);
        let removed = list.remove_edge_from_right_point(edges, &v);
        let upper = list.upper_edge(edges, &v);
        let lower = list.lower_edge(edges, &v);
        at_vertex(&mut list, &v);
        visits.push(Visit {
            vertex: v,
            removed,
            upper,
            lower,
        });

        let mut starting = Vec::new();
        while let Some(&&(x, idx)) = entrances.peek() {
            if x > v.x || (x == v.x && edges[idx].left() != &v) {
                break;
            }
            starting.push(idx);
            entrances.next();
        }
        list.add_edges(edges, starting);
        assert_sorted(&list, edges);
    }
    assert!(list.is_empty());
    visits
}

fn assert_sorted(list: &VerticalList, edges: &Edges) {
    for (i, e) in list.iter_edges(edges).enumerate() {
        assert_eq!(list.search_edge(edges, e).index(), Some(i), "{e:?}");
    }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y, 0.0)
}

#[test]
fn square_with_free_points() {
    let mut edges = Edges::default();
    let square = edges
        .add_cycle([(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
        .unwrap();
    let [bottom, right, top, left] = square[..] else {
        panic!("expected four edges");
    };
    assert!(edges[right].is_vertical());
    assert!(edges[left].is_vertical());

    let visits = sweep(&edges, &[pt(2.0, 2.0), pt(3.0, 1.0)], |_, _| {});
    let visit = |x, y, removed, upper, lower| Visit {
        vertex: pt(x, y),
        removed,
        upper,
        lower,
    };
    assert_eq!(
        visits,
        vec![
            visit(0.0, 0.0, 0, None, None),
            visit(0.0, 4.0, 1, None, Some(bottom)),
            visit(2.0, 2.0, 0, Some(top), Some(bottom)),
            visit(3.0, 1.0, 0, Some(top), Some(bottom)),
            visit(4.0, 0.0, 1, Some(top), None),
            visit(4.0, 4.0, 2, None, None),
        ]
    );
}

#[test]
fn candidate_edges_at_a_free_point() {
    let mut edges = Edges::default();
    edges
        .add_cycle([(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
        .unwrap();

    let q = pt(2.0, 2.0);
    let mut checked = false;
    sweep(&edges, &[q], |list, v| {
        if *v != q {
            return;
        }
        checked = true;

        // Joining q to a corner of the square is fine.
        for corner in [pt(0.0, 0.0), pt(0.0, 4.0)] {
            assert!(!list.intersects_upper_or_lower(&edges, v, &Edge::new(corner, q)));
        }
        // Joining q to something outside the square isn't.
        assert!(list.intersects_upper_or_lower(&edges, v, &Edge::new(pt(1.0, 5.0), q)));
        assert!(list.intersects_upper_or_lower(&edges, v, &Edge::new(pt(1.0, -1.0), q)));
        assert_eq!(list.last_upper_point(), Some(q));
        assert_eq!(list.last_lower_point(), Some(q));
    });
    assert!(checked);
}

// Three constraint lines meeting at a survey station, swept together with a
// line passing underneath.
#[test]
fn station_fan() {
    let station = Point::new(300641.4000000001, 2260085.4000000013, 12.5);
    let mut edges = Edges::default();
    let fan = [
        edges.add_edge((300640.3, 2260085.2, 11.0), station).unwrap(),
        edges
            .add_edge((300641.29999999993, 2260093.5, 14.0), station)
            .unwrap(),
        edges.add_edge((300639.0, 2260080.0, 10.0), station).unwrap(),
    ];
    let under = edges
        .add_edge((300639.0, 2260070.0, 9.0), (300650.0, 2260070.0, 9.0))
        .unwrap();

    let visits = sweep(&edges, &[], |list, v| {
        if v.x == 300641.29999999993 {
            let order: Vec<_> = list.edges().to_vec();
            assert_eq!(order, vec![under, fan[2], fan[0]]);
        }
    });

    let at_station = visits.iter().find(|v| v.vertex == station).unwrap();
    assert_eq!(at_station.removed, 3);
    assert_eq!(at_station.lower, Some(under));
    assert_eq!(at_station.upper, None);
}
