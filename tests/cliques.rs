//! Maximal clique enumeration on the sample graphs

use omega_chi::algo::{Algorithm, Bron, Mode, Variant};
use omega_chi::errors::GraphError;
use omega_chi::graph::{EdgeValues, Graph, VertexNumber, VertexNumbers, VertexValues};

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn clique(vertices: &[VertexNumber]) -> VertexNumbers {
    vertices.iter().copied().collect()
}

/// An 8-vertex graph with clique number 4.
fn sample_graph() -> Graph {
    let mut graph = Graph::new(8);
    for &(i, j) in &[
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 4),
        (1, 2),
        (1, 3),
        (1, 4),
        (1, 6),
        (2, 3),
        (2, 6),
        (3, 5),
        (4, 5),
        (4, 6),
        (4, 7),
        (5, 6),
        (5, 7),
        (6, 7),
    ] {
        graph.join(i, j).unwrap();
    }
    graph
}

/// The 9-vertex variant: edge (3, 6) in place of (3, 5), plus (7, 8).
fn bigger_sample_graph() -> Graph {
    let vertices = ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
        .iter()
        .enumerate()
        .map(|(i, name)| VertexValues::labeled(name, (i % 3) as f64 * 2.0, (i / 3) as f64 * 2.0));
    let edges = [
        (0, 1),
        (0, 2),
        (0, 3),
        (0, 4),
        (1, 2),
        (1, 3),
        (1, 4),
        (1, 6),
        (2, 3),
        (2, 6),
        (3, 6),
        (4, 5),
        (4, 6),
        (4, 7),
        (5, 6),
        (5, 7),
        (6, 7),
        (7, 8),
    ]
    .iter()
    .map(|&pair| EdgeValues::from(pair));
    Graph::build(vertices, edges).unwrap()
}

#[test]
fn sample_graph_all_cliques_in_discovery_order() {
    let g = sample_graph();
    let mut bron = Bron::new(&g, Variant::Simple);
    assert!(bron.execute().unwrap());
    let expected = vec![
        clique(&[0, 1, 2, 3]),
        clique(&[0, 1, 4]),
        clique(&[1, 2, 6]),
        clique(&[1, 4, 6]),
        clique(&[3, 5]),
        clique(&[4, 5, 6, 7]),
    ];
    assert_eq!(bron.cliques(), &expected);
    assert_eq!(bron.total(), 6);
    assert_eq!(bron.number(), 4);
}

#[test]
fn sample_graph_pivot_agrees() {
    let g = sample_graph();
    let mut simple = Bron::new(&g, Variant::Simple);
    let mut pivot = Bron::new(&g, Variant::Pivot);
    assert!(simple.execute().unwrap());
    assert!(pivot.execute().unwrap());
    assert_eq!(simple.number(), pivot.number());
    assert_eq!(simple.total(), pivot.total());
    let mut lhs = simple.cliques().clone();
    let mut rhs = pivot.cliques().clone();
    lhs.sort();
    rhs.sort();
    assert_eq!(lhs, rhs);
}

#[test]
fn bigger_sample_graph_cliques() {
    let g = bigger_sample_graph();
    for variant in [Variant::Simple, Variant::Pivot].iter() {
        let mut bron = Bron::new(&g, *variant);
        assert!(bron.execute().unwrap());
        let mut found = bron.cliques().clone();
        found.sort();
        let mut expected = vec![
            clique(&[0, 1, 2, 3]),
            clique(&[0, 1, 4]),
            clique(&[1, 2, 3, 6]),
            clique(&[1, 4, 6]),
            clique(&[4, 5, 6, 7]),
            clique(&[7, 8]),
        ];
        expected.sort();
        assert_eq!(found, expected);
        assert_eq!(bron.total(), 6);
        assert_eq!(bron.number(), 4);
    }
}

#[test]
fn first_max_prunes_but_agrees_on_omega() {
    let g = bigger_sample_graph();
    let mut all = Bron::new(&g, Variant::Pivot);
    all.execute().unwrap();
    let mut first_max = Bron::with_mode(&g, Variant::Pivot, Mode::FirstMax);
    first_max.execute().unwrap();
    assert_eq!(first_max.number(), all.number());
    assert_eq!(first_max.cliques().len(), 1);
    assert!(first_max.total() <= all.total());
}

#[test]
fn max_only_saves_every_maximum() {
    let g = bigger_sample_graph();
    let mut bron = Bron::with_mode(&g, Variant::Simple, Mode::MaxOnly);
    bron.execute().unwrap();
    assert_eq!(bron.total(), 6);
    let mut found = bron.cliques().clone();
    found.sort();
    assert_eq!(
        found,
        vec![
            clique(&[0, 1, 2, 3]),
            clique(&[1, 2, 3, 6]),
            clique(&[4, 5, 6, 7]),
        ]
    );
}

#[test]
fn variants_agree_on_random_graphs() {
    use omega_chi::generators::BernoulliGraphDistribution;

    let mut rng = StdRng::seed_from_u64(2021);
    for &p in &[0.2, 0.5, 0.8] {
        let dist = BernoulliGraphDistribution::init(9, p).unwrap();
        for _ in 0..3 {
            let g = dist.sample(&mut rng);
            let mut simple = Bron::new(&g, Variant::Simple);
            let mut pivot = Bron::new(&g, Variant::Pivot);
            simple.execute().unwrap();
            pivot.execute().unwrap();
            assert_eq!(simple.number(), pivot.number());
            assert_eq!(simple.total(), pivot.total());
            // The clique number is the order of the largest saved clique.
            let largest = simple.cliques().iter().map(VertexNumbers::len).max();
            assert_eq!(largest, Some(simple.number()));
            // Every saved clique really is one.
            for clique in pivot.cliques() {
                for &u in clique {
                    for &v in clique {
                        assert!(u == v || g.adjacent(u, v));
                    }
                }
            }
        }
    }
}

#[test]
fn contracting_a_vertex_with_itself_fails() {
    let g = sample_graph();
    assert_eq!(
        g.contract(3, 3).unwrap_err(),
        GraphError::SameVertexContract(3)
    );
}

#[test]
fn simple_graphs_reject_parallel_and_loop_edges() {
    let mut g = sample_graph();
    assert_eq!(
        g.join(0, 1),
        Err(GraphError::MultipleEdge { from: 0, to: 1 })
    );
    assert_eq!(g.join(5, 5), Err(GraphError::LoopEdge(5)));
}
