//! Bernoulli (Erdős–Rényi) random graphs

use num_integer::binomial;
use rand::distributions::{Bernoulli, BernoulliError, Distribution};
use rand::Rng;

use crate::graph::{Graph, VertexNumber};

/// The G(n, p) distribution over simple graphs: each of the n(n−1)/2
/// possible edges is present independently with probability p.
#[derive(Debug, Clone, Copy)]
pub struct BernoulliGraphDistribution {
    order: VertexNumber,
    bern: Bernoulli,
}

impl BernoulliGraphDistribution {
    /// Creates a new distribution over graphs of the given order. The edge
    /// probability must lie in [0, 1].
    pub fn init(order: VertexNumber, p: f64) -> Result<Self, BernoulliError> {
        Ok(Self {
            order,
            bern: Bernoulli::new(p)?,
        })
    }

    pub fn order(&self) -> VertexNumber {
        self.order
    }

    /// The number of candidate edges a sample draws from.
    pub fn possible_edges(&self) -> u64 {
        binomial(self.order as u64, 2)
    }
}

impl Distribution<Graph> for BernoulliGraphDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Graph {
        let mut graph = Graph::new(self.order);
        for i in 0..self.order {
            for j in (i + 1)..self.order {
                if self.bern.sample(rng) {
                    graph
                        .join(i, j)
                        .expect("every pair is joined at most once");
                }
            }
        }
        graph
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_bad_probability() {
        assert!(BernoulliGraphDistribution::init(10, -0.5).is_err());
        assert!(BernoulliGraphDistribution::init(10, 1.5).is_err());
    }

    #[test]
    fn extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let never = BernoulliGraphDistribution::init(8, 0.0).unwrap();
        assert_eq!(never.sample(&mut rng).size(), 0);
        let always = BernoulliGraphDistribution::init(8, 1.0).unwrap();
        let complete = always.sample(&mut rng);
        assert_eq!(complete.size() as u64, always.possible_edges());
        assert!(complete.is_complete());
    }

    #[test]
    fn density_tracks_probability() {
        let mut rng = StdRng::seed_from_u64(42);
        let half = BernoulliGraphDistribution::init(40, 0.5).unwrap();
        let graph = half.sample(&mut rng);
        let density = graph.size() as f64 / half.possible_edges() as f64;
        assert!(density > 0.3 && density < 0.7);
    }
}
