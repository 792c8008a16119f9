use clap::ValueEnum;
use ndarray::{ArrayView1, ArrayView2};
use serde::Serialize;

/// Distance used to decide whether two samples are neighbours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
}

impl Metric {
    pub fn distance(&self, a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
        match self {
            Metric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            Metric::Manhattan => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| (x - y).abs())
                .sum::<f64>(),
        }
    }
}

/// Strategy used to answer eps-radius queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// k-d tree for low-dimensional data with enough rows, brute force otherwise.
    #[default]
    Auto,
    Brute,
    KdTree,
}

impl Algorithm {
    const KD_TREE_MIN_SAMPLES: usize = 64;
    const KD_TREE_MAX_FEATURES: usize = 16;

    /// Resolve `Auto` against the shape of the data.
    pub fn resolve(self, n_samples: usize, n_features: usize) -> Algorithm {
        match self {
            Algorithm::Auto
                if n_samples >= Self::KD_TREE_MIN_SAMPLES
                    && n_features <= Self::KD_TREE_MAX_FEATURES =>
            {
                Algorithm::KdTree
            }
            Algorithm::Auto => Algorithm::Brute,
            other => other,
        }
    }
}

/// Collections of points that can be queried to find nearby points.
///
/// Points are identified by their row index. Implementations must return
/// every point whose distance from `point` is at most `eps`, including
/// `point` itself, in ascending index order. The ordering keeps cluster
/// ids and border ownership independent of the index strategy.
pub trait RegionQuery {
    fn n_points(&self) -> usize;

    fn neighbours(&self, point: usize, eps: f64) -> Vec<usize>;
}

/// Linear scan over every point, O(N) per query.
#[derive(Clone, Debug)]
pub struct BruteScan<'a> {
    points: ArrayView2<'a, f64>,
    metric: Metric,
}

impl<'a> BruteScan<'a> {
    pub fn new(points: ArrayView2<'a, f64>, metric: Metric) -> Self {
        Self { points, metric }
    }
}

impl RegionQuery for BruteScan<'_> {
    fn n_points(&self) -> usize {
        self.points.nrows()
    }

    fn neighbours(&self, point: usize, eps: f64) -> Vec<usize> {
        let center = self.points.row(point);
        (0..self.points.nrows())
            .filter(|&i| self.metric.distance(&center, &self.points.row(i)) <= eps)
            .collect()
    }
}

const LEAF_SIZE: usize = 16;

#[derive(Clone, Debug)]
enum Node {
    Leaf {
        start: usize,
        end: usize,
    },
    Split {
        axis: usize,
        value: f64,
        left: usize,
        right: usize,
    },
}

/// Median-split k-d tree over the rows of a matrix.
///
/// Pruning compares the per-axis gap against `eps`, which is a lower bound
/// of both supported metrics, so results match [`BruteScan`] exactly.
#[derive(Clone, Debug)]
pub struct KdTree<'a> {
    points: ArrayView2<'a, f64>,
    metric: Metric,
    order: Vec<usize>,
    nodes: Vec<Node>,
}

impl<'a> KdTree<'a> {
    pub fn new(points: ArrayView2<'a, f64>, metric: Metric) -> Self {
        let mut tree = Self {
            points,
            metric,
            order: (0..points.nrows()).collect(),
            nodes: Vec::new(),
        };
        if points.nrows() > 0 {
            tree.build(0, points.nrows());
        }
        tree
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match nodes[idx] {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        if self.nodes.is_empty() { 0 } else { walk(&self.nodes, 0) }
    }

    fn build(&mut self, start: usize, end: usize) -> usize {
        let node = self.nodes.len();
        self.nodes.push(Node::Leaf { start, end });

        if end - start <= LEAF_SIZE {
            return node;
        }

        let axis = self.widest_axis(start, end);
        let points = self.points;
        let mid = start + (end - start) / 2;
        self.order[start..end].select_nth_unstable_by(mid - start, |&a, &b| {
            points[[a, axis]].total_cmp(&points[[b, axis]])
        });
        let value = points[[self.order[mid], axis]];

        let left = self.build(start, mid);
        let right = self.build(mid, end);
        self.nodes[node] = Node::Split { axis, value, left, right };
        node
    }

    fn widest_axis(&self, start: usize, end: usize) -> usize {
        let mut best_axis = 0;
        let mut best_spread = f64::NEG_INFINITY;

        for axis in 0..self.points.ncols() {
            let (lo, hi) = self.order[start..end].iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), &i| {
                    let v = self.points[[i, axis]];
                    (lo.min(v), hi.max(v))
                },
            );
            if hi - lo > best_spread {
                best_spread = hi - lo;
                best_axis = axis;
            }
        }

        best_axis
    }
}

impl RegionQuery for KdTree<'_> {
    fn n_points(&self) -> usize {
        self.points.nrows()
    }

    fn neighbours(&self, point: usize, eps: f64) -> Vec<usize> {
        let center = self.points.row(point);
        let mut found = Vec::new();
        let mut stack = vec![0];

        if self.nodes.is_empty() {
            return found;
        }

        while let Some(idx) = stack.pop() {
            match self.nodes[idx] {
                Node::Leaf { start, end } => {
                    found.extend(self.order[start..end].iter().copied().filter(|&i| {
                        self.metric.distance(&center, &self.points.row(i)) <= eps
                    }));
                }
                Node::Split { axis, value, left, right } => {
                    let gap = center[axis] - value;
                    // left holds values <= split, right holds values >= split
                    if gap <= eps {
                        stack.push(left);
                    }
                    if -gap <= eps {
                        stack.push(right);
                    }
                }
            }
        }

        found.sort_unstable();
        found
    }
}

/// Build the index selected by `algorithm` over the rows of `points`.
pub fn build_index<'a>(
    points: ArrayView2<'a, f64>,
    metric: Metric,
    algorithm: Algorithm,
) -> Box<dyn RegionQuery + 'a> {
    match algorithm.resolve(points.nrows(), points.ncols()) {
        Algorithm::KdTree => {
            let tree = KdTree::new(points, metric);
            log::debug!(
                "Built k-d tree over {} points, depth {}",
                points.nrows(),
                tree.depth()
            );
            Box::new(tree)
        }
        _ => Box::new(BruteScan::new(points, metric)),
    }
}
