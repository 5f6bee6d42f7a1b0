//! Broad-phase candidate-pair production.
//!
//! Both strategies bucket the current collider snapshots spatially and emit
//! deduplicated within-bucket pairs. Pairs are pre-filtered by a cheap
//! three-axis (world X/Y/Z) interval overlap test before the narrow phase
//! runs its full vertex projections.

use std::collections::BTreeSet;

use glam::Vec3;

/// Per-collider snapshot handed to the broad phase for one tick. Rebuilt
/// every tick from current vertex extents; never cached across ticks.
#[derive(Debug, Clone, Copy)]
pub struct BroadProxy {
    /// World-space corners of the collider's box.
    pub vertices: [Vec3; 8],
    /// Componentwise vertex minimum.
    pub min: Vec3,
    /// Componentwise vertex maximum.
    pub max: Vec3,
}

impl BroadProxy {
    pub fn new(vertices: [Vec3; 8]) -> Self {
        let mut min = vertices[0];
        let mut max = vertices[0];
        for v in &vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }
        Self { vertices, min, max }
    }

    /// Cheap sweep-and-prune pre-filter: interval overlap on the three world
    /// axes.
    #[inline]
    pub fn intervals_overlap(&self, other: &BroadProxy) -> bool {
        !(self.max.x < other.min.x || other.max.x < self.min.x)
            && !(self.max.y < other.min.y || other.max.y < self.min.y)
            && !(self.max.z < other.min.z || other.max.z < self.min.z)
    }
}

/// Candidate-pair production over one tick's collider snapshots.
pub trait BroadPhase {
    /// Emit deduplicated candidate index pairs `(i, j)` with `i < j`, in
    /// ascending order.
    ///
    /// Every truly colliding pair must appear (no false negatives); false
    /// positives are acceptable and filtered by the narrow phase.
    fn candidate_pairs(&self, proxies: &[BroadProxy]) -> Vec<(usize, usize)>;

    /// Strategy name, for logs and benches.
    fn name(&self) -> &'static str;
}

/// Pairwise sweep within one bucket, deduplicating against pairs already
/// emitted by other buckets.
fn collect_bucket_pairs(
    bucket: &[usize],
    proxies: &[BroadProxy],
    out: &mut BTreeSet<(usize, usize)>,
) {
    for i in 0..bucket.len() {
        for j in (i + 1)..bucket.len() {
            let pair = if bucket[i] < bucket[j] {
                (bucket[i], bucket[j])
            } else {
                (bucket[j], bucket[i])
            };
            if out.contains(&pair) {
                continue;
            }
            if proxies[pair.0].intervals_overlap(&proxies[pair.1]) {
                out.insert(pair);
            }
        }
    }
}

/// Grid subdivision: the bounding extent of all collider vertices is divided
/// into a fixed number of equal buckets per axis, and a collider lands in
/// every bucket its vertex span touches (so bodies straddling a boundary
/// appear in all buckets they reach).
#[derive(Debug, Clone, Copy)]
pub struct UniformGrid {
    cells_per_axis: u32,
}

impl UniformGrid {
    pub fn new(cells_per_axis: u32) -> Self {
        Self {
            cells_per_axis: cells_per_axis.max(1),
        }
    }
}

impl Default for UniformGrid {
    fn default() -> Self {
        Self::new(4)
    }
}

impl BroadPhase for UniformGrid {
    fn candidate_pairs(&self, proxies: &[BroadProxy]) -> Vec<(usize, usize)> {
        if proxies.len() < 2 {
            return Vec::new();
        }

        let mut bounds_min = proxies[0].min;
        let mut bounds_max = proxies[0].max;
        for p in &proxies[1..] {
            bounds_min = bounds_min.min(p.min);
            bounds_max = bounds_max.max(p.max);
        }

        let cells = self.cells_per_axis as usize;
        let cell_size = (bounds_max - bounds_min) / cells as f32;

        // An axis with zero total span collapses to a single bucket.
        let range = |lo: f32, hi: f32, origin: f32, size: f32| -> (usize, usize) {
            if size <= f32::EPSILON {
                return (0, 0);
            }
            let clamp = |x: f32| (x.floor() as isize).clamp(0, cells as isize - 1) as usize;
            (clamp((lo - origin) / size), clamp((hi - origin) / size))
        };

        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); cells * cells * cells];
        for (idx, p) in proxies.iter().enumerate() {
            let (x0, x1) = range(p.min.x, p.max.x, bounds_min.x, cell_size.x);
            let (y0, y1) = range(p.min.y, p.max.y, bounds_min.y, cell_size.y);
            let (z0, z1) = range(p.min.z, p.max.z, bounds_min.z, cell_size.z);
            for x in x0..=x1 {
                for y in y0..=y1 {
                    for z in z0..=z1 {
                        buckets[(x * cells + y) * cells + z].push(idx);
                    }
                }
            }
        }

        let mut pairs = BTreeSet::new();
        for bucket in &buckets {
            collect_bucket_pairs(bucket, proxies, &mut pairs);
        }
        pairs.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "uniform_grid"
    }
}

/// Population at or below which an octant node stops splitting.
const SPLIT_THRESHOLD: usize = 4;

/// Recursive octant split: collider vertex sets are split around their
/// centroid into eight octants by coordinate sign relative to the centroid,
/// recursing a fixed depth. A collider spanning a split plane is placed in
/// every octant it touches.
#[derive(Debug, Clone, Copy)]
pub struct OctantSplit {
    max_depth: u32,
}

impl OctantSplit {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    fn split(
        &self,
        indices: &[usize],
        proxies: &[BroadProxy],
        depth: u32,
        out: &mut BTreeSet<(usize, usize)>,
    ) {
        if depth == 0 || indices.len() <= SPLIT_THRESHOLD {
            collect_bucket_pairs(indices, proxies, out);
            return;
        }

        // Centroid of every vertex under this node.
        let mut centroid = Vec3::ZERO;
        for &i in indices {
            for v in &proxies[i].vertices {
                centroid += *v;
            }
        }
        centroid /= (indices.len() * 8) as f32;

        let mut octants: [Vec<usize>; 8] = Default::default();
        for &i in indices {
            let p = &proxies[i];
            for (oct, bucket) in octants.iter_mut().enumerate() {
                // Low octants take anything reaching below the centroid on
                // that axis, high octants anything reaching at or above it.
                let x_ok = if oct & 1 == 0 {
                    p.min.x < centroid.x
                } else {
                    p.max.x >= centroid.x
                };
                let y_ok = if oct & 2 == 0 {
                    p.min.y < centroid.y
                } else {
                    p.max.y >= centroid.y
                };
                let z_ok = if oct & 4 == 0 {
                    p.min.z < centroid.z
                } else {
                    p.max.z >= centroid.z
                };
                if x_ok && y_ok && z_ok {
                    bucket.push(i);
                }
            }
        }

        for bucket in &octants {
            if bucket.len() == indices.len() {
                // The split made no progress; emit rather than recurse forever.
                collect_bucket_pairs(bucket, proxies, out);
            } else if bucket.len() > 1 {
                self.split(bucket, proxies, depth - 1, out);
            }
        }
    }
}

impl Default for OctantSplit {
    fn default() -> Self {
        Self::new(3)
    }
}

impl BroadPhase for OctantSplit {
    fn candidate_pairs(&self, proxies: &[BroadProxy]) -> Vec<(usize, usize)> {
        if proxies.len() < 2 {
            return Vec::new();
        }
        let indices: Vec<usize> = (0..proxies.len()).collect();
        let mut pairs = BTreeSet::new();
        self.split(&indices, proxies, self.max_depth, &mut pairs);
        pairs.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "octant_split"
    }
}
