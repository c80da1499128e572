use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::point::Point;

/// A single image point; corner centers use the same type
pub type Center = Point<i32>;

/// Closed boundary traced around a connected foreground region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

/// Axis-aligned bounding box, inclusive of both end pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Long side over short side, always >= 1
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.width.max(self.height) as f64;
        let short = self.width.min(self.height) as f64;
        long / short
    }
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of the contour points, truncated toward zero
    pub fn center(&self) -> Option<Center> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as i64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
        Some(Point::new((sx / n) as i32, (sy / n) as i32))
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some(Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }
}

/// Hierarchy links of one contour, as indices into the owning tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Node {
    pub parent: Option<usize>,
    pub first_child: Option<usize>,
    pub next: Option<usize>,
    pub prev: Option<usize>,
}

/// Contours with their nesting hierarchy stored as an arena
#[derive(Debug, Clone, Default)]
pub struct ContourTree {
    contours: Vec<Contour>,
    nodes: Vec<Node>,
}

impl ContourTree {
    /// Trace all borders of a binary edge map (non-zero = foreground)
    pub fn trace(edges: &GrayImage) -> Self {
        let traced = find_contours::<i32>(edges);
        let parents: Vec<Option<usize>> = traced.iter().map(|c| c.parent).collect();
        let contours = traced.into_iter().map(|c| Contour::new(c.points)).collect();
        Self::from_parents(contours, &parents)
    }

    /// Build sibling and child links from per-contour parent indices.
    ///
    /// Children are linked in index order. Top-level contours form one
    /// sibling chain. Out-of-range or self parents are treated as roots.
    pub fn from_parents(contours: Vec<Contour>, parents: &[Option<usize>]) -> Self {
        let n = contours.len();
        let mut nodes = vec![Node::default(); n];
        let mut last_child: Vec<Option<usize>> = vec![None; n];
        let mut last_root: Option<usize> = None;

        for i in 0..n {
            let parent = parents
                .get(i)
                .copied()
                .flatten()
                .filter(|&p| p < n && p != i);
            nodes[i].parent = parent;

            let prev = match parent {
                Some(p) => last_child[p],
                None => last_root,
            };
            nodes[i].prev = prev;
            match prev {
                Some(l) => nodes[l].next = Some(i),
                None => {
                    if let Some(p) = parent {
                        nodes[p].first_child = Some(i);
                    }
                }
            }
            match parent {
                Some(p) => last_child[p] = Some(i),
                None => last_root = Some(i),
            }
        }

        Self { contours, nodes }
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn contour(&self, index: usize) -> &Contour {
        &self.contours[index]
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Iterate over the direct children of a contour
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.nodes[index].first_child, move |&c| self.nodes[c].next)
    }

    /// Length of the longest child chain below each contour; leaves are 1.
    pub fn depths(&self) -> Vec<usize> {
        let mut depth = vec![0usize; self.nodes.len()];
        // post-order with an explicit stack
        let mut stack: Vec<(usize, bool)> = (0..self.nodes.len())
            .filter(|&i| self.nodes[i].parent.is_none())
            .map(|i| (i, false))
            .collect();

        while let Some((i, expanded)) = stack.pop() {
            if expanded {
                let deepest = self.children(i).map(|c| depth[c]).max().unwrap_or(0);
                depth[i] = deepest + 1;
            } else {
                stack.push((i, true));
                stack.extend(self.children(i).map(|c| (c, false)));
            }
        }

        depth
    }

    /// Mean point count over every contour in the tree
    pub fn mean_len(&self) -> f64 {
        if self.contours.is_empty() {
            return 0.0;
        }
        let total: usize = self.contours.iter().map(Contour::len).sum();
        total as f64 / self.contours.len() as f64
    }
}
