//! Staged route planning.
//!
//! [`Planner`] walks a fixed sequence of stages and yields a [`PlanEvent`]
//! at every stage change and progress checkpoint:
//!
//! 1. index the translocator ends ([`Stage::BuildingNodeList`]),
//! 2. build the proximity graph ([`Stage::BuildingGraph`]),
//! 3. attach the route's start and stop and search ([`Stage::FindingPath`]),
//! 4. collapse pass-through hops and yield [`PlanEvent::Finished`].

use std::fmt;

use translocate_core::{Point, QuadTree};
use translocate_paths::{
    DijkstraSearch, Graph, GraphBuilder, Incremental, Metric, PROGRESS_INTERVAL, Step,
};

use crate::collapse::collapse_pass_through;
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::feature::TeleporterPair;

/// A planning stage, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BuildingNodeList,
    BuildingGraph,
    FindingPath,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BuildingNodeList => "Building node list",
            Self::BuildingGraph => "Building graph",
            Self::FindingPath => "Finding path",
        })
    }
}

/// The result of a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Waypoints from `from` to `to`, and the total cost of the search path.
    Found { points: Vec<Point>, cost: f64 },
    /// `to` cannot be reached from `from`.
    NoRoute,
}

impl Route {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The waypoints, if a route was found.
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Self::Found { points, .. } => Some(points),
            Self::NoRoute => None,
        }
    }

    /// The route cost, if a route was found.
    pub fn cost(&self) -> Option<f64> {
        match self {
            Self::Found { cost, .. } => Some(*cost),
            Self::NoRoute => None,
        }
    }
}

/// What a [`Planner`] reports.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    /// A new stage has started.
    Stage(Stage),
    /// Completion percentage within the current stage.
    Progress(f64),
    /// The final result. Always the last event.
    Finished(Route),
}

/// Flattens pairs into nodes `2k`, `2k + 1` and indexes them.
struct NodeList {
    pairs: Vec<TeleporterPair>,
    next: usize,
    nodes: Vec<Point>,
    index: QuadTree<usize>,
}

impl NodeList {
    fn new(pairs: Vec<TeleporterPair>, index: QuadTree<usize>) -> Self {
        let nodes = Vec::with_capacity(pairs.len() * 2);
        Self {
            pairs,
            next: 0,
            nodes,
            index,
        }
    }

    fn push(&mut self, p: Point) {
        let id = self.nodes.len();
        self.nodes.push(p);
        if !self.index.insert(p, id) {
            log::warn!(
                "translocator end {p} is outside {}; it will only be reachable through its pair",
                self.index.boundary()
            );
        }
    }
}

impl Incremental for NodeList {
    type Output = (Vec<Point>, QuadTree<usize>);

    fn step(&mut self) -> Step {
        let total = self.pairs.len();
        while self.next < total {
            let k = self.next;
            let TeleporterPair { a, b } = self.pairs[k];
            self.push(a);
            self.push(b);
            self.next += 1;
            if k % PROGRESS_INTERVAL == 0 {
                return Step::Progress(k as f64 / total as f64 * 100.0);
            }
        }
        Step::Done
    }

    fn finish(mut self) -> Self::Output {
        while self.step() != Step::Done {}
        (self.nodes, self.index)
    }
}

enum State {
    Ready(NodeList),
    NodeList(NodeList),
    Graph(GraphBuilder<Vec<Point>, QuadTree<usize>>),
    Search {
        search: DijkstraSearch<Graph>,
        nodes: Vec<Point>,
        start: usize,
        stop: usize,
    },
    Finished,
}

/// Plans a route over a translocator network.
///
/// The planner is an iterator of [`PlanEvent`]s: stage changes, progress
/// and finally [`PlanEvent::Finished`] with the [`Route`]. Work only happens
/// while it is polled, so dropping it cancels the plan. For a one-shot
/// answer use [`find_path`] or [`Planner::run`].
///
/// ```
/// use translocate_planner::{PlanEvent, Planner, PlannerConfig, Point, TeleporterPair};
///
/// let pairs = [TeleporterPair::new(Point::new(0.0, 0.0), Point::new(9000.0, 0.0))];
/// let config = PlannerConfig::route(Point::new(10.0, 0.0), Point::new(9010.0, 0.0));
/// for event in Planner::new(pairs, config).unwrap() {
///     match event {
///         PlanEvent::Stage(stage) => println!("{stage}"),
///         PlanEvent::Progress(p) => println!("{p:.0}%"),
///         PlanEvent::Finished(route) => assert_eq!(route.cost(), Some(20.0)),
///     }
/// }
/// ```
pub struct Planner {
    config: PlannerConfig,
    state: State,
}

impl Planner {
    /// Validate `config` and the translocator ends, and prepare a plan. No
    /// work is done until polled.
    pub fn new(
        pairs: impl IntoIterator<Item = TeleporterPair>,
        config: PlannerConfig,
    ) -> Result<Self, PlanError> {
        config.validate()?;
        let pairs: Vec<TeleporterPair> = pairs.into_iter().collect();
        for (k, pair) in pairs.iter().enumerate() {
            if let Some(&point) = [pair.a, pair.b].iter().find(|p| !p.is_finite()) {
                return Err(PlanError::NonFiniteEndpoint { pair: k, point });
            }
        }
        let index = QuadTree::new(config.world_bounds);
        Ok(Self {
            config,
            state: State::Ready(NodeList::new(pairs, index)),
        })
    }

    /// Whether [`PlanEvent::Finished`] has been yielded.
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Finished)
    }

    /// Drive the plan to the end, handing every event to `on_event`.
    pub fn run(self, mut on_event: impl FnMut(&PlanEvent)) -> Route {
        let mut route = Route::NoRoute;
        for event in self {
            on_event(&event);
            if let PlanEvent::Finished(r) = event {
                route = r;
            }
        }
        route
    }

    /// Append the route start and stop and begin searching between them.
    fn begin_search(&self, mut graph: Graph, mut nodes: Vec<Point>) -> State {
        let metric = self.config.build.metric;
        let start = attach(&mut graph, &mut nodes, self.config.from, metric);
        let stop = attach(&mut graph, &mut nodes, self.config.to, metric);
        log::debug!(
            "searching {} vertices, {} edges, from {} to {}",
            graph.len(),
            graph.edge_count(),
            self.config.from,
            self.config.to
        );
        State::Search {
            search: DijkstraSearch::new(graph, start, stop),
            nodes,
            start,
            stop,
        }
    }
}

/// Add a vertex at `p`, linked both ways to every existing vertex.
fn attach(graph: &mut Graph, nodes: &mut Vec<Point>, p: Point, metric: Metric) -> usize {
    let v = graph.add_vertex();
    for (u, &q) in nodes.iter().enumerate() {
        graph.add_undirected(v, u, metric.distance(p, q));
    }
    nodes.push(p);
    v
}

fn finalize(search: &DijkstraSearch<Graph>, nodes: &[Point], start: usize, stop: usize) -> Route {
    let Some(mut path) = search.path() else {
        log::debug!("no route: stop vertex {stop} unreachable");
        return Route::NoRoute;
    };
    let cost = search.distance(stop);
    let raw_len = path.len();
    collapse_pass_through(&mut path, start, stop);
    let mut points: Vec<Point> = path.into_iter().map(|v| nodes[v]).collect();
    points.dedup();
    log::debug!(
        "route found: cost {cost}, {raw_len} raw hops, {} waypoints",
        points.len()
    );
    Route::Found { points, cost }
}

impl Iterator for Planner {
    type Item = PlanEvent;

    fn next(&mut self) -> Option<PlanEvent> {
        let event = match std::mem::replace(&mut self.state, State::Finished) {
            State::Ready(list) => {
                log::debug!("indexing {} translocators", list.pairs.len());
                self.state = State::NodeList(list);
                PlanEvent::Stage(Stage::BuildingNodeList)
            }
            State::NodeList(mut list) => match list.step() {
                Step::Progress(p) => {
                    self.state = State::NodeList(list);
                    PlanEvent::Progress(p)
                }
                Step::Done => {
                    let (nodes, index) = list.finish();
                    log::debug!("indexed {} of {} nodes", index.len(), nodes.len());
                    self.state = State::Graph(GraphBuilder::new(nodes, index, self.config.build));
                    PlanEvent::Stage(Stage::BuildingGraph)
                }
            },
            State::Graph(mut builder) => match builder.step() {
                Step::Progress(p) => {
                    self.state = State::Graph(builder);
                    PlanEvent::Progress(p)
                }
                Step::Done => {
                    let (graph, nodes, _) = builder.into_parts();
                    self.state = self.begin_search(graph, nodes);
                    PlanEvent::Stage(Stage::FindingPath)
                }
            },
            State::Search {
                mut search,
                nodes,
                start,
                stop,
            } => match search.step() {
                Step::Progress(p) => {
                    self.state = State::Search {
                        search,
                        nodes,
                        start,
                        stop,
                    };
                    PlanEvent::Progress(p)
                }
                Step::Done => PlanEvent::Finished(finalize(&search, &nodes, start, stop)),
            },
            State::Finished => return None,
        };
        if let PlanEvent::Progress(p) = event {
            log::trace!("progress {p:.1}%");
        }
        Some(event)
    }
}

/// Plan a route in one call.
pub fn find_path(
    pairs: impl IntoIterator<Item = TeleporterPair>,
    config: PlannerConfig,
) -> Result<Route, PlanError> {
    Ok(Planner::new(pairs, config)?.run(|_| {}))
}
