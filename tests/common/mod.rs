//! Point-robot base lattice shared by the integration tests and benches.
#![allow(dead_code)]

use std::f64::consts::PI;

use glam::IVec2;
use multilevel_lattice::types::disc_theta_to_cont;
use multilevel_lattice::{Action, BaseLattice, CostThresholds, INFINITE_COST, MapInfo, Pose2};

pub const NUM_HEADINGS: usize = 8;
pub const STEPS: usize = 8;

pub const FORWARD: usize = 0;
pub const FORWARD_LONG: usize = 1;
pub const TURN_LEFT: usize = 2;
pub const TURN_RIGHT: usize = 3;
pub const ARC_LEFT: usize = 4;

const DIRECTIONS: [IVec2; NUM_HEADINGS] = [
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, 1),
    IVec2::new(-1, 1),
    IVec2::new(-1, 0),
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
];

/// Single-level lattice where the ground robot is a point.
pub struct PointLattice {
    info: MapInfo,
    grid: Vec<u8>,
    thresholds: CostThresholds,
    actions: Vec<Vec<Action>>,
}

impl PointLattice {
    pub fn new(width: u32, height: u32, resolution: f64, thresholds: CostThresholds) -> Self {
        let info = MapInfo {
            width,
            height,
            resolution,
        };
        Self {
            grid: vec![0; info.cell_count()],
            actions: (0..NUM_HEADINGS)
                .map(|heading| primitives(heading, resolution))
                .collect(),
            info,
            thresholds,
        }
    }

    pub fn set_cost(&mut self, x: i32, y: i32, cost: u8) {
        let idx = (y as usize) * (self.info.width as usize) + (x as usize);
        self.grid[idx] = cost;
    }

    pub fn action(&self, heading: usize, index: usize) -> &Action {
        &self.actions[heading][index]
    }
}

impl BaseLattice for PointLattice {
    fn info(&self) -> &MapInfo {
        &self.info
    }

    fn num_headings(&self) -> usize {
        NUM_HEADINGS
    }

    fn actions(&self, heading: usize) -> &[Action] {
        &self.actions[heading]
    }

    fn thresholds(&self) -> &CostThresholds {
        &self.thresholds
    }

    fn cost_at(&self, x: i32, y: i32) -> Option<u8> {
        if !self.info.contains(IVec2::new(x, y)) {
            return None;
        }
        Some(self.grid[(y as usize) * (self.info.width as usize) + (x as usize)])
    }

    fn is_valid_configuration(&self, x: i32, y: i32, _heading: usize) -> bool {
        self.is_valid_cell(x, y)
    }

    fn action_cost(&self, x: i32, y: i32, _heading: usize, action: &Action) -> u32 {
        let source = IVec2::new(x, y);
        let dest = action.destination(source);
        if !self.is_valid_cell(source.x, source.y) || !self.is_valid_cell(dest.x, dest.y) {
            return INFINITE_COST;
        }
        let mut max_cost = 0u8;
        for offset in &action.intermediate_cells {
            let cell = source + *offset;
            match self.cost_at(cell.x, cell.y) {
                Some(cost) if cost < self.thresholds.inscribed => max_cost = max_cost.max(cost),
                _ => return INFINITE_COST,
            }
        }
        action.cost * (u32::from(max_cost) + 1)
    }
}

fn primitives(heading: usize, resolution: f64) -> Vec<Action> {
    let dir = DIRECTIONS[heading];
    let left = DIRECTIONS[(heading + 2) % NUM_HEADINGS];
    let diagonal = dir.x != 0 && dir.y != 0;
    let step_cost = if diagonal { 141 } else { 100 };

    let turn_left = (heading + 1) % NUM_HEADINGS;
    let turn_right = (heading + NUM_HEADINGS - 1) % NUM_HEADINGS;

    vec![
        primitive(FORWARD, heading, heading, dir, step_cost, resolution),
        primitive(FORWARD_LONG, heading, heading, dir * 3, 3 * step_cost, resolution),
        primitive(TURN_LEFT, heading, turn_left, IVec2::ZERO, 50, resolution),
        primitive(TURN_RIGHT, heading, turn_right, IVec2::ZERO, 50, resolution),
        primitive(ARC_LEFT, heading, turn_left, dir * 2 + left, 250, resolution),
    ]
}

fn primitive(
    index: usize,
    start: usize,
    end: usize,
    delta: IVec2,
    cost: u32,
    resolution: f64,
) -> Action {
    let start_theta = disc_theta_to_cont(start, NUM_HEADINGS);
    let mut turn = disc_theta_to_cont(end, NUM_HEADINGS) - start_theta;
    if turn > PI {
        turn -= 2.0 * PI;
    } else if turn < -PI {
        turn += 2.0 * PI;
    }

    let poses = (0..=STEPS)
        .map(|i| {
            let t = i as f64 / STEPS as f64;
            Pose2::new(delta.as_dvec2() * resolution * t, start_theta + turn * t)
        })
        .collect();
    Action::new(index, start, end, delta, cost, poses, resolution)
}

/// Deterministic pseudo-random sequence for obstacle layouts.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}
