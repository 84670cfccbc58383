//! Feature classification
//!
//! Groups cells into oceans, landmasses and lakes by connectivity analysis
//! over the subdivision. Submerged regions that reach the map border are
//! ocean; enclosed submerged regions are lakes. Each type is numbered densely
//! from 0 so coastline stitching can scan feature numbers in order; land
//! that touches an ocean always takes the lowest land numbers.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::diagram::PlanarSubdivision;

/// Terrain classification of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    Ocean,
    Land,
    Lake,
}

/// Per-cell input to coastline extraction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub elevation: f32,
    pub feature_type: FeatureType,
    /// Dense per-type identifier of the ocean, landmass or lake
    pub feature_index: usize,
}

/// Number of features of each type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureSummary {
    pub oceans: usize,
    pub lands: usize,
    pub lakes: usize,
}

/// A connected group of cells on the same side of sea level
struct Component {
    members: Vec<usize>,
    submerged: bool,
    touches_border: bool,
}

/// Classify every cell.
///
/// Components are discovered in order of their lowest cell index. Oceans and
/// lakes are numbered in discovery order. Land is numbered in two runs:
/// first every landmass that borders an ocean, then landmasses enclosed by
/// lakes alone. Only the first run produces land coast segments, so land
/// coast numbers stay dense from 0.
pub fn classify_cells<S: PlanarSubdivision + ?Sized>(
    subdivision: &S,
    elevation: &[f32],
    sea_level: f32,
) -> Vec<Cell> {
    let count = subdivision.cell_count().min(elevation.len());
    let submerged: Vec<bool> = elevation[..count].iter().map(|&e| e < sea_level).collect();

    // Flood fill components
    let mut component_of = vec![usize::MAX; count];
    let mut components: Vec<Component> = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..count {
        if component_of[start] != usize::MAX {
            continue;
        }

        let id = components.len();
        let mut component = Component {
            members: Vec::new(),
            submerged: submerged[start],
            touches_border: false,
        };

        component_of[start] = id;
        queue.push_back(start);

        while let Some(cell) = queue.pop_front() {
            component.members.push(cell);
            if subdivision.is_border_cell(cell) {
                component.touches_border = true;
            }

            for n in subdivision.neighbors(cell) {
                if n < count
                    && component_of[n] == usize::MAX
                    && submerged[n] == component.submerged
                {
                    component_of[n] = id;
                    queue.push_back(n);
                }
            }
        }

        components.push(component);
    }

    // Water first, so land can see which neighbours are ocean
    let mut assigned: Vec<(FeatureType, usize)> = vec![(FeatureType::Land, 0); components.len()];
    let mut next_index = FeatureSummary::default();

    for (id, component) in components.iter().enumerate() {
        if !component.submerged {
            continue;
        }
        assigned[id] = if component.touches_border {
            next_index.oceans += 1;
            (FeatureType::Ocean, next_index.oceans - 1)
        } else {
            next_index.lakes += 1;
            (FeatureType::Lake, next_index.lakes - 1)
        };
    }

    let borders_ocean = |component: &Component| {
        component.members.iter().any(|&cell| {
            subdivision.neighbors(cell).iter().any(|&n| {
                n < count && submerged[n] && assigned[component_of[n]].0 == FeatureType::Ocean
            })
        })
    };
    let (coastal, inland): (Vec<usize>, Vec<usize>) = (0..components.len())
        .filter(|&id| !components[id].submerged)
        .partition(|&id| borders_ocean(&components[id]));

    for id in coastal.into_iter().chain(inland) {
        assigned[id] = (FeatureType::Land, next_index.lands);
        next_index.lands += 1;
    }

    (0..count)
        .map(|cell| {
            let (feature_type, feature_index) = assigned[component_of[cell]];
            Cell { elevation: elevation[cell], feature_type, feature_index }
        })
        .collect()
}

/// Count features of each type
pub fn summarize(cells: &[Cell]) -> FeatureSummary {
    let mut summary = FeatureSummary::default();
    for cell in cells {
        let slot = match cell.feature_type {
            FeatureType::Ocean => &mut summary.oceans,
            FeatureType::Land => &mut summary.lands,
            FeatureType::Lake => &mut summary.lakes,
        };
        *slot = (*slot).max(cell.feature_index + 1);
    }
    summary
}
