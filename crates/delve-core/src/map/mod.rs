//! Dungeon map widget reader.
//!
//! The floor label and the exit-progress indicator are only shown by the
//! in-game map widget. [`AddonMapReader`] walks that widget's node tree; the
//! tracker itself only sees the narrow [`DungeonMapReader`] interface.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::rules::PROGRESS_ICON_PARTS;

/// Name of the map widget in the host UI
pub const DUNGEON_MAP_ADDON: &str = "DeepDungeonMap";

static FLOOR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("floor number pattern is valid"));

/// Simplified UI node, as exposed by the host's widget lookup
#[derive(Debug, Clone, PartialEq)]
pub enum UiNode {
    Text(String),
    Component(Vec<UiNode>),
    Image { part_count: u16, part_id: u16 },
    Other,
}

/// Named widget lookup provided by the host
pub trait AddonSource: Send + Sync {
    /// Root nodes of the named widget, or `None` when it is not loaded
    fn addon_nodes(&self, name: &str) -> Option<Vec<UiNode>>;
}

/// What the tracker needs from the map widget
pub trait DungeonMapReader: Send + Sync {
    /// Floor number shown on the widget
    fn floor_label(&self) -> Option<u32>;

    /// Part index (0-10) of the exit-progress icon
    fn passage_part(&self) -> Option<u16>;
}

/// First integer found in the widget's text nodes, scanning from the last node
pub fn read_floor_label(nodes: &[UiNode]) -> Option<u32> {
    nodes.iter().rev().find_map(|node| match node {
        UiNode::Text(text) => FLOOR_NUMBER
            .find(text)
            .and_then(|m| m.as_str().parse::<u32>().ok()),
        _ => None,
    })
}

/// Part id of the exit-progress icon.
///
/// The widget holds two components whose second child is an 11-part image.
/// Scanning from the end, the first one is the key indicator; the second is
/// the passage progress.
pub fn read_passage_part(nodes: &[UiNode]) -> Option<u16> {
    nodes
        .iter()
        .rev()
        .filter_map(|node| match node {
            UiNode::Component(children) => match children.get(1) {
                Some(UiNode::Image {
                    part_count,
                    part_id,
                }) if *part_count == PROGRESS_ICON_PARTS => Some(*part_id),
                _ => None,
            },
            _ => None,
        })
        .nth(1)
}

/// [`DungeonMapReader`] over the host's widget lookup
pub struct AddonMapReader<S> {
    source: S,
}

impl<S: AddonSource> AddonMapReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    fn nodes(&self) -> Option<Vec<UiNode>> {
        self.source.addon_nodes(DUNGEON_MAP_ADDON)
    }
}

impl<S: AddonSource> DungeonMapReader for AddonMapReader<S> {
    fn floor_label(&self) -> Option<u32> {
        read_floor_label(&self.nodes()?)
    }

    fn passage_part(&self) -> Option<u16> {
        read_passage_part(&self.nodes()?)
    }
}
