//! Overlay drawing.
//!
//! Screen-anchored items (dot, name, highlight circles) are skipped when the
//! entity is off screen. Ground shapes (aggro circles, cones, patrol arrows)
//! are projected point by point and drawn from whatever part is visible.

use std::sync::Arc;

use tracing::error;

use super::{AggroType, EspObject, EspType, SnapshotBuffer, should_draw};
use crate::config::{self, Color, Config, SharedConfig};
use crate::constants::draw::{
    CIRCLE_SEGMENTS, CONE_SEGMENTS, DEFAULT_FILLED_OPACITY, LINE_THICKNESS, PLAYER_DOT_RADIUS,
    SIGHT_RADIAN,
};
use crate::constants::range::{AGGRO_VIEW, HIGHLIGHT, INTERACTION_RING};
use crate::geometry::{Vec2, Vec3};
use crate::host::{DrawList, GameClient};

const HOARD_RADIUS: f32 = 2.0;
const CHEST_RADIUS: f32 = 1.0;
const TRAP_RADIUS: f32 = 1.7;
const PASSAGE_RADIUS: f32 = 2.0;
const PATROL_ARROW_OPACITY: f32 = 0.6;

/// Per-frame overlay renderer over the shared snapshot
pub struct Renderer {
    game: Arc<dyn GameClient>,
    config: SharedConfig,
    snapshot: Arc<SnapshotBuffer>,
}

impl Renderer {
    pub fn new(game: Arc<dyn GameClient>, config: SharedConfig, snapshot: Arc<SnapshotBuffer>) -> Self {
        Self {
            game,
            config,
            snapshot,
        }
    }

    /// Draw the latest snapshot. Returns false when the frame was skipped,
    /// either because the preconditions failed or the snapshot was busy.
    pub fn draw_frame(&self, draw: &mut dyn DrawList) -> bool {
        let config = config::current(&self.config);
        if !should_draw(&config, self.game.as_ref()) {
            return false;
        }
        let Some(objects) = self.snapshot.try_read() else {
            return false;
        };

        draw_snapshot(&objects, &config, self.game.as_ref(), draw);
        true
    }
}

pub fn draw_snapshot(
    objects: &[EspObject],
    config: &Config,
    game: &dyn GameClient,
    draw: &mut dyn DrawList,
) {
    for obj in objects {
        draw_object(obj, config, game, draw);
    }
}

/// Whether the entity's name label is drawn
pub fn should_draw_name(obj: &EspObject, config: &Config) -> bool {
    match obj.kind {
        EspType::Player => false,
        EspType::Enemy | EspType::Mimic | EspType::FriendlyEnemy => !obj.in_combat(),
        EspType::BronzeChest => config.show_bronze_coffers,
        EspType::SilverChest => config.show_silver_coffers,
        EspType::GoldChest => config.show_gold_coffers,
        EspType::AccursedHoard => config.show_hoards,
        EspType::MimicChest => config.show_mimic_coffer,
        EspType::Trap => config.show_traps,
        EspType::Return => config.show_return,
        EspType::Passage => config.show_passage,
        EspType::AccursedHoardCoffer => false,
    }
}

/// Chest categories the user has hidden
fn chest_hidden(kind: EspType, config: &Config) -> bool {
    match kind {
        EspType::BronzeChest => !config.show_bronze_coffers,
        EspType::SilverChest => !config.show_silver_coffers,
        EspType::GoldChest => !config.show_gold_coffers,
        EspType::AccursedHoardCoffer => !config.show_hoards,
        _ => false,
    }
}

fn draw_object(obj: &EspObject, config: &Config, game: &dyn GameClient, draw: &mut dyn DrawList) {
    let color = obj.render_color(&config.colors);
    let projection = game.world_to_screen(obj.position());

    if projection.on_screen {
        let screen = projection.screen;

        if config.show_player_dot && obj.kind == EspType::Player {
            draw.add_circle_filled(screen, PLAYER_DOT_RADIUS, config.colors.player);
        }

        if should_draw_name(obj, config) {
            draw.add_text(screen, config.colors.name, &obj.entity.name);
        }

        if obj.kind == EspType::AccursedHoard
            && config.show_hoards
            && config.highlight_coffers
            && obj.distance <= HIGHLIGHT
        {
            ground_circle_filled(draw, game, obj.position(), HOARD_RADIUS, color, 1.0);
        }

        if obj.kind.is_chest() {
            if chest_hidden(obj.kind, config) {
                return;
            }
            if obj.distance <= HIGHLIGHT && config.highlight_coffers {
                ground_circle_filled(draw, game, obj.position(), CHEST_RADIUS, color, 1.0);
            }
            if obj.distance <= INTERACTION_RING && config.show_coffer_interaction_range {
                ground_circle(draw, game, obj.position(), obj.interaction_distance(), color);
            }
        }

        if config.show_traps && obj.kind == EspType::Trap {
            ground_circle_filled(
                draw,
                game,
                obj.position(),
                TRAP_RADIUS,
                color,
                DEFAULT_FILLED_OPACITY,
            );
        }

        if config.show_mimic_coffer && obj.kind == EspType::MimicChest {
            ground_circle_filled(
                draw,
                game,
                obj.position(),
                CHEST_RADIUS,
                color,
                DEFAULT_FILLED_OPACITY,
            );
        }

        if config.highlight_passage && obj.kind == EspType::Passage {
            ground_circle_filled(
                draw,
                game,
                obj.position(),
                PASSAGE_RADIUS,
                color,
                DEFAULT_FILLED_OPACITY,
            );
        }
    }

    if config.show_mob_views
        && matches!(obj.kind, EspType::Enemy | EspType::Mimic)
        && obj.is_enemy_sub_kind()
        && !obj.in_combat()
    {
        draw_mob_view(obj, config, game, draw);
    }
}

fn draw_mob_view(obj: &EspObject, config: &Config, game: &dyn GameClient, draw: &mut dyn DrawList) {
    if config.show_patrol_arrow && obj.is_patrol() {
        facing_arrow(draw, game, obj, Color::RED.with_opacity(PATROL_ARROW_OPACITY));
    }

    if obj.distance > AGGRO_VIEW {
        return;
    }

    let position = obj.position();
    let radius = obj.aggro_distance();
    match obj.aggro_type() {
        AggroType::Proximity => {
            let color = config.normal_aggro_color.with_opacity(DEFAULT_FILLED_OPACITY);
            ground_circle(draw, game, position, radius, color);
        }
        AggroType::Sound => {
            let color = config.sound_aggro_color.with_opacity(DEFAULT_FILLED_OPACITY);
            ground_circle(draw, game, position, radius, color);
            ground_circle_filled(
                draw,
                game,
                position,
                obj.entity.hitbox_radius,
                config.sound_aggro_color,
                DEFAULT_FILLED_OPACITY,
            );
        }
        AggroType::Sight => {
            ground_cone(
                draw,
                game,
                obj,
                SIGHT_RADIAN,
                radius,
                config.normal_aggro_color,
            );
        }
        AggroType::Undetermined => {
            error!(
                "Unable to process aggro type {} for mob {}",
                obj.aggro_type(),
                obj.entity.name_id
            );
        }
    }
}

/// Visible screen points of a ring on the ground around `center`
fn ring_points(game: &dyn GameClient, center: Vec3, radius: f32) -> Vec<Vec2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU)
        .map(|angle| game.world_to_screen(center.on_ground(angle, radius)))
        .filter(|projection| projection.on_screen)
        .map(|projection| projection.screen)
        .collect()
}

fn ground_circle(draw: &mut dyn DrawList, game: &dyn GameClient, center: Vec3, radius: f32, color: Color) {
    let points = ring_points(game, center, radius);
    if points.len() >= 3 {
        draw.add_polyline(&points, color, LINE_THICKNESS, true);
    }
}

fn ground_circle_filled(
    draw: &mut dyn DrawList,
    game: &dyn GameClient,
    center: Vec3,
    radius: f32,
    color: Color,
    opacity: f32,
) {
    let points = ring_points(game, center, radius);
    if points.len() >= 3 {
        draw.add_convex_poly_filled(&points, color.with_opacity(opacity));
        draw.add_polyline(&points, color, LINE_THICKNESS, true);
    }
}

/// Cone of `angle` radians centred on the entity's facing
fn ground_cone(
    draw: &mut dyn DrawList,
    game: &dyn GameClient,
    obj: &EspObject,
    angle: f32,
    radius: f32,
    color: Color,
) {
    let center = obj.position();
    let start = obj.entity.rotation - angle / 2.0;

    let apex = game.world_to_screen(center);
    let arc = (0..=CONE_SEGMENTS)
        .map(|i| start + angle * i as f32 / CONE_SEGMENTS as f32)
        .map(|a| game.world_to_screen(center.on_ground(a, radius)));

    let points: Vec<Vec2> = std::iter::once(apex)
        .chain(arc)
        .filter(|projection| projection.on_screen)
        .map(|projection| projection.screen)
        .collect();

    if points.len() >= 3 {
        draw.add_convex_poly_filled(&points, color.with_opacity(DEFAULT_FILLED_OPACITY));
        draw.add_polyline(&points, color, LINE_THICKNESS, true);
    }
}

/// Short arrow in front of the mob pointing along its facing
fn facing_arrow(draw: &mut dyn DrawList, game: &dyn GameClient, obj: &EspObject, color: Color) {
    let base = obj.position();
    let rotation = obj.entity.rotation;
    let length = obj.entity.hitbox_radius + 2.0;

    let from = game.world_to_screen(base.on_ground(rotation, obj.entity.hitbox_radius));
    let tip = base.on_ground(rotation, length);
    let to = game.world_to_screen(tip);
    let left = game.world_to_screen(tip.on_ground(rotation + 2.5, 0.8));
    let right = game.world_to_screen(tip.on_ground(rotation - 2.5, 0.8));

    if !(from.on_screen && to.on_screen) {
        return;
    }
    draw.add_line(from.screen, to.screen, color, LINE_THICKNESS);
    if left.on_screen {
        draw.add_line(to.screen, left.screen, color, LINE_THICKNESS);
    }
    if right.on_screen {
        draw.add_line(to.screen, right.screen, color, LINE_THICKNESS);
    }
}
