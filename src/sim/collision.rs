//! Collision detection and response between a ball and a rectangle
//!
//! The ball is treated as its bounding square. On overlap we measure the
//! signed penetration along both axes and resolve along the shallower one,
//! biased toward vertical so square corner hits don't produce a sideways
//! bounce. One call resolves exactly one target.

use glam::Vec2;

use super::shape::{Circle, Rect, Shape};
use super::state::{Ball, Brick, Direction, Paddle};
use crate::sign_or_positive;
use crate::tuning::Tuning;

/// Axis a collision was resolved along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Ball pushed sideways, horizontal velocity reflected
    Horizontal,
    /// Ball pushed up/down, vertical velocity reflected
    Vertical,
}

/// Details of a resolved collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub axis: Axis,
    /// Signed penetration on both axes (positive = push right/down)
    pub penetration: Vec2,
}

/// Result of testing a ball against one target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    NoHit,
    Resolved(Contact),
}

impl Resolution {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Signed penetration of a circle's bounding square into a rectangle.
///
/// Returns `None` when the shapes don't overlap (touching is not overlap).
/// Each component is the displacement that would separate the shapes
/// along that axis alone.
pub fn penetration(circle: &Circle, rect: &Rect) -> Option<Vec2> {
    if !Shape::Circle(*circle).intersects(&Shape::Rect(*rect)) {
        return None;
    }

    let delta = circle.center() - rect.center();
    let min_dist = Vec2::splat(circle.radius) + rect.half_extents();

    Some(Vec2::new(
        sign_or_positive(delta.x) * min_dist.x - delta.x,
        sign_or_positive(delta.y) * min_dist.y - delta.y,
    ))
}

/// Pick the axis of least penetration; `bias` favours vertical on near-ties
#[inline]
pub fn least_penetration_axis(penetration: Vec2, bias: f32) -> Axis {
    if penetration.x.abs() + bias < penetration.y.abs() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Reflect the ball on `axis` and move it out of the target.
///
/// Velocity is only reflected when it points into the target, so a ball
/// that is already leaving never gets turned back in.
fn separate(ball: &mut Ball, contact: &Contact, clearance: Vec2) {
    let pen = contact.penetration;
    match contact.axis {
        Axis::Horizontal => {
            if ball.vel.x * pen.x < 0.0 {
                ball.bounce_x();
            }
            ball.circle.pos.x += pen.x + sign_or_positive(pen.x) * clearance.x;
        }
        Axis::Vertical => {
            if ball.vel.y * pen.y < 0.0 {
                ball.bounce_y();
            }
            ball.circle.pos.y += pen.y + sign_or_positive(pen.y) * clearance.y;
        }
    }
}

fn contact_with(ball: &Ball, rect: &Rect, tuning: &Tuning) -> Option<Contact> {
    let penetration = penetration(&ball.circle, rect)?;
    Some(Contact {
        axis: least_penetration_axis(penetration, tuning.axis_bias),
        penetration,
    })
}

/// Test a ball against a brick; on hit bounce the ball and destroy the brick
pub fn resolve_brick(ball: &mut Ball, brick: &mut Brick, tuning: &Tuning) -> Resolution {
    if !ball.is_active() || !brick.is_active() {
        return Resolution::NoHit;
    }
    let Some(contact) = contact_with(ball, &brick.rect, tuning) else {
        return Resolution::NoHit;
    };

    separate(ball, &contact, tuning.brick_clearance);
    brick.destroy();
    log::debug!(
        "Ball {} destroyed brick {} ({:?} axis)",
        ball.id,
        brick.id,
        contact.axis
    );

    Resolution::Resolved(contact)
}

/// Test a descending ball against the paddle; on hit bounce and add English
pub fn resolve_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    arena_width: f32,
    tuning: &Tuning,
) -> Resolution {
    // A rising ball passes through the paddle
    if !ball.is_active() || ball.vel.y <= 0.0 {
        return Resolution::NoHit;
    }
    let Some(contact) = contact_with(ball, &paddle.rect, tuning) else {
        return Resolution::NoHit;
    };

    separate(ball, &contact, Vec2::ZERO);
    apply_english(ball, paddle, contact.axis, arena_width, tuning);

    Resolution::Resolved(contact)
}

/// Adjust horizontal speed from paddle motion after a paddle bounce.
///
/// Side hits get the paddle push directly. Top hits scale it by where the
/// ball struck, measured from the trailing edge so spin always follows
/// paddle travel. The result is capped at `max_ball_speed`.
pub fn apply_english(
    ball: &mut Ball,
    paddle: &Paddle,
    axis: Axis,
    arena_width: f32,
    tuning: &Tuning,
) {
    let influence = if paddle.is_pinned(arena_width) {
        0.0
    } else {
        paddle.max_speed * paddle.direction.signum() * tuning.english_factor
    };

    let push = match axis {
        Axis::Horizontal => influence,
        Axis::Vertical => influence * strike_ratio(ball, paddle),
    };

    let cap = tuning.max_ball_speed;
    ball.vel.x = (ball.vel.x + push).clamp(-cap, cap);
}

/// Where along the paddle the ball struck, 0 = trailing edge, 1 = leading edge
fn strike_ratio(ball: &Ball, paddle: &Paddle) -> f32 {
    let ratio = ((ball.center().x - paddle.rect.left()) / paddle.width()).clamp(0.0, 1.0);
    if paddle.direction == Direction::Left {
        1.0 - ratio
    } else {
        ratio
    }
}
