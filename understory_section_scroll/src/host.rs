// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between this crate and the scroll container that owns the
//! actual scroll position.
//!
//! A host is typically a thin handle onto a UI framework's scroll state. It is
//! shared between the [`Navigator`](crate::Navigator) (which moves it) and the
//! [`VisibilityTracker`](crate::VisibilityTracker) (which listens to it), so
//! every method takes `&self`; hosts use interior mutability as needed.
//!
//! Hosts may deliver position-changed callbacks synchronously from inside
//! [`ScrollHost::jump_to`] or while an animation returned by
//! [`ScrollHost::animate_to`] is running.

use alloc::boxed::Box;
use core::future::Future;
use core::time::Duration;

use crate::Scalar;

/// Callback invoked by a host with the new scroll offset.
pub type PositionCallback<S> = Box<dyn Fn(S)>;

/// An external scroll container.
pub trait ScrollHost {
    /// Scalar type of the scroll offset.
    type Scalar: Scalar;

    /// Future returned by [`ScrollHost::animate_to`].
    type Animation: Future<Output = MoveOutcome>;

    /// Handle identifying a position-changed subscription.
    type Subscription;

    /// Current scroll offset.
    fn offset(&self) -> Self::Scalar;

    /// Moves to `offset` immediately.
    fn jump_to(&self, offset: Self::Scalar);

    /// Starts an animated move to `offset`.
    ///
    /// The returned future resolves once the animation settles, or with
    /// [`MoveOutcome::Superseded`] when a later move replaces it. Starting an
    /// animation while another is running is expected to supersede the
    /// earlier one.
    fn animate_to(&self, offset: Self::Scalar, duration: Duration, curve: Curve)
    -> Self::Animation;

    /// Registers `callback` to be invoked whenever the offset changes.
    fn on_position_changed(&self, callback: PositionCallback<Self::Scalar>) -> Self::Subscription;

    /// Removes a subscription created by [`ScrollHost::on_position_changed`].
    fn remove_position_changed(&self, subscription: Self::Subscription);
}

/// How a completed or abandoned move ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The host reached the requested offset.
    Settled,
    /// A later move replaced this one before it settled.
    Superseded,
    /// The host stopped the move for its own reasons, e.g. the user grabbed
    /// the scroll view.
    Interrupted,
}

/// Easing curve for animated moves.
///
/// The navigator passes the curve through to the host; [`Curve::transform`]
/// is provided for hosts that sample their own tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Constant velocity.
    Linear,
    /// Starts slow, accelerates.
    EaseIn,
    /// Starts fast, decelerates.
    EaseOut,
    /// Slow at both ends (smoothstep).
    #[default]
    EaseInOut,
}

impl Curve {
    /// Maps linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// `t` is clamped into `[0, 1]` first.
    #[must_use]
    pub fn transform(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// How a navigation request should move the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Jump straight to the target.
    #[default]
    Instant,
    /// Animate to the target over `duration` using `curve`.
    Animated {
        /// Length of the animation.
        duration: Duration,
        /// Easing applied to the animation.
        curve: Curve,
    },
}

impl Transition {
    /// Shorthand for [`Transition::Animated`].
    #[must_use]
    pub const fn animated(duration: Duration, curve: Curve) -> Self {
        Self::Animated { duration, curve }
    }

    /// Returns `true` if this transition moves the host without animating.
    ///
    /// Animations with a zero duration count as instant.
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        match self {
            Self::Instant => true,
            Self::Animated { duration, .. } => duration.is_zero(),
        }
    }
}
