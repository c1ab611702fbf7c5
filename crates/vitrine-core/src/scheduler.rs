//! Deferred render bookkeeping.
//!
//! Every pipeline run marks the cards as fading and asks the host to call
//! back after the fade delay. Each request gets a [`RenderTicket`] carrying a
//! monotonically increasing generation; only the newest ticket may commit.
//! Older tickets that fire later are stale and do nothing, so a burst of
//! clicks or keystrokes ends in exactly one visible render.

use core::time::Duration;

use crate::card::CardSlot;

/// Handle the host passes back when its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    /// Monotonic request number.
    pub generation: u64,
    /// How long the host should wait before committing.
    pub delay: Duration,
}

/// Cards to place in the render container, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    pub order: Vec<CardSlot>,
}

/// Tracks the single pending render.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    generation: u64,
    pending: Option<(u64, RenderPlan)>,
}

impl RenderScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `plan`, superseding any render still waiting.
    pub fn schedule(&mut self, plan: RenderPlan, delay: Duration) -> RenderTicket {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some((self.generation, plan));
        RenderTicket {
            generation: self.generation,
            delay,
        }
    }

    /// Claim the plan for `ticket` if it is still the newest request.
    pub fn take(&mut self, ticket: RenderTicket) -> Option<RenderPlan> {
        match &self.pending {
            Some((generation, _)) if *generation == ticket.generation => {
                self.pending.take().map(|(_, plan)| plan)
            }
            _ => None,
        }
    }

    /// Whether a render is waiting for its timer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Generation of the newest request (0 before the first).
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
