// SPDX-License-Identifier: MPL-2.0
//! Contact tracking.
//!
//! [`PointerTracker`] keeps one [`PointerSession`] per active contact in a
//! fixed-capacity table and turns each raw [`PointerInput`] into a
//! [`NormalizedEvent`] carrying the number of contacts still down.

use crate::config::MAX_CONTACTS;
use crate::domain::geometry::Point;
use crate::domain::time::Timestamp;
use serde::Deserialize;
use thiserror::Error;

/// Stable identifier of a contact for the lifetime of its press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u32);

/// Device that produced a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Touch,
    Mouse,
    Pen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw event from the host shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub contact: ContactId,
    pub kind: PointerKind,
    pub phase: Phase,
    pub position: Point,
}

impl PointerInput {
    #[must_use]
    pub fn new(contact: ContactId, phase: Phase, position: Point) -> Self {
        Self {
            contact,
            kind: PointerKind::Touch,
            phase,
            position,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }
}

/// One active contact, from down to up or cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSession {
    pub id: ContactId,
    pub start: Point,
    pub current: Point,
    pub start_time: Timestamp,
}

/// Tracked form of a [`PointerInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedEvent {
    pub phase: Phase,
    pub contact: ContactId,
    pub position: Point,
    /// Contacts down after this event; a release no longer counts itself.
    pub contact_count: usize,
    pub timestamp: Timestamp,
}

/// Input the recognizer refuses to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGesture {
    #[error("contact {0:?} is not down")]
    UnknownContact(ContactId),

    #[error("contact {0:?} is already down")]
    DuplicateContact(ContactId),

    #[error("too many simultaneous contacts")]
    CapacityExceeded,

    #[error("non-finite coordinates")]
    NonFiniteCoordinates,
}

/// Fixed-capacity map from contact id to session.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    sessions: [Option<PointerSession>; MAX_CONTACTS],
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `input` and reports the resulting event.
    ///
    /// Rejected input leaves the table untouched.
    pub fn track(
        &mut self,
        input: &PointerInput,
        now: Timestamp,
    ) -> Result<NormalizedEvent, InvalidGesture> {
        if !input.position.is_finite() {
            return Err(InvalidGesture::NonFiniteCoordinates);
        }

        let id = input.contact;
        match input.phase {
            Phase::Down => {
                if self.find(id).is_some() {
                    return Err(InvalidGesture::DuplicateContact(id));
                }
                let free = self
                    .sessions
                    .iter()
                    .position(Option::is_none)
                    .ok_or(InvalidGesture::CapacityExceeded)?;
                self.sessions[free] = Some(PointerSession {
                    id,
                    start: input.position,
                    current: input.position,
                    start_time: now,
                });
            }
            Phase::Move => {
                let index = self.find(id).ok_or(InvalidGesture::UnknownContact(id))?;
                if let Some(session) = self.sessions[index].as_mut() {
                    session.current = input.position;
                }
            }
            Phase::Up | Phase::Cancel => {
                let index = self.find(id).ok_or(InvalidGesture::UnknownContact(id))?;
                self.sessions[index] = None;
            }
        }

        Ok(NormalizedEvent {
            phase: input.phase,
            contact: id,
            position: input.position,
            contact_count: self.len(),
            timestamp: now,
        })
    }

    fn find(&self, id: ContactId) -> Option<usize> {
        self.sessions
            .iter()
            .position(|slot| slot.is_some_and(|session| session.id == id))
    }

    #[must_use]
    pub fn get(&self, id: ContactId) -> Option<&PointerSession> {
        self.find(id).and_then(|index| self.sessions[index].as_ref())
    }

    /// Current positions of the two active contacts, in press order of their slots.
    #[must_use]
    pub fn pair(&self) -> Option<(Point, Point)> {
        if self.len() != 2 {
            return None;
        }
        let mut active = self.sessions.iter().flatten();
        let a = active.next()?;
        let b = active.next()?;
        Some((a.current, b.current))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.sessions = [None; MAX_CONTACTS];
    }
}
