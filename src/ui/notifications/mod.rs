// SPDX-License-Identifier: MPL-2.0
//! User-facing messages.
//!
//! A [`Notification`] carries an i18n key and its arguments; text is resolved
//! only when displayed. The feedback presenter shows one at a time, except
//! for [`Severity::Error`] alerts, which stay until dismissed.

mod notification;

pub use notification::{Notification, Severity};
