// SPDX-License-Identifier: LGPL-3.0-only
pub mod icon;

pub use icon::{DirectoryIconLoader, IconCache, IconLookup};
