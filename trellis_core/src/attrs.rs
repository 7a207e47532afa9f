// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute bundles.
//!
//! Every behavior exposes `*_props()` accessors returning small typed structs
//! and those structs are the entire contract a rendering shell may rely on; it
//! must not invent additional ARIA state. Each of them also implements
//! [`PropBundle`], flattening itself into a list of [`Attr`] name/value
//! pairs, so a shell can apply any bundle with one generic code path.
//!
//! Omitted attributes (e.g. `aria-activedescendant` with no highlight) are
//! simply absent from the flattened list; shells should remove them from the
//! node when absent.

use alloc::string::String;
use alloc::vec::Vec;

/// A dynamically-typed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// A static string, e.g. a role name.
    Static(&'static str),
    /// An owned string, e.g. a derived element id.
    String(String),
    /// A boolean, rendered as `"true"`/`"false"` by ARIA convention.
    Bool(bool),
    /// An integer, e.g. `tabindex`.
    Int(i64),
    /// A float, e.g. `aria-valuenow`.
    Float(f64),
}

impl From<&'static str> for AttrValue {
    fn from(v: &'static str) -> Self {
        Self::Static(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// One attribute to apply to a host node.
#[derive(Clone, Debug, PartialEq)]
pub struct Attr {
    /// Attribute name, e.g. `"role"` or `"aria-expanded"`.
    pub name: &'static str,
    /// Attribute value.
    pub value: AttrValue,
}

impl Attr {
    /// Build an attribute from anything convertible to an [`AttrValue`].
    pub fn new(name: &'static str, value: impl Into<AttrValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// A typed prop struct that can flatten itself into raw attributes.
pub trait PropBundle {
    /// The attributes this bundle applies, in a stable order.
    fn attrs(&self) -> Vec<Attr>;
}
